use crate::cancel::CancelToken;
use crate::config::Config;
use crate::error::AppError;
use crate::pipeline::AnalysisObserver;
use crate::rate_limit::{Clock, MonotonicClock, PacerStatus, RequestPacer};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use super::endpoints;
use super::models::*;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Hard ceiling on match ids per analysis, regardless of what the caller
/// asks for. Protects the shared request budget.
const MAX_MATCH_COUNT: usize = 20;
const MAX_RETRIES: u32 = 3;

/// Raw HTTP seam. The production implementation is ureq; tests script
/// responses through it.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str, api_key: &str) -> Result<String, TransportError>;
}

#[derive(Debug)]
pub enum TransportError {
    Status(u16),
    Timeout,
    Network(String),
}

pub struct UreqTransport;

impl Transport for UreqTransport {
    fn get(&self, url: &str, api_key: &str) -> Result<String, TransportError> {
        let response = ureq::get(url)
            .set("X-Riot-Token", api_key)
            .set("User-Agent", "league_coach/0.1.0")
            .timeout(REQUEST_TIMEOUT)
            .call();

        match response {
            Ok(resp) => resp
                .into_string()
                .map_err(|e| TransportError::Network(e.to_string())),
            Err(ureq::Error::Status(code, _)) => Err(TransportError::Status(code)),
            Err(ureq::Error::Transport(transport)) => {
                if is_timeout(&transport) {
                    Err(TransportError::Timeout)
                } else {
                    Err(TransportError::Network(transport.to_string()))
                }
            }
        }
    }
}

// ureq surfaces socket deadlines as io errors buried in the transport chain.
fn is_timeout(err: &ureq::Transport) -> bool {
    use std::error::Error;

    let mut source = err.source();
    while let Some(inner) = source {
        if let Some(io) = inner.downcast_ref::<std::io::Error>() {
            return matches!(
                io.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
            );
        }
        source = inner.source();
    }
    false
}

/// A successfully fetched batch plus the ids that had to be skipped.
#[derive(Debug, Default)]
pub struct MatchBatch {
    pub matches: Vec<MatchDto>,
    pub skipped: Vec<SkippedMatch>,
}

#[derive(Debug)]
pub struct SkippedMatch {
    pub match_id: String,
    pub error: AppError,
}

pub struct RiotApiClient {
    config: Config,
    transport: Box<dyn Transport>,
    pacer: RequestPacer,
    clock: Arc<dyn Clock>,
}

impl RiotApiClient {
    pub fn new(config: Config) -> Self {
        Self::with_transport(config, Box::new(UreqTransport), Arc::new(MonotonicClock))
    }

    pub fn with_transport(
        config: Config,
        transport: Box<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let pacer = RequestPacer::new(clock.clone());
        RiotApiClient {
            config,
            transport,
            pacer,
            clock,
        }
    }

    pub fn rate_limit_status(&self) -> PacerStatus {
        self.pacer.status()
    }

    fn execute(&self, url: &str, resource: &str) -> Result<String, AppError> {
        let mut retry_count: u32 = 0;

        loop {
            self.pacer.wait_turn();

            match self.transport.get(url, &self.config.api_key) {
                Ok(body) => return Ok(body),
                Err(TransportError::Status(429)) => {
                    if retry_count >= MAX_RETRIES {
                        return Err(AppError::RateLimited);
                    }
                    retry_count += 1;
                    self.clock
                        .sleep(Duration::from_millis(2000 * retry_count as u64));
                }
                Err(TransportError::Status(404)) => {
                    return Err(AppError::NotFound(resource.to_string()))
                }
                Err(TransportError::Status(403)) => return Err(AppError::AuthFailure),
                Err(TransportError::Status(code)) => {
                    return Err(AppError::Http(format!(
                        "{} request failed with status {}",
                        resource, code
                    )))
                }
                Err(TransportError::Timeout) => return Err(AppError::Timeout),
                Err(TransportError::Network(message)) => return Err(AppError::Http(message)),
            }
        }
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str, resource: &str) -> Result<T, AppError> {
        let body = self.execute(url, resource)?;
        serde_json::from_str(&body).map_err(|e| AppError::Json(format!("{}: {}", resource, e)))
    }

    /// Resolves "Name#TAG" into a full player identity via two chained
    /// lookups: account by Riot ID, then summoner by PUUID. The format check
    /// happens before any network call.
    pub fn resolve_player(&self, riot_id: &str) -> Result<PlayerIdentity, AppError> {
        let (game_name, tag_line) = riot_id.split_once('#').ok_or(AppError::InvalidRiotId)?;

        let account: AccountDto = self.get_json(
            &endpoints::account_by_riot_id(&self.config.region, game_name, tag_line),
            "Account",
        )?;
        let summoner: SummonerDto = self.get_json(
            &endpoints::summoner_by_puuid(&self.config.region, &account.puuid),
            "Summoner",
        )?;

        Ok(PlayerIdentity {
            puuid: account.puuid,
            game_name: account.game_name,
            tag_line: account.tag_line,
            summoner_level: summoner.summoner_level,
            profile_icon_id: summoner.profile_icon_id,
        })
    }

    pub fn get_match_ids(&self, puuid: &str, count: usize) -> Result<Vec<String>, AppError> {
        let safe_count = count.min(MAX_MATCH_COUNT);
        self.get_json(
            &endpoints::match_ids_by_puuid(&self.config.region, puuid, safe_count),
            "Match history",
        )
    }

    pub fn get_match(&self, match_id: &str) -> Result<MatchDto, AppError> {
        self.get_json(&endpoints::match_by_id(&self.config.region, match_id), "Match")
    }

    /// Fetches each match serially, continuing past individual failures.
    /// Serial on purpose: a concurrent fan-out would burst past the shared
    /// request budget no matter how each call is spaced. Cancellation is
    /// checked before every request and drops partial results.
    pub fn get_matches(
        &self,
        match_ids: &[String],
        cancel: &CancelToken,
        observer: &mut dyn AnalysisObserver,
    ) -> MatchBatch {
        let mut batch = MatchBatch::default();

        for (idx, match_id) in match_ids.iter().enumerate() {
            if cancel.is_cancelled() {
                return MatchBatch::default();
            }

            match self.get_match(match_id) {
                Ok(match_data) => {
                    batch.matches.push(match_data);
                    observer.match_fetched(idx + 1, match_ids.len());
                }
                Err(error) => {
                    observer.match_skipped(match_id, &error);
                    batch.skipped.push(SkippedMatch {
                        match_id: match_id.clone(),
                        error,
                    });
                }
            }
        }

        batch
    }
}
