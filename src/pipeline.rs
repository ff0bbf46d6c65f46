use crate::analysis::report::PerformanceReport;
use crate::analysis::PerformanceAnalyzer;
use crate::api::client::{RiotApiClient, SkippedMatch};
use crate::api::models::PlayerIdentity;
use crate::cancel::CancelToken;
use crate::error::AppError;

/// Progress and warning side-channel for the analysis flow. Hosts implement
/// what they care about; everything defaults to a no-op.
pub trait AnalysisObserver {
    fn identity_resolved(&mut self, _identity: &PlayerIdentity) {}
    fn match_ids_listed(&mut self, _count: usize) {}
    fn match_fetched(&mut self, _fetched: usize, _total: usize) {}
    fn match_skipped(&mut self, _match_id: &str, _error: &AppError) {}
    fn match_fetch_complete(&mut self, _fetched: usize, _skipped: usize) {}
}

pub struct NoopObserver;

impl AnalysisObserver for NoopObserver {}

#[derive(Debug)]
pub struct AnalysisOutcome {
    pub identity: PlayerIdentity,
    pub report: PerformanceReport,
    pub skipped: Vec<SkippedMatch>,
}

/// Runs the full flow: resolve identity, list recent match ids, fetch each
/// match serially under the rate limit, analyze the batch. Identity and
/// listing failures are fatal; individual match failures are warnings unless
/// nothing survives. Returns `Ok(None)` when cancelled — cancellation is
/// checked between every step and inside the fetch loop, and partial results
/// are dropped.
pub fn run_analysis(
    client: &RiotApiClient,
    analyzer: &PerformanceAnalyzer,
    riot_id: &str,
    match_count: usize,
    cancel: &CancelToken,
    observer: &mut dyn AnalysisObserver,
) -> Result<Option<AnalysisOutcome>, AppError> {
    if cancel.is_cancelled() {
        return Ok(None);
    }

    let identity = client.resolve_player(riot_id)?;
    observer.identity_resolved(&identity);

    if cancel.is_cancelled() {
        return Ok(None);
    }

    let match_ids = client.get_match_ids(&identity.puuid, match_count)?;
    if match_ids.is_empty() {
        return Err(AppError::NoRecentMatches);
    }
    observer.match_ids_listed(match_ids.len());

    if cancel.is_cancelled() {
        return Ok(None);
    }

    let batch = client.get_matches(&match_ids, cancel, observer);
    if cancel.is_cancelled() {
        return Ok(None);
    }
    observer.match_fetch_complete(batch.matches.len(), batch.skipped.len());

    if batch.matches.is_empty() {
        return Err(AppError::NoMatchData);
    }

    let report = analyzer.analyze(&batch.matches, &identity.puuid)?;

    Ok(Some(AnalysisOutcome {
        identity,
        report,
        skipped: batch.skipped,
    }))
}
