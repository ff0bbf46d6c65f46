use league_coach::api::client::{RiotApiClient, Transport, TransportError};
use league_coach::config::Config;
use league_coach::rate_limit::Clock;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const PUUID: &str = "puuid-1";

/// Clock that advances simulated time instead of blocking, so paced requests
/// run instantly in tests.
pub struct TestClock {
    start: Instant,
    offset: Mutex<Duration>,
}

impl TestClock {
    pub fn new() -> Self {
        TestClock {
            start: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }
}

impl Clock for TestClock {
    fn now(&self) -> Instant {
        self.start + *self.offset.lock().unwrap()
    }

    fn sleep(&self, duration: Duration) {
        *self.offset.lock().unwrap() += duration;
    }
}

/// Serves scripted responses in order and records every requested URL.
pub struct MockTransport {
    responses: Mutex<VecDeque<Result<String, TransportError>>>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    pub fn new(responses: Vec<Result<String, TransportError>>) -> Self {
        MockTransport {
            responses: Mutex::new(responses.into()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle the test keeps after the transport is boxed away.
    pub fn calls_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, _api_key: &str) -> Result<String, TransportError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Network("no scripted response".into())))
    }
}

pub fn test_client(transport: MockTransport) -> RiotApiClient {
    RiotApiClient::with_transport(
        Config::new("test-key", "euw1"),
        Box::new(transport),
        Arc::new(TestClock::new()),
    )
}

pub fn account_body() -> Result<String, TransportError> {
    Ok(json!({"puuid": PUUID, "gameName": "Faker", "tagLine": "KR1"}).to_string())
}

pub fn summoner_body() -> Result<String, TransportError> {
    Ok(json!({"puuid": PUUID, "summonerLevel": 512, "profileIconId": 29}).to_string())
}

pub fn match_ids_body(ids: &[&str]) -> Result<String, TransportError> {
    Ok(json!(ids).to_string())
}

pub struct MatchSpec {
    pub match_id: &'static str,
    pub game_creation: i64,
    pub game_duration: i64,
    pub kills: i32,
    pub deaths: i32,
    pub assists: i32,
    pub cs: i32,
    pub win: bool,
}

impl Default for MatchSpec {
    fn default() -> Self {
        MatchSpec {
            match_id: "EUW1_1",
            game_creation: 1_700_000_000_000,
            game_duration: 1800,
            kills: 5,
            deaths: 2,
            assists: 7,
            cs: 180,
            win: true,
        }
    }
}

pub fn match_body(spec: MatchSpec) -> Result<String, TransportError> {
    Ok(json!({
        "metadata": {"matchId": spec.match_id},
        "info": {
            "gameCreation": spec.game_creation,
            "gameDuration": spec.game_duration,
            "participants": [
                {
                    "puuid": PUUID,
                    "championId": 103,
                    "championName": "Ahri",
                    "individualPosition": "MIDDLE",
                    "teamPosition": "MIDDLE",
                    "kills": spec.kills,
                    "deaths": spec.deaths,
                    "assists": spec.assists,
                    "totalMinionsKilled": spec.cs,
                    "totalDamageDealtToChampions": 20000,
                    "visionScore": 18,
                    "win": spec.win
                },
                {
                    "puuid": "enemy-1",
                    "championId": 266,
                    "championName": "Aatrox",
                    "individualPosition": "TOP",
                    "teamPosition": "TOP",
                    "kills": 3,
                    "deaths": 6,
                    "assists": 2,
                    "totalMinionsKilled": 150,
                    "totalDamageDealtToChampions": 14000,
                    "visionScore": 12,
                    "win": !spec.win
                }
            ]
        }
    })
    .to_string())
}
