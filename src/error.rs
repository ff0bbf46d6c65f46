use thiserror::Error;

/// Error taxonomy for the whole pipeline. Presentation code switches on the
/// variant, never on message text.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid Riot ID format. Use format: Name#TAG")]
    InvalidRiotId,

    #[error("{0} not found. Please check the name and region.")]
    NotFound(String),

    #[error("API key invalid or expired")]
    AuthFailure,

    #[error("Rate limit exceeded, please try again in a few minutes")]
    RateLimited,

    #[error("Request timed out, please try again")]
    Timeout,

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON parsing error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No recent matches found for this player")]
    NoRecentMatches,

    #[error("Failed to fetch any match details, please try again")]
    NoMatchData,

    #[error("No matches to analyze")]
    NoMatches,

    #[error("Player not found in match {0}")]
    PlayerNotInMatch(String),
}
