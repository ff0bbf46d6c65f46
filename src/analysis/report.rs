use serde::Serialize;
use std::fmt;

/// Aggregate over one batch of matches for a single player. Derived purely
/// from its inputs; never mutated after construction.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceReport {
    pub total_games: usize,
    pub wins: usize,
    /// Percentage, 0-100.
    pub win_rate: f64,
    pub average_kda: f64,
    pub average_kills: f64,
    pub average_deaths: f64,
    pub average_assists: f64,
    pub average_cs: f64,
    pub average_cs_min: f64,
    pub average_damage: f64,
    pub average_damage_min: f64,
    pub average_vision_score: f64,
    /// Seconds.
    pub average_game_duration: f64,
    pub best_role: String,
    /// Ordered by descending win rate.
    pub champion_breakdown: Vec<ChampionPerformance>,
    /// Ordered by descending win rate.
    pub role_breakdown: Vec<RolePerformance>,
    pub trends: PerformanceTrends,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionPerformance {
    pub champion_id: i32,
    pub champion_name: String,
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub average_kda: f64,
    pub average_kills: f64,
    pub average_deaths: f64,
    pub average_assists: f64,
    pub average_cs: f64,
    pub average_cs_min: f64,
    pub average_damage: f64,
    pub average_damage_min: f64,
    pub average_vision_score: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RolePerformance {
    pub role: String,
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub average_kda: f64,
    pub average_cs: f64,
    pub average_damage: f64,
    pub average_vision_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceTrends {
    pub early_game: TrendLevel,
    pub mid_game: TrendLevel,
    pub late_game: TrendLevel,
    pub consistency: Consistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendLevel {
    Strong,
    #[default]
    Average,
    Weak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Consistency {
    High,
    #[default]
    Medium,
    Low,
}

impl fmt::Display for TrendLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendLevel::Strong => "strong",
            TrendLevel::Average => "average",
            TrendLevel::Weak => "weak",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Consistency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Consistency::High => "high",
            Consistency::Medium => "medium",
            Consistency::Low => "low",
        };
        f.write_str(label)
    }
}
