use std::collections::BTreeMap;

use crate::api::models::{MatchDto, ParticipantDto};
use crate::error::AppError;

use super::report::{
    ChampionPerformance, Consistency, PerformanceReport, PerformanceTrends, RolePerformance,
    TrendLevel,
};
use super::roles::normalize_role;

/// Pure transformation of a batch of matches into a performance report for
/// one fixed player. Holds no state; every report is derived entirely from
/// the inputs of a single call.
#[derive(Debug, Default)]
pub struct PerformanceAnalyzer;

impl PerformanceAnalyzer {
    pub fn new() -> Self {
        PerformanceAnalyzer
    }

    /// Fails on an empty batch, and on any match that does not contain the
    /// target player. The latter is a hard precondition violation, not a
    /// skip: a batch fetched for one PUUID must contain that PUUID in every
    /// match, so anything else means the caller mixed up its inputs.
    pub fn analyze(
        &self,
        matches: &[MatchDto],
        puuid: &str,
    ) -> Result<PerformanceReport, AppError> {
        if matches.is_empty() {
            return Err(AppError::NoMatches);
        }

        let mut player_matches: Vec<(&MatchDto, &ParticipantDto)> =
            Vec::with_capacity(matches.len());
        for match_data in matches {
            let participant = match_data
                .info
                .participants
                .iter()
                .find(|p| p.puuid == puuid)
                .ok_or_else(|| AppError::PlayerNotInMatch(match_data.metadata.match_id.clone()))?;
            player_matches.push((match_data, participant));
        }

        let total_games = player_matches.len();
        let wins = player_matches.iter().filter(|(_, p)| p.win).count();
        let win_rate = wins as f64 / total_games as f64 * 100.0;

        let average_kda = average(&kda_values(&player_matches));
        let average_kills = average_of(&player_matches, |p| p.kills as f64);
        let average_deaths = average_of(&player_matches, |p| p.deaths as f64);
        let average_assists = average_of(&player_matches, |p| p.assists as f64);
        let average_cs = average_of(&player_matches, |p| p.total_minions_killed as f64);
        let average_damage =
            average_of(&player_matches, |p| p.total_damage_dealt_to_champions as f64);
        let average_vision_score = average_of(&player_matches, |p| p.vision_score as f64);

        // Per-minute rates are the mean of per-match ratios, not pooled sums
        // over pooled minutes; the two diverge as soon as game lengths vary.
        let average_cs_min = average(
            &player_matches
                .iter()
                .map(|(m, p)| per_minute(p.total_minions_killed as f64, m.info.game_duration))
                .collect::<Vec<_>>(),
        );
        let average_damage_min = average(
            &player_matches
                .iter()
                .map(|(m, p)| {
                    per_minute(p.total_damage_dealt_to_champions as f64, m.info.game_duration)
                })
                .collect::<Vec<_>>(),
        );
        let average_game_duration =
            average(&player_matches.iter().map(|(m, _)| m.info.game_duration as f64).collect::<Vec<_>>());

        let champion_breakdown = champion_breakdown(&player_matches);
        let role_breakdown = role_breakdown(&player_matches);
        let best_role = determine_best_role(&role_breakdown);
        let trends = analyze_trends(&player_matches);

        Ok(PerformanceReport {
            total_games,
            wins,
            win_rate,
            average_kda,
            average_kills,
            average_deaths,
            average_assists,
            average_cs,
            average_cs_min,
            average_damage,
            average_damage_min,
            average_vision_score,
            average_game_duration,
            best_role,
            champion_breakdown,
            role_breakdown,
            trends,
        })
    }
}

fn average(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn average_of(
    player_matches: &[(&MatchDto, &ParticipantDto)],
    value: impl Fn(&ParticipantDto) -> f64,
) -> f64 {
    average(&player_matches.iter().map(|&(_, p)| value(p)).collect::<Vec<_>>())
}

/// Zero deaths collapses to kills + assists instead of dividing by zero, so
/// deathless games still score their full numerator.
fn kda(kills: i32, deaths: i32, assists: i32) -> f64 {
    if deaths == 0 {
        (kills + assists) as f64
    } else {
        (kills + assists) as f64 / deaths as f64
    }
}

fn kda_values(player_matches: &[(&MatchDto, &ParticipantDto)]) -> Vec<f64> {
    player_matches
        .iter()
        .map(|(_, p)| kda(p.kills, p.deaths, p.assists))
        .collect()
}

fn per_minute(value: f64, game_duration_secs: i64) -> f64 {
    value / (game_duration_secs as f64 / 60.0)
}

struct ChampionAccum {
    name: String,
    games: usize,
    wins: usize,
    kda: Vec<f64>,
    kills: f64,
    deaths: f64,
    assists: f64,
    cs: f64,
    damage: f64,
    vision: f64,
}

fn champion_breakdown(
    player_matches: &[(&MatchDto, &ParticipantDto)],
) -> Vec<ChampionPerformance> {
    // BTreeMap keyed by champion id so equal win rates tie-break
    // deterministically (ascending id) under the stable sort below.
    let mut by_champion: BTreeMap<i32, ChampionAccum> = BTreeMap::new();

    for (_, p) in player_matches {
        let accum = by_champion.entry(p.champion_id).or_insert_with(|| ChampionAccum {
            name: p.champion_name.clone(),
            games: 0,
            wins: 0,
            kda: Vec::new(),
            kills: 0.0,
            deaths: 0.0,
            assists: 0.0,
            cs: 0.0,
            damage: 0.0,
            vision: 0.0,
        });

        accum.games += 1;
        if p.win {
            accum.wins += 1;
        }
        accum.kda.push(kda(p.kills, p.deaths, p.assists));
        accum.kills += p.kills as f64;
        accum.deaths += p.deaths as f64;
        accum.assists += p.assists as f64;
        accum.cs += p.total_minions_killed as f64;
        accum.damage += p.total_damage_dealt_to_champions as f64;
        accum.vision += p.vision_score as f64;
    }

    let mut breakdown: Vec<ChampionPerformance> = by_champion
        .into_iter()
        .map(|(champion_id, accum)| {
            let games = accum.games as f64;
            let average_cs = accum.cs / games;
            let average_damage = accum.damage / games;
            ChampionPerformance {
                champion_id,
                champion_name: accum.name,
                games: accum.games,
                wins: accum.wins,
                win_rate: accum.wins as f64 / games * 100.0,
                average_kda: average(&accum.kda),
                average_kills: accum.kills / games,
                average_deaths: accum.deaths / games,
                average_assists: accum.assists / games,
                average_cs,
                average_cs_min: average_cs / 10.0, // Approximate
                average_damage,
                average_damage_min: average_damage / 10.0, // Approximate
                average_vision_score: accum.vision / games,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    breakdown
}

struct RoleAccum {
    games: usize,
    wins: usize,
    kda: Vec<f64>,
    cs: f64,
    damage: f64,
    vision: f64,
}

fn role_breakdown(player_matches: &[(&MatchDto, &ParticipantDto)]) -> Vec<RolePerformance> {
    let mut by_role: BTreeMap<String, RoleAccum> = BTreeMap::new();

    for (_, p) in player_matches {
        let role = normalize_role(&p.individual_position, &p.team_position);
        let accum = by_role.entry(role).or_insert_with(|| RoleAccum {
            games: 0,
            wins: 0,
            kda: Vec::new(),
            cs: 0.0,
            damage: 0.0,
            vision: 0.0,
        });

        accum.games += 1;
        if p.win {
            accum.wins += 1;
        }
        accum.kda.push(kda(p.kills, p.deaths, p.assists));
        accum.cs += p.total_minions_killed as f64;
        accum.damage += p.total_damage_dealt_to_champions as f64;
        accum.vision += p.vision_score as f64;
    }

    let mut breakdown: Vec<RolePerformance> = by_role
        .into_iter()
        .map(|(role, accum)| {
            let games = accum.games as f64;
            RolePerformance {
                role,
                games: accum.games,
                wins: accum.wins,
                win_rate: accum.wins as f64 / games * 100.0,
                average_kda: average(&accum.kda),
                average_cs: accum.cs / games,
                average_damage: accum.damage / games,
                average_vision_score: accum.vision / games,
            }
        })
        .collect();

    breakdown.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    breakdown
}

/// Picks the best role from the win-rate-sorted breakdown. Roles with fewer
/// than 3 games are skipped unless the scan never finds a qualified one, in
/// which case the fold keeps its starting element (the highest win rate).
/// Strict `>` keeps the earlier entry on score ties.
fn determine_best_role(roles: &[RolePerformance]) -> String {
    let mut iter = roles.iter();
    let mut best = match iter.next() {
        Some(first) => first,
        None => return "Unknown".to_string(),
    };

    for current in iter {
        if current.games < 3 {
            continue;
        }
        if best.games < 3 {
            best = current;
            continue;
        }
        if role_score(current) > role_score(best) {
            best = current;
        }
    }

    best.role.clone()
}

// Win rate weighted over volume, volume normalized to the 20-match window.
fn role_score(role: &RolePerformance) -> f64 {
    role.win_rate * 0.7 + (role.games as f64 / 20.0) * 0.3
}

fn analyze_trends(player_matches: &[(&MatchDto, &ParticipantDto)]) -> PerformanceTrends {
    if player_matches.len() < 5 {
        return PerformanceTrends::default();
    }

    // Most recent first.
    let mut sorted = player_matches.to_vec();
    sorted.sort_by(|a, b| b.0.info.game_creation.cmp(&a.0.info.game_creation));

    let recent = &sorted[..5];
    let previous = &sorted[5..sorted.len().min(10)];
    if previous.is_empty() {
        return PerformanceTrends::default();
    }

    let kda_change = percent_change(average(&kda_values(recent)), average(&kda_values(previous)));
    let cs_change = percent_change(
        average_of(recent, |p| p.total_minions_killed as f64),
        average_of(previous, |p| p.total_minions_killed as f64),
    );

    let early_game = classify_change(kda_change);
    let mid_game = classify_change(cs_change);
    let late_game = classify_change((kda_change + cs_change) / 2.0);

    // Consistency looks at the whole batch, not just the two windows.
    let consistency = classify_consistency(std_deviation(&kda_values(player_matches)));

    PerformanceTrends {
        early_game,
        mid_game,
        late_game,
        consistency,
    }
}

fn percent_change(current: f64, previous: f64) -> f64 {
    (current - previous) / previous * 100.0
}

fn classify_change(change: f64) -> TrendLevel {
    if change > 10.0 {
        TrendLevel::Strong
    } else if change < -10.0 {
        TrendLevel::Weak
    } else {
        TrendLevel::Average
    }
}

fn classify_consistency(std_dev: f64) -> Consistency {
    if std_dev < 1.0 {
        Consistency::High
    } else if std_dev < 2.0 {
        Consistency::Medium
    } else {
        Consistency::Low
    }
}

// Population standard deviation.
fn std_deviation(values: &[f64]) -> f64 {
    let mean = average(values);
    let squared_diffs: Vec<f64> = values.iter().map(|v| (v - mean).powi(2)).collect();
    average(&squared_diffs).sqrt()
}
