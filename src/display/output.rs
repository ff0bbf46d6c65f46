use crate::analysis::report::{ChampionPerformance, PerformanceReport, RolePerformance};
use crate::api::models::PlayerIdentity;
use crate::error::AppError;
use crate::rate_limit::PacerStatus;
use colored::*;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct ChampionRow {
    champion: String,
    games: String,
    record: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    #[tabled(rename = "KDA")]
    kda: String,
    #[tabled(rename = "CS/min")]
    cs_min: String,
    #[tabled(rename = "DMG/min")]
    damage_min: String,
}

#[derive(Tabled)]
struct RoleRow {
    role: String,
    games: String,
    record: String,
    #[tabled(rename = "win rate")]
    win_rate: String,
    #[tabled(rename = "KDA")]
    kda: String,
    #[tabled(rename = "avg CS")]
    cs: String,
    vision: String,
}

pub fn display_info(message: &str) {
    println!("{} {}", "ℹ️".cyan(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

pub fn display_warning(message: &str) {
    println!("{} {}", "⚠️".yellow(), message);
}

/// Fatal-error display: the message plus remediation hints picked by error
/// kind, never by message text.
pub fn display_error(error: &AppError) {
    eprintln!("{} {}", "❌ Error:".red().bold(), error);
    for hint in error_hints(error) {
        eprintln!("   {} {}", "•".yellow(), hint);
    }
}

fn error_hints(error: &AppError) -> &'static [&'static str] {
    match error {
        AppError::InvalidRiotId => &["Use the full Riot ID, e.g. Faker#KR1"],
        AppError::NotFound(_) => &[
            "Double-check the spelling of the Riot ID",
            "Make sure the region matches the account",
        ],
        AppError::AuthFailure => &[
            "Check that RIOT_API_KEY is set and not expired",
            "Development keys expire every 24 hours",
        ],
        AppError::RateLimited => &["Wait a few minutes before retrying"],
        AppError::Timeout | AppError::Http(_) => {
            &["Check your network connection and try again"]
        }
        AppError::NoRecentMatches => {
            &["Try a different region, or play a few ranked games first"]
        }
        _ => &[],
    }
}

pub fn display_report(identity: &PlayerIdentity, report: &PerformanceReport) {
    println!(
        "\n{}",
        format!(
            "📊 PERFORMANCE REPORT for {} (level {})",
            identity.riot_id(),
            identity.summoner_level
        )
        .bold()
        .cyan()
    );
    println!("{}", "=".repeat(70).cyan());
    println!(
        "Generated {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M")
    );

    let losses = report.total_games - report.wins;
    println!(
        "{} {} games — {} W / {} L ({:.1}% WR)",
        "📈 Overall:".bold(),
        report.total_games,
        report.wins.to_string().green(),
        losses.to_string().red(),
        report.win_rate
    );
    println!(
        "   KDA {:.2} ({:.1} / {:.1} / {:.1})",
        report.average_kda, report.average_kills, report.average_deaths, report.average_assists
    );
    println!(
        "   CS {:.1} ({:.1}/min) | Damage {:.0} ({:.0}/min) | Vision {:.1}",
        report.average_cs,
        report.average_cs_min,
        report.average_damage,
        report.average_damage_min,
        report.average_vision_score
    );
    println!(
        "   Avg game length: {:.0} min | Best role: {}",
        report.average_game_duration / 60.0,
        report.best_role.bold()
    );

    display_champion_table(&report.champion_breakdown);
    display_role_table(&report.role_breakdown);

    println!("\n{}", "📉 Trends (recent 5 vs previous 5)".bold().cyan());
    println!("   Early game: {}", trend_label(&report.trends.early_game.to_string()));
    println!("   Mid game:   {}", trend_label(&report.trends.mid_game.to_string()));
    println!("   Late game:  {}", trend_label(&report.trends.late_game.to_string()));
    println!(
        "   Consistency: {}",
        consistency_label(&report.trends.consistency.to_string())
    );
    println!();
}

fn trend_label(label: &str) -> ColoredString {
    match label {
        "strong" => label.green(),
        "weak" => label.red(),
        _ => label.yellow(),
    }
}

fn consistency_label(label: &str) -> ColoredString {
    match label {
        "high" => label.green(),
        "low" => label.red(),
        _ => label.yellow(),
    }
}

fn display_champion_table(champions: &[ChampionPerformance]) {
    if champions.is_empty() {
        return;
    }

    println!("\n{}", "🏆 CHAMPION BREAKDOWN".bold().cyan());

    let rows: Vec<ChampionRow> = champions
        .iter()
        .map(|c| ChampionRow {
            champion: c.champion_name.clone(),
            games: c.games.to_string(),
            record: format!("{}W/{}L", c.wins, c.games - c.wins),
            win_rate: format!("{:.1}%", c.win_rate),
            kda: format!("{:.2}", c.average_kda),
            cs_min: format!("{:.1}", c.average_cs_min),
            damage_min: format!("{:.0}", c.average_damage_min),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

fn display_role_table(roles: &[RolePerformance]) {
    if roles.is_empty() {
        return;
    }

    println!("\n{}", "🗺️  ROLE BREAKDOWN".bold().cyan());

    let rows: Vec<RoleRow> = roles
        .iter()
        .map(|r| RoleRow {
            role: r.role.clone(),
            games: r.games.to_string(),
            record: format!("{}W/{}L", r.wins, r.games - r.wins),
            win_rate: format!("{:.1}%", r.win_rate),
            kda: format!("{:.2}", r.average_kda),
            cs: format!("{:.1}", r.average_cs),
            vision: format!("{:.1}", r.average_vision_score),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{}", table);
}

pub fn display_api_usage(status: &PacerStatus) {
    println!(
        "\n{} {}/{} requests in the current {}-minute window",
        "📊 API usage:".bold(),
        status.requests_in_window,
        status.max_requests_per_window,
        status.window.as_secs() / 60
    );
}
