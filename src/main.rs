use clap::Parser;
use indicatif::ProgressBar;

use league_coach::analysis::PerformanceAnalyzer;
use league_coach::api::client::RiotApiClient;
use league_coach::api::models::PlayerIdentity;
use league_coach::cancel::CancelToken;
use league_coach::config::Config;
use league_coach::display::output::{
    display_api_usage, display_error, display_info, display_report, display_success,
    display_warning,
};
use league_coach::error::AppError;
use league_coach::pipeline::{run_analysis, AnalysisObserver};

#[derive(Parser, Debug)]
#[command(name = "League Coach")]
#[command(about = "Analyze recent ranked games and surface performance insights", long_about = None)]
struct Args {
    /// Riot ID (format: Name#TAG)
    riot_id: String,

    /// Region (default: na1)
    #[arg(short, long)]
    region: Option<String>,

    /// Number of matches to analyze (default: 20, max: 20)
    #[arg(short, long, default_value = "20")]
    matches: usize,

    /// Print the report as JSON instead of tables
    #[arg(long)]
    json: bool,
}

/// Wires pipeline progress into the terminal: status lines, a progress bar
/// for the serial fetch loop, warnings for skipped matches.
#[derive(Default)]
struct CliObserver {
    progress: Option<ProgressBar>,
}

impl AnalysisObserver for CliObserver {
    fn identity_resolved(&mut self, identity: &PlayerIdentity) {
        display_success(&format!(
            "Found {} (level {}, PUUID {}…)",
            identity.riot_id(),
            identity.summoner_level,
            &identity.puuid[..identity.puuid.len().min(8)]
        ));
    }

    fn match_ids_listed(&mut self, count: usize) {
        display_success(&format!("Found {} matches to analyze", count));
        let bar = ProgressBar::new(count as u64);
        bar.set_message("Fetching match details");
        self.progress = Some(bar);
    }

    fn match_fetched(&mut self, _fetched: usize, _total: usize) {
        if let Some(bar) = &self.progress {
            bar.inc(1);
        }
    }

    fn match_skipped(&mut self, match_id: &str, error: &AppError) {
        let warning = format!("Skipping match {}: {}", match_id, error);
        match &self.progress {
            Some(bar) => bar.println(warning),
            None => display_warning(&warning),
        }
    }

    fn match_fetch_complete(&mut self, fetched: usize, skipped: usize) {
        if let Some(bar) = self.progress.take() {
            bar.finish_with_message("Match data fetched");
        }
        if skipped > 0 {
            display_warning(&format!(
                "Fetched {} matches, skipped {} that failed",
                fetched, skipped
            ));
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        match e.downcast_ref::<AppError>() {
            Some(app_error) => display_error(app_error),
            None => eprintln!("❌ Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;
    if let Some(region) = args.region {
        config.region = region;
    }

    display_info(&format!(
        "Fetching data for {} in region {}",
        args.riot_id, config.region
    ));

    let client = RiotApiClient::new(config);
    let analyzer = PerformanceAnalyzer::new();
    let cancel = CancelToken::new();
    let mut observer = CliObserver::default();

    let outcome = run_analysis(
        &client,
        &analyzer,
        &args.riot_id,
        args.matches,
        &cancel,
        &mut observer,
    )?;

    let outcome = match outcome {
        Some(outcome) => outcome,
        None => {
            display_info("Analysis cancelled");
            return Ok(());
        }
    };

    if args.json {
        let payload = serde_json::json!({
            "generatedAt": chrono::Utc::now().to_rfc3339(),
            "player": outcome.identity,
            "report": outcome.report,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        display_report(&outcome.identity, &outcome.report);
    }

    display_api_usage(&client.rate_limit_status());

    Ok(())
}
