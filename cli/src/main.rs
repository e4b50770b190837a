use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nhl_goalie_report::api::NhlClient;
use nhl_goalie_report::compute_season_ranking;
use nhl_goalie_report::config::{Config, DEFAULT_STATS_API, DEFAULT_SUGGEST_API};
use nhl_goalie_report::error::{ApiError, RankingError, ResolutionError};
use nhl_goalie_report::ranking::RankOrder;
use nhl_goalie_report::report::render_report;
use nhl_goalie_report::resolver::{resolve_goaltender, Chooser, GoaltenderIdentity};
use nhl_goalie_report::season::Season;
use nhl_goalie_report::tally::FetchOptions;

#[derive(Parser)]
#[command(name = "goalie-report")]
#[command(about = "Rank the skaters who scored most often against an NHL goaltender in one regular season")]
struct Cli {
    /// Goaltender name to search for among active players
    goalie_name: String,

    /// Regular season, e.g. 2019-2020
    season: Season,

    /// Rate limit delay before each game request in milliseconds
    #[arg(short, long, default_value = "100")]
    delay: u64,

    /// Maximum number of games fetched at once (1 fetches strictly in sequence)
    #[arg(short, long, default_value = "4", value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: u16,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,

    /// Which end of the save percentage scale to list first
    #[arg(long, value_enum, default_value_t = RankOrder::WorstSavePct)]
    order: RankOrder,

    /// Use this player id instead of searching by name
    #[arg(long)]
    goalie_id: Option<u64>,

    /// Base URL of the stats API
    #[arg(long, env = "NHL_STATS_API", default_value = DEFAULT_STATS_API)]
    stats_api: String,

    /// Base URL of the player suggest API
    #[arg(long, env = "NHL_SUGGEST_API", default_value = DEFAULT_SUGGEST_API)]
    suggest_api: String,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            stats_api: self.stats_api.clone(),
            suggest_api: self.suggest_api.clone(),
            timeout: Duration::from_secs(self.timeout),
            fetch: FetchOptions {
                concurrency: usize::from(self.concurrency),
                delay: Duration::from_millis(self.delay),
            },
            order: self.order,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error("setup failed: {0}")]
    Setup(#[source] ApiError),

    #[error("resolution failed: {0}")]
    Resolution(#[from] ResolutionError),

    #[error("could not list games: {0}")]
    Enumeration(#[source] ApiError),

    #[error(transparent)]
    Ranking(#[from] RankingError),
}

/// Numbered prompt on stderr, answer read from stdin.
struct StdinChooser;

impl Chooser for StdinChooser {
    fn choose(&self, query: &str, candidates: &[GoaltenderIdentity]) -> Result<GoaltenderIdentity, ResolutionError> {
        let prompt_failed = |e: io::Error| ResolutionError::Selection(e.to_string());
        let mut stderr = io::stderr().lock();

        writeln!(stderr, "Several goalies match \"{query}\". Which goalie would you like to analyze?")
            .map_err(prompt_failed)?;
        for (i, candidate) in candidates.iter().enumerate() {
            writeln!(stderr, "  {}) {}", i + 1, candidate).map_err(prompt_failed)?;
        }
        write!(stderr, "> ").map_err(prompt_failed)?;
        stderr.flush().map_err(prompt_failed)?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).map_err(prompt_failed)?;
        let answer = line.trim();

        answer
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| candidates.get(i))
            .cloned()
            .ok_or_else(|| ResolutionError::Selection(format!("\"{answer}\" is not one of the listed choices")))
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nhl_goalie_report=info,goalie_report=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: &Cli) -> Result<String, AppError> {
    let config = cli.config();
    let client = NhlClient::new(&config.stats_api, &config.suggest_api, config.timeout)
        .map_err(AppError::Setup)?;

    let goalie = match cli.goalie_id {
        Some(id) => GoaltenderIdentity {
            display_name: cli.goalie_name.clone(),
            id,
        },
        None => resolve_goaltender(&client, &cli.goalie_name, &StdinChooser).await?,
    };

    let games = client
        .game_log(goalie.id, cli.season)
        .await
        .map_err(AppError::Enumeration)?;
    info!(
        "📅 Found {} regular season games for {} in {}",
        games.len(),
        goalie,
        cli.season
    );

    let rows = compute_season_ranking(goalie.id, &games, &client, config.fetch, config.order).await?;
    info!("✅ Ranked {} shooters", rows.len());

    Ok(render_report(&goalie.display_name, cli.season, &rows))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("🏒 NHL Goalie Report");
    info!("Rate limit delay: {}ms, concurrency: {}", cli.delay, cli.concurrency);

    match run(&cli).await {
        Ok(report) => {
            print!("{report}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ {e}");
            ExitCode::FAILURE
        }
    }
}
