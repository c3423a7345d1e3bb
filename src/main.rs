use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixture_board::config::{Config, ThemeConfig};
use fixture_board::models::Competition;
use fixture_board::pipeline::{group_by_competition, FixtureFetcher, MonthKey};
use fixture_board::theme::{Theme, ThemeStore};
use fixture_board::view::{league_buttons, BoardView};

#[derive(Parser)]
#[command(name = "fixture-board", version, about = "Football fixtures by league and month")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a season of fixtures and print them by league and month
    Fixtures {
        /// Season year (defaults to FIXTURE_SEASON)
        #[arg(long)]
        season: Option<i32>,

        /// League id to fetch; repeat for several (defaults to all five)
        #[arg(long = "league")]
        leagues: Vec<i64>,

        /// Only show this month, e.g. 2022-3
        #[arg(long)]
        month: Option<MonthKey>,

        /// Print the view model as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the tracked leagues
    Leagues,

    /// Show or change the stored theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Dark,
    Light,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fixture_board=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Leagues => {
            for button in league_buttons() {
                println!("{:>4}  {:<16} {}", button.id, button.name, button.logo);
            }
            Ok(())
        }
        Command::Theme { action } => run_theme(action),
        Command::Fixtures {
            season,
            leagues,
            month,
            json,
        } => {
            let config = Config::from_env()?;
            if let Err(e) = run_fixtures(&config, season, leagues, month, json).await {
                error!("Error loading data: {:#}", e);
                eprintln!("Error Loading Data: {:#}", e);
                eprintln!("Please verify your API key is correct and has the necessary permissions.");
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

async fn run_fixtures(
    config: &Config,
    season: Option<i32>,
    leagues: Vec<i64>,
    month: Option<MonthKey>,
    json: bool,
) -> Result<()> {
    let season = season.unwrap_or(config.season);
    let leagues = if leagues.is_empty() {
        Competition::ids()
    } else {
        leagues
    };

    let fetcher = FixtureFetcher::from_config(config);

    if !fetcher.client().check_status().await {
        bail!("Unable to connect to the API. Please check your API key and try again.");
    }

    info!("Fetching {} leagues for the {} season", leagues.len(), season);
    let fixtures = fetcher
        .fetch_fixtures(&leagues, season)
        .await
        .context("Failed to fetch fixtures")?;

    let grouped = group_by_competition(fixtures);
    let theme = Theme::resolve(
        ThemeStore::new(&config.theme.file).load()?,
        config.theme.default,
    );

    let mut board = BoardView::new(&grouped, season, theme);
    if let Some(key) = month {
        board = board.only_month(&key.to_string());
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&board)?);
    } else {
        print!("{}", board.render_text());
    }

    Ok(())
}

fn run_theme(action: ThemeAction) -> Result<()> {
    let config = ThemeConfig::from_env()?;
    let fallback = config.default;

    let store = ThemeStore::new(config.file);
    let theme = match action {
        ThemeAction::Show => Theme::resolve(store.load()?, fallback),
        ThemeAction::Toggle => store.toggle(fallback)?,
        ThemeAction::Dark => {
            store.save(Theme::Dark)?;
            Theme::Dark
        }
        ThemeAction::Light => {
            store.save(Theme::Light)?;
            Theme::Light
        }
    };

    println!("{} ({})", theme, theme.toggle_label());
    Ok(())
}
