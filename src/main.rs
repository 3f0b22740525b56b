//! IBGE Dashboard CLI
//!
//! Command-line front end for the indicator dashboard:
//! - List cities and indicators
//! - Fetch normalized indicator data
//! - Render charts to the terminal, JSON or HTML
//! - Replay UI events interactively

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ibge_dashboard::chart::{html, terminal, ChartRenderer};
use ibge_dashboard::config::{generate_default_config, Config, LoggingConfig};
use ibge_dashboard::dashboard::{CityLoader, Dashboard, UiEvent};
use ibge_dashboard::fetcher::{City, DataFetcher, DataPoint};
use ibge_dashboard::ibge::{IbgeClient, StatsSource};
use ibge_dashboard::indicators::catalog;

#[derive(Parser)]
#[command(name = "ibge-dashboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "IBGE indicator dashboard for Brazilian municipalities")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the cities of the supported state
    Cities {
        /// State abbreviation (default: configured state)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// List available indicators
    Indicators,

    /// Fetch normalized data for an indicator
    Fetch {
        /// Indicator key (populacao, renda, escolaridade, saneamento, idade)
        indicator: String,
        /// IBGE municipality id; omit for the state aggregate
        #[arg(short, long)]
        city: Option<u32>,
        /// Compare the featured cities instead
        #[arg(long, conflicts_with = "city")]
        ranking: bool,
    },

    /// Render an indicator chart
    Chart {
        /// Indicator key
        indicator: String,
        /// IBGE municipality id; omit to rank the featured cities
        #[arg(short, long)]
        city: Option<u32>,
        /// Write a standalone HTML page here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Read UI events from stdin and print the dashboard after each one
    Interactive,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("ibge_dashboard={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    init_logging(&config.logging);

    let json = cli.format == "json";
    let client = Arc::new(IbgeClient::new(config.ibge.clone()).context("Failed to create HTTP client")?);

    match cli.command {
        Commands::Cities { state } => {
            let loader = CityLoader::new(client, &config.dashboard);
            let state = state.unwrap_or_else(|| config.dashboard.state.clone());
            let options = loader.load(&state).await;

            if json {
                println!("{}", serde_json::to_string_pretty(&options)?);
            } else {
                for option in options.iter().filter(|o| !o.value.is_empty()) {
                    println!("{:>8}  {}", option.value, option.label);
                }
                if options.len() == 1 {
                    println!("{}", options[0].label);
                }
            }
        }

        Commands::Indicators => {
            if json {
                println!("{}", serde_json::to_string_pretty(catalog())?);
            } else {
                println!("{:<14} {:<48} {:<12} {}", "KEY", "NAME", "UNIT", "LEVEL");
                for c in catalog() {
                    let level = if c.state_only { "state only" } else { "municipal" };
                    println!("{:<14} {:<48} {:<12} {}", c.key, c.display_name, c.unit, level);
                }
            }
        }

        Commands::Fetch {
            indicator,
            city,
            ranking,
        } => {
            let fetcher = DataFetcher::new(client.clone(), &config);
            let points = if ranking {
                fetcher.fetch_ranking(&indicator).await
            } else {
                let city = match city {
                    Some(id) => Some(resolve_city(client.as_ref(), &config, id).await),
                    None => None,
                };
                fetcher.fetch_indicator(&indicator, city.as_ref()).await
            };

            if points.is_empty() {
                anyhow::bail!("No data for indicator {}", indicator);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&points)?);
            } else {
                print_points(&points);
            }
        }

        Commands::Chart {
            indicator,
            city,
            output,
        } => {
            let fetcher = DataFetcher::new(client.clone(), &config);
            let points = match city {
                Some(id) => {
                    let city = resolve_city(client.as_ref(), &config, id).await;
                    fetcher.fetch_indicator(&indicator, Some(&city)).await
                }
                None => fetcher.fetch_ranking(&indicator).await,
            };

            let mut renderer = ChartRenderer::new(&config);
            let state = renderer
                .render(points, &indicator)
                .with_context(|| format!("No data for indicator {}", indicator))?;

            if let Some(path) = output {
                std::fs::write(&path, html::page(state)?)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Chart written to {}", path.display());
            } else if json {
                println!("{}", serde_json::to_string_pretty(&state.options)?);
            } else {
                print!("{}", terminal::draw(state, config.chart.terminal_width));
            }
        }

        Commands::Interactive => {
            let mut dashboard = Dashboard::init(client, &config).await;
            print_dashboard(&dashboard, &config, json)?;

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            while let Some(line) = lines.next_line().await? {
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<UiEvent>() {
                    Ok(event) => {
                        dashboard.handle(event).await;
                        print_dashboard(&dashboard, &config, json)?;
                    }
                    Err(e) => eprintln!("{}", e),
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            if let Some(path) = output {
                std::fs::write(&path, &content)
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("Config written to {}", path.display());
            } else {
                print!("{}", content);
            }
        }
    }

    Ok(())
}

/// Look up a city name by id, falling back to a generic label
async fn resolve_city<S: StatsSource>(source: &S, config: &Config, id: u32) -> City {
    match source.municipalities(config.dashboard.state_code).await {
        Ok(list) => {
            if let Some(m) = list.into_iter().find(|m| m.id == id) {
                return City::from(m);
            }
            tracing::warn!("City {} not found in {}", id, config.dashboard.state);
        }
        Err(e) => tracing::warn!("Could not resolve city {}: {}", id, e),
    }
    City::new(id, format!("Município {}", id))
}

fn print_points(points: &[DataPoint]) {
    println!("{:<28} {:>16} {:<12} {}", "LABEL", "VALUE", "UNIT", "SOURCE");
    for p in points {
        let provenance = if p.is_simulated {
            "simulated"
        } else if p.is_state_level {
            "state stand-in"
        } else {
            "ibge"
        };
        println!("{:<28} {:>16.2} {:<12} {}", p.label(), p.value, p.unit, provenance);
    }
}

fn print_dashboard<S: StatsSource>(
    dashboard: &Dashboard<S>,
    config: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let view = dashboard.view();

    if json {
        let snapshot = serde_json::json!({
            "view": view,
            "chart": dashboard.chart(),
        });
        println!("{}", serde_json::to_string(&snapshot)?);
        return Ok(());
    }

    let city = view
        .selected_city
        .as_ref()
        .map(|c| c.name.as_str())
        .unwrap_or("-");
    println!(
        "Estado: {}  Cidade: {}  ({} opções)",
        view.state,
        city,
        view.city_options.len()
    );

    let boxes: Vec<String> = view
        .checkboxes
        .iter()
        .map(|c| format!("[{}] {}", if c.checked { "x" } else { " " }, c.key))
        .collect();
    println!("{}", boxes.join("  "));

    if let Some(alert) = &view.alert {
        println!("ALERTA: {}", alert);
    }
    print!("{}", terminal::draw_canvas(dashboard.canvas(), config.chart.terminal_width));
    println!();
    Ok(())
}
