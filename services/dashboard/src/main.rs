//! Indicator dashboard CLI.
//!
//! Prints the data behind each dashboard view as JSON.

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use dashboard::indicators::{self, selectable_years};
use dashboard::{DashboardConfig, DashboardState};
use ogc_common::LayerId;

#[derive(Parser, Debug)]
#[command(name = "dashboard")]
#[command(about = "Indicator dashboard data from a GeoServer WFS/WMS backend")]
struct Cli {
    #[command(flatten)]
    config: DashboardConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List known indicators and selectable years
    Indicators,

    /// Print the WFS GetFeature URL for a layer
    FeatureUrl {
        /// Layer name, e.g. geonode:fiscal_balance_layer
        #[arg(short, long)]
        layer: String,
    },

    /// Print the WMS GetMap tile template URL for a layer
    TileUrl {
        #[arg(short, long)]
        layer: String,

        /// CQL filter expression, e.g. "data_year = '1990'"
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Distinct years available for an indicator
    Years {
        #[arg(short, long, default_value = "fiscal_balance")]
        indicator: String,
    },

    /// Country ranking for one year
    Ranking {
        #[arg(short, long, default_value = "fiscal_balance")]
        indicator: String,

        #[arg(short, long)]
        year: i32,
    },

    /// Time series of one country
    Country {
        #[arg(short, long, default_value = "fiscal_balance")]
        indicator: String,

        /// ISO 3166-1 alpha-3 code; omit for the empty "no selection" series
        #[arg(short, long)]
        country: Option<String>,
    },

    /// Raster map source for one year
    Map {
        #[arg(short, long, default_value = "fiscal_balance")]
        indicator: String,

        #[arg(short, long)]
        year: i32,
    },
}

#[derive(Serialize)]
struct Catalogue {
    indicators: &'static [indicators::Indicator],
    years: Vec<i32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.config.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(geoserver = %cli.config.geoserver_location, "Starting dashboard");

    let state = DashboardState::from_config(&cli.config)?;

    match cli.command {
        Commands::Indicators => print_json(&Catalogue {
            indicators: indicators::INDICATORS,
            years: selectable_years().collect(),
        }),
        Commands::FeatureUrl { layer } => {
            print_json(&state.feature_url(&LayerId::parse(layer)?)?)
        }
        Commands::TileUrl { layer, filter } => {
            print_json(&state.tile_template(&LayerId::parse(layer)?, filter.as_deref())?)
        }
        Commands::Years { indicator } => {
            print_json(&state.years(indicators::find(&indicator)?).await?)
        }
        Commands::Ranking { indicator, year } => {
            print_json(&state.ranking(indicators::find(&indicator)?, year).await?)
        }
        Commands::Country { indicator, country } => print_json(
            &state
                .country(indicators::find(&indicator)?, country.as_deref())
                .await?,
        ),
        Commands::Map { indicator, year } => {
            print_json(&state.map(indicators::find(&indicator)?, year)?)
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
