use std::path::{Path, PathBuf};

use airaware::api::AppState;
use airaware::dashboard::{Dashboard, DashboardForm, DashboardPage, DashboardState, Simulation};
use airaware::{AirAwareConfig, AirAwareError, logging, web};
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};
use tracing::info;

/// AQI, weather and health precautions for an area of a city
#[derive(Parser, Debug)]
#[command(name = "airaware", version, about)]
struct Cli {
    /// Path to a TOML config file (defaults to ~/.config/airaware/config.toml, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the web dashboard
    Serve {
        /// Overrides server.port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run one render in the terminal
    Report {
        #[arg(long)]
        city: String,
        #[arg(long)]
        area: String,
        #[arg(long)]
        disease: String,
        /// Directory the five SVG charts are written to
        #[arg(long, default_value = "charts")]
        out_dir: PathBuf,
        /// Seed for the simulated series (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config =
        AirAwareConfig::load_from_path(cli.config).context("Failed to load configuration")?;
    logging::init(&config.logging, cli.verbose)?;

    let dashboard = Dashboard::from_config(&config)?;

    match cli.command.unwrap_or(Command::Serve { port: None }) {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            web::run(&config.server, AppState::new(dashboard)).await
        }
        Command::Report {
            city,
            area,
            disease,
            out_dir,
            seed,
        } => report(&dashboard, DashboardForm::new(city, area, disease), &out_dir, seed).await,
    }
}

async fn report(
    dashboard: &Dashboard,
    form: DashboardForm,
    out_dir: &Path,
    seed: Option<u64>,
) -> Result<()> {
    let DashboardState::Rendering(submission) = form.state() else {
        return Err(AirAwareError::validation("city, area and disease must not be blank").into());
    };

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!("Rendering report with seed {}", seed);
    let simulation = Simulation::generate(
        &mut StdRng::seed_from_u64(seed),
        Local::now().date_naive(),
    );

    let page = dashboard.render(submission, simulation).await?;
    let query = &page.submission.query;
    println!(
        "Air Aware report for {}, {} ({})",
        query.area, query.city, page.submission.disease
    );
    write_charts(&page, out_dir)?;

    for line in page.report.lines() {
        println!("{line}");
    }
    Ok(())
}

fn write_charts(page: &DashboardPage, out_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    for chart in &page.charts {
        let path = out_dir.join(chart.kind.file_name());
        std::fs::write(&path, &chart.svg)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("{}: {}", chart.kind.caption(), path.display());
    }
    Ok(())
}
