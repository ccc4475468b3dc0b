//! `aquamon` -- command-line front end for the water-quality client.
//!
//! `aquamon analyze --ph 7.2 --turbidity 1.5 ...` submits a sample and loads
//! the alert feed at the same time; `aquamon alerts` only loads the feed.
//!
//! # Environment variables
//!
//! | Variable                 | Default                              |
//! |--------------------------|--------------------------------------|
//! | `PREDICTION_SERVICE_URL` | `http://localhost:5001/api/analyze`  |
//! | `ALERT_SERVICE_URL`      | `http://localhost:5001/api/alerts`   |
//! | `REQUEST_TIMEOUT_SECS`   | `30`                                 |
//! | `AQUAMON_LOG_LEVEL`      | `info`                               |
//! | `AQUAMON_LOG_FILE`       | unset                                |

use std::path::PathBuf;
use std::thread;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use aquamon_client::config::Config;
use aquamon_client::ingest::ServiceClient;
use aquamon_client::input::RawSample;
use aquamon_client::logging;
use aquamon_client::render::RenderInstruction;
use aquamon_client::workflow::{AlertFeedWorkflow, SubmissionWorkflow};

#[derive(Debug, Parser)]
#[command(name = "aquamon", version, about = "Water-quality analysis client")]
struct Cli {
    /// TOML config file (defaults to ./aquamon.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the prediction service URL
    #[arg(long, global = true)]
    prediction_url: Option<String>,

    /// Override the alert feed URL
    #[arg(long, global = true)]
    alerts_url: Option<String>,

    /// Print render instructions as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Submit a water sample for analysis and show active alerts
    Analyze(SampleArgs),
    /// Show active alerts only
    Alerts,
}

#[derive(Debug, Args)]
struct SampleArgs {
    #[arg(long, allow_hyphen_values = true)]
    ph: String,
    /// Turbidity in NTU
    #[arg(long, allow_hyphen_values = true)]
    turbidity: String,
    /// Dissolved oxygen in mg/L
    #[arg(long, allow_hyphen_values = true)]
    dissolved_oxygen: String,
    /// Conductivity in μS/cm (integer)
    #[arg(long, allow_hyphen_values = true)]
    conductivity: String,
    /// Temperature in °C
    #[arg(long, allow_hyphen_values = true)]
    temperature: String,
    /// Chlorine in mg/L
    #[arg(long, allow_hyphen_values = true)]
    chlorine: String,
    /// Nitrate in mg/L
    #[arg(long, allow_hyphen_values = true)]
    nitrate: String,
}

impl From<SampleArgs> for RawSample {
    fn from(a: SampleArgs) -> Self {
        RawSample {
            ph: a.ph,
            turbidity: a.turbidity,
            dissolved_oxygen: a.dissolved_oxygen,
            conductivity: a.conductivity,
            temperature: a.temperature,
            chlorine: a.chlorine,
            nitrate: a.nitrate,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("loading configuration")?;
    if let Some(url) = cli.prediction_url {
        config.prediction_service_url = url;
    }
    if let Some(url) = cli.alerts_url {
        config.alert_service_url = url;
    }

    logging::init_logger(&config.log_level, config.log_file.as_deref(), config.log_file.is_some())
        .context("initializing logging")?;
    tracing::debug!(
        prediction = %config.prediction_service_url,
        alerts = %config.alert_service_url,
        timeout_secs = config.request_timeout_secs,
        "configuration resolved"
    );

    let client = ServiceClient::new(&config).context("building HTTP client")?;
    let alerts = AlertFeedWorkflow::new(&client);

    match cli.command {
        Command::Alerts => emit(&alerts.load(), cli.json)?,
        Command::Analyze(args) => {
            let raw = RawSample::from(args);
            let submission = SubmissionWorkflow::new(&client);

            // Both calls are independent; run them side by side.
            let (analysis, alert_view) = thread::scope(|s| {
                let alert_handle = s.spawn(|| alerts.load());
                let analysis = submission.submit(&raw);
                (analysis, alert_handle.join())
            });

            if let Some(analysis) = analysis {
                emit(&analysis, cli.json)?;
            }
            match alert_view {
                Ok(view) => emit(&view, cli.json)?,
                Err(_) => anyhow::bail!("alert loading thread panicked"),
            }
        }
    }
    Ok(())
}

fn emit(instruction: &RenderInstruction, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(instruction)?);
    } else {
        println!("{}", instruction);
    }
    Ok(())
}
