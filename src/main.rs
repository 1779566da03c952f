// src/main.rs
//! aprs-latlong - encode and decode APRS / NMEA coordinate fields

use anyhow::Context;
use aprs_latlong::{
    config::CodecConfig,
    diagnostic::{DiagnosticSink, NoOpSink, TracingSink},
    latitude_from_nmea, longitude_from_nmea,
    monitor::{FeedSource, PositionMonitor},
    PositionReport,
};
use clap::{Parser, Subcommand};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "aprs-latlong", version, about)]
struct Cli {
    /// Config file (defaults to the per-user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encode decimal degrees into APRS and NMEA fields
    Encode {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
        /// Digits to blank in APRS output (0-4)
        #[arg(short, long)]
        ambiguity: Option<u8>,
    },
    /// Decode NMEA latitude/longitude fields into decimal degrees
    Decode {
        /// Latitude field, ddmm.mmmm
        #[arg(long)]
        lat: String,
        /// Latitude hemisphere, N or S
        #[arg(long, default_value = "")]
        ns: String,
        /// Longitude field, dddmm.mmmm
        #[arg(long)]
        lon: String,
        /// Longitude hemisphere, E or W
        #[arg(long, default_value = "")]
        ew: String,
    },
    /// Encode every fix read from a GPS receiver, file or stdin
    Watch {
        /// Serial port of the receiver
        #[arg(short, long, conflicts_with = "input")]
        port: Option<String>,
        #[arg(short, long)]
        baud: Option<u32>,
        /// File of NMEA sentences, '-' for stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[arg(short, long)]
        ambiguity: Option<u8>,
    },
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level '{}'", level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    Ok(())
}

fn print_report(report: &PositionReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}\n", report);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // An explicit --config must load; the per-user file falls back to defaults
    let (mut config, ignored) = match &cli.config {
        Some(path) => (CodecConfig::load_from(path)?, None),
        None => CodecConfig::load_or_default(),
    };
    if cli.json {
        config.output = "json".to_string();
    }

    init_tracing(&config.log_level)?;
    if let Some(e) = ignored {
        tracing::warn!("Ignoring config file, using defaults: {}", e);
    }

    let sink: Arc<dyn DiagnosticSink> = if config.report_diagnostics {
        Arc::new(TracingSink)
    } else {
        Arc::new(NoOpSink)
    };

    match cli.command {
        Command::Encode { lat, lon, ambiguity } => {
            if let Some(level) = ambiguity {
                config.update_ambiguity(level);
            }
            let report = PositionReport::new(Some(lat), Some(lon), config.ambiguity);
            for diagnostic in &report.diagnostics {
                sink.report(diagnostic);
            }
            print_report(&report, config.wants_json())?;
        }
        Command::Decode { lat, ns, lon, ew } => {
            let latitude = latitude_from_nmea(&lat, &ns).report(sink.as_ref());
            let longitude = longitude_from_nmea(&lon, &ew).report(sink.as_ref());

            if config.wants_json() {
                let value = serde_json::json!({ "latitude": latitude, "longitude": longitude });
                println!("{}", value);
            } else {
                let show = |c: Option<f64>| c.map_or("unknown".to_string(), |v| format!("{:.6}", v));
                println!("{} {}", show(latitude), show(longitude));
            }
        }
        Command::Watch {
            port,
            baud,
            input,
            ambiguity,
        } => {
            if let Some(level) = ambiguity {
                config.update_ambiguity(level);
            }
            if let Some(port) = port {
                let baud = baud.or(config.serial_baudrate).unwrap_or(4800);
                config.update_serial(port, baud);
            }

            let source = match (input, &config.serial_port) {
                (Some(path), _) if path.as_os_str() == "-" => FeedSource::Stdin,
                (Some(path), _) => FeedSource::File(path),
                (None, Some(port)) => FeedSource::Serial {
                    port: port.clone(),
                    baudrate: config.serial_baudrate.unwrap_or(4800),
                },
                (None, None) => FeedSource::Stdin,
            };

            let monitor = PositionMonitor::with_sink(config.ambiguity, sink);
            let shutdown = monitor.shutdown_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("Interrupted, stopping");
                    shutdown.cancel();
                }
            });

            let json = config.wants_json();
            let mut failed = None;
            let produced = monitor
                .run(source, |report| {
                    if failed.is_none() {
                        failed = print_report(report, json).err();
                    }
                })
                .await?;
            if let Some(e) = failed {
                return Err(e);
            }
            tracing::info!(produced, "Done");

            // tokio's stdin reads on a blocking thread that would keep the
            // runtime alive after an interrupt
            if monitor.shutdown_token().is_cancelled() {
                std::process::exit(130);
            }
        }
    }

    Ok(())
}
