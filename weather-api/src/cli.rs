use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use inquire::{CustomType, Text};
use std::path::{Path, PathBuf};
use weather_model::{Config, FeatureRecord, LocalPredictor, Predictor, RemotePredictor};

use crate::{server, state::AppState};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-api", version, about = "Basel temperature prediction service")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the model and serve predictions over HTTP.
    Serve(ServeArgs),

    /// Predict a single temperature from the terminal.
    Predict {
        #[command(flatten)]
        features: FeatureArgs,

        /// Model artifact to load instead of the configured one.
        #[arg(long, conflicts_with = "server")]
        model: Option<PathBuf>,

        /// Base URL of a running service, e.g. "http://localhost:8000".
        #[arg(long)]
        server: Option<String>,
    },

    /// Interactively write the config file.
    Configure,
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Model artifact path.
    #[arg(long)]
    pub model: Option<PathBuf>,

    /// Directory served under `/static`.
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    fn apply(self, cfg: &mut Config) {
        if let Some(host) = self.host {
            cfg.server.host = host;
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(model) = self.model {
            cfg.model.path = model;
        }
        if let Some(static_dir) = self.static_dir {
            cfg.assets.static_dir = static_dir;
        }
    }
}

#[derive(Debug, Args)]
pub struct FeatureArgs {
    /// Mean temperature one day ago (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub lag1: f64,

    /// Mean temperature three days ago (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub lag3: f64,

    /// Mean temperature seven days ago (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub lag7: f64,

    /// Trailing 7-day mean temperature (°C).
    #[arg(long, allow_negative_numbers = true)]
    pub roll7: f64,

    #[arg(long, required_unless_present = "date", conflicts_with = "date")]
    pub month: Option<i64>,

    #[arg(long, required_unless_present = "date", conflicts_with = "date")]
    pub dayofyear: Option<i64>,

    /// Date being predicted (YYYY-MM-DD); fills month and day of year.
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl FeatureArgs {
    pub fn to_record(&self) -> Result<FeatureRecord> {
        if let Some(date) = self.date {
            return Ok(FeatureRecord::for_date(self.lag1, self.lag3, self.lag7, self.roll7, date));
        }

        let (Some(month), Some(dayofyear)) = (self.month, self.dayofyear) else {
            return Err(anyhow!("Either --date or both --month and --dayofyear are required"));
        };

        Ok(FeatureRecord {
            lag1: self.lag1,
            lag3: self.lag3,
            lag7: self.lag7,
            roll7: self.roll7,
            month,
            dayofyear,
        })
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut cfg = load_config(self.config.as_deref())?;

        match self.command {
            Command::Serve(args) => {
                args.apply(&mut cfg);

                let predictor = LocalPredictor::load(&cfg.model.path)?;
                let artifact = predictor.artifact();
                tracing::info!(
                    model = artifact.name(),
                    kind = %artifact.kind(),
                    path = %cfg.model.path.display(),
                    "Model loaded"
                );

                server::serve(&cfg.bind_addr(), &cfg.assets.static_dir, AppState::new(predictor))
                    .await?;
            }
            Command::Predict { features, model, server } => {
                let record = features.to_record()?;

                let predictor: Box<dyn Predictor> = match server {
                    Some(url) => Box::new(RemotePredictor::new(url)),
                    None => {
                        let path = model.unwrap_or(cfg.model.path);
                        Box::new(LocalPredictor::load(&path)?)
                    }
                };

                let value = predictor
                    .predict(&record)
                    .await
                    .with_context(|| format!("Prediction failed using {}", predictor.describe()))?;

                println!("Predicted temperature: {value:.2} °C");
                println!("Source: {}", predictor.describe());
            }
            Command::Configure => {
                configure(&mut cfg)?;

                let path = match &self.config {
                    Some(path) => {
                        cfg.save_to(path)?;
                        path.clone()
                    }
                    None => cfg.save()?,
                };
                println!("Configuration saved to {}", path.display());
            }
        }

        Ok(())
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

fn configure(cfg: &mut Config) -> Result<()> {
    let current_host = cfg.server.host.clone();
    cfg.server.host = Text::new("Listen host:")
        .with_default(&current_host)
        .prompt()
        .context("Failed to read host")?;

    cfg.server.port = CustomType::<u16>::new("Listen port:")
        .with_default(cfg.server.port)
        .with_error_message("Please enter a port number between 0 and 65535")
        .prompt()
        .context("Failed to read port")?;

    let current_model = cfg.model.path.display().to_string();
    cfg.model.path = Text::new("Model artifact path:")
        .with_default(&current_model)
        .prompt()
        .context("Failed to read model path")?
        .into();

    let current_static = cfg.assets.static_dir.display().to_string();
    cfg.assets.static_dir = Text::new("Static files directory:")
        .with_default(&current_static)
        .prompt()
        .context("Failed to read static directory")?
        .into();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("weather-api").chain(args.iter().copied()))
    }

    #[test]
    fn predict_accepts_explicit_calendar_fields() {
        let cli = parse(&[
            "predict", "--lag1", "-2.5", "--lag3", "-1", "--lag7", "0.5", "--roll7", "-0.8",
            "--month", "1", "--dayofyear", "15",
        ])
        .unwrap();

        let Command::Predict { features, model, server } = cli.command else {
            panic!("expected predict");
        };
        assert!(model.is_none());
        assert!(server.is_none());

        let record = features.to_record().unwrap();
        assert_eq!(record.to_row(), [-2.5, -1.0, 0.5, -0.8, 1.0, 15.0]);
    }

    #[test]
    fn predict_derives_calendar_fields_from_date() {
        let cli = parse(&[
            "predict", "--lag1", "20", "--lag3", "21", "--lag7", "19", "--roll7", "20",
            "--date", "2023-07-14",
        ])
        .unwrap();

        let Command::Predict { features, .. } = cli.command else {
            panic!("expected predict");
        };
        let record = features.to_record().unwrap();
        assert_eq!(record.month, 7);
        assert_eq!(record.dayofyear, 195);
    }

    #[test]
    fn predict_requires_calendar_input() {
        let err = parse(&["predict", "--lag1", "1", "--lag3", "1", "--lag7", "1", "--roll7", "1"])
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn predict_rejects_date_with_month() {
        let err = parse(&[
            "predict", "--lag1", "1", "--lag3", "1", "--lag7", "1", "--roll7", "1", "--month",
            "1", "--dayofyear", "1", "--date", "2024-01-01",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn serve_flags_override_config() {
        let cli = parse(&["--verbose", "serve", "--port", "9000", "--model", "m.json"]).unwrap();
        assert!(cli.verbose);

        let Command::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        let mut cfg = Config::default();
        args.apply(&mut cfg);

        assert_eq!(cfg.bind_addr(), "0.0.0.0:9000");
        assert_eq!(cfg.model.path, PathBuf::from("m.json"));
        assert_eq!(cfg.assets.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn explicit_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weather.toml");
        std::fs::write(&path, "[model]\npath = \"/srv/basel.json\"\n").unwrap();

        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg.model.path, PathBuf::from("/srv/basel.json"));
        assert!(load_config(Some(&dir.path().join("missing.toml"))).is_err());
    }

    #[tokio::test]
    async fn serve_fails_fast_without_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_path = dir.path().join("weather.toml");
        let missing = dir.path().join("missing.json");
        std::fs::write(
            &cfg_path,
            format!("[model]\npath = {:?}\n[server]\nport = 0\n", missing.display().to_string()),
        )
        .unwrap();

        let cli = parse(&["--config", cfg_path.to_str().unwrap(), "serve"]).unwrap();
        let err = cli.run().await.unwrap_err();
        assert!(format!("{err:#}").contains("Failed to load model"));
    }
}
