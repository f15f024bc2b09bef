use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::path::{Path, PathBuf};
use torus_snake::game::GameConfig;
use torus_snake::modes::HumanMode;

#[derive(Parser)]
#[command(name = "torus-snake")]
#[command(version, about = "Snake on a wrap-around grid")]
struct Cli {
    /// JSON file with game options (gridWidth, frameInterval, snakeColor, ...)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid width
    #[arg(long)]
    width: Option<usize>,

    /// Grid height
    #[arg(long)]
    height: Option<usize>,

    /// Tick period in milliseconds
    #[arg(long)]
    interval: Option<u64>,

    /// Blocked moves the snake survives before dying
    #[arg(long)]
    tolerance: Option<u32>,

    /// Seed for reproducible candy placement
    #[arg(long)]
    seed: Option<u64>,

    /// Write logs to this file (the terminal belongs to the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Defaults, then the config file, then command-line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        if let Some(interval) = self.interval {
            config.frame_interval = interval;
        }
        if let Some(tolerance) = self.tolerance {
            config.collision_tolerance = tolerance;
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let config = cli.game_config()?;
    log::info!(
        "starting {}x{} game, {} ms per frame",
        config.grid_width,
        config.grid_height,
        config.frame_interval
    );

    let mut human_mode = HumanMode::new(config, cli.seed)?;
    human_mode.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = Cli::parse_from(["torus-snake", "--width", "12", "--interval", "150"]);
        let config = cli.game_config().unwrap();
        assert_eq!(config.grid_width, 12);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.frame_interval, 150);
        assert_eq!(config.collision_tolerance, 2);
    }

    #[test]
    fn test_cli_rejects_zero_interval() {
        let cli = Cli::parse_from(["torus-snake", "--interval", "0"]);
        assert!(cli.game_config().is_err());
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{"gridWidth": 40, "gridHeight": 8}"#).unwrap();

        let cli = Cli::parse_from([
            "torus-snake",
            "--config",
            path.to_str().unwrap(),
            "--height",
            "9",
        ]);
        let config = cli.game_config().unwrap();
        assert_eq!((config.grid_width, config.grid_height), (40, 9));
    }
}
