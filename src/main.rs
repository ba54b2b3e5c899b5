use clap::Parser;
use log::{error, info};
use orbit_viewer::app::{run_cli, run_gui};
use orbit_viewer::error::AppError;
use orbit_viewer::io::config::Config;
use std::process::ExitCode;

/// Orbit-camera wireframe viewer for OBJ meshes
#[derive(Parser, Debug)]
#[command(name = "orbit-viewer", version)]
#[command(about = "Orbit-camera wireframe viewer for OBJ meshes")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Render one frame to an image instead of opening a window
    #[arg(long)]
    headless: bool,

    /// OBJ file to show at start-up
    #[arg(short, long, value_name = "FILE")]
    model: Option<String>,

    /// Output image for headless mode
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Directory scanned for .obj models
    #[arg(short, long, value_name = "DIR")]
    resources: Option<String>,
}

impl Cli {
    fn load_config(&self) -> Result<Config, AppError> {
        let mut config = match &self.config {
            Some(path) => {
                info!("Loading config file: {}", path);
                Config::load(path)?
            }
            None => {
                info!("Using default settings");
                Config::default()
            }
        };

        if let Some(model) = &self.model {
            config.model.path = Some(model.clone());
        }
        if let Some(output) = &self.output {
            config.render.output = output.clone();
        }
        if let Some(resources) = &self.resources {
            config.model.resources = resources.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();
    let result = cli.load_config().and_then(|config| {
        if cli.headless {
            run_cli(config)
        } else {
            run_gui(config)
        }
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
