// src/main.rs
use clap::Parser;

use rmskubeconfig::utils::logging::{FileLogger, Logger, MultiLogger, StderrLogger};
use rmskubeconfig::{Config, Error};

#[derive(Parser)]
#[command(
    about = "Generate one combined kubeconfig from all RMS-managed clusters"
)]
pub struct Args {
    /// RMS API URL, e.g. https://rms.example.com
    #[arg(short, long)]
    pub url: String,

    /// RMS API token (token-<id>:<secret>)
    #[arg(short, long)]
    pub token: String,

    /// Directory the config file is written to, defaults to the current directory
    #[arg(short, long)]
    pub output: Option<String>,

    /// Only process this cluster ID, skipping the cluster list call
    #[arg(short, long)]
    pub cluster_id: Option<String>,

    #[arg(short, long)]
    pub debug: bool,

    /// Also append log lines to this file
    #[arg(short, long)]
    pub log_file: Option<String>,
}

fn build_logger(args: &Args) -> std::io::Result<Box<dyn Logger>> {
    let stderr = StderrLogger::new(args.debug);
    match &args.log_file {
        Some(path) => {
            let file = FileLogger::new(path, args.debug)?;
            Ok(Box::new(MultiLogger::new(vec![
                Box::new(stderr),
                Box::new(file),
            ])))
        }
        None => Ok(Box::new(stderr)),
    }
}

fn apply_args(config: &mut Config, args: &Args) -> Result<(), Error> {
    config.set_rms_url(&args.url)?;
    config.set_api_token(&args.token)?;
    if let Some(output) = &args.output {
        config.set_output_path(output)?;
    }
    if let Some(cluster_id) = &args.cluster_id {
        config.set_cluster_id(cluster_id)?;
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let logger = match build_logger(&args) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    let mut config = Config::new();
    config.set_logger(logger);

    if let Err(e) = apply_args(&mut config, &args) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = config.run() {
        eprintln!("error generating combined kubeconfig: {}", e);
        std::process::exit(1);
    }
}
