use anyhow::Context;
use bmp_hex::config::DEFAULT_HEX_OUTPUT;
use bmp_hex::{encoder, logging, EncodeConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bmp-to-hex")]
#[command(about = "Write the pixels of a BMP image as one hex byte per line")]
#[command(version)]
pub struct Args {
    /// Image base name; `.bmp` is appended to find the file
    pub name: String,

    /// Hex text file to create or overwrite
    #[arg(long, default_value = DEFAULT_HEX_OUTPUT)]
    pub output: PathBuf,

    /// Print a JSON conversion report instead of the confirmation line
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for EncodeConfig {
    fn from(args: &Args) -> Self {
        EncodeConfig::from_base_name(&args.name, args.output.clone())
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let config = EncodeConfig::from(&args);
    tracing::info!(
        "Encoding {} to {}",
        config.input.display(),
        config.output.display()
    );

    let report = encoder::run(&config)
        .with_context(|| format!("encoding {} failed", config.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Text file write done");
    }
    Ok(())
}
