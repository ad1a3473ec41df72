use anyhow::Context;
use bmp_hex::config::{DEFAULT_BMP_OUTPUT, DEFAULT_HEIGHT, DEFAULT_HEX_INPUT, DEFAULT_WIDTH};
use bmp_hex::{decoder, logging, DecodeConfig};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hex-to-bmp")]
#[command(about = "Rebuild a BMP image from one hex byte per line")]
#[command(version)]
pub struct Args {
    /// Hex text file to read
    #[arg(long, env = "HEX_TO_BMP_INPUT", default_value = DEFAULT_HEX_INPUT)]
    pub input: PathBuf,

    /// BMP file to create or overwrite
    #[arg(long, env = "HEX_TO_BMP_OUTPUT", default_value = DEFAULT_BMP_OUTPUT)]
    pub output: PathBuf,

    /// Image width in pixels
    #[arg(
        long,
        env = "HEX_TO_BMP_WIDTH",
        default_value_t = DEFAULT_WIDTH,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub width: u32,

    /// Image height in pixels
    #[arg(
        long,
        env = "HEX_TO_BMP_HEIGHT",
        default_value_t = DEFAULT_HEIGHT,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub height: u32,

    /// Print a JSON conversion report instead of the confirmation line
    #[arg(long)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl From<&Args> for DecodeConfig {
    fn from(args: &Args) -> Self {
        Self {
            input: args.input.clone(),
            output: args.output.clone(),
            width: args.width,
            height: args.height,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level);

    let config = DecodeConfig::from(&args);
    tracing::info!(
        "Decoding {} as {}x{}",
        config.input.display(),
        config.width,
        config.height
    );

    let report = decoder::run(&config)
        .with_context(|| format!("decoding {} failed", config.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Image successfully written to {}", config.output.display());
    }
    Ok(())
}
