//! http-wire-codec CLI
//!
//! Decodes raw HTTP messages into axios-shape JSON and encodes axios-shape
//! JSON back into raw messages.
//!
//! ```text
//! http-wire-codec decode-request req.http      → JSON on stdout
//! http-wire-codec encode-response res.json     → raw bytes on stdout
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_wire_codec::config::load_config;
use http_wire_codec::{
    CodecConfig, ConverterOptions, HttpConverter, StructuredRequest, StructuredResponse,
};

#[derive(Parser)]
#[command(name = "http-wire-codec")]
#[command(about = "Convert HTTP/1.x messages to and from structured JSON", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Keep header names as written
    #[arg(long)]
    preserve_header_case: bool,

    /// Reject bodies larger than this many bytes
    #[arg(long)]
    max_body_size: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Raw request message → JSON
    DecodeRequest { file: PathBuf },
    /// Raw response message → JSON
    DecodeResponse { file: PathBuf },
    /// JSON request → raw message
    EncodeRequest { file: PathBuf },
    /// JSON response → raw message
    EncodeResponse { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_wire_codec=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => CodecConfig::default(),
    };
    if cli.preserve_header_case {
        config.preserve_header_case = true;
    }
    if cli.max_body_size.is_some() {
        config.max_body_size = cli.max_body_size;
    }

    tracing::debug!(
        max_body_size = ?config.max_body_size,
        preserve_header_case = config.preserve_header_case,
        "Configuration loaded"
    );

    let converter = HttpConverter::new(ConverterOptions::from(config));

    match cli.command {
        Commands::DecodeRequest { file } => {
            let input = tokio::fs::read(&file).await?;
            let request = converter.decode_request(&input)?;
            println!("{}", serde_json::to_string_pretty(&request)?);
        }
        Commands::DecodeResponse { file } => {
            let input = tokio::fs::read(&file).await?;
            let response = converter.decode_response(&input)?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::EncodeRequest { file } => {
            let input = tokio::fs::read(&file).await?;
            let request: StructuredRequest = serde_json::from_slice(&input)?;
            write_stdout(&converter.encode_request(&request).await?)?;
        }
        Commands::EncodeResponse { file } => {
            let input = tokio::fs::read(&file).await?;
            let response: StructuredResponse = serde_json::from_slice(&input)?;
            write_stdout(&converter.encode_response(&response).await?)?;
        }
    }

    Ok(())
}

fn write_stdout(bytes: &[u8]) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(bytes)?;
    stdout.flush()
}
