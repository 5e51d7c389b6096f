//! filewire Client Binary
//!
//! Requests one file from a server and writes it locally.

use std::path::PathBuf;

use clap::Parser;
use filewire::config::{MAX_PORT, MIN_PORT};
use filewire::protocol::Status;
use filewire::transfer::fetch;
use filewire::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// filewire Client
#[derive(Parser, Debug)]
#[command(name = "filewire-client")]
#[command(about = "Fetch a single file from a filewire server")]
#[command(version)]
struct Args {
    /// Server address or hostname
    address: String,

    /// Server port
    #[arg(value_parser = clap::value_parser!(u16).range(MIN_PORT as i64..=MAX_PORT as i64))]
    port: u16,

    /// Name of the file to request
    file_name: String,

    /// Destination path (defaults to "new_<file_name>" in the current directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Transfer block size in bytes
    #[arg(short = 'B', long, default_value = "4096")]
    block_size: usize,

    /// Socket timeout in milliseconds
    #[arg(short, long, default_value = "1000")]
    timeout_ms: u64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filewire=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let dest = args.output.clone().unwrap_or_else(|| {
        let base = PathBuf::from(&args.file_name);
        let name = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.file_name.clone());
        PathBuf::from(format!("new_{}", name))
    });

    let config = Config::builder()
        .addr(format!("{}:{}", args.address, args.port))
        .block_size(args.block_size)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    match fetch(&config, &args.file_name, &dest) {
        Ok(outcome) if outcome.status == Status::Found => {
            println!(
                "Received \"{}\" from server, {} bytes written to {}",
                args.file_name,
                outcome.bytes_received,
                dest.display()
            );
        }
        Ok(_) => {
            eprintln!(
                "The file \"{}\" does not exist on the server; 0 bytes transferred",
                args.file_name
            );
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Transfer failed: {}", e);
            std::process::exit(1);
        }
    }
}
