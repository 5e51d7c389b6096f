//! filewire Server Binary
//!
//! Listens on a TCP port and serves files out of a directory, one
//! connection at a time.

use clap::Parser;
use filewire::config::{MAX_PORT, MIN_PORT};
use filewire::transfer::Server;
use filewire::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// filewire Server
#[derive(Parser, Debug)]
#[command(name = "filewire-server")]
#[command(about = "Minimal single-connection file server")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(value_parser = clap::value_parser!(u16).range(MIN_PORT as i64..=MAX_PORT as i64))]
    port: u16,

    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,

    /// Directory to serve files from
    #[arg(short, long, default_value = ".")]
    dir: String,

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

    tracing::info!("filewire Server v{}", filewire::VERSION);

    let config = Config::builder()
        .addr(format!("{}:{}", args.bind, args.port))
        .serve_dir(&args.dir)
        .block_size(args.block_size)
        .read_timeout_ms(args.timeout_ms)
        .write_timeout_ms(args.timeout_ms)
        .build();

    let server = Server::new(config);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
