//! vlqmap CLI - decode and benchmark source-map `mappings`.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use vlqmap_core::DelegateKind;
use vlqmap_executor::factory::DecoderKind;
use vlqmap_executor::observability::{LogFormat, TracingConfig, init_tracing};

/// vlqmap - Base64-VLQ source-map decoding with interchangeable backends.
#[derive(Parser)]
#[command(name = "vlqmap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log output format (json, pretty, compact); overrides VLQMAP_LOG_FORMAT
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Time repeated decodes of a source map's mappings
    Bench {
        /// Decoder backend (structured, linear-memory)
        #[arg(short, long, default_value = "structured")]
        decoder: DecoderKind,

        /// Result delegate (count, mapping)
        #[arg(short = 'g', long, default_value = "count")]
        delegate: DelegateKind,

        /// Number of timed decodes
        #[arg(short, long, default_value = "100")]
        iterations: usize,

        /// Path to the source map
        #[arg(short, long)]
        source_map: PathBuf,

        /// WebAssembly module for the linear-memory decoder (built-in if omitted)
        #[arg(short, long)]
        module: Option<PathBuf>,

        /// Line count the warm-up decode must produce
        #[arg(short, long, default_value = "379201")]
        expected_lines: usize,

        /// Pause between timed decodes, in milliseconds
        #[arg(long, default_value = "10")]
        delay_ms: u64,

        /// Print a JSON summary after the samples
        #[arg(long)]
        summary: bool,
    },

    /// Decode a source map once and print statistics
    Decode {
        /// Path to the source map
        path: PathBuf,

        /// Decoder backend (structured, linear-memory)
        #[arg(short, long, default_value = "structured")]
        decoder: DecoderKind,

        /// WebAssembly module for the linear-memory decoder (built-in if omitted)
        #[arg(short, long)]
        module: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn logging_config(verbosity: u8, log_format: Option<LogFormat>) -> TracingConfig {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // An explicit filter in the environment wins over -v
    let config = TracingConfig::from_env();
    let explicit = std::env::var_os("VLQMAP_LOG_LEVEL").is_some()
        || std::env::var_os("RUST_LOG").is_some();
    let config = if explicit {
        config
    } else {
        config.with_log_filter(filter)
    };

    match log_format {
        Some(format) => config.with_log_format(format),
        None => config,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _tracing_guard = init_tracing(logging_config(cli.verbose, cli.log_format))?;

    match cli.command {
        Commands::Bench {
            decoder,
            delegate,
            iterations,
            source_map,
            module,
            expected_lines,
            delay_ms,
            summary,
        } => {
            let mut options = commands::bench::BenchOptions::new(source_map);
            options.decoder = decoder;
            options.delegate = delegate;
            options.iterations = iterations;
            options.module = module;
            options.expected_lines = expected_lines;
            options.delay_ms = delay_ms;
            options.summary = summary;
            commands::bench::run(options).await
        }
        Commands::Decode {
            path,
            decoder,
            module,
        } => commands::decode::run(&path, decoder, module.as_deref()).await,
        Commands::Version => commands::version::run(),
    }
}
