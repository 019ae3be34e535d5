/// SLP length-desync probe: send a fixed series of malformed and
/// well-formed SLPv2 requests to a responder and watch what it does.
///
/// # Command overview
///
/// ```text
/// slp-probe <COMMAND> [OPTIONS]
///
/// Commands:
///   run      Send every case to the target, pausing between cases
///   list     Print the case catalog
///   dump     Hex-dump encoded cases with the reference parser's verdict
///   help     Print help information
///
/// Global options:
///   -v, --verbose    Log each send (sets the default log level to debug)
///   -h, --help       Print help
///   -V, --version    Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                                    |
/// |------|------------------------------------------------------------|
/// | 0    | Catalog exhausted (individual send failures included)      |
/// | 1    | Setup error (bad target, socket, malformed catalog entry)  |
///
/// Case announcements go to stdout; logs and errors go to stderr.
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd_dump;
mod cmd_list;
mod cmd_run;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// Probe an SLP responder with length-field boundary cases.
#[derive(Parser)]
#[command(name = "slp-probe", version, about = "SLP length-desync probe")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log each send and socket event.
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Send every case to the target, in order, pausing between cases.
    Run(RunArgs),
    /// Print the case catalog without sending anything.
    List,
    /// Hex-dump encoded cases and show how a strict parser classifies them.
    Dump(DumpArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `slp-probe run`.
///
/// The target port is always 427.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Target host name or address.
    #[arg(long, env = "ADDRESS", default_value = slp_harness::config::DEFAULT_HOST)]
    pub host: String,
}

/// Arguments for `slp-probe dump`.
///
/// ```text
/// ┌─────────────┬──────────────────────────────────────────────────┐
/// │ Flag        │ Effect                                           │
/// ├─────────────┼──────────────────────────────────────────────────┤
/// │ --case N    │ Dump only the case at one-based index N          │
/// │ --limit B   │ Show at most B bytes per case (default 64)       │
/// └─────────────┴──────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct DumpArgs {
    /// Dump only this case (one-based, as printed by `list`).
    #[arg(long)]
    pub case: Option<usize>,

    /// Maximum bytes shown per case; the rest is summarised.
    #[arg(long, default_value_t = 64)]
    pub limit: usize,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => cmd_run::run(&args),
        Commands::List => cmd_list::run(),
        Commands::Dump(args) => cmd_dump::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
