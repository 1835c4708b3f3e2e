use clap::{ArgAction, Parser, Subcommand};
use ifcat::commands::{aliases, scan, show};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "ifcat",
    version,
    about = "Catalog exported Go interfaces and their flattened method sets"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a source tree and write the interface catalog as JSON
    Scan(scan::ScanArgs),
    /// List the filter aliases usable with --exclude and --only
    Aliases(aliases::AliasesArgs),
    /// Print the interfaces declared in one file, bases unflattened
    Show(show::ShowArgs),
}

/// Reset SIGPIPE to default behavior so piping to `head` etc. doesn't panic.
#[cfg(unix)]
fn reset_sigpipe() {
    // SAFETY: restores the default disposition of one signal; no memory is touched.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

#[cfg(not(unix))]
fn reset_sigpipe() {}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Scan(args) => scan::run(&args).map(|_| ()),
        Command::Aliases(args) => aliases::run(&args),
        Command::Show(args) => show::run(&args),
    }
}

fn main() {
    reset_sigpipe();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
