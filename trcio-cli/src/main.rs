mod cli;
mod error;

use clap::Parser;
use cli::Cli;
use error::exit_with_error;

fn init_tracing(cli: &Cli) {
    // CLI tracing policy:
    //   --quiet   → always "off"
    //   --verbose → "info", honouring RUST_LOG when set
    //   default   → "off" (clean terminal; use --verbose to see logs)
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    let summary = trcio_enrich::run(&cli.input, &cli.output, &cli.geometry)?;

    if !cli.quiet {
        if summary.traces < summary.declared {
            println!(
                "{} of {} declared traces processed (input truncated)",
                summary.traces, summary.declared
            );
        } else {
            println!("{} traces processed", summary.traces);
        }
    }
    Ok(())
}
