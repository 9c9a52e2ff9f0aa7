//! hostwatch - host resource monitor
//!
//! A command-line front end for classifying activity snapshots and replaying
//! recorded sessions through the notification pipeline.

use clap::Parser;
use hostwatch::alerts::PermissionState;
use hostwatch::cli::args::{generate_completions, Cli, Commands};
use hostwatch::cli::init_logging;
use hostwatch::commands::{run_replay, run_respond, run_status};
use hostwatch::config::{Config, ConfigBuilder};
use hostwatch::error::AppError;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Run the appropriate command
    let result = run(&cli);

    if let Err(e) = result {
        log::error!("{}", e);
        print_error(&e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), AppError> {
    if let Commands::Completions { shell } = &cli.command {
        generate_completions(*shell);
        return Ok(());
    }

    // Logging follows the merged verbose setting (CLI flag or config file)
    let config = build_config(cli)?;
    init_logging(config.general.verbose);
    log::debug!("Effective configuration: {:?}", config);

    match &cli.command {
        Commands::Status(args) => run_status(args, cli.format),

        Commands::Replay(args) => run_replay(args, &config, cli.format),

        Commands::Respond(args) => run_respond(args, &config, cli.format),

        Commands::Completions { .. } => Ok(()),
    }
}

fn build_config(cli: &Cli) -> Result<Config, AppError> {
    let mut builder = ConfigBuilder::new()
        .with_file(cli.config.as_deref())?
        .with_verbose(cli.verbose.then_some(true));

    if let Commands::Replay(args) = &cli.command {
        builder = builder
            .with_dwell_secs(args.dwell_secs)
            .with_throttle_secs(args.throttle_secs)
            .with_permission(args.permission.map(PermissionState::from));
    }

    Ok(builder.build())
}

fn print_error(err: &AppError) {
    eprintln!("Error: {}", err);

    // Print helpful hints for common errors
    match err {
        AppError::InvalidSnapshot { .. } => {
            eprintln!();
            eprintln!("Hint: Each line must be {{\"at\": SECONDS, \"snapshot\": {{...}}}}");
            eprintln!("      with timestamps in non-decreasing order.");
        }
        AppError::Config(hostwatch::error::ConfigError::FileNotFound(_)) => {
            eprintln!();
            eprintln!("Hint: Check the --config path or the HOSTWATCH_CONFIG variable.");
        }
        _ => {}
    }
}
