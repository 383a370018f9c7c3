//! vlsi-flow CLI - Render the modern VLSI chip design flow.

use std::io::Write;
use std::process;

use clap::Parser;
use vlsi_flow::cli::{Cli, Commands, ConfigCommands};
use vlsi_flow::commands::{self, DEFAULT_FILE_NAME, Output};
use vlsi_flow::config::resolve_settings;

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let human = cli.human_readable;
    if let Err(e) = run(cli) {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

/// Log to stderr so stdout stays parseable. `RUST_LOG` overrides the default level.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), vlsi_flow::Error> {
    let settings = resolve_settings(&cli.overrides())?;
    let human = settings.human();

    match cli.command.unwrap_or(Commands::Show) {
        Commands::Show => {
            let result = commands::show(&settings)?;
            output(&result, human);
        }

        Commands::Render { output: _, stdout: true } => {
            let svg = commands::render_to_string()?;
            let mut out = std::io::stdout().lock();
            out.write_all(svg.as_bytes())?;
            out.flush()?;
        }

        Commands::Render { output: path, .. } => {
            let path = path.unwrap_or_else(|| settings.output_dir.value.join(DEFAULT_FILE_NAME));
            let result = commands::render_to_file(&path)?;
            output(&result, human);
        }

        Commands::Layout => {
            let result = commands::layout()?;
            output(&result, human);
        }

        Commands::Config {
            command: ConfigCommands::Show,
        } => {
            let result = commands::config_show(settings);
            output(&result, human);
        }
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
