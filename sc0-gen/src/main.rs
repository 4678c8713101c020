use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::info;

use sc0_gen::{CompileError, compile, render_listing};

#[derive(Parser)]
#[command(name = "sc0-gen")]
#[command(about = "Generates SC0 stack code from an AST0 program", version)]
struct Cli {
    /// AST0 source file
    input: PathBuf,
}

fn main() -> ExitCode {
    // Usage errors exit through clap with status 2
    let cli = Cli::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    // RUST_LOG controls the level, warnings only by default
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(listing) => {
            print!("{}", listing);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> Result<String, CompileError> {
    info!(input = %cli.input.display(), "reading AST0 program");
    let source = fs::read_to_string(&cli.input)?;
    let generated = compile(&source)?;
    info!(
        instructions = generated.code.len(),
        variables = generated.vars.len(),
        "generated SC0 code"
    );
    Ok(render_listing(&generated.code))
}
