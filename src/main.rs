use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Render a JSON invoice record into an A4 PDF.
#[derive(Parser)]
#[command(version)]
struct Args {
    /// Invoice record (JSON)
    input: PathBuf,
    /// Output PDF, defaults to the input path with a .pdf extension
    output: Option<PathBuf>,
    /// Log layout decisions (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = match args.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("pdf"));

    match facture_pdf::convert_json_to_pdf(&args.input, &output) {
        Ok(()) => {
            println!("Converted {} -> {}", args.input.display(), output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
