use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

/// Render rubric ratings and annotations into a paginated PDF summary.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Rubric CSV with columns domain, indicators, emerging, developing, embedding, excelling
    rubric: PathBuf,

    /// JSON file with "ratings", "evidence" and "next_steps" keyed by domain
    #[arg(short, long)]
    assessment: Option<PathBuf>,

    /// PNG drawn at the top of every page
    #[arg(short, long, default_value = "logo.png")]
    letterhead: PathBuf,

    /// Output PDF path
    #[arg(short, long, default_value = rubric_pdf::DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Log layout decisions (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match rubric_pdf::export_summary(
        &cli.rubric,
        cli.assessment.as_deref(),
        &cli.letterhead,
        &cli.output,
    ) {
        Ok(()) => {
            println!("Written to {}", cli.output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
