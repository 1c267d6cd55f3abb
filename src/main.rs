use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Mutex;
use std::time::Duration;

use azota_exam::data::fetch;
use azota_exam::exam::{DEFAULT_DURATION_MINUTES, DEFAULT_QUESTION_COUNT};
use azota_exam::{parse_with_report, Exam, ExamConfig, LoadError, SourceLocation};
use clap::builder::TypedValueParser;
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Question bank to load: a file path or an http(s) URL
    #[arg(short, long, default_value = "questions.txt")]
    source: SourceLocation,

    /// Number of questions drawn for each exam
    #[arg(short = 'n', long, default_value_t = DEFAULT_QUESTION_COUNT,
          value_parser = clap::value_parser!(u64).range(1..).map(|n| n as usize))]
    count: usize,

    /// Exam length in minutes
    #[arg(short, long, default_value_t = DEFAULT_DURATION_MINUTES,
          value_parser = clap::value_parser!(u64).range(1..))]
    duration: u64,

    /// Seed for reproducible question sampling and option order
    #[arg(long)]
    seed: Option<u64>,

    /// Parse the bank, print it as JSON and exit
    #[arg(long)]
    check: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = init_logging(args.log_file.as_deref()) {
        eprintln!("Failed to open log file: {}", e);
        return ExitCode::FAILURE;
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.check {
        return runtime.block_on(check(&args.source));
    }

    let config = ExamConfig {
        question_count: args.count,
        duration: Duration::from_secs(args.duration * 60),
    };

    let exam = match runtime.block_on(Exam::load(&args.source, config, args.seed)) {
        Ok(exam) => exam,
        Err(azota_exam::ExamError::Load(LoadError::SourceUnavailable(e))) => {
            error!(error = %e, "question source unavailable");
            eprintln!("Could not load {}: {}", args.source, e);
            return ExitCode::FAILURE;
        }
        Err(azota_exam::ExamError::Load(e @ LoadError::EmptyBank { .. })) => {
            error!(error = %e, "question bank is empty");
            eprintln!("No questions found in {}. Check the file format.", args.source);
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("Error loading exam: {}", e);
            return ExitCode::FAILURE;
        }
    };
    drop(runtime);

    if let Err(e) = exam.run() {
        eprintln!("Error running exam: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Print the parse result without starting the terminal UI.
async fn check(source: &SourceLocation) -> ExitCode {
    let text = match fetch(source).await {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Could not load {}: {}", source, e);
            return ExitCode::FAILURE;
        }
    };

    let report = parse_with_report(&text);
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize questions: {}", e);
            return ExitCode::FAILURE;
        }
    }

    if report.questions.is_empty() {
        eprintln!("No questions found in {}. Check the file format.", source);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.with_writer(Mutex::new(file)).with_ansi(false).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}
