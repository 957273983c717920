use std::path::PathBuf;

use academy_quiz::Quiz;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// JSON file with the questionnaire definition
    #[arg(short, long)]
    questionnaire: PathBuf,

    /// Directory for saved progress (defaults to ~/.config/academy-quiz)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let loaded = match args.data_dir {
        Some(dir) => Quiz::from_json_with_data_dir(&args.questionnaire, dir),
        None => Quiz::from_json(&args.questionnaire),
    };

    let quiz = match loaded {
        Ok(quiz) => quiz,
        Err(e) => {
            eprintln!("Failed to load questionnaire: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = quiz.run() {
        eprintln!("Error running questionnaire: {e}");
        std::process::exit(1);
    }
}
