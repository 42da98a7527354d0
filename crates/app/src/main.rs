mod devices;
mod shell;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use services::{
    ActionService, Clock, CosmicAi, ExplorerService, GeminiClient, GeminiConfig, NarrationService,
};

use crate::devices::WavFileOutput;
use crate::shell::{Shell, print_commands};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidModel { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidModel { raw } => write!(f, "invalid --model value: {raw:?}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    image: Option<PathBuf>,
    audio_dir: Option<PathBuf>,
    model: Option<String>,
    help: bool,
}

const DEFAULT_AUDIO_DIR: &str = "narration";

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--image <path>] [--audio-dir <dir>] [--model <name>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --audio-dir {DEFAULT_AUDIO_DIR}");
    eprintln!("  --model {}", GeminiConfig::DEFAULT_MODEL);
    eprintln!();
    eprintln!("Environment (a .env file is read when present):");
    eprintln!("  COSMIC_AI_API_KEY (or GEMINI_API_KEY, GOOGLE_API_KEY)");
    eprintln!("  COSMIC_AI_BASE_URL, COSMIC_AI_MODEL, COSMIC_AI_TIMEOUT_SECS");
    eprintln!("  COSMIC_TTS_MODEL, COSMIC_TTS_VOICE, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut parsed = Self::default();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--image" => parsed.image = Some(require_value(args, "--image")?.into()),
                "--audio-dir" => {
                    parsed.audio_dir = Some(require_value(args, "--audio-dir")?.into());
                }
                "--model" => {
                    let value = require_value(args, "--model")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidModel { raw: value });
                    }
                    parsed.model = Some(value.trim().to_string());
                }
                "--help" | "-h" => parsed.help = true,
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(parsed)
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let _ = dotenvy::dotenv();
    init_tracing();

    let config = GeminiConfig::from_env().map(|config| match &args.model {
        Some(model) => config.with_model(model.clone()),
        None => config,
    });
    match &config {
        Some(config) => info!(model = %config.model, tts_model = %config.tts_model, "AI configured"),
        None => warn!("no API key set; every AI step will fail"),
    }

    let ai: Arc<dyn CosmicAi> = Arc::new(GeminiClient::new(config)?);
    let actions = Arc::new(ActionService::new(ai));
    let explorer = ExplorerService::new(Clock::system(), Arc::clone(&actions));
    let audio_dir = args
        .audio_dir
        .unwrap_or_else(|| PathBuf::from(DEFAULT_AUDIO_DIR));
    let narration = NarrationService::new(actions, Box::new(WavFileOutput::new(audio_dir)));

    print_commands();
    println!();
    let mut shell = Shell::new(explorer, narration, args.image);
    shell.run().await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
