use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quill::{ApiConfig, GenerationEvent, Generator, HttpTransport, Session, WritingStyle, config};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "quill")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI writing assistant: rewrite text in creative, professional, or academic style")]
#[command(arg_required_else_help = true)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite text in the selected style
    Rewrite {
        /// Text to rewrite; reads stdin when neither this nor --input is given
        text: Option<String>,
        /// Writing style to apply
        #[arg(short, long, value_enum, default_value_t = WritingStyle::Professional)]
        style: WritingStyle,
        /// Read the input text from a file
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Save the session to a timestamped file afterwards
        #[arg(long)]
        save: bool,
        /// Configuration file path (overrides discovery)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print a previously saved session
    Show {
        /// Path to the session file
        file: PathBuf,
    },
    /// Show configuration discovery information
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quill=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match args.command {
        Commands::Rewrite {
            text,
            style,
            input,
            save,
            config,
        } => run_rewrite(text, style, input, save, config).await,
        Commands::Show { file } => run_show(&file).await,
        Commands::ShowConfig => {
            config::show_discovery_info();
            Ok(())
        }
    }
}

async fn run_rewrite(
    text: Option<String>,
    style: WritingStyle,
    input_file: Option<PathBuf>,
    save: bool,
    config_override: Option<PathBuf>,
) -> Result<()> {
    let input = read_input(text, input_file)?;

    let api_config = match config_override {
        Some(ref path) => {
            info!("Loading configuration override from: {:?}", path);
            ApiConfig::load_from(path)
        }
        None => ApiConfig::load(),
    };
    if !api_config.is_configured() {
        eprintln!(
            "Warning: no API key configured. Set api.key in quill.toml or {}.",
            config::API_KEY_ENV_VAR
        );
    }

    let generator = Generator::new(Arc::new(HttpTransport::new()), Arc::new(api_config));
    generator.set_style(style);

    let mut events = generator.start(&input);
    let mut output = None;
    while let Some(event) = events.recv().await {
        match event {
            GenerationEvent::Started => eprintln!("Generating ({style})..."),
            GenerationEvent::Completed { text } => {
                println!("{text}");
                output = Some(text);
            }
            GenerationEvent::Failed { message } => {
                anyhow::bail!("Generation failed: {message}");
            }
        }
    }

    if save {
        let session = Session {
            style: style.name().to_string(),
            input,
            output: output.unwrap_or_default(),
        };
        let file_name = Session::default_file_name();
        session.save_to(Path::new(&file_name)).await?;
        eprintln!("Saved to: {file_name}");
    }

    Ok(())
}

async fn run_show(file: &Path) -> Result<()> {
    let session = Session::load_from(file).await?;
    if !session.style.is_empty() {
        println!("Style: {}", session.style);
        println!();
    }
    println!("--- Input ---");
    println!("{}", session.input);
    println!();
    println!("--- Output ---");
    println!("{}", session.output);
    Ok(())
}

fn read_input(text: Option<String>, input_file: Option<PathBuf>) -> Result<String> {
    match (text, input_file) {
        (Some(text), _) => Ok(text),
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read input from stdin")?;
            Ok(buffer)
        }
    }
}
