//! CLI for attriscan - human attribute analysis for photos.

use anyhow::Context;
use attriscan::surface::{page, Session, SurfaceState};
use attriscan::{AttributeProvider, Config, GeminiAnalyzer, GeminiModel, ATTRIBUTE_PROMPT};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "attriscan")]
#[command(about = "Analyze human attributes in a photo via the Gemini API")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one photo and display the description next to it
    Analyze(AnalyzeArgs),

    /// Check that the inference service is reachable and the key is valid
    Check(CheckArgs),

    /// Print the fixed instruction template sent with every image
    Prompt,
}

#[derive(Args)]
struct AnalyzeArgs {
    /// Path to a png/jpg/jpeg photo
    image: PathBuf,

    /// Model variant to use
    #[arg(short, long, value_enum, default_value = "flash")]
    model: ModelArg,

    /// Path to the secrets file
    #[arg(long)]
    secrets: Option<PathBuf>,
}

#[derive(Args)]
struct CheckArgs {
    /// Model variant to use
    #[arg(short, long, value_enum, default_value = "flash")]
    model: ModelArg,

    /// Path to the secrets file
    #[arg(long)]
    secrets: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelArg {
    Flash,
    Pro,
}

impl From<ModelArg> for GeminiModel {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::Flash => GeminiModel::Flash15,
            ModelArg::Pro => GeminiModel::Pro15,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => analyze(args, cli.json).await,
        Commands::Check(args) => check(args, cli.json).await,
        Commands::Prompt => print_prompt(cli.json),
    }
}

/// Resolves the credential and builds the analyzer.
///
/// Runs before anything is rendered: a missing or blank key aborts the
/// process here, so the upload flow is never entered unauthorized.
fn build_analyzer(model: ModelArg, secrets: Option<&PathBuf>) -> anyhow::Result<GeminiAnalyzer> {
    let config = match secrets {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }?;

    let analyzer = GeminiAnalyzer::builder()
        .api_key(config.api_key())
        .model(model.into())
        .build()?;
    Ok(analyzer)
}

async fn analyze(args: AnalyzeArgs, json_output: bool) -> anyhow::Result<()> {
    let analyzer = build_analyzer(args.model, args.secrets.as_ref())?;

    let bytes = std::fs::read(&args.image)
        .with_context(|| format!("failed to read {}", args.image.display()))?;

    let mut session = Session::new(analyzer);
    let state = session.handle_upload(bytes).await?;

    let SurfaceState::Analyzed { image, outcome } = state else {
        anyhow::bail!("upload did not produce a displayable state");
    };

    if json_output {
        let image_json = serde_json::json!({
            "path": args.image.display().to_string(),
            "format": image.kind.extension(),
            "width": image.width,
            "height": image.height,
            "size_bytes": image.size(),
        });
        let result = match outcome {
            Ok(result) => serde_json::json!({
                "type": "analysis",
                "success": true,
                "image": image_json,
                "text": result.text,
                "model": result.metadata.model,
                "duration_ms": result.metadata.duration_ms,
            }),
            Err(e) => serde_json::json!({
                "type": "analysis",
                "success": false,
                "image": image_json,
                "error": e.to_string(),
            }),
        };
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("{}", page::PAGE_TITLE);
    println!("{}", page::PAGE_INTRO);
    println!();
    println!("Instructions:");
    for (i, step) in page::SIDEBAR_INSTRUCTIONS.iter().enumerate() {
        println!("  {}. {}", i + 1, step);
    }
    println!();
    println!(
        "{}: {} ({}x{} {}, {} bytes)",
        page::IMAGE_CAPTION,
        args.image.display(),
        image.width,
        image.height,
        image.kind,
        image.size()
    );
    println!();
    match outcome {
        Ok(result) => {
            println!("{}", result.text);
            if let Some(duration) = result.metadata.duration_ms {
                println!();
                println!("Duration: {}ms", duration);
            }
        }
        // The image panel stays on display; the failure takes the place of
        // the result text.
        Err(e) => println!("Analysis failed: {e}"),
    }
    println!();
    println!("{}", page::FOOTER);

    Ok(())
}

async fn check(args: CheckArgs, json_output: bool) -> anyhow::Result<()> {
    let analyzer = build_analyzer(args.model, args.secrets.as_ref())?;
    let model = GeminiModel::from(args.model);

    match analyzer.health_check().await {
        Ok(()) => {
            if json_output {
                let result = serde_json::json!({
                    "type": "check",
                    "success": true,
                    "provider": analyzer.name(),
                    "model": model.as_str(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!(
                    "{} is reachable and the key is authorized ({})",
                    analyzer.name(),
                    model.as_str()
                );
            }
            Ok(())
        }
        Err(e) => {
            if json_output {
                let result = serde_json::json!({
                    "type": "check",
                    "success": false,
                    "provider": analyzer.name(),
                    "model": model.as_str(),
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            Err(e.into())
        }
    }
}

fn print_prompt(json_output: bool) -> anyhow::Result<()> {
    if json_output {
        let result = serde_json::json!({
            "type": "prompt",
            "text": ATTRIBUTE_PROMPT,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{ATTRIBUTE_PROMPT}");
    }
    Ok(())
}
