mod repl;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::{Args, Parser, Subcommand};
use scriptcraft_core::prompt::render_prompt;
use scriptcraft_core::request::{DEFAULT_AUDIENCE, DEFAULT_DURATION, ScriptRequest};
use scriptcraft_core::types::{ContentKind, Tone};
use scriptcraft_engine::client::GenerationClient;
use scriptcraft_engine::session::{STAGE_GENERATING, ScriptSession};
use scriptcraft_runtime::config_store::{ConfigStore, apply_env_overrides};
use scriptcraft_runtime::export::export_script;
use scriptcraft_runtime::runtime_engine::build_generation_client;
use scriptcraft_runtime::secrets::{SecretKey, get_secret, load_dotenv};

/// Turn a short topic into a ready-to-record content script.
#[derive(Parser, Debug)]
#[command(name = "scriptcraft")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the JSON config file. Defaults are used when it does not exist.
    #[arg(long, global = true, default_value = "scriptcraft.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a script and print it.
    Generate(GenerateArgs),

    /// Print the prompt that would be sent, without calling the model.
    Prompt(RequestArgs),

    /// List content kinds, their duration options, and tones.
    Kinds,

    /// Start an interactive session with history.
    Interactive,

    /// Manage the config file.
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with the default settings.
    Init {
        /// Replace an existing file.
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// social_short, long_form_video or podcast_qa.
    #[arg(short, long)]
    kind: String,

    /// What the content is about.
    #[arg(short, long)]
    topic: String,

    #[arg(long, default_value = "casual")]
    tone: String,

    #[arg(short, long, default_value = DEFAULT_DURATION)]
    duration: String,

    #[arg(short, long, default_value = DEFAULT_AUDIENCE)]
    audience: String,
}

impl RequestArgs {
    fn to_request(&self) -> anyhow::Result<ScriptRequest> {
        let req = ScriptRequest::parse(
            &self.kind,
            &self.topic,
            &self.tone,
            &self.duration,
            &self.audience,
        )?;
        Ok(req)
    }
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    request: RequestArgs,

    /// Also save the script as a text file.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(&cli.config, args).await,
        Command::Prompt(args) => {
            let req = args.to_request()?;
            println!("{}", render_prompt(&req)?);
            Ok(())
        }
        Command::Kinds => {
            print_kinds();
            Ok(())
        }
        Command::Interactive => {
            let (cfg, client) = load_client(&cli.config)?;
            let session = ScriptSession::new(cfg.history_enabled);
            repl::run(session, client).await
        }
        Command::Config {
            command: ConfigCommand::Init { force },
        } => {
            let store = ConfigStore::at_path(&cli.config);
            store.init_defaults(force)?;
            println!("Wrote {}", store.path().display());
            Ok(())
        }
    }
}

fn load_client(
    config_path: &std::path::Path,
) -> anyhow::Result<(scriptcraft_core::config::AppConfig, GenerationClient)> {
    load_dotenv()?;
    let cfg = ConfigStore::at_path(config_path)
        .load_or_default()
        .context("load config")?;
    let cfg = apply_env_overrides(cfg, |name| std::env::var(name).ok());
    let client = build_generation_client(&cfg, get_secret(SecretKey::GeminiApiKey))?;
    Ok((cfg, client))
}

async fn generate(config_path: &std::path::Path, args: GenerateArgs) -> anyhow::Result<()> {
    // Validate before touching config or secrets.
    let req = args.request.to_request()?;
    let (_cfg, client) = load_client(config_path)?;

    let mut session = ScriptSession::new(true);
    let outcome = session
        .create_script_with_hook(&client, req, |stage| async move {
            if stage == STAGE_GENERATING {
                eprintln!("Crafting your script...");
            }
        })
        .await?;
    log::info!("generation took {}ms", outcome.generation_ms);

    if let Some(message) = outcome.result.error_message() {
        bail!("{message}");
    }

    println!("{}", outcome.result.display_text());

    if let Some(path) = args.output {
        let entry = session.load_from_history(0)?;
        export_script(entry, &path)?;
        eprintln!("Saved to {}", path.display());
    }
    Ok(())
}

fn print_kinds() {
    for kind in ContentKind::ALL {
        println!("{:<16} {}", kind.as_str(), kind.label());
        println!("{:<16} durations: {}", "", kind.duration_options().join(", "));
    }
    let tones: Vec<_> = Tone::ALL.iter().map(|t| t.as_str()).collect();
    println!("tones: {}", tones.join(", "));
}
