use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use sn_core::{GenerationResult, Mode, NewNote, NoteStorage};
use sn_inference::{InferenceConfig, ModelKind};
use sn_scraper::{FetcherConfig, HttpFetcher, Pipeline};
use sn_web::AppState;
use tracing::{info, warn};
use uuid::Uuid;

mod logging;

#[derive(Parser, Debug)]
#[command(author, version, about = "Turn web articles into study summaries and notes", long_about = None)]
pub struct Cli {
    #[arg(long, global = true, default_value = "gemini", help = "Model to use for generation. Available models: gemini (default), openai, dummy")]
    model: String,
    #[arg(long, global = true, help = "Override the backend's model name")]
    model_name: Option<String>,
    #[arg(long, global = true, help = "Override the backend's base URL")]
    model_url: Option<String>,
    #[arg(long, global = true, default_value = "sqlite", help = "Note storage: sqlite (default) or memory. Memory notes are gone when the process exits")]
    storage: String,
    #[arg(long, global = true, help = "Database file for the sqlite storage [default: notes.db]")]
    db_path: Option<String>,
    #[arg(long, global = true, default_value_t = 15, help = "Page fetch timeout in seconds")]
    fetch_timeout: u64,
    #[arg(long, global = true, default_value = "local", help = "Owner id used for saved notes")]
    owner: String,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Summarize an article
    Summary(GenerateArgs),
    /// Generate study notes for an article
    Notes(GenerateArgs),
    /// Summary and notes from a single fetch
    Process(GenerateArgs),
    /// Serve the HTTP API
    Serve {
        #[arg(long, default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Manage saved notes
    Saved {
        #[command(subcommand)]
        command: SavedCommands,
    },
}

#[derive(clap::Args, Debug)]
struct GenerateArgs {
    url: String,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    /// Persist every generated artifact for --owner
    #[arg(long)]
    save: bool,
}

#[derive(clap::Subcommand, Debug)]
enum SavedCommands {
    List,
    Show { id: Uuid },
    Delete { id: Uuid },
}

impl Cli {
    fn build_pipeline(&self) -> anyhow::Result<Pipeline> {
        let backend: ModelKind = self.model.parse()?;
        let mut config = InferenceConfig::from_env(backend);
        if self.model_name.is_some() {
            config.model_name = self.model_name.clone();
        }
        if self.model_url.is_some() {
            config.base_url = self.model_url.clone();
        }
        let model = sn_inference::create_model(&config)?;
        info!("🧠 Generation model initialized (using {})", model.name());

        let fetcher = HttpFetcher::new(FetcherConfig {
            timeout: Duration::from_secs(self.fetch_timeout),
            ..Default::default()
        })?;
        Ok(Pipeline::new(Arc::new(fetcher), model))
    }

    async fn open_storage(&self) -> anyhow::Result<Arc<dyn NoteStorage>> {
        let storage = sn_storage::create_storage(&self.storage, self.db_path.as_deref()).await?;
        Ok(storage)
    }
}

fn print_result(result: &GenerationResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    println!("# {}\n<{}>\n", result.title, result.url);
    for mode in Mode::ALL {
        if let Some(text) = result.get(mode) {
            println!("{}\n", text);
        }
    }
    Ok(())
}

async fn generate(cli: &Cli, args: &GenerateArgs, modes: &[Mode]) -> anyhow::Result<()> {
    let pipeline = cli.build_pipeline()?;
    let result = pipeline
        .run(&args.url, modes)
        .await
        .with_context(|| format!("Failed to process {}", args.url))?;

    if args.save {
        save_result(cli, &result, modes).await?;
    }

    print_result(&result, args.json)
}

async fn save_result(cli: &Cli, result: &GenerationResult, modes: &[Mode]) -> anyhow::Result<Vec<Uuid>> {
    if cli.storage == "memory" {
        warn!("⚠️ Notes saved to memory storage are lost when sn exits");
    }

    let storage = cli.open_storage().await?;
    let mut ids = Vec::new();
    for mode in modes {
        if let Some(note) = NewNote::from_result(result, *mode) {
            let saved = storage.save(&cli.owner, note).await?;
            info!("💾 Saved {} as {}", mode, saved.id);
            ids.push(saved.id);
        }
    }
    Ok(ids)
}

async fn saved(cli: &Cli, command: &SavedCommands) -> anyhow::Result<()> {
    let storage = cli.open_storage().await?;
    match command {
        SavedCommands::List => {
            for note in storage.list(&cli.owner).await? {
                println!(
                    "{}  {}  {:<7}  {}",
                    note.id,
                    note.created_at.format("%Y-%m-%d %H:%M"),
                    note.note_type,
                    note.article_title
                );
            }
        }
        SavedCommands::Show { id } => {
            let note = storage.get(&cli.owner, *id).await?;
            println!("# {} ({})\n<{}>\n\n{}", note.article_title, note.note_type, note.article_url, note.content);
        }
        SavedCommands::Delete { id } => {
            storage.delete(&cli.owner, *id).await?;
            println!("Note deleted successfully");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match &cli.command {
        Commands::Summary(args) => generate(&cli, args, &[Mode::Summary]).await,
        Commands::Notes(args) => generate(&cli, args, &[Mode::Notes]).await,
        Commands::Process(args) => generate(&cli, args, &Mode::ALL).await,
        Commands::Serve { addr } => {
            let state = AppState {
                pipeline: Arc::new(cli.build_pipeline()?),
                storage: cli.open_storage().await?,
            };
            sn_web::serve(*addr, state).await?;
            Ok(())
        }
        Commands::Saved { command } => saved(&cli, command).await,
    }
}
