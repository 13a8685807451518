//! Command-line client for a notekeep backend.

use std::io::{self, Read};

use anyhow::bail;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use notekeep_core::{Config, HttpGateway, Note, NoteId, NoteStore, NotesApi};

#[derive(Parser)]
#[command(name = "nkeep", about = "Notekeep CLI", version)]
struct Cli {
    /// Server URL (can also be set via NOTEKEEP_SERVER env var)
    #[arg(short, long, env = "NOTEKEEP_SERVER")]
    server: Option<String>,

    /// Print list output as JSON
    #[arg(short, long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List notes, optionally filtered by a search query
    List {
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Create a note (content from --content, or stdin when omitted)
    Add {
        title: String,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Change an existing note's title and/or content
    Edit {
        id: i64,
        #[arg(short, long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
    },
    /// Delete a note
    Delete { id: i64 },
}

/// Explicit `--server`/env value wins over the config default; blank values
/// count as absent.
fn resolve_server(explicit: Option<String>, config: &Config) -> String {
    explicit
        .and_then(|value| {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .unwrap_or_else(|| config.server_url.clone())
}

fn note_line(note: &Note) -> String {
    format!("{:<8} {}", note.id, note.title)
}

/// Turn a reported mutation failure into a non-zero exit.
fn fail_on_status<G: NotesApi>(store: &NoteStore<G>) -> anyhow::Result<()> {
    match store.status() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "notekeep=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::from_env();
    let server = resolve_server(cli.server, &config);
    let gateway = HttpGateway::new(&server)?;
    let mut store = NoteStore::new(gateway).with_retry_policy(config.retry_policy());

    match cli.command {
        Commands::List { query } => {
            store.refresh().await;
            if let Some(query) = query {
                store.set_search_query(query);
            }
            let visible = store.visible_notes();
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&visible)?);
            } else {
                for note in visible {
                    println!("{}", note_line(note));
                }
            }
        }
        Commands::Add { title, content } => {
            let content = match content {
                Some(content) => content,
                None => {
                    let mut buffer = String::new();
                    io::stdin().read_to_string(&mut buffer)?;
                    buffer
                }
            };
            store.set_creation_draft(title.clone(), content);
            store.submit_create().await?;
            fail_on_status(&store)?;
            println!("Created \"{}\"", title);
        }
        Commands::Edit { id, title, content } => {
            if title.is_none() && content.is_none() {
                bail!("nothing to change: pass --title and/or --content");
            }
            store.refresh().await;
            let id = NoteId(id);
            if !store.select_for_edit(id) {
                bail!("note {} not found", id);
            }
            store.update_draft(title, content);
            store.commit_edit().await?;
            fail_on_status(&store)?;
            println!("Updated note {}", id);
        }
        Commands::Delete { id } => {
            let id = NoteId(id);
            store.delete_note(id).await;
            fail_on_status(&store)?;
            println!("Deleted note {}", id);
        }
    }

    Ok(())
}
