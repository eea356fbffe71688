//! Terminal front end for the item API.
//!
//! `list`, `add` and `delete` drive a `ListView` and print its rendering, the
//! way the list screen would. `get`, `search` and `update` call the service
//! directly and print the JSON the server returned.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use item_core::{ApiError, Item, ItemClient, ItemService, ListView, UreqTransport};
use tracing_subscriber::EnvFilter;

const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Parser, Debug)]
#[command(name = "items", version, about = "Manage items on a remote item API")]
struct Cli {
    #[arg(
        long,
        env = "ITEM_API_URL",
        default_value = DEFAULT_API_URL,
        help = "API root; requests go to <api-url>/items"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show all items
    List,
    /// Create an item and show the updated list
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an item and show the updated list
    Delete { id: i64 },
    /// Fetch one item as JSON
    Get { id: i64 },
    /// Find items by name
    Search { name: String },
    /// Replace an item's name and description
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let service = ItemService::new(ItemClient::new(&cli.api_url), UreqTransport::new());

    match cli.command {
        Command::List => show(ListView::new(service), |_| None).await,
        Command::Add { name, description } => {
            show(ListView::new(service), |view| {
                *view.draft_mut() = Item::draft(name, description);
                Some(Step::Create)
            })
            .await
        }
        Command::Delete { id } => show(ListView::new(service), |_| Some(Step::Delete(id))).await,
        Command::Get { id } => print_json(service.get(id).await),
        Command::Search { name } => print_json(service.search(&name).await),
        Command::Update {
            id,
            name,
            description,
        } => {
            let item = Item {
                id: Some(id),
                ..Item::draft(name, description)
            };
            print_json(service.update(id, &item).await)
        }
    }
}

enum Step {
    Create,
    Delete(i64),
}

/// Load the list, optionally run one action, then print the view.
async fn show(
    mut view: ListView<UreqTransport>,
    prepare: impl FnOnce(&mut ListView<UreqTransport>) -> Option<Step>,
) -> ExitCode {
    view.initialize().await;
    if view.error().is_none() {
        match prepare(&mut view) {
            Some(Step::Create) => view.submit_create().await,
            Some(Step::Delete(id)) => view.request_delete(Some(id)).await,
            None => {}
        }
    }
    print!("{}", view.render());
    if view.error().is_some() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn print_json<T: serde::Serialize>(result: Result<T, ApiError>) -> ExitCode {
    match result.and_then(|value| {
        serde_json::to_string_pretty(&value).map_err(|e| ApiError::Serialization(e.to_string()))
    }) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
