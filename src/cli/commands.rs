use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::runtime::Runtime;
use tracing::info;

use crate::client::SearchClient;
use crate::config::{self, Overrides, Settings};
use crate::controller::SearchController;
use crate::error::SearchError;
use crate::logging;
use crate::query::build_query;
use crate::render::html::{METADATA_SEPARATOR, render_page};
use crate::session::{OffsetWindow, SearchSession};
use crate::utils::{default_log_path, sanitize_for_terminal};

#[derive(Parser)]
#[command(name = "ellinet-search")]
#[command(version = "0.1.0")]
#[command(about = "Search an Ellinet/regal search index", long_about = None)]
pub struct Cli {
    /// Service base URL, e.g. http://localhost
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Results per page
    #[arg(long, global = true)]
    pub page_size: Option<usize>,

    /// Config file (default: <config dir>/ellinet-search/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the indices the service offers
    Indices,
    /// Print the query a search term produces, without sending it
    Query {
        /// Search term; `*` matches everything
        term: String,
        /// Zero-based result page
        #[arg(long, default_value_t = 0)]
        page: usize,
    },
    /// Run one search and print the result page
    Search(SearchArgs),
    /// Interactive terminal front-end
    Tui {
        /// Index to tick once discovered (repeatable)
        #[arg(long = "index")]
        indices: Vec<String>,
    },
}

#[derive(Args)]
pub struct SearchArgs {
    /// Search term; `*` matches everything
    pub term: String,
    /// Zero-based result page
    #[arg(long, default_value_t = 0)]
    pub page: usize,
    /// Index to search (repeatable)
    #[arg(long = "index")]
    pub indices: Vec<String>,
    /// Print the HTML fragments instead of a text listing
    #[arg(long)]
    pub html: bool,
    /// Write a standalone HTML page to this file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let indices = match command {
        Commands::Search(args) => args.indices.clone(),
        Commands::Tui { indices } => indices.clone(),
        _ => Vec::new(),
    };
    let overrides = Overrides { host: cli.host.clone(), page_size: cli.page_size, indices };

    if matches!(command, Commands::Tui { .. }) {
        logging::init_file(cli.verbose, &default_log_path()?)?;
    } else {
        logging::init_stderr(cli.verbose);
    }

    let settings = config::load(cli.config.as_deref(), &overrides)?;

    match command {
        Commands::Query { term, page } => show_query(&settings, term, *page),
        Commands::Indices => {
            let runtime = build_runtime()?;
            runtime.block_on(list_indices(&settings))
        }
        Commands::Search(args) => {
            let runtime = build_runtime()?;
            runtime.block_on(run_search(&settings, args))
        }
        Commands::Tui { .. } => {
            let runtime = build_runtime()?;
            crate::tui::run_interactive(&settings, runtime.handle().clone())
        }
    }
}

fn build_runtime() -> Result<Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Window for `--page`, rejecting pages whose offsets overflow.
fn page_window(settings: &Settings, page: usize) -> Result<OffsetWindow> {
    OffsetWindow::at_page(settings.page_size(), page).with_context(|| {
        format!("--page {} is out of range for page size {}", page, settings.page_size())
    })
}

/// Attach `action` to a service error, pointing at the host when it was unreachable.
fn service_error(error: SearchError, action: &str, host: &str) -> anyhow::Error {
    let context = if error.is_transport() {
        format!("{} (is the search service running at {}?)", action, host)
    } else {
        action.to_string()
    };
    anyhow::Error::new(error).context(context)
}

fn show_query(settings: &Settings, term: &str, page: usize) -> Result<()> {
    let window = page_window(settings, page)?;
    match build_query(term, window.from(), window.page_size()) {
        Some(query) => {
            let json = serde_json::to_string_pretty(&query).context("Failed to encode query")?;
            println!("{}", json);
        }
        None => println!("Search term too short: enter at least 2 characters, or * for all"),
    }
    Ok(())
}

async fn list_indices(settings: &Settings) -> Result<()> {
    let client = SearchClient::new(&settings.host, settings.timeout())?;
    let names = client
        .fetch_indices()
        .await
        .map_err(|e| service_error(e, "Index discovery failed", client.host()))?;
    for name in names {
        println!("{}", sanitize_for_terminal(&name));
    }
    Ok(())
}

async fn run_search(settings: &Settings, args: &SearchArgs) -> Result<()> {
    page_window(settings, args.page)?;
    let client = SearchClient::new(&settings.host, settings.timeout())?;
    let session = SearchSession::new(client.host(), settings.page_size());
    let mut controller = SearchController::new(session, settings.indices.clone());

    let names = client
        .fetch_indices()
        .await
        .map_err(|e| service_error(e, "Index discovery failed", client.host()))?;
    controller.apply_indices(Ok(names));

    let Some(request) = controller.search_page(&args.term, args.page) else {
        println!("Search term too short: enter at least 2 characters, or * for all");
        return Ok(());
    };

    let page = client
        .search(&request.indices, &request.query)
        .await
        .map_err(|e| service_error(e, "Search failed", client.host()))?;
    controller.apply_response(request.id, Ok(page));

    if let Some(path) = &args.output {
        write_page(&controller, &args.term, path)?;
    }

    if args.html {
        let view = controller.view();
        println!("{}", view.query_div);
        println!("{}", view.hits_div);
        println!("{}", view.output_div);
    } else {
        print_listing(&controller);
    }
    Ok(())
}

fn write_page(controller: &SearchController, term: &str, path: &Path) -> Result<()> {
    let html = render_page(&controller.session().indices, term, controller.view());
    fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Wrote result page.");
    Ok(())
}

fn print_listing(controller: &SearchController) {
    let Some(page) = controller.page() else {
        return;
    };
    let window = &controller.session().window;

    println!("Treffer: {}", page.total_hits);
    if page.items.is_empty() {
        return;
    }
    println!("{} - {}", window.from(), window.to());
    println!();

    for (idx, item) in page.items.iter().enumerate() {
        println!("{:>4}. {}", window.from().saturating_add(idx + 1), sanitize_for_terminal(item.label()));
        println!(
            "      {}",
            sanitize_for_terminal(&item.metadata_fields().join(METADATA_SEPARATOR))
        );
        if let Some(url) = item.object_url() {
            println!("      {}", sanitize_for_terminal(url));
        }
    }

    let controls = controller.controls();
    if controls.next {
        println!();
        println!("More results: --page {}", window.from() / window.page_size() + 1);
    }
}
