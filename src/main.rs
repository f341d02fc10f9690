use std::sync::Arc;

use careers_client::{
    auth::{Session, SignInPrompt},
    config::{get_config, init_config},
    coordinator::{CareersPage, TracingNotifier},
    utils::time::format_for_display,
    Services,
};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "careers", about = "Browse open positions from the careers API")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List postings on one page, optionally filtered
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        category: Option<i64>,
    },
    /// List posting categories
    Categories,
}

struct CliSignIn;

impl SignInPrompt for CliSignIn {
    fn request_sign_in(&self) {
        tracing::warn!("Sign in is required for this action");
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // parse first so `--help` works without any configuration
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    init_config()?;
    let config = get_config();
    info!("Using careers API at {}", config.api_base_url);

    let services = Services::new(config)?;
    let page = CareersPage::new(
        services,
        &Session::anonymous(),
        Arc::new(TracingNotifier),
        Arc::new(CliSignIn),
    );

    match cli.command {
        Command::List {
            page: number,
            limit,
            search,
            category,
        } => {
            page.mount().await;
            page.set_page_size(limit).await;
            if number != 1 && !page.set_page(number).await {
                anyhow::bail!(
                    "Page {} is out of range (1-{})",
                    number,
                    page.pagination().total_pages
                );
            }
            if let Some(term) = search {
                page.set_search_term(term);
            }
            page.select_category(category);

            let state = page.snapshot();
            if state.postings_status.is_errored() {
                anyhow::bail!("Failed to load jobs");
            }
            for post in &state.filtered {
                let category = post
                    .category
                    .as_ref()
                    .map(|c| c.name.as_str())
                    .unwrap_or("-");
                let posted = post
                    .created_at
                    .as_ref()
                    .map(format_for_display)
                    .unwrap_or_default();
                println!(
                    "{:>5}  {:<40} {:<20} {:<16} {}",
                    post.id, post.title, post.location, category, posted
                );
            }
            println!(
                "page {}/{} ({} shown, {} total)",
                state.pagination.page,
                state.pagination.total_pages,
                state.filtered.len(),
                state.pagination.total_count
            );
        }
        Command::Categories => {
            if !page.load_categories().await {
                anyhow::bail!("Failed to load job categories");
            }
            for category in page.categories() {
                println!("{:>5}  {}", category.id, category.name);
            }
        }
    }

    Ok(())
}
