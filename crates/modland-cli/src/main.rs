use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use modland_api::ListingClient;
use modland_core::{emojify, parse_page, Config, ModuleSummary, ModulesList};

#[derive(Parser)]
#[command(name = "modland")]
#[command(version, about = "Browse third-party modules on the registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List modules, optionally filtered by a search query
    List {
        /// 1-based page number; anything unparseable falls back to 1
        #[arg(long, default_value = "1")]
        page: String,

        /// Free-text filter; empty matches every module
        #[arg(long, default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modland=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { page, query }) => {
            let config = Config::load()?;
            let page = parse_page(&page);
            let per_page = config.registry.per_page;

            let client = ListingClient::from_config(&config);
            match client.list_modules(page as i64, per_page, &query).await {
                Ok(list) => {
                    print!("{}", render_listing(&list, page, per_page));
                }
                Err(err) => {
                    // "Could not fetch" is a different outcome than
                    // "zero matches" and must never look like one.
                    tracing::warn!("Listing failed: {}", err);
                    eprintln!("Could not reach the module registry. Please try again later.");
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("No command specified. Try --help");
        }
    }

    Ok(())
}

/// Render one page of the listing as plain text
fn render_listing(list: &ModulesList, page: u64, per_page: u32) -> String {
    if list.results.is_empty() {
        if list.total_count == 0 {
            return "No modules found. Try a different search.\n".to_string();
        }
        // Past the last page: the matches exist, just not here
        return format!(
            "Nothing on page {} - the listing has {} pages. Try going back.\n",
            page,
            list.total_pages(per_page)
        );
    }

    let mut out = format!("Search through {} modules...\n\n", list.total_count);
    for module in &list.results {
        out.push_str(&render_module(module));
    }

    if let Some((start, end)) = list.page_range(page, per_page) {
        out.push_str(&format!(
            "\nShowing {} to {} of {} (page {} of {})\n",
            start,
            end,
            list.total_count,
            page,
            list.total_pages(per_page)
        ));
    }

    out
}

/// One listing row: name, description, star count when known
fn render_module(module: &ModuleSummary) -> String {
    let description = match &module.description {
        Some(text) => emojify(text),
        // Absent is its own state, never shown as an empty line
        None => "No description".to_string(),
    };

    match module.star_count {
        // An unknown count renders nothing at all, not "0 stars"
        Some(stars) => format!("{:<20} {} [{} stars]\n", module.name, description, stars),
        None => format!("{:<20} {}\n", module.name, description),
    }
}
