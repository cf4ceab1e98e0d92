mod insights;
mod llm;
mod markdown;
mod pubmed;
mod search;
mod server;

pub const USER_AGENT: &str = concat!("medscout/", env!("CARGO_PKG_VERSION"));

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tracing::{info, warn};

use search::countries::{COUNTRIES, lookup};
use search::engine::{self, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, SearchRequest};
use search::filters::{DateRange, FilterSpec, SortBy};
use search::report;
use server::AppState;

#[derive(Parser, Debug)]
#[command(name = "medscout", version, about = "PubMed search with relevance scoring and AI insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Listen address
        #[arg(long, env = "MEDSCOUT_ADDR", default_value = "127.0.0.1:3000")]
        addr: SocketAddr,
    },
    /// Search PubMed and print the result page
    Search {
        /// Free-text query
        query: String,
        /// 1-based page number
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE,
              value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
        page_size: u32,
        #[arg(long, value_enum, default_value_t = DateRange::All)]
        date_range: DateRange,
        /// Publication type tag, e.g. "Review" (repeatable)
        #[arg(long = "article-type", value_name = "TYPE")]
        article_types: Vec<String>,
        #[arg(long, value_enum, default_value_t = SortBy::Relevance)]
        sort: SortBy,
        /// Only articles with free full text
        #[arg(long)]
        free_full_text: bool,
        /// Country code restricting author affiliation, e.g. US (repeatable)
        #[arg(long = "country", value_name = "CODE")]
        countries: Vec<String>,
        /// Skip AI insights even when a key is configured
        #[arg(long)]
        no_insights: bool,
        /// Print the JSON response instead of Markdown
        #[arg(long)]
        json: bool,
    },
    /// Summarize one article from its title and abstract
    Summarize {
        #[arg(long)]
        title: String,
        #[arg(long = "abstract")]
        abstract_text: String,
        #[arg(long)]
        pmid: Option<String>,
    },
    /// List country codes accepted by --country
    Countries,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("medscout=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { addr } => {
            info!("starting medscout API");
            let state = AppState::from_env()?;
            server::serve(addr, state)
                .await
                .inspect_err(|e| tracing::error!("server failed: {e}"))?;
            info!("server stopped");
        }
        Command::Search {
            query,
            page,
            page_size,
            date_range,
            article_types,
            sort,
            free_full_text,
            countries,
            no_insights,
            json,
        } => {
            for code in &countries {
                if lookup(code).is_none() {
                    warn!(%code, "unknown country code ignored");
                }
            }
            let state = AppState::from_env()?;
            let request = SearchRequest {
                query,
                page,
                page_size,
                filters: FilterSpec {
                    date_range,
                    article_types,
                    sort_by: sort,
                    free_full_text_only: free_full_text,
                    countries,
                },
            };
            let llm = if no_insights { None } else { state.llm.as_ref() };
            let response = engine::run(&state.pubmed, llm, &request).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                print!("{}", report::format_results(&response, &request.query));
            }
        }
        Command::Summarize {
            title,
            abstract_text,
            pmid,
        } => {
            let state = AppState::from_env()?;
            let llm = state
                .llm
                .as_ref()
                .ok_or("OpenRouter API key not configured")?;
            if let Some(ref pmid) = pmid {
                info!(%pmid, "summarizing");
            }
            let summary = insights::summarize_article(llm, &title, &abstract_text)
                .await
                .into_value();
            print!("{}", report::format_summary(&title, &summary));
        }
        Command::Countries => {
            for country in COUNTRIES {
                println!("{}\t{}", country.code, country.name);
            }
        }
    }

    Ok(())
}
