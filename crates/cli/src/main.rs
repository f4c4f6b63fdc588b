use anyhow::{Context, Result};
use catalog::{Catalog, Product};
use clap::{Parser, Subcommand};
use colored::Colorize;
use retrieval::CandidateSelector;
use server::Settings;
use std::sync::Arc;
use std::time::Instant;

/// Shop Assistant - ask questions about the product catalog
#[derive(Parser)]
#[command(name = "shop-assistant")]
#[command(about = "Product Q&A using keyword retrieval and a local language model", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question and get a model-backed recommendation
    Ask {
        /// Natural-language product question
        #[arg(long)]
        query: String,
    },

    /// Show the retrieval candidates for a query without calling the model
    Candidates {
        /// Natural-language product question
        #[arg(long)]
        query: String,

        /// Number of candidates to show (defaults to the configured top N)
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// List catalog products
    Products {
        /// Only show products in this category (case-insensitive)
        #[arg(long)]
        category: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Environment from .env, if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Ask { query } => handle_ask(&cli.settings, &query).await?,
        Commands::Candidates { query, top_n } => {
            let top_n = top_n.unwrap_or(cli.settings.top_n);
            handle_candidates(cli.settings.load_catalog()?, &query, top_n)
        }
        Commands::Products { category } => {
            handle_products(cli.settings.load_catalog()?, category.as_deref())
        }
    }

    Ok(())
}

/// Handle the 'ask' command
async fn handle_ask(settings: &Settings, query: &str) -> Result<()> {
    let orchestrator = settings.build_orchestrator()?;

    let start = Instant::now();
    let response = orchestrator
        .answer_query(query)
        .await
        .context("Failed to answer query")?;

    println!("{}", "Summary:".bold().blue());
    println!("{}\n", response.summary);

    if response.products.is_empty() {
        println!("{}", "No matching products.".yellow());
    } else {
        println!("{}", "Recommended products:".bold().blue());
        for product in &response.products {
            print_product(product);
        }
    }
    println!("\n{} Answered in {:.2?}", "✓".green(), start.elapsed());
    Ok(())
}

/// Handle the 'candidates' command
fn handle_candidates(catalog: Arc<Catalog>, query: &str, top_n: usize) {
    let selector = CandidateSelector::new(catalog);
    let context = retrieval::build_query_context(query);

    println!("{}", format!("Candidates for '{}':", query).bold().blue());
    println!(
        "{}Terms: {}",
        "• ".green(),
        if context.terms.is_empty() {
            "(none)".to_string()
        } else {
            context.terms.join(", ")
        }
    );
    match context.price_ceiling {
        Some(ceiling) => println!("{}Price ceiling: {:.2}", "• ".green(), ceiling),
        None => println!("{}Price ceiling: none", "• ".green()),
    }

    let scored = selector.scored_candidates(query, top_n);
    if scored.is_empty() {
        println!("{}", "No product scored above zero.".yellow());
        return;
    }
    for (rank, candidate) in scored.iter().enumerate() {
        println!(
            "{}. [{}] {} ({}) ${:.2} - Score: {}",
            (rank + 1).to_string().green(),
            candidate.product.id,
            candidate.product.name,
            candidate.product.category,
            candidate.product.price,
            candidate.score
        );
    }
}

/// Handle the 'products' command
fn handle_products(catalog: Arc<Catalog>, category: Option<&str>) {
    let selector = CandidateSelector::new(catalog.clone());
    let products = selector.list_all(category);

    println!("{}", products_heading(&catalog, category).bold().blue());
    for product in &products {
        print_product(product);
    }
    println!("{} products", products.len());
}

/// Heading for the product listing; an empty category lists everything
fn products_heading(catalog: &Catalog, category: Option<&str>) -> String {
    match category.filter(|c| !c.is_empty()) {
        Some(c) => format!("Products in '{}':", c),
        None => format!("All products ({} categories):", catalog.categories().len()),
    }
}

/// Print one product line
fn print_product(product: &Product) {
    println!(
        "  {} {} ({}) ${:.2} [{}]",
        format!("#{}", product.id).cyan(),
        product.name.bold(),
        product.category,
        product.price,
        product.tags.join(", ")
    );
}
