//! CLI entry point for inkpress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(version)]
#[command(about = "Markdown content repository for a category-driven blog", long_about = None)]
struct Cli {
    /// Set the site directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts (newest first) or categories
    List {
        /// Type of content to list (post, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post by slug
    Show {
        /// Post slug, e.g. web-development/react-best-practices
        slug: String,
    },

    /// List posts in a category
    Category {
        /// Category name or URL segment, e.g. web-development
        name: String,
    },

    /// Search post titles, excerpts and categories
    Search {
        query: String,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category; also used as the post's sub-directory
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Author (defaults to the configured author)
        #[arg(short, long)]
        author: Option<String>,
    },

    /// Serve the JSON API
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "inkpress=debug,info"
    } else {
        "inkpress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let site = inkpress::Inkpress::new(&base_dir)?;

    match cli.command {
        Commands::List { r#type } => {
            inkpress::commands::list::run(&site, &r#type).await?;
        }

        Commands::Show { slug } => {
            inkpress::commands::show::run(&site, &slug).await?;
        }

        Commands::Category { name } => {
            inkpress::commands::list::category(&site, &name).await?;
        }

        Commands::Search { query } => {
            inkpress::commands::list::search(&site, &query).await?;
        }

        Commands::New {
            title,
            category,
            author,
        } => {
            tracing::info!("Creating new post with title: {}", title);
            let path = inkpress::commands::new::create_post(
                &site,
                &title,
                category.as_deref(),
                author.as_deref(),
            )?;
            println!("Created: {:?}", path);
        }

        Commands::Server { port, ip } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            inkpress::server::start(&site, &ip, port).await?;
        }
    }

    Ok(())
}
