//! Bookshelf - command-line client for the book catalog API

use bookshelf_client::api::models::Book;
use bookshelf_client::auth::LoginForm;
use bookshelf_client::books::BookList;
use bookshelf_client::core::{self, config::ConfigArgs};
use bookshelf_client::AppContext;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "bookshelf")]
#[command(about = "Book catalog client", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and remember the session
    Login { username: String, password: String },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Work with the catalog
    #[command(subcommand)]
    Books(BooksCommand),
}

#[derive(Debug, Subcommand)]
enum BooksCommand {
    /// List books, loading further pages like an infinite scroll
    List {
        /// Maximum number of pages to load
        #[arg(long, default_value_t = 1)]
        pages: u32,
        /// Only books of this genre
        #[arg(long)]
        genre: Option<String>,
    },
    /// Show one book
    Get { id: i64 },
    /// Create a book from a JSON object
    Create { json: String },
    /// Replace a book with a JSON object
    Update { id: i64, json: String },
    /// Delete a book
    Delete { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match core::Config::load(&cli.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            // Print error to stderr since logging isn't initialized yet
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let _logger = match core::Logger::init(&config.logging) {
        Ok(logger) => logger,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            return Err(e);
        }
    };

    info!("Starting bookshelf v{}", bookshelf_client::VERSION);

    let ctx = AppContext::new(&config)?;

    match cli.command {
        Command::Login { username, password } => {
            let mut form = LoginForm::with_credentials(username, password);
            match form.submit(&ctx.session).await {
                Ok(user) => println!("Logged in as {} ({:?})", user.username, user.role),
                Err(e) => {
                    let errors = form.errors();
                    for message in [&errors.username, &errors.password].into_iter().flatten() {
                        eprintln!("{}", message);
                    }
                    return Err(e.into());
                }
            }
        }
        Command::Logout => {
            ctx.session.logout();
            println!("Logged out");
        }
        Command::Whoami => match ctx.session.current_user_value() {
            Some(user) => println!("{} (id {}, {:?})", user.username, user.id, user.role),
            None => println!("Not logged in"),
        },
        Command::Books(command) => run_books(&ctx, command).await?,
    }

    Ok(())
}

async fn run_books(ctx: &AppContext, command: BooksCommand) -> Result<()> {
    match command {
        BooksCommand::List { pages, genre } => {
            let list = BookList::with_genre(ctx.catalog.clone(), genre);
            list.load_initial().await?;

            for _ in 1..pages {
                match list.near_bottom() {
                    Some(handle) => handle.await?,
                    None => break,
                }
            }

            for book in list.books() {
                println!("{}", serde_json::to_string(&book)?);
            }
            if let Some(meta) = list.snapshot().meta() {
                eprintln!(
                    "page {} of {} items ({} per page)",
                    meta.current_page, meta.total_items, meta.items_per_page
                );
            }
        }
        BooksCommand::Get { id } => {
            let book = ctx.catalog.fetch_one(id).await?;
            println!("{}", serde_json::to_string_pretty(&book)?);
        }
        BooksCommand::Create { json } => {
            let book = parse_book(&json)?;
            let response = ctx.catalog.create(&book).await?;
            println!("{}", response);
        }
        BooksCommand::Update { id, json } => {
            let book = parse_book(&json)?;
            let response = ctx.catalog.update(id, &book).await?;
            println!("{}", response);
        }
        BooksCommand::Delete { id } => {
            let response = ctx.catalog.delete(id).await?;
            println!("{}", response);
        }
    }

    Ok(())
}

fn parse_book(json: &str) -> Result<Book> {
    serde_json::from_str(json).context("Book must be a JSON object")
}
