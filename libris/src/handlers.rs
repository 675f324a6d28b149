use crate::menu::run_menu;
use anyhow::Context;
use clap::ArgMatches;
use colored::Colorize;
use libris_core::report::{
    AnalyticsReport, ReportFormat, generate_report, render_book_list, render_category_search,
    render_category_tree, render_recommendations, save_report,
};
use libris_core::{
    Book, Borrower, CatalogError, CatalogStore, CategoryIndex, CategoryTree, Library,
    LibraryConfig, RecommendationEngine,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::debug;

/// Expands `~` in the configured data directory.
pub fn resolve_data_dir(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

pub fn store_from_args(args: &ArgMatches) -> CatalogStore {
    let raw = args
        .get_one::<String>("data-dir")
        .map(String::as_str)
        .unwrap_or(".");
    let data_dir = resolve_data_dir(raw);
    debug!("Using data directory {}", data_dir.display());
    CatalogStore::new(LibraryConfig::new(data_dir))
}

fn load_library(store: &CatalogStore) -> anyhow::Result<Library> {
    store.load().with_context(|| {
        format!(
            "Failed to load catalog from {}",
            store.config().data_dir.display()
        )
    })
}

fn save_library(store: &CatalogStore, library: &Library) -> anyhow::Result<()> {
    store.save(library).with_context(|| {
        format!(
            "Failed to save catalog to {}",
            store.config().data_dir.display()
        )
    })
}

fn required<'a>(args: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    args.get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing required argument '{}'", name))
}

fn print_divider() {
    println!("{}", "═".repeat(60).bright_blue().bold());
}

fn print_prompt(msg: &str) -> io::Result<String> {
    print!("{} ", msg.bright_cyan().bold());
    io::stdout().flush()?;
    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    Ok(response.trim().to_lowercase())
}

pub fn handle_init(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let force = args.get_flag("force");
    let config = store.config();

    print_divider();
    println!("{}", "  LIBRIS INITIALIZATION".bright_white().bold());
    print_divider();
    println!();
    println!(
        "{} Target: {}",
        "→".blue(),
        config.data_dir.display().to_string().bright_white()
    );
    println!();

    if store.exists() && !force {
        println!("{}", "⚠ WARNING".yellow().bold());
        println!("Catalog files already exist:");
        for path in [config.books_path(), config.borrowers_path()] {
            if path.exists() {
                println!(
                    "  {} {}",
                    "•".yellow(),
                    path.display().to_string().bright_white()
                );
            }
        }
        println!();
        println!("{}", "This operation will overwrite existing files.".yellow());

        let response = print_prompt("Do you want to continue? [y/N]:")?;
        println!();

        if response != "y" && response != "yes" {
            println!("{} Initialization cancelled.", "✗".red().bold());
            return Ok(());
        }
    }

    store.init().with_context(|| {
        format!("Failed to initialize {}", config.data_dir.display())
    })?;

    println!("{} Books: {}", "✓".green().bold(), config.books_path().display());
    println!(
        "{} Borrowers: {}",
        "✓".green().bold(),
        config.borrowers_path().display()
    );
    println!();
    print_divider();
    println!("{}", "  INITIALIZATION COMPLETE".green().bold());
    print_divider();
    Ok(())
}

pub fn handle_menu(store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();
    run_menu(&mut library, store, &mut input, &mut output)
}

pub fn handle_books(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    match args.get_one::<String>("sort").map(String::as_str) {
        Some("title") => {
            library.sort_books_by_title();
            save_library(store, &library)?;
            println!("Books sorted by title!");
        }
        Some("author") => {
            library.sort_books_by_author();
            save_library(store, &library)?;
            println!("Books sorted by author!");
        }
        _ => {}
    }
    print!("{}", render_book_list(library.books()));
    Ok(())
}

pub fn handle_add_book(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    let book = Book::new(
        required(args, "title")?,
        required(args, "author")?,
        required(args, "isbn")?,
        required(args, "category")?,
    );
    library.add_book(book)?;
    save_library(store, &library)?;
    println!("{} Book added successfully!", "✓".green().bold());
    Ok(())
}

pub fn handle_remove_book(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    library.remove_book(required(args, "isbn")?)?;
    save_library(store, &library)?;
    println!("{} Book removed successfully!", "✓".green().bold());
    Ok(())
}

pub fn handle_add_borrower(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    library.add_borrower(Borrower::new(required(args, "id")?, required(args, "name")?))?;
    save_library(store, &library)?;
    println!("{} Borrower added successfully!", "✓".green().bold());
    Ok(())
}

pub fn handle_borrow(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    library
        .borrow_book(required(args, "isbn")?, required(args, "borrower")?)
        .context("Failed to borrow book. Please check availability and borrower ID.")?;
    save_library(store, &library)?;
    println!("{} Book borrowed successfully!", "✓".green().bold());
    Ok(())
}

pub fn handle_return(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let mut library = load_library(store)?;
    library
        .return_book(required(args, "isbn")?, required(args, "borrower")?)
        .context("Failed to return book. Please check ISBN and borrower ID.")?;
    save_library(store, &library)?;
    println!("{} Book returned successfully!", "✓".green().bold());
    Ok(())
}

pub fn handle_tree(store: &CatalogStore) -> anyhow::Result<()> {
    let library = load_library(store)?;
    let tree = CategoryTree::build(&CategoryIndex::build(library.books()));
    print!("{}", render_category_tree(&tree));
    Ok(())
}

pub fn handle_search(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let library = load_library(store)?;
    let category = required(args, "CATEGORY")?;
    print!(
        "{}",
        render_category_search(category, &library.books_in_category(category))
    );
    Ok(())
}

pub fn handle_analyze(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let library = load_library(store)?;
    let format_name = args
        .get_one::<String>("format")
        .map(String::as_str)
        .unwrap_or("text");
    let format = ReportFormat::from_str(format_name)
        .ok_or_else(|| CatalogError::InvalidFormat(format_name.to_string()))?;

    let report = generate_report(&AnalyticsReport::gather(library.books()), &format)?;

    match args.get_one::<PathBuf>("output") {
        Some(path) => {
            save_report(&report, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "{} Report saved to {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
        None => print!("{}", report),
    }
    Ok(())
}

/// Writes the numbered recommendation listing, or "Category not found!".
pub fn recommendation_listing(books: &[Book], start: &str) -> String {
    match RecommendationEngine::new(books).recommend(start) {
        Ok(titles) => render_recommendations(start, &titles),
        Err(CatalogError::CategoryNotFound(_)) => "Category not found!\n".to_string(),
        Err(e) => format!("{}\n", e),
    }
}

pub fn handle_recommend(args: &ArgMatches, store: &CatalogStore) -> anyhow::Result<()> {
    let library = load_library(store)?;
    let start = required(args, "CATEGORY")?;
    print!("{}", recommendation_listing(library.books(), start));
    Ok(())
}
