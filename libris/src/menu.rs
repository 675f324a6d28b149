// Interactive console menu

use crate::handlers::recommendation_listing;
use anyhow::Context;
use libris_core::report::{
    AnalyticsReport, generate_text_report, render_book_list, render_category_list,
    render_category_search, render_category_tree,
};
use libris_core::{Book, Borrower, CatalogStore, CategoryIndex, CategoryTree, Library};
use std::io::{BufRead, Write};
use tracing::{info, warn};

pub const MENU: &str = "\nLibrary Management System
1. Add Book
2. Add Borrower
3. Borrow Book
4. Return Book
5. Display Books
6. Sort Books by Title
7. Sort Books by Author
8. Display Books by Category
9. Search Books by Category
10. Show Category Analytics
11. Get Book Recommendations
12. Exit
Enter your choice: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddBook,
    AddBorrower,
    BorrowBook,
    ReturnBook,
    DisplayBooks,
    SortByTitle,
    SortByAuthor,
    DisplayByCategory,
    SearchByCategory,
    CategoryAnalytics,
    Recommendations,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(MenuChoice::AddBook),
            2 => Some(MenuChoice::AddBorrower),
            3 => Some(MenuChoice::BorrowBook),
            4 => Some(MenuChoice::ReturnBook),
            5 => Some(MenuChoice::DisplayBooks),
            6 => Some(MenuChoice::SortByTitle),
            7 => Some(MenuChoice::SortByAuthor),
            8 => Some(MenuChoice::DisplayByCategory),
            9 => Some(MenuChoice::SearchByCategory),
            10 => Some(MenuChoice::CategoryAnalytics),
            11 => Some(MenuChoice::Recommendations),
            12 => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Reads one line after printing `msg`, without its line ending. `None` at
/// end of input.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    msg: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{}", msg)?;
    out.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

/// Runs until the user picks Exit or input ends; both save the catalog.
pub fn run_menu<R: BufRead, W: Write>(
    library: &mut Library,
    store: &CatalogStore,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<()> {
    loop {
        let Some(line) = prompt(input, out, MENU)? else {
            warn!("Input closed, saving and leaving the menu");
            break;
        };

        let Some(choice) = MenuChoice::parse(&line) else {
            writeln!(out, "Invalid choice. Please try again.")?;
            continue;
        };

        if choice == MenuChoice::Exit {
            break;
        }
        if !dispatch(choice, library, input, out)? {
            warn!("Input closed during a menu action");
            break;
        }
    }

    store.save(library).context("Failed to save catalog")?;
    info!(
        "Session ended after {} lending transactions",
        library.recent_transactions().count()
    );
    let mut recent = library.recent_transactions().peekable();
    if recent.peek().is_some() {
        writeln!(out, "\nRecent Transactions:")?;
        for transaction in recent {
            writeln!(out, "  {}", transaction)?;
        }
    }
    writeln!(out, "Thank you for using the Library Management System!")?;
    Ok(())
}

/// Returns `false` when input ran out in the middle of an action.
fn dispatch<R: BufRead, W: Write>(
    choice: MenuChoice,
    library: &mut Library,
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<bool> {
    match choice {
        MenuChoice::AddBook => {
            let Some(book) = read_book(input, out)? else {
                return Ok(false);
            };
            match library.add_book(book) {
                Ok(()) => writeln!(out, "Book added successfully!")?,
                Err(e) => writeln!(out, "Failed to add book: {}", e)?,
            }
        }
        MenuChoice::AddBorrower => {
            let Some(borrower) = read_borrower(input, out)? else {
                return Ok(false);
            };
            match library.add_borrower(borrower) {
                Ok(()) => writeln!(out, "Borrower added successfully!")?,
                Err(e) => writeln!(out, "Failed to add borrower: {}", e)?,
            }
        }
        MenuChoice::BorrowBook => {
            let Some((isbn, borrower_id)) = read_loan(input, out)? else {
                return Ok(false);
            };
            match library.borrow_book(&isbn, &borrower_id) {
                Ok(()) => writeln!(out, "Book borrowed successfully!")?,
                Err(e) => writeln!(
                    out,
                    "Failed to borrow book. Please check availability and borrower ID. ({})",
                    e
                )?,
            }
        }
        MenuChoice::ReturnBook => {
            let Some((isbn, borrower_id)) = read_loan(input, out)? else {
                return Ok(false);
            };
            match library.return_book(&isbn, &borrower_id) {
                Ok(()) => writeln!(out, "Book returned successfully!")?,
                Err(e) => writeln!(
                    out,
                    "Failed to return book. Please check ISBN and borrower ID. ({})",
                    e
                )?,
            }
        }
        MenuChoice::DisplayBooks => write!(out, "{}", render_book_list(library.books()))?,
        MenuChoice::SortByTitle => {
            library.sort_books_by_title();
            writeln!(out, "Books sorted by title!")?;
            write!(out, "{}", render_book_list(library.books()))?;
        }
        MenuChoice::SortByAuthor => {
            library.sort_books_by_author();
            writeln!(out, "Books sorted by author!")?;
            write!(out, "{}", render_book_list(library.books()))?;
        }
        MenuChoice::DisplayByCategory => {
            let tree = CategoryTree::build(&CategoryIndex::build(library.books()));
            write!(out, "{}", render_category_tree(&tree))?;
        }
        MenuChoice::SearchByCategory => {
            print_categories(library, out)?;
            let Some(category) = prompt(input, out, "\nEnter category to search: ")? else {
                return Ok(false);
            };
            let books = library.books_in_category(&category);
            write!(out, "{}", render_category_search(&category, &books))?;
        }
        MenuChoice::CategoryAnalytics => {
            let report = AnalyticsReport::gather(library.books());
            write!(out, "{}", generate_text_report(&report))?;
        }
        MenuChoice::Recommendations => {
            print_categories(library, out)?;
            let Some(start) = prompt(
                input,
                out,
                "\nEnter starting category for recommendations: ",
            )?
            else {
                return Ok(false);
            };
            write!(out, "{}", recommendation_listing(library.books(), &start))?;
        }
        MenuChoice::Exit => {}
    }
    Ok(true)
}

fn print_categories<W: Write>(library: &Library, out: &mut W) -> anyhow::Result<()> {
    let index = CategoryIndex::build(library.books());
    let categories: Vec<&str> = index.categories().into_iter().collect();
    write!(out, "{}", render_category_list(&categories))?;
    Ok(())
}

fn read_book<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> anyhow::Result<Option<Book>> {
    let Some(title) = prompt(input, out, "Enter book title: ")? else {
        return Ok(None);
    };
    let Some(author) = prompt(input, out, "Enter author name: ")? else {
        return Ok(None);
    };
    let Some(isbn) = prompt(input, out, "Enter ISBN: ")? else {
        return Ok(None);
    };
    let Some(category) = prompt(input, out, "Enter category: ")? else {
        return Ok(None);
    };
    Ok(Some(Book::new(title, author, isbn, category)))
}

fn read_borrower<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<Borrower>> {
    let Some(id) = prompt(input, out, "Enter borrower ID: ")? else {
        return Ok(None);
    };
    let Some(name) = prompt(input, out, "Enter borrower name: ")? else {
        return Ok(None);
    };
    Ok(Some(Borrower::new(id, name)))
}

fn read_loan<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> anyhow::Result<Option<(String, String)>> {
    let Some(isbn) = prompt(input, out, "Enter ISBN: ")? else {
        return Ok(None);
    };
    let Some(borrower_id) = prompt(input, out, "Enter borrower ID: ")? else {
        return Ok(None);
    };
    Ok(Some((isbn, borrower_id)))
}
