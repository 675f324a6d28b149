use crate::CLAP_STYLING;
use clap::{arg, command};

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("libris")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("libris")
        .about("Library catalog management with category analytics and recommendations")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(arg!(-v --"verbose" "Enable debug logging on stderr").required(false))
        .arg(
            arg!(-d --"data-dir" <PATH>)
                .required(false)
                .help("Directory holding books.csv and borrowers.csv")
                .default_value(".")
                .global(true),
        )
        .subcommand_required(false)
        .subcommand(
            command!("init")
                .about("Creates the data directory with empty catalog files")
                .arg(
                    arg!(-f --"force")
                        .help("Overwrite existing catalog files")
                        .required(false),
                ),
        )
        .subcommand(command!("menu").about("Runs the interactive menu (default)"))
        .subcommand(
            command!("books").about("Lists every book in the catalog").arg(
                arg!(-s --"sort" <FIELD>)
                    .required(false)
                    .help("Sort the catalog before listing (the order is saved)")
                    .value_parser(["title", "author"]),
            ),
        )
        .subcommand(
            command!("add-book")
                .about("Adds a book to the catalog")
                .arg(arg!(-t --"title" <TITLE>).required(true).help("Book title"))
                .arg(arg!(-a --"author" <AUTHOR>).required(true).help("Author name"))
                .arg(arg!(-i --"isbn" <ISBN>).required(true).help("Unique ISBN"))
                .arg(arg!(-c --"category" <CATEGORY>).required(true).help("Category name")),
        )
        .subcommand(
            command!("remove-book")
                .about("Removes a book from the catalog")
                .arg(arg!(-i --"isbn" <ISBN>).required(true).help("ISBN of the book")),
        )
        .subcommand(
            command!("add-borrower")
                .about("Registers a borrower")
                .arg(arg!(--"id" <ID>).required(true).help("Unique borrower ID"))
                .arg(arg!(-n --"name" <NAME>).required(true).help("Borrower name")),
        )
        .subcommand(
            command!("borrow")
                .about("Lends a book to a borrower")
                .arg(arg!(-i --"isbn" <ISBN>).required(true).help("ISBN of the book"))
                .arg(
                    arg!(-b --"borrower" <ID>)
                        .required(true)
                        .help("ID of the borrower"),
                ),
        )
        .subcommand(
            command!("return")
                .about("Returns a borrowed book")
                .arg(arg!(-i --"isbn" <ISBN>).required(true).help("ISBN of the book"))
                .arg(
                    arg!(-b --"borrower" <ID>)
                        .required(true)
                        .help("ID of the borrower"),
                ),
        )
        .subcommand(command!("tree").about("Displays books grouped by category"))
        .subcommand(
            command!("search")
                .about("Lists the books in one category")
                .arg(arg!(<CATEGORY>).required(true).help("Category name")),
        )
        .subcommand(
            command!("analyze")
                .about("Shows category statistics, relationships and cross-category picks")
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json, dot")
                        .value_parser(["text", "json", "dot"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(std::path::PathBuf)),
                ),
        )
        .subcommand(
            command!("recommend")
                .about("Recommends available books starting from a category")
                .arg(arg!(<CATEGORY>).required(true).help("Starting category")),
        )
}
