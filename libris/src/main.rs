use clap::ArgMatches;
use colored::Colorize;
use commands::command_argument_builder;
use libris::handlers::*;
use libris_core::print_banner;
use tracing::Level;

mod commands;

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();
    let quiet = chosen_command.get_flag("quiet");
    let verbose = chosen_command.get_flag("verbose");

    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Show banner unless --quiet flag is set
    if !quiet {
        print_banner();
    }

    if let Err(e) = dispatch(&chosen_command) {
        eprintln!("{} {:#}", "✗".red().bold(), e);
        std::process::exit(1);
    }
}

fn dispatch(matches: &ArgMatches) -> anyhow::Result<()> {
    let store = store_from_args(matches);

    match matches.subcommand() {
        // No subcommand falls through to the interactive menu
        None | Some(("menu", _)) => handle_menu(&store),
        Some(("init", args)) => handle_init(args, &store),
        Some(("books", args)) => handle_books(args, &store),
        Some(("add-book", args)) => handle_add_book(args, &store),
        Some(("remove-book", args)) => handle_remove_book(args, &store),
        Some(("add-borrower", args)) => handle_add_borrower(args, &store),
        Some(("borrow", args)) => handle_borrow(args, &store),
        Some(("return", args)) => handle_return(args, &store),
        Some(("tree", _)) => handle_tree(&store),
        Some(("search", args)) => handle_search(args, &store),
        Some(("analyze", args)) => handle_analyze(args, &store),
        Some(("recommend", args)) => handle_recommend(args, &store),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);
