pub mod catalog;
pub mod category;
pub mod data;
pub mod error;
pub mod graph;
pub mod model;
pub mod recommend;
pub mod report;

pub use catalog::Library;
pub use category::{CategoryIndex, CategoryNode, CategoryTree};
pub use data::{CatalogStore, LibraryConfig};
pub use error::{CatalogError, Result};
pub use graph::{CategoryGraph, RelationshipEdge};
pub use model::{Book, Borrower, Transaction, TransactionKind};
pub use recommend::{CrossRecommendation, RecommendationEngine};

pub fn print_banner() {
    let banner = r#"
    ╔══════════════════════════════════════════╗
    ║   _      _ _          _                  ║
    ║  | |    (_) |__  _ __(_)___              ║
    ║  | |    | | '_ \| '__| / __|             ║
    ║  | |___ | | |_) | |  | \__ \             ║
    ║  |_____||_|_.__/|_|  |_|___/             ║
    ║                                          ║
    ║     Library Management System            ║
    ╚══════════════════════════════════════════╝
    "#;
    println!("{}", banner);
}
