pub mod handlers;
pub mod menu;

// Re-export the pieces the binary and tests reach for most
pub use handlers::{recommendation_listing, resolve_data_dir, store_from_args};
pub use menu::{MenuChoice, run_menu};
