// Tests for category grouping and the display tree

use libris_core::report::render_category_tree;
use libris_core::{Book, CategoryIndex, CategoryTree};
use std::collections::BTreeSet;

fn sample_books() -> Vec<Book> {
    vec![
        Book::new("Dune", "Frank Herbert", "100", "Science Fiction"),
        Book::new("The Hobbit", "J.R.R. Tolkien", "101", "Fantasy"),
        Book::new("Ulysses", "James Joyce", "102", "Fiction"),
        Book::new("Mistborn", "Brandon Sanderson", "103", "Fantasy").with_availability(false),
        Book::new("Emma", "Jane Austen", "104", "Romance"),
    ]
}

// ============================================================================
// Category Index Tests
// ============================================================================

#[test]
fn test_index_groups_by_category() {
    let books = sample_books();
    let index = CategoryIndex::build(&books);

    let fantasy: Vec<&str> = index
        .books("Fantasy")
        .iter()
        .map(|b| b.title.as_str())
        .collect();
    assert_eq!(fantasy, vec!["The Hobbit", "Mistborn"]);
    assert_eq!(index.books("Fiction").len(), 1);
}

#[test]
fn test_index_category_set() {
    let books = sample_books();
    let index = CategoryIndex::build(&books);

    let expected: BTreeSet<&str> = ["Fantasy", "Fiction", "Romance", "Science Fiction"]
        .into_iter()
        .collect();
    assert_eq!(index.categories(), expected);
    assert!(index.contains("Romance"));
    assert!(!index.contains("Mystery"));
}

#[test]
fn test_index_counts() {
    let books = sample_books();
    let index = CategoryIndex::build(&books);

    let counts: Vec<(&str, usize)> = index.counts().into_iter().collect();
    assert_eq!(
        counts,
        vec![
            ("Fantasy", 2),
            ("Fiction", 1),
            ("Romance", 1),
            ("Science Fiction", 1)
        ]
    );
}

#[test]
fn test_index_empty_catalog() {
    let books: Vec<Book> = Vec::new();
    let index = CategoryIndex::build(&books);

    assert!(index.is_empty());
    assert!(index.categories().is_empty());
    assert!(index.books("Fiction").is_empty());
}

// ============================================================================
// Category Tree Tests
// ============================================================================

#[test]
fn test_tree_children_match_index() {
    let books = sample_books();
    let index = CategoryIndex::build(&books);
    let tree = CategoryTree::build(&index);

    let children: BTreeSet<&str> = tree.categories().collect();
    assert_eq!(children, index.categories());
    assert_eq!(tree.root.category, CategoryTree::ROOT);
}

#[test]
fn test_tree_children_strictly_ascending() {
    let books = sample_books();
    let tree = CategoryTree::build(&CategoryIndex::build(&books));

    let names: Vec<&str> = tree.categories().collect();
    assert!(names.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_tree_nodes_hold_their_own_books() {
    let books = sample_books();
    let tree = CategoryTree::build(&CategoryIndex::build(&books));

    for node in &tree.root.children {
        assert!(node.books.iter().all(|b| b.category == node.category));
        assert!(node.children.is_empty());
    }
    let fantasy = tree.root.child("Fantasy").unwrap();
    assert_eq!(fantasy.books[0].title, "The Hobbit");
    assert_eq!(fantasy.books[1].title, "Mistborn");
}

#[test]
fn test_tree_rebuild_is_identical() {
    let books = sample_books();
    let first = CategoryTree::build(&CategoryIndex::build(&books));
    let second = CategoryTree::build(&CategoryIndex::build(&books));

    assert_eq!(first, second);
}

#[test]
fn test_tree_empty_catalog() {
    let books: Vec<Book> = Vec::new();
    let tree = CategoryTree::build(&CategoryIndex::build(&books));

    assert!(tree.root.children.is_empty());
}

// ============================================================================
// Tree Rendering Tests
// ============================================================================

#[test]
fn test_render_category_tree() {
    let books = sample_books();
    let tree = CategoryTree::build(&CategoryIndex::build(&books));

    let rendered = render_category_tree(&tree);

    assert!(rendered.starts_with("\nLibrary Books by Category:\n"));
    assert!(rendered.contains(
        "Category: Fantasy\nBooks:\n    - The Hobbit by J.R.R. Tolkien (ISBN: 101) [Available]\n    - Mistborn by Brandon Sanderson (ISBN: 103) [Borrowed]\n------------------------\n"
    ));

    let fantasy = rendered.find("Category: Fantasy").unwrap();
    let fiction = rendered.find("Category: Fiction").unwrap();
    let sci_fi = rendered.find("Category: Science Fiction").unwrap();
    assert!(fantasy < fiction && fiction < sci_fi);
}
