// Category grouping and the display hierarchy built from it

use crate::model::Book;
use std::collections::{BTreeMap, BTreeSet};

/// Books grouped by category, catalog order preserved inside each group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryIndex<'a> {
    groups: BTreeMap<&'a str, Vec<&'a Book>>,
}

impl<'a> CategoryIndex<'a> {
    pub fn build(books: &'a [Book]) -> Self {
        let mut groups: BTreeMap<&'a str, Vec<&'a Book>> = BTreeMap::new();
        for book in books {
            groups.entry(book.category.as_str()).or_default().push(book);
        }
        Self { groups }
    }

    pub fn categories(&self) -> BTreeSet<&'a str> {
        self.groups.keys().copied().collect()
    }

    pub fn contains(&self, category: &str) -> bool {
        self.groups.contains_key(category)
    }

    pub fn books(&self, category: &str) -> &[&'a Book] {
        self.groups.get(category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Book counts per category, ascending by name.
    pub fn counts(&self) -> BTreeMap<&'a str, usize> {
        self.groups.iter().map(|(c, books)| (*c, books.len())).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Book])> {
        self.groups.iter().map(|(c, books)| (*c, books.as_slice()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub category: String,
    pub books: Vec<Book>,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn new(category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            books: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn add_book(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Replaces any existing child with the same category name.
    pub fn add_child(&mut self, child: CategoryNode) {
        match self
            .children
            .iter_mut()
            .find(|c| c.category == child.category)
        {
            Some(existing) => *existing = child,
            None => self.children.push(child),
        }
    }

    pub fn child(&self, category: &str) -> Option<&CategoryNode> {
        self.children.iter().find(|c| c.category == category)
    }

    /// Depth-first, this node first, four spaces of indent per level.
    pub fn render(&self, level: usize) -> String {
        let indent = " ".repeat(level * 4);
        let mut out = String::new();
        out.push_str(&format!("{}Category: {}\n", indent, self.category));
        out.push_str(&format!("{}Books:\n", indent));
        for book in &self.books {
            out.push_str(&format!(
                "{}    - {} by {} (ISBN: {}) [{}]\n",
                indent,
                book.title,
                book.author,
                book.isbn,
                book.status()
            ));
        }
        for child in &self.children {
            out.push_str(&child.render(level + 1));
        }
        out
    }
}

/// Root → category → books view of the catalog. Rebuilt for every display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTree {
    pub root: CategoryNode,
}

impl CategoryTree {
    pub const ROOT: &'static str = "Root";

    pub fn build(index: &CategoryIndex<'_>) -> Self {
        let mut root = CategoryNode::new(Self::ROOT);
        for (category, books) in index.iter() {
            let mut node = CategoryNode::new(category);
            books.iter().for_each(|b| node.add_book((*b).clone()));
            root.add_child(node);
        }
        root.children.sort_by(|a, b| a.category.cmp(&b.category));
        Self { root }
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.root.children.iter().map(|c| c.category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_child_keeps_names_unique() {
        let mut root = CategoryNode::new("Root");
        root.add_child(CategoryNode::new("Fiction"));
        let mut replacement = CategoryNode::new("Fiction");
        replacement.add_book(Book::new("Dune", "Herbert", "1", "Fiction"));
        root.add_child(replacement);

        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].books.len(), 1);
    }

    #[test]
    fn nested_children_are_indented() {
        let mut root = CategoryNode::new("Fiction");
        let mut child = CategoryNode::new("Cozy");
        child.add_book(Book::new("Tea", "Brew", "9", "Cozy").with_availability(false));
        root.add_child(child);

        let rendered = root.render(0);
        assert!(rendered.starts_with("Category: Fiction\nBooks:\n"));
        assert!(rendered.contains("    Category: Cozy\n"));
        assert!(rendered.contains("        - Tea by Brew (ISBN: 9) [Borrowed]\n"));
    }
}
