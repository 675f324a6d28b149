// Category-driven book recommendations

use crate::category::CategoryIndex;
use crate::error::{CatalogError, Result};
use crate::graph::CategoryGraph;
use crate::model::Book;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// Related categories followed by the recursive walk, in visiting order.
/// Kept separate from the analytics relationship table.
pub const RECOMMENDATION_ADJACENCY: &[(&str, &[&str])] = &[
    ("Fiction", &["Fantasy", "Mystery", "Romance"]),
    ("Fantasy", &["Fiction", "Science Fiction"]),
    ("Science Fiction", &["Fantasy", "Fiction"]),
    ("Technical", &["Science Fiction"]),
];

/// The start category plus two hops.
pub const MAX_DEPTH: usize = 3;

/// Suggestions sampled per source category in the "also enjoy" listing.
pub const CROSS_CATEGORY_LIMIT: usize = 2;

pub fn related_categories(category: &str) -> &'static [&'static str] {
    RECOMMENDATION_ADJACENCY
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, related)| *related)
        .unwrap_or(&[])
}

/// "If you like X, you might also enjoy" block for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossRecommendation {
    pub category: String,
    /// "title (category)" entries, sorted
    pub suggestions: Vec<String>,
}

#[derive(Debug, Default)]
struct RecommendationState {
    visited: HashSet<String>,
    titles: Vec<String>,
}

pub struct RecommendationEngine<'a> {
    books: &'a [Book],
    index: CategoryIndex<'a>,
}

impl<'a> RecommendationEngine<'a> {
    pub fn new(books: &'a [Book]) -> Self {
        Self {
            books,
            index: CategoryIndex::build(books),
        }
    }

    /// Titles of available books reachable from `start`, depth-first.
    pub fn recommend(&self, start: &str) -> Result<Vec<String>> {
        if !self.index.contains(start) {
            return Err(CatalogError::CategoryNotFound(start.to_string()));
        }

        let mut state = RecommendationState::default();
        self.walk(start, 0, &mut state);
        debug!(
            "Recommendation walk from {} visited {} categories",
            start,
            state.visited.len()
        );
        Ok(state.titles)
    }

    fn walk(&self, category: &str, depth: usize, state: &mut RecommendationState) {
        if depth >= MAX_DEPTH || state.visited.contains(category) {
            return;
        }
        state.visited.insert(category.to_string());
        debug!("Visiting {} at depth {}", category, depth);

        state.titles.extend(
            self.index
                .books(category)
                .iter()
                .filter(|b| b.available)
                .map(|b| b.title.clone()),
        );

        for related in related_categories(category) {
            self.walk(related, depth + 1, state);
        }
    }

    /// Samples available books from each category's graph neighbours.
    pub fn also_enjoy(&self, graph: &CategoryGraph) -> Vec<CrossRecommendation> {
        graph
            .iter()
            .filter(|(_, edges)| !edges.is_empty())
            .map(|(category, edges)| {
                let mut suggestions = BTreeSet::new();
                'edges: for edge in edges {
                    for book in self.books {
                        if suggestions.len() >= CROSS_CATEGORY_LIMIT {
                            break 'edges;
                        }
                        if book.category == edge.to && book.available {
                            suggestions.insert(format!("{} ({})", book.title, edge.to));
                        }
                    }
                }
                CrossRecommendation {
                    category: category.to_string(),
                    suggestions: suggestions.into_iter().collect(),
                }
            })
            .collect()
    }
}
