// Text, JSON and Graphviz renderings of the catalog views

use crate::category::{CategoryIndex, CategoryTree};
use crate::error::Result;
use crate::graph::{CategoryGraph, RelationshipEdge};
use crate::model::Book;
use crate::recommend::{CrossRecommendation, RecommendationEngine};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const BOOK_SEPARATOR: &str = "----------------------------------------";
const TREE_SEPARATOR: &str = "------------------------";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Dot,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCount {
    pub category: String,
    pub books: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdgeData {
    pub from: String,
    pub to: String,
    pub weight: u8,
    pub label: String,
}

impl From<&RelationshipEdge> for GraphEdgeData {
    fn from(edge: &RelationshipEdge) -> Self {
        Self {
            from: edge.from.clone(),
            to: edge.to.clone(),
            weight: edge.weight,
            label: edge.label().to_string(),
        }
    }
}

/// Everything "Show Category Analytics" reports on.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsReport {
    pub total_books: usize,
    pub statistics: Vec<CategoryCount>,
    pub relationships: Vec<GraphEdgeData>,
    pub cross_recommendations: Vec<CrossRecommendation>,
    #[serde(skip)]
    graph: CategoryGraph,
}

impl AnalyticsReport {
    pub fn gather(books: &[Book]) -> Self {
        let index = CategoryIndex::build(books);
        let graph = CategoryGraph::build(&index.categories());
        let cross_recommendations = RecommendationEngine::new(books).also_enjoy(&graph);

        Self {
            total_books: books.len(),
            statistics: index
                .counts()
                .into_iter()
                .map(|(category, books)| CategoryCount {
                    category: category.to_string(),
                    books,
                })
                .collect(),
            relationships: graph.edges().iter().map(GraphEdgeData::from).collect(),
            cross_recommendations,
            graph,
        }
    }

    pub fn graph(&self) -> &CategoryGraph {
        &self.graph
    }
}

pub fn render_book_list(books: &[Book]) -> String {
    let mut report = String::new();
    report.push_str("\nLibrary Books:\n");
    report.push_str(BOOK_SEPARATOR);
    report.push('\n');
    for book in books {
        report.push_str(&format!("Title: {}\n", book.title));
        report.push_str(&format!("Author: {}\n", book.author));
        report.push_str(&format!("ISBN: {}\n", book.isbn));
        report.push_str(&format!("Status: {}\n", book.status()));
        report.push_str(&format!("Category: {}\n", book.category));
        report.push_str(BOOK_SEPARATOR);
        report.push('\n');
    }
    report
}

pub fn render_category_list(categories: &[&str]) -> String {
    let mut report = String::from("\nAvailable Categories:\n");
    for category in categories {
        report.push_str(&format!("- {}\n", category));
    }
    report
}

pub fn render_category_search(category: &str, books: &[&Book]) -> String {
    let mut report = String::new();
    report.push_str(&format!("\nBooks in category '{}':\n", category));
    report.push_str(BOOK_SEPARATOR);
    report.push('\n');

    if books.is_empty() {
        report.push_str(&format!("No books found in category '{}'\n", category));
        return report;
    }

    for book in books {
        report.push_str(&format!("Title: {}\n", book.title));
        report.push_str(&format!("Author: {}\n", book.author));
        report.push_str(&format!("ISBN: {}\n", book.isbn));
        report.push_str(&format!("Status: {}\n", book.status()));
        report.push_str(BOOK_SEPARATOR);
        report.push('\n');
    }
    report
}

pub fn render_category_tree(tree: &CategoryTree) -> String {
    let mut report = String::new();
    report.push_str("\nLibrary Books by Category:\n");
    report.push_str("========================\n");
    for node in &tree.root.children {
        report.push_str(&node.render(0));
        report.push_str(TREE_SEPARATOR);
        report.push('\n');
    }
    report
}

pub fn render_category_statistics(statistics: &[CategoryCount]) -> String {
    let mut report = String::new();
    report.push_str("Category Statistics:\n");
    report.push_str("===================\n");
    for entry in statistics {
        report.push_str(&format!("{}: {} books\n", entry.category, entry.books));
    }
    report.push('\n');
    report
}

pub fn render_relationship_graph(graph: &CategoryGraph) -> String {
    let mut report = String::new();
    report.push_str("Category Relationships:\n");
    report.push_str("=====================\n");
    for (category, edges) in graph.iter().filter(|(_, edges)| !edges.is_empty()) {
        report.push_str(&format!("{} is connected to:\n", category));
        for edge in edges {
            report.push_str(&format!("  - {} ({})\n", edge.to, edge.label()));
        }
        report.push('\n');
    }
    report
}

pub fn render_cross_recommendations(recommendations: &[CrossRecommendation]) -> String {
    let mut report = String::new();
    report.push_str("Sample Cross-Category Recommendations:\n");
    report.push_str("===================================\n");
    for block in recommendations {
        report.push_str(&format!("If you like {}, you might also enjoy:\n", block.category));
        for suggestion in &block.suggestions {
            report.push_str(&format!("  - {}\n", suggestion));
        }
        report.push('\n');
    }
    report
}

/// Numbered listing for a recommendation walk.
pub fn render_recommendations(start: &str, titles: &[String]) -> String {
    let mut report = String::new();
    report.push_str(&format!(
        "\nRecommended Books (based on category '{}'):\n",
        start
    ));
    report.push_str("=================================================\n");
    if titles.is_empty() {
        report.push_str("No recommendations found.\n");
    } else {
        for (idx, title) in titles.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", idx + 1, title));
        }
    }
    report
}

pub fn generate_text_report(report: &AnalyticsReport) -> String {
    let mut out = String::from("\nAnalyzing Library Categories...\n\n");
    out.push_str(&render_category_statistics(&report.statistics));
    out.push_str(&render_relationship_graph(report.graph()));
    out.push_str(&render_cross_recommendations(&report.cross_recommendations));
    out
}

pub fn generate_json_report(report: &AnalyticsReport) -> Result<String> {
    let json_report = serde_json::json!({
        "report": {
            "metadata": {
                "generator": "Libris",
                "version": env!("CARGO_PKG_VERSION"),
                "generated_at": chrono::Utc::now().to_rfc3339(),
                "format": "json"
            },
            "summary": {
                "total_books": report.total_books,
                "total_categories": report.statistics.len(),
                "total_relationships": report.relationships.len()
            },
            "statistics": report.statistics,
            "relationships": report.relationships,
            "cross_recommendations": report.cross_recommendations
        }
    });

    Ok(serde_json::to_string_pretty(&json_report)?)
}

pub fn generate_report(report: &AnalyticsReport, format: &ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(report)),
        ReportFormat::Json => generate_json_report(report),
        ReportFormat::Dot => Ok(report.graph().to_dot()),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
