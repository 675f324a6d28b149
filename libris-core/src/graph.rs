// Weighted, undirected relationships between categories

use petgraph::dot::Dot;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::{debug, warn};

/// Category affinities used for analytics. Each pair is linked only when both
/// categories are present in the catalog.
pub const RELATIONSHIP_TABLE: &[(&str, &str, u8)] = &[
    ("Fiction", "Fantasy", 3),
    ("Fiction", "Mystery", 2),
    ("Fiction", "Romance", 2),
    ("Fantasy", "Science Fiction", 3),
    ("Science Fiction", "Fiction", 2),
    ("Technical", "Science Fiction", 1),
];

pub const WEAK: u8 = 1;
pub const MODERATE: u8 = 2;
pub const STRONG: u8 = 3;

/// Display label for an edge weight. Weights outside 1..=3 are labelled
/// "Unknown relationship" rather than dropped from the listing.
pub fn relationship_label(weight: u8) -> &'static str {
    match weight {
        STRONG => "Strong relationship",
        MODERATE => "Moderate relationship",
        WEAK => "Weak relationship",
        _ => "Unknown relationship",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEdge {
    pub from: String,
    pub to: String,
    pub weight: u8,
}

impl RelationshipEdge {
    pub fn label(&self) -> &'static str {
        relationship_label(self.weight)
    }
}

#[derive(Debug, Clone, Default)]
pub struct CategoryGraph {
    adjacency: BTreeMap<String, Vec<RelationshipEdge>>,
    /// Inserted relationships, one per `add_edge` call
    edges: Vec<RelationshipEdge>,
}

impl CategoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links the fixed relationship table against the categories present.
    pub fn build(categories: &BTreeSet<&str>) -> Self {
        let mut graph = Self::new();
        for &(a, b, weight) in RELATIONSHIP_TABLE {
            if categories.contains(a) && categories.contains(b) {
                graph.add_edge(a, b, weight);
            } else {
                debug!("Skipping relationship {} - {}: category missing", a, b);
            }
        }
        graph
    }

    pub fn add_edge(&mut self, a: &str, b: &str, weight: u8) {
        if !(WEAK..=STRONG).contains(&weight) {
            warn!("Relationship {} - {} has unexpected weight {}", a, b, weight);
        }
        self.adjacency
            .entry(a.to_string())
            .or_default()
            .push(RelationshipEdge {
                from: a.to_string(),
                to: b.to_string(),
                weight,
            });
        self.adjacency
            .entry(b.to_string())
            .or_default()
            .push(RelationshipEdge {
                from: b.to_string(),
                to: a.to_string(),
                weight,
            });
        self.edges.push(RelationshipEdge {
            from: a.to_string(),
            to: b.to_string(),
            weight,
        });
    }

    /// Edges incident to `category`, in insertion order.
    pub fn neighbors(&self, category: &str) -> &[RelationshipEdge] {
        self.adjacency
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn weight(&self, a: &str, b: &str) -> Option<u8> {
        self.neighbors(a).iter().find(|e| e.to == b).map(|e| e.weight)
    }

    pub fn contains_category(&self, category: &str) -> bool {
        self.adjacency.contains_key(category)
    }

    /// Ascending by category name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RelationshipEdge])> {
        self.adjacency
            .iter()
            .map(|(c, edges)| (c.as_str(), edges.as_slice()))
    }

    pub fn edges(&self) -> &[RelationshipEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn to_petgraph(&self) -> UnGraph<String, u8> {
        let mut graph = UnGraph::new_undirected();
        let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
        for category in self.adjacency.keys() {
            nodes.insert(category.as_str(), graph.add_node(category.clone()));
        }
        for edge in &self.edges {
            graph.add_edge(nodes[edge.from.as_str()], nodes[edge.to.as_str()], edge.weight);
        }
        graph
    }

    /// Graphviz rendering, edges labelled with their weight.
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::new(&self.to_petgraph()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_is_listed_twice() {
        let mut graph = CategoryGraph::new();
        graph.add_edge("Poetry", "Poetry", 1);
        assert_eq!(graph.neighbors("Poetry").len(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn petgraph_export_has_one_edge_per_relationship() {
        let mut graph = CategoryGraph::new();
        graph.add_edge("Fiction", "Fantasy", 3);
        graph.add_edge("Fantasy", "Science Fiction", 3);

        let exported = graph.to_petgraph();
        assert_eq!(exported.node_count(), 3);
        assert_eq!(exported.edge_count(), 2);
    }
}
