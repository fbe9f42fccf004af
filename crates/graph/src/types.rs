use biblio_protocol::NodeKind;
use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Node in the relationship graph. Identity is the raw string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
}

impl fmt::Display for GraphNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Type of relationship between nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// Venue published article
    Publishes,

    /// Article carries attribute
    HasAttribute,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationshipType::Publishes => "publishes",
            RelationshipType::HasAttribute => "has_attribute",
        })
    }
}

/// Undirected venue / article / attribute graph
#[derive(Debug, Clone)]
pub struct RelationshipGraph {
    pub graph: UnGraph<GraphNode, RelationshipType>,

    /// Node id -> NodeIndex mapping for fast lookup
    pub node_index: HashMap<String, NodeIndex>,
}

impl RelationshipGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraph::new_undirected(),
            node_index: HashMap::new(),
        }
    }

    /// Add a node, or reuse the existing node with the same id.
    ///
    /// A reused node takes the latest kind, so a title that is also an
    /// attribute value ends up tagged with whichever role was added last.
    pub fn add_node(&mut self, id: &str, kind: NodeKind) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(id) {
            if let Some(node) = self.graph.node_weight_mut(idx) {
                node.kind = kind;
            }
            return idx;
        }

        let idx = self.graph.add_node(GraphNode {
            id: id.to_string(),
            kind,
        });
        self.node_index.insert(id.to_string(), idx);
        idx
    }

    /// Add an edge; an existing edge between the same pair is kept as is
    pub fn add_edge(&mut self, a: NodeIndex, b: NodeIndex, relationship: RelationshipType) {
        if self.graph.find_edge(a, b).is_none() {
            self.graph.add_edge(a, b, relationship);
        }
    }

    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.node_index.get(id).copied()
    }

    pub fn get_node(&self, idx: NodeIndex) -> Option<&GraphNode> {
        self.graph.node_weight(idx)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> {
        self.graph
            .node_indices()
            .filter_map(move |idx| self.graph.node_weight(idx).map(|node| (idx, node)))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for RelationshipGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_id_reuses_node_and_takes_latest_kind() {
        let mut graph = RelationshipGraph::new();
        let first = graph.add_node("Spain", NodeKind::Article);
        let second = graph.add_node("Spain", NodeKind::Attribute);
        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get_node(first).unwrap().kind, NodeKind::Attribute);
    }

    #[test]
    fn duplicate_edges_collapse_in_either_direction() {
        let mut graph = RelationshipGraph::new();
        let venue = graph.add_node("J", NodeKind::Venue);
        let article = graph.add_node("T", NodeKind::Article);
        graph.add_edge(venue, article, RelationshipType::Publishes);
        graph.add_edge(article, venue, RelationshipType::Publishes);
        assert_eq!(graph.edge_count(), 1);
    }
}
