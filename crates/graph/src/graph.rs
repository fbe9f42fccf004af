use crate::error::{GraphError, Result};
use crate::types::RelationshipGraph;
use biblio_protocol::{GraphEdgePayload, GraphNodePayload, GraphPayload, NodeKind};
use petgraph::dot::{Config, Dot};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

impl RelationshipGraph {
    pub fn node_kind(&self, id: &str) -> Option<NodeKind> {
        self.find_node(id)
            .and_then(|idx| self.get_node(idx))
            .map(|node| node.kind)
    }

    /// Ids of every node of `kind`, in insertion order
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<&str> {
        self.nodes()
            .filter(|(_, node)| node.kind == kind)
            .map(|(_, node)| node.id.as_str())
            .collect()
    }

    /// Neighbors of `node` tagged `kind`
    pub fn neighbors_of_kind(&self, node: NodeIndex, kind: NodeKind) -> Vec<NodeIndex> {
        self.graph
            .neighbors(node)
            .filter(|&n| self.get_node(n).is_some_and(|data| data.kind == kind))
            .collect()
    }

    pub fn degree(&self, id: &str) -> Result<usize> {
        let idx = self.require(id)?;
        Ok(self.graph.edges(idx).count())
    }

    pub fn articles_of_venue(&self, venue: &str) -> Result<Vec<&str>> {
        let idx = self.require(venue)?;
        Ok(self.neighbor_ids(idx, NodeKind::Article))
    }

    pub fn venues_of_article(&self, article: &str) -> Result<Vec<&str>> {
        let idx = self.require(article)?;
        Ok(self.neighbor_ids(idx, NodeKind::Venue))
    }

    pub fn attributes_of_article(&self, article: &str) -> Result<Vec<&str>> {
        let idx = self.require(article)?;
        Ok(self.neighbor_ids(idx, NodeKind::Attribute))
    }

    /// Typed node and edge lists, both in insertion order
    pub fn to_payload(&self) -> GraphPayload {
        let nodes = self
            .nodes()
            .map(|(_, node)| GraphNodePayload {
                id: node.id.clone(),
                kind: node.kind,
            })
            .collect();

        let edges = self
            .graph
            .edge_references()
            .filter_map(|edge| {
                let source = self.get_node(edge.source())?;
                let target = self.get_node(edge.target())?;
                Some(GraphEdgePayload {
                    source: source.id.clone(),
                    target: target.id.clone(),
                })
            })
            .collect();

        GraphPayload { nodes, edges }
    }

    /// Graphviz DOT text for external layout tools
    pub fn to_dot(&self) -> String {
        format!("{}", Dot::with_config(&self.graph, &[Config::EdgeNoLabel]))
    }

    fn require(&self, id: &str) -> Result<NodeIndex> {
        self.find_node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    fn neighbor_ids(&self, idx: NodeIndex, kind: NodeKind) -> Vec<&str> {
        let mut ids: Vec<NodeIndex> = self.neighbors_of_kind(idx, kind);
        // petgraph yields neighbors newest-first
        ids.sort();
        ids.into_iter()
            .filter_map(|n| self.get_node(n).map(|node| node.id.as_str()))
            .collect()
    }
}
