use std::collections::HashSet;

use thiserror::Error;

pub const MISSING_VALUE: &str = "NA";

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("duplicate node id {0:?}")]
    DuplicateId(String),
    #[error("edge {index} references unknown node id {id:?}")]
    DanglingReference { index: usize, id: String },
}

#[derive(Clone, Debug)]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    pub title: String,
    pub description: String,
    pub links: Vec<String>,
    pub attributes: Vec<(String, String)>,
}

impl NodeRecord {
    pub fn attribute_value(&self, key: &str) -> &str {
        self.attributes
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
            .unwrap_or(MISSING_VALUE)
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.label
        } else {
            &self.title
        }
    }
}

#[derive(Clone, Debug)]
pub struct UnresolvedEdge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub description: String,
    pub links: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct EdgeRecord {
    pub source: usize,
    pub target: usize,
    pub label: String,
    pub description: String,
    pub links: Vec<String>,
}

#[derive(Clone, Debug)]
pub struct NetworkGraph {
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<EdgeRecord>,
}

impl NetworkGraph {
    pub fn build(
        nodes: Vec<NodeRecord>,
        unresolved_edges: Vec<UnresolvedEdge>,
    ) -> Result<Self, LoadError> {
        let mut seen = HashSet::with_capacity(nodes.len());
        for node in &nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(LoadError::DuplicateId(node.id.clone()));
            }
        }

        let mut edges = Vec::with_capacity(unresolved_edges.len());
        for (index, edge) in unresolved_edges.into_iter().enumerate() {
            let source = Self::resolve_endpoint(&nodes, index, edge.source)?;
            let target = Self::resolve_endpoint(&nodes, index, edge.target)?;
            edges.push(EdgeRecord {
                source,
                target,
                label: edge.label,
                description: edge.description,
                links: edge.links,
            });
        }

        Ok(Self { nodes, edges })
    }

    fn resolve_endpoint(
        nodes: &[NodeRecord],
        index: usize,
        id: String,
    ) -> Result<usize, LoadError> {
        nodes
            .iter()
            .position(|node| node.id == id)
            .ok_or(LoadError::DanglingReference { index, id })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edge_between(&self, source: usize, target: usize) -> Option<&EdgeRecord> {
        self.edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
    }

    pub fn edge_title(&self, edge: &EdgeRecord) -> String {
        format!(
            "{} → {}",
            self.nodes[edge.source].label, self.nodes[edge.target].label
        )
    }

    pub fn attribute_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for node in &self.nodes {
            for (key, _) in &node.attributes {
                if !keys.iter().any(|existing| existing == key) {
                    keys.push(key.clone());
                }
            }
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, attrs: &[(&str, &str)]) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            label: id.to_uppercase(),
            title: String::new(),
            description: format!("about {id}"),
            links: Vec::new(),
            attributes: attrs
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        }
    }

    fn edge(source: &str, target: &str) -> UnresolvedEdge {
        UnresolvedEdge {
            source: source.to_string(),
            target: target.to_string(),
            label: String::new(),
            description: String::new(),
            links: Vec::new(),
        }
    }

    #[test]
    fn build_resolves_edges_to_node_indices() {
        let graph = NetworkGraph::build(
            vec![node("a", &[]), node("b", &[]), node("c", &[])],
            vec![edge("a", "c"), edge("c", "b")],
        )
        .unwrap();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edges[0].source, 0);
        assert_eq!(graph.edges[0].target, 2);
        assert_eq!(graph.edges[1].source, 2);
        assert_eq!(graph.edges[1].target, 1);
    }

    #[test]
    fn build_preserves_input_order() {
        let graph = NetworkGraph::build(
            vec![node("z", &[]), node("m", &[]), node("a", &[])],
            Vec::new(),
        )
        .unwrap();

        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn build_rejects_dangling_edge_reference() {
        let error = NetworkGraph::build(
            vec![node("a", &[]), node("b", &[])],
            vec![edge("a", "b"), edge("b", "ghost")],
        )
        .unwrap_err();

        assert_eq!(
            error,
            LoadError::DanglingReference {
                index: 1,
                id: "ghost".to_string(),
            }
        );
    }

    #[test]
    fn build_rejects_duplicate_node_id() {
        let error =
            NetworkGraph::build(vec![node("a", &[]), node("a", &[])], Vec::new()).unwrap_err();
        assert_eq!(error, LoadError::DuplicateId("a".to_string()));
    }

    #[test]
    fn attribute_value_falls_back_to_missing_marker() {
        let record = node("a", &[("Kind", "service")]);
        assert_eq!(record.attribute_value("Kind"), "service");
        assert_eq!(record.attribute_value("Tier"), MISSING_VALUE);
    }

    #[test]
    fn attribute_keys_keep_first_encountered_order() {
        let graph = NetworkGraph::build(
            vec![
                node("a", &[("Kind", "x"), ("Tier", "1")]),
                node("b", &[("Zone", "eu"), ("Kind", "y")]),
            ],
            Vec::new(),
        )
        .unwrap();

        assert_eq!(graph.attribute_keys(), vec!["Kind", "Tier", "Zone"]);
    }

    #[test]
    fn edge_title_joins_endpoint_labels() {
        let graph = NetworkGraph::build(
            vec![node("x", &[]), node("y", &[])],
            vec![edge("x", "y")],
        )
        .unwrap();

        assert_eq!(graph.edge_title(&graph.edges[0]), "X → Y");
        assert!(graph.edge_between(0, 1).is_some());
        assert!(graph.edge_between(1, 0).is_none());
    }
}
