use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::model::{NodeRecord, UnresolvedEdge};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    nodes: Vec<RawNode>,
    #[serde(default)]
    edges: Vec<RawEdge>,
}

#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    links: String,
    #[serde(flatten)]
    attributes: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawEdge {
    source: String,
    target: String,
    #[serde(default)]
    label: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    links: String,
}

fn split_links(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

fn string_attributes(attributes: Map<String, Value>) -> Vec<(String, String)> {
    attributes
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            _ => None,
        })
        .collect()
}

pub(super) fn parse_network_json(raw: &str) -> Result<(Vec<NodeRecord>, Vec<UnresolvedEdge>)> {
    let dataset: RawDataset =
        serde_json::from_str(raw).context("invalid network dataset JSON")?;

    let nodes = dataset
        .nodes
        .into_iter()
        .map(|raw_node| {
            let label = if raw_node.label.is_empty() {
                raw_node.id.clone()
            } else {
                raw_node.label
            };
            NodeRecord {
                id: raw_node.id,
                label,
                title: raw_node.title,
                description: raw_node.description,
                links: split_links(&raw_node.links),
                attributes: string_attributes(raw_node.attributes),
            }
        })
        .collect();

    let edges = dataset
        .edges
        .into_iter()
        .map(|raw_edge| UnresolvedEdge {
            source: raw_edge.source,
            target: raw_edge.target,
            label: raw_edge.label,
            description: raw_edge.description,
            links: split_links(&raw_edge.links),
        })
        .collect();

    Ok((nodes, edges))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "nodes": [
            {
                "id": "cache",
                "label": "Cache",
                "title": "Edge cache",
                "description": "Regional cache tier",
                "links": "https://example.org/a https://example.org/b",
                "Resource Type": "Storage",
                "Design Level": "NA"
            },
            {
                "id": "api",
                "Resource Type": "Service"
            }
        ],
        "edges": [
            {
                "source": "api",
                "target": "cache",
                "description": "reads through",
                "links": ""
            }
        ]
    }"#;

    #[test]
    fn parses_nodes_with_flattened_attributes() {
        let (nodes, edges) = parse_network_json(SAMPLE).unwrap();

        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].id, "cache");
        assert_eq!(nodes[0].label, "Cache");
        assert_eq!(
            nodes[0].links,
            vec!["https://example.org/a", "https://example.org/b"]
        );
        assert_eq!(
            nodes[0].attributes,
            vec![
                ("Resource Type".to_string(), "Storage".to_string()),
                ("Design Level".to_string(), "NA".to_string()),
            ]
        );

        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].source, "api");
        assert_eq!(edges[0].target, "cache");
        assert!(edges[0].links.is_empty());
    }

    #[test]
    fn missing_label_falls_back_to_id() {
        let (nodes, _) = parse_network_json(SAMPLE).unwrap();
        assert_eq!(nodes[1].label, "api");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_network_json("{\"nodes\": 7}").is_err());
    }
}
