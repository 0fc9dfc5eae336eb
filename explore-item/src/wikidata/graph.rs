//! On-demand neighborhood graph
//!
//! Builds the depth-1 neighborhood of an entity over a configured relation
//! allow-list, in both directions, capped at a configured node count. This
//! runs only from its own endpoint, never during the default item render.

use super::sparql::{bound, bound_nonempty, SparqlBinding};
use super::{FetchError, WikidataClient};
use explore_common::model::{EdgeDirection, GraphEdge, GraphNode, NeighborhoodGraph};
use explore_common::{Pid, Qid};

fn neighborhood_query(qid: &Qid, relations: &[String], lang: &str, row_limit: usize) -> String {
    let values: Vec<String> = relations.iter().map(|p| format!("wdt:{}", p)).collect();
    format!(
        r#"SELECT ?relation ?other ?otherLabel ?direction WHERE {{
  VALUES ?relation {{ {values} }}
  {{ wd:{qid} ?relation ?other . BIND("out" AS ?direction) }}
  UNION
  {{ ?other ?relation wd:{qid} . BIND("in" AS ?direction) }}
  FILTER(isIRI(?other))
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{lang}". }}
}}
LIMIT {row_limit}"#,
        values = values.join(" "),
        qid = qid,
        lang = lang,
        row_limit = row_limit,
    )
}

pub(super) async fn fetch_neighborhood(
    client: &WikidataClient,
    qid: &Qid,
) -> Result<NeighborhoodGraph, FetchError> {
    let config = client.graph_config();
    // One extra row so truncation by the cap is detectable
    let query = neighborhood_query(qid, &config.relations, client.language(), config.node_cap + 1);
    let results = client.query(&query).await?;
    Ok(assemble_graph(qid, &results.bindings, config.node_cap))
}

pub(super) fn assemble_graph(
    subject: &Qid,
    bindings: &[SparqlBinding],
    node_cap: usize,
) -> NeighborhoodGraph {
    let mut nodes: Vec<GraphNode> = Vec::new();
    let mut edges: Vec<GraphEdge> = Vec::new();
    let mut truncated = false;

    for binding in bindings {
        let Some(relation) = bound(binding, "relation").and_then(Pid::from_property_uri) else {
            continue;
        };
        let Some(other) = bound(binding, "other").and_then(|uri| Qid::from_entity_uri(uri)) else {
            continue;
        };
        let direction = match bound(binding, "direction") {
            Some("in") => EdgeDirection::Inbound,
            _ => EdgeDirection::Outbound,
        };

        if !nodes.iter().any(|n| n.qid == other) {
            if nodes.len() >= node_cap {
                truncated = true;
                break;
            }
            nodes.push(GraphNode {
                qid: other.clone(),
                label: bound_nonempty(binding, "otherLabel")
                    .unwrap_or(other.as_str())
                    .to_string(),
            });
        }

        let edge = GraphEdge {
            relation,
            other,
            direction,
        };
        if !edges.contains(&edge) {
            edges.push(edge);
        }
    }

    NeighborhoodGraph {
        subject: subject.clone(),
        nodes,
        edges,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikidata::sparql::SparqlValue;

    fn row(pid: &str, other: &str, label: &str, direction: &str) -> SparqlBinding {
        [
            ("relation", format!("http://www.wikidata.org/prop/direct/{}", pid)),
            ("other", format!("http://www.wikidata.org/entity/{}", other)),
            ("otherLabel", label.to_string()),
            ("direction", direction.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| {
            (
                k.to_string(),
                SparqlValue {
                    value: v,
                    kind: "literal".to_string(),
                    lang: None,
                },
            )
        })
        .collect()
    }

    #[test]
    fn query_restricts_relations_and_rows() {
        let qid = Qid::new("Q42").unwrap();
        let relations = vec!["P31".to_string(), "P800".to_string()];
        let query = neighborhood_query(&qid, &relations, "en", 51);
        assert!(query.contains("VALUES ?relation { wdt:P31 wdt:P800 }"));
        assert!(query.contains("LIMIT 51"));
    }

    #[test]
    fn assembles_nodes_and_directed_edges() {
        let subject = Qid::new("Q42").unwrap();
        let rows = vec![
            row("P31", "Q5", "human", "out"),
            row("P800", "Q25169", "Hitchhiker's Guide", "out"),
            row("P50", "Q25169", "Hitchhiker's Guide", "in"),
        ];
        let graph = assemble_graph(&subject, &rows, 50);
        assert_eq!(graph.nodes.len(), 2);
        assert_eq!(graph.edges.len(), 3);
        assert!(!graph.truncated);
        assert!(graph
            .edges
            .iter()
            .any(|e| e.direction == EdgeDirection::Inbound && e.relation.as_str() == "P50"));
    }

    #[test]
    fn node_cap_truncates_and_flags() {
        let subject = Qid::new("Q1").unwrap();
        let rows: Vec<SparqlBinding> = (2..10)
            .map(|i| row("P31", &format!("Q{}", i), &format!("node {}", i), "out"))
            .collect();
        let graph = assemble_graph(&subject, &rows, 3);
        assert_eq!(graph.nodes.len(), 3);
        assert!(graph.truncated);
    }
}
