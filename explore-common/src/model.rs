//! Live data fetched from the remote knowledge graph
//!
//! None of these types are persisted locally. Every page render rebuilds
//! them from a fresh fetch; the editorial database only ever supplements
//! them with locally authored notes.

use crate::{Pid, Qid};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Label/description/alias card for an entity, plus its declared classes
/// and the linked Wikipedia article when one exists.
///
/// Missing description, aliases or Wikipedia link are normal render states,
/// not errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityCard {
    pub qid: Qid,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// "instance of" values, in fetch order
    #[serde(default)]
    pub classes: Vec<Qid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia_url: Option<String>,
}

/// A qualifier attached to a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Qualifier {
    pub pid: Pid,
    pub label: String,
    pub value: String,
}

/// One property-value fact about an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    pub pid: Pid,
    pub property_label: String,
    pub value: String,
    /// Target entity when the value is itself an item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_qid: Option<Qid>,
    #[serde(default)]
    pub qualifiers: Vec<Qualifier>,
}

/// Scholarly article metadata linked to an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// DOI absence is permitted and rendered as absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,
}

/// Direction of a neighborhood edge relative to the subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    Outbound,
    Inbound,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    pub qid: Qid,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub relation: Pid,
    pub other: Qid,
    pub direction: EdgeDirection,
}

/// Depth-1 neighborhood of an entity over a bounded set of relation types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodGraph {
    pub subject: Qid,
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
    /// True when the node cap cut the result short
    pub truncated: bool,
}

/// One row of a class table: an instance of the class with its values for
/// the featured properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTableRow {
    pub qid: Qid,
    pub label: String,
    /// Values aligned with the table's column order; None when the item has
    /// no statement for that property
    pub values: Vec<Option<String>>,
}

/// Items-as-rows, featured-properties-as-columns table for a class page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassTable {
    pub class: Qid,
    pub columns: Vec<Pid>,
    pub rows: Vec<ClassTableRow>,
}
