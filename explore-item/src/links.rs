//! Outbound link construction
//!
//! Pure string building from the identifier and label; no network calls.
//! Covers the entity's canonical Wikidata page, visual exploration tools,
//! and a prefilled scholarly-database search for "see more articles".

use explore_common::Qid;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// External links rendered on an item page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemLinks {
    /// Canonical entity page, also where "edit on Wikidata" lands
    pub wikidata: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wikipedia: Option<String>,
    pub scholia: String,
    pub sqid: String,
    pub reasonator: String,
    /// Scholarly search prefilled with the entity label; absent when the
    /// label is unknown (degraded render)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article_search: Option<String>,
}

pub fn entity_url(qid: &Qid) -> String {
    format!("https://www.wikidata.org/wiki/{}", qid)
}

pub fn scholia_url(qid: &Qid) -> String {
    format!("https://scholia.toolforge.org/topic/{}", qid)
}

pub fn sqid_url(qid: &Qid) -> String {
    format!("https://sqid.toolforge.org/#/view?id={}", qid)
}

pub fn reasonator_url(qid: &Qid) -> String {
    format!("https://reasonator.toolforge.org/?q={}", qid)
}

/// Prefilled scholarly-database search for the label
pub fn article_search_url(label: &str) -> String {
    // Url handles the percent-encoding of arbitrary labels
    Url::parse_with_params("https://www.semanticscholar.org/search", &[("q", label)])
        .map(|url| url.to_string())
        .unwrap_or_else(|_| "https://www.semanticscholar.org/".to_string())
}

pub fn build(qid: &Qid, label: Option<&str>, wikipedia: Option<String>) -> ItemLinks {
    ItemLinks {
        wikidata: entity_url(qid),
        wikipedia,
        scholia: scholia_url(qid),
        sqid: sqid_url(qid),
        reasonator: reasonator_url(qid),
        article_search: label.map(article_search_url),
    }
}
