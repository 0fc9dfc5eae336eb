//! SPARQL-over-HTTP result plumbing
//!
//! The query service answers in the standard `application/sparql-results+json`
//! shape: a list of bindings, each a map from selected variable to a typed
//! value. Queries in this crate read bindings by variable name, so the
//! binding is kept as a map instead of one struct per query.

use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SparqlResponse {
    pub results: SparqlResults,
}

#[derive(Debug, Deserialize)]
pub struct SparqlResults {
    pub bindings: Vec<SparqlBinding>,
}

pub type SparqlBinding = HashMap<String, SparqlValue>;

#[derive(Debug, Clone, Deserialize)]
pub struct SparqlValue {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

/// Value of a variable in a binding, when bound
pub fn bound<'a>(binding: &'a SparqlBinding, var: &str) -> Option<&'a str> {
    binding.get(var).map(|v| v.value.as_str())
}

/// Like [`bound`], but treats empty strings as unbound
pub fn bound_nonempty<'a>(binding: &'a SparqlBinding, var: &str) -> Option<&'a str> {
    bound(binding, var).filter(|v| !v.is_empty())
}

/// Date portion of an xsd:dateTime literal such as `1952-03-11T00:00:00Z`
pub fn date_of(binding: &SparqlBinding, var: &str) -> Option<chrono::NaiveDate> {
    let raw = bound(binding, var)?;
    let date_part = raw.get(..10)?;
    chrono::NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
