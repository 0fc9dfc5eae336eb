//! Wikidata Query Service client
//!
//! Issues read-only SPARQL queries against the remote endpoint: one bounded
//! attempt per call with an explicit timeout, no retries. Callers treat a
//! failure as a degraded render state, never as a fatal page error.

use async_trait::async_trait;
use explore_common::config::{GraphConfig, WikidataConfig};
use explore_common::model::{ArticleSummary, ClassTable, EntityCard, NeighborhoodGraph, Statement};
use explore_common::{Pid, Qid};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

mod articles;
mod class_table;
mod entity;
mod graph;
pub mod sparql;

/// Fetch failure categories
#[derive(Debug, Error)]
pub enum FetchError {
    /// The bounded attempt ran out of time
    #[error("query timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status
    #[error("query service error: {0}")]
    Api(String),

    #[error("response parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Label/statement bundle for one entity, built fresh per request
#[derive(Debug, Clone, PartialEq)]
pub struct EntityBundle {
    pub card: EntityCard,
    /// Stable order: sorted by property id, then value
    pub statements: Vec<Statement>,
}

/// Read access to the remote knowledge graph.
///
/// The render path depends on this trait rather than on the HTTP client so
/// tests can substitute a scripted source.
#[async_trait]
pub trait EntitySource: Send + Sync {
    /// Label card and full statement set for an entity
    async fn entity(&self, qid: &Qid) -> Result<EntityBundle, FetchError>;

    /// Scholarly articles about the entity, ten most recent, newest first.
    /// The cap is enforced inside the query, not client-side.
    async fn scholarly_articles(&self, qid: &Qid) -> Result<Vec<ArticleSummary>, FetchError>;

    /// Depth-1 neighborhood over the configured relation allow-list
    async fn neighborhood(&self, qid: &Qid) -> Result<NeighborhoodGraph, FetchError>;

    /// Instances of a class with their values for the featured properties
    async fn class_table(&self, class: &Qid, columns: &[Pid]) -> Result<ClassTable, FetchError>;
}

/// SPARQL client for the Wikidata Query Service
pub struct WikidataClient {
    http: reqwest::Client,
    endpoint: String,
    language: String,
    class_table_limit: usize,
    graph: GraphConfig,
}

impl WikidataClient {
    pub fn new(config: &WikidataConfig, graph: &GraphConfig) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("Explore/0.1")),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/sparql-results+json"),
        );
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/sparql-query"),
        );

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
            class_table_limit: config.class_table_limit,
            graph: graph.clone(),
        })
    }

    pub(crate) fn language(&self) -> &str {
        &self.language
    }

    pub(crate) fn class_table_limit(&self) -> usize {
        self.class_table_limit
    }

    pub(crate) fn graph_config(&self) -> &GraphConfig {
        &self.graph
    }

    /// Execute one SPARQL query: single attempt, bounded by the client
    /// timeout
    pub(crate) async fn query(&self, sparql: &str) -> Result<sparql::SparqlResults, FetchError> {
        debug!(endpoint = %self.endpoint, "issuing SPARQL query");

        let response = self
            .http
            .post(&self.endpoint)
            .body(sparql.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api(format!("{}: {}", status, body)));
        }

        let parsed: sparql::SparqlResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(parsed.results)
    }
}

#[async_trait]
impl EntitySource for WikidataClient {
    async fn entity(&self, qid: &Qid) -> Result<EntityBundle, FetchError> {
        entity::fetch_entity(self, qid).await
    }

    async fn scholarly_articles(&self, qid: &Qid) -> Result<Vec<ArticleSummary>, FetchError> {
        articles::fetch_articles(self, qid).await
    }

    async fn neighborhood(&self, qid: &Qid) -> Result<NeighborhoodGraph, FetchError> {
        graph::fetch_neighborhood(self, qid).await
    }

    async fn class_table(&self, class: &Qid, columns: &[Pid]) -> Result<ClassTable, FetchError> {
        class_table::fetch_class_table(self, class, columns).await
    }
}

pub use articles::ARTICLE_LIMIT;
