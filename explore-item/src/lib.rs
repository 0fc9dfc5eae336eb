//! explore-item library - Wikidata item aggregation service
//!
//! Serves item render contexts that merge locally authored override pages
//! with live Wikidata data, plus class tables, editorial page feeds and an
//! on-demand neighborhood graph.

use axum::Router;
use explore_common::blocks::BlockRegistry;
use explore_common::config::AppConfig;
use sqlx::SqlitePool;
use std::sync::Arc;

pub mod api;
pub mod context;
pub mod error;
pub mod links;
pub mod policy;
pub mod wikidata;

use wikidata::EntitySource;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Editorial database (override pages, class mappings, articles)
    pub db: SqlitePool,
    /// Remote knowledge-graph access; a trait object so tests can script it
    pub source: Arc<dyn EntitySource>,
    pub config: Arc<AppConfig>,
    /// Block kinds accepted by the editorial surface, built at startup
    pub blocks: BlockRegistry,
}

impl AppState {
    pub fn new(db: SqlitePool, source: Arc<dyn EntitySource>, config: AppConfig) -> Self {
        Self {
            db,
            source,
            config: Arc::new(config),
            blocks: BlockRegistry::new(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;
    use tower_http::cors::CorsLayer;

    Router::new()
        .route("/api/item", get(api::get_item_default))
        .route("/api/item/:qid", get(api::get_item))
        .route("/api/item/:qid/graph", get(api::get_item_graph))
        .route("/api/class/:qid", get(api::get_class_page))
        .route("/api/home", get(api::get_homepage))
        .route("/api/articles", get(api::get_article_feed))
        .route("/api/items", get(api::get_item_index))
        .route("/api/categories", get(api::get_categories))
        .route("/api/blocks", get(api::get_block_kinds))
        .merge(api::health_routes())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
        .with_state(state)
}
