//! Editorial database access
//!
//! Holds the locally authored records: override pages keyed by Qid, class
//! feature mappings, articles, categories and the homepage record. Live
//! Wikidata content is never stored here; the render path reads these tables
//! and merges them with fresh remote data.

mod init;
mod models;
mod pages;

pub use init::{apply_schema, init_database};
pub use models::{
    Article, ArticleFeedEntry, Category, ClassMapping, Homepage, ItemPage, ItemPageSummary,
};
pub use pages::*;
