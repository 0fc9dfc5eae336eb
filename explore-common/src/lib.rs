//! # Explore Common Library
//!
//! Shared code for the Explore publishing services including:
//! - Editorial database models and queries (override pages, class mappings)
//! - Wikidata identifier newtypes (Qid/Pid)
//! - Content block definitions and the block registry
//! - Live-data types returned by the knowledge fetcher
//! - Configuration loading
//! - Common error types

pub mod blocks;
pub mod config;
pub mod db;
pub mod error;
pub mod ids;
pub mod model;

pub use error::{Error, Result};
pub use ids::{Pid, Qid};
