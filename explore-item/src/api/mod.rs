//! HTTP API handlers for explore-item

pub mod class;
pub mod graph;
pub mod health;
pub mod item;
pub mod pages;

pub use class::get_class_page;
pub use graph::get_item_graph;
pub use health::health_routes;
pub use item::{get_item, get_item_default};
pub use pages::{get_article_feed, get_block_kinds, get_categories, get_homepage, get_item_index};
