//! Editorial database models

use crate::blocks::ContentBlock;
use crate::{Pid, Qid};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Override page: contributor-authored notes for one entity.
///
/// Supplements the live render for its Qid; it never replaces remote data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemPage {
    pub qid: Qid,
    pub title: String,
    pub notes: Vec<ContentBlock>,
    /// Per-item featured property list; takes precedence over the class
    /// mapping when set
    pub featured_pids: Option<Vec<Pid>>,
    pub published: bool,
    pub first_published_at: Option<DateTime<Utc>>,
}

/// Feed entry for the override-page index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemPageSummary {
    pub qid: Qid,
    pub title: String,
    pub first_published_at: Option<DateTime<Utc>>,
}

/// Class feature mapping: ordered featured properties for one class Qid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassMapping {
    pub class_qid: Qid,
    pub title: String,
    pub featured_pids: Vec<Pid>,
}

/// Hand-written article page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub guid: String,
    pub title: String,
    pub body: Vec<ContentBlock>,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub published: bool,
    pub first_published_at: Option<DateTime<Utc>>,
}

/// Feed entry for article listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleFeedEntry {
    pub guid: String,
    pub title: String,
    pub date: NaiveDate,
    pub category: Option<String>,
    pub first_published_at: Option<DateTime<Utc>>,
}

/// Sitewide article category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub slug: String,
    pub title: String,
    pub intro: String,
}

/// Site homepage record (single row)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Homepage {
    pub link: String,
    pub intro: String,
    pub intro_articles: String,
}
