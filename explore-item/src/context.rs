//! Item render context assembly
//!
//! The query router: resolves the effective entity identifier, merges the
//! override page's notes with live remote data, applies the truncation
//! policy and builds the outbound links. Remote fetch failures degrade the
//! context instead of failing the request.

use crate::error::{ApiError, ApiResult};
use crate::links::{self, ItemLinks};
use crate::policy::{self, StatementView};
use crate::AppState;
use explore_common::db::{self, ItemPage};
use explore_common::model::ArticleSummary;
use explore_common::Qid;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Live section of an item page; absent entirely when the entity fetch
/// failed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveSection {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub classes: Vec<Qid>,
    #[serde(flatten)]
    pub statements: StatementView,
}

/// Unified render context for an item page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemContext {
    pub qid: Qid,
    /// Override page merged into the render; never a replacement for live
    /// data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<ItemPage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live: Option<LiveSection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub articles: Option<Vec<ArticleSummary>>,
    pub links: ItemLinks,
    /// True when any remote fetch failed and its section was omitted
    pub degraded: bool,
}

/// Resolve the identifier to render: an explicit request parameter wins,
/// then the configured default item.
pub fn resolve_qid(state: &AppState, requested: Option<&str>) -> ApiResult<Qid> {
    if let Some(raw) = requested {
        return Qid::new(raw).map_err(|_| ApiError::BadRequest(format!("not an item id: {}", raw)));
    }
    match &state.config.default_item {
        Some(raw) => {
            Qid::new(raw.clone()).map_err(|_| ApiError::Internal(format!("bad default_item: {}", raw)))
        }
        None => Err(ApiError::NotFound("no item requested".to_string())),
    }
}

/// Build the full item context for one request.
///
/// Entity and article fetches are independent remote reads and run
/// concurrently; the policy and merge steps are pure.
pub async fn build_item_context(state: &AppState, qid: Qid) -> ApiResult<ItemContext> {
    let page = db::get_item_page(&state.db, &qid)
        .await?
        .filter(|page| page.published);

    let (entity, articles) = tokio::join!(
        state.source.entity(&qid),
        state.source.scholarly_articles(&qid),
    );

    let mut degraded = false;

    let live = match entity {
        Ok(bundle) => {
            let class_mapping = db::first_class_mapping(&state.db, &bundle.card.classes).await?;
            let statements = policy::select_visible(
                bundle.statements,
                page.as_ref().and_then(|p| p.featured_pids.as_deref()),
                class_mapping.as_ref(),
            );
            Some((bundle.card, statements))
        }
        Err(err) => {
            warn!(qid = %qid, error = %err, "entity fetch failed, rendering without live section");
            degraded = true;
            None
        }
    };

    let articles = match articles {
        Ok(articles) => Some(articles),
        Err(err) => {
            warn!(qid = %qid, error = %err, "article fetch failed, rendering without articles");
            degraded = true;
            None
        }
    };

    let links = links::build(
        &qid,
        live.as_ref().map(|(card, _)| card.label.as_str()),
        live.as_ref().and_then(|(card, _)| card.wikipedia_url.clone()),
    );

    let live = live.map(|(card, statements)| LiveSection {
        label: card.label,
        description: card.description,
        aliases: card.aliases,
        classes: card.classes,
        statements,
    });

    Ok(ItemContext {
        qid,
        page,
        live,
        articles,
        links,
        degraded,
    })
}
