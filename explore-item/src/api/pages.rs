//! Editorial page context endpoints
//!
//! Homepage, article feeds and the override-page index. These read only the
//! local editorial tables; no remote fetches.

use axum::{
    extract::{Query, State},
    Json,
};
use explore_common::blocks::BlockKind;
use explore_common::db::{self, ArticleFeedEntry, Category, Homepage, ItemPageSummary};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::AppState;

/// Homepage render context: site record plus published articles,
/// reverse-chronological
#[derive(Debug, Serialize, Deserialize)]
pub struct HomepageContext {
    pub homepage: Homepage,
    pub articles: Vec<ArticleFeedEntry>,
}

/// GET /api/home
pub async fn get_homepage(State(state): State<AppState>) -> ApiResult<Json<HomepageContext>> {
    let homepage = db::get_homepage(&state.db).await?.unwrap_or_default();
    let articles = db::published_articles(&state.db).await?;
    Ok(Json(HomepageContext { homepage, articles }))
}

#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    pub tag: Option<String>,
}

/// GET /api/articles?tag=…
///
/// Without a tag this is the full published feed; with one it is the tag
/// index page's filtered list.
pub async fn get_article_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> ApiResult<Json<Vec<ArticleFeedEntry>>> {
    let articles = match query.tag.as_deref() {
        Some(tag) => db::articles_with_tag(&state.db, tag).await?,
        None => db::published_articles(&state.db).await?,
    };
    Ok(Json(articles))
}

/// GET /api/items
///
/// Index of published override pages, most recently published first.
pub async fn get_item_index(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ItemPageSummary>>> {
    Ok(Json(db::list_published_item_pages(&state.db).await?))
}

/// GET /api/categories
///
/// Sitewide article categories, ordered by title.
pub async fn get_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(db::list_categories(&state.db).await?))
}

/// GET /api/blocks
///
/// Block kinds the editorial surface accepts, from the startup registry.
pub async fn get_block_kinds(State(state): State<AppState>) -> Json<Vec<BlockKind>> {
    Json(state.blocks.kinds().to_vec())
}
