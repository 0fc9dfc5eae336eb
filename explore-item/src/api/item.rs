//! Item page endpoints
//!
//! An item is addressed either by path (`/api/item/Q42`) or by query
//! parameter (`/api/item?qid=Q42`). Without a parameter the configured
//! default item renders; without that, 404.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::context::{build_item_context, resolve_qid, ItemContext};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemQuery {
    pub qid: Option<String>,
}

/// GET /api/item/:qid
pub async fn get_item(
    State(state): State<AppState>,
    Path(qid): Path<String>,
) -> ApiResult<Json<ItemContext>> {
    let qid = resolve_qid(&state, Some(&qid))?;
    Ok(Json(build_item_context(&state, qid).await?))
}

/// GET /api/item?qid=Q42
pub async fn get_item_default(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> ApiResult<Json<ItemContext>> {
    let qid = resolve_qid(&state, query.qid.as_deref())?;
    Ok(Json(build_item_context(&state, qid).await?))
}
