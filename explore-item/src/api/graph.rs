//! On-demand neighborhood graph endpoint
//!
//! Never part of the item render: the graph query is the one operation slow
//! enough that it only runs on explicit user request. A failure here is
//! reported as retryable and leaves the item page untouched.

use axum::{
    extract::{Path, State},
    Json,
};
use explore_common::model::NeighborhoodGraph;
use explore_common::Qid;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /api/item/:qid/graph
pub async fn get_item_graph(
    State(state): State<AppState>,
    Path(qid): Path<String>,
) -> ApiResult<Json<NeighborhoodGraph>> {
    let qid = Qid::new(qid.as_str())
        .map_err(|_| ApiError::BadRequest(format!("not an item id: {}", qid)))?;

    let graph = state
        .source
        .neighborhood(&qid)
        .await
        .map_err(|e| ApiError::Upstream(format!("graph build failed, try again: {}", e)))?;

    Ok(Json(graph))
}
