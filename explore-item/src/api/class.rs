//! Class page endpoint
//!
//! A class page renders a table of instances (rows) against the class's
//! featured properties (columns). The mapping is editorial configuration;
//! the table itself is fetched live.

use axum::{
    extract::{Path, State},
    Json,
};
use explore_common::db::{self, ClassMapping};
use explore_common::model::ClassTable;
use explore_common::Qid;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Render context for a class page
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassPageContext {
    pub mapping: ClassMapping,
    /// Absent when the live fetch failed (degraded render)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<ClassTable>,
    pub degraded: bool,
}

/// GET /api/class/:qid
pub async fn get_class_page(
    State(state): State<AppState>,
    Path(qid): Path<String>,
) -> ApiResult<Json<ClassPageContext>> {
    let class = Qid::new(qid.as_str())
        .map_err(|_| ApiError::BadRequest(format!("not a class id: {}", qid)))?;

    let mapping = db::get_class_mapping(&state.db, &class)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no class page for {}", class)))?;

    let table = match state.source.class_table(&class, &mapping.featured_pids).await {
        Ok(table) => Some(table),
        Err(err) => {
            warn!(class = %class, error = %err, "class table fetch failed, rendering without table");
            None
        }
    };

    let degraded = table.is_none();
    Ok(Json(ClassPageContext {
        mapping,
        table,
        degraded,
    }))
}
