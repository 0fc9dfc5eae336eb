//! Statement truncation policy
//!
//! Decides which statements an item page shows by default. Precedence:
//! a per-page featured list fully overrides, then the first configured
//! class mapping, then the first ten statements under the fetcher's stable
//! order. The hidden remainder is kept in the result so a reveal never
//! re-fetches.

use explore_common::db::ClassMapping;
use explore_common::model::Statement;
use explore_common::{Pid, Qid};
use serde::{Deserialize, Serialize};

/// Statements shown when neither a page override nor a class mapping applies
pub const DEFAULT_VISIBLE_STATEMENTS: usize = 10;

/// Which rule produced the visible set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TruncationRule {
    PageOverride,
    ClassMapping { class: Qid },
    FirstTen,
}

/// Partition of the fetched statements into shown and hidden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatementView {
    pub visible: Vec<Statement>,
    /// Revealed client-side on request; same fetch, no second query
    pub hidden: Vec<Statement>,
    #[serde(flatten)]
    pub rule: TruncationRule,
}

/// Apply the truncation policy. `statements` must already be in the fetch
/// layer's stable order.
pub fn select_visible(
    statements: Vec<Statement>,
    page_featured: Option<&[Pid]>,
    class_mapping: Option<&ClassMapping>,
) -> StatementView {
    if let Some(featured) = page_featured {
        let (visible, hidden) = partition_by_featured(statements, featured);
        return StatementView {
            visible,
            hidden,
            rule: TruncationRule::PageOverride,
        };
    }

    if let Some(mapping) = class_mapping {
        let (visible, hidden) = partition_by_featured(statements, &mapping.featured_pids);
        return StatementView {
            visible,
            hidden,
            rule: TruncationRule::ClassMapping {
                class: mapping.class_qid.clone(),
            },
        };
    }

    let mut visible = statements;
    let hidden = visible.split_off(visible.len().min(DEFAULT_VISIBLE_STATEMENTS));
    StatementView {
        visible,
        hidden,
        rule: TruncationRule::FirstTen,
    }
}

/// Visible set is exactly the statements whose property appears in the
/// featured list, in the list's declared order; everything else stays
/// hidden in its original order.
fn partition_by_featured(
    statements: Vec<Statement>,
    featured: &[Pid],
) -> (Vec<Statement>, Vec<Statement>) {
    let mut remaining: Vec<Option<Statement>> = statements.into_iter().map(Some).collect();
    let mut visible = Vec::new();

    for pid in featured {
        for slot in remaining.iter_mut() {
            if slot.as_ref().is_some_and(|s| s.pid == *pid) {
                visible.push(slot.take().unwrap());
            }
        }
    }

    let hidden = remaining.into_iter().flatten().collect();
    (visible, hidden)
}
