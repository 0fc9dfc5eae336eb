//! Class table fetch
//!
//! A class page shows instances of its class as rows and the featured
//! properties as columns. The item set is bounded by a subquery LIMIT so
//! the row bindings stay proportional to the configured table size.

use super::sparql::{bound, bound_nonempty, SparqlBinding};
use super::{FetchError, WikidataClient};
use explore_common::model::{ClassTable, ClassTableRow};
use explore_common::{Pid, Qid};

fn class_table_query(class: &Qid, columns: &[Pid], lang: &str, limit: usize) -> String {
    let values: Vec<String> = columns.iter().map(|p| format!("wdt:{}", p)).collect();
    format!(
        r#"SELECT ?item ?itemLabel ?property ?value ?valueLabel WHERE {{
  {{ SELECT DISTINCT ?item WHERE {{ ?item wdt:P31 wd:{class} . }} LIMIT {limit} }}
  OPTIONAL {{
    VALUES ?directProperty {{ {values} }}
    ?item ?directProperty ?value .
    ?property wikibase:directClaim ?directProperty .
  }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{lang}". }}
}}"#,
        class = class,
        limit = limit,
        values = values.join(" "),
        lang = lang,
    )
}

pub(super) async fn fetch_class_table(
    client: &WikidataClient,
    class: &Qid,
    columns: &[Pid],
) -> Result<ClassTable, FetchError> {
    let query = class_table_query(class, columns, client.language(), client.class_table_limit());
    let results = client.query(&query).await?;
    Ok(pivot_rows(class, columns, &results.bindings))
}

/// Pivot (item, property, value) bindings into one row per item with values
/// aligned to the column order. First value wins for multi-valued cells.
pub(super) fn pivot_rows(
    class: &Qid,
    columns: &[Pid],
    bindings: &[SparqlBinding],
) -> ClassTable {
    let mut rows: Vec<ClassTableRow> = Vec::new();

    for binding in bindings {
        let Some(qid) = bound(binding, "item").and_then(|uri| Qid::from_entity_uri(uri)) else {
            continue;
        };

        let found = rows.iter().position(|r| r.qid == qid);
        let index = match found {
            Some(index) => index,
            None => {
                rows.push(ClassTableRow {
                    label: bound_nonempty(binding, "itemLabel")
                        .unwrap_or(qid.as_str())
                        .to_string(),
                    qid,
                    values: vec![None; columns.len()],
                });
                rows.len() - 1
            }
        };

        let Some(pid) = bound(binding, "property").and_then(Pid::from_property_uri) else {
            continue;
        };
        let Some(column) = columns.iter().position(|c| *c == pid) else {
            continue;
        };
        if rows[index].values[column].is_none() {
            let display = bound_nonempty(binding, "valueLabel")
                .or_else(|| bound_nonempty(binding, "value"));
            rows[index].values[column] = display.map(str::to_string);
        }
    }

    ClassTable {
        class: class.clone(),
        columns: columns.to_vec(),
        rows,
    }
}
