//! Entity fetch: label card and statement set
//!
//! Two queries per entity: a card query (label, description, aliases,
//! Wikipedia sitelink) and a statement query walking the statement nodes so
//! qualifiers come back alongside their values. Missing card fields are
//! empty render states; only transport-level failures are errors.

use super::sparql::{bound, bound_nonempty, SparqlBinding};
use super::{EntityBundle, FetchError, WikidataClient};
use explore_common::model::{EntityCard, Qualifier, Statement};
use explore_common::{Pid, Qid};

fn card_query(qid: &Qid, lang: &str) -> String {
    format!(
        r#"SELECT ?label ?description ?alias ?article WHERE {{
  OPTIONAL {{ wd:{qid} rdfs:label ?label . FILTER(LANG(?label) = "{lang}") }}
  OPTIONAL {{ wd:{qid} schema:description ?description . FILTER(LANG(?description) = "{lang}") }}
  OPTIONAL {{ wd:{qid} skos:altLabel ?alias . FILTER(LANG(?alias) = "{lang}") }}
  OPTIONAL {{
    ?article schema:about wd:{qid} ;
             schema:isPartOf <https://{lang}.wikipedia.org/> .
  }}
}}"#,
        qid = qid,
        lang = lang,
    )
}

fn statement_query(qid: &Qid, lang: &str) -> String {
    format!(
        r#"SELECT ?property ?propertyLabel ?value ?valueLabel
       ?qualifier ?qualifierLabel ?qualifierValue ?qualifierValueLabel WHERE {{
  wd:{qid} ?claim ?statement .
  ?property wikibase:claim ?claim ;
            wikibase:statementProperty ?statementProperty .
  ?statement ?statementProperty ?value .
  OPTIONAL {{
    ?statement ?qualifierProperty ?qualifierValue .
    ?qualifier wikibase:qualifier ?qualifierProperty .
  }}
  SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{lang}". }}
}}"#,
        qid = qid,
        lang = lang,
    )
}

pub(super) async fn fetch_entity(
    client: &WikidataClient,
    qid: &Qid,
) -> Result<EntityBundle, FetchError> {
    let lang = client.language();
    let card_results = client.query(&card_query(qid, lang)).await?;
    let statement_results = client.query(&statement_query(qid, lang)).await?;

    let statements = parse_statements(&statement_results.bindings);
    let card = parse_card(&card_results.bindings, qid, &statements);

    Ok(EntityBundle { card, statements })
}

/// Assemble the entity card. The card query returns one row per alias (the
/// scalar fields repeat), so aliases are collected across rows and the rest
/// is read from the first row.
pub(super) fn parse_card(
    bindings: &[SparqlBinding],
    qid: &Qid,
    statements: &[Statement],
) -> EntityCard {
    let first = bindings.first();

    let label = first
        .and_then(|b| bound_nonempty(b, "label"))
        .map(str::to_string)
        .unwrap_or_else(|| qid.to_string());

    let description = first
        .and_then(|b| bound_nonempty(b, "description"))
        .map(str::to_string);

    let wikipedia_url = first
        .and_then(|b| bound_nonempty(b, "article"))
        .map(str::to_string);

    let mut aliases: Vec<String> = Vec::new();
    for binding in bindings {
        if let Some(alias) = bound_nonempty(binding, "alias") {
            if !aliases.iter().any(|a| a == alias) {
                aliases.push(alias.to_string());
            }
        }
    }

    // Declared classes are the P31 statement values, in statement order
    let classes: Vec<Qid> = statements
        .iter()
        .filter(|s| s.pid.as_str() == "P31")
        .filter_map(|s| s.value_qid.clone())
        .collect();

    EntityCard {
        qid: qid.clone(),
        label,
        description,
        aliases,
        classes,
        wikipedia_url,
    }
}

/// Group statement rows by (property, value) and attach qualifiers.
///
/// The result is sorted by property id (numeric) then value, which makes
/// the first-N truncation fallback deterministic across repeated fetches.
pub(super) fn parse_statements(bindings: &[SparqlBinding]) -> Vec<Statement> {
    let mut statements: Vec<Statement> = Vec::new();

    for binding in bindings {
        let Some(pid) = bound(binding, "property").and_then(Pid::from_property_uri) else {
            continue;
        };
        let Some(raw_value) = bound(binding, "value") else {
            continue;
        };
        let display_value = bound_nonempty(binding, "valueLabel")
            .unwrap_or(raw_value)
            .to_string();
        let value_qid = Qid::from_entity_uri(raw_value);

        let found = statements
            .iter()
            .position(|s| s.pid == pid && s.value == display_value);
        let index = match found {
            Some(index) => index,
            None => {
                statements.push(Statement {
                    pid: pid.clone(),
                    property_label: bound_nonempty(binding, "propertyLabel")
                        .unwrap_or(pid.as_str())
                        .to_string(),
                    value: display_value.clone(),
                    value_qid,
                    qualifiers: Vec::new(),
                });
                statements.len() - 1
            }
        };
        let statement = &mut statements[index];

        if let (Some(qual_pid), Some(qual_value)) = (
            bound(binding, "qualifier").and_then(Pid::from_property_uri),
            bound_nonempty(binding, "qualifierValueLabel")
                .or_else(|| bound_nonempty(binding, "qualifierValue")),
        ) {
            let qualifier = Qualifier {
                label: bound_nonempty(binding, "qualifierLabel")
                    .unwrap_or(qual_pid.as_str())
                    .to_string(),
                pid: qual_pid,
                value: qual_value.to_string(),
            };
            if !statement.qualifiers.contains(&qualifier) {
                statement.qualifiers.push(qualifier);
            }
        }
    }

    statements.sort_by(|a, b| a.pid.cmp(&b.pid).then_with(|| a.value.cmp(&b.value)));
    statements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikidata::sparql::SparqlValue;

    fn value(v: &str) -> SparqlValue {
        SparqlValue {
            value: v.to_string(),
            kind: "literal".to_string(),
            lang: None,
        }
    }

    fn binding(pairs: &[(&str, &str)]) -> SparqlBinding {
        pairs.iter().map(|(k, v)| (k.to_string(), value(v))).collect()
    }

    fn statement_row(pid: &str, val: &str, val_label: &str) -> SparqlBinding {
        binding(&[
            ("property", &format!("http://www.wikidata.org/entity/{}", pid)),
            ("propertyLabel", &format!("{} label", pid)),
            ("value", val),
            ("valueLabel", val_label),
        ])
    }

    #[test]
    fn statements_are_sorted_by_property_number() {
        let rows = vec![
            statement_row("P800", "Hitchhiker's Guide", "Hitchhiker's Guide"),
            statement_row("P31", "http://www.wikidata.org/entity/Q5", "human"),
            statement_row("P106", "http://www.wikidata.org/entity/Q36180", "writer"),
        ];
        let statements = parse_statements(&rows);
        let pids: Vec<&str> = statements.iter().map(|s| s.pid.as_str()).collect();
        assert_eq!(pids, vec!["P31", "P106", "P800"]);
        assert_eq!(statements[0].value, "human");
        assert_eq!(statements[0].value_qid.as_ref().unwrap().as_str(), "Q5");
    }

    #[test]
    fn ordering_is_deterministic_across_shuffled_responses() {
        let rows_a = vec![
            statement_row("P569", "1952-03-11", "1952-03-11"),
            statement_row("P31", "http://www.wikidata.org/entity/Q5", "human"),
        ];
        let rows_b: Vec<_> = rows_a.iter().rev().cloned().collect();
        assert_eq!(parse_statements(&rows_a), parse_statements(&rows_b));
    }

    #[test]
    fn qualifier_rows_fold_into_one_statement() {
        let mut with_qualifier = statement_row("P69", "http://www.wikidata.org/entity/Q691283", "St John's College");
        with_qualifier.insert(
            "qualifier".to_string(),
            value("http://www.wikidata.org/entity/P582"),
        );
        with_qualifier.insert("qualifierLabel".to_string(), value("end time"));
        with_qualifier.insert("qualifierValue".to_string(), value("1974-01-01T00:00:00Z"));
        with_qualifier.insert("qualifierValueLabel".to_string(), value("1974"));

        let rows = vec![
            statement_row("P69", "http://www.wikidata.org/entity/Q691283", "St John's College"),
            with_qualifier,
        ];
        let statements = parse_statements(&rows);
        assert_eq!(statements.len(), 1);
        assert_eq!(statements[0].qualifiers.len(), 1);
        assert_eq!(statements[0].qualifiers[0].pid.as_str(), "P582");
        assert_eq!(statements[0].qualifiers[0].value, "1974");
    }

    #[test]
    fn card_tolerates_missing_fields() {
        let qid = Qid::new("Q42").unwrap();
        let card = parse_card(&[], &qid, &[]);
        assert_eq!(card.label, "Q42");
        assert!(card.description.is_none());
        assert!(card.aliases.is_empty());
        assert!(card.wikipedia_url.is_none());
    }

    #[test]
    fn card_collects_aliases_and_classes() {
        let qid = Qid::new("Q42").unwrap();
        let rows = vec![
            binding(&[
                ("label", "Douglas Adams"),
                ("description", "English writer"),
                ("alias", "Douglas Noel Adams"),
                ("article", "https://en.wikipedia.org/wiki/Douglas_Adams"),
            ]),
            binding(&[
                ("label", "Douglas Adams"),
                ("description", "English writer"),
                ("alias", "DNA"),
                ("article", "https://en.wikipedia.org/wiki/Douglas_Adams"),
            ]),
        ];
        let statements = parse_statements(&[statement_row(
            "P31",
            "http://www.wikidata.org/entity/Q5",
            "human",
        )]);
        let card = parse_card(&rows, &qid, &statements);
        assert_eq!(card.label, "Douglas Adams");
        assert_eq!(card.aliases, vec!["Douglas Noel Adams", "DNA"]);
        assert_eq!(card.classes.len(), 1);
        assert_eq!(card.classes[0].as_str(), "Q5");
        assert!(card.wikipedia_url.as_deref().unwrap().contains("wikipedia.org"));
    }
}
