//! Scholarly article fetch
//!
//! Articles whose main subject is the entity, ten most recent first. The
//! sort and the cap live inside the query so the remote service never
//! materializes an unbounded result for us.

use super::sparql::{bound, bound_nonempty, date_of, SparqlBinding};
use super::{FetchError, WikidataClient};
use explore_common::model::ArticleSummary;
use explore_common::Qid;

/// Hard cap on scholarly article results, enforced in the query's LIMIT
pub const ARTICLE_LIMIT: usize = 10;

fn article_query(qid: &Qid) -> String {
    format!(
        r#"SELECT ?article ?title ?date ?doi WHERE {{
  ?article wdt:P921 wd:{qid} ;
           wdt:P1476 ?title .
  OPTIONAL {{ ?article wdt:P577 ?date . }}
  OPTIONAL {{ ?article wdt:P356 ?doi . }}
}}
ORDER BY DESC(?date)
LIMIT {limit}"#,
        qid = qid,
        limit = ARTICLE_LIMIT,
    )
}

pub(super) async fn fetch_articles(
    client: &WikidataClient,
    qid: &Qid,
) -> Result<Vec<ArticleSummary>, FetchError> {
    let results = client.query(&article_query(qid)).await?;
    Ok(parse_articles(&results.bindings))
}

pub(super) fn parse_articles(bindings: &[SparqlBinding]) -> Vec<ArticleSummary> {
    let mut articles: Vec<ArticleSummary> = Vec::new();
    let mut seen: Vec<&str> = Vec::new();

    for binding in bindings {
        let Some(uri) = bound(binding, "article") else {
            continue;
        };
        // An article with several title statements comes back once per title
        if seen.contains(&uri) {
            continue;
        }
        seen.push(uri);

        let Some(title) = bound_nonempty(binding, "title") else {
            continue;
        };
        articles.push(ArticleSummary {
            title: title.to_string(),
            date: date_of(binding, "date"),
            doi: bound_nonempty(binding, "doi").map(str::to_string),
        });
    }

    articles.truncate(ARTICLE_LIMIT);
    articles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wikidata::sparql::SparqlValue;

    fn row(uri: &str, title: &str, date: Option<&str>, doi: Option<&str>) -> SparqlBinding {
        let mut binding = SparqlBinding::new();
        let mut put = |k: &str, v: &str| {
            binding.insert(
                k.to_string(),
                SparqlValue {
                    value: v.to_string(),
                    kind: "literal".to_string(),
                    lang: None,
                },
            );
        };
        put("article", uri);
        put("title", title);
        if let Some(date) = date {
            put("date", date);
        }
        if let Some(doi) = doi {
            put("doi", doi);
        }
        binding
    }

    #[test]
    fn query_sorts_and_caps_remotely() {
        let qid = Qid::new("Q42").unwrap();
        let query = article_query(&qid);
        assert!(query.contains("ORDER BY DESC(?date)"));
        assert!(query.contains("LIMIT 10"));
        assert!(query.contains("wd:Q42"));
    }

    #[test]
    fn missing_doi_and_date_are_absent_not_errors() {
        let rows = vec![row("http://w/1", "Paper one", None, None)];
        let articles = parse_articles(&rows);
        assert_eq!(articles.len(), 1);
        assert!(articles[0].date.is_none());
        assert!(articles[0].doi.is_none());
    }

    #[test]
    fn duplicate_article_rows_collapse() {
        let rows = vec![
            row("http://w/1", "Paper", Some("2021-05-01T00:00:00Z"), Some("10.1/x")),
            row("http://w/1", "Paper (alt title)", Some("2021-05-01T00:00:00Z"), Some("10.1/x")),
            row("http://w/2", "Other", Some("2020-01-01T00:00:00Z"), None),
        ];
        let articles = parse_articles(&rows);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title, "Paper");
        assert_eq!(articles[0].doi.as_deref(), Some("10.1/x"));
    }

    #[test]
    fn result_never_exceeds_cap() {
        let rows: Vec<SparqlBinding> = (0..25)
            .map(|i| {
                row(
                    &format!("http://w/{}", i),
                    &format!("Paper {}", i),
                    Some("2022-01-01T00:00:00Z"),
                    None,
                )
            })
            .collect();
        assert_eq!(parse_articles(&rows).len(), ARTICLE_LIMIT);
    }
}
