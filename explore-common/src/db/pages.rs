//! Queries over the editorial tables
//!
//! The render path only reads; writes happen through the editorial surface
//! (and through tests).

use crate::db::models::*;
use crate::{Error, Pid, Qid, Result};
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;

fn to_json<T: serde::Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::Internal(format!("JSON encode failed: {}", e)))
}

fn from_json<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::Internal(format!("JSON decode failed: {}", e)))
}

fn parse_timestamp(raw: Option<String>) -> Result<Option<DateTime<Utc>>> {
    raw.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| Error::Internal(format!("bad timestamp '{}': {}", s, e)))
    })
    .transpose()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| Error::Internal(format!("bad date '{}': {}", raw, e)))
}

// ---------------------------------------------------------------------------
// Override pages
// ---------------------------------------------------------------------------

pub async fn get_item_page(pool: &SqlitePool, qid: &Qid) -> Result<Option<ItemPage>> {
    let row = sqlx::query_as::<_, (String, String, String, Option<String>, i64, Option<String>)>(
        "SELECT qid, title, notes, featured_pids, published, first_published_at
         FROM item_pages WHERE qid = ?",
    )
    .bind(qid.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(|(qid, title, notes, featured, published, published_at)| {
        Ok(ItemPage {
            qid: Qid::new(qid)?,
            title,
            notes: from_json(&notes)?,
            featured_pids: featured.as_deref().map(from_json::<Vec<Pid>>).transpose()?,
            published: published != 0,
            first_published_at: parse_timestamp(published_at)?,
        })
    })
    .transpose()
}

pub async fn upsert_item_page(pool: &SqlitePool, page: &ItemPage) -> Result<()> {
    sqlx::query(
        "INSERT INTO item_pages (qid, title, notes, featured_pids, published, first_published_at)
         VALUES (?, ?, ?, ?, ?, ?)
         ON CONFLICT(qid) DO UPDATE SET
             title = excluded.title,
             notes = excluded.notes,
             featured_pids = excluded.featured_pids,
             published = excluded.published,
             first_published_at = excluded.first_published_at",
    )
    .bind(page.qid.as_str())
    .bind(&page.title)
    .bind(to_json(&page.notes)?)
    .bind(page.featured_pids.as_ref().map(to_json).transpose()?)
    .bind(page.published as i64)
    .bind(page.first_published_at.map(|dt| dt.to_rfc3339()))
    .execute(pool)
    .await?;
    Ok(())
}

/// Published override pages, most recently published first
pub async fn list_published_item_pages(pool: &SqlitePool) -> Result<Vec<ItemPageSummary>> {
    let rows = sqlx::query_as::<_, (String, String, Option<String>)>(
        "SELECT qid, title, first_published_at FROM item_pages
         WHERE published = 1
         ORDER BY first_published_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(qid, title, published_at)| {
            Ok(ItemPageSummary {
                qid: Qid::new(qid)?,
                title,
                first_published_at: parse_timestamp(published_at)?,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Class mappings
// ---------------------------------------------------------------------------

pub async fn get_class_mapping(pool: &SqlitePool, class_qid: &Qid) -> Result<Option<ClassMapping>> {
    let row = sqlx::query_as::<_, (String, String, String)>(
        "SELECT class_qid, title, featured_pids FROM class_mappings WHERE class_qid = ?",
    )
    .bind(class_qid.as_str())
    .fetch_optional(pool)
    .await?;

    row.map(|(class_qid, title, featured)| {
        Ok(ClassMapping {
            class_qid: Qid::new(class_qid)?,
            title,
            featured_pids: from_json(&featured)?,
        })
    })
    .transpose()
}

/// First configured mapping among the entity's declared classes, checked in
/// the order the classes were fetched
pub async fn first_class_mapping(
    pool: &SqlitePool,
    classes: &[Qid],
) -> Result<Option<ClassMapping>> {
    for class in classes {
        if let Some(mapping) = get_class_mapping(pool, class).await? {
            return Ok(Some(mapping));
        }
    }
    Ok(None)
}

pub async fn upsert_class_mapping(pool: &SqlitePool, mapping: &ClassMapping) -> Result<()> {
    sqlx::query(
        "INSERT INTO class_mappings (class_qid, title, featured_pids)
         VALUES (?, ?, ?)
         ON CONFLICT(class_qid) DO UPDATE SET
             title = excluded.title,
             featured_pids = excluded.featured_pids",
    )
    .bind(mapping.class_qid.as_str())
    .bind(&mapping.title)
    .bind(to_json(&mapping.featured_pids)?)
    .execute(pool)
    .await?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

pub async fn insert_article(pool: &SqlitePool, article: &Article) -> Result<()> {
    sqlx::query(
        "INSERT INTO articles (guid, title, body, date, category, published, first_published_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&article.guid)
    .bind(&article.title)
    .bind(to_json(&article.body)?)
    .bind(article.date.format("%Y-%m-%d").to_string())
    .bind(&article.category)
    .bind(article.published as i64)
    .bind(article.first_published_at.map(|dt| dt.to_rfc3339()))
    .execute(pool)
    .await?;

    for tag in &article.tags {
        sqlx::query("INSERT OR IGNORE INTO article_tags (article_guid, tag) VALUES (?, ?)")
            .bind(&article.guid)
            .bind(tag)
            .execute(pool)
            .await?;
    }
    Ok(())
}

fn feed_entry(row: (String, String, String, Option<String>, Option<String>)) -> Result<ArticleFeedEntry> {
    let (guid, title, date, category, published_at) = row;
    Ok(ArticleFeedEntry {
        guid,
        title,
        date: parse_date(&date)?,
        category,
        first_published_at: parse_timestamp(published_at)?,
    })
}

/// Published articles, most recently published first (homepage feed)
pub async fn published_articles(pool: &SqlitePool) -> Result<Vec<ArticleFeedEntry>> {
    let rows = sqlx::query_as::<_, (String, String, String, Option<String>, Option<String>)>(
        "SELECT guid, title, date, category, first_published_at FROM articles
         WHERE published = 1
         ORDER BY first_published_at DESC",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(feed_entry).collect()
}

/// Published articles carrying the given tag (tag index page)
pub async fn articles_with_tag(pool: &SqlitePool, tag: &str) -> Result<Vec<ArticleFeedEntry>> {
    let rows = sqlx::query_as::<_, (String, String, String, Option<String>, Option<String>)>(
        "SELECT a.guid, a.title, a.date, a.category, a.first_published_at
         FROM articles a
         JOIN article_tags t ON t.article_guid = a.guid
         WHERE a.published = 1 AND t.tag = ?
         ORDER BY a.first_published_at DESC",
    )
    .bind(tag)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(feed_entry).collect()
}

// ---------------------------------------------------------------------------
// Categories and homepage
// ---------------------------------------------------------------------------

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
    let rows = sqlx::query_as::<_, (String, String, String)>(
        "SELECT slug, title, intro FROM categories ORDER BY title",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(slug, title, intro)| Category { slug, title, intro })
        .collect())
}

pub async fn upsert_category(pool: &SqlitePool, category: &Category) -> Result<()> {
    sqlx::query(
        "INSERT INTO categories (slug, title, intro) VALUES (?, ?, ?)
         ON CONFLICT(slug) DO UPDATE SET title = excluded.title, intro = excluded.intro",
    )
    .bind(&category.slug)
    .bind(&category.title)
    .bind(&category.intro)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn get_homepage(pool: &SqlitePool) -> Result<Option<Homepage>> {
    let row = sqlx::query_as::<_, (String, String, String)>(
        "SELECT link, intro, intro_articles FROM homepage WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(link, intro, intro_articles)| Homepage {
        link,
        intro,
        intro_articles,
    }))
}

pub async fn set_homepage(pool: &SqlitePool, homepage: &Homepage) -> Result<()> {
    sqlx::query(
        "INSERT INTO homepage (id, link, intro, intro_articles) VALUES (1, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
             link = excluded.link,
             intro = excluded.intro,
             intro_articles = excluded.intro_articles",
    )
    .bind(&homepage.link)
    .bind(&homepage.intro)
    .bind(&homepage.intro_articles)
    .execute(pool)
    .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ContentBlock;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn memory_pool() -> SqlitePool {
        // Single connection so every query sees the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("in-memory pool");
        crate::db::apply_schema(&pool).await.expect("schema");
        pool
    }

    fn sample_page() -> ItemPage {
        ItemPage {
            qid: Qid::new("Q42").unwrap(),
            title: "Douglas Adams".to_string(),
            notes: vec![
                ContentBlock::Heading { text: "Editor notes".into() },
                ContentBlock::Paragraph { html: "<p>Mostly harmless.</p>".into() },
            ],
            featured_pids: Some(vec![Pid::new("P31").unwrap(), Pid::new("P800").unwrap()]),
            published: true,
            first_published_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn item_page_round_trip() {
        let pool = memory_pool().await;
        let page = sample_page();
        upsert_item_page(&pool, &page).await.unwrap();

        let loaded = get_item_page(&pool, &page.qid).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Douglas Adams");
        assert_eq!(loaded.notes, page.notes);
        assert_eq!(loaded.featured_pids, page.featured_pids);
        assert!(loaded.published);
    }

    #[tokio::test]
    async fn missing_item_page_is_none() {
        let pool = memory_pool().await;
        let qid = Qid::new("Q1").unwrap();
        assert!(get_item_page(&pool, &qid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn first_class_mapping_respects_class_order() {
        let pool = memory_pool().await;
        upsert_class_mapping(
            &pool,
            &ClassMapping {
                class_qid: Qid::new("Q5").unwrap(),
                title: "Humans".to_string(),
                featured_pids: vec![Pid::new("P569").unwrap()],
            },
        )
        .await
        .unwrap();
        upsert_class_mapping(
            &pool,
            &ClassMapping {
                class_qid: Qid::new("Q11424").unwrap(),
                title: "Films".to_string(),
                featured_pids: vec![Pid::new("P57").unwrap()],
            },
        )
        .await
        .unwrap();

        let classes = vec![
            Qid::new("Q99").unwrap(), // no mapping
            Qid::new("Q11424").unwrap(),
            Qid::new("Q5").unwrap(),
        ];
        let mapping = first_class_mapping(&pool, &classes).await.unwrap().unwrap();
        assert_eq!(mapping.class_qid.as_str(), "Q11424");
    }

    #[tokio::test]
    async fn article_feeds_order_and_filter() {
        let pool = memory_pool().await;
        let older = Article {
            guid: "a-older".to_string(),
            title: "Older".to_string(),
            body: vec![ContentBlock::Paragraph { html: "<p>old</p>".into() }],
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            category: None,
            tags: vec!["pain".to_string()],
            published: true,
            first_published_at: Some("2024-01-02T10:00:00Z".parse().unwrap()),
        };
        let newer = Article {
            guid: "a-newer".to_string(),
            title: "Newer".to_string(),
            body: vec![],
            date: NaiveDate::from_ymd_opt(2024, 3, 2).unwrap(),
            category: Some("reviews".to_string()),
            tags: vec![],
            published: true,
            first_published_at: Some("2024-03-02T10:00:00Z".parse().unwrap()),
        };
        let draft = Article {
            guid: "a-draft".to_string(),
            title: "Draft".to_string(),
            body: vec![],
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            category: None,
            tags: vec!["pain".to_string()],
            published: false,
            first_published_at: None,
        };
        for article in [&older, &newer, &draft] {
            insert_article(&pool, article).await.unwrap();
        }

        let feed = published_articles(&pool).await.unwrap();
        let titles: Vec<&str> = feed.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["Newer", "Older"]);

        let tagged = articles_with_tag(&pool, "pain").await.unwrap();
        assert_eq!(tagged.len(), 1);
        assert_eq!(tagged[0].guid, "a-older");
    }

    #[tokio::test]
    async fn homepage_round_trip() {
        let pool = memory_pool().await;
        assert!(get_homepage(&pool).await.unwrap().is_none());

        let homepage = Homepage {
            link: "https://explore.ac".to_string(),
            intro: "<p>Welcome</p>".to_string(),
            intro_articles: "<p>Latest articles</p>".to_string(),
        };
        set_homepage(&pool, &homepage).await.unwrap();
        assert_eq!(get_homepage(&pool).await.unwrap().unwrap(), homepage);
    }
}
