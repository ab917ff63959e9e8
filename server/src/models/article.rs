use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};

/// One cached summary, keyed by the exact article URL.
#[derive(Clone, Debug, Serialize, Deserialize, FromRow)]
pub struct ArticleSummary {
    pub id: i64,
    pub link: String,
    pub title: String,
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

/// Projection returned by the title search endpoint.
#[derive(Clone, Debug, Serialize, FromRow)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub link: String,
}

impl ArticleSummary {
    pub async fn find_by_link(
        pool: &SqlitePool,
        link: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            "SELECT id, link, title, summary, created_at
             FROM article_summaries WHERE link = ?",
        )
        .bind(link)
        .fetch_optional(pool)
        .await
    }

    pub async fn insert(
        pool: &SqlitePool,
        link: &str,
        title: &str,
        summary: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO article_summaries (link, title, summary, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(link)
        .bind(title)
        .bind(summary)
        .bind(Utc::now())
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Case-insensitive substring match over stored titles.
    pub async fn search_titles(
        pool: &SqlitePool,
        query: &str,
    ) -> Result<Vec<SearchHit>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(query));
        sqlx::query_as::<_, SearchHit>(
            "SELECT id, title, link FROM article_summaries
             WHERE title LIKE ? ESCAPE '\\' ORDER BY id DESC",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }
}

fn escape_like(query: &str) -> String {
    query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_pool() -> SqlitePool {
        db::test_pool().await
    }

    #[tokio::test]
    async fn insert_then_find_by_exact_link() {
        let pool = test_pool().await;
        ArticleSummary::insert(&pool, "https://example.com/a", "A Title", "A summary.")
            .await
            .unwrap();

        let found = ArticleSummary::find_by_link(&pool, "https://example.com/a")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.title, "A Title");
        assert_eq!(found.summary, "A summary.");

        let missing = ArticleSummary::find_by_link(&pool, "https://example.com/other")
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn link_is_unique() {
        let pool = test_pool().await;
        ArticleSummary::insert(&pool, "https://example.com/a", "T", "S")
            .await
            .unwrap();
        let dup = ArticleSummary::insert(&pool, "https://example.com/a", "T2", "S2").await;
        assert!(dup.is_err());
    }

    #[tokio::test]
    async fn search_matches_substring_case_insensitively() {
        let pool = test_pool().await;
        ArticleSummary::insert(&pool, "https://example.com/1", "Budget Vote Passes", "s")
            .await
            .unwrap();
        ArticleSummary::insert(&pool, "https://example.com/2", "Weather Outlook", "s")
            .await
            .unwrap();

        let hits = ArticleSummary::search_titles(&pool, "budget").await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Budget Vote Passes");
        assert_eq!(hits[0].link, "https://example.com/1");

        let none = ArticleSummary::search_titles(&pool, "election").await.unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn search_treats_like_wildcards_literally() {
        let pool = test_pool().await;
        ArticleSummary::insert(&pool, "https://example.com/1", "100% Renewable", "s")
            .await
            .unwrap();
        ArticleSummary::insert(&pool, "https://example.com/2", "Plain Title", "s")
            .await
            .unwrap();

        let hits = ArticleSummary::search_titles(&pool, "100%").await.unwrap();
        assert_eq!(hits.len(), 1);

        let wildcard = ArticleSummary::search_titles(&pool, "%").await.unwrap();
        assert_eq!(wildcard.len(), 1, "bare %% must not match everything");
    }
}
