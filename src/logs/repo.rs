use std::sync::Mutex;

use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use time::OffsetDateTime;

use super::repo_types::{LogEntry, NewLogEntry};

/// Append-only store for food log rows.
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Persist one row and return its id. Ids increase monotonically.
    async fn append(&self, entry: &NewLogEntry) -> anyhow::Result<i64>;
}

pub struct PgLogStore {
    db: PgPool,
}

impl PgLogStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl LogStore for PgLogStore {
    async fn append(&self, entry: &NewLogEntry) -> anyhow::Result<i64> {
        let p = &entry.profile;
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO food_logs
                (user_id, food_name, quantity_g, carbs, calories, protein, fat, fiber,
                 estimated, date, meal_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id
            "#,
        )
        .bind(entry.user_id)
        .bind(&entry.food_name)
        .bind(entry.quantity_g)
        .bind(p.carbs_g)
        .bind(p.calories)
        .bind(p.protein_g)
        .bind(p.fat_g)
        .bind(p.fiber_g)
        .bind(entry.estimated)
        .bind(entry.date)
        .bind(&entry.meal_type)
        .fetch_one(&self.db)
        .await
        .context("insert food log")?;
        Ok(id)
    }
}

/// In-process store for tests and database-less runs.
#[derive(Default)]
pub struct MemoryLogStore {
    rows: Mutex<Vec<LogEntry>>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl LogStore for MemoryLogStore {
    async fn append(&self, entry: &NewLogEntry) -> anyhow::Result<i64> {
        let mut rows = self
            .rows
            .lock()
            .map_err(|_| anyhow::anyhow!("log store lock poisoned"))?;
        let id = rows.len() as i64 + 1;
        let p = &entry.profile;
        rows.push(LogEntry {
            id,
            user_id: entry.user_id,
            food_name: entry.food_name.clone(),
            quantity_g: entry.quantity_g,
            carbs: p.carbs_g,
            calories: p.calories,
            protein: p.protein_g,
            fat: p.fat_g,
            fiber: p.fiber_g,
            estimated: entry.estimated,
            date: entry.date,
            meal_type: entry.meal_type.clone(),
            created_at: OffsetDateTime::now_utc(),
        });
        Ok(id)
    }
}
