/*
 * Responsibility
 * - posts の作成・一覧・取得
 * - title は一意 (重複は RepoError::Conflict)
 * - 入力の整形 (trim / escape) と検証は DTO 側の責務。ここでは受け取った値をそのまま保存する
 */
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::repos::{error::RepoError, memory::MemoryDb};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRow {
    pub post_id: u64,
    pub title: String,
    pub content: String,
    pub author_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct PostTable {
    last_id: u64,
    rows: BTreeMap<u64, PostRow>,
}

/// Oldest first.
pub async fn list(db: &MemoryDb, limit: usize, offset: usize) -> Result<Vec<PostRow>, RepoError> {
    let table = db.posts.read().await;

    Ok(table
        .rows
        .values()
        .skip(offset)
        .take(limit)
        .cloned()
        .collect())
}

pub async fn create(
    db: &MemoryDb,
    title: &str,
    content: &str,
    author_id: u32,
) -> Result<PostRow, RepoError> {
    let mut table = db.posts.write().await;

    if table.rows.values().any(|row| row.title == title) {
        return Err(RepoError::Conflict("title"));
    }

    table.last_id += 1;
    let now = Utc::now();
    let row = PostRow {
        post_id: table.last_id,
        title: title.to_string(),
        content: content.to_string(),
        author_id,
        created_at: now,
        updated_at: now,
    };
    table.rows.insert(row.post_id, row.clone());

    Ok(row)
}

pub async fn get(db: &MemoryDb, post_id: u64) -> Result<Option<PostRow>, RepoError> {
    let table = db.posts.read().await;
    Ok(table.rows.get(&post_id).cloned())
}
