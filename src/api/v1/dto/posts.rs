/*
 * Responsibility
 * - Posts の request/response DTO
 * - 作成リクエストの整形 (trim + HTML escape) と必須項目チェック
 *
 * Notes
 * - 欠けたフィールドは空文字 / 0 として受け、validate で弾く (422)
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::repos::post_repo::PostRow;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub author_id: u32,
}

impl CreatePostRequest {
    /// Trim surrounding whitespace, then escape HTML special characters.
    pub fn prepare(self) -> Self {
        Self {
            title: escape_html(self.title.trim()),
            content: escape_html(self.content.trim()),
            author_id: self.author_id,
        }
    }

    /// Expects a prepared request.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() {
            return Err("title is required");
        }
        if self.content.is_empty() {
            return Err("content is required");
        }
        if self.author_id < 1 {
            return Err("author_id is required");
        }

        Ok(())
    }
}

// Same five entities as Go's html.EscapeString.
fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&#34;"),
            _ => out.push(c),
        }
    }
    out
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub author_id: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.post_id,
            title: row.title,
            content: row.content,
            author_id: row.author_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
