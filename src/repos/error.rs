/**
 * Responsibility
 * - repo が上位に伝える意味の定義
 */
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// A unique column already holds the value; carries the column name.
    #[error("conflict on {0}")]
    Conflict(&'static str),
}
