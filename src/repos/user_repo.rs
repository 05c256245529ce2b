/*
 * Responsibility
 * - users の登録と email 検索 (login 用)
 * - email は一意 (重複は RepoError::Conflict)
 *
 * Notes
 * - パスワードは平文で保持し、そのまま比較する。ハッシュ化はこのサービスの範囲外
 */
use std::fmt;

use crate::repos::{error::RepoError, memory::MemoryDb};

#[derive(Clone)]
pub struct UserRow {
    pub user_id: u32,
    pub email: String,
    password: String,
}

impl UserRow {
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }
}

impl fmt::Debug for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserRow")
            .field("user_id", &self.user_id)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Default)]
pub struct UserTable {
    rows: Vec<UserRow>,
}

/// Ids start at 1, so a zero `author_id` never belongs to anyone.
pub async fn create(db: &MemoryDb, email: &str, password: &str) -> Result<UserRow, RepoError> {
    let mut table = db.users.write().await;

    if table.rows.iter().any(|u| u.email == email) {
        return Err(RepoError::Conflict("email"));
    }

    let user_id = table.rows.last().map_or(1, |u| u.user_id.saturating_add(1));
    let row = UserRow {
        user_id,
        email: email.to_string(),
        password: password.to_string(),
    };
    table.rows.push(row.clone());

    Ok(row)
}

pub async fn find_by_email(db: &MemoryDb, email: &str) -> Result<Option<UserRow>, RepoError> {
    let table = db.users.read().await;
    Ok(table.rows.iter().find(|u| u.email == email).cloned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_user_is_found_by_email() {
        let db = MemoryDb::new();
        let alice = create(&db, "alice@example.com", "pw-a").await.unwrap();
        let bob = create(&db, "bob@example.com", "pw-b").await.unwrap();
        assert_eq!((alice.user_id, bob.user_id), (1, 2));

        let found = find_by_email(&db, "bob@example.com").await.unwrap().unwrap();
        assert_eq!(found.user_id, 2);
        assert!(found.password_matches("pw-b"));
        assert!(!found.password_matches("pw-a"));

        assert!(find_by_email(&db, "carol@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let db = MemoryDb::new();
        create(&db, "alice@example.com", "x").await.unwrap();

        let err = create(&db, "alice@example.com", "y").await.unwrap_err();
        assert_eq!(err, RepoError::Conflict("email"));
    }

    #[test]
    fn debug_omits_password() {
        let row = UserRow {
            user_id: 1,
            email: "alice@example.com".into(),
            password: "hunter2".into(),
        };
        assert!(!format!("{row:?}").contains("hunter2"));
    }
}
