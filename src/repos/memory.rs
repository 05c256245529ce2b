/*
 * Responsibility
 * - プロセス内ストア (posts / users テーブル相当)
 * - repo 関数は &MemoryDb を受け取り、テーブル単位の RwLock で読み書きする
 *
 * Notes
 * - 再起動で消える。永続化が必要になったら repo 関数のシグネチャはそのままで差し替える
 */
use tokio::sync::RwLock;

use crate::repos::post_repo::PostTable;
use crate::repos::user_repo::UserTable;

#[derive(Debug, Default)]
pub struct MemoryDb {
    pub(crate) posts: RwLock<PostTable>,
    pub(crate) users: RwLock<UserTable>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }
}
