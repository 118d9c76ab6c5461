use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::StoreError;
use crate::types::db::activity::{self, Entity as Activity};
use crate::types::internal::activity::ActivityType;

/// Append-only audit log of security and profile relevant actions
///
/// Appends at login/register/logout call sites are best-effort (callers
/// log and ignore failures); inside the bio-update transaction the append
/// shares the transaction's fate.
pub struct ActivityStore {
    db: DatabaseConnection,
}

impl ActivityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one entry against a caller-supplied connection
    ///
    /// Pass an open transaction to make the append atomic with the
    /// caller's other writes.
    pub async fn append_with<C: ConnectionTrait>(
        conn: &C,
        user_id: &str,
        activity_type: ActivityType,
        details: String,
    ) -> Result<(), StoreError> {
        let entry = activity::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            user_id: Set(user_id.to_string()),
            activity_type: Set(activity_type.to_string()),
            details: Set(details),
            created_at: Set(Utc::now().timestamp()),
        };

        entry.insert(conn).await?;
        Ok(())
    }

    /// Append one entry on the shared pool
    pub async fn append(
        &self,
        user_id: &str,
        activity_type: ActivityType,
        details: String,
    ) -> Result<(), StoreError> {
        Self::append_with(&self.db, user_id, activity_type, details).await
    }

    /// Most-recent-first page of a user's activity
    pub async fn list_recent(
        &self,
        user_id: &str,
        limit: u64,
    ) -> Result<Vec<activity::Model>, StoreError> {
        let activities = Activity::find()
            .filter(activity::Column::UserId.eq(user_id))
            .order_by_desc(activity::Column::CreatedAt)
            .order_by_desc(activity::Column::Id)
            .limit(limit)
            .all(&self.db)
            .await?;

        Ok(activities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::{seed_user, setup_test_db};

    #[tokio::test]
    async fn test_append_and_list_round_trip() {
        let db = setup_test_db().await;
        let user = seed_user(&db, "alice@example.com").await;
        let store = ActivityStore::new(db);

        store
            .append(&user.id, ActivityType::Login, "User logged in".to_string())
            .await
            .unwrap();

        let activities = store.list_recent(&user.id, 10).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].activity_type, "login");
        assert_eq!(activities[0].details, "User logged in");
    }

    #[tokio::test]
    async fn test_list_recent_is_newest_first_and_bounded() {
        let db = setup_test_db().await;
        let user = seed_user(&db, "alice@example.com").await;
        let store = ActivityStore::new(db);

        for i in 0..15 {
            store
                .append(&user.id, ActivityType::Message, format!("message {}", i))
                .await
                .unwrap();
        }

        let activities = store.list_recent(&user.id, 10).await.unwrap();
        assert_eq!(activities.len(), 10);
        assert_eq!(activities[0].details, "message 14");
        assert_eq!(activities[9].details, "message 5");
    }

    #[tokio::test]
    async fn test_list_recent_is_scoped_to_the_user() {
        let db = setup_test_db().await;
        let alice = seed_user(&db, "alice@example.com").await;
        let bob = seed_user(&db, "bob@example.com").await;
        let store = ActivityStore::new(db);

        store
            .append(&alice.id, ActivityType::Login, "User logged in".to_string())
            .await
            .unwrap();
        store
            .append(&bob.id, ActivityType::Logout, "User logged out".to_string())
            .await
            .unwrap();

        let activities = store.list_recent(&alice.id, 10).await.unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].user_id, alice.id);
    }

    #[tokio::test]
    async fn test_list_recent_restarts_from_scratch_each_call() {
        let db = setup_test_db().await;
        let user = seed_user(&db, "alice@example.com").await;
        let store = ActivityStore::new(db);

        store
            .append(&user.id, ActivityType::Login, "first".to_string())
            .await
            .unwrap();

        let before = store.list_recent(&user.id, 10).await.unwrap();

        store
            .append(&user.id, ActivityType::Logout, "second".to_string())
            .await
            .unwrap();

        let after = store.list_recent(&user.id, 10).await.unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(after.len(), 2);
        assert_eq!(after[0].details, "second");
    }
}
