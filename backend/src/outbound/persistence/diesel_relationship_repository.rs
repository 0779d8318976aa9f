//! PostgreSQL-backed `RelationshipRepository` implementation using Diesel ORM.
//!
//! Each follow is written to the `followers` table and mirrored, roles
//! swapped, into `followees`. Both writes and the optional notification share
//! one transaction. The primary key on `followers` rejects duplicate edges,
//! including ones that race past `edge_exists`.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{RelationshipRepository, RelationshipRepositoryError};
use crate::domain::{FollowEdge, FollowRemoval, NewNotification, NotificationKind, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewFolloweeRow, NewFollowerRow, NewNotificationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{followees, followers, notifications};

/// Diesel-backed implementation of the relationship repository port.
#[derive(Clone)]
pub struct DieselRelationshipRepository {
    pool: DbPool,
}

impl DieselRelationshipRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RelationshipRepositoryError {
    RelationshipRepositoryError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error, operation: &str) -> RelationshipRepositoryError {
    match classify_diesel_error(error, operation) {
        DieselFailure::UniqueViolation => RelationshipRepositoryError::duplicate_edge(),
        DieselFailure::Connection(message) => RelationshipRepositoryError::connection(message),
        DieselFailure::Query(message) => RelationshipRepositoryError::query(message),
        DieselFailure::ForeignKeyViolation => {
            RelationshipRepositoryError::query("relationship references missing row")
        }
    }
}

fn ids_to_domain(rows: Vec<String>) -> Result<Vec<UserId>, RelationshipRepositoryError> {
    rows.into_iter()
        .map(|raw| {
            UserId::new(raw).map_err(|err| {
                RelationshipRepositoryError::query(format!("stored user id is invalid: {err}"))
            })
        })
        .collect()
}

#[async_trait]
impl RelationshipRepository for DieselRelationshipRepository {
    async fn edge_exists(&self, edge: &FollowEdge) -> Result<bool, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(
            followers::table
                .filter(followers::follower_id.eq(edge.follower.as_ref()))
                .filter(followers::followee_id.eq(edge.followee.as_ref())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(err, "follow edge lookup"))
    }

    async fn insert_follow(
        &self,
        edge: &FollowEdge,
        notification: Option<NewNotification>,
    ) -> Result<(), RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let follower = NewFollowerRow {
            follower_id: edge.follower.as_ref(),
            followee_id: edge.followee.as_ref(),
        };
        let followee = NewFolloweeRow {
            follower_id: edge.followee.as_ref(),
            followee_id: edge.follower.as_ref(),
        };
        let notification_row = notification.as_ref().map(|note| NewNotificationRow {
            id: Uuid::new_v4(),
            to_id: note.to.as_ref(),
            from_id: note.from.as_ref(),
            kind: note.kind.as_str(),
            link: note.link.as_str(),
        });

        conn.transaction(|conn| {
            async move {
                diesel::insert_into(followers::table)
                    .values(&follower)
                    .execute(conn)
                    .await?;
                diesel::insert_into(followees::table)
                    .values(&followee)
                    .execute(conn)
                    .await?;
                if let Some(row) = notification_row.as_ref() {
                    diesel::insert_into(notifications::table)
                        .values(row)
                        .execute(conn)
                        .await?;
                }
                Ok::<_, diesel::result::Error>(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_diesel_error(err, "follow insert"))
    }

    async fn delete_follow(
        &self,
        edge: &FollowEdge,
        notification_kind: Option<NotificationKind>,
    ) -> Result<FollowRemoval, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let actor = edge.follower.as_ref();
        let target = edge.followee.as_ref();

        let removal = conn
            .transaction(|conn| {
                async move {
                    let followers_rows = diesel::delete(
                        followers::table
                            .filter(followers::follower_id.eq(actor))
                            .filter(followers::followee_id.eq(target)),
                    )
                    .execute(conn)
                    .await?;
                    let followees_rows = diesel::delete(
                        followees::table
                            .filter(followees::follower_id.eq(target))
                            .filter(followees::followee_id.eq(actor)),
                    )
                    .execute(conn)
                    .await?;
                    let notifications_removed = match notification_kind {
                        Some(kind) => {
                            diesel::delete(
                                notifications::table
                                    .filter(notifications::to_id.eq(target))
                                    .filter(notifications::from_id.eq(actor))
                                    .filter(notifications::kind.eq(kind.as_str())),
                            )
                            .execute(conn)
                            .await?
                        }
                        None => 0,
                    };
                    Ok::<_, diesel::result::Error>(FollowRemoval {
                        followers_rows,
                        followees_rows,
                        notifications: notifications_removed,
                    })
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| map_diesel_error(err, "follow delete"))?;

        if removal.followers_rows != removal.followees_rows {
            debug!(
                %actor,
                %target,
                followers = removal.followers_rows,
                followees = removal.followees_rows,
                "follow indexes disagreed before unfollow"
            );
        }
        Ok(removal)
    }

    async fn list_followers(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<String> = followers::table
            .filter(followers::followee_id.eq(user.as_ref()))
            .order_by((followers::created_at, followers::follower_id))
            .select(followers::follower_id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "followers list"))?;
        ids_to_domain(rows)
    }

    async fn list_followees(
        &self,
        user: &UserId,
    ) -> Result<Vec<UserId>, RelationshipRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Mirror rows store the actor in `followee_id`.
        let rows: Vec<String> = followees::table
            .filter(followees::followee_id.eq(user.as_ref()))
            .order_by((followees::created_at, followees::follower_id))
            .select(followees::follower_id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, "followees list"))?;
        ids_to_domain(rows)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for relationship error mapping.
    use super::*;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[rstest]
    fn unique_violation_maps_to_duplicate_edge() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new("duplicate key".to_string()),
        );

        assert_eq!(
            map_diesel_error(diesel_err, "follow insert"),
            RelationshipRepositoryError::DuplicateEdge
        );
    }

    #[rstest]
    fn closed_connection_maps_to_connection_error() {
        let diesel_err = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new("server closed the connection".to_string()),
        );

        assert!(matches!(
            map_diesel_error(diesel_err, "follow insert"),
            RelationshipRepositoryError::Connection { .. }
        ));
    }

    #[rstest]
    fn pool_errors_map_to_connection_error() {
        let err = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(err, RelationshipRepositoryError::connection("timed out"));
    }

    #[rstest]
    fn stored_ids_are_validated() {
        let err = ids_to_domain(vec!["user_a".to_owned(), "bad id".to_owned()])
            .expect_err("invalid id rejected");
        assert!(matches!(err, RelationshipRepositoryError::Query { .. }));
    }
}
