//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Progression mutations (`record_first_answer`) run as single UPDATE
//! statements with column arithmetic, so concurrent submissions never lose
//! counter increments to read-modify-write races.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{PlanStatus, User, UserDraft, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRepositoryError {
    map_basic_pool_error(error, UserRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    map_basic_diesel_error(
        error,
        UserRepositoryError::query,
        UserRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain user.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let UserRow {
        id,
        display_name,
        xp,
        answered_count,
        rank_id,
        plan,
        active,
        created_at: _,
        updated_at: _,
    } = row;

    let plan: PlanStatus = plan.parse().map_err(|err: String| {
        UserRepositoryError::query(format!("corrupt plan for user {id}: {err}"))
    })?;

    User::new(UserDraft {
        id: UserId::from_uuid(id),
        display_name,
        xp,
        answered_count,
        rank_id,
        plan,
        active,
    })
    .map_err(|err| UserRepositoryError::query(format!("corrupt user {id}: {err}")))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(user_id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn record_first_answer(
        &self,
        user_id: &UserId,
        xp_award: i64,
    ) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(users::table.filter(users::id.eq(user_id.as_uuid())))
            .set((
                users::answered_count.eq(users::answered_count + 1),
                users::xp.eq(users::xp + xp_award),
            ))
            .returning(UserRow::as_returning())
            .get_result::<UserRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(row)
    }

    async fn set_rank(&self, user_id: &UserId, rank_id: Uuid) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(users::table.filter(users::id.eq(user_id.as_uuid())))
            .set(users::rank_id.eq(Some(rank_id)))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            display_name: "Recruta Silva".to_owned(),
            xp: 45,
            answered_count: 3,
            rank_id: Some(Uuid::new_v4()),
            plan: "free".to_owned(),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_conversion_builds_domain_user(valid_row: UserRow) {
        let user = row_to_user(valid_row).expect("valid row converts");
        assert_eq!(user.xp(), 45);
        assert_eq!(user.plan(), PlanStatus::Free);
    }

    #[rstest]
    fn row_conversion_rejects_unknown_plan(mut valid_row: UserRow) {
        valid_row.plan = "gold".to_owned();

        let error = row_to_user(valid_row).expect_err("corrupt plan fails");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
        assert!(error.to_string().contains("corrupt plan"));
    }

    #[rstest]
    fn row_conversion_rejects_negative_counters(mut valid_row: UserRow) {
        valid_row.answered_count = -1;

        let error = row_to_user(valid_row).expect_err("negative counter fails");
        assert!(matches!(error, UserRepositoryError::Query { .. }));
    }

    #[rstest]
    fn diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(repo_err, UserRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }
}
