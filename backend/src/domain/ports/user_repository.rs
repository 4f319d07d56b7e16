//! Port for reading and mutating user progression state.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{PlanStatus, User, UserDraft, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "user repository query failed: {message}",
    }
}

/// Port for user reads and the progression mutations.
///
/// `record_first_answer` must be a single atomic read-modify-write at the
/// store (counter increment plus XP award in one statement), returning the
/// updated record so rank evaluation sees the post-award XP.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Record a first submission: increment the answered counter by one and
    /// add `xp_award` experience points, atomically. Returns the updated
    /// user.
    async fn record_first_answer(
        &self,
        user_id: &UserId,
        xp_award: i64,
    ) -> Result<User, UserRepositoryError>;

    /// Persist a newly attained rank tier.
    async fn set_rank(&self, user_id: &UserId, rank_id: Uuid) -> Result<(), UserRepositoryError>;
}

/// Fixture implementation for tests and no-database startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn record_first_answer(
        &self,
        user_id: &UserId,
        xp_award: i64,
    ) -> Result<User, UserRepositoryError> {
        User::new(UserDraft {
            id: user_id.clone(),
            display_name: String::new(),
            xp: xp_award,
            answered_count: 1,
            rank_id: None,
            plan: PlanStatus::Free,
            active: true,
        })
        .map_err(|err| UserRepositoryError::query(err.to_string()))
    }

    async fn set_rank(&self, _user_id: &UserId, _rank_id: Uuid) -> Result<(), UserRepositoryError> {
        Ok(())
    }
}
