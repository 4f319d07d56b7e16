//! Port for reading questions from the question store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::Question;

use super::define_port_error;

define_port_error! {
    /// Errors raised by question repository adapters.
    pub enum QuestionRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "question repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "question repository query failed: {message}",
    }
}

/// Port for reading questions. The progression engine never mutates them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find an active question by id. Inactive questions are treated as
    /// absent.
    async fn find_active_by_id(
        &self,
        question_id: Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError>;
}

/// Fixture implementation for tests and no-database startup.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionRepository;

#[async_trait]
impl QuestionRepository for FixtureQuestionRepository {
    async fn find_active_by_id(
        &self,
        _question_id: Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_lookup_returns_none() {
        let repo = FixtureQuestionRepository;
        let found = repo
            .find_active_by_id(Uuid::new_v4())
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[rstest]
    fn connection_error_formats_message() {
        let err = QuestionRepositoryError::connection("pool exhausted");
        assert!(err.to_string().contains("pool exhausted"));
    }
}
