//! Port for the reference-data backing store (source of truth behind the
//! category cache).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Agency, Board, Subject, Topic};

use super::define_port_error;

define_port_error! {
    /// Errors raised by reference repository adapters.
    pub enum ReferenceRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "reference repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "reference repository query failed: {message}",
    }
}

/// Port for reading reference-data listings from the source of truth.
///
/// Each method returns the full ordered listing for its category; callers
/// (the cache) treat the result as an opaque snapshot.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceRepository: Send + Sync {
    /// All subjects, ordered by name.
    async fn list_subjects(&self) -> Result<Vec<Subject>, ReferenceRepositoryError>;

    /// All examining boards, ordered by name.
    async fn list_boards(&self) -> Result<Vec<Board>, ReferenceRepositoryError>;

    /// All agencies, ordered by name.
    async fn list_agencies(&self) -> Result<Vec<Agency>, ReferenceRepositoryError>;

    /// Topics for one subject, ordered by name.
    async fn list_topics(&self, subject_id: Uuid)
    -> Result<Vec<Topic>, ReferenceRepositoryError>;
}

/// Fixture implementation serving empty listings.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureReferenceRepository;

#[async_trait]
impl ReferenceRepository for FixtureReferenceRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, ReferenceRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_boards(&self) -> Result<Vec<Board>, ReferenceRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_agencies(&self) -> Result<Vec<Agency>, ReferenceRepositoryError> {
        Ok(Vec::new())
    }

    async fn list_topics(
        &self,
        _subject_id: Uuid,
    ) -> Result<Vec<Topic>, ReferenceRepositoryError> {
        Ok(Vec::new())
    }
}
