//! Driving ports for cached reference-data reads and cache invalidation.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Agency, Board, Error, Subject, Topic};

/// Driving port: serve reference-data listings, typically through the
/// category cache.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReferenceQuery: Send + Sync {
    /// All subjects, ordered by name.
    async fn list_subjects(&self) -> Result<Vec<Subject>, Error>;

    /// All examining boards, ordered by name.
    async fn list_boards(&self) -> Result<Vec<Board>, Error>;

    /// All agencies, ordered by name.
    async fn list_agencies(&self) -> Result<Vec<Agency>, Error>;

    /// Topics for one subject, ordered by name.
    async fn list_topics(&self, subject_id: Uuid) -> Result<Vec<Topic>, Error>;
}

/// Driving port: the invalidation hook admin mutations fire.
///
/// Any create/update/delete on a subject, board, agency, or topic must call
/// [`ReferenceCacheControl::invalidate_all`] synchronously before reporting
/// success, so no reader is served a pre-mutation listing past that point.
#[cfg_attr(test, mockall::automock)]
pub trait ReferenceCacheControl: Send + Sync {
    /// Drop every cached listing.
    fn invalidate_all(&self);
}
