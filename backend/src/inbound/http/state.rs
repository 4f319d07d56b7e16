//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ReferenceCacheControl, ReferenceQuery, SubmissionService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Answer submission and progression use-case.
    pub submissions: Arc<dyn SubmissionService>,
    /// Cached reference-data reads.
    pub reference: Arc<dyn ReferenceQuery>,
    /// Invalidation hook fired by admin mutations.
    pub reference_cache: Arc<dyn ReferenceCacheControl>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    pub fn new(
        submissions: Arc<dyn SubmissionService>,
        reference: Arc<dyn ReferenceQuery>,
        reference_cache: Arc<dyn ReferenceCacheControl>,
    ) -> Self {
        Self {
            submissions,
            reference,
            reference_cache,
        }
    }
}
