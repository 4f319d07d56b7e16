//! Port for reading the rank tier table.

use async_trait::async_trait;

use crate::domain::{RankLadder, RankLadderError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by rank tier repository adapters.
    pub enum RankTierRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "rank tier repository connection failed: {message}",
        /// Query failed during execution.
        Query { message: String } =>
            "rank tier repository query failed: {message}",
        /// The tier table violated the ladder invariants.
        Integrity { message: String } =>
            "rank tier table integrity violation: {message}",
    }
}

impl From<RankLadderError> for RankTierRepositoryError {
    fn from(error: RankLadderError) -> Self {
        Self::integrity(error.to_string())
    }
}

/// Port for loading the validated rank ladder, descending by threshold.
///
/// Adapters construct the [`RankLadder`] so duplicate or unordered
/// thresholds surface as [`RankTierRepositoryError::Integrity`] at load time
/// rather than being tie-broken during promotion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RankTierRepository: Send + Sync {
    /// Load every tier, sorted by descending XP threshold.
    async fn load_ladder(&self) -> Result<RankLadder, RankTierRepositoryError>;
}

/// Fixture implementation with a single zero-threshold tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureRankTierRepository;

#[async_trait]
impl RankTierRepository for FixtureRankTierRepository {
    async fn load_ladder(&self) -> Result<RankLadder, RankTierRepositoryError> {
        let ladder = RankLadder::from_descending(vec![crate::domain::RankTier {
            id: uuid::Uuid::nil(),
            name: "Iniciante".to_owned(),
            xp_threshold: 0,
        }])?;
        Ok(ladder)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_ladder_has_single_base_tier() {
        let repo = FixtureRankTierRepository;
        let ladder = repo.load_ladder().await.expect("fixture ladder loads");
        assert_eq!(ladder.tiers().len(), 1);
        assert_eq!(ladder.rank_for_xp(0).map(|t| t.xp_threshold), Some(0));
    }

    #[rstest]
    fn ladder_errors_map_to_integrity() {
        let err: RankTierRepositoryError = RankLadderError::DuplicateThreshold { threshold: 100 }.into();
        assert!(matches!(err, RankTierRepositoryError::Integrity { .. }));
        assert!(err.to_string().contains("100"));
    }
}
