//! Rank tiers ("patentes") and the XP ladder users climb.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named band of XP values; users are promoted when their XP crosses the
/// tier's threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankTier {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name, e.g. "Soldado" or "Capitão".
    pub name: String,
    /// Minimum XP required to hold this tier.
    pub xp_threshold: i64,
}

/// Validation errors returned by [`RankLadder::from_descending`].
///
/// Thresholds must be strictly decreasing in the supplied order; an equal
/// pair is a data-integrity violation in the tier table, not a tie the
/// engine breaks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankLadderError {
    /// The ladder contained no tiers.
    Empty,
    /// A threshold was negative.
    NegativeThreshold {
        /// The offending threshold.
        threshold: i64,
    },
    /// Two tiers shared a threshold.
    DuplicateThreshold {
        /// The duplicated threshold.
        threshold: i64,
    },
    /// Thresholds were not sorted in descending order.
    NotSortedDescending,
}

impl fmt::Display for RankLadderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "rank ladder must contain at least one tier"),
            Self::NegativeThreshold { threshold } => {
                write!(f, "rank threshold must not be negative: {threshold}")
            }
            Self::DuplicateThreshold { threshold } => {
                write!(f, "rank thresholds must be unique: {threshold} appears twice")
            }
            Self::NotSortedDescending => {
                write!(f, "rank tiers must be sorted by descending threshold")
            }
        }
    }
}

impl std::error::Error for RankLadderError {}

/// Ordered set of rank tiers, validated at load time.
///
/// ## Invariants
/// - At least one tier.
/// - Thresholds strictly decreasing in iteration order, all non-negative.
///
/// # Examples
/// ```
/// use backend::domain::{RankLadder, RankTier};
/// use uuid::Uuid;
///
/// let tier = |name: &str, xp_threshold| RankTier {
///     id: Uuid::new_v4(),
///     name: name.to_owned(),
///     xp_threshold,
/// };
/// let ladder = RankLadder::from_descending(vec![
///     tier("Aplicado", 150),
///     tier("Estudante", 50),
///     tier("Iniciante", 0),
/// ])
/// .expect("valid ladder");
///
/// assert_eq!(ladder.rank_for_xp(65).map(|t| t.name.as_str()), Some("Estudante"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RankLadder {
    tiers: Vec<RankTier>,
}

impl RankLadder {
    /// Validate and construct a ladder from tiers sorted by descending
    /// threshold.
    pub fn from_descending(tiers: Vec<RankTier>) -> Result<Self, RankLadderError> {
        if tiers.is_empty() {
            return Err(RankLadderError::Empty);
        }
        if let Some(tier) = tiers.iter().find(|tier| tier.xp_threshold < 0) {
            return Err(RankLadderError::NegativeThreshold {
                threshold: tier.xp_threshold,
            });
        }
        for pair in tiers.windows(2) {
            let [higher, lower] = pair else { continue };
            if higher.xp_threshold == lower.xp_threshold {
                return Err(RankLadderError::DuplicateThreshold {
                    threshold: higher.xp_threshold,
                });
            }
            if higher.xp_threshold < lower.xp_threshold {
                return Err(RankLadderError::NotSortedDescending);
            }
        }
        Ok(Self { tiers })
    }

    /// Tiers in descending threshold order.
    #[must_use]
    pub fn tiers(&self) -> &[RankTier] {
        &self.tiers
    }

    /// The tier a user with the given XP holds: the first tier, scanning
    /// descending, whose threshold is at most `xp`.
    ///
    /// Returns `None` when `xp` sits below every threshold (ladders usually
    /// anchor a tier at zero, making this unreachable for valid data).
    #[must_use]
    pub fn rank_for_xp(&self, xp: i64) -> Option<&RankTier> {
        self.tiers.iter().find(|tier| tier.xp_threshold <= xp)
    }
}
