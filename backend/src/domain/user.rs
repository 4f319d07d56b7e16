//! User aggregate: identity, plan status, and progression counters.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by [`UserId::new`] and [`User::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The identifier was empty.
    EmptyId,
    /// The identifier was not a valid UUID.
    InvalidId,
    /// Experience points were negative.
    NegativeXp,
    /// The answered-question counter was negative.
    NegativeAnsweredCount,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::NegativeXp => write!(f, "xp must not be negative"),
            Self::NegativeAnsweredCount => write!(f, "answered count must not be negative"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed))
    }

    /// Construct a [`UserId`] from an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Subscription plan gating the free-tier answer quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Free tier: limited to a fixed number of distinct answered questions.
    Free,
    /// Paying tier: no answer quota.
    Premium,
}

impl PlanStatus {
    /// Stable storage representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
        }
    }
}

impl std::str::FromStr for PlanStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            other => Err(format!("unknown plan status: {other}")),
        }
    }
}

/// Field bundle for constructing a [`User`].
#[derive(Debug, Clone)]
pub struct UserDraft {
    /// Stable identifier.
    pub id: UserId,
    /// Display name shown on leaderboards.
    pub display_name: String,
    /// Accumulated experience points.
    pub xp: i64,
    /// Count of distinct questions answered.
    pub answered_count: i64,
    /// Current rank tier, if the user has been ranked.
    pub rank_id: Option<Uuid>,
    /// Subscription plan.
    pub plan: PlanStatus,
    /// Whether the account is active.
    pub active: bool,
}

/// A registered user with progression state.
///
/// ## Invariants
/// - `xp` and `answered_count` are non-negative.
///
/// Progression mutations happen through the user repository port so they stay
/// atomic at the store; this type is a read model plus validation.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    display_name: String,
    xp: i64,
    answered_count: i64,
    rank_id: Option<Uuid>,
    plan: PlanStatus,
    active: bool,
}

impl User {
    /// Validate and construct a user from its draft fields.
    pub fn new(draft: UserDraft) -> Result<Self, UserValidationError> {
        let UserDraft {
            id,
            display_name,
            xp,
            answered_count,
            rank_id,
            plan,
            active,
        } = draft;

        if xp < 0 {
            return Err(UserValidationError::NegativeXp);
        }
        if answered_count < 0 {
            return Err(UserValidationError::NegativeAnsweredCount);
        }

        Ok(Self {
            id,
            display_name,
            xp,
            answered_count,
            rank_id,
            plan,
            active,
        })
    }

    /// Stable identifier.
    #[must_use]
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Display name shown on leaderboards.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Accumulated experience points.
    #[must_use]
    pub fn xp(&self) -> i64 {
        self.xp
    }

    /// Count of distinct questions answered.
    #[must_use]
    pub fn answered_count(&self) -> i64 {
        self.answered_count
    }

    /// Current rank tier, if any.
    #[must_use]
    pub fn rank_id(&self) -> Option<Uuid> {
        self.rank_id
    }

    /// Subscription plan.
    #[must_use]
    pub fn plan(&self) -> PlanStatus {
        self.plan
    }

    /// Whether the account is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the user is on the paying tier.
    #[must_use]
    pub fn is_premium(&self) -> bool {
        self.plan == PlanStatus::Premium
    }
}
