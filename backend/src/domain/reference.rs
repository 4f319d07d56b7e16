//! Reference-data records served through the category cache.
//!
//! Each category gets an explicit record type; the cache contract is an
//! opaque ordered list per category, not a shared dynamic shape.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A study subject ("matéria") grouped under a discipline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Discipline grouping, e.g. "Direito Penal".
    pub discipline: String,
}

/// An examining board ("banca") that authors questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// An agency ("órgão") exams are held for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agency {
    /// Stable identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// A topic within a subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    /// Stable identifier.
    pub id: Uuid,
    /// Subject this topic belongs to.
    pub subject_id: Uuid,
    /// Display name.
    pub name: String,
}

/// Cache namespace key for one reference-data listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    /// All subjects.
    Subjects,
    /// All examining boards.
    Boards,
    /// All agencies.
    Agencies,
    /// Topics belonging to one subject.
    Topics {
        /// Owning subject.
        subject_id: Uuid,
    },
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subjects => write!(f, "subjects"),
            Self::Boards => write!(f, "boards"),
            Self::Agencies => write!(f, "agencies"),
            Self::Topics { subject_id } => write!(f, "topics:{subject_id}"),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn keys_render_stable_namespace_strings() {
        assert_eq!(ReferenceKey::Subjects.to_string(), "subjects");
        assert_eq!(ReferenceKey::Boards.to_string(), "boards");
        assert_eq!(ReferenceKey::Agencies.to_string(), "agencies");

        let subject_id = Uuid::nil();
        assert_eq!(
            ReferenceKey::Topics { subject_id }.to_string(),
            format!("topics:{subject_id}")
        );
    }

    #[rstest]
    fn topic_keys_for_different_subjects_do_not_collide() {
        let left = ReferenceKey::Topics {
            subject_id: Uuid::new_v4(),
        };
        let right = ReferenceKey::Topics {
            subject_id: Uuid::new_v4(),
        };
        assert_ne!(left, right);
    }
}
