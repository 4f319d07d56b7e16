//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly; Diesel uses
//! them for compile-time query validation and type-safe SQL generation.
//! When migrations change the schema, regenerate with `diesel print-schema`
//! or update by hand.

diesel::table! {
    /// User accounts with progression state.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Human-readable display name.
        display_name -> Varchar,
        /// Accumulated experience points.
        xp -> Int8,
        /// Count of distinct questions answered.
        answered_count -> Int8,
        /// Current rank tier, null until first ranked.
        rank_id -> Nullable<Uuid>,
        /// Subscription plan: "free" or "premium".
        plan -> Varchar,
        /// Soft-delete / suspension flag.
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Question bank.
    questions (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Statement shown to the user.
        statement -> Text,
        /// Option slot A; null when unpopulated.
        option_a -> Nullable<Text>,
        /// Option slot B.
        option_b -> Nullable<Text>,
        /// Option slot C.
        option_c -> Nullable<Text>,
        /// Option slot D.
        option_d -> Nullable<Text>,
        /// Option slot E.
        option_e -> Nullable<Text>,
        /// Label of the correct option ("A".."E").
        answer_key -> Varchar,
        /// Owning subject.
        subject_id -> Uuid,
        /// Authoring examining board, when known.
        board_id -> Nullable<Uuid>,
        /// Agency the exam was held for, when known.
        agency_id -> Nullable<Uuid>,
        /// Year of the original exam, when known.
        year -> Nullable<Int4>,
        /// Whether the question is available for answering.
        active -> Bool,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Response ledger: one row per (user, question) pair.
    question_responses (user_id, question_id) {
        /// Answering user.
        user_id -> Uuid,
        /// Answered question.
        question_id -> Uuid,
        /// Label of the chosen option ("A".."E").
        chosen_option -> Varchar,
        /// Whether the chosen option matched the answer key.
        correct -> Bool,
        /// Self-reported time to answer, in seconds.
        response_time_seconds -> Nullable<Int4>,
        /// When the submission was scored (overwritten on resubmission).
        answered_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rank tiers ("patentes") ordered by XP threshold.
    rank_tiers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Minimum XP required to hold this tier.
        xp_threshold -> Int8,
    }
}

diesel::table! {
    /// Study subjects ("matérias").
    subjects (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
        /// Discipline grouping.
        discipline -> Varchar,
    }
}

diesel::table! {
    /// Examining boards ("bancas").
    boards (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Agencies ("órgãos").
    agencies (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name.
        name -> Varchar,
    }
}

diesel::table! {
    /// Topics within a subject.
    topics (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning subject.
        subject_id -> Uuid,
        /// Display name.
        name -> Varchar,
    }
}

diesel::joinable!(topics -> subjects (subject_id));
diesel::joinable!(questions -> subjects (subject_id));

diesel::allow_tables_to_appear_in_same_query!(
    agencies,
    boards,
    question_responses,
    questions,
    rank_tiers,
    subjects,
    topics,
    users,
);
