//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via Diesel with async support through `diesel-async` and `bb8`
//! connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types; no business logic lives here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leak to the domain layer.
//! - **Strongly typed errors**: every database failure maps to the owning
//!   port's error enum.

mod diesel_basic_error_mapping;
mod diesel_question_repository;
mod diesel_rank_tier_repository;
mod diesel_reference_repository;
mod diesel_response_ledger;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_question_repository::DieselQuestionRepository;
pub use diesel_rank_tier_repository::DieselRankTierRepository;
pub use diesel_reference_repository::DieselReferenceRepository;
pub use diesel_response_ledger::DieselResponseLedger;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
