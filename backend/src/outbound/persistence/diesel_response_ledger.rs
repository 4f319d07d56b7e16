//! PostgreSQL-backed `ResponseLedger` implementation using Diesel ORM.
//!
//! The upsert is a single `INSERT .. ON CONFLICT .. DO UPDATE` keyed by the
//! pair's primary key, with `xmax = 0` in the `RETURNING` clause reporting
//! whether the row was inserted or updated. Two submissions racing on the
//! same pair therefore resolve at the store: exactly one reports an insert.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Integer, Nullable, Timestamptz, Uuid as SqlUuid, VarChar};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ports::{
    LedgerEntryDraft, ResponseLedger, ResponseLedgerError, UpsertOutcome,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::pool::{DbPool, PoolError};
use super::schema::question_responses;

const UPSERT_SQL: &str = "\
    INSERT INTO question_responses \
        (user_id, question_id, chosen_option, correct, response_time_seconds, answered_at) \
    VALUES ($1, $2, $3, $4, $5, $6) \
    ON CONFLICT (user_id, question_id) DO UPDATE SET \
        chosen_option = EXCLUDED.chosen_option, \
        correct = EXCLUDED.correct, \
        response_time_seconds = EXCLUDED.response_time_seconds, \
        answered_at = EXCLUDED.answered_at \
    RETURNING (xmax = 0) AS inserted";

/// Row returned by the upsert: the insert-vs-update classification.
#[derive(Debug, QueryableByName)]
struct UpsertRow {
    #[diesel(sql_type = Bool)]
    inserted: bool,
}

/// Diesel-backed implementation of the response ledger port.
#[derive(Clone)]
pub struct DieselResponseLedger {
    pool: DbPool,
}

impl DieselResponseLedger {
    /// Create a new ledger adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ResponseLedgerError {
    map_basic_pool_error(error, ResponseLedgerError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ResponseLedgerError {
    map_basic_diesel_error(
        error,
        ResponseLedgerError::query,
        ResponseLedgerError::connection,
    )
}

#[async_trait]
impl ResponseLedger for DieselResponseLedger {
    async fn exists(
        &self,
        user_id: &UserId,
        question_id: Uuid,
    ) -> Result<bool, ResponseLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(diesel::dsl::exists(
            question_responses::table.filter(
                question_responses::user_id
                    .eq(user_id.as_uuid())
                    .and(question_responses::question_id.eq(question_id)),
            ),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn upsert(&self, entry: LedgerEntryDraft) -> Result<UpsertOutcome, ResponseLedgerError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::sql_query(UPSERT_SQL)
            .bind::<SqlUuid, _>(*entry.user_id.as_uuid())
            .bind::<SqlUuid, _>(entry.question_id)
            .bind::<VarChar, _>(entry.chosen_option.as_str())
            .bind::<Bool, _>(entry.correct)
            .bind::<Nullable<Integer>, _>(entry.response_time_seconds)
            .bind::<Timestamptz, _>(entry.answered_at)
            .get_result::<UpsertRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UpsertOutcome {
            inserted: row.inserted,
        })
    }
}
