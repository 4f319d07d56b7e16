//! PostgreSQL-backed `RankTierRepository` implementation using Diesel ORM.
//!
//! Loads the full tier table sorted by descending threshold and validates it
//! into a [`RankLadder`], so duplicate or unordered thresholds fail the load
//! as integrity errors instead of being tie-broken downstream.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{RankTierRepository, RankTierRepositoryError};
use crate::domain::{RankLadder, RankTier};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::RankTierRow;
use super::pool::{DbPool, PoolError};
use super::schema::rank_tiers;

/// Diesel-backed implementation of the rank tier repository port.
#[derive(Clone)]
pub struct DieselRankTierRepository {
    pool: DbPool,
}

impl DieselRankTierRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> RankTierRepositoryError {
    map_basic_pool_error(error, RankTierRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> RankTierRepositoryError {
    map_basic_diesel_error(
        error,
        RankTierRepositoryError::query,
        RankTierRepositoryError::connection,
    )
}

fn rows_to_ladder(rows: Vec<RankTierRow>) -> Result<RankLadder, RankTierRepositoryError> {
    let tiers = rows
        .into_iter()
        .map(|row| RankTier {
            id: row.id,
            name: row.name,
            xp_threshold: row.xp_threshold,
        })
        .collect();
    Ok(RankLadder::from_descending(tiers)?)
}

#[async_trait]
impl RankTierRepository for DieselRankTierRepository {
    async fn load_ladder(&self) -> Result<RankLadder, RankTierRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RankTierRow> = rank_tiers::table
            .order(rank_tiers::xp_threshold.desc())
            .select(RankTierRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_ladder(rows)
    }
}
