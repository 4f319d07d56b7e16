//! PostgreSQL-backed `ReferenceRepository` implementation using Diesel ORM.
//!
//! The source of truth behind the reference cache: each method loads the
//! full listing for its category ordered by name.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ReferenceRepository, ReferenceRepositoryError};
use crate::domain::{Agency, Board, Subject, Topic};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{AgencyRow, BoardRow, SubjectRow, TopicRow};
use super::pool::{DbPool, PoolError};
use super::schema::{agencies, boards, subjects, topics};

/// Diesel-backed implementation of the reference repository port.
#[derive(Clone)]
pub struct DieselReferenceRepository {
    pool: DbPool,
}

impl DieselReferenceRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> ReferenceRepositoryError {
    map_basic_pool_error(error, ReferenceRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ReferenceRepositoryError {
    map_basic_diesel_error(
        error,
        ReferenceRepositoryError::query,
        ReferenceRepositoryError::connection,
    )
}

#[async_trait]
impl ReferenceRepository for DieselReferenceRepository {
    async fn list_subjects(&self) -> Result<Vec<Subject>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<SubjectRow> = subjects::table
            .order(subjects::name.asc())
            .select(SubjectRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Subject {
                id: row.id,
                name: row.name,
                discipline: row.discipline,
            })
            .collect())
    }

    async fn list_boards(&self) -> Result<Vec<Board>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<BoardRow> = boards::table
            .order(boards::name.asc())
            .select(BoardRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Board {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn list_agencies(&self) -> Result<Vec<Agency>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AgencyRow> = agencies::table
            .order(agencies::name.asc())
            .select(AgencyRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Agency {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn list_topics(
        &self,
        subject_id: Uuid,
    ) -> Result<Vec<Topic>, ReferenceRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<TopicRow> = topics::table
            .filter(topics::subject_id.eq(subject_id))
            .order(topics::name.asc())
            .select(TopicRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|row| Topic {
                id: row.id,
                subject_id: row.subject_id,
                name: row.name,
            })
            .collect())
    }
}
