//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.
//!
//! Loads question rows and rebuilds the validated domain aggregate, so rows
//! with corrupt option layouts or dangling answer keys surface as query
//! errors instead of reaching the scoring path.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{QuestionRepository, QuestionRepositoryError};
use crate::domain::{AnswerOption, OptionLabel, Question, QuestionDraft};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::QuestionRow;
use super::pool::{DbPool, PoolError};
use super::schema::questions;

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> QuestionRepositoryError {
    map_basic_pool_error(error, QuestionRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> QuestionRepositoryError {
    map_basic_diesel_error(
        error,
        QuestionRepositoryError::query,
        QuestionRepositoryError::connection,
    )
}

/// Convert a database row into a validated domain question.
fn row_to_question(row: QuestionRow) -> Result<Question, QuestionRepositoryError> {
    let QuestionRow {
        id,
        statement,
        option_a,
        option_b,
        option_c,
        option_d,
        option_e,
        answer_key,
        subject_id,
        board_id,
        agency_id,
        year,
        active,
        created_at: _,
        updated_at: _,
    } = row;

    let slots = [
        (OptionLabel::A, option_a),
        (OptionLabel::B, option_b),
        (OptionLabel::C, option_c),
        (OptionLabel::D, option_d),
        (OptionLabel::E, option_e),
    ];
    let options = slots
        .into_iter()
        .filter_map(|(label, text)| text.map(|text| AnswerOption { label, text }))
        .collect();

    let answer_key: OptionLabel = answer_key.parse().map_err(|err: String| {
        QuestionRepositoryError::query(format!("corrupt answer key for question {id}: {err}"))
    })?;

    Question::new(QuestionDraft {
        id,
        statement,
        options,
        answer_key,
        subject_id,
        board_id,
        agency_id,
        year,
        active,
    })
    .map_err(|err| QuestionRepositoryError::query(format!("corrupt question {id}: {err}")))
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn find_active_by_id(
        &self,
        question_id: Uuid,
    ) -> Result<Option<Question>, QuestionRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = questions::table
            .filter(questions::id.eq(question_id).and(questions::active.eq(true)))
            .select(QuestionRow::as_select())
            .first::<QuestionRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_question).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn valid_row() -> QuestionRow {
        let now = Utc::now();
        QuestionRow {
            id: Uuid::new_v4(),
            statement: "Qual é a alternativa correta?".to_owned(),
            option_a: Some("Certo".to_owned()),
            option_b: Some("Errado".to_owned()),
            option_c: None,
            option_d: None,
            option_e: None,
            answer_key: "A".to_owned(),
            subject_id: Uuid::new_v4(),
            board_id: None,
            agency_id: None,
            year: Some(2024),
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn row_conversion_builds_true_false_question(valid_row: QuestionRow) {
        let question = row_to_question(valid_row).expect("valid row converts");
        assert_eq!(question.options().len(), 2);
        assert_eq!(question.answer_key(), OptionLabel::A);
    }

    #[rstest]
    fn row_conversion_skips_unpopulated_slots(mut valid_row: QuestionRow) {
        valid_row.option_c = Some("Terceira".to_owned());
        valid_row.option_e = Some("Quinta".to_owned());

        let question = row_to_question(valid_row).expect("valid row converts");
        let labels: Vec<OptionLabel> = question.options().iter().map(|o| o.label).collect();
        assert_eq!(
            labels,
            vec![OptionLabel::A, OptionLabel::B, OptionLabel::C, OptionLabel::E]
        );
    }

    #[rstest]
    fn row_conversion_rejects_unknown_answer_key(mut valid_row: QuestionRow) {
        valid_row.answer_key = "X".to_owned();

        let error = row_to_question(valid_row).expect_err("corrupt key fails");
        assert!(matches!(error, QuestionRepositoryError::Query { .. }));
        assert!(error.to_string().contains("corrupt answer key"));
    }

    #[rstest]
    fn row_conversion_rejects_dangling_answer_key(mut valid_row: QuestionRow) {
        valid_row.answer_key = "E".to_owned();

        let error = row_to_question(valid_row).expect_err("dangling key fails");
        assert!(matches!(error, QuestionRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            QuestionRepositoryError::Connection { .. }
        ));
        assert!(repo_err.to_string().contains("connection refused"));
    }
}
