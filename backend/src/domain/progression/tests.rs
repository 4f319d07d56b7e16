//! Tests for the answer-submission and progression engine.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use uuid::Uuid;

use super::*;
use crate::domain::ports::{
    MockQuestionRepository, MockRankTierRepository, MockResponseLedger, MockUserRepository,
    UpsertOutcome,
};
use crate::domain::{
    AnswerOption, ErrorCode, OptionLabel, PlanStatus, QuestionDraft, RankLadder, UserDraft, UserId,
};

struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }
}

fn question_id() -> Uuid {
    Uuid::from_u128(0x51)
}

fn tier_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn sample_question() -> Question {
    let option = |label: OptionLabel, text: &str| AnswerOption {
        label,
        text: text.to_owned(),
    };
    Question::new(QuestionDraft {
        id: question_id(),
        statement: "Qual é a alternativa correta?".to_owned(),
        options: vec![
            option(OptionLabel::A, "Primeira"),
            option(OptionLabel::B, "Segunda"),
            option(OptionLabel::C, "Terceira"),
        ],
        answer_key: OptionLabel::B,
        subject_id: Uuid::new_v4(),
        board_id: None,
        agency_id: None,
        year: Some(2024),
        active: true,
    })
    .expect("valid question")
}

fn sample_user(id: &UserId, xp: i64, answered_count: i64, plan: PlanStatus) -> User {
    User::new(UserDraft {
        id: id.clone(),
        display_name: "Recruta Silva".to_owned(),
        xp,
        answered_count,
        rank_id: Some(tier_id(1)),
        plan,
        active: true,
    })
    .expect("valid user")
}

fn sample_ladder() -> RankLadder {
    let tier = |id, name: &str, xp_threshold| RankTier {
        id,
        name: name.to_owned(),
        xp_threshold,
    };
    RankLadder::from_descending(vec![
        tier(tier_id(3), "Aplicado", 150),
        tier(tier_id(2), "Estudante", 50),
        tier(tier_id(1), "Iniciante", 0),
    ])
    .expect("valid ladder")
}

fn request(user_id: &UserId, chosen_option: OptionLabel) -> SubmitAnswerRequest {
    SubmitAnswerRequest {
        user_id: user_id.clone(),
        question_id: question_id(),
        chosen_option,
        response_time_seconds: Some(30),
    }
}

struct Mocks {
    questions: MockQuestionRepository,
    users: MockUserRepository,
    rank_tiers: MockRankTierRepository,
    ledger: MockResponseLedger,
}

impl Mocks {
    fn new() -> Self {
        Self {
            questions: MockQuestionRepository::new(),
            users: MockUserRepository::new(),
            rank_tiers: MockRankTierRepository::new(),
            ledger: MockResponseLedger::new(),
        }
    }

    fn with_question(mut self) -> Self {
        self.questions
            .expect_find_active_by_id()
            .returning(|_| Ok(Some(sample_question())));
        self
    }

    fn into_service(
        self,
    ) -> ProgressionService<
        MockQuestionRepository,
        MockUserRepository,
        MockRankTierRepository,
        MockResponseLedger,
    > {
        ProgressionService::new(
            Arc::new(self.questions),
            Arc::new(self.users),
            Arc::new(self.rank_tiers),
            Arc::new(self.ledger),
            Arc::new(FixtureClock),
        )
    }
}

/// A correct first answer at 45 XP lands on 65 and promotes the user from
/// "Iniciante" to "Estudante".
#[tokio::test]
async fn correct_first_submission_awards_xp_and_promotes() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .times(1)
        .returning(move |_| Ok(Some(sample_user(&find_id, 45, 3, PlanStatus::Free))));

    mocks
        .ledger
        .expect_upsert()
        .times(1)
        .withf(|entry| entry.correct && entry.chosen_option == OptionLabel::B)
        .returning(|_| Ok(UpsertOutcome { inserted: true }));

    let award_id = user_id.clone();
    mocks
        .users
        .expect_record_first_answer()
        .times(1)
        .withf(|_, xp_award| *xp_award == CORRECT_ANSWER_XP)
        .returning(move |_, xp_award| Ok(sample_user(&award_id, 45 + xp_award, 4, PlanStatus::Free)));

    mocks
        .rank_tiers
        .expect_load_ladder()
        .times(1)
        .returning(|| Ok(sample_ladder()));

    mocks
        .users
        .expect_set_rank()
        .times(1)
        .withf(|_, rank_id| *rank_id == tier_id(2))
        .returning(|_, _| Ok(()));

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect("submission succeeds");

    assert!(response.correct);
    assert_eq!(response.xp_awarded, 20);
    assert_eq!(response.new_total_xp, 65);
    assert_eq!(response.answered_count, 4);
    assert!(!response.was_resubmission);
    let new_rank = response.new_rank.expect("promotion reported");
    assert_eq!(new_rank.name, "Estudante");
}

#[tokio::test]
async fn wrong_first_submission_counts_but_awards_nothing() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 45, 3, PlanStatus::Free))));

    mocks
        .ledger
        .expect_upsert()
        .times(1)
        .withf(|entry| !entry.correct)
        .returning(|_| Ok(UpsertOutcome { inserted: true }));

    let award_id = user_id.clone();
    mocks
        .users
        .expect_record_first_answer()
        .times(1)
        .withf(|_, xp_award| *xp_award == 0)
        .returning(move |_, _| Ok(sample_user(&award_id, 45, 4, PlanStatus::Free)));

    // No XP change, so the rank ladder is never consulted.
    mocks.rank_tiers.expect_load_ladder().times(0);
    mocks.users.expect_set_rank().times(0);

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::A))
        .await
        .expect("submission succeeds");

    assert!(!response.correct);
    assert_eq!(response.answer_key, OptionLabel::B);
    assert_eq!(response.xp_awarded, 0);
    assert_eq!(response.answered_count, 4);
    assert!(response.new_rank.is_none());
}

#[tokio::test]
async fn resubmission_rescores_without_counting_or_awarding() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 65, 4, PlanStatus::Free))));

    mocks
        .ledger
        .expect_upsert()
        .times(1)
        .returning(|_| Ok(UpsertOutcome { inserted: false }));

    // Counters and XP stay untouched on resubmission.
    mocks.users.expect_record_first_answer().times(0);
    mocks.rank_tiers.expect_load_ladder().times(0);
    mocks.users.expect_set_rank().times(0);

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect("submission succeeds");

    assert!(response.was_resubmission);
    assert!(response.correct);
    assert_eq!(response.xp_awarded, 0);
    assert_eq!(response.new_total_xp, 65);
    assert_eq!(response.answered_count, 4);
    assert!(response.new_rank.is_none());
}

#[tokio::test]
async fn quota_blocks_new_pair_for_free_user() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 120, 10, PlanStatus::Free))));

    mocks.ledger.expect_exists().times(1).returning(|_, _| Ok(false));
    // Rejected before any write.
    mocks.ledger.expect_upsert().times(0);
    mocks.users.expect_record_first_answer().times(0);

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect_err("quota exceeded");

    assert_eq!(error.code(), ErrorCode::QuotaExceeded);
    let details = error.details().expect("details attached");
    assert_eq!(details["quota"], FREE_TIER_QUESTION_QUOTA);
}

#[tokio::test]
async fn quota_spares_resubmission_of_answered_question() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 120, 10, PlanStatus::Free))));

    mocks.ledger.expect_exists().times(1).returning(|_, _| Ok(true));
    mocks
        .ledger
        .expect_upsert()
        .times(1)
        .returning(|_| Ok(UpsertOutcome { inserted: false }));

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::C))
        .await
        .expect("resubmission allowed");

    assert!(response.was_resubmission);
}

#[tokio::test]
async fn premium_user_is_never_quota_checked() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 500, 200, PlanStatus::Premium))));

    mocks.ledger.expect_exists().times(0);
    mocks
        .ledger
        .expect_upsert()
        .times(1)
        .returning(|_| Ok(UpsertOutcome { inserted: true }));

    let award_id = user_id.clone();
    mocks
        .users
        .expect_record_first_answer()
        .times(1)
        .returning(move |_, _| Ok(sample_user(&award_id, 520, 201, PlanStatus::Premium)));

    mocks
        .rank_tiers
        .expect_load_ladder()
        .returning(|| Ok(sample_ladder()));
    // 520 XP maps to "Aplicado" (tier 3); the fixture user still holds tier 1.
    mocks
        .users
        .expect_set_rank()
        .times(1)
        .withf(|_, rank_id| *rank_id == tier_id(3))
        .returning(|_, _| Ok(()));

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect("submission succeeds");

    assert_eq!(response.xp_awarded, CORRECT_ANSWER_XP);
}

#[tokio::test]
async fn rank_is_not_rewritten_when_tier_is_unchanged() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    // Already "Iniciante" (tier 1); 10 + 20 XP stays below the next threshold.
    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 10, 2, PlanStatus::Free))));

    mocks
        .ledger
        .expect_upsert()
        .returning(|_| Ok(UpsertOutcome { inserted: true }));

    let award_id = user_id.clone();
    mocks
        .users
        .expect_record_first_answer()
        .returning(move |_, xp_award| Ok(sample_user(&award_id, 10 + xp_award, 3, PlanStatus::Free)));

    mocks
        .rank_tiers
        .expect_load_ladder()
        .returning(|| Ok(sample_ladder()));
    mocks.users.expect_set_rank().times(0);

    let service = mocks.into_service();
    let response = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect("submission succeeds");

    assert!(response.new_rank.is_none());
    assert_eq!(response.new_total_xp, 30);
}

#[tokio::test]
async fn unknown_option_is_rejected_before_user_lookup() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    mocks.users.expect_find_by_id().times(0);
    mocks.ledger.expect_upsert().times(0);

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::E))
        .await
        .expect_err("invalid option");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    let details = error.details().expect("details attached");
    assert_eq!(details["code"], "unknown_option");
}

#[tokio::test]
async fn missing_question_maps_to_not_found() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new();

    mocks
        .questions
        .expect_find_active_by_id()
        .returning(|_| Ok(None));
    mocks.users.expect_find_by_id().times(0);

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn inactive_user_maps_to_not_found() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks.users.expect_find_by_id().returning(move |_| {
        let user = User::new(UserDraft {
            id: find_id.clone(),
            display_name: "Inativo".to_owned(),
            xp: 0,
            answered_count: 0,
            rank_id: None,
            plan: PlanStatus::Free,
            active: false,
        })
        .expect("valid draft");
        Ok(Some(user))
    });
    mocks.ledger.expect_upsert().times(0);

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect_err("not found");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn ledger_connection_failure_maps_to_service_unavailable() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 45, 3, PlanStatus::Free))));

    mocks.ledger.expect_upsert().returning(|_| {
        Err(crate::domain::ports::ResponseLedgerError::connection(
            "pool unavailable",
        ))
    });

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect_err("service unavailable");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[tokio::test]
async fn corrupt_rank_table_maps_to_internal_error() {
    let user_id = UserId::random();
    let mut mocks = Mocks::new().with_question();

    let find_id = user_id.clone();
    mocks
        .users
        .expect_find_by_id()
        .returning(move |_| Ok(Some(sample_user(&find_id, 45, 3, PlanStatus::Free))));

    mocks
        .ledger
        .expect_upsert()
        .returning(|_| Ok(UpsertOutcome { inserted: true }));

    let award_id = user_id.clone();
    mocks
        .users
        .expect_record_first_answer()
        .returning(move |_, xp_award| Ok(sample_user(&award_id, 45 + xp_award, 4, PlanStatus::Free)));

    mocks.rank_tiers.expect_load_ladder().returning(|| {
        Err(crate::domain::ports::RankTierRepositoryError::integrity(
            "rank thresholds must be unique: 50 appears twice",
        ))
    });

    let service = mocks.into_service();
    let error = service
        .submit_answer(request(&user_id, OptionLabel::B))
        .await
        .expect_err("integrity failure surfaces");

    assert_eq!(error.code(), ErrorCode::InternalError);
}
