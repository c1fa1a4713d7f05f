use std::cell::Cell;
use std::collections::HashSet;

use serde_json::json;
use uuid::Uuid;

use talentflow_assessments::error::CollectError;
use talentflow_assessments::{AssessmentRuntime, CollectorState, ValidationCode};
use talentflow_core::models::assessment::{
    Assessment, ConditionalLogic, Operator, Question, QuestionKind, Section,
};
use talentflow_core::models::response::AssessmentResponse;
use talentflow_core::models::timeline::{TimelineEntry, TimelineKind};
use talentflow_storage::error::StorageError;
use talentflow_storage::memory::MemoryStore;
use talentflow_storage::store::{ResponseStore, TimelineSink};

/// One section: a required numeric question (1..=3) and a required
/// multi-choice question shown only when the number is above 2.
fn experience_assessment() -> Assessment {
    let years = QuestionKind::numeric(Some(1.0), Some(3.0)).unwrap();
    let tools = QuestionKind::multi_choice(["Airflow", "dbt", "Kafka"]).unwrap();

    let mut a = Assessment::new(Uuid::new_v4(), "Data Engineer", jiff::Timestamp::UNIX_EPOCH);
    a.sections.push(
        Section::new("s1", "General Questions")
            .with_question(Question::new("years", "Years with Spark", years).required())
            .with_question(
                Question::new("tools", "Which tools?", tools)
                    .required()
                    .shown_when(ConditionalLogic::new("years", Operator::GreaterThan, 2.0)),
            )
            .with_question(Question::new(
                "notes",
                "Anything else?",
                QuestionKind::long_text(Some(20)),
            )),
    );
    a
}

/// A response store that is always down.
struct Unavailable;

impl ResponseStore for Unavailable {
    fn save_response(
        &self,
        _: AssessmentResponse,
    ) -> Result<AssessmentResponse, StorageError> {
        Err(StorageError::Unavailable("connection refused".into()))
    }

    fn responses_for(&self, _: Uuid) -> Result<Vec<AssessmentResponse>, StorageError> {
        Ok(Vec::new())
    }
}

/// A timeline that counts calls and then fails.
#[derive(Default)]
struct BrokenTimeline {
    calls: Cell<usize>,
}

impl TimelineSink for BrokenTimeline {
    fn record(&self, _: TimelineEntry) -> Result<(), StorageError> {
        self.calls.set(self.calls.get() + 1);
        Err(StorageError::Unavailable("timeline offline".into()))
    }
}

#[test]
fn question_ids_are_unique() {
    let a = experience_assessment();
    let ids: HashSet<&str> = a.questions().map(|q| q.id.as_str()).collect();
    assert_eq!(ids.len(), a.question_count());
}

#[test]
fn low_number_hides_dependent_question() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let mut collector = runtime.collector(Uuid::new_v4());

    collector.set_answer("years", json!(1)).unwrap();
    let response = collector.submit(&store).unwrap();

    assert_eq!(response.responses.len(), 1);
    assert_eq!(response.responses["years"], json!(1));
    assert!(matches!(collector.state(), CollectorState::Submitted(r) if r.id == response.id));
    assert_eq!(store.responses_for(runtime.assessment().id).unwrap(), [response]);
}

#[test]
fn high_number_requires_dependent_question() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let mut collector = runtime.collector(Uuid::new_v4());

    collector.set_answer("years", json!(3)).unwrap();
    collector.set_answer("tools", json!([])).unwrap();

    let errors = match collector.submit(&store) {
        Err(CollectError::Rejected(errors)) => errors,
        other => panic!("expected rejection, got {other:?}"),
    };
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].question_id, "tools");
    assert_eq!(errors[0].code, ValidationCode::Required);
    assert!(matches!(collector.state(), CollectorState::Rejected(_)));
    assert!(store.responses_for(runtime.assessment().id).unwrap().is_empty());

    collector.set_answer("tools", json!(["dbt"])).unwrap();
    assert_eq!(collector.state(), &CollectorState::Editing);
    let response = collector.submit(&store).unwrap();
    assert_eq!(response.responses["tools"], json!(["dbt"]));
}

#[test]
fn hidden_answers_are_not_stored() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let mut collector = runtime.collector(Uuid::new_v4());

    collector.set_answer("tools", json!(["Kafka"])).unwrap();
    collector.set_answer("years", json!(2)).unwrap();
    collector.set_answer("notes", json!(null)).unwrap();

    let ids: Vec<&str> = collector
        .visible_questions()
        .iter()
        .map(|q| q.id.as_str())
        .collect();
    assert_eq!(ids, ["years", "notes"]);

    let response = collector.submit(&store).unwrap();
    assert_eq!(response.responses.keys().collect::<Vec<_>>(), ["years"]);
}

#[test]
fn collectors_are_isolated() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();

    let mut first = runtime.collector(Uuid::new_v4());
    let mut second = runtime.collector(Uuid::new_v4());

    first.set_answer("years", json!(3)).unwrap();
    second.set_answer("years", json!(1)).unwrap();
    second.set_answer("notes", json!("short")).unwrap();

    assert!(first.validate().is_err());
    assert!(second.validate().is_ok());

    assert!(second.submit(&store).is_ok());
    assert!(matches!(first.submit(&store), Err(CollectError::Rejected(_))));
    assert!(first.answer("notes").is_none());

    first.set_answer("tools", json!(["Airflow", "dbt"])).unwrap();
    let response = first.submit(&store).unwrap();
    assert_eq!(response.candidate_id, first.candidate_id());
    assert_eq!(store.responses_for(runtime.assessment().id).unwrap().len(), 2);
}

#[test]
fn submitted_is_terminal() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let mut collector = runtime.collector(Uuid::new_v4());

    collector.set_answer("years", json!(2)).unwrap();
    collector.submit(&store).unwrap();

    assert!(matches!(collector.submit(&store), Err(CollectError::AlreadySubmitted)));
    assert!(matches!(
        collector.set_answer("years", json!(1)),
        Err(CollectError::AlreadySubmitted)
    ));
    assert!(matches!(
        collector.clear_answer("years"),
        Err(CollectError::AlreadySubmitted)
    ));
    assert_eq!(store.responses_for(runtime.assessment().id).unwrap().len(), 1);
}

#[test]
fn unknown_question_is_rejected() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let mut collector = runtime.collector(Uuid::new_v4());

    assert!(matches!(
        collector.set_answer("salary", json!(100)),
        Err(CollectError::UnknownQuestion(id)) if id == "salary"
    ));
    assert!(collector.answers().is_empty());
}

#[test]
fn clearing_unknown_question_keeps_rejection() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let mut collector = runtime.collector(Uuid::new_v4());
    assert!(collector.submit(&store).is_err());

    assert!(matches!(
        collector.clear_answer("nope"),
        Err(CollectError::UnknownQuestion(id)) if id == "nope"
    ));
    assert!(matches!(collector.state(), CollectorState::Rejected(_)));

    assert_eq!(collector.clear_answer("years").unwrap(), None);
    assert_eq!(collector.state(), &CollectorState::Editing);
}

#[test]
fn failed_save_returns_to_editing() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let mut collector = runtime.collector(Uuid::new_v4());
    collector.set_answer("years", json!(1)).unwrap();

    assert!(matches!(
        collector.submit(&Unavailable),
        Err(CollectError::Storage(StorageError::Unavailable(_)))
    ));
    assert_eq!(collector.state(), &CollectorState::Editing);

    let store = MemoryStore::new();
    assert!(collector.submit(&store).is_ok());
}

#[test]
fn submission_is_recorded_on_timeline() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let candidate_id = Uuid::new_v4();
    let mut collector = runtime.collector(candidate_id);

    collector.set_answer("years", json!(1)).unwrap();
    let response = collector.submit_and_notify(&store, &store).unwrap();

    let timeline = store.timeline_for(candidate_id).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].kind, TimelineKind::AssessmentSubmitted);
    assert_eq!(timeline[0].timestamp, response.submitted_at);
}

#[test]
fn timeline_failure_does_not_fail_submission() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let store = MemoryStore::new();
    let timeline = BrokenTimeline::default();
    let mut collector = runtime.collector(Uuid::new_v4());

    collector.set_answer("years", json!(1)).unwrap();
    assert!(collector.submit_and_notify(&store, &timeline).is_ok());
    assert_eq!(timeline.calls.get(), 1);
    assert!(matches!(collector.state(), CollectorState::Submitted(_)));
}

#[test]
fn stateless_validation_matches_collector() {
    let runtime = AssessmentRuntime::load(experience_assessment()).unwrap();
    let mut collector = runtime.collector(Uuid::new_v4());
    collector.set_answer("years", json!(5)).unwrap();

    let errors = runtime.validate(collector.answers()).unwrap_err();
    assert_eq!(collector.validate().unwrap_err(), errors);
    let codes: Vec<ValidationCode> = errors.iter().map(|e| e.code).collect();
    assert_eq!(codes, [ValidationCode::AboveMaximum, ValidationCode::Required]);
}
