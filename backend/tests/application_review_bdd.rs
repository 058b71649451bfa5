//! Behaviour tests for the reviewer-facing application endpoints.
//!
//! Scenarios run the real services over the in-memory store through the
//! HTTP handlers, so validation, authorisation, and reconciliation are all
//! exercised together.

#[path = "support/http_app.rs"]
mod http_app;

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use actix_web::test::TestRequest;
use alumni_connect::domain::{
    ApplicationKey, ApplicationStatus, Opportunity, OpportunityDraft, OpportunityId, User, UserId,
    UserRole,
};
use alumni_connect::inbound::http::state::HttpState;
use alumni_connect::test_support::{InMemoryStore, MutableClock};
use chrono::{TimeZone, Utc};
use http_app::{Captured, in_memory_state, send_blocking};
use mockable::Clock;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::{Value, json};

struct ReviewWorld {
    store: InMemoryStore,
    clock: Arc<MutableClock>,
    alumnus: UserId,
    rival: UserId,
    students: RefCell<HashMap<String, UserId>>,
    jobs: RefCell<HashMap<String, OpportunityId>>,
    last: RefCell<Option<Captured>>,
}

impl ReviewWorld {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let alumnus = UserId::random();
        store.insert_user(
            User::new(alumnus.clone(), "Meera Iyer", "meera@alumni.example", UserRole::Alumni)
                .expect("alumnus"),
        );
        let rival = UserId::random();
        store.insert_user(
            User::new(rival.clone(), "Tomas Berg", "tomas@alumni.example", UserRole::Alumni)
                .expect("rival alumnus"),
        );
        let start = Utc
            .with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
            .single()
            .expect("timestamp");
        Self {
            store,
            clock: Arc::new(MutableClock::new(start)),
            alumnus,
            rival,
            students: RefCell::new(HashMap::new()),
            jobs: RefCell::new(HashMap::new()),
            last: RefCell::new(None),
        }
    }

    fn state(&self) -> HttpState {
        in_memory_state(&self.store, self.clock.clone())
    }

    fn student(&self, label: &str) -> UserId {
        if let Some(id) = self.students.borrow().get(label) {
            return id.clone();
        }
        let id = UserId::random();
        let email = format!("{}@students.example", label.to_lowercase());
        self.store.insert_user(
            User::new(id.clone(), format!("Student {label}"), email, UserRole::Student)
                .expect("student"),
        );
        self.students
            .borrow_mut()
            .insert(label.to_owned(), id.clone());
        id
    }

    fn job(&self, label: &str) -> OpportunityId {
        *self
            .jobs
            .borrow()
            .get(label)
            .unwrap_or_else(|| panic!("opportunity {label} was not posted"))
    }

    fn send(&self, caller: &UserId, request: TestRequest) {
        self.clock.advance_seconds(1);
        let captured = send_blocking(self.state(), Some(caller), request);
        *self.last.borrow_mut() = Some(captured);
    }

    fn set_status(&self, caller: &UserId, student: &str, job: &str, status: &str) {
        let body = json!({
            "opportunityId": self.job(job).to_string(),
            "studentId": self.student(student).to_string(),
            "status": status,
        });
        self.send(
            caller,
            TestRequest::put()
                .uri("/api/v1/application-status/update-status")
                .set_json(body),
        );
    }

    fn last_body(&self) -> Value {
        self.last
            .borrow()
            .as_ref()
            .expect("a request was sent")
            .body
            .clone()
    }

    /// Applications listed under `job` in the last reconciled view.
    fn applications_for(&self, job: &str) -> Vec<Value> {
        let job_id = self.job(job).to_string();
        self.last_body()
            .as_array()
            .expect("grouped view")
            .iter()
            .find(|group| group["opportunity"]["id"] == job_id.as_str())
            .and_then(|group| group["applications"].as_array().cloned())
            .unwrap_or_default()
    }
}

#[fixture]
fn world() -> ReviewWorld {
    ReviewWorld::new()
}

#[given("an alumnus who posted {job}")]
fn an_alumnus_who_posted(world: &ReviewWorld, job: String) {
    let draft = OpportunityDraft {
        project_title: format!("Project {job}"),
        category: "Web".to_owned(),
        budget: 1500,
        payment_type: "fixed".to_owned(),
        experience_level: "Intermediate".to_owned(),
        project_description: "Ship a campus events page".to_owned(),
        required_skills: vec!["rust".to_owned()],
    };
    let opportunity =
        Opportunity::create(world.alumnus.clone(), draft, world.clock.utc()).expect("draft");
    world.jobs.borrow_mut().insert(job, opportunity.id);
    world.store.insert_opportunity(opportunity);
}

#[given("students {first} and {second} have applied to {job}")]
fn students_have_applied(world: &ReviewWorld, first: String, second: String, job: String) {
    let job_id = world.job(&job);
    for label in [first, second] {
        let student = world.student(&label);
        world.send(
            &student,
            TestRequest::post().uri(&format!("/api/v1/opportunities/{job_id}/apply")),
        );
        let last = world.last.borrow();
        let captured = last.as_ref().expect("apply response");
        assert_eq!(captured.status.as_u16(), 200, "apply failed: {}", captured.body);
    }
}

#[given("the alumnus has set {student} on {job} to {status}")]
fn the_alumnus_has_set(world: &ReviewWorld, student: String, job: String, status: String) {
    world.set_status(&world.alumnus, &student, &job, &status);
}

#[when("the alumnus sets {student} on {job} to {status}")]
fn the_alumnus_sets(world: &ReviewWorld, student: String, job: String, status: String) {
    world.set_status(&world.alumnus, &student, &job, &status);
}

#[when("student {actor} sets {student} on {job} to {status}")]
fn a_student_sets(
    world: &ReviewWorld,
    actor: String,
    student: String,
    job: String,
    status: String,
) {
    let caller = world.student(&actor);
    world.set_status(&caller, &student, &job, &status);
}

#[when("another alumnus sets {student} on {job} to {status}")]
fn another_alumnus_sets(world: &ReviewWorld, student: String, job: String, status: String) {
    world.set_status(&world.rival, &student, &job, &status);
}

#[when("the alumnus lists applications")]
fn the_alumnus_lists_applications(world: &ReviewWorld) {
    world.send(
        &world.alumnus,
        TestRequest::get().uri("/api/v1/applications/alumni"),
    );
}

#[when("the alumnus lists status records")]
fn the_alumnus_lists_status_records(world: &ReviewWorld) {
    world.send(
        &world.alumnus,
        TestRequest::get().uri("/api/v1/application-status/alumni"),
    );
}

#[when("the alumnus deletes {job}")]
fn the_alumnus_deletes(world: &ReviewWorld, job: String) {
    let job_id = world.job(&job);
    world.send(
        &world.alumnus,
        TestRequest::delete().uri(&format!("/api/v1/opportunities/{job_id}")),
    );
    let last = world.last.borrow();
    assert_eq!(last.as_ref().expect("delete response").status.as_u16(), 204);
}

#[then("the response status is {code}")]
fn the_response_status_is(world: &ReviewWorld, code: u16) {
    let last = world.last.borrow();
    let captured = last.as_ref().expect("a request was sent");
    assert_eq!(captured.status.as_u16(), code, "body: {}", captured.body);
    assert!(captured.trace_id.is_some(), "trace-id header missing");
}

#[then("the view lists {first} then {second} under {job}")]
fn the_view_lists_in_order(world: &ReviewWorld, first: String, second: String, job: String) {
    let listed: Vec<Value> = world
        .applications_for(&job)
        .iter()
        .map(|view| view["applicant"]["id"].clone())
        .collect();
    let expected = vec![
        json!(world.student(&first).to_string()),
        json!(world.student(&second).to_string()),
    ];
    assert_eq!(listed, expected);
}

#[then("the view shows {student} on {job} as {status}")]
fn the_view_shows(world: &ReviewWorld, student: String, job: String, status: String) {
    let key = ApplicationKey::new(world.job(&job), world.student(&student)).to_string();
    let view = world
        .applications_for(&job)
        .into_iter()
        .find(|view| view["id"] == key.as_str())
        .unwrap_or_else(|| panic!("{student} missing from {job}"));
    assert_eq!(view["status"], status.as_str());
}

#[then("the error names the status field")]
fn the_error_names_the_status_field(world: &ReviewWorld) {
    let body = world.last_body();
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["field"], "status");
    assert_eq!(body["details"]["code"], "invalid_status");
}

#[then("the store holds {count} status records")]
fn the_store_holds(world: &ReviewWorld, count: usize) {
    assert_eq!(world.store.status_records().len(), count);
}

#[then("the store records {student} on {job} as {status}")]
fn the_store_records(world: &ReviewWorld, student: String, job: String, status: String) {
    let key = ApplicationKey::new(world.job(&job), world.student(&student));
    let expected: ApplicationStatus = status.parse().expect("known status");
    let record = world
        .store
        .status_records()
        .into_iter()
        .find(|record| record.key() == key)
        .expect("stored record");
    assert_eq!(record.status, expected);
}

#[then("the status record list is empty")]
fn the_status_record_list_is_empty(world: &ReviewWorld) {
    assert_eq!(world.last_body(), json!([]));
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Applicants without a decision are pending"
)]
fn applicants_without_a_decision_are_pending(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Accepting one applicant leaves the others pending"
)]
fn accepting_one_applicant_leaves_the_others_pending(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "An unknown status is rejected without touching the store"
)]
fn an_unknown_status_is_rejected(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Repeating a decision is idempotent"
)]
fn repeating_a_decision_is_idempotent(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Decisions for a deleted posting are hidden"
)]
fn decisions_for_a_deleted_posting_are_hidden(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Students cannot record decisions"
)]
fn students_cannot_record_decisions(world: ReviewWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/application_review.feature",
    name = "Alumni cannot record decisions on postings they do not own"
)]
fn alumni_cannot_record_decisions_on_foreign_postings(world: ReviewWorld) {
    drop(world);
}
