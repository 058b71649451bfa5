//! Integration tests for the Diesel adapters against embedded PostgreSQL.
//!
//! Each test provisions its own migrated database. Steps stay synchronous
//! and drive the async repositories through a per-test Tokio runtime.

mod support;

use alumni_connect::domain::ports::{
    ApplicationStatusRepository, ApplicationStatusRepositoryError, OpportunityRepository,
    UserRepository,
};
use alumni_connect::domain::{
    ApplicationKey, ApplicationStatus, Opportunity, OpportunityDraft, StatusChange, User, UserId,
    UserRole,
};
use alumni_connect::outbound::persistence::{
    DbPool, DieselApplicationStatusRepository, DieselOpportunityRepository, DieselUserRepository,
    PoolConfig,
};
use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

use support::embedded_postgres::{drop_status_table, seed_users};
use support::{handle_cluster_setup_failure, provision_database, shared_cluster};

struct TestContext {
    runtime: Runtime,
    database_url: String,
    users: DieselUserRepository,
    opportunities: DieselOpportunityRepository,
    statuses: DieselApplicationStatusRepository,
    alumnus: User,
    students: Vec<User>,
    _database: TemporaryDatabase,
}

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 10, hour, 0, 0)
        .single()
        .expect("timestamp")
}

fn person(name: &str, role: UserRole) -> User {
    let email = format!("{}@example.edu", name.to_lowercase());
    User::new(UserId::random(), name, email, role).expect("user")
}

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster()?;
    let database = provision_database(cluster)?;
    let database_url = database.url().to_string();

    let alumnus = person("Imani", UserRole::Alumni);
    let students = vec![
        person("Kofi", UserRole::Student),
        person("Aiko", UserRole::Student),
    ];
    let mut everyone = vec![alumnus.clone()];
    everyone.extend(students.iter().cloned());
    seed_users(&database_url, &everyone)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        database_url,
        users: DieselUserRepository::new(pool.clone()),
        opportunities: DieselOpportunityRepository::new(pool.clone()),
        statuses: DieselApplicationStatusRepository::new(pool),
        alumnus,
        students,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<TestContext> {
    match setup_test_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

impl TestContext {
    fn post(&self, title: &str, created_at: DateTime<Utc>) -> Opportunity {
        let draft = OpportunityDraft {
            project_title: title.to_owned(),
            category: "Research".to_owned(),
            budget: 250,
            payment_type: "stipend".to_owned(),
            experience_level: "Entry".to_owned(),
            project_description: "Annotate survey responses".to_owned(),
            required_skills: vec!["python".to_owned(), "pandas".to_owned()],
        };
        let opportunity =
            Opportunity::create(self.alumnus.id().clone(), draft, created_at).expect("draft");
        self.runtime
            .block_on(self.opportunities.insert(&opportunity))
            .expect("insert");
        opportunity
    }

    fn student(&self, index: usize) -> &UserId {
        self.students.get(index).expect("seeded student").id()
    }
}

#[rstest]
fn users_resolve_by_id_and_unknown_ids_are_skipped(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: users_resolve_by_id_and_unknown_ids_are_skipped skipped");
        return;
    };

    let found = ctx
        .runtime
        .block_on(UserRepository::find_by_id(&ctx.users, ctx.alumnus.id()))
        .expect("lookup");
    assert_eq!(found.as_ref(), Some(&ctx.alumnus));

    let ids = vec![ctx.student(0).clone(), UserId::random(), ctx.student(1).clone()];
    let mut resolved: Vec<UserId> = ctx
        .runtime
        .block_on(ctx.users.find_by_ids(&ids))
        .expect("batch lookup")
        .into_iter()
        .map(|user| user.id().clone())
        .collect();
    resolved.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
    let mut expected = vec![ctx.student(0).clone(), ctx.student(1).clone()];
    expected.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
    assert_eq!(resolved, expected);
}

#[rstest]
fn owner_listing_is_newest_first(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: owner_listing_is_newest_first skipped");
        return;
    };

    let older = ctx.post("Survey coding", at(8));
    let newer = ctx.post("Interview transcripts", at(11));

    let listed = ctx
        .runtime
        .block_on(ctx.opportunities.list_by_owner(ctx.alumnus.id()))
        .expect("list");

    assert_eq!(listed, vec![newer, older]);
    let strangers = ctx
        .runtime
        .block_on(ctx.opportunities.list_by_owner(ctx.student(0)))
        .expect("list");
    assert!(strangers.is_empty());
}

#[rstest]
fn applicants_append_once_in_order(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: applicants_append_once_in_order skipped");
        return;
    };
    let posting = ctx.post("Survey coding", at(9));

    let outcomes: Vec<bool> = [ctx.student(1), ctx.student(0), ctx.student(1)]
        .into_iter()
        .map(|student| {
            ctx.runtime
                .block_on(ctx.opportunities.append_applicant(&posting.id, student))
                .expect("append")
        })
        .collect();
    assert_eq!(outcomes, vec![true, true, false]);

    let stored = ctx
        .runtime
        .block_on(OpportunityRepository::find_by_id(
            &ctx.opportunities,
            &posting.id,
        ))
        .expect("find")
        .expect("posting exists");
    assert_eq!(
        stored.applicants,
        vec![ctx.student(1).clone(), ctx.student(0).clone()]
    );
}

#[rstest]
fn delete_reports_whether_a_row_was_removed(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_reports_whether_a_row_was_removed skipped");
        return;
    };
    let posting = ctx.post("Survey coding", at(9));

    let first = ctx
        .runtime
        .block_on(ctx.opportunities.delete(&posting.id))
        .expect("delete");
    let second = ctx
        .runtime
        .block_on(ctx.opportunities.delete(&posting.id))
        .expect("delete again");

    assert!(first);
    assert!(!second);
}

#[rstest]
fn upsert_creates_then_overwrites(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_creates_then_overwrites skipped");
        return;
    };
    let posting = ctx.post("Survey coding", at(9));
    let key = ApplicationKey::new(posting.id, ctx.student(0).clone());
    let change = |status| StatusChange {
        opportunity_id: posting.id,
        student_id: ctx.student(0).clone(),
        status,
    };

    let missing = ctx
        .runtime
        .block_on(ctx.statuses.find(&key))
        .expect("find");
    assert!(missing.is_none());

    let accepted = ctx
        .runtime
        .block_on(ctx.statuses.upsert(&change(ApplicationStatus::Accepted), at(10)))
        .expect("first upsert");
    let rejected = ctx
        .runtime
        .block_on(ctx.statuses.upsert(&change(ApplicationStatus::Rejected), at(12)))
        .expect("second upsert");

    assert_eq!(accepted.status, ApplicationStatus::Accepted);
    assert_eq!(rejected.status, ApplicationStatus::Rejected);
    assert_eq!(rejected.updated_at, at(12));
    let stored = ctx
        .runtime
        .block_on(ctx.statuses.find(&key))
        .expect("find")
        .expect("record exists");
    assert_eq!(stored, rejected);

    let listed = ctx
        .runtime
        .block_on(ctx.statuses.list_for_owner(ctx.alumnus.id()))
        .expect("list");
    assert_eq!(listed, vec![rejected]);
}

#[rstest]
fn records_for_deleted_postings_are_not_listed(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: records_for_deleted_postings_are_not_listed skipped");
        return;
    };
    let posting = ctx.post("Survey coding", at(9));
    let change = StatusChange {
        opportunity_id: posting.id,
        student_id: ctx.student(0).clone(),
        status: ApplicationStatus::Accepted,
    };
    ctx.runtime
        .block_on(ctx.statuses.upsert(&change, at(10)))
        .expect("upsert");

    ctx.runtime
        .block_on(ctx.opportunities.delete(&posting.id))
        .expect("delete");

    let listed = ctx
        .runtime
        .block_on(ctx.statuses.list_for_owner(ctx.alumnus.id()))
        .expect("list");
    assert!(listed.is_empty());
    let orphan = ctx
        .runtime
        .block_on(ctx.statuses.find(&ApplicationKey::new(
            posting.id,
            ctx.student(0).clone(),
        )))
        .expect("find");
    assert!(orphan.is_some(), "records are kept, only hidden");
}

#[rstest]
fn missing_status_table_is_a_query_error(context: Option<TestContext>) {
    let Some(ctx) = context else {
        eprintln!("SKIP-TEST-CLUSTER: missing_status_table_is_a_query_error skipped");
        return;
    };
    drop_status_table(&ctx.database_url).expect("drop table");

    let result = ctx
        .runtime
        .block_on(ctx.statuses.list_for_owner(ctx.alumnus.id()));

    assert!(
        matches!(result, Err(ApplicationStatusRepositoryError::Query { .. })),
        "expected query error, got {result:?}"
    );
}
