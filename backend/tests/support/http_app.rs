//! In-process HTTP harness over the in-memory store.
//!
//! Each call builds a fresh app around shared state, plants a session for
//! the caller through the test login route, and returns status plus JSON
//! body. The store outlives the app, so successive calls observe each
//! other's writes.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::Clock;
use serde_json::Value;

use alumni_connect::Trace;
use alumni_connect::domain::{ApplicationReviewService, OpportunityService, UserId};
use alumni_connect::inbound::http::applications::{
    list_applications, list_status_records, update_status,
};
use alumni_connect::inbound::http::opportunities::{
    apply_to_opportunity, create_opportunity, delete_opportunity, list_own_opportunities,
};
use alumni_connect::inbound::http::state::HttpState;
use alumni_connect::inbound::http::test_utils::{
    LOGIN_AS_PATH, login_as_handler, login_request, session_cookie, test_session_middleware,
};
use alumni_connect::test_support::InMemoryStore;

/// Handler state wired to real services over `store`.
pub fn in_memory_state(store: &InMemoryStore, clock: Arc<dyn Clock>) -> HttpState {
    let shared = Arc::new(store.clone());
    let review = ApplicationReviewService::new(
        shared.clone(),
        shared.clone(),
        shared.clone(),
        clock.clone(),
    );
    let postings = OpportunityService::new(shared.clone(), shared, clock);
    HttpState::fixtures()
        .with_review_service(Arc::new(review))
        .with_opportunity_service(Arc::new(postings))
}

/// Response captured from one call.
#[derive(Debug)]
pub struct Captured {
    pub status: StatusCode,
    pub trace_id: Option<String>,
    pub body: Value,
}

/// Send `request` as `caller` (or anonymously) against a fresh app.
pub async fn send(
    state: HttpState,
    caller: Option<&UserId>,
    request: test::TestRequest,
) -> Captured {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .wrap(Trace)
            .route(LOGIN_AS_PATH, web::get().to(login_as_handler))
            .service(
                web::scope("/api/v1")
                    .service(list_own_opportunities)
                    .service(create_opportunity)
                    .service(delete_opportunity)
                    .service(apply_to_opportunity)
                    .service(list_applications)
                    .service(list_status_records)
                    .service(update_status),
            ),
    )
    .await;

    let request = match caller {
        Some(user) => {
            let login =
                test::call_service(&app, login_request(&user.to_string()).to_request()).await;
            request.cookie(session_cookie(&login))
        }
        None => request,
    };
    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let trace_id = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(res).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    Captured {
        status,
        trace_id,
        body,
    }
}

/// Blocking wrapper for synchronous BDD steps.
pub fn send_blocking(
    state: HttpState,
    caller: Option<&UserId>,
    request: test::TestRequest,
) -> Captured {
    actix_rt::System::new().block_on(send(state, caller, request))
}
