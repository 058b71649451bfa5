//! Builders wiring repository-backed services into HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};

use alumni_connect::domain::{ApplicationReviewService, OpportunityService};
use alumni_connect::inbound::http::state::HttpState;
use alumni_connect::outbound::persistence::{
    DbPool, DieselApplicationStatusRepository, DieselOpportunityRepository, DieselUserRepository,
};

use super::ServerConfig;

/// Build handler state using Diesel adapters when a pool is configured,
/// otherwise fixture ports.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let state = match &config.db_pool {
        Some(pool) => repository_state(pool),
        None => HttpState::fixtures(),
    };
    web::Data::new(state)
}

fn repository_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let opportunities = Arc::new(DieselOpportunityRepository::new(pool.clone()));
    let statuses = Arc::new(DieselApplicationStatusRepository::new(pool.clone()));
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);

    let review = Arc::new(ApplicationReviewService::new(
        users.clone(),
        opportunities.clone(),
        statuses,
        clock.clone(),
    ));
    let postings = Arc::new(OpportunityService::new(users, opportunities, clock));

    HttpState::fixtures()
        .with_review_service(review)
        .with_opportunity_service(postings)
}
