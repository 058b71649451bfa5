//! Helpers for handler tests.

use actix_session::{Session, SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test, web};

use super::session::USER_ID_KEY;

/// Route that plants a user id in the session, standing in for the external
/// auth service.
pub const LOGIN_AS_PATH: &str = "/test/login-as/{id}";

/// Cookie session middleware with a throwaway key and `Secure` disabled.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

pub async fn login_as_handler(session: Session, id: web::Path<String>) -> HttpResponse {
    match session.insert(USER_ID_KEY, id.into_inner()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(_) => HttpResponse::InternalServerError().finish(),
    }
}

/// Request hitting [`LOGIN_AS_PATH`] for `user_id`.
pub fn login_request(user_id: &str) -> test::TestRequest {
    test::TestRequest::get().uri(&format!("/test/login-as/{user_id}"))
}

/// Session cookie issued by a login response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}
