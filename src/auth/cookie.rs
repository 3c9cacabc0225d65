use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite, time::Duration};

/// Cookie under which the session id travels.
pub const SESSION_COOKIE_NAME: &str = "web-app-session-id";

/// Build the Set-Cookie for a fresh login.
///
/// HttpOnly keeps the id away from page scripts; Max-Age mirrors the
/// store-side TTL so the browser drops the cookie when the session
/// record expires.
pub fn session_cookie(session_id: String, ttl_seconds: u64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE_NAME, session_id)
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .max_age(Duration::seconds(ttl_seconds as i64))
        .path("/")
        .finish()
}

/// Build a removal cookie for logout; same name and path as the
/// session cookie so the browser actually discards it.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(SESSION_COOKIE_NAME, "").path("/").finish();
    cookie.make_removal();
    cookie
}

/// Pull the session id out of an incoming request, if any.
pub fn session_id(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE_NAME)
        .map(|c| c.value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("abc123".to_string(), 604_800, false);
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(false));
        assert_eq!(cookie.max_age(), Some(Duration::seconds(604_800)));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_session_cookie_secure_flag() {
        let cookie = session_cookie("abc123".to_string(), 60, true);
        assert_eq!(cookie.secure(), Some(true));
    }

    #[test]
    fn test_removal_cookie() {
        let cookie = removal_cookie();
        assert_eq!(cookie.name(), SESSION_COOKIE_NAME);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        // An expiring cookie carries Max-Age=0
        assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    }
}
