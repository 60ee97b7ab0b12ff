use axum::http::StatusCode;
use axum_extra::extract::cookie::Cookie;
use axum_extra::extract::cookie::SameSite;
use axum_extra::extract::CookieJar;

use super::handlers::ApiSuccess;
use super::handlers::TokenResponseData;
use crate::domain::user::ports::UserSession;

/// Settings of the cookie that carries the session token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCookie {
    /// Only sent over HTTPS; off in development
    pub secure: bool,
    pub max_age: time::Duration,
}

impl SessionCookie {
    pub const NAME: &'static str = "jwt";

    pub fn new(secure: bool, expires_in_days: i64) -> Self {
        Self {
            secure,
            max_age: time::Duration::days(expires_in_days),
        }
    }

    pub fn build(&self, token: String) -> Cookie<'static> {
        Cookie::build((Self::NAME, token))
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .max_age(self.max_age)
            .build()
    }
}

/// Respond to a successful signup, login, reset or password change.
///
/// Sets the session cookie and returns the token alongside the user.
pub fn session_response(
    jar: CookieJar,
    cookie: &SessionCookie,
    status: StatusCode,
    session: UserSession,
) -> (CookieJar, ApiSuccess<TokenResponseData>) {
    let jar = jar.add(cookie.build(session.token.clone()));
    let data = TokenResponseData {
        token: session.token,
        user: (&session.user).into(),
    };
    (jar, ApiSuccess::new(status, data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_attributes() {
        let cookie = SessionCookie::new(true, 90).build("abc".to_string());

        assert_eq!(cookie.name(), "jwt");
        assert_eq!(cookie.value(), "abc");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(90)));
    }

    #[test]
    fn test_cookie_not_secure_in_development() {
        let cookie = SessionCookie::new(false, 90).build("abc".to_string());
        assert_eq!(cookie.secure(), Some(false));
    }
}
