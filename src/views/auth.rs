//! Login and signup forms

use crate::api::{ApiClient, ApiResult, AuthResponse, User};

use super::Route;

/// Validation message when the terms checkbox is left unticked
pub const TERMS_NOT_ACCEPTED: &str = "Please agree to the Terms of Service and Privacy Policy";

/// What the page should do after a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    /// Authenticated: go to the given route
    Redirect(Route),
    /// Stay on the form; `error` or `notice` says why
    Stay,
}

/// Sign-in form
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub loading: bool,
    pub error: Option<String>,
    /// Server message of a response that did not start a session
    pub notice: Option<String>,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Default::default()
        }
    }

    pub async fn submit(&mut self, api: &ApiClient) -> AuthOutcome {
        self.error = None;
        self.notice = None;
        self.loading = true;

        let result = api.login(&self.email, &self.password).await;
        let outcome = complete_auth(api, result, &mut self.error, &mut self.notice);

        self.loading = false;
        outcome
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Sign in to SmartMeet\n");
        push_messages(&mut out, self.error.as_deref(), self.notice.as_deref());
        if self.loading {
            out.push_str("Signing In...\n");
        }
        out
    }
}

/// Account creation form
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub agree_to_terms: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl SignupForm {
    /// Name sent to the backend
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub async fn submit(&mut self, api: &ApiClient) -> AuthOutcome {
        self.error = None;
        self.notice = None;

        if !self.agree_to_terms {
            self.error = Some(TERMS_NOT_ACCEPTED.to_string());
            return AuthOutcome::Stay;
        }

        self.loading = true;

        let result = api
            .signup(&self.full_name(), &self.email, &self.password)
            .await;
        let outcome = complete_auth(api, result, &mut self.error, &mut self.notice);

        self.loading = false;
        outcome
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Create your SmartMeet account\n");
        push_messages(&mut out, self.error.as_deref(), self.notice.as_deref());
        if self.loading {
            out.push_str("Creating Account...\n");
        }
        out
    }
}

/// Shared tail of login and signup: start the session when a token came back
fn complete_auth(
    api: &ApiClient,
    result: ApiResult<AuthResponse>,
    error: &mut Option<String>,
    notice: &mut Option<String>,
) -> AuthOutcome {
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            *error = Some(e.user_message());
            return AuthOutcome::Stay;
        }
    };

    let Some(token) = response.token.filter(|t| !t.is_empty()) else {
        tracing::debug!("Auth response carried no token; session not started");
        *notice = response.message.filter(|m| !m.is_empty());
        return AuthOutcome::Stay;
    };

    match api.session().sign_in(token, response.user.unwrap_or_default()) {
        Ok(()) => AuthOutcome::Redirect(Route::Dashboard),
        Err(e) => {
            tracing::error!("Could not persist session: {}", e);
            *error = Some(format!("Could not save session: {}", e));
            AuthOutcome::Stay
        }
    }
}

fn push_messages(out: &mut String, error: Option<&str>, notice: Option<&str>) {
    if let Some(error) = error {
        out.push_str(&format!("! {}\n", error));
    }
    if let Some(notice) = notice {
        out.push_str(&format!("{}\n", notice));
    }
}

/// Confirm the stored session with `GET /auth/me`.
///
/// A 401 means the token is no longer accepted, so the session is signed
/// out before the error is returned. Any other failure leaves it in place.
pub async fn verify_session(api: &ApiClient) -> ApiResult<User> {
    let result = api.get_current_user().await;

    if let Err(e) = &result {
        if e.is_unauthorized() {
            tracing::info!("Stored token rejected; signing out");
            if let Err(e) = api.session().sign_out() {
                tracing::error!("Could not clear session: {}", e);
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let form = SignupForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            ..Default::default()
        };
        assert_eq!(form.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_render_messages() {
        let form = LoginForm {
            error: Some("Invalid credentials".into()),
            ..Default::default()
        };
        assert_eq!(form.render(), "Sign in to SmartMeet\n! Invalid credentials\n");

        let form = SignupForm {
            notice: Some("Check your inbox to verify your account".into()),
            ..Default::default()
        };
        assert_eq!(
            form.render(),
            "Create your SmartMeet account\nCheck your inbox to verify your account\n"
        );
    }
}
