use std::fmt::Display;

use common::{api::ApiRequestValidator, error::PortalError};
use thiserror::Error;
use web_portal_common::{
    AuthSession, Credentials, CredentialsValidator, RegisterRequest, RegisterRequestValidator,
};

use crate::{
    api::{self, AuthApi},
    session::ClientState,
    storage::TokenStore,
};

/// State changing request a user can submit from the signed out screens
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    Login,
    Register,
}

impl AuthAction {
    const fn success_message(self) -> &'static str {
        match self {
            Self::Login => "Login successful!",
            Self::Register => "Registration successful!",
        }
    }

    const fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed",
            Self::Register => "Registration failed",
        }
    }
}

impl Display for AuthAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Login => write!(f, "Login"),
            Self::Register => write!(f, "Registration"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Invalid(#[from] PortalError),
    #[error("{action} failed. {source}")]
    Api {
        action: AuthAction,
        #[source]
        source: api::Error,
    },
}

impl SessionError {
    /// Message to show the user. Prefers the message sent by the server, then the validation
    /// reason and finally a generic message for the action.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(error) => error.user_message(),
            Self::Api { action, source } => source
                .server_message()
                .map_or_else(|| action.failure_message().to_owned(), str::to_owned),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Notification raised by a user action
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error<S: Into<String>>(message: S) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

impl From<&SessionError> for Notice {
    fn from(value: &SessionError) -> Self {
        Self::error(value.user_message())
    }
}

/// Drives the session lifecycle: restoring a persisted token, logging in, registering, verifying
/// the profile of a token and logging out. State lives in the [ClientState] passed to each
/// operation. Failed requests never modify it.
#[derive(Clone)]
pub struct SessionManager<A, S> {
    api: A,
    store: S,
}

impl<A, S> SessionManager<A, S>
where
    A: AuthApi,
    S: TokenStore,
{
    pub const fn new(api: A, store: S) -> Self {
        Self { api, store }
    }

    /// Load the persisted token into `state`. When a token exists the dashboard is shown straight
    /// away and the token is returned so the caller can [verify][Self::verify_profile] it.
    pub fn restore(&self, state: &mut ClientState) -> Option<String> {
        let Some(token) = self.store.load() else {
            state.sign_out();
            return None;
        };
        state.begin_verification(token.clone());
        Some(token)
    }

    /// Startup sequence, [restore][Self::restore] followed by verification of any restored token
    pub async fn initialize(&self, state: &mut ClientState) {
        if let Some(token) = self.restore(state) {
            self.verify_profile(state, &token).await;
        }
    }

    /// Fetch the profile of `token`. On success the profile replaces the current one. Any failure
    /// means the session expired, so the persisted token and the session are cleared. Results for
    /// a token that is no longer held are discarded. Returns true when the session is signed in
    /// with a fresh profile afterwards.
    pub async fn verify_profile(&self, state: &mut ClientState, token: &str) -> bool {
        match self.api.profile(token).await {
            Ok(user) => {
                let confirmed = state.confirm_profile(token, user);
                if !confirmed {
                    log::debug!("Discarding profile fetched for a token that is no longer held");
                }
                confirmed
            }
            Err(error) => {
                if state.session().token() != Some(token) {
                    log::debug!("Discarding verification failure for a token no longer held");
                    return false;
                }
                log::warn!("Session token is no longer valid, signing out. {error}");
                self.store.clear();
                state.sign_out();
                false
            }
        }
    }

    /// Validate and send `credentials`, starting a session on success
    /// # Errors
    /// This function will return an error if the credentials are incomplete or the API call fails.
    /// `state` is left untouched in both cases.
    pub async fn login(
        &self,
        state: &mut ClientState,
        credentials: Credentials,
    ) -> Result<Notice, SessionError> {
        CredentialsValidator::validate_request(&credentials)?;
        let session = self
            .api
            .login(&credentials)
            .await
            .map_err(|source| failed(AuthAction::Login, source))?;
        Ok(self.start_session(state, session, AuthAction::Login))
    }

    /// Validate and send a registration `request`, starting a session for the new account on
    /// success
    /// # Errors
    /// This function will return an error if the request is incomplete, the password is too short
    /// or the API call fails. `state` is left untouched in all cases.
    pub async fn register(
        &self,
        state: &mut ClientState,
        request: RegisterRequest,
    ) -> Result<Notice, SessionError> {
        RegisterRequestValidator::validate_request(&request)?;
        let session = self
            .api
            .register(&request)
            .await
            .map_err(|source| failed(AuthAction::Register, source))?;
        Ok(self.start_session(state, session, AuthAction::Register))
    }

    /// Forget the session and the persisted token
    pub fn logout(&self, state: &mut ClientState) -> Notice {
        self.store.clear();
        state.sign_out();
        log::info!("Logged out");
        Notice::success("Logged out successfully!")
    }

    fn start_session(
        &self,
        state: &mut ClientState,
        session: AuthSession,
        action: AuthAction,
    ) -> Notice {
        self.store.save(&session.token);
        log::info!("{action} succeeded for {}", session.user.username);
        state.sign_in(session);
        Notice::success(action.success_message())
    }
}

/// Log level and wording for a failed API call. Only a rejection is an expected outcome.
fn failure_report(error: &api::Error) -> (log::Level, &'static str) {
    if error.is_transport() {
        (log::Level::Error, "request failed")
    } else if matches!(error, api::Error::Decode(_)) {
        (log::Level::Error, "response could not be read")
    } else {
        (log::Level::Warn, "request rejected")
    }
}

fn failed(action: AuthAction, source: api::Error) -> SessionError {
    let (level, summary) = failure_report(&source);
    log::log!(level, "{action} {summary}. {source}");
    SessionError::Api { action, source }
}
