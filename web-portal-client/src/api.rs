use std::{future::Future, time::Duration};

use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use web_portal_common::{ApiMessage, AuthSession, Credentials, RegisterRequest, UserProfile};

use crate::config::ClientConfig;

pub const LOGIN_PATH: &str = "/api/auth/login";
pub const REGISTER_PATH: &str = "/api/auth/register";
pub const PROFILE_PATH: &str = "/api/auth/profile";

/// Remote authentication API as seen by the session manager
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Exchange `credentials` for a new session
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession>;
    /// Create an account and start a session for it
    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession>;
    /// Fetch the profile owning `token`. Fails when the token is no longer accepted.
    async fn profile(&self, token: &str) -> Result<UserProfile>;
}

/// [AuthApi] backed by browser `fetch` calls to the configured API url
#[derive(Clone)]
pub struct HttpAuthApi {
    config: ClientConfig,
}

impl HttpAuthApi {
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path);
        log::debug!("POST {url}");
        let request = Request::post(&url).json(body)?;
        self.send(request).await
    }

    async fn send<T>(&self, request: Request) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let timeout = self.config.request_timeout;
        let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
        let exchange = async move {
            let response = request.send().await?;
            let status = response.status();
            let text = response.text().await?;
            parse_response(response.ok(), status, &text)
        };
        with_deadline(exchange, TimeoutFuture::new(millis), timeout).await
    }
}

impl AuthApi for HttpAuthApi {
    async fn login(&self, credentials: &Credentials) -> Result<AuthSession> {
        self.post(LOGIN_PATH, credentials).await
    }

    async fn register(&self, request: &RegisterRequest) -> Result<AuthSession> {
        self.post(REGISTER_PATH, request).await
    }

    async fn profile(&self, token: &str) -> Result<UserProfile> {
        let url = self.config.endpoint(PROFILE_PATH);
        log::debug!("GET {url}");
        let request = Request::get(&url).header("Authorization", &auth_header_value(token));
        self.send(request).await
    }
}

fn auth_header_value(token: &str) -> String {
    format!("Bearer {token}")
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] gloo_net::Error),
    #[error("API response body could not be decoded. {0}")]
    Decode(#[from] serde_json::Error),
    #[error("API rejected the request with status {status}")]
    Rejected { status: u16, message: Option<String> },
    #[error("API request did not complete within {}ms", .0.as_millis())]
    Timeout(Duration),
}

impl Error {
    /// Message supplied by the server with a rejection, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected {
                message: Some(message),
                ..
            } => Some(message),
            _ => None,
        }
    }

    /// True when the request never produced a usable response, as opposed to a rejection
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Fetch(_) | Self::Timeout(_))
    }
}

/// Interpret a response body. 2xx bodies are decoded into `T`, anything else becomes an
/// [Error::Rejected] carrying the server message when the body has one.
fn parse_response<T>(ok: bool, status: u16, text: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    // ensure we've got 2xx status
    if ok {
        return Ok(serde_json::from_str(text)?);
    }
    let message = match serde_json::from_str::<ApiMessage>(text) {
        Ok(body) => body.message.filter(|m| !m.trim().is_empty()),
        Err(error) => {
            log::debug!("Rejection body with status {status} is not an API message. {error}");
            None
        }
    };
    Err(Error::Rejected { status, message })
}

/// Run `request` until it finishes or `deadline` fires, whichever is first. An expired deadline
/// abandons the request and yields [Error::Timeout].
async fn with_deadline<F, D, T>(request: F, deadline: D, timeout: Duration) -> Result<T>
where
    F: Future<Output = Result<T>>,
    D: Future<Output = ()>,
{
    futures::pin_mut!(request);
    futures::pin_mut!(deadline);
    match select(request, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            log::error!("API request abandoned after {}ms", timeout.as_millis());
            Err(Error::Timeout(timeout))
        }
    }
}

#[cfg(test)]
mod test {
    use std::{
        future::{pending, ready},
        time::Duration,
    };

    use rstest::rstest;
    use web_portal_common::AuthSession;

    use super::{auth_header_value, parse_response, with_deadline, Error};

    const SESSION_BODY: &str = r#"{"token":"t1","user":{"username":"a","fullName":"A B","email":"a@b.com","createdAt":"2024-01-01"}}"#;

    #[test]
    fn parse_response_should_decode_success_body() -> Result<(), Error> {
        let session: AuthSession = parse_response(true, 200, SESSION_BODY)?;

        assert_eq!(session.token, "t1");
        assert_eq!(session.user.full_name, "A B");
        Ok(())
    }

    #[test]
    fn parse_response_should_fail_decode_when_success_body_malformed() {
        let result = parse_response::<AuthSession>(true, 200, "<html>");

        assert!(matches!(result, Err(Error::Decode(_))));
    }

    #[rstest]
    #[case::message(r#"{"message":"Invalid credentials"}"#, Some("Invalid credentials"))]
    #[case::blank_message(r#"{"message":"  "}"#, None)]
    #[case::no_message("{}", None)]
    #[case::not_json("Bad Gateway", None)]
    fn parse_response_should_reject_non_success(
        #[case] body: &str,
        #[case] expected: Option<&str>,
    ) {
        let Err(error) = parse_response::<AuthSession>(false, 401, body) else {
            panic!("Expected a rejection");
        };

        assert!(matches!(error, Error::Rejected { status: 401, .. }));
        assert_eq!(error.server_message(), expected);
        assert!(!error.is_transport());
    }

    #[test]
    fn auth_header_value_should_use_bearer_scheme() {
        assert_eq!(auth_header_value("t1"), "Bearer t1");
    }

    #[tokio::test]
    async fn with_deadline_should_return_result_when_request_finishes() {
        let result = with_deadline(ready(Ok(7)), pending(), Duration::from_secs(1)).await;

        assert!(matches!(result, Ok(7)));
    }

    #[tokio::test]
    async fn with_deadline_should_time_out_when_request_hangs() {
        let timeout = Duration::from_millis(250);

        let result = with_deadline(pending::<Result<(), Error>>(), ready(()), timeout).await;

        let Err(error) = result else {
            panic!("Expected a timeout");
        };
        assert!(matches!(error, Error::Timeout(t) if t == timeout));
        assert!(error.is_transport());
    }
}
