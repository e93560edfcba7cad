use std::time::Duration;

/// Base url of the authentication API when no override is compiled in
pub const DEFAULT_API_URL: &str = "http://localhost:5000";
/// Local storage key holding the session token when no override is compiled in
pub const DEFAULT_TOKEN_KEY: &str = "token";
/// Time allowed for a single API request when no override is compiled in
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Runtime settings of the client. The browser has no process environment so overrides are
/// captured at compile time from `PORTAL_API_URL`, `PORTAL_TOKEN_KEY` and
/// `PORTAL_REQUEST_TIMEOUT_MS`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base url of the authentication API, without a trailing slash
    pub api_url: String,
    /// Local storage key of the persisted session token
    pub token_key: String,
    /// Deadline for each API request. Expired requests are treated as transport failures.
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            token_key: DEFAULT_TOKEN_KEY.to_owned(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_values(
            option_env!("PORTAL_API_URL"),
            option_env!("PORTAL_TOKEN_KEY"),
            option_env!("PORTAL_REQUEST_TIMEOUT_MS"),
        )
    }

    /// Build a config from optional raw values, keeping the default for anything missing, blank
    /// or unparsable.
    pub fn from_values(
        api_url: Option<&str>,
        token_key: Option<&str>,
        request_timeout_ms: Option<&str>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(url) = api_url.map(str::trim).filter(|u| !u.is_empty()) {
            config.api_url = url.trim_end_matches('/').to_owned();
        }
        if let Some(key) = token_key.map(str::trim).filter(|k| !k.is_empty()) {
            config.token_key = key.to_owned();
        }
        if let Some(raw) = request_timeout_ms {
            match raw.trim().parse::<u64>() {
                Ok(0) | Err(_) => log::warn!(
                    "Ignoring request timeout `{raw}`, using {}ms",
                    DEFAULT_REQUEST_TIMEOUT.as_millis()
                ),
                Ok(millis) => config.request_timeout = Duration::from_millis(millis),
            }
        }
        config
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.api_url)
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use rstest::rstest;

    use super::{ClientConfig, DEFAULT_REQUEST_TIMEOUT};

    #[test]
    fn from_values_should_use_defaults_when_nothing_set() {
        assert_eq!(ClientConfig::from_values(None, None, None), ClientConfig::default());
    }

    #[test]
    fn from_values_should_apply_overrides() {
        let config = ClientConfig::from_values(
            Some("https://auth.example.com/"),
            Some("portal_token"),
            Some("2500"),
        );

        assert_eq!(config.api_url, "https://auth.example.com");
        assert_eq!(config.token_key, "portal_token");
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
    }

    #[rstest]
    #[case::zero("0")]
    #[case::negative("-5")]
    #[case::text("soon")]
    fn from_values_should_ignore_bad_timeout(#[case] raw: &str) {
        let config = ClientConfig::from_values(None, None, Some(raw));

        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
    }

    #[test]
    fn endpoint_should_join_base_url_and_path() {
        let config = ClientConfig::default();

        assert_eq!(
            config.endpoint("/api/auth/login"),
            "http://localhost:5000/api/auth/login"
        );
    }
}
