//! Wire types shared between the portal client and the remote authentication API

use std::fmt::{Debug, Formatter};

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use common::api::ApiRequestValidator;
use lazy_regex::regex_is_match;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Minimum number of characters a new account password must contain
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Login request body sent to `POST /api/auth/login`
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Registration request body sent to `POST /api/auth/register`
#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: String,
}

impl Debug for RegisterRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("full_name", &self.full_name)
            .finish()
    }
}

/// Profile of an authenticated user as returned by the API. Always replaced as a whole, never
/// patched field by field.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub full_name: String,
    pub username: String,
    pub email: String,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl UserProfile {
    /// Name used to greet the user. Falls back to the username when no full name is on record.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// Successful login or registration response. Contains the opaque session token and the profile
/// of the user it belongs to.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// Body of a non-2xx API response. The message is optional since not every failure carries one.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Point in time sent by the API. Accepts RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` date times
/// and bare `YYYY-MM-DD` dates. Values without an offset are read as UTC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Parse a timestamp from an RFC 3339 string, a date time without offset or a bare date.
    /// Returns [None] if the value matches none of them.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(date_time.with_timezone(&Utc)));
        }
        if let Ok(date_time) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
            return Some(Self(Utc.from_utc_datetime(&date_time)));
        }
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some(Self(Utc.from_utc_datetime(&midnight)))
    }

    /// Calendar date of the timestamp in UTC
    pub fn date(&self) -> NaiveDate {
        self.0.date_naive()
    }

    /// Calendar date formatted as `YYYY-MM-DD`
    pub fn display_date(&self) -> String {
        self.date().format("%Y-%m-%d").to_string()
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::parse(&value)
            .ok_or_else(|| de::Error::custom(format!("invalid timestamp `{value}`")))
    }
}

/// Shapes a `createdAt` value can arrive in. Anything that is not a string is kept only to be
/// reported.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Text(String),
    Other(de::IgnoredAny),
}

/// Read an optional [Timestamp], mapping null and unreadable values to [None]. A bad value never
/// rejects the profile that carries it.
fn lenient_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Timestamp>, D::Error> {
    let raw = Option::<RawTimestamp>::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(RawTimestamp::Text(value)) => {
            let timestamp = Timestamp::parse(&value);
            if timestamp.is_none() {
                log::warn!("Ignoring unreadable createdAt value `{value}`");
            }
            timestamp
        }
        Some(RawTimestamp::Other(_)) => {
            log::warn!("Ignoring createdAt value that is not a string");
            None
        }
    })
}

/// Loose check that a value looks like `local@domain.tld`. The server remains the authority.
fn is_email(value: &str) -> bool {
    regex_is_match!(r"^[^@\s]+@[^@\s]+\.[^@\s]+$", value)
}

/// Client side validator for [Credentials]
pub struct CredentialsValidator;

impl ApiRequestValidator for CredentialsValidator {
    type ErrorMessage = &'static str;
    type Request = Credentials;

    fn validate(request: &Self::Request) -> Result<(), Self::ErrorMessage> {
        if request.email.trim().is_empty() {
            return Err("Email is required");
        }
        if !is_email(request.email.trim()) {
            return Err("Email must be a valid email address");
        }
        if request.password.is_empty() {
            return Err("Password is required");
        }
        Ok(())
    }
}

/// Client side validator for [RegisterRequest]
pub struct RegisterRequestValidator;

impl ApiRequestValidator for RegisterRequestValidator {
    type ErrorMessage = String;
    type Request = RegisterRequest;

    fn validate(request: &Self::Request) -> Result<(), Self::ErrorMessage> {
        if request.full_name.trim().is_empty() {
            return Err("Full name is required".to_owned());
        }
        if request.username.trim().is_empty() {
            return Err("Username is required".to_owned());
        }
        if request.email.trim().is_empty() {
            return Err("Email is required".to_owned());
        }
        if !is_email(request.email.trim()) {
            return Err("Email must be a valid email address".to_owned());
        }
        if request.password.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(format!(
                "Password must be at least {PASSWORD_MIN_LENGTH} characters"
            ));
        }
        Ok(())
    }
}
