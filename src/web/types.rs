//! Request and response bodies of the `web` module, the validated types built from them,
//! their parsing implementations and tests for those.

use lazy_regex::regex_is_match;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::database::NewSignup;

// ###################################
// ->   REQUESTS
// ###################################
/// Body of `POST /signup`.
/// Every field is lenient: a value that is missing, `null` or of the wrong type is read as `None`,
/// validation happens when converting into a `NewSignup`.
#[derive(Debug, Default, Deserialize)]
pub struct SignupRequest {
    #[serde(default, deserialize_with = "string_or_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "scalar_text_or_none")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "scalar_text_or_none")]
    pub interest: Option<String>,
    #[serde(default, deserialize_with = "scalar_text_or_none")]
    pub lang: Option<String>,
}

/// Only a JSON object carries fields. Arrays, strings, numbers and `null`
/// read as an empty request.
impl From<Value> for SignupRequest {
    fn from(body: Value) -> Self {
        match body {
            Value::Object(_) => serde_json::from_value(body).unwrap_or_default(),
            _ => Self::default(),
        }
    }
}

impl TryFrom<SignupRequest> for NewSignup {
    type Error = DataParsingError;

    fn try_from(req: SignupRequest) -> Result<Self, Self::Error> {
        let email = req
            .email
            .filter(|email| !email.is_empty())
            .ok_or(DataParsingError::EmailRequired)?;

        Ok(NewSignup {
            email: ValidEmail::parse(email)?,
            country: non_empty(req.country),
            interest: non_empty(req.interest),
            lang: non_empty(req.lang),
        })
    }
}

// ###################################
// ->   RESPONSES
// ###################################
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub ok: bool,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountResponse {
    pub count: i64,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignupResponse {
    pub ok: bool,
    pub count: i64,
}

// ###################################
// ->   VALIDATED
// ###################################
/// Trimmed, lower-cased and syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim().to_lowercase();

        // local part, '@', domain, '.', at least two trailing characters
        if regex_is_match!(r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$", &value) {
            Ok(ValidEmail(value))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   HELPERS
// ###################################
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Keeps strings, non-zero numbers and `true` as text. Zero, `false`, arrays and objects are `None`.
fn scalar_text_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Some(Value::Bool(true)) => Some("true".to_string()),
        _ => None,
    };

    Ok(text)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email is missing or not a string")]
    EmailRequired,
    #[error("email invalid")]
    EmailInvalid,
}
