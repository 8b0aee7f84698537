//! The response envelope returned at service boundaries.
//!
//! An [`Envelope`] standardises how an operation reports its outcome: a
//! success flag, a numeric status, a symbolic code, a message and an optional
//! payload. Envelopes are built from a [`StatusLike`] value, from a caught
//! [`ErrorLike`] error, or from explicit fields.
//!
//! # Message placeholders
//!
//! Messages may contain `%s` markers. The `*_with` factories take an optional
//! list of substitutions:
//!
//! - `Some(subs)`: markers are filled in order (see [`template::render`])
//! - `None`: markers are stripped
//!
//! A message without markers is always used verbatim.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorLike, ServiceError};
use crate::status::{ResultSupport, StatusLike};
use crate::template;

/// A uniform result envelope with an optional payload.
///
/// Fields are public; after construction the envelope is a plain data holder.
///
/// # Examples
///
/// ```
/// use ext_common::Envelope;
///
/// let envelope: Envelope<()> = Envelope::create(true, 0, "", "ok");
/// assert_eq!(
///     envelope.to_string(),
///     r#"{"success":true,"status":0,"code":"","msg":"ok","data":null}"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Envelope<T> {
    /// Whether the operation succeeded
    pub success: bool,
    /// Numeric status code: 0 normal, negatives are error classes
    pub status: i32,
    /// Symbolic error code, empty on success
    pub code: String,
    /// Human-readable message
    pub msg: String,
    /// Payload, usually present only on success
    pub data: Option<T>,
}

impl<T> Default for Envelope<T> {
    fn default() -> Self {
        Self {
            success: true,
            status: 0,
            code: String::new(),
            msg: String::new(),
            data: None,
        }
    }
}

impl<T> Envelope<T> {
    /// Creates an envelope by copying every field of `status` verbatim.
    ///
    /// No placeholder processing is done on the message.
    pub fn from_status(status: &impl StatusLike) -> Self {
        Self::create(
            status.is_success(),
            status.status(),
            status.code(),
            status.msg(),
        )
    }

    /// Creates a failed envelope from a caught error.
    ///
    /// `success` is always `false`.
    pub fn from_error(error: &impl ErrorLike) -> Self {
        Self::create(false, error.status(), error.code(), error.msg())
    }

    /// Creates an envelope from explicit fields, without placeholder processing.
    pub fn create(
        success: bool,
        status: i32,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            success,
            status,
            code: code.into(),
            msg: message.into(),
            data: None,
        }
    }

    /// Creates an envelope from `status`, applying `subs` to its message.
    ///
    /// ```
    /// use ext_common::{Envelope, Status};
    ///
    /// let filled: Envelope<()> = Envelope::from_status_with(&Status::MISSING_PARAMETER, Some(&["id"]));
    /// assert_eq!(filled.msg, "missing parameter: id");
    ///
    /// let stripped: Envelope<()> = Envelope::from_status_with(&Status::MISSING_PARAMETER, None);
    /// assert_eq!(stripped.msg, "missing parameter: ");
    /// ```
    pub fn from_status_with(status: &impl StatusLike, subs: Option<&[&str]>) -> Self {
        Self::create_with(
            status.is_success(),
            status.status(),
            status.code(),
            Some(status.msg()),
            subs,
        )
    }

    /// Creates an envelope from explicit fields, applying `subs` to `message`.
    ///
    /// An absent message becomes the empty string. If the message contains a
    /// placeholder marker it is rendered with `subs` when they are given, or
    /// stripped of markers when they are not. Otherwise it is kept verbatim.
    pub fn create_with(
        success: bool,
        status: i32,
        code: impl Into<String>,
        message: Option<&str>,
        subs: Option<&[&str]>,
    ) -> Self {
        let msg = match message {
            Some(m) if template::contains_marker(m) => match subs {
                Some(subs) => template::render(m, subs),
                None => template::strip(m),
            },
            Some(m) => m.to_string(),
            None => String::new(),
        };
        Self::create(success, status, code, msg)
    }

    /// Like [`create_with`](Self::create_with), but fails when `subs` has fewer
    /// entries than the message has markers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ArityMismatch`] on a short substitution list.
    pub fn try_create_with(
        success: bool,
        status: i32,
        code: impl Into<String>,
        message: Option<&str>,
        subs: Option<&[&str]>,
    ) -> Result<Self, Error> {
        let msg = match (message, subs) {
            (Some(m), Some(subs)) if template::contains_marker(m) => {
                template::render_strict(m, subs)?
            }
            (Some(m), None) if template::contains_marker(m) => template::strip(m),
            (Some(m), _) => m.to_string(),
            (None, _) => String::new(),
        };
        Ok(Self::create(success, status, code, msg))
    }

    /// Creates an envelope from an optional status-like value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] if `status` is `None`.
    pub fn try_from_status<S: StatusLike>(status: Option<&S>) -> Result<Self, Error> {
        status
            .map(Self::from_status)
            .ok_or(Error::MissingInput { what: "status" })
    }

    /// Creates a failed envelope from an optional error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingInput`] if `error` is `None`.
    pub fn try_from_error<E: ErrorLike>(error: Option<&E>) -> Result<Self, Error> {
        error
            .map(Self::from_error)
            .ok_or(Error::MissingInput { what: "error" })
    }

    /// Creates a successful envelope carrying `data`.
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Sets the payload, returning the updated envelope.
    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    /// Returns true if the envelope reports success.
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Maps the payload, keeping every other field.
    pub fn map<U, F>(self, f: F) -> Envelope<U>
    where
        F: FnOnce(T) -> U,
    {
        Envelope {
            success: self.success,
            status: self.status,
            code: self.code,
            msg: self.msg,
            data: self.data.map(f),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// A failed envelope becomes a [`ServiceError`] with the same status,
    /// code and message.
    pub fn into_result(self) -> Result<Option<T>, ServiceError> {
        if self.success {
            Ok(self.data)
        } else {
            Err(ServiceError::new(self.status, self.code, self.msg))
        }
    }
}

impl<T: Serialize> Envelope<T> {
    /// Renders the envelope as indented JSON.
    ///
    /// # Errors
    ///
    /// Fails only if the payload's `Serialize` impl fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Parses an envelope from JSON. Missing fields take their defaults.
    ///
    /// # Limitations
    ///
    /// An absent payload renders as `"data":null`. A present payload that
    /// itself renders as `null` (`()`, `Option::None`, ...) is therefore
    /// indistinguishable from an absent one and parses back as `data: None`.
    /// Every other field round-trips unchanged.
    ///
    /// # Errors
    ///
    /// Returns the parser error for malformed input.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl<T> StatusLike for Envelope<T> {
    fn is_success(&self) -> bool {
        self.success
    }

    fn status(&self) -> i32 {
        self.status
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl<T> ResultSupport<T> for Envelope<T> {
    fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    fn set_success(&mut self, success: bool) {
        self.success = success;
    }

    fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    fn set_code(&mut self, code: String) {
        self.code = code;
    }

    fn set_msg(&mut self, msg: String) {
        self.msg = msg;
    }

    fn set_data(&mut self, data: Option<T>) {
        self.data = data;
    }
}

/// Renders compact JSON.
///
/// If the payload cannot be rendered (for example a map with non-string
/// keys), the envelope fields are written with `"data":null` and the
/// serializer error under `"dataError"`.
impl<T: Serialize> fmt::Display for Envelope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match serde_json::to_string(self) {
            Ok(json) => f.write_str(&json),
            Err(err) => {
                tracing::debug!(error = %err, "payload not renderable as JSON");
                let fallback = serde_json::json!({
                    "success": self.success,
                    "status": self.status,
                    "code": self.code,
                    "msg": self.msg,
                    "data": null,
                    "dataError": err.to_string(),
                });
                write!(f, "{}", fallback)
            }
        }
    }
}

impl<T> From<ServiceError> for Envelope<T> {
    fn from(error: ServiceError) -> Self {
        Self::from_error(&error)
    }
}

impl<T, E: ErrorLike> From<Result<T, E>> for Envelope<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => {
                tracing::debug!(
                    status = error.status(),
                    code = %error.code(),
                    "converting error into envelope"
                );
                Self::from_error(&error)
            }
        }
    }
}
