/// Read-only view of an outcome: success flag, numeric status, code and message.
///
/// Implemented by [`Status`] for the well-known catalog and by
/// [`Envelope`](crate::Envelope) itself, so either can seed a new envelope.
pub trait StatusLike {
    /// Whether the outcome is a success.
    fn is_success(&self) -> bool;
    /// Numeric status code (0 is normal, negatives are error classes).
    fn status(&self) -> i32;
    /// Symbolic code, empty on success.
    fn code(&self) -> &str;
    /// Message, possibly containing `%s` placeholders.
    fn msg(&self) -> &str;
}

impl<S: StatusLike + ?Sized> StatusLike for &S {
    fn is_success(&self) -> bool {
        (**self).is_success()
    }

    fn status(&self) -> i32 {
        (**self).status()
    }

    fn code(&self) -> &str {
        (**self).code()
    }

    fn msg(&self) -> &str {
        (**self).msg()
    }
}

/// Read/write access to a result carrying a payload.
///
/// Extends [`StatusLike`] with the payload and setters for every field, so
/// code that post-processes responses (e.g. a handler wrapper rewriting the
/// message) can work against any envelope type.
pub trait ResultSupport<T>: StatusLike {
    /// The payload, if any.
    fn data(&self) -> Option<&T>;
    /// Sets the success flag.
    fn set_success(&mut self, success: bool);
    /// Sets the numeric status.
    fn set_status(&mut self, status: i32);
    /// Sets the symbolic code.
    fn set_code(&mut self, code: String);
    /// Sets the message.
    fn set_msg(&mut self, msg: String);
    /// Sets or clears the payload.
    fn set_data(&mut self, data: Option<T>);
}

/// A static status definition.
///
/// Services usually declare their statuses once as `const` items and hand them
/// to [`Envelope::from_status`](crate::Envelope::from_status).
///
/// # Examples
///
/// ```
/// use ext_common::{Envelope, Status};
///
/// const ORDER_NOT_FOUND: Status = Status::failure(-404, "E_ORDER_NOT_FOUND", "order %s not found");
///
/// let envelope: Envelope<()> = Envelope::from_status_with(&ORDER_NOT_FOUND, Some(&["A-17"]));
/// assert_eq!(envelope.msg, "order A-17 not found");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    /// Success flag
    pub success: bool,
    /// Numeric status code
    pub status: i32,
    /// Symbolic code
    pub code: &'static str,
    /// Message template
    pub msg: &'static str,
}

impl Status {
    /// Normal completion.
    pub const OK: Status = Status::new(true, 0, "", "ok");

    /// A required parameter was not supplied. The message takes the parameter name.
    pub const MISSING_PARAMETER: Status =
        Status::failure(-1, "E_MISSING_PARAMETER", "missing parameter: %s");

    /// A downstream interface call failed.
    pub const INTERFACE_ERROR: Status =
        Status::failure(-3, "E_INTERFACE", "interface exception");

    /// Creates a status definition.
    pub const fn new(success: bool, status: i32, code: &'static str, msg: &'static str) -> Self {
        Self {
            success,
            status,
            code,
            msg,
        }
    }

    /// Creates a failing status definition.
    pub const fn failure(status: i32, code: &'static str, msg: &'static str) -> Self {
        Self::new(false, status, code, msg)
    }
}

impl StatusLike for Status {
    fn is_success(&self) -> bool {
        self.success
    }

    fn status(&self) -> i32 {
        self.status
    }

    fn code(&self) -> &str {
        self.code
    }

    fn msg(&self) -> &str {
        self.msg
    }
}
