//! Call-logging metadata and a uniform result envelope for service code.
//!
//! This crate provides two independent building blocks:
//! - **Call metadata**: a declarative [`CallMeta`] record (name, slow-call
//!   threshold, sampling fraction) attached to functions or types and read by
//!   an interceptor through [`CallLog`]
//! - **Result envelope**: [`Envelope<T>`], a success flag, status, code,
//!   message and optional payload, with factories that build it from a
//!   [`StatusLike`] value or a caught [`ErrorLike`] error
//!
//! # Core Types
//!
//! - [`CallMeta`]: Call-logging configuration with `const` builders
//! - [`Traced`]: Attaches a `CallMeta` to a type
//! - [`Envelope<T>`]: Response envelope, serialised as JSON
//! - [`ResultSupport`]: Read/write access to any result envelope
//! - [`Status`]: Static status definitions with a small conventional catalog
//! - [`ServiceError`]: Application error convertible into an envelope
//!
//! # Examples
//!
//! ```
//! use ext_common::{CallMeta, Envelope, ServiceError, Status};
//!
//! const FIND_USER: CallMeta = CallMeta::named("users.find").elapsed(300);
//!
//! fn find_user(id: &str) -> Result<String, ServiceError> {
//!     if id.is_empty() {
//!         return Err(ServiceError::from_status(&Status::MISSING_PARAMETER));
//!     }
//!     Ok(format!("user-{id}"))
//! }
//!
//! let found: Envelope<String> = find_user("7").into();
//! assert!(found.success);
//! assert_eq!(found.data.as_deref(), Some("user-7"));
//!
//! let missing: Envelope<()> = Envelope::from_status_with(&Status::MISSING_PARAMETER, Some(&["id"]));
//! assert_eq!(missing.msg, "missing parameter: id");
//! assert_eq!(FIND_USER.sample_basis, 10_000);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod call;
mod envelope;
mod error;
mod logging;
mod status;
pub mod template;

pub use call::{
    call_meta, CallMeta, Traced, DEFAULT_ELAPSED_THRESHOLD_MS, DEFAULT_SAMPLE_BASIS,
    DEFAULT_SAMPLE_RATE,
};
pub use envelope::Envelope;
pub use error::{Error, ErrorLike, ServiceError};
pub use logging::{CallLog, CallReport};
pub use status::{ResultSupport, Status, StatusLike};
