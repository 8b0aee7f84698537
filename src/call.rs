use std::borrow::Cow;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::logging::CallLog;

/// Default slow-call threshold, in milliseconds.
pub const DEFAULT_ELAPSED_THRESHOLD_MS: i64 = 1000;
/// Default sampling numerator.
pub const DEFAULT_SAMPLE_RATE: i32 = 1;
/// Default sampling denominator.
pub const DEFAULT_SAMPLE_BASIS: i32 = 10_000;

/// Declarative call-logging configuration.
///
/// Attached to a function (as a `const` item) or to a type (through
/// [`Traced`]) and read by an interceptor that decides whether to log a call,
/// when to flag it slow, and how often to sample it.
///
/// Sampling probability is `sample_rate / sample_basis`. The two values are
/// independent signed integers and nothing here validates them: a rate above
/// the basis, a negative rate or a negative threshold all load as given. The
/// helpers below read out-of-range values conservatively (a non-positive
/// basis or a negative rate never samples, a negative threshold flags every
/// call slow).
///
/// # Examples
///
/// ```
/// use ext_common::CallMeta;
///
/// const LIST_ORDERS: CallMeta = CallMeta::named("orders.list").elapsed(250).sample(10);
///
/// assert_eq!(LIST_ORDERS.elapsed_threshold_ms, 250);
/// assert_eq!(LIST_ORDERS.sampling_probability(), 0.001);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CallMeta {
    /// Logical name of the call
    pub name: Cow<'static, str>,
    /// Calls slower than this are flagged slow
    pub elapsed_threshold_ms: i64,
    /// Sampling numerator
    pub sample_rate: i32,
    /// Sampling denominator
    pub sample_basis: i32,
}

impl CallMeta {
    /// Metadata with every field at its default.
    pub const DEFAULT: CallMeta = CallMeta::named("");

    /// Creates metadata with the given name and default thresholds.
    pub const fn named(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
            elapsed_threshold_ms: DEFAULT_ELAPSED_THRESHOLD_MS,
            sample_rate: DEFAULT_SAMPLE_RATE,
            sample_basis: DEFAULT_SAMPLE_BASIS,
        }
    }

    /// Sets the slow-call threshold in milliseconds.
    pub const fn elapsed(mut self, threshold_ms: i64) -> Self {
        self.elapsed_threshold_ms = threshold_ms;
        self
    }

    /// Sets the sampling numerator.
    pub const fn sample(mut self, rate: i32) -> Self {
        self.sample_rate = rate;
        self
    }

    /// Sets the sampling denominator.
    pub const fn basis(mut self, basis: i32) -> Self {
        self.sample_basis = basis;
        self
    }

    /// Returns the logical call name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the slow-call threshold, clamped at zero.
    pub fn elapsed_threshold(&self) -> Duration {
        Duration::from_millis(u64::try_from(self.elapsed_threshold_ms).unwrap_or(0))
    }

    /// Returns `sample_rate / sample_basis`, or `0.0` when the basis is zero.
    pub fn sampling_probability(&self) -> f64 {
        if self.sample_basis == 0 {
            return 0.0;
        }
        f64::from(self.sample_rate) / f64::from(self.sample_basis)
    }

    /// Decides whether a call is sampled, given a caller-supplied draw.
    ///
    /// The draw is reduced modulo `sample_basis` and compared against
    /// `sample_rate`, so a uniformly distributed draw samples with
    /// [`sampling_probability`](Self::sampling_probability). A zero basis
    /// never samples.
    pub fn is_sampled(&self, draw: u64) -> bool {
        let (Ok(basis), Ok(rate)) = (
            u64::try_from(self.sample_basis),
            u64::try_from(self.sample_rate),
        ) else {
            return false;
        };
        if basis == 0 {
            return false;
        }
        draw % basis < rate
    }

    /// Returns true if `elapsed` is strictly above the threshold.
    pub fn is_slow(&self, elapsed: Duration) -> bool {
        self.elapsed_threshold_ms < 0 || elapsed > self.elapsed_threshold()
    }

    /// Returns a structured logger for this call.
    pub fn log(&self) -> CallLog<'_> {
        CallLog::new(self)
    }
}

impl Default for CallMeta {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Attaches [`CallMeta`] to a type.
///
/// ```
/// use ext_common::{CallMeta, Traced};
///
/// struct OrderService;
///
/// impl Traced for OrderService {
///     const CALL: CallMeta = CallMeta::named("order-service").elapsed(500);
/// }
///
/// assert_eq!(OrderService::CALL.name(), "order-service");
/// assert_eq!(ext_common::call_meta::<OrderService>().sample_basis, 10_000);
/// ```
pub trait Traced {
    /// The call metadata for this type.
    const CALL: CallMeta;
}

/// Reads the metadata attached to `T`.
pub fn call_meta<T: Traced + ?Sized>() -> CallMeta {
    T::CALL
}
