use std::time::Duration;

use crate::call::CallMeta;

/// What [`CallLog::report`] did with a finished call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallReport {
    /// The call exceeded its threshold and was logged at WARN
    Slow,
    /// The call was within its threshold and selected by sampling
    Sampled,
    /// The call was within its threshold and not sampled
    Skipped,
}

/// A structured logger bound to one call's metadata.
///
/// `CallLog` is obtained from [`CallMeta::log`] and borrows the metadata,
/// so every event it emits carries the call name as a `call` field.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use ext_common::{CallMeta, CallReport};
///
/// static FETCH: CallMeta = CallMeta::named("inventory.fetch").elapsed(200);
///
/// let log = FETCH.log();
/// assert_eq!(log.call(), "inventory.fetch");
/// assert_eq!(log.report(Duration::from_millis(350), 42), CallReport::Slow);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CallLog<'a> {
    meta: &'a CallMeta,
}

impl<'a> CallLog<'a> {
    pub(crate) fn new(meta: &'a CallMeta) -> Self {
        Self { meta }
    }

    /// Returns the call name attached to every event.
    pub fn call(&self) -> &str {
        self.meta.name()
    }

    /// Returns the metadata this logger reads.
    pub fn meta(&self) -> &CallMeta {
        self.meta
    }

    /// Reports a finished call.
    ///
    /// Slow calls are always logged at WARN. Other calls are logged at DEBUG
    /// only when `draw` selects them under the call's sampling fraction.
    pub fn report(&self, elapsed: Duration, draw: u64) -> CallReport {
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        if self.meta.is_slow(elapsed) {
            tracing::warn!(
                target: "call",
                call = %self.call(),
                elapsed_ms,
                threshold_ms = self.meta.elapsed_threshold_ms,
                "slow call"
            );
            CallReport::Slow
        } else if self.meta.is_sampled(draw) {
            tracing::debug!(
                target: "call",
                call = %self.call(),
                elapsed_ms,
                sample_rate = self.meta.sample_rate,
                sample_basis = self.meta.sample_basis,
                "sampled call"
            );
            CallReport::Sampled
        } else {
            CallReport::Skipped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static META: CallMeta = CallMeta::named("t").elapsed(100).sample(1).basis(2);

    #[test]
    fn slow_wins_over_sampling() {
        let log = META.log();
        assert_eq!(log.report(Duration::from_millis(101), 1), CallReport::Slow);
    }

    #[test]
    fn fast_call_sampled_by_draw() {
        let log = META.log();
        assert_eq!(log.report(Duration::from_millis(5), 0), CallReport::Sampled);
        assert_eq!(log.report(Duration::from_millis(5), 1), CallReport::Skipped);
    }

    #[test]
    fn threshold_is_not_slow() {
        let log = META.log();
        assert_eq!(log.report(Duration::from_millis(100), 1), CallReport::Skipped);
    }

    #[test]
    fn logger_exposes_meta() {
        let meta = CallMeta::named("exposed");
        let log = meta.log();
        assert_eq!(log.call(), "exposed");
        assert_eq!(log.meta(), &meta);
    }

    #[test]
    fn report_under_debug_subscriber() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let log = META.log();
            assert_eq!(log.report(Duration::from_secs(1), 0), CallReport::Slow);
            assert_eq!(log.report(Duration::from_millis(1), 2), CallReport::Sampled);
            assert_eq!(log.report(Duration::MAX, 1), CallReport::Slow);
        });
    }
}
