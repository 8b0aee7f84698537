//! Placeholder substitution for envelope messages.
//!
//! The only recognised marker is [`MARKER`] (`%s`). Markers are filled left
//! to right, one substitution each, and substituted text is never rescanned.
//!
//! This is not printf. There is no escape syntax:
//!
//! - `%%` stays `%%` (it is not collapsed to `%`)
//! - `%%s` is a literal `%` followed by a marker, so `"100%%s"` renders as
//!   `"100%<sub>"`
//! - `%d`, `%n` and every other `%` sequence are plain text
//!
//! ```
//! use ext_common::template::render;
//!
//! assert_eq!(render("100%% of %s", &["disk"]), "100%% of disk");
//! assert_eq!(render("rate: %%s", &["5"]), "rate: %5");
//! ```

use crate::error::Error;

/// The positional placeholder marker.
pub const MARKER: &str = "%s";

/// Returns true if `message` contains at least one placeholder marker.
pub fn contains_marker(message: &str) -> bool {
    message.contains(MARKER)
}

/// Counts the placeholder markers in `message`.
pub fn count_markers(message: &str) -> usize {
    message.matches(MARKER).count()
}

/// Removes every placeholder marker from `message`.
///
/// ```
/// assert_eq!(ext_common::template::strip("error: %s"), "error: ");
/// ```
pub fn strip(message: &str) -> String {
    message.replace(MARKER, "")
}

/// Fills placeholder markers with `subs`, in order.
///
/// Extra substitutions are ignored. Markers left without a substitution are
/// replaced with the empty string.
///
/// ```
/// use ext_common::template::render;
///
/// assert_eq!(render("error: %s", &["disk full"]), "error: disk full");
/// assert_eq!(render("%s and %s", &["a"]), "a and ");
/// ```
pub fn render<S: AsRef<str>>(message: &str, subs: &[S]) -> String {
    let placeholders = count_markers(message);
    if placeholders > subs.len() {
        tracing::debug!(
            placeholders,
            supplied = subs.len(),
            "unmatched placeholders resolved to empty"
        );
    }
    fill(message, subs)
}

/// Like [`render`], but fails when there are fewer substitutions than markers.
///
/// # Errors
///
/// Returns [`Error::ArityMismatch`] if `subs` is shorter than the number of markers.
pub fn render_strict<S: AsRef<str>>(message: &str, subs: &[S]) -> Result<String, Error> {
    let placeholders = count_markers(message);
    if placeholders > subs.len() {
        return Err(Error::ArityMismatch {
            placeholders,
            supplied: subs.len(),
        });
    }
    Ok(fill(message, subs))
}

fn fill<S: AsRef<str>>(message: &str, subs: &[S]) -> String {
    let mut out = String::with_capacity(message.len());
    let mut subs = subs.iter();
    let mut pieces = message.split(MARKER);

    // split always yields at least one piece
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }
    for piece in pieces {
        if let Some(sub) = subs.next() {
            out.push_str(sub.as_ref());
        }
        out.push_str(piece);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_marker() {
        assert!(contains_marker("error: %s"));
        assert!(!contains_marker("error: 100%"));
        assert!(!contains_marker("error: %d"));
    }

    #[test]
    fn counts_markers() {
        assert_eq!(count_markers("no markers"), 0);
        assert_eq!(count_markers("%s-%s-%s"), 3);
    }

    #[test]
    fn render_single() {
        assert_eq!(render("error: %s", &["disk full"]), "error: disk full");
    }

    #[test]
    fn render_multiple_in_order() {
        assert_eq!(
            render("%s failed after %s ms", &["fetch", "250"]),
            "fetch failed after 250 ms"
        );
    }

    #[test]
    fn render_ignores_extra_subs() {
        assert_eq!(render("hello %s", &["a", "b", "c"]), "hello a");
    }

    #[test]
    fn render_blanks_missing_subs() {
        assert_eq!(render("%s/%s/%s", &["x"]), "x//");
    }

    #[test]
    fn render_with_empty_subs_matches_strip() {
        let empty: [&str; 0] = [];
        assert_eq!(render("error: %s", &empty), strip("error: %s"));
    }

    #[test]
    fn render_does_not_rescan_substituted_text() {
        assert_eq!(render("%s and %s", &["%s", "b"]), "%s and b");
    }

    #[test]
    fn render_strict_rejects_short_subs() {
        let err = render_strict("%s %s", &["only"]).unwrap_err();
        assert_eq!(
            err,
            Error::ArityMismatch {
                placeholders: 2,
                supplied: 1
            }
        );
    }

    #[test]
    fn render_strict_accepts_exact_and_extra() {
        assert_eq!(render_strict("%s", &["a"]).unwrap(), "a");
        assert_eq!(render_strict("%s", &["a", "b"]).unwrap(), "a");
    }

    #[test]
    fn strip_removes_all_markers() {
        assert_eq!(strip("%s: %s!"), ": !");
        assert_eq!(strip("plain"), "plain");
    }

    #[test]
    fn double_percent_before_s_keeps_one_percent_and_a_marker() {
        assert_eq!(count_markers("%%s"), 1);
        assert_eq!(render("%%s", &["x"]), "%x");
        assert_eq!(strip("%%s"), "%");
    }

    #[test]
    fn other_percent_sequences_are_literal() {
        assert_eq!(render("100%% of %s", &["x"]), "100%% of x");
    }
}
