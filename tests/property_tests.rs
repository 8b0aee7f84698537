//! Property tests for envelope construction and call metadata.
//!
//! These check the construction rules across arbitrary statuses, codes
//! and messages rather than hand-picked examples.

use ext_common::{CallMeta, Envelope, ErrorLike, Status, StatusLike};
use proptest::prelude::*;

/// Owned status-like value for generated inputs.
#[derive(Debug, Clone)]
struct AnyStatus {
    success: bool,
    status: i32,
    code: String,
    msg: String,
}

impl StatusLike for AnyStatus {
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

// An error that claims success; envelopes must ignore that.
impl ErrorLike for AnyStatus {
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

// Strategy: text that never contains the `%s` marker
fn arb_plain_text() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z0-9 :.,!%-]{0,40}")
        .unwrap()
        .prop_filter("no marker", |s| !s.contains("%s"))
}

fn arb_status() -> impl Strategy<Value = AnyStatus> {
    (
        any::<bool>(),
        any::<i32>(),
        prop::string::string_regex("[A-Z_]{0,12}").unwrap(),
        prop::string::string_regex("[a-z %]{0,30}").unwrap(),
    )
        .prop_map(|(success, status, code, msg)| AnyStatus {
            success,
            status,
            code,
            msg,
        })
}

proptest! {
    /// Property: from_status copies every field verbatim and leaves data absent
    #[test]
    fn proptest_from_status_copies_fields(status in arb_status()) {
        let envelope: Envelope<u8> = Envelope::from_status(&status);

        prop_assert_eq!(envelope.success, status.success);
        prop_assert_eq!(envelope.status, status.status);
        prop_assert_eq!(&envelope.code, &status.code);
        prop_assert_eq!(&envelope.msg, &status.msg);
        prop_assert!(envelope.data.is_none());
    }

    /// Property: from_error is always a failure
    #[test]
    fn proptest_from_error_never_succeeds(mut error in arb_status()) {
        error.success = true;
        let envelope: Envelope<()> = Envelope::from_error(&error);

        prop_assert!(!envelope.success);
        prop_assert_eq!(envelope.status, error.status);
        prop_assert_eq!(&envelope.msg, &error.msg);
    }

    /// Property: a message without a marker is used verbatim whatever the substitutions
    #[test]
    fn proptest_plain_message_is_verbatim(
        message in arb_plain_text(),
        subs in prop::option::of(prop::collection::vec("[a-z]{0,8}", 0..4))
    ) {
        let subs_ref: Vec<&str> = subs.iter().flatten().map(String::as_str).collect();
        let subs_opt = subs.as_ref().map(|_| subs_ref.as_slice());

        let envelope: Envelope<()> = Envelope::create_with(true, 0, "", Some(&message), subs_opt);
        prop_assert_eq!(envelope.msg, message);
    }

    /// Property: without substitutions no marker survives
    #[test]
    fn proptest_strip_leaves_no_marker(
        before in arb_plain_text(),
        after in arb_plain_text()
    ) {
        let message = format!("{before}%s{after}");
        let envelope: Envelope<()> = Envelope::create_with(false, -1, "E", Some(&message), None);

        prop_assert_eq!(envelope.msg, format!("{before}{after}"));
    }

    /// Property: one marker with one substitution splices it in place
    #[test]
    fn proptest_single_substitution(
        before in arb_plain_text(),
        after in arb_plain_text(),
        sub in arb_plain_text()
    ) {
        let message = format!("{before}%s{after}");
        let envelope: Envelope<()> =
            Envelope::create_with(false, -1, "E", Some(&message), Some(&[sub.as_str()]));

        prop_assert_eq!(envelope.msg, format!("{before}{sub}{after}"));
    }

    /// Property: rendering to JSON and parsing back reproduces the envelope
    #[test]
    fn proptest_json_round_trip(
        status in arb_status(),
        data in prop::option::of(any::<i64>())
    ) {
        let mut envelope: Envelope<i64> = Envelope::from_status(&status);
        envelope.data = data;

        let parsed = Envelope::<i64>::from_json(&envelope.to_string()).unwrap();
        prop_assert_eq!(parsed, envelope);
    }

    /// Property: sampling frequency over one full basis cycle equals the rate
    #[test]
    fn proptest_sampling_matches_rate(rate in 0i32..=64, basis in 1i32..=64) {
        let meta = CallMeta::named("prop").sample(rate).basis(basis);
        let hits = (0..basis as u64).filter(|d| meta.is_sampled(*d)).count();

        prop_assert_eq!(hits as i32, rate.min(basis));
    }
}

#[test]
fn catalog_statuses_build_envelopes() {
    for status in [Status::OK, Status::MISSING_PARAMETER, Status::INTERFACE_ERROR] {
        let envelope: Envelope<()> = Envelope::from_status_with(&status, None);
        assert_eq!(envelope.success, status.success);
        assert!(!envelope.msg.contains("%s"));
    }
}
