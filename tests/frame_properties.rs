//! Property tests for wire framing.

use logentries::{
    FrameMode,
    frame::{ASCII_LINE_SEP, UNICODE_LINE_SEP},
};
use proptest::prelude::*;

fn count_substitutes(haystack: &[u8]) -> usize {
    haystack
        .windows(UNICODE_LINE_SEP.len())
        .filter(|w| *w == UNICODE_LINE_SEP)
        .count()
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop_oneof![
        proptest::collection::vec(any::<u8>(), 0..256),
        proptest::collection::vec(prop_oneof![Just(b'\n'), Just(b'x'), Just(b' ')], 0..64),
    ]
}

proptest! {
    #[test]
    fn only_the_terminator_is_a_line_feed(
        ref token in "[A-Za-z0-9-]{0,40}",
        ref prefix in "[A-Za-z0-9_.]{0,20}",
        ref payload in payload_strategy(),
    ) {
        let frame = FrameMode::LineSeparated.encode(token, prefix, payload);
        let feeds: Vec<usize> = frame
            .iter()
            .enumerate()
            .filter(|&(_, &b)| b == ASCII_LINE_SEP)
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(feeds, vec![frame.len() - 1]);
    }

    #[test]
    fn every_line_feed_becomes_one_substitute(
        ref payload in payload_strategy(),
    ) {
        let frame = FrameMode::LineSeparated.encode("tok", "pre", payload);
        let feeds = payload.iter().filter(|&&b| b == ASCII_LINE_SEP).count();
        // Payloads may already carry U+2028; those pass through untouched.
        let existing = count_substitutes(payload);
        prop_assert_eq!(count_substitutes(&frame), feeds + existing);
    }

    #[test]
    fn capacity_equals_encoded_length(
        ref token in "[A-Za-z0-9-]{0,40}",
        ref prefix in "\\PC{0,20}",
        ref payload in payload_strategy(),
    ) {
        for mode in [FrameMode::LineSeparated, FrameMode::Raw] {
            let frame = mode.encode(token, prefix, payload);
            prop_assert_eq!(frame.len(), mode.encoded_len(token, prefix, payload));
        }
    }

    #[test]
    fn substitutes_decode_back_to_payload(
        ref payload in proptest::collection::vec(prop_oneof![Just(b'\n'), Just(b'a')], 0..64),
    ) {
        let frame = FrameMode::LineSeparated.encode("t", "p", payload);
        let body = &frame[4..frame.len() - 1];
        let decoded = String::from_utf8(body.to_vec())
            .expect("ascii plus U+2028 is valid UTF-8")
            .replace('\u{2028}', "\n");
        prop_assert_eq!(decoded.into_bytes(), payload.clone());
    }

    #[test]
    fn raw_mode_is_plain_concatenation(
        ref payload in payload_strategy(),
    ) {
        let frame = FrameMode::Raw.encode("tok", "pre", payload);
        let mut expected = b"tok pre ".to_vec();
        expected.extend_from_slice(payload);
        prop_assert_eq!(frame, expected);
    }
}
