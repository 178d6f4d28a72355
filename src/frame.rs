//! Wire framing for records sent to the collector.
//!
//! A frame is `<token> <prefix> <payload>`. In [`FrameMode::LineSeparated`]
//! every line feed inside the payload is rewritten to U+2028 and a single
//! line feed terminates the record, so the collector can split the stream on
//! `\n` even when a payload spans several lines. [`FrameMode::Raw`] copies the
//! payload untouched and adds no terminator.

/// Record delimiter understood by the collector (`"\n"`).
pub const ASCII_LINE_SEP: u8 = 0x0A;
/// Separator placed after the token and after the prefix (`" "`).
pub const ASCII_SPACE: u8 = 0x20;
/// UTF-8 encoding of U+2028 LINE SEPARATOR.
pub const UNICODE_LINE_SEP: [u8; 3] = [0xE2, 0x80, 0xA8];

/// Framing applied to each payload before it is transmitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FrameMode {
    /// Substitute embedded line feeds and terminate with `\n`.
    #[default]
    LineSeparated,
    /// `token + " " + prefix + " " + payload`, verbatim.
    Raw,
}

impl FrameMode {
    /// Exact number of bytes [`encode_into`](Self::encode_into) produces.
    pub fn encoded_len(self, token: &str, prefix: &str, payload: &[u8]) -> usize {
        let header = token.len() + 1 + prefix.len() + 1;
        match self {
            FrameMode::LineSeparated => {
                // Each 1-byte "\n" grows to the 3-byte U+2028, plus the trailing "\n".
                let breaks = count_line_breaks(payload);
                header + payload.len() + breaks * (UNICODE_LINE_SEP.len() - 1) + 1
            }
            FrameMode::Raw => header + payload.len(),
        }
    }

    /// Replace the contents of `buf` with the encoded frame.
    ///
    /// The buffer is cleared first and grown to exactly the encoded length, so
    /// a long-lived scratch buffer can be reused across calls.
    pub fn encode_into(self, buf: &mut Vec<u8>, token: &str, prefix: &str, payload: &[u8]) {
        buf.clear();
        buf.reserve_exact(self.encoded_len(token, prefix, payload));

        buf.extend_from_slice(token.as_bytes());
        buf.push(ASCII_SPACE);
        buf.extend_from_slice(prefix.as_bytes());
        buf.push(ASCII_SPACE);

        match self {
            FrameMode::LineSeparated => {
                let mut lines = payload.split(|&b| b == ASCII_LINE_SEP);
                if let Some(first) = lines.next() {
                    buf.extend_from_slice(first);
                }
                for line in lines {
                    buf.extend_from_slice(&UNICODE_LINE_SEP);
                    buf.extend_from_slice(line);
                }
                buf.push(ASCII_LINE_SEP);
            }
            FrameMode::Raw => buf.extend_from_slice(payload),
        }
    }

    /// Encode into a freshly allocated buffer.
    pub fn encode(self, token: &str, prefix: &str, payload: &[u8]) -> Vec<u8> {
        let mut buf = Vec::new();
        self.encode_into(&mut buf, token, prefix, payload);
        buf
    }
}

fn count_line_breaks(payload: &[u8]) -> usize {
    payload.iter().filter(|&&b| b == ASCII_LINE_SEP).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn substitutes_embedded_line_feeds() {
        let frame = FrameMode::LineSeparated.encode("abc123", "app1", b"line1\nline2");
        let mut expected = b"abc123 app1 line1".to_vec();
        expected.extend_from_slice(&[0xE2, 0x80, 0xA8]);
        expected.extend_from_slice(b"line2\n");
        assert_eq!(frame, expected);
    }

    #[rstest]
    #[case::empty(b"".as_slice())]
    #[case::only_separators(b"\n\n\n".as_slice())]
    #[case::no_separators(b"plain text".as_slice())]
    #[case::leading_and_trailing(b"\nmiddle\n".as_slice())]
    fn capacity_matches_encoded_length(#[case] payload: &[u8]) {
        for mode in [FrameMode::LineSeparated, FrameMode::Raw] {
            let frame = mode.encode("tok", "pre", payload);
            assert_eq!(frame.len(), mode.encoded_len("tok", "pre", payload));
        }
    }

    #[rstest]
    fn empty_payload_is_header_and_terminator() {
        assert_eq!(FrameMode::LineSeparated.encode("t", "", b""), b"t  \n");
    }

    #[rstest]
    fn only_separators_become_substitutes() {
        let frame = FrameMode::LineSeparated.encode("t", "p", b"\n\n");
        let mut expected = b"t p ".to_vec();
        expected.extend_from_slice(&UNICODE_LINE_SEP);
        expected.extend_from_slice(&UNICODE_LINE_SEP);
        expected.push(ASCII_LINE_SEP);
        assert_eq!(frame, expected);
    }

    #[rstest]
    fn raw_mode_copies_payload_verbatim() {
        let frame = FrameMode::Raw.encode("abc123", "app1", b"line1\nline2\n");
        assert_eq!(frame, b"abc123 app1 line1\nline2\n");
    }

    #[rstest]
    fn encode_into_reuses_buffer() {
        let mut buf = b"stale contents that must go".to_vec();
        FrameMode::LineSeparated.encode_into(&mut buf, "a", "b", b"c");
        assert_eq!(buf, b"a b c\n");
    }

    #[rstest]
    fn token_and_prefix_are_not_escaped() {
        let frame = FrameMode::LineSeparated.encode("to ken", "pre\nfix", b"x");
        assert_eq!(frame, b"to ken pre\nfix x\n");
    }
}
