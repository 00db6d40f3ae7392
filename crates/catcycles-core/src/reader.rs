/// Edge-stream parsing for category link dumps.
///
/// The input is a flat stream of whitespace-separated integers read strictly
/// pairwise as `(child, parent)`. Reading stops at the first [`SENTINEL`]
/// found in the child position; that token is consumed and nothing after it
/// is read.
///
/// ```text
/// subcat parentcat      <- optional two-token header (see ReadOptions)
/// 12  7
/// 7   12
/// -1
/// ```
///
/// The reader works line by line over any [`BufRead`] and holds at most one
/// input line at a time alongside the parsed pairs. A dump written as a
/// single line is therefore buffered whole.
use std::fmt;
use std::io::BufRead;
use std::ops::Range;

use crate::graph::CategoryId;

/// Child-position value that terminates the edge stream.
pub const SENTINEL: CategoryId = -1;

/// Number of leading tokens discarded when [`ReadOptions::skip_header`] is set.
const HEADER_TOKENS: usize = 2;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A single subcategory link: `child` is filed under `parent`.
///
/// In the graph this becomes the directed edge `parent → child`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    /// The subcategory.
    pub child: CategoryId,
    /// The category that contains `child`.
    pub parent: CategoryId,
}

impl Edge {
    /// Creates an edge recording that `child` is a subcategory of `parent`.
    pub fn new(child: CategoryId, parent: CategoryId) -> Self {
        Self { child, parent }
    }
}

/// Pairs read before the sentinel, in input order.
pub type EdgeList = Vec<Edge>;

/// Options controlling how the edge stream is framed.
#[derive(Debug, Clone, Default)]
pub struct ReadOptions {
    /// Discard the first two tokens (a `subcat parentcat` column header)
    /// before reading pairs.
    pub skip_header: bool,
}

/// Which half of a pair the reader expected when it failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// The first value of a pair (or the sentinel).
    Child,
    /// The second value of a pair.
    Parent,
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Child => f.write_str("child"),
            Slot::Parent => f.write_str("parent"),
        }
    }
}

/// Errors produced while reading an edge stream.
#[derive(Debug)]
pub enum ReadError {
    /// The stream ended before the sentinel was read.
    TruncatedInput {
        /// Number of complete pairs read before the stream ran out.
        pairs_read: usize,
    },
    /// A token could not be parsed as a base-10 integer.
    MalformedToken {
        /// The offending token, lossily decoded as UTF-8.
        token: String,
        /// 1-based line number where the token appears.
        line: usize,
        /// The pair position the reader was filling.
        expected: Slot,
    },
    /// The underlying reader failed.
    Io(std::io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::TruncatedInput { pairs_read } => write!(
                f,
                "input ended before the {SENTINEL} sentinel after {pairs_read} complete pairs"
            ),
            ReadError::MalformedToken {
                token,
                line,
                expected,
            } => write!(
                f,
                "line {line}: expected an integer {expected} id, found {token:?}"
            ),
            ReadError::Io(e) => write!(f, "read failed: {e}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Io(e) => Some(e),
            ReadError::TruncatedInput { .. } | ReadError::MalformedToken { .. } => None,
        }
    }
}

impl From<std::io::Error> for ReadError {
    fn from(e: std::io::Error) -> Self {
        ReadError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Reads `(child, parent)` pairs from `reader` until the sentinel.
///
/// # Errors
///
/// - [`ReadError::TruncatedInput`] if the stream ends before the sentinel,
///   including in the middle of a pair or inside the header.
/// - [`ReadError::MalformedToken`] if a token is not an integer.
/// - [`ReadError::Io`] if reading from `reader` fails.
pub fn read_edges<R: BufRead>(reader: R, options: &ReadOptions) -> Result<EdgeList, ReadError> {
    let mut tokens = Tokenizer::new(reader);

    if options.skip_header {
        for _ in 0..HEADER_TOKENS {
            if tokens.next_token()?.is_none() {
                return Err(ReadError::TruncatedInput { pairs_read: 0 });
            }
        }
    }

    let mut edges = EdgeList::new();
    loop {
        let Some(child) = tokens.next_id(Slot::Child)? else {
            return Err(ReadError::TruncatedInput {
                pairs_read: edges.len(),
            });
        };
        if child == SENTINEL {
            return Ok(edges);
        }
        let Some(parent) = tokens.next_id(Slot::Parent)? else {
            return Err(ReadError::TruncatedInput {
                pairs_read: edges.len(),
            });
        };
        edges.push(Edge::new(child, parent));
    }
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// Splits a buffered byte stream into whitespace-delimited tokens, one line
/// at a time.
struct Tokenizer<R> {
    reader: R,
    line: Vec<u8>,
    pos: usize,
    line_no: usize,
}

impl<R: BufRead> Tokenizer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            pos: 0,
            line_no: 0,
        }
    }

    /// Returns the byte range of the next token within `self.line`, or
    /// `None` at end of stream.
    fn next_token(&mut self) -> std::io::Result<Option<Range<usize>>> {
        loop {
            while self.pos < self.line.len() && self.line[self.pos].is_ascii_whitespace() {
                self.pos += 1;
            }
            if self.pos < self.line.len() {
                let start = self.pos;
                while self.pos < self.line.len() && !self.line[self.pos].is_ascii_whitespace() {
                    self.pos += 1;
                }
                return Ok(Some(start..self.pos));
            }

            self.line.clear();
            self.pos = 0;
            if self.reader.read_until(b'\n', &mut self.line)? == 0 {
                return Ok(None);
            }
            self.line_no += 1;
        }
    }

    /// Reads the next token and parses it as a category id.
    fn next_id(&mut self, slot: Slot) -> Result<Option<CategoryId>, ReadError> {
        let Some(range) = self.next_token()? else {
            return Ok(None);
        };
        let token = &self.line[range];
        match parse_id(token) {
            Some(id) => Ok(Some(id)),
            None => Err(ReadError::MalformedToken {
                token: String::from_utf8_lossy(token).into_owned(),
                line: self.line_no,
                expected: slot,
            }),
        }
    }
}

fn parse_id(token: &[u8]) -> Option<CategoryId> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]
    #![allow(clippy::panic)]
    #![allow(clippy::wildcard_enum_match_arm)]

    use super::*;

    fn read(input: &str) -> Result<EdgeList, ReadError> {
        read_edges(input.as_bytes(), &ReadOptions::default())
    }

    fn read_with_header(input: &str) -> Result<EdgeList, ReadError> {
        read_edges(input.as_bytes(), &ReadOptions { skip_header: true })
    }

    // ── happy path ──────────────────────────────────────────────────────────

    #[test]
    fn sentinel_only_yields_no_edges() {
        let edges = read("-1").expect("should read");
        assert!(edges.is_empty());
    }

    #[test]
    fn pairs_are_child_then_parent() {
        let edges = read("2 1\n3 2\n-1\n").expect("should read");
        assert_eq!(edges, vec![Edge::new(2, 1), Edge::new(3, 2)]);
    }

    #[test]
    fn tokens_may_span_lines_and_mixed_whitespace() {
        let edges = read("  2\t1 3\r\n\n2   -1").expect("should read");
        assert_eq!(edges, vec![Edge::new(2, 1), Edge::new(3, 2)]);
    }

    #[test]
    fn nothing_after_sentinel_is_read() {
        // The trailing garbage would be a malformed token if it were read.
        let edges = read("5 4 -1 not-a-number").expect("should stop at sentinel");
        assert_eq!(edges, vec![Edge::new(5, 4)]);
    }

    #[test]
    fn dump_on_a_single_line_is_read_whole() {
        let mut input = String::new();
        for child in 1..=1000 {
            input.push_str(&format!("{child} 0 "));
        }
        input.push_str("-1");
        let edges = read(&input).expect("should read");
        assert_eq!(edges.len(), 1000);
        assert_eq!(edges.last(), Some(&Edge::new(1000, 0)));
    }

    #[test]
    fn sentinel_in_parent_position_is_an_ordinary_id() {
        let edges = read("7 -1 -1").expect("should read");
        assert_eq!(edges, vec![Edge::new(7, -1)]);
    }

    #[test]
    fn duplicate_pairs_are_preserved_in_order() {
        let edges = read("2 1 2 1 -1").expect("should read");
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn large_and_explicitly_signed_ids_parse() {
        let edges = read("+9007199254740993 -42 -1").expect("should read");
        assert_eq!(edges, vec![Edge::new(9_007_199_254_740_993, -42)]);
    }

    // ── header skipping ─────────────────────────────────────────────────────

    #[test]
    fn header_tokens_are_skipped() {
        let edges = read_with_header("subcat\tparentcat\n10 20\n-1\n").expect("should read");
        assert_eq!(edges, vec![Edge::new(10, 20)]);
    }

    #[test]
    fn header_without_skip_is_malformed() {
        let err = read("subcat parentcat\n10 20\n-1").expect_err("should fail");
        match err {
            ReadError::MalformedToken {
                token,
                line,
                expected,
            } => {
                assert_eq!(token, "subcat");
                assert_eq!(line, 1);
                assert_eq!(expected, Slot::Child);
            }
            other => panic!("expected MalformedToken, got {other:?}"),
        }
    }

    #[test]
    fn missing_header_is_truncated() {
        let err = read_with_header("subcat").expect_err("should fail");
        assert!(matches!(err, ReadError::TruncatedInput { pairs_read: 0 }));
    }

    // ── errors ──────────────────────────────────────────────────────────────

    #[test]
    fn empty_input_is_truncated() {
        let err = read("").expect_err("should fail");
        assert!(matches!(err, ReadError::TruncatedInput { pairs_read: 0 }));
    }

    #[test]
    fn missing_sentinel_is_truncated() {
        let err = read("2 1\n3 2\n").expect_err("should fail");
        match err {
            ReadError::TruncatedInput { pairs_read } => assert_eq!(pairs_read, 2),
            other => panic!("expected TruncatedInput, got {other:?}"),
        }
    }

    #[test]
    fn stream_ending_mid_pair_is_truncated() {
        let err = read("2 1 3").expect_err("should fail");
        match err {
            ReadError::TruncatedInput { pairs_read } => assert_eq!(pairs_read, 1),
            other => panic!("expected TruncatedInput, got {other:?}"),
        }
    }

    #[test]
    fn malformed_parent_reports_line_and_slot() {
        let err = read("2 1\n3 x7\n-1").expect_err("should fail");
        match err {
            ReadError::MalformedToken {
                token,
                line,
                expected,
            } => {
                assert_eq!(token, "x7");
                assert_eq!(line, 2);
                assert_eq!(expected, Slot::Parent);
            }
            other => panic!("expected MalformedToken, got {other:?}"),
        }
    }

    #[test]
    fn fractional_token_is_malformed() {
        let err = read("1.5 2 -1").expect_err("should fail");
        assert!(matches!(err, ReadError::MalformedToken { .. }));
    }

    #[test]
    fn out_of_range_token_is_malformed() {
        let err = read("99999999999999999999 1 -1").expect_err("should fail");
        assert!(matches!(err, ReadError::MalformedToken { .. }));
    }

    #[test]
    fn invalid_utf8_token_is_malformed() {
        let input: &[u8] = b"2 \xff\xfe -1";
        let err = read_edges(input, &ReadOptions::default()).expect_err("should fail");
        match err {
            ReadError::MalformedToken { token, .. } => assert!(token.contains('\u{fffd}')),
            other => panic!("expected MalformedToken, got {other:?}"),
        }
    }

    #[test]
    fn io_errors_are_propagated() {
        struct Broken;
        impl std::io::Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }
        let reader = std::io::BufReader::new(Broken);
        let err = read_edges(reader, &ReadOptions::default()).expect_err("should fail");
        assert!(matches!(err, ReadError::Io(_)));
        assert!(err.to_string().contains("disk on fire"));
    }

    // ── Display ─────────────────────────────────────────────────────────────

    #[test]
    fn truncated_message_mentions_sentinel() {
        let msg = ReadError::TruncatedInput { pairs_read: 3 }.to_string();
        assert!(msg.contains("-1"), "message: {msg}");
        assert!(msg.contains('3'), "message: {msg}");
    }

    #[test]
    fn malformed_message_mentions_token_and_line() {
        let msg = ReadError::MalformedToken {
            token: "abc".to_owned(),
            line: 12,
            expected: Slot::Parent,
        }
        .to_string();
        assert!(msg.contains("\"abc\""), "message: {msg}");
        assert!(msg.contains("line 12"), "message: {msg}");
        assert!(msg.contains("parent"), "message: {msg}");
    }
}
