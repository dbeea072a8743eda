use std::fmt;

/// Immutable carrier of GraphQL source text plus a human-readable name
/// (e.g. a file path, or `"GraphQL request"` for an inline string).
///
/// `Source` never allocates beyond the string handed to it at construction;
/// every downstream component (tokens, AST locations) borrows byte ranges
/// out of it rather than copying substrings, except where the lexer must
/// decode an escape sequence into an owned `String`.
#[derive(Clone, Debug)]
pub struct Source {
    body: String,
    name: String,
}

impl Source {
    pub fn new(body: impl Into<String>, name: impl Into<String>) -> Self {
        Source {
            body: body.into(),
            name: name.into(),
        }
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len_bytes(&self) -> usize {
        self.body.len()
    }

    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.body.as_bytes().get(offset).copied()
    }

    /// Returns the substring `[start, end)`. Panics if the range does not
    /// land on UTF-8 character boundaries; callers only ever slice on token
    /// boundaries, which the lexer guarantees are char boundaries.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.body[start..end]
    }

    /// Returns the 1-indexed `(line, column)` of a byte offset, derived by a
    /// linear scan counting LF/CR/CRLF terminators up to `position`.
    ///
    /// This is the non-stubbed version of the `getLocation` helper called
    /// out in the design notes: some reference implementations leave it
    /// hard-coded to `(1, 1)`. Ours always scans.
    pub fn get_location(&self, position: usize) -> (usize, usize) {
        let mut line = 1usize;
        let mut line_start = 0usize;
        let bytes = self.body.as_bytes();
        let end = position.min(bytes.len());

        let mut i = 0usize;
        while i < end {
            match bytes[i] {
                b'\n' => {
                    line += 1;
                    i += 1;
                    line_start = i;
                }
                b'\r' => {
                    line += 1;
                    i += 1;
                    if i < end && bytes.get(i) == Some(&b'\n') {
                        i += 1;
                    }
                    line_start = i;
                }
                _ => i += 1,
            }
        }

        let column = self.body[line_start..position.min(bytes.len())]
            .chars()
            .count()
            + 1;
        (line, column)
    }
}

impl PartialEq for Source {
    fn eq(&self, other: &Self) -> bool {
        self.body == other.body && self.name == other.name
    }
}
impl Eq for Source {}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_location_counts_lf() {
        let source = Source::new("a\nbb\nccc", "test");
        assert_eq!(source.get_location(0), (1, 1));
        assert_eq!(source.get_location(2), (2, 1));
        assert_eq!(source.get_location(5), (3, 1));
        assert_eq!(source.get_location(7), (3, 3));
    }

    #[test]
    fn get_location_counts_crlf_as_one_line() {
        let source = Source::new("a\r\nb", "test");
        assert_eq!(source.get_location(3), (2, 1));
    }

    #[test]
    fn equality_is_by_body_and_name() {
        let a = Source::new("{ x }", "a.graphql");
        let b = Source::new("{ x }", "a.graphql");
        let c = Source::new("{ x }", "b.graphql");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
