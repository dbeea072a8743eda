use std::rc::Rc;

use crate::error::SyntaxError;
use crate::source::Source;
use crate::token::{Token, TokenArena, TokenId, TokenKind};

/// A stateful cursor over the token stream produced from a [`Source`].
///
/// Tokenization itself happens eagerly at construction (see
/// [`TokenArena`]'s doc comment for why that is observationally identical
/// to lazy tokenization); `advance`/`lookahead` are what give callers the
/// pull-based, one-token-at-a-time contract the GraphQL language spec
/// describes. Only one call may be in flight on a given `Lexer` at a time;
/// concurrent use of the same lexer is undefined, per the single-threaded
/// concurrency model this crate targets.
#[derive(Debug)]
pub struct Lexer {
    source: Rc<Source>,
    arena: TokenArena,
    /// The most recently returned non-ignored token (initially `Sof`).
    cursor: TokenId,
}

impl Lexer {
    pub fn new(source: Rc<Source>) -> Result<Self, SyntaxError> {
        let arena = tokenize(&source)?;
        Ok(Lexer {
            source,
            arena,
            cursor: 0,
        })
    }

    pub fn source(&self) -> &Rc<Source> {
        &self.source
    }

    pub fn arena(&self) -> &TokenArena {
        &self.arena
    }

    /// The current token (the last one returned by `advance`, or `Sof`
    /// before the first call).
    pub fn token(&self) -> &Token {
        self.arena.get(self.cursor)
    }

    pub fn token_id(&self) -> TokenId {
        self.cursor
    }

    /// Advances past comments to the next non-ignored token and returns it.
    /// Once `Eof` has been reached, every subsequent call returns that same
    /// token.
    pub fn advance(&mut self) -> &Token {
        let mut next = self.arena.get(self.cursor).next;
        while let Some(id) = next {
            let tok = self.arena.get(id);
            if tok.kind.is_ignored_by_parser() {
                next = tok.next;
                continue;
            }
            self.cursor = id;
            return self.arena.get(self.cursor);
        }
        // Already at EOF (or no further tokens): stay put.
        self.arena.get(self.cursor)
    }

    /// Peeks the next non-ignored token after the current one without
    /// mutating the cursor. Used by the parser to decide whether a leading
    /// string/block-string literal is a description (type-system
    /// definition follows) or a value (executable definition follows).
    pub fn lookahead(&self) -> &Token {
        let mut next = self.arena.get(self.cursor).next;
        while let Some(id) = next {
            let tok = self.arena.get(id);
            if tok.kind.is_ignored_by_parser() {
                next = tok.next;
                continue;
            }
            return tok;
        }
        self.arena.get(self.cursor)
    }
}

struct Scanner<'a> {
    source: &'a Rc<Source>,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
    line_start: usize,
}

impl<'a> Scanner<'a> {
    fn new(source: &'a Rc<Source>) -> Self {
        Scanner {
            source,
            bytes: source.body().as_bytes(),
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Column (1-based, counting Unicode scalar values) of `self.pos`.
    fn column(&self) -> usize {
        // Count lead bytes (non-continuation bytes) between line_start and
        // pos; continuation bytes (0x80..=0xBF) don't start a new scalar.
        self.bytes[self.line_start..self.pos]
            .iter()
            .filter(|b| (**b & 0b1100_0000) != 0b1000_0000)
            .count()
            + 1
    }

    fn err(&self, message: impl Into<std::string::String>) -> SyntaxError {
        SyntaxError::new(Rc::clone(self.source), self.pos, message)
    }

    /// Skips whitespace/comma/BOM, and accumulates any comments encountered
    /// into the arena (linked into the chain, but not returned to callers
    /// of `advance`). Returns once it reaches the start of a real token.
    fn skip_ignored(&mut self, arena: &mut TokenArena, prev: &mut TokenId) {
        loop {
            match self.peek() {
                Some(0xEF) if self.peek_at(1) == Some(0xBB) && self.peek_at(2) == Some(0xBF) => {
                    self.pos += 3;
                }
                Some(b' ') | Some(b'\t') | Some(b',') => {
                    self.pos += 1;
                }
                Some(b'\n') => {
                    self.pos += 1;
                    self.line += 1;
                    self.line_start = self.pos;
                }
                Some(b'\r') => {
                    self.pos += 1;
                    if self.peek() == Some(b'\n') {
                        self.pos += 1;
                    }
                    self.line += 1;
                    self.line_start = self.pos;
                }
                Some(b'#') => {
                    let start = self.pos;
                    let line = self.line;
                    let column = self.column();
                    self.pos += 1;
                    let content_start = self.pos;
                    while let Some(b) = self.peek() {
                        if b == b'\n' || b == b'\r' {
                            break;
                        }
                        self.pos += 1;
                    }
                    let value = self.source.slice(content_start, self.pos).to_string();
                    let id = arena.push(Token {
                        kind: TokenKind::Comment,
                        start,
                        end: self.pos,
                        line,
                        column,
                        value: Some(value),
                        prev: Some(*prev),
                        next: None,
                    });
                    arena_link(arena, *prev, id);
                    *prev = id;
                }
                _ => break,
            }
        }
    }
}

/// Wires up `arena[prev].next = Some(next)` once `next` has been pushed.
/// `prev.next == self` is the chain invariant every token but `Sof` depends
/// on; this is the only place it gets established.
fn arena_link(arena: &mut TokenArena, prev: TokenId, next: TokenId) {
    arena.get_mut(prev).next = Some(next);
}

fn tokenize(source: &Rc<Source>) -> Result<TokenArena, SyntaxError> {
    let mut arena = TokenArena::new();
    let sof = arena.push(Token {
        kind: TokenKind::Sof,
        start: 0,
        end: 0,
        line: 1,
        column: 1,
        value: None,
        prev: None,
        next: None,
    });
    let mut prev = sof;
    let mut scanner = Scanner::new(source);

    loop {
        scanner.skip_ignored(&mut arena, &mut prev);

        let start = scanner.pos;
        let line = scanner.line;
        let column = scanner.column();

        let Some(b) = scanner.peek() else {
            let id = arena.push(Token {
                kind: TokenKind::Eof,
                start,
                end: start,
                line,
                column,
                value: None,
                prev: Some(prev),
                next: None,
            });
            arena_link(&mut arena, prev, id);
            break;
        };

        let (kind, end, value) = lex_one(&mut scanner, b)?;
        let id = arena.push(Token {
            kind,
            start,
            end,
            line,
            column,
            value,
            prev: Some(prev),
            next: None,
        });
        arena_link(&mut arena, prev, id);
        prev = id;
    }

    Ok(arena)
}

type LexOne = (TokenKind, usize, Option<std::string::String>);

fn lex_one(s: &mut Scanner, b: u8) -> Result<LexOne, SyntaxError> {
    macro_rules! punct {
        ($kind:expr) => {{
            s.pos += 1;
            Ok(($kind, s.pos, None))
        }};
    }

    match b {
        b'!' => punct!(TokenKind::Bang),
        b'$' => punct!(TokenKind::Dollar),
        b'(' => punct!(TokenKind::ParenOpen),
        b')' => punct!(TokenKind::ParenClose),
        b':' => punct!(TokenKind::Colon),
        b'=' => punct!(TokenKind::Equals),
        b'@' => punct!(TokenKind::At),
        b'[' => punct!(TokenKind::BracketOpen),
        b']' => punct!(TokenKind::BracketClose),
        b'{' => punct!(TokenKind::BraceOpen),
        b'|' => punct!(TokenKind::Pipe),
        b'}' => punct!(TokenKind::BraceClose),
        b'&' => punct!(TokenKind::Ampersand),
        b'.' => {
            if s.peek_at(1) == Some(b'.') && s.peek_at(2) == Some(b'.') {
                s.pos += 3;
                Ok((TokenKind::Spread, s.pos, None))
            } else {
                Err(s.err("Unexpected character: \".\". Did you mean \"...\"?"))
            }
        }
        b'_' | b'A'..=b'Z' | b'a'..=b'z' => lex_name(s),
        b'-' | b'0'..=b'9' => lex_number(s),
        b'"' => lex_string(s),
        _ => Err(s.err(format!("Unexpected character: {:?}.", b as char))),
    }
}

fn lex_name(s: &mut Scanner) -> Result<LexOne, SyntaxError> {
    let start = s.pos;
    s.pos += 1;
    while matches!(s.peek(), Some(b'_') | Some(b'A'..=b'Z') | Some(b'a'..=b'z') | Some(b'0'..=b'9'))
    {
        s.pos += 1;
    }
    let value = s.source.slice(start, s.pos).to_string();
    Ok((TokenKind::Name, s.pos, Some(value)))
}

fn lex_number(s: &mut Scanner) -> Result<LexOne, SyntaxError> {
    let start = s.pos;
    let mut is_float = false;

    if s.peek() == Some(b'-') {
        s.pos += 1;
    }

    match s.peek() {
        Some(b'0') => {
            s.pos += 1;
            if matches!(s.peek(), Some(b'0'..=b'9')) {
                let digit = s.peek().unwrap() as char;
                return Err(s.err(format!(
                    "Invalid number, unexpected digit after 0: {:?}.",
                    digit.to_string()
                )));
            }
        }
        Some(b'1'..=b'9') => {
            s.pos += 1;
            while matches!(s.peek(), Some(b'0'..=b'9')) {
                s.pos += 1;
            }
        }
        other => {
            let desc = other
                .map(|b| format!("{:?}", b as char))
                .unwrap_or_else(|| "<EOF>".to_string());
            return Err(s.err(format!("Invalid number, expected digit but got: {desc}.")));
        }
    }

    if s.peek() == Some(b'.') {
        is_float = true;
        s.pos += 1;
        if !matches!(s.peek(), Some(b'0'..=b'9')) {
            return Err(s.err(
                "Invalid number, expected digit but got: <EOF>.".to_string(),
            ));
        }
        while matches!(s.peek(), Some(b'0'..=b'9')) {
            s.pos += 1;
        }
    }

    if matches!(s.peek(), Some(b'e') | Some(b'E')) {
        is_float = true;
        s.pos += 1;
        if matches!(s.peek(), Some(b'+') | Some(b'-')) {
            s.pos += 1;
        }
        if !matches!(s.peek(), Some(b'0'..=b'9')) {
            return Err(s.err(
                "Invalid number, expected digit but got: <EOF>.".to_string(),
            ));
        }
        while matches!(s.peek(), Some(b'0'..=b'9')) {
            s.pos += 1;
        }
    }

    let kind = if is_float {
        TokenKind::Float
    } else {
        TokenKind::Int
    };
    let value = s.source.slice(start, s.pos).to_string();
    Ok((kind, s.pos, Some(value)))
}

fn lex_string(s: &mut Scanner) -> Result<LexOne, SyntaxError> {
    if s.peek_at(1) == Some(b'"') && s.peek_at(2) == Some(b'"') {
        lex_block_string(s)
    } else {
        lex_regular_string(s)
    }
}

fn lex_regular_string(s: &mut Scanner) -> Result<LexOne, SyntaxError> {
    s.pos += 1; // opening quote
    let mut value = std::string::String::new();
    loop {
        match s.peek() {
            None => return Err(s.err("Unterminated string.")),
            Some(b'"') => {
                s.pos += 1;
                break;
            }
            Some(b'\n') | Some(b'\r') => {
                return Err(s.err("Unterminated string."));
            }
            Some(b) if b < 0x20 && b != 0x09 => {
                return Err(s.err(format!(
                    "Invalid character within String: {:?}.",
                    (b as char).to_string()
                )));
            }
            Some(b'\\') => {
                s.pos += 1;
                match s.peek() {
                    Some(b'"') => {
                        value.push('"');
                        s.pos += 1;
                    }
                    Some(b'\\') => {
                        value.push('\\');
                        s.pos += 1;
                    }
                    Some(b'/') => {
                        value.push('/');
                        s.pos += 1;
                    }
                    Some(b'b') => {
                        value.push('\u{0008}');
                        s.pos += 1;
                    }
                    Some(b'f') => {
                        value.push('\u{000C}');
                        s.pos += 1;
                    }
                    Some(b'n') => {
                        value.push('\n');
                        s.pos += 1;
                    }
                    Some(b'r') => {
                        value.push('\r');
                        s.pos += 1;
                    }
                    Some(b't') => {
                        value.push('\t');
                        s.pos += 1;
                    }
                    Some(b'u') => {
                        s.pos += 1;
                        let cp = lex_unicode_escape(s)?;
                        value.push(cp);
                    }
                    Some(other) => {
                        return Err(s.err(format!(
                            "Invalid character escape sequence: \"\\{}\".",
                            other as char
                        )));
                    }
                    None => return Err(s.err("Unterminated string.")),
                }
            }
            Some(_) => {
                let rest = s.source.slice(s.pos, s.bytes.len());
                let ch = rest.chars().next().unwrap();
                value.push(ch);
                s.pos += ch.len_utf8();
            }
        }
    }
    Ok((TokenKind::String, s.pos, Some(value)))
}

fn lex_unicode_escape(s: &mut Scanner) -> Result<char, SyntaxError> {
    let mut hex = std::string::String::with_capacity(4);
    for _ in 0..4 {
        match s.peek() {
            Some(b) if (b as char).is_ascii_hexdigit() => {
                hex.push(b as char);
                s.pos += 1;
            }
            _ => return Err(s.err("Invalid unicode escape sequence.")),
        }
    }
    let code_point = u32::from_str_radix(&hex, 16)
        .map_err(|_| s.err("Invalid unicode escape sequence."))?;
    char::from_u32(code_point).ok_or_else(|| s.err("Invalid unicode escape sequence."))
}

fn lex_block_string(s: &mut Scanner) -> Result<LexOne, SyntaxError> {
    s.pos += 3; // opening """
    if matches!(s.peek(), Some(b'\n')) {
        s.pos += 1;
        s.line += 1;
        s.line_start = s.pos;
    } else if matches!(s.peek(), Some(b'\r')) {
        s.pos += 1;
        if s.peek() == Some(b'\n') {
            s.pos += 1;
        }
        s.line += 1;
        s.line_start = s.pos;
    }

    let raw_start = s.pos;
    loop {
        match s.peek() {
            None => return Err(s.err("Unterminated string.")),
            Some(b'"') if s.peek_at(1) == Some(b'"') && s.peek_at(2) == Some(b'"') => {
                if s.peek_at(3) != Some(b'"') {
                    break;
                }
                // `\"""`-escaped triple quote: consume all four and keep
                // scanning the block string body.
                s.pos += 1;
            }
            Some(b'\\')
                if s.peek_at(1) == Some(b'"')
                    && s.peek_at(2) == Some(b'"')
                    && s.peek_at(3) == Some(b'"') =>
            {
                s.pos += 4;
            }
            Some(b'\n') => {
                s.pos += 1;
                s.line += 1;
                s.line_start = s.pos;
            }
            Some(b'\r') => {
                s.pos += 1;
                if s.peek() == Some(b'\n') {
                    s.pos += 1;
                }
                s.line += 1;
                s.line_start = s.pos;
            }
            Some(_) => s.pos += 1,
        }
    }
    let raw = s.source.slice(raw_start, s.pos).replace("\\\"\"\"", "\"\"\"");
    s.pos += 3; // closing """

    let value = block_string_value(&raw);
    Ok((TokenKind::BlockString, s.pos, Some(value)))
}

/// The common-indent-stripping normalization algorithm for block string
/// literals, shared between the lexer and the printer's
/// is-this-representable-as-a-block-string heuristic.
///
/// Split on line terminators, compute the common leading indent of every
/// line but the first (ignoring whitespace-only lines in that
/// computation), strip that indent from every line but the first, drop
/// leading/trailing whitespace-only lines, rejoin with `\n`.
pub fn block_string_value(raw: &str) -> std::string::String {
    // `\r\n` is a single line terminator, same as the lexer's own line
    // counting above; normalize before splitting so CRLF input doesn't
    // produce a spurious empty line per line ending.
    let normalized = raw.replace("\r\n", "\n").replace('\r', "\n");
    let lines: Vec<&str> = normalized.split('\n').collect();

    let common_indent = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start_matches([' ', '\t']).len())
        .min()
        .unwrap_or(0);

    let mut out_lines: Vec<std::string::String> = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        if i == 0 {
            out_lines.push((*line).to_string());
        } else {
            let stripped = line.char_indices().nth(common_indent).map(|(b, _)| &line[b..]);
            out_lines.push(stripped.unwrap_or("").to_string());
        }
    }

    while out_lines.first().is_some_and(|l| l.trim().is_empty()) {
        out_lines.remove(0);
    }
    while out_lines.last().is_some_and(|l| l.trim().is_empty()) {
        out_lines.pop();
    }

    out_lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(src: &str) -> (Rc<Source>, Vec<Token>) {
        let source = Rc::new(Source::new(src, "test"));
        let lexer = Lexer::new(source.clone()).expect("lex ok");
        let mut toks = vec![lexer.arena().get(0).clone()];
        let mut id = 0;
        while let Some(next) = lexer.arena().get(id).next {
            toks.push(lexer.arena().get(next).clone());
            id = next;
        }
        (source, toks)
    }

    #[test]
    fn sof_and_eof_bookend_every_stream() {
        let (_src, toks) = lex_all("{ hello }");
        assert_eq!(toks.first().unwrap().kind, TokenKind::Sof);
        assert_eq!(toks.last().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn prev_next_form_a_consistent_chain() {
        let (_src, toks) = lex_all("{ a b }");
        for (i, tok) in toks.iter().enumerate() {
            if i > 0 {
                assert_eq!(tok.prev, Some(i - 1));
            }
        }
    }

    #[test]
    fn advance_past_eof_is_idempotent() {
        let source = Rc::new(Source::new("{}", "test"));
        let mut lexer = Lexer::new(source).unwrap();
        lexer.advance();
        lexer.advance();
        let eof1 = lexer.advance().clone();
        let eof2 = lexer.advance().clone();
        assert_eq!(eof1.kind, TokenKind::Eof);
        assert_eq!(eof1, eof2);
    }

    #[test]
    fn comments_are_linked_but_not_advanced_onto() {
        let source = Rc::new(Source::new("# hi\n{ a }", "test"));
        let mut lexer = Lexer::new(source).unwrap();
        let first = lexer.advance();
        assert_eq!(first.kind, TokenKind::BraceOpen);
    }

    #[test]
    fn spread_is_a_single_token() {
        let (_src, toks) = lex_all("...");
        assert_eq!(toks.len(), 3); // SOF, Spread, EOF
        assert_eq!(toks[1].kind, TokenKind::Spread);
        assert_eq!(toks[1].start, 0);
        assert_eq!(toks[1].end, 3);
    }

    #[test]
    fn leading_zero_is_an_error() {
        let source = Rc::new(Source::new("01", "test"));
        let err = Lexer::new(source).unwrap_err();
        assert_eq!(err.position, 1);
        assert!(err.message.contains("unexpected digit after 0"));
        assert!(err.message.contains("\"1\""));
    }

    #[test]
    fn block_string_strips_common_indent() {
        let (_src, toks) = lex_all("\"\"\"\n  hello\n  world\n\"\"\"");
        assert_eq!(toks[1].kind, TokenKind::BlockString);
        assert_eq!(toks[1].value.as_deref(), Some("hello\nworld"));
    }

    #[test]
    fn line_counting_handles_crlf() {
        let (_src, toks) = lex_all("a\r\nb");
        // SOF, Name(a), Name(b), EOF
        assert_eq!(toks[2].line, 2);
        assert_eq!(toks[2].column, 1);
    }

    #[test]
    fn block_string_treats_crlf_as_one_terminator() {
        let (_src, toks) = lex_all("\"\"\"\r\n  a\r\n  b\r\n\"\"\"");
        assert_eq!(toks[1].kind, TokenKind::BlockString);
        assert_eq!(toks[1].value.as_deref(), Some("a\nb"));
    }
}
