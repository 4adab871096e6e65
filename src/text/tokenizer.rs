use log::trace;
use regex::Regex;
use std::fmt;
use unicode_segmentation::UnicodeSegmentation;

/// A lexical item that can be matched at the start of some input
pub trait Token {
    /// Human readable name used in diagnostics
    fn name(&self) -> &'static str;

    /// Returns the byte length of the match if the token matches at the very
    /// start of `input`
    fn match_len(&self, input: &str) -> Option<usize>;

    /// Consuming the token starts a new line
    fn is_newline(&self) -> bool {
        false
    }
}

/// A token described by a name and a case insensitive pattern anchored at
/// the start of the remaining input.
pub struct TokenDefinition {
    name: &'static str,
    pattern: Regex,
    lookahead: Lookahead,
    newline: bool,
}

/// Constraint on the character immediately after a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookahead {
    /// Anything (including the end of input) may follow
    Any,

    /// A character must follow and it must not be the given character
    NotFollowedBy(char),
}

impl TokenDefinition {
    /// Compile a token definition. The pattern is anchored and made case
    /// insensitive.
    pub fn new(name: &'static str, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = Regex::new(&format!("^(?i:{})", pattern))?;
        Ok(TokenDefinition {
            name,
            pattern,
            lookahead: Lookahead::Any,
            newline: false,
        })
    }

    pub fn with_lookahead(mut self, lookahead: Lookahead) -> Self {
        self.lookahead = lookahead;
        self
    }

    /// Mark the token as a line terminator for position tracking
    pub fn newline(mut self) -> Self {
        self.newline = true;
        self
    }
}

impl fmt::Debug for TokenDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TokenDefinition")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

impl Token for TokenDefinition {
    fn name(&self) -> &'static str {
        self.name
    }

    fn match_len(&self, input: &str) -> Option<usize> {
        let end = self.pattern.find(input)?.end();
        match self.lookahead {
            Lookahead::Any => Some(end),
            Lookahead::NotFollowedBy(c) => match input[end..].chars().next() {
                Some(next) if next != c => Some(end),
                _ => None,
            },
        }
    }

    fn is_newline(&self) -> bool {
        self.newline
    }
}

impl<T: Token + ?Sized> Token for &'_ T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn match_len(&self, input: &str) -> Option<usize> {
        (**self).match_len(input)
    }

    fn is_newline(&self) -> bool {
        (**self).is_newline()
    }
}

/// Scans a string one token at a time while keeping track of the line and
/// column of the cursor.
///
/// Columns count user perceived characters (grapheme clusters).
///
/// ```
/// use geowkt::text::{Tokenizer, TokenDefinition};
///
/// let paren = TokenDefinition::new("(", r"\(").unwrap();
/// let mut tokenizer = Tokenizer::new("((");
/// assert_eq!(tokenizer.accept(&paren), Some("("));
/// assert_eq!((tokenizer.line(), tokenizer.column()), (1, 2));
/// assert_eq!(tokenizer.remaining(), "(");
/// ```
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    data: &'a str,
    cursor: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(data: &'a str) -> Self {
        let start = usize::from(!data.is_empty());
        Tokenizer {
            data,
            cursor: 0,
            line: start,
            column: start,
        }
    }

    /// Consume `token` if it matches at the cursor and return the matched
    /// text. The cursor and position are left untouched when it does not
    /// match.
    pub fn accept<T: Token>(&mut self, token: T) -> Option<&'a str> {
        let rest = self.remaining();
        let len = token.match_len(rest)?;
        let matched = &rest[..len];

        if token.is_newline() {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += matched.graphemes(true).count();
        }

        self.cursor += len;
        trace!(
            "accepted {} at line: {} column: {}",
            token.name(),
            self.line,
            self.column
        );
        Some(matched)
    }

    /// Report if `token` matches at the cursor without consuming it
    pub fn expect<T: Token>(&self, token: T) -> bool {
        token.match_len(self.remaining()).is_some()
    }

    /// The unconsumed input
    pub fn remaining(&self) -> &'a str {
        &self.data[self.cursor..]
    }

    /// Byte offset of the cursor into the input
    pub fn offset(&self) -> usize {
        self.cursor
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn paren() -> TokenDefinition {
        TokenDefinition::new("(", r"\(").unwrap()
    }

    fn single_space() -> TokenDefinition {
        TokenDefinition::new("single space", " ")
            .unwrap()
            .with_lookahead(Lookahead::NotFollowedBy(' '))
    }

    #[rstest]
    #[case(" (", true)]
    #[case("  ", false)]
    #[case(" ", false)]
    #[case("", false)]
    #[case(" \n", true)]
    fn single_space_lookahead(#[case] input: &str, #[case] expected: bool) {
        let tokenizer = Tokenizer::new(input);
        assert_eq!(tokenizer.expect(&single_space()), expected);
    }

    #[test]
    fn failed_accept_keeps_cursor() {
        let mut tokenizer = Tokenizer::new("  (");
        assert_eq!(tokenizer.accept(&single_space()), None);
        assert_eq!(tokenizer.offset(), 0);
        assert_eq!((tokenizer.line(), tokenizer.column()), (1, 1));
    }

    #[test]
    fn expect_does_not_advance() {
        let tokenizer = Tokenizer::new("(");
        assert!(tokenizer.expect(&paren()));
        assert_eq!(tokenizer.remaining(), "(");
        assert_eq!(tokenizer.column(), 1);
    }

    #[test]
    fn case_insensitive() {
        let point = TokenDefinition::new("POINT", "point").unwrap();
        let mut tokenizer = Tokenizer::new("PoInT");
        assert_eq!(tokenizer.accept(&point), Some("PoInT"));
        assert_eq!(tokenizer.remaining(), "");
    }

    #[test]
    fn empty_input_starts_at_zero() {
        let tokenizer = Tokenizer::new("");
        assert_eq!((tokenizer.line(), tokenizer.column()), (0, 0));
    }
}
