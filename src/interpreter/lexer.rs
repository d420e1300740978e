use std::{fmt, iter::FusedIterator};

use logos::{FilterResult, Logos};

use crate::error::{LexError, LexErrorKind};

/// Represents a lexical token in the source input.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras, error = LexErrorKind)]
#[logos(skip r"[ \t\r\f]+")]
pub enum Token {
    /// Numeric literals such as `12`, `12.`, `3.25`, `.5`, `1e3`, or the
    /// integer forms `0x1F`, `0o17`, `0q13` and `0b101`.
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_decimal)]
    #[regex(r"0[xX][0-9a-fA-F]+", |lex| parse_radix(lex, 16))]
    #[regex(r"0[oO][0-7]+", |lex| parse_radix(lex, 8))]
    #[regex(r"0[qQ][0-3]+", |lex| parse_radix(lex, 4))]
    #[regex(r"0[bB][01]+", |lex| parse_radix(lex, 2))]
    Number(f64),
    /// Double quoted string literal, with escapes already resolved.
    #[token("\"", lex_string)]
    Str(String),
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// `if`
    #[token("if")]
    If,
    /// `elif`
    #[token("elif")]
    Elif,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `function`
    #[token("function")]
    Function,
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// Identifier tokens; variable names such as `x` or `fibonacci`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// ```text
    /// \* Block comments. *\
    /// ```
    #[token("\\*", skip_block_comment)]
    BlockComment,
    /// `#`, the length operator. A `#` that is not directly followed by an
    /// operand starts a line comment instead.
    #[token("#", length_or_comment)]
    Hash,
    /// `:=`
    #[token(":=")]
    ColonEquals,
    /// `=:`
    #[token("=:")]
    EqualsColon,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<<`
    #[token("<<")]
    ShiftLeft,
    /// `>>`
    #[token(">>")]
    ShiftRight,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `**`
    #[token("**")]
    StarStar,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    SlashSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `...`
    #[token("...")]
    Ellipsis,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// Line break. Separates expressions like `;` does.
    #[token("\n")]
    NewLine,
    /// End of input. Emitted exactly once by [`Lexer`], never matched.
    Eof,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Number(n) => return write!(f, "number `{n}`"),
            Self::Str(s) => return write!(f, "string {s:?}"),
            Self::Identifier(name) => return write!(f, "identifier `{name}`"),
            Self::NewLine => return write!(f, "newline"),
            Self::Eof => return write!(f, "end of input"),
            Self::BlockComment => "\\*",
            Self::True => "true",
            Self::False => "false",
            Self::Null => "null",
            Self::If => "if",
            Self::Elif => "elif",
            Self::Else => "else",
            Self::While => "while",
            Self::Function => "function",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Hash => "#",
            Self::ColonEquals => ":=",
            Self::EqualsColon => "=:",
            Self::EqualEqual => "==",
            Self::BangEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::ShiftLeft => "<<",
            Self::ShiftRight => ">>",
            Self::Less => "<",
            Self::Greater => ">",
            Self::StarStar => "**",
            Self::Star => "*",
            Self::SlashSlash => "//",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Ellipsis => "...",
            Self::LParen => "(",
            Self::RParen => ")",
            Self::LBracket => "[",
            Self::RBracket => "]",
            Self::LBrace => "{",
            Self::RBrace => "}",
            Self::Comma => ",",
            Self::Semicolon => ";",
        };
        write!(f, "`{symbol}`")
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line and the byte offset at which it starts, so that
/// every token can be given a line and column for diagnostics.
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line:       usize,
    /// Byte offset of the first character of the current line.
    pub line_start: usize,
}

impl Default for LexerExtras {
    fn default() -> Self {
        Self { line:       1,
               line_start: 0, }
    }
}

/// A location in the source text. Lines and columns start at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Line number.
    pub line:   usize,
    /// Column number, counted in characters.
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column.
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Lazy token stream over a source string.
///
/// Yields `(Token, Position)` pairs and finishes with exactly one
/// [`Token::Eof`]. After the first lexical error nothing more is produced.
///
/// # Example
/// ```
/// use itchy::interpreter::lexer::{Lexer, Token};
///
/// let tokens: Vec<Token> = Lexer::new("x := 1")
///     .map(|item| item.map(|(token, _)| token))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(tokens,
///            vec![Token::Identifier("x".into()), Token::ColonEquals, Token::Number(1.0), Token::Eof]);
/// ```
pub struct Lexer<'src> {
    inner:    logos::Lexer<'src, Token>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer positioned at the start of `source`.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self { inner:    Token::lexer_with_extras(source, LexerExtras::default()),
               finished: false, }
    }

    /// Converts a byte offset on the current line into a [`Position`].
    fn position_at(&self, offset: usize) -> Position {
        let extras = &self.inner.extras;
        let column = self.inner
                         .source()
                         .get(extras.line_start..offset)
                         .map_or(0, |prefix| prefix.chars().count());
        Position::new(extras.line, column + 1)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<(Token, Position), LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let Some(result) = self.inner.next() else {
            self.finished = true;
            let end = self.inner.source().len();
            return Some(Ok((Token::Eof, self.position_at(end))));
        };

        let span = self.inner.span();
        let position = self.position_at(span.start);
        match result {
            Ok(token) => {
                if token == Token::NewLine {
                    self.inner.extras.line += 1;
                    self.inner.extras.line_start = span.end;
                }
                Some(Ok((token, position)))
            },
            Err(kind) => {
                self.finished = true;
                Some(Err(LexError { kind,
                                    slice: self.inner.slice().to_string(),
                                    position }))
            },
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes a complete source string.
///
/// # Errors
/// Returns the first [`LexError`] encountered.
pub fn tokenize(source: &str) -> Result<Vec<(Token, Position)>, LexError> {
    Lexer::new(source).collect()
}

/// Parses a decimal literal from the current token slice.
///
/// A literal directly followed by another `.digits` part, as in `12.5.3` or
/// `1..5`, is rejected as a whole instead of being split into two numbers.
///
/// # Parameters
/// - `lex`: Reference to the Logos lexer at the current token.
///
/// # Returns
/// - `Ok(f64)`: The parsed value.
/// - `Err(MalformedNumber)`: If another fractional part follows, or the slice
///   is not a valid float, which the token patterns rule out.
fn parse_decimal(lex: &mut logos::Lexer<Token>) -> Result<f64, LexErrorKind> {
    let remainder = lex.remainder();
    let mut rest = remainder.chars();
    if rest.next() == Some('.') && rest.next().is_some_and(|c| c.is_ascii_digit()) {
        let tail = remainder.find(|c: char| !(c.is_ascii_digit() || c == '.'))
                            .unwrap_or(remainder.len());
        lex.bump(tail);
        return Err(LexErrorKind::MalformedNumber);
    }
    lex.slice().parse().map_err(|_| LexErrorKind::MalformedNumber)
}

/// Parses a prefixed integer literal (`0x`, `0o`, `0q`, `0b`) in the given
/// radix. Digits are accumulated in floating point, so very long literals lose
/// precision instead of overflowing.
fn parse_radix(lex: &logos::Lexer<Token>, radix: u32) -> Option<f64> {
    lex.slice()
       .get(2..)?
       .chars()
       .try_fold(0.0, |acc, c| c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d)))
}

/// Reads a string literal whose opening quote has just been matched.
///
/// Recognized escapes are `\"`, `\\`, `\n`, `\t` and `\r`; any other escaped
/// character is kept together with its backslash.
///
/// # Errors
/// `UnterminatedString` if a newline or the end of input comes before the
/// closing quote.
fn lex_string(lex: &mut logos::Lexer<Token>) -> Result<String, LexErrorKind> {
    let mut value = String::new();
    let mut chars = lex.remainder().char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '"' => {
                lex.bump(offset + 1);
                return Ok(value);
            },
            '\n' => break,
            '\\' => match chars.next() {
                Some((_, '"')) => value.push('"'),
                Some((_, '\\')) => value.push('\\'),
                Some((_, 'n')) => value.push('\n'),
                Some((_, 't')) => value.push('\t'),
                Some((_, 'r')) => value.push('\r'),
                Some((_, '\n')) | None => break,
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                },
            },
            other => value.push(other),
        }
    }

    Err(LexErrorKind::UnterminatedString)
}

/// Skips a `\* ... *\` comment whose opening delimiter has just been matched,
/// keeping the line counters in sync with any newlines inside it.
fn skip_block_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    let body_start = lex.span().end;
    let remainder = lex.remainder();
    let Some(length) = remainder.find("*\\") else {
        return FilterResult::Error(LexErrorKind::UnterminatedComment);
    };

    for (offset, _) in remainder[..length].match_indices('\n') {
        lex.extras.line += 1;
        lex.extras.line_start = body_start + offset + 1;
    }
    lex.bump(length + 2);
    FilterResult::Skip
}

/// Decides whether a `#` is the length operator or the start of a line
/// comment.
///
/// The operator form requires an operand to follow immediately: a letter,
/// digit, `_`, `(`, `[`, `"` or `.`. Anything else, including whitespace,
/// turns the rest of the line into a comment.
fn length_or_comment(lex: &mut logos::Lexer<Token>) -> FilterResult<(), LexErrorKind> {
    let remainder = lex.remainder();
    match remainder.chars().next() {
        Some(c) if c.is_ascii_alphanumeric() || matches!(c, '_' | '(' | '[' | '"' | '.') => {
            FilterResult::Emit(())
        },
        _ => {
            lex.bump(remainder.find('\n').unwrap_or(remainder.len()));
            FilterResult::Skip
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source).unwrap()
                        .into_iter()
                        .map(|(token, _)| token)
                        .collect()
    }

    #[test]
    fn numbers_in_all_forms() {
        assert_eq!(kinds("12 12. 12.5 .5 1e3 2.5E-2 0x1F 0o17 0q13 0b101"),
                   vec![Token::Number(12.0),
                        Token::Number(12.0),
                        Token::Number(12.5),
                        Token::Number(0.5),
                        Token::Number(1000.0),
                        Token::Number(0.025),
                        Token::Number(31.0),
                        Token::Number(15.0),
                        Token::Number(7.0),
                        Token::Number(5.0),
                        Token::Eof]);
    }

    #[test]
    fn keywords_are_not_identifiers() {
        assert_eq!(kinds("if elif else while function iffy"),
                   vec![Token::If,
                        Token::Elif,
                        Token::Else,
                        Token::While,
                        Token::Function,
                        Token::Identifier("iffy".into()),
                        Token::Eof]);
    }

    #[test]
    fn multi_character_operators() {
        assert_eq!(kinds("1 << 2 >> 3 < <= <<< >>"),
                   vec![Token::Number(1.0),
                        Token::ShiftLeft,
                        Token::Number(2.0),
                        Token::ShiftRight,
                        Token::Number(3.0),
                        Token::Less,
                        Token::LessEqual,
                        Token::ShiftLeft,
                        Token::Less,
                        Token::ShiftRight,
                        Token::Eof]);
        assert_eq!(kinds("a := b =: c == d != e <= f >= g ** h // i ...j"),
                   vec![Token::Identifier("a".into()),
                        Token::ColonEquals,
                        Token::Identifier("b".into()),
                        Token::EqualsColon,
                        Token::Identifier("c".into()),
                        Token::EqualEqual,
                        Token::Identifier("d".into()),
                        Token::BangEqual,
                        Token::Identifier("e".into()),
                        Token::LessEqual,
                        Token::Identifier("f".into()),
                        Token::GreaterEqual,
                        Token::Identifier("g".into()),
                        Token::StarStar,
                        Token::Identifier("h".into()),
                        Token::SlashSlash,
                        Token::Identifier("i".into()),
                        Token::Ellipsis,
                        Token::Identifier("j".into()),
                        Token::Eof]);
    }

    #[test]
    fn string_escapes() {
        assert_eq!(kinds(r#""a\"b\\c\nd\q""#),
                   vec![Token::Str("a\"b\\c\nd\\q".into()), Token::Eof]);
    }

    #[test]
    fn hash_is_length_or_comment() {
        assert_eq!(kinds("#xs # a comment\n#[1]"),
                   vec![Token::Hash,
                        Token::Identifier("xs".into()),
                        Token::NewLine,
                        Token::Hash,
                        Token::LBracket,
                        Token::Number(1.0),
                        Token::RBracket,
                        Token::Eof]);
    }

    #[test]
    fn block_comments_track_lines() {
        let tokens = tokenize("a \\* one\ntwo *\\ b\nc").unwrap();
        let positions: Vec<Position> = tokens.iter().map(|(_, position)| *position).collect();
        assert_eq!(positions,
                   vec![Position::new(1, 1),
                        Position::new(2, 8),
                        Position::new(2, 9),
                        Position::new(3, 1),
                        Position::new(3, 2)]);
    }

    #[test]
    fn errors_carry_kind_and_position() {
        let err = tokenize("x := 1\n  @").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::InvalidCharacter);
        assert_eq!(err.position, Position::new(2, 3));

        assert_eq!(tokenize("\\* never closed").unwrap_err().kind,
                   LexErrorKind::UnterminatedComment);
        assert_eq!(tokenize("\"open\nx").unwrap_err().kind,
                   LexErrorKind::UnterminatedString);
    }

    #[test]
    fn numbers_with_two_fractional_parts_are_rejected() {
        let err = tokenize("x := 12.5.3").unwrap_err();
        assert_eq!(err.kind, LexErrorKind::MalformedNumber);
        assert_eq!(err.slice, "12.5.3");
        assert_eq!(err.position, Position::new(1, 6));

        assert_eq!(tokenize("1..5").unwrap_err().kind, LexErrorKind::MalformedNumber);
        assert_eq!(tokenize(".5.5").unwrap_err().kind, LexErrorKind::MalformedNumber);
        assert_eq!(kinds("[1, 2]...xs"),
                   vec![Token::LBracket,
                        Token::Number(1.0),
                        Token::Comma,
                        Token::Number(2.0),
                        Token::RBracket,
                        Token::Ellipsis,
                        Token::Identifier("xs".into()),
                        Token::Eof]);
    }

    #[test]
    fn stream_ends_after_first_error() {
        let mut lexer = Lexer::new("1 @ 2");
        assert!(matches!(lexer.next(), Some(Ok((Token::Number(_), _)))));
        assert!(matches!(lexer.next(), Some(Err(_))));
        assert!(lexer.next().is_none());
    }
}
