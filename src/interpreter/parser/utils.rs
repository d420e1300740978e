use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::core::ParseResult,
    },
};

/// Builds an `UnexpectedToken` error for the token actually found.
///
/// A missing token is reported as the end of input.
pub(in crate::interpreter::parser) fn unexpected(expected: impl Into<String>,
                                                 found: Option<&(Token, Position)>)
                                                 -> ParseError {
    let (found, position) = found.map_or_else(|| (Token::Eof.to_string(), Position::default()),
                                              |(token, position)| (token.to_string(), *position));
    ParseError::UnexpectedToken { expected: expected.into(),
                                  found,
                                  position }
}

/// Consumes any number of newline tokens.
pub(in crate::interpreter::parser) fn skip_newlines<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Position)>
{
    while tokens.next_if(|(token, _)| *token == Token::NewLine).is_some() {}
}

/// Consumes any number of expression separators: newlines and `;`.
pub(in crate::interpreter::parser) fn skip_separators<'a, I>(tokens: &mut Peekable<I>)
    where I: Iterator<Item = &'a (Token, Position)>
{
    while tokens.next_if(|(token, _)| matches!(token, Token::NewLine | Token::Semicolon))
                .is_some()
    {}
}

/// Returns the first token after any separators without consuming anything.
pub(in crate::interpreter::parser) fn peek_past_separators<'a, I>(tokens: &Peekable<I>)
                                                                  -> Option<&'a Token>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut lookahead = tokens.clone();
    skip_separators(&mut lookahead);
    lookahead.next().map(|(token, _)| token)
}

/// Consumes the next token, which must equal `expected`.
///
/// # Returns
/// The position of the consumed token.
///
/// # Errors
/// `UnexpectedToken` naming `expected` and the token found instead.
pub(in crate::interpreter::parser) fn expect<'a, I>(tokens: &mut Peekable<I>,
                                                    expected: &Token)
                                                    -> ParseResult<Position>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((token, position)) if token == expected => Ok(*position),
        other => Err(unexpected(expected.to_string(), other)),
    }
}

/// Parses a comma-separated list of items until a closing token.
///
/// This utility is shared by list literals, argument lists and parameter
/// lists. The opening token must already be consumed. Newlines are allowed
/// around items, and a trailing comma before the closing token is accepted.
/// An immediately encountered closing token produces an empty list.
///
/// Grammar (simplified): `list := (item ("," item)* ","?)?`
///
/// # Parameters
/// - `tokens`: Token iterator positioned after the opening token.
/// - `parse_item`: Function used to parse each list element.
/// - `closing`: The token that terminates the list (e.g., `]` or `)`).
///
/// # Returns
/// A vector of parsed items.
///
/// # Errors
/// Returns a `ParseError` if:
/// - an item fails to parse,
/// - an item is followed by something other than `,` or the closing token,
/// - the stream ends before the closing token.
pub(in crate::interpreter::parser) fn parse_comma_separated<'a, I, T>(
    tokens: &mut Peekable<I>,
    parse_item: impl Fn(&mut Peekable<I>) -> ParseResult<T>,
    closing: &Token)
    -> ParseResult<Vec<T>>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut items = Vec::new();
    loop {
        skip_newlines(tokens);
        if tokens.next_if(|(token, _)| token == closing).is_some() {
            break;
        }
        items.push(parse_item(tokens)?);
        skip_newlines(tokens);
        match tokens.next() {
            Some((Token::Comma, _)) => {},
            Some((token, _)) if token == closing => break,
            other => return Err(unexpected(format!("`,` or {closing}"), other)),
        }
    }
    Ok(items)
}

/// Parses a plain identifier and returns its name.
///
/// # Errors
/// `UnexpectedToken` if the next token is not an identifier.
pub(in crate::interpreter::parser) fn parse_identifier<'a, I>(tokens: &mut Peekable<I>)
                                                              -> ParseResult<String>
    where I: Iterator<Item = &'a (Token, Position)>
{
    match tokens.next() {
        Some((Token::Identifier(name), _)) => Ok(name.clone()),
        other => Err(unexpected("a parameter name", other)),
    }
}
