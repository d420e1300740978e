use std::iter::Peekable;

use crate::{
    ast::Expr,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{skip_separators, unexpected},
        },
    },
};

/// Parses a block whose opening `{` has already been consumed.
///
/// The block contains zero or more expressions separated by optional
/// newlines or semicolons and ends at the matching `}`.
///
/// Grammar: `block := "{" (separator* expression)* separator* "}"`
///
/// # Parameters
/// - `tokens`: Token stream positioned after `{`.
/// - `position`: Position of the `{` token.
///
/// # Returns
/// An `Expr::Block` with the parsed expressions in order.
///
/// # Errors
/// `UnexpectedToken` if the input ends before the closing `}`.
pub fn parse_block<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut body = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            None | Some((Token::Eof, _)) => return Err(unexpected("`}`", tokens.next())),
            Some(_) => body.push(parse_expression(tokens)?),
        }
    }
    Ok(Expr::Block { body, position })
}
