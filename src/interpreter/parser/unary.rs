use std::iter::Peekable;

use crate::{
    ast::{Expr, LiteralValue, UnaryOperator},
    interpreter::{
        lexer::{Position, Token},
        parser::{
            block::parse_block,
            core::{ParseResult, parse_expression, parse_function, parse_if, parse_while},
            utils::{expect, parse_comma_separated, skip_newlines, unexpected},
        },
    },
    util::stack::ensure_sufficient_stack,
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`    (numeric negation)
/// - `+`    (numeric identity)
/// - `not`  (logical not)
/// - `#`    (length)
/// - `...`  (spread; only accepted inside list literals and argument lists,
///   which is checked once the whole program is parsed)
///
/// Unary operators are right-associative, so an input like `not -x` is parsed
/// as `not (-x)`.
///
/// If no unary operator is present, the function delegates to
/// [`parse_primary`] and then applies any postfix operators via
/// [`parse_postfix`].
///
/// Grammar:
/// ```text
///     unary := ("-" | "+" | "not" | "#" | "...") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A unary node or a primary expression possibly followed by postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let Some(&(ref token, position)) = tokens.peek().copied() else {
        return Err(unexpected("an expression", None));
    };

    match token {
        Token::Minus | Token::Plus | Token::Not => {
            tokens.next();
            let operand = Box::new(ensure_sufficient_stack(|| parse_unary(tokens))?);
            let op = match token {
                Token::Minus => UnaryOperator::Negate,
                Token::Plus => UnaryOperator::Plus,
                _ => UnaryOperator::Not,
            };
            Ok(Expr::UnaryOp { op,
                               operand,
                               position })
        },
        Token::Hash => {
            tokens.next();
            let operand = Box::new(ensure_sufficient_stack(|| parse_unary(tokens))?);
            Ok(Expr::Length { operand, position })
        },
        Token::Ellipsis => {
            tokens.next();
            let operand = Box::new(ensure_sufficient_stack(|| parse_unary(tokens))?);
            Ok(Expr::Spread { operand, position })
        },
        _ => {
            let primary = parse_primary(tokens)?;
            parse_postfix(tokens, primary)
        },
    }
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - number, string, boolean and `null` literals
/// - identifiers
/// - parenthesized expressions
/// - list literals (`[ ... ]`)
/// - blocks (`{ ... }`)
/// - `if` expressions
/// - `while` loops
/// - function literals
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "[" elements "]"
///              | block
///              | if_expression
///              | while_expression
///              | function_literal
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let literal = |value: LiteralValue, position: &Position| -> ParseResult<Expr> {
        Ok(Expr::Literal { value,
                           position: *position })
    };

    match tokens.next() {
        Some((Token::Number(n), position)) => literal(LiteralValue::Number(*n), position),
        Some((Token::Str(s), position)) => literal(LiteralValue::from(s.as_str()), position),
        Some((Token::True, position)) => literal(LiteralValue::Bool(true), position),
        Some((Token::False, position)) => literal(LiteralValue::Bool(false), position),
        Some((Token::Null, position)) => literal(LiteralValue::Null, position),
        Some((Token::Identifier(name), position)) => Ok(Expr::Identifier { name:     name.clone(),
                                                                           position: *position, }),
        Some((Token::LParen, _)) => parse_grouping(tokens),
        Some((Token::LBracket, position)) => {
            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
            Ok(Expr::List { elements,
                            position: *position })
        },
        Some((Token::LBrace, position)) => parse_block(tokens, *position),
        Some((Token::If, position)) => parse_if(tokens, *position),
        Some((Token::While, position)) => parse_while(tokens, *position),
        Some((Token::Function, position)) => parse_function(tokens, *position),
        other => Err(unexpected("an expression", other)),
    }
}

/// Parses the inside of a parenthesized expression whose `(` has been
/// consumed. Newlines are allowed inside the parentheses.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    skip_newlines(tokens);
    let inner = parse_expression(tokens)?;
    skip_newlines(tokens);
    expect(tokens, &Token::RParen)?;
    Ok(inner)
}

/// Applies call and index suffixes to an expression.
///
/// Suffixes chain left to right, so `f(1)(2)[0]` calls `f`, calls the result,
/// then indexes that. A suffix must start on the same line as the expression
/// it applies to.
///
/// Grammar:
/// ```text
///     postfix := "(" arguments ")" | "[" expression "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned after the primary expression.
/// - `expr`: The expression the suffixes apply to.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut expr: Expr) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    loop {
        match tokens.peek() {
            Some((Token::LParen, position)) => {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
                expr = Expr::Call { callee: Box::new(expr),
                                    arguments,
                                    position: *position };
            },
            Some((Token::LBracket, position)) => {
                tokens.next();
                skip_newlines(tokens);
                let index = parse_expression(tokens)?;
                skip_newlines(tokens);
                expect(tokens, &Token::RBracket)?;
                expr = Expr::Index { collection: Box::new(expr),
                                     index: Box::new(index),
                                     position: *position };
            },
            _ => return Ok(expr),
        }
    }
}
