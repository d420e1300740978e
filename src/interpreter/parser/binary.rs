use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, ComparisonLink, Expr},
    interpreter::{
        lexer::{Position, Token},
        parser::{core::ParseResult, unary::parse_unary, utils::skip_newlines},
    },
};

/// Parses a chain of left-associative operators of one precedence level.
///
/// Newlines after an operator are skipped, so a long expression can be
/// continued on the next line by ending the line with the operator.
///
/// # Parameters
/// - `tokens`: Token stream with position information.
/// - `operators`: The operators that belong to this level.
/// - `parse_operand`: Parser for the next-higher precedence level.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operators: &[BinaryOperator],
                                 parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut left = parse_operand(tokens)?;
    while let Some((op, position)) = next_operator(tokens, operators) {
        let right = parse_operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                position };
    }
    Ok(left)
}

/// Parses comparisons of one precedence level, which chain instead of
/// nesting: `a < b <= c` means `a < b and b <= c`.
///
/// A single comparison stays an [`Expr::BinaryOp`]; two or more become an
/// [`Expr::Comparison`].
fn parse_comparison_chain<'a, I>(tokens: &mut Peekable<I>,
                                 operators: &[BinaryOperator],
                                 parse_operand: impl Fn(&mut Peekable<I>) -> ParseResult<Expr>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let first = parse_operand(tokens)?;
    let mut links = Vec::new();
    while let Some((op, position)) = next_operator(tokens, operators) {
        links.push(ComparisonLink { op,
                                    operand: parse_operand(tokens)?,
                                    position });
    }

    match links.len() {
        0 => Ok(first),
        1 => {
            let ComparisonLink { op, operand, position } = links.remove(0);
            Ok(Expr::BinaryOp { left: Box::new(first),
                                op,
                                right: Box::new(operand),
                                position })
        },
        _ => {
            let position = links[0].position;
            Ok(Expr::Comparison { first: Box::new(first),
                                  links,
                                  position })
        },
    }
}

/// Consumes the next token if it is one of `operators`, along with any
/// newlines after it, and returns the operator with its position.
fn next_operator<'a, I>(tokens: &mut Peekable<I>,
                        operators: &[BinaryOperator])
                        -> Option<(BinaryOperator, Position)>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let next = tokens.peek().and_then(|(token, position)| {
                                token_to_binary_operator(token).filter(|op| operators.contains(op))
                                                               .map(|op| (op, *position))
                            })?;
    tokens.next();
    skip_newlines(tokens);
    Some(next)
}

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_left_associative(tokens, &[BinaryOperator::Or], parse_logical_and)
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_left_associative(tokens, &[BinaryOperator::And], parse_equality)
}

/// Parses equality comparisons. `a == b == c` is a chain.
///
/// The rule is: `equality := relational (("==" | "!=") relational)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_comparison_chain(tokens,
                           &[BinaryOperator::Equal, BinaryOperator::NotEqual],
                           parse_relational)
}

/// Parses ordering comparisons. `a < b < c` is a chain.
///
/// The rule is: `relational := shift (("<" | "<=" | ">" | ">=") shift)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_comparison_chain(tokens,
                           &[BinaryOperator::Less,
                             BinaryOperator::LessEqual,
                             BinaryOperator::Greater,
                             BinaryOperator::GreaterEqual],
                           parse_shift)
}

/// Parses bit shifts.
///
/// The rule is: `shift := additive (("<<" | ">>") additive)*`
pub fn parse_shift<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::ShiftLeft, BinaryOperator::ShiftRight],
                           parse_additive)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::Add, BinaryOperator::Sub],
                           parse_multiplicative)
}

/// Parses multiplication-level expressions.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "//" | "%") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    parse_left_associative(tokens,
                           &[BinaryOperator::Mul,
                             BinaryOperator::Div,
                             BinaryOperator::FloorDiv,
                             BinaryOperator::Mod],
                           parse_exponent)
}

/// Parses exponentiation.
///
/// `**` is right-associative and its left operand is a unary expression, so
/// `2 ** 3 ** 2` is `2 ** 9` and `-2 ** 2` is `(-2) ** 2`.
///
/// The rule is: `exponent := unary ("**" exponent)?`
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let base = parse_unary(tokens)?;
    if let Some((Token::StarStar, position)) = tokens.peek() {
        tokens.next();
        skip_newlines(tokens);
        let exponent = parse_exponent(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   position: *position });
    }
    Ok(base)
}

/// Maps a token to the binary operator it denotes, if any.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    Some(match token {
        Token::Plus => BinaryOperator::Add,
        Token::Minus => BinaryOperator::Sub,
        Token::Star => BinaryOperator::Mul,
        Token::Slash => BinaryOperator::Div,
        Token::SlashSlash => BinaryOperator::FloorDiv,
        Token::Percent => BinaryOperator::Mod,
        Token::StarStar => BinaryOperator::Pow,
        Token::ShiftLeft => BinaryOperator::ShiftLeft,
        Token::ShiftRight => BinaryOperator::ShiftRight,
        Token::EqualEqual => BinaryOperator::Equal,
        Token::BangEqual => BinaryOperator::NotEqual,
        Token::Less => BinaryOperator::Less,
        Token::LessEqual => BinaryOperator::LessEqual,
        Token::Greater => BinaryOperator::Greater,
        Token::GreaterEqual => BinaryOperator::GreaterEqual,
        Token::And => BinaryOperator::And,
        Token::Or => BinaryOperator::Or,
        _ => return None,
    })
}
