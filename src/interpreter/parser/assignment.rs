use std::iter::Peekable;

use crate::{
    ast::{AssignOperator, AssignTarget, Expr, PatternElement},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            binary::parse_logical_or,
            core::{ParseResult, parse_expression},
            utils::skip_newlines,
        },
    },
};

/// Parses an assignment, the lowest precedence level.
///
/// Both operators are right-associative, so `a := b := 1` assigns `1` to `b`
/// and then to `a`.
///
/// Grammar: `assignment := logical_or ((":=" | "=:") assignment)?`
///
/// # Parameters
/// - `tokens`: Token stream with position information.
///
/// # Returns
/// An `Expr::Assignment`, or the parsed `logical_or` expression if no
/// assignment operator follows.
///
/// # Errors
/// `InvalidAssignmentTarget` if the left side cannot receive a value.
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let left = parse_logical_or(tokens)?;

    let op = match tokens.peek() {
        Some((Token::ColonEquals, _)) => AssignOperator::Define,
        Some((Token::EqualsColon, _)) => AssignOperator::Swap,
        _ => return Ok(left),
    };
    let operator_position = tokens.next().map_or_else(Position::default, |(_, position)| *position);
    skip_newlines(tokens);

    let value = parse_expression(tokens)?;
    let position = left.position();
    let target = into_target(left, operator_position)?;

    Ok(Expr::Assignment { target,
                          op,
                          value: Box::new(value),
                          position })
}

/// Converts an already parsed expression into an assignment target.
///
/// Identifiers, index expressions and list literals are valid; list literals
/// become destructuring patterns.
fn into_target(expr: Expr, position: Position) -> ParseResult<AssignTarget> {
    match expr {
        Expr::Identifier { name, .. } => Ok(AssignTarget::Name(name)),
        Expr::Index { collection, index, .. } => Ok(AssignTarget::Index { collection, index }),
        Expr::List { elements, .. } => into_pattern(elements, position),
        other => Err(ParseError::InvalidAssignmentTarget { target: other.describe().to_string(),
                                                           position }),
    }
}

/// Converts the elements of a list literal into a destructuring pattern.
/// At most one element may be a `...` spread.
fn into_pattern(elements: Vec<Expr>, position: Position) -> ParseResult<AssignTarget> {
    let mut pattern = Vec::with_capacity(elements.len());
    let mut has_rest = false;

    for element in elements {
        match element {
            Expr::Spread { operand,
                           position: spread_position, } => {
                if has_rest {
                    return Err(ParseError::MultipleSpreads { position: spread_position });
                }
                has_rest = true;
                let target = into_target(*operand, spread_position)?;
                pattern.push(PatternElement::Rest(target));
            },
            other => {
                pattern.push(PatternElement::Single(into_target(other, position)?));
            },
        }
    }

    Ok(AssignTarget::Pattern(pattern))
}
