use std::{iter::Peekable, rc::Rc};

use tracing::trace;

use crate::{
    ast::{AssignTarget, ConditionalBranch, Expr, PatternElement},
    error::ParseError,
    interpreter::{
        lexer::{Position, Token},
        parser::{
            assignment::parse_assignment,
            utils::{
                expect, parse_comma_separated, parse_identifier, peek_past_separators,
                skip_newlines, skip_separators,
            },
        },
    },
    util::stack::ensure_sufficient_stack,
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// A program is an implicit block: expressions separated by any number of
/// newlines or semicolons, up to the end of input. Separators are optional;
/// each expression extends as far as the grammar allows.
///
/// Grammar: `program := (separator* expression)* separator* EOF`
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of the program.
///
/// # Returns
/// An `Expr::Block` holding the top-level expressions in order.
///
/// # Errors
/// - `TrailingTokens` if a closing bracket or comma appears where a new
///   expression would start.
/// - `MisplacedSpread` if `...` appears outside a list literal or argument
///   list.
/// - Any error raised while parsing an expression.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let position = tokens.peek().map_or_else(Position::default, |(_, position)| *position);
    let mut body = Vec::new();
    loop {
        skip_separators(tokens);
        match tokens.peek() {
            None | Some((Token::Eof, _)) => break,
            Some((token @ (Token::RBrace | Token::RParen | Token::RBracket | Token::Comma),
                  position)) => {
                return Err(ParseError::TrailingTokens { found:    token.to_string(),
                                                        position: *position, });
            },
            Some(_) => body.push(parse_expression(tokens)?),
        }
    }
    trace!(expressions = body.len(), "parsed program");

    let program = Expr::Block { body, position };
    check_spread_placement(&program)?;
    Ok(program)
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, assignment, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := assignment`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, Position)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    ensure_sufficient_stack(|| parse_assignment(tokens))
}

/// Parses an `if` expression with any number of `elif` branches and an
/// optional `else`.
///
/// Syntax:
/// ```text
///     if (<condition>) <branch>
///     elif (<condition>) <branch>
///     else <branch>
/// ```
/// Separators may appear before `elif` and `else`, so each branch can sit on
/// its own line.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `if` keyword.
/// - `position`: Position of the `if` token.
///
/// # Returns
/// An `Expr::If` node with the branches in source order.
///
/// # Errors
/// - `UnexpectedToken` if a condition is not parenthesized.
/// - Propagates any errors from sub-expression parsing.
pub fn parse_if<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let mut branches = Vec::new();
    loop {
        let condition = parse_condition(tokens)?;
        let body = parse_branch(tokens)?;
        branches.push(ConditionalBranch { condition, body });

        if peek_past_separators(tokens) != Some(&Token::Elif) {
            break;
        }
        skip_separators(tokens);
        tokens.next();
    }

    let else_branch = if peek_past_separators(tokens) == Some(&Token::Else) {
        skip_separators(tokens);
        tokens.next();
        Some(Box::new(parse_branch(tokens)?))
    } else {
        None
    };

    Ok(Expr::If { branches,
                  else_branch,
                  position })
}

/// Parses a `while` loop.
///
/// Syntax: `while (<condition>) <branch>`
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `while` keyword.
/// - `position`: Position of the `while` token.
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    let condition = parse_condition(tokens)?;
    let body = parse_branch(tokens)?;
    Ok(Expr::While { condition: Box::new(condition),
                     body: Box::new(body),
                     position })
}

/// Parses a function literal.
///
/// Syntax: `function(<param>, ...) <body>`, where the body is any
/// expression, usually a block.
///
/// # Parameters
/// - `tokens`: Token stream positioned after the `function` keyword.
/// - `position`: Position of the `function` token.
pub fn parse_function<'a, I>(tokens: &mut Peekable<I>, position: Position) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_identifier, &Token::RParen)?;
    skip_newlines(tokens);
    let body = parse_expression(tokens)?;
    Ok(Expr::Function { params: params.into(),
                        body: Rc::new(body),
                        position })
}

/// Parses a parenthesized condition: `( expression )`.
fn parse_condition<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    expect(tokens, &Token::LParen)?;
    skip_newlines(tokens);
    let condition = parse_expression(tokens)?;
    skip_newlines(tokens);
    expect(tokens, &Token::RParen)?;
    Ok(condition)
}

/// Parses the body of an `if` branch or `while` loop.
///
/// A body that is not already a block is wrapped in one, so every branch is
/// evaluated in its own scope.
fn parse_branch<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, Position)> + Clone
{
    skip_newlines(tokens);
    let body = parse_expression(tokens)?;
    Ok(match body {
        Expr::Block { .. } => body,
        other => {
            let position = other.position();
            Expr::Block { body: vec![other],
                          position }
        },
    })
}

/// Rejects `...` everywhere except directly inside a list literal or an
/// argument list.
fn check_spread_placement(expr: &Expr) -> ParseResult<()> {
    ensure_sufficient_stack(|| match expr {
        Expr::Literal { .. } | Expr::Identifier { .. } => Ok(()),
        Expr::Spread { position, .. } => Err(ParseError::MisplacedSpread { position: *position }),
        Expr::List { elements, .. } => check_spread_elements(elements),
        Expr::Call { callee, arguments, .. } => {
            check_spread_placement(callee)?;
            check_spread_elements(arguments)
        },
        Expr::Assignment { target, value, .. } => {
            check_target(target)?;
            check_spread_placement(value)
        },
        Expr::BinaryOp { left, right, .. } => {
            check_spread_placement(left)?;
            check_spread_placement(right)
        },
        Expr::Comparison { first, links, .. } => {
            check_spread_placement(first)?;
            links.iter().try_for_each(|link| check_spread_placement(&link.operand))
        },
        Expr::UnaryOp { operand, .. } | Expr::Length { operand, .. } => {
            check_spread_placement(operand)
        },
        Expr::Block { body, .. } => body.iter().try_for_each(check_spread_placement),
        Expr::If { branches,
                   else_branch,
                   .. } => {
            for branch in branches {
                check_spread_placement(&branch.condition)?;
                check_spread_placement(&branch.body)?;
            }
            else_branch.as_deref().map_or(Ok(()), check_spread_placement)
        },
        Expr::While { condition, body, .. } => {
            check_spread_placement(condition)?;
            check_spread_placement(body)
        },
        Expr::Function { body, .. } => check_spread_placement(body),
        Expr::Index { collection, index, .. } => {
            check_spread_placement(collection)?;
            check_spread_placement(index)
        },
    })
}

fn check_spread_elements(elements: &[Expr]) -> ParseResult<()> {
    elements.iter().try_for_each(|element| match element {
                       Expr::Spread { operand, .. } => check_spread_placement(operand),
                       other => check_spread_placement(other),
                   })
}

fn check_target(target: &AssignTarget) -> ParseResult<()> {
    match target {
        AssignTarget::Name(_) => Ok(()),
        AssignTarget::Index { collection, index } => {
            check_spread_placement(collection)?;
            check_spread_placement(index)
        },
        AssignTarget::Pattern(elements) => {
            elements.iter().try_for_each(|element| match element {
                               PatternElement::Single(target) | PatternElement::Rest(target) => {
                                   check_target(target)
                               },
                           })
        },
    }
}
