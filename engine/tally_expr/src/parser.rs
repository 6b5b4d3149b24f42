// Parser for normalized arithmetic expressions using nom.
//
// Grammar, with the usual precedence (`*`/`/` bind tighter than `+`/`-`,
// everything left-associative):
//
//   expr   := term (('+'|'-') term)*
//   term   := factor (('*'|'/') factor)*
//   factor := ['-'] ( number | '(' expr ')' )
//   number := digits ['.' digits?] | '.' digits

use nom::branch::alt;
use nom::character::complete::{char, digit0, digit1};
use nom::combinator::{all_consuming, map, map_res, opt, recognize, value};
use nom::multi::many0;
use nom::sequence::{delimited, pair};
use nom::IResult;

use crate::ast::{BinaryExpressionNode, BinaryOperator, ExpressionNode};
use crate::error::EvalError;

/// Parse a fully normalized expression string into an AST.
///
/// The whole input must be consumed; anything left over means the string
/// was not well formed.
pub fn parse_expression(input: &str) -> Result<ExpressionNode, EvalError> {
    match all_consuming(expression)(input) {
        Ok((_, node)) => Ok(node),
        Err(_) => Err(EvalError::Malformed(input.to_string())),
    }
}

fn expression(input: &str) -> IResult<&str, ExpressionNode> {
    let (input, first) = term(input)?;
    let (input, rest) = many0(pair(add_sub, term))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn term(input: &str) -> IResult<&str, ExpressionNode> {
    let (input, first) = factor(input)?;
    let (input, rest) = many0(pair(mul_div, factor))(input)?;
    Ok((input, fold_binary(first, rest)))
}

fn factor(input: &str) -> IResult<&str, ExpressionNode> {
    map(
        pair(opt(char('-')), alt((number, parenthesized))),
        |(sign, node)| match sign {
            Some(_) => ExpressionNode::Negation(Box::new(node)),
            None => node,
        },
    )(input)
}

fn parenthesized(input: &str) -> IResult<&str, ExpressionNode> {
    delimited(char('('), expression, char(')'))(input)
}

fn number(input: &str) -> IResult<&str, ExpressionNode> {
    map_res(
        alt((
            recognize(pair(digit1, opt(pair(char('.'), digit0)))),
            recognize(pair(char('.'), digit1)),
        )),
        |literal: &str| literal.parse::<f64>().map(ExpressionNode::Number),
    )(input)
}

fn add_sub(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Add, char('+')),
        value(BinaryOperator::Sub, char('-')),
    ))(input)
}

fn mul_div(input: &str) -> IResult<&str, BinaryOperator> {
    alt((
        value(BinaryOperator::Mul, char('*')),
        value(BinaryOperator::Div, char('/')),
    ))(input)
}

fn fold_binary(
    first: ExpressionNode,
    rest: Vec<(BinaryOperator, ExpressionNode)>,
) -> ExpressionNode {
    rest.into_iter().fold(first, |left, (operator, right)| {
        ExpressionNode::Binary(Box::new(BinaryExpressionNode {
            left,
            operator,
            right,
        }))
    })
}
