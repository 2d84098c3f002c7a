/******************************************************************************
 * Copyright ContinuousC. Licensed under the "Elastic License 2.0".           *
 ******************************************************************************/

use nom::{
    self,
    branch::alt,
    bytes::complete::take_while,
    character::complete::{digit0, digit1, one_of, satisfy, space0, space1},
    combinator::{
        all_consuming, cut, map, map_opt, map_res, opt, recognize, value,
    },
    error::ErrorKind,
    multi::{fold_many1, separated_list0},
    number::complete::double,
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

use crate::Quantity;

use super::error::UnitError;
use super::exponent::Exponent;
use super::resolver::Resolver;
use super::unit::Unit;

/// One factor of a unit expression: a symbol raised to an exponent.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct Term {
    pub symbol: String,
    pub exponent: Exponent,
}

/// Parse a unit expression into its terms, without resolving symbols.
pub fn parse_terms(input: &str) -> Result<Vec<Term>, UnitError> {
    match terms(input) {
        Ok(("", t)) => Ok(t),
        Ok((rest, _)) => Err(parse_error(input, rest, None)),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            Err(parse_error(input, e.input, Some(e.code)))
        }
        Err(nom::Err::Incomplete(_)) => Err(parse_error(input, "", None)),
    }
}

/// Parse a unit expression using the default CGS table.
pub fn parse_unit(input: &str) -> Result<Unit, UnitError> {
    parse_unit_with(input, &Resolver::default())
}

/// Parse a unit expression, resolving symbols with `resolver`. An
/// empty expression is dimensionless.
pub fn parse_unit_with(
    input: &str,
    resolver: &Resolver,
) -> Result<Unit, UnitError> {
    parse_terms(input)?.into_iter().try_fold(
        Unit::dimensionless(),
        |unit, term| {
            let r = resolver.resolve(&term.symbol)?;
            let factor = Unit::new(r.dimensions, r.factor)?
                .with_symbol(&term.symbol)
                .pow(term.exponent)?;
            unit * factor
        },
    )
}

/// Parse a quantity (number followed by a unit expression), using
/// the default CGS table.
pub fn parse_quantity(input: &str) -> Result<Quantity, UnitError> {
    parse_quantity_with(input, &Resolver::default())
}

pub fn parse_quantity_with(
    input: &str,
    resolver: &Resolver,
) -> Result<Quantity, UnitError> {
    let (rest, num) = match leading_number(input) {
        Ok(r) => r,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
            return Err(UnitError::Parse {
                position: input.len() - e.input.len(),
                message: String::from("expected a number"),
            })
        }
        Err(nom::Err::Incomplete(_)) => {
            return Err(parse_error(input, "", None))
        }
    };
    let offset = input.len() - rest.len();
    match parse_unit_with(rest, resolver) {
        Ok(unit) => Ok(Quantity(num, unit)),
        Err(UnitError::Parse { position, message }) => Err(UnitError::Parse {
            position: position + offset,
            message,
        }),
        Err(e) => Err(e),
    }
}

/// Check whether `input` is a single valid unit symbol.
pub(crate) fn is_symbol(input: &str) -> bool {
    all_consuming(symbol)(input).is_ok()
}

fn parse_error(input: &str, rest: &str, kind: Option<ErrorKind>) -> UnitError {
    let message = match (kind, rest.chars().next()) {
        (Some(ErrorKind::MapRes), _) => String::from("invalid exponent"),
        (_, Some(c)) => format!("unexpected '{}'", c),
        (_, None) => String::from("unexpected end of input"),
    };
    UnitError::Parse {
        position: input.len() - rest.len(),
        message,
    }
}

/* Grammar. */

fn leading_number(input: &str) -> IResult<&str, f64> {
    preceded(space0, double)(input)
}

fn terms(input: &str) -> IResult<&str, Vec<Term>> {
    delimited(space0, separated_list0(separator, term), space0)(input)
}

fn separator(input: &str) -> IResult<&str, ()> {
    alt((
        value((), tuple((space0, one_of("*·⋅"), space0))),
        value((), space1),
    ))(input)
}

fn term(input: &str) -> IResult<&str, Term> {
    map(pair(symbol, opt(power)), |(s, e)| Term {
        symbol: s.to_string(),
        exponent: e.unwrap_or(Exponent::ONE),
    })(input)
}

fn symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c| c.is_alphabetic() || c == '_'),
        take_while(|c: char| {
            c.is_alphabetic() || c.is_ascii_digit() || c == '_'
        }),
    ))(input)
}

fn power(input: &str) -> IResult<&str, Exponent> {
    alt((
        preceded(alt((tag("**"), tag("^"))), cut(exponent)),
        superscript_power,
    ))(input)
}

fn exponent(input: &str) -> IResult<&str, Exponent> {
    alt((
        preceded(
            char('('),
            cut(terminated(delimited(space0, number, space0), char(')'))),
        ),
        number,
    ))(input)
}

fn number(input: &str) -> IResult<&str, Exponent> {
    map_res(
        recognize(pair(
            opt(sign),
            alt((
                recognize(tuple((digit1, char('/'), digit1))),
                recognize(pair(digit1, opt(pair(char('.'), digit0)))),
                recognize(pair(char('.'), digit1)),
            )),
        )),
        |s: &str| s.parse::<Exponent>(),
    )(input)
}

fn sign(input: &str) -> IResult<&str, char> {
    alt((char('-'), char('+')))(input)
}

fn superscript_power(input: &str) -> IResult<&str, Exponent> {
    map_opt(
        pair(opt(superscript_sign), superscript_digit1),
        |(s, n): (Option<i64>, Option<i64>)| {
            Exponent::try_from(s.unwrap_or(1) * n?).ok()
        },
    )(input)
}

fn superscript_sign(input: &str) -> IResult<&str, i64> {
    alt((value(-1, char('⁻')), value(1, char('⁺'))))(input)
}

/* Yields `None` on overflow. */
fn superscript_digit1(input: &str) -> IResult<&str, Option<i64>> {
    fold_many1(
        superscript_digit,
        || Some(0),
        |n: Option<i64>, i| {
            n.and_then(|n| n.checked_mul(10))
                .and_then(|n| n.checked_add(i))
        },
    )(input)
}

fn superscript_digit(input: &str) -> IResult<&str, i64> {
    alt((
        value(0, char('⁰')),
        value(1, char('¹')),
        value(2, char('²')),
        value(3, char('³')),
        value(4, char('⁴')),
        value(5, char('⁵')),
        value(6, char('⁶')),
        value(7, char('⁷')),
        value(8, char('⁸')),
        value(9, char('⁹')),
    ))(input)
}

/* Monomorphised versions of char and tag. */

fn char<'r>(t: char) -> impl Fn(&'r str) -> IResult<&'r str, char> {
    nom::character::complete::char(t)
}

fn tag<'r>(t: &'static str) -> impl Fn(&'r str) -> IResult<&'r str, &'r str> {
    nom::bytes::complete::tag(t)
}
