//! Translate [Common Query Language 2 (CQL2)](https://docs.ogc.org/DRAFTS/21-065.html)
//! between its text and JSON encodings.
//!
//! Both encodings converge on one typed abstract syntax tree rooted at
//! [BooleanExpression]; parsing either encoding and rendering the
//! other preserves the expression's meaning.
//!
//! # Examples
//!
//! ```
//! let expr = cql2_syntax::parse_text("city = 'Toronto'").unwrap();
//! assert_eq!(expr.to_text().unwrap(), "\"city\" = 'Toronto'");
//! assert_eq!(
//!     expr.to_json().unwrap(),
//!     r#"{"op":"=","args":[{"property":"city"},"Toronto"]}"#
//! );
//!
//! let expr = cql2_syntax::parse_json(
//!     r#"{"op":"=","args":[{"property":"city"},"Toronto"]}"#
//! ).unwrap();
//! assert_eq!(expr.to_text().unwrap(), "\"city\" = 'Toronto'");
//! ```

#![deny(unused_crate_dependencies)]
#![warn(missing_docs)]

mod builder;
mod error;
mod expr;
mod geometry;
mod json;
mod operators;
mod parser;
mod temporal;

pub use crate::{
    error::{Error, ValidationError},
    expr::{
        Accenti, AndOrExpression, ArithmeticExpression, ArrayElement, ArrayLiteral,
        ArrayPredicate, ArrayTerm, BboxLiteral, BinaryComparison, BooleanExpression, Casei,
        CharacterExpression, ComparisonPredicate, Function, FunctionArgument, FunctionRef,
        GeomExpression, IsBetweenPredicate, IsInListPredicate, IsLikePredicate, IsNullOperand,
        IsNullPredicate, NotExpression, NumericExpression, PatternExpression, PropertyRef,
        ScalarExpression, SpatialPredicate, TemporalExpression, TemporalPredicate,
    },
    operators::{AndOrOp, ArithmeticOp, ArrayOp, ComparisonOp, SpatialOp, TemporalOp},
    parser::Rule,
    temporal::{
        DateLiteral, InstantLiteral, IntervalEndpoint, IntervalLiteral, TimestampLiteral,
    },
};

/// Parses a string into a CQL2 expression.
///
/// The string can be cql2-text or cql2-json — the type will be
/// auto-detected. Use [parse_text] and [parse_json] if you already
/// know the CQL2 type of the string.
///
/// # Examples
///
/// ```
/// let expr = cql2_syntax::parse("landsat:scene_id = 'LC82030282019133LGN00'").unwrap();
/// ```
pub fn parse(cql2: &str) -> Result<BooleanExpression, Error> {
    if cql2.trim_start().starts_with('{') {
        parse_json(cql2)
    } else {
        parse_text(cql2)
    }
}

/// Parses a cql2-text string into a CQL2 expression.
///
/// # Examples
///
/// ```
/// let expr = cql2_syntax::parse_text("landsat:scene_id = 'LC82030282019133LGN00'").unwrap();
/// ```
pub fn parse_text(cql2: &str) -> Result<BooleanExpression, Error> {
    parser::parse_text(cql2)
}

/// Parses a cql2-json string into a CQL2 expression.
///
/// # Examples
///
/// ```
/// let expr = cql2_syntax::parse_json(
///     r#"{"op":"=","args":[{"property":"city"},"Toronto"]}"#
/// ).unwrap();
/// ```
pub fn parse_json(cql2: &str) -> Result<BooleanExpression, Error> {
    let value: serde_json::Value = serde_json::from_str(cql2)?;
    from_json_value(&value)
}

/// Decodes an already-parsed JSON value into a CQL2 expression.
///
/// # Examples
///
/// ```
/// use serde_json::json;
///
/// let value = json!({"op": "=", "args": [{"property": "city"}, "Toronto"]});
/// let expr = cql2_syntax::from_json_value(&value).unwrap();
/// ```
pub fn from_json_value(value: &serde_json::Value) -> Result<BooleanExpression, Error> {
    json::decode(value).map_err(Error::from)
}

#[cfg(test)]
use {assert_json_diff as _, rstest as _};
