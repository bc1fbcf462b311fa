//! The cql2-text parser.
//!
//! Produces an untyped [Term] tree; [crate::builder] turns that into
//! the typed AST. Keeping the grammar untyped lets one Pratt table
//! drive the whole expression language; the builder restores the
//! context (character vs pattern vs numeric vs …) the unified grammar
//! cannot see.

use crate::{builder, BooleanExpression, Error};
use pest::{
    iterators::{Pair, Pairs},
    pratt_parser::PrattParser,
    Parser,
};
use serde_json::Number;
use tracing::debug;

/// Parses a cql2-text string into a CQL2 expression.
pub(crate) fn parse_text(s: &str) -> Result<BooleanExpression, Error> {
    debug!("parsing cql2-text");
    let mut pairs = CQL2Parser::parse(Rule::Query, s).map_err(Box::new)?;
    let query = pairs
        .next()
        .ok_or_else(|| Error::InvalidCql2Text(s.to_string()))?;
    let expr = query
        .into_inner()
        .next()
        .ok_or_else(|| Error::InvalidCql2Text(s.to_string()))?;
    let term = parse_expr(expr.into_inner())?;
    builder::build_boolean(term)
}

/// [pest] parser for CQL2.
#[derive(pest_derive::Parser)]
#[grammar = "cql2.pest"]
pub struct CQL2Parser;

/// The untyped parse tree.
///
/// Operators, predicates, and user functions all land in [Term::Op];
/// the builder classifies them by name. `Grouped` records an explicit
/// parenthesization so that AND/OR runs only flatten when they are
/// written contiguously.
#[derive(Debug, Clone)]
pub(crate) enum Term {
    Op { op: String, args: Vec<Term> },
    Grouped(Box<Term>),
    Interval(Vec<Term>),
    Timestamp(Box<Term>),
    Date(Box<Term>),
    Property(String),
    Bbox(Vec<Number>),
    Number(Number),
    String(String),
    Bool(bool),
    Array(Vec<Term>),
    Geometry(geojson::Geometry),
}

impl Term {
    fn op(op: &str, args: Vec<Term>) -> Term {
        Term::Op {
            op: op.to_string(),
            args,
        }
    }

    fn not(self) -> Term {
        Term::op("not", vec![self])
    }

    /// A one-line description for error messages.
    pub(crate) fn describe(&self) -> String {
        match self {
            Term::Op { op, .. } => format!("operation `{op}`"),
            Term::Grouped(inner) => inner.describe(),
            Term::Interval(_) => "an interval".to_string(),
            Term::Timestamp(_) => "a timestamp".to_string(),
            Term::Date(_) => "a date".to_string(),
            Term::Property(property) => format!("property `{property}`"),
            Term::Bbox(_) => "a bbox".to_string(),
            Term::Number(n) => format!("number {n}"),
            Term::String(_) => "a string".to_string(),
            Term::Bool(v) => format!("boolean {v}"),
            Term::Array(_) => "an array".to_string(),
            Term::Geometry(_) => "a geometry".to_string(),
        }
    }
}

lazy_static::lazy_static! {
    static ref PRATT_PARSER: PrattParser<Rule> = {
        use pest::pratt_parser::{Assoc::*, Op};
        use Rule::*;
        PrattParser::new()
            .op(Op::infix(Or, Left))
            .op(Op::infix(Between, Left))
            .op(Op::infix(And, Left))
            .op(Op::prefix(UnaryNot))
            .op(Op::infix(Eq, Right))
            .op(
                Op::infix(NotEq, Right) |
                Op::infix(Gt, Right) |
                Op::infix(GtEq, Right) |
                Op::infix(Lt, Right) |
                Op::infix(LtEq, Right)
            )
            .op(Op::infix(Like, Right))
            .op(Op::infix(In, Left))
            .op(Op::postfix(IsNullPostfix))
            .op(
                Op::infix(Add, Left) |
                Op::infix(Subtract, Left)
            )
            .op(
                Op::infix(Multiply, Left) |
                Op::infix(Divide, Left) |
                Op::infix(Modulo, Left) |
                Op::infix(IntDiv, Left)
            )
            .op(Op::infix(Power, Right))
            .op(Op::prefix(Negative))
    };
}

fn check_function_arity(name: &'static str, args: &[Term], expected: usize) -> Result<(), Error> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidNumberOfArguments {
            name: name.to_string(),
            actual: args.len(),
            expected,
        })
    }
}

fn strip_quotes(s: &str) -> &str {
    if (s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')) {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Strips the outer quotes and folds both escape forms (`''` and
/// `\'`) back to a plain apostrophe.
fn unescape_string(s: &str) -> String {
    strip_quotes(s).replace("''", "'").replace("\\'", "'")
}

/// Parses a numeric lexeme, keeping the integer representation when
/// the lexeme has no fraction or exponent.
fn parse_number(s: &str) -> Result<Number, Error> {
    if !s.contains(['.', 'e', 'E']) {
        if let Ok(int) = s.parse::<i64>() {
            return Ok(Number::from(int));
        }
    }
    let float = s.parse::<f64>()?;
    Number::from_f64(float).ok_or_else(|| Error::InvalidNumber(s.to_string()))
}

fn parse_expr(expression_pairs: Pairs<'_, Rule>) -> Result<Term, Error> {
    PRATT_PARSER
        .map_primary(|primary| match primary.as_rule() {
            Rule::Expr => parse_expr(primary.into_inner()),
            Rule::ExpressionInParentheses => {
                Ok(Term::Grouped(Box::new(parse_expr(primary.into_inner())?)))
            }
            Rule::DECIMAL => Ok(Term::Number(parse_number(primary.as_str())?)),
            Rule::SingleQuotedString => Ok(Term::String(unescape_string(primary.as_str()))),
            Rule::True => Ok(Term::Bool(true)),
            Rule::False => Ok(Term::Bool(false)),
            Rule::Identifier => Ok(Term::Property(strip_quotes(primary.as_str()).to_string())),
            Rule::GEOMETRY => Ok(Term::Geometry(parse_geometry(primary)?)),
            Rule::Bbox => {
                let values = primary
                    .into_inner()
                    .map(|pair| parse_number(pair.as_str()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Bbox(values))
            }
            Rule::Function => {
                let mut pairs = primary.into_inner();
                let name = strip_quotes(
                    pairs
                        .next()
                        .expect("the grammar guarantees that there is always a name")
                        .as_str(),
                )
                .to_string();
                let mut args = Vec::new();
                for pair in pairs {
                    args.push(parse_expr(pair.into_inner())?);
                }
                if name.eq_ignore_ascii_case("interval") {
                    check_function_arity("interval", &args, 2)?;
                    Ok(Term::Interval(args))
                } else if name.eq_ignore_ascii_case("date") {
                    check_function_arity("date", &args, 1)?;
                    Ok(Term::Date(Box::new(
                        args.into_iter().next().ok_or(Error::MissingArgument("date"))?,
                    )))
                } else if name.eq_ignore_ascii_case("timestamp") {
                    check_function_arity("timestamp", &args, 1)?;
                    Ok(Term::Timestamp(Box::new(
                        args.into_iter()
                            .next()
                            .ok_or(Error::MissingArgument("timestamp"))?,
                    )))
                } else {
                    Ok(Term::Op { op: name, args })
                }
            }
            Rule::Array => {
                let elements = primary
                    .into_inner()
                    .map(|pair| parse_expr(pair.into_inner()))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Term::Array(elements))
            }

            rule => unreachable!("parse_expr expected atomic rule, found {:?}", rule),
        })
        .map_infix(|lhs, op, rhs| {
            let lhs = lhs?;
            let rhs = rhs?;
            let notflag = op.as_str().to_ascii_lowercase().starts_with("not");
            match op.as_rule() {
                Rule::And | Rule::Or => {
                    let name = if op.as_rule() == Rule::And { "and" } else { "or" };
                    // Contiguous runs collapse; parenthesized operands
                    // arrive as Grouped and keep their structure.
                    match lhs {
                        Term::Op { op, mut args } if op == name => {
                            args.push(rhs);
                            Ok(Term::Op { op, args })
                        }
                        lhs => Ok(Term::op(name, vec![lhs, rhs])),
                    }
                }
                Rule::Between => Ok(between(lhs, rhs, notflag)),
                Rule::Like => {
                    let like = Term::op("like", vec![lhs, rhs]);
                    Ok(if notflag { like.not() } else { like })
                }
                Rule::In => {
                    let in_list = Term::op("in", vec![lhs, rhs]);
                    Ok(if notflag { in_list.not() } else { in_list })
                }
                Rule::Eq => Ok(Term::op("=", vec![lhs, rhs])),
                Rule::NotEq => Ok(Term::op("<>", vec![lhs, rhs])),
                Rule::Lt => Ok(Term::op("<", vec![lhs, rhs])),
                Rule::LtEq => Ok(Term::op("<=", vec![lhs, rhs])),
                Rule::Gt => Ok(Term::op(">", vec![lhs, rhs])),
                Rule::GtEq => Ok(Term::op(">=", vec![lhs, rhs])),
                Rule::Add => Ok(Term::op("+", vec![lhs, rhs])),
                Rule::Subtract => Ok(Term::op("-", vec![lhs, rhs])),
                Rule::Multiply => Ok(Term::op("*", vec![lhs, rhs])),
                Rule::Divide => Ok(Term::op("/", vec![lhs, rhs])),
                Rule::Modulo => Ok(Term::op("%", vec![lhs, rhs])),
                Rule::IntDiv => Ok(Term::op("div", vec![lhs, rhs])),
                Rule::Power => Ok(Term::op("^", vec![lhs, rhs])),
                rule => unreachable!("parse_expr expected infix operator, found {:?}", rule),
            }
        })
        .map_prefix(|op, child| {
            let child = child?;
            match op.as_rule() {
                Rule::UnaryNot => Ok(child.not()),
                Rule::Negative => Ok(Term::op(
                    "*",
                    vec![Term::Number(Number::from(-1)), child],
                )),
                rule => unreachable!("parse_expr expected prefix operator, found {:?}", rule),
            }
        })
        .map_postfix(|child, op| {
            let child = child?;
            let notflag = op.as_str().to_ascii_lowercase().contains("not");
            match op.as_rule() {
                Rule::IsNullPostfix => {
                    let is_null = Term::op("isNull", vec![child]);
                    Ok(if notflag { is_null.not() } else { is_null })
                }
                rule => unreachable!("parse_expr expected postfix operator, found {:?}", rule),
            }
        })
        .parse(expression_pairs)
}

/// Untangles `BETWEEN … AND …`.
///
/// `AND` binds tighter than `BETWEEN` in the Pratt table, so the
/// bounds arrive glued into the neighboring AND chains: the operand is
/// the last element of the left chain, the bounds are the first two of
/// the right one, and whatever remains is re-ANDed around the predicate.
fn between(lhs: Term, rhs: Term, mut notflag: bool) -> Term {
    let mut leading: Vec<Term> = Vec::new();
    let operand = match lhs {
        Term::Op { op, args } if op == "and" => {
            leading = args;
            leading.pop().expect("`and` always has arguments")
        }
        other => other,
    };
    let operand = match operand {
        Term::Op { op, args } if op == "not" => {
            notflag = true;
            args.into_iter()
                .next()
                .expect("`not` always has an argument")
        }
        other => other,
    };

    let mut between_args = vec![operand];
    let mut trailing: Vec<Term> = Vec::new();
    match rhs {
        Term::Op { op, args } if op == "and" => {
            between_args.extend(args);
            trailing = between_args.split_off(3);
        }
        other => between_args.push(other),
    }

    let mut expr = Term::op("between", between_args);
    if notflag {
        expr = expr.not();
    }

    if leading.is_empty() && trailing.is_empty() {
        expr
    } else {
        leading.push(expr);
        leading.extend(trailing);
        Term::op("and", leading)
    }
}

fn parse_geometry(pair: Pair<'_, Rule>) -> Result<geojson::Geometry, Error> {
    let inner = pair
        .into_inner()
        .next()
        .expect("GEOMETRY always wraps a concrete geometry");
    geometry_value(inner).map(geojson::Geometry::new)
}

fn geometry_value(pair: Pair<'_, Rule>) -> Result<geojson::Value, Error> {
    match pair.as_rule() {
        Rule::Point => {
            let position = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::Position)
                .expect("a point has a position");
            Ok(geojson::Value::Point(parse_position(position)?))
        }
        Rule::LineString => {
            let coords = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::LineStringCoords)
                .expect("a linestring has coordinates");
            Ok(geojson::Value::LineString(parse_line(coords)?))
        }
        Rule::Polygon => {
            let coords = pair
                .into_inner()
                .find(|p| p.as_rule() == Rule::PolygonCoords)
                .expect("a polygon has coordinates");
            Ok(geojson::Value::Polygon(parse_rings(coords)?))
        }
        Rule::MultiPoint => {
            let positions = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::Position)
                .map(parse_position)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(geojson::Value::MultiPoint(positions))
        }
        Rule::MultiLineString => {
            let lines = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::LineStringCoords)
                .map(parse_line)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(geojson::Value::MultiLineString(lines))
        }
        Rule::MultiPolygon => {
            let polygons = pair
                .into_inner()
                .filter(|p| p.as_rule() == Rule::PolygonCoords)
                .map(parse_rings)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(geojson::Value::MultiPolygon(polygons))
        }
        Rule::GeometryCollection => {
            let geometries = pair
                .into_inner()
                .map(parse_geometry)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(geojson::Value::GeometryCollection(geometries))
        }
        rule => unreachable!("geometry_value expected a geometry rule, found {:?}", rule),
    }
}

fn parse_position(pair: Pair<'_, Rule>) -> Result<Vec<f64>, Error> {
    pair.into_inner()
        .map(|decimal| decimal.as_str().parse::<f64>().map_err(Error::from))
        .collect()
}

fn parse_line(pair: Pair<'_, Rule>) -> Result<Vec<Vec<f64>>, Error> {
    pair.into_inner().map(parse_position).collect()
}

fn parse_rings(pair: Pair<'_, Rule>) -> Result<Vec<Vec<Vec<f64>>>, Error> {
    pair.into_inner()
        .map(|ring| ring.into_inner().map(parse_position).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{CQL2Parser, Rule};
    use pest::Parser;

    fn accepts(s: &str) {
        CQL2Parser::parse(Rule::Query, s).unwrap();
    }

    fn rejects(s: &str) {
        assert!(CQL2Parser::parse(Rule::Query, s).is_err(), "accepted {s:?}");
    }

    #[test]
    fn keywords_are_case_insensitive() {
        accepts("a = 1 and b = 2 or not c = 3");
        accepts("\"a\" Between 1 And 2");
    }

    #[test]
    fn keywords_do_not_eat_identifiers() {
        accepts("android = 1 AND orbit = 2");
        rejects("a ANDb");
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        rejects("a = 1 b");
        rejects("a = ");
    }

    #[test]
    fn geometries() {
        accepts("S_INTERSECTS(geom, POINT(0 0))");
        accepts("S_INTERSECTS(geom, POINT Z(-105.1019 40.1672 4981))");
        accepts("S_INTERSECTS(geom, POINT(-105.1019 40.1672 4981))");
        accepts("S_INTERSECTS(geom, POLYGON((0 0,1 0,1 1,0 1,0 0)))");
        accepts("S_INTERSECTS(geom, MULTIPOINT((0 0),(1 1)))");
        accepts("S_INTERSECTS(geom, MULTIPOINT(0 0, 1 1))");
        accepts(
            "S_INTERSECTS(geom, GEOMETRYCOLLECTION(POINT(0 0),LINESTRING(0 0,1 1)))",
        );
        rejects("S_INTERSECTS(geom, POINT M(0 0 0))");
        rejects("S_INTERSECTS(geom, POLYGON((0 0,1 0)))");
    }

    #[test]
    fn character_literals() {
        accepts("name = 'O''Brien'");
        accepts(r"name = 'O\'Brien'");
        rejects("name = 'unterminated");
    }

    #[test]
    fn bbox_arity() {
        accepts("S_WITHIN(geom, BBOX(0, 0, 1, 1))");
        accepts("S_WITHIN(geom, BBOX(0, 0, 0, 1, 1, 1))");
        // Five values fall out of the BBOX rule, and the function
        // fallback may not shadow the reserved name.
        assert!(crate::parse_text("S_WITHIN(geom, BBOX(0, 0, 1, 1, 1))").is_err());
    }
}
