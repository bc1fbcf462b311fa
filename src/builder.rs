//! Parse tree → typed AST.
//!
//! The parser produces one untyped [Term] tree; each clause of the
//! language then demands a specific kind (boolean, scalar, numeric,
//! character, pattern, temporal, geometry, array), and this module
//! enforces it, canonicalizing operator names on the way.

use crate::{
    parser::Term, temporal, Accenti, AndOrExpression, AndOrOp, ArithmeticExpression, ArithmeticOp,
    ArrayElement, ArrayLiteral, ArrayOp, ArrayPredicate, ArrayTerm, BboxLiteral, BinaryComparison,
    BooleanExpression, Casei, CharacterExpression, ComparisonOp, ComparisonPredicate, DateLiteral,
    Error, Function, FunctionArgument, FunctionRef, GeomExpression, InstantLiteral,
    IntervalEndpoint, IntervalLiteral, IsBetweenPredicate, IsInListPredicate, IsLikePredicate,
    IsNullOperand, IsNullPredicate, NotExpression, NumericExpression, PatternExpression,
    PropertyRef, ScalarExpression, SpatialOp, SpatialPredicate, TemporalExpression, TemporalOp,
    TemporalPredicate, TimestampLiteral,
};

/// Strips explicit parenthesization.
fn ungroup(mut term: Term) -> Term {
    loop {
        match term {
            Term::Grouped(inner) => term = *inner,
            other => return other,
        }
    }
}

fn unexpected(expected: &'static str, term: &Term) -> Error {
    Error::Unexpected {
        expected,
        found: term.describe(),
    }
}

fn check_arity(name: &str, args: &[Term], expected: usize) -> Result<(), Error> {
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

/// True for every name the expression language claims for itself; a
/// user function cannot shadow these.
fn is_reserved(op: &str) -> bool {
    ArithmeticOp::from_str_op(op).is_some()
        || ComparisonOp::from_str_op(op).is_some()
        || crate::operators::is_reserved_function_name(op)
}

/// True for operator names that form a boolean predicate.
fn is_boolean_op(op: &str) -> bool {
    matches!(op, "and" | "or" | "not" | "like" | "between" | "in" | "isNull")
        || ComparisonOp::from_str_op(op).is_some()
        || SpatialOp::from_text(op).is_some()
        || TemporalOp::from_text(op).is_some()
        || ArrayOp::from_text(op).is_some()
}

pub(crate) fn build_boolean(term: Term) -> Result<BooleanExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::Bool(v) => Ok(BooleanExpression::Bool(v)),
        Term::Op { op, args } => build_boolean_op(op, args),
        other => Err(unexpected("a boolean expression", &other)),
    }
}

fn build_boolean_op(op: String, args: Vec<Term>) -> Result<BooleanExpression, Error> {
    match op.as_str() {
        "and" | "or" => {
            let connective = if op == "and" { AndOrOp::And } else { AndOrOp::Or };
            let args = args
                .into_iter()
                .map(build_boolean)
                .collect::<Result<Vec<_>, _>>()?;
            AndOrExpression::new(connective, args).map(BooleanExpression::AndOr)
        }
        "not" => {
            check_arity("not", &args, 1)?;
            let arg = build_boolean(args.into_iter().next().expect("arity checked"))?;
            Ok(BooleanExpression::Not(NotExpression { arg: Box::new(arg) }))
        }
        "like" => {
            check_arity("like", &args, 2)?;
            let mut args = args.into_iter();
            let lhs = build_character(args.next().expect("arity checked"))?;
            let rhs = build_pattern(args.next().expect("arity checked"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::Like(
                IsLikePredicate { args: (lhs, rhs) },
            )))
        }
        "between" => {
            check_arity("between", &args, 3)?;
            let mut args = args.into_iter();
            let operand = build_numeric(args.next().expect("arity checked"))?;
            let low = build_numeric(args.next().expect("arity checked"))?;
            let high = build_numeric(args.next().expect("arity checked"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::Between(
                IsBetweenPredicate {
                    args: (operand, low, high),
                },
            )))
        }
        "in" => {
            check_arity("in", &args, 2)?;
            let mut args = args.into_iter();
            let item = build_scalar(args.next().expect("arity checked"))?;
            let list = match ungroup(args.next().expect("arity checked")) {
                Term::Array(elements) => elements
                    .into_iter()
                    .map(build_scalar)
                    .collect::<Result<Vec<_>, _>>()?,
                single => vec![build_scalar(single)?],
            };
            IsInListPredicate::new(item, list)
                .map(ComparisonPredicate::InList)
                .map(BooleanExpression::Comparison)
        }
        "isNull" => {
            check_arity("is null", &args, 1)?;
            let arg = build_is_null_operand(args.into_iter().next().expect("arity checked"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::IsNull(
                IsNullPredicate { arg },
            )))
        }
        _ => {
            if let Some(op) = ComparisonOp::from_str_op(&op) {
                check_arity(op.as_str(), &args, 2)?;
                let mut args = args.into_iter();
                let lhs = build_scalar(args.next().expect("arity checked"))?;
                let rhs = build_scalar(args.next().expect("arity checked"))?;
                Ok(BooleanExpression::Comparison(ComparisonPredicate::Binary(
                    BinaryComparison {
                        op,
                        args: (lhs, rhs),
                    },
                )))
            } else if let Some(op) = SpatialOp::from_text(&op) {
                check_arity(op.as_str(), &args, 2)?;
                let mut args = args.into_iter();
                let lhs = build_geom(args.next().expect("arity checked"))?;
                let rhs = build_geom(args.next().expect("arity checked"))?;
                Ok(BooleanExpression::Spatial(SpatialPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else if let Some(op) = TemporalOp::from_text(&op) {
                check_arity(op.as_str(), &args, 2)?;
                let mut args = args.into_iter();
                let lhs = build_temporal(args.next().expect("arity checked"))?;
                let rhs = build_temporal(args.next().expect("arity checked"))?;
                Ok(BooleanExpression::Temporal(TemporalPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else if let Some(op) = ArrayOp::from_text(&op) {
                check_arity(op.as_str(), &args, 2)?;
                let mut args = args.into_iter();
                let lhs = build_array_term(args.next().expect("arity checked"))?;
                let rhs = build_array_term(args.next().expect("arity checked"))?;
                Ok(BooleanExpression::Array(ArrayPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else {
                build_function_ref(op, args).map(BooleanExpression::Function)
            }
        }
    }
}

fn build_scalar(term: Term) -> Result<ScalarExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::Bool(v) => Ok(ScalarExpression::Bool(v)),
        Term::Number(n) => Ok(ScalarExpression::Number(n)),
        Term::String(s) => Ok(ScalarExpression::String(s)),
        Term::Date(inner) => build_date(*inner).map(|date| {
            ScalarExpression::Instant(InstantLiteral::Date(date))
        }),
        Term::Timestamp(inner) => build_timestamp(*inner).map(|timestamp| {
            ScalarExpression::Instant(InstantLiteral::Timestamp(timestamp))
        }),
        Term::Property(property) => Ok(ScalarExpression::Property(PropertyRef { property })),
        Term::Op { op, args } => {
            if let Some(op) = ArithmeticOp::from_str_op(&op) {
                build_arithmetic(op, args).map(|a| ScalarExpression::Arithmetic(Box::new(a)))
            } else if op.eq_ignore_ascii_case("casei") {
                check_arity("casei", &args, 1)?;
                let inner = build_character(args.into_iter().next().expect("arity checked"))?;
                Ok(ScalarExpression::Casei(Casei {
                    casei: Box::new(inner),
                }))
            } else if op.eq_ignore_ascii_case("accenti") {
                check_arity("accenti", &args, 1)?;
                let inner = build_character(args.into_iter().next().expect("arity checked"))?;
                Ok(ScalarExpression::Accenti(Accenti {
                    accenti: Box::new(inner),
                }))
            } else {
                build_function_ref(op, args).map(ScalarExpression::Function)
            }
        }
        other => Err(unexpected("a scalar expression", &other)),
    }
}

fn build_numeric(term: Term) -> Result<NumericExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::Number(n) => Ok(NumericExpression::Number(n)),
        Term::Property(property) => Ok(NumericExpression::Property(PropertyRef { property })),
        Term::Op { op, args } => {
            if let Some(op) = ArithmeticOp::from_str_op(&op) {
                build_arithmetic(op, args).map(|a| NumericExpression::Arithmetic(Box::new(a)))
            } else {
                build_function_ref(op, args).map(NumericExpression::Function)
            }
        }
        other => Err(unexpected("a numeric expression", &other)),
    }
}

fn build_arithmetic(
    op: ArithmeticOp,
    args: Vec<Term>,
) -> Result<ArithmeticExpression, Error> {
    check_arity(op.as_str(), &args, 2)?;
    let mut args = args.into_iter();
    let lhs = build_numeric(args.next().expect("arity checked"))?;
    let rhs = build_numeric(args.next().expect("arity checked"))?;
    Ok(ArithmeticExpression {
        op,
        args: (lhs, rhs),
    })
}

fn build_character(term: Term) -> Result<CharacterExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::String(s) => Ok(CharacterExpression::Literal(s)),
        Term::Property(property) => Ok(CharacterExpression::Property(PropertyRef { property })),
        Term::Op { op, args } => {
            if op.eq_ignore_ascii_case("casei") {
                check_arity("casei", &args, 1)?;
                let inner = build_character(args.into_iter().next().expect("arity checked"))?;
                Ok(CharacterExpression::Casei(Casei {
                    casei: Box::new(inner),
                }))
            } else if op.eq_ignore_ascii_case("accenti") {
                check_arity("accenti", &args, 1)?;
                let inner = build_character(args.into_iter().next().expect("arity checked"))?;
                Ok(CharacterExpression::Accenti(Accenti {
                    accenti: Box::new(inner),
                }))
            } else {
                build_function_ref(op, args).map(CharacterExpression::Function)
            }
        }
        other => Err(unexpected("a character expression", &other)),
    }
}

/// A pattern is a character literal or a case/accent wrapper; bare
/// properties and functions are not allowed on the right of LIKE.
fn build_pattern(term: Term) -> Result<PatternExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::String(s) => Ok(PatternExpression::Literal(s)),
        Term::Op { op, args } if op.eq_ignore_ascii_case("casei") => {
            check_arity("casei", &args, 1)?;
            let inner = build_pattern(args.into_iter().next().expect("arity checked"))?;
            Ok(PatternExpression::Casei(Casei {
                casei: Box::new(inner),
            }))
        }
        Term::Op { op, args } if op.eq_ignore_ascii_case("accenti") => {
            check_arity("accenti", &args, 1)?;
            let inner = build_pattern(args.into_iter().next().expect("arity checked"))?;
            Ok(PatternExpression::Accenti(Accenti {
                accenti: Box::new(inner),
            }))
        }
        other => Err(unexpected("a pattern", &other)),
    }
}

fn build_temporal(term: Term) -> Result<TemporalExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::Date(inner) => {
            build_date(*inner).map(|date| TemporalExpression::Instant(InstantLiteral::Date(date)))
        }
        Term::Timestamp(inner) => build_timestamp(*inner)
            .map(|timestamp| TemporalExpression::Instant(InstantLiteral::Timestamp(timestamp))),
        Term::Interval(args) => build_interval(args).map(TemporalExpression::Interval),
        Term::Property(property) => Ok(TemporalExpression::Property(PropertyRef { property })),
        Term::Op { op, args } => {
            build_function_ref(op, args).map(TemporalExpression::Function)
        }
        other => Err(unexpected("a temporal expression", &other)),
    }
}

fn build_date(term: Term) -> Result<DateLiteral, Error> {
    match ungroup(term) {
        Term::String(s) => temporal::parse_date(&s).map(|date| DateLiteral { date }),
        other => Err(unexpected("a date string", &other)),
    }
}

fn build_timestamp(term: Term) -> Result<TimestampLiteral, Error> {
    match ungroup(term) {
        Term::String(s) => {
            temporal::parse_timestamp(&s).map(|timestamp| TimestampLiteral { timestamp })
        }
        other => Err(unexpected("a timestamp string", &other)),
    }
}

fn build_interval(args: Vec<Term>) -> Result<IntervalLiteral, Error> {
    let mut args = args.into_iter();
    let start = build_endpoint(args.next().expect("the parser checked the arity"))?;
    let end = build_endpoint(args.next().expect("the parser checked the arity"))?;
    Ok(IntervalLiteral {
        interval: (start, end),
    })
}

fn build_endpoint(term: Term) -> Result<IntervalEndpoint, Error> {
    let term = ungroup(term);
    match term {
        Term::String(s) => temporal::parse_endpoint(&s),
        Term::Property(property) => Ok(IntervalEndpoint::Property(PropertyRef { property })),
        Term::Op { op, args } => build_function_ref(op, args).map(IntervalEndpoint::Function),
        other => Err(unexpected("an interval endpoint", &other)),
    }
}

fn build_geom(term: Term) -> Result<GeomExpression, Error> {
    let term = ungroup(term);
    match term {
        Term::Geometry(geometry) => Ok(GeomExpression::Geometry(geometry)),
        Term::Bbox(values) => BboxLiteral::new(values).map(GeomExpression::Bbox),
        Term::Property(property) => Ok(GeomExpression::Property(PropertyRef { property })),
        Term::Op { op, args } => build_function_ref(op, args).map(GeomExpression::Function),
        other => Err(unexpected("a geometry expression", &other)),
    }
}

fn build_array_term(term: Term) -> Result<ArrayTerm, Error> {
    match term {
        Term::Array(elements) => build_array_literal(elements).map(ArrayTerm::Array),
        Term::Property(property) => Ok(ArrayTerm::Property(PropertyRef { property })),
        Term::Op { op, args } if !is_reserved(&op) => {
            build_function_ref(op, args).map(ArrayTerm::Function)
        }
        // A parenthesized single expression in array position is a
        // one-element array, unless it is itself a reference.
        Term::Grouped(inner) => match ungroup(*inner) {
            Term::Array(elements) => build_array_literal(elements).map(ArrayTerm::Array),
            Term::Property(property) => Ok(ArrayTerm::Property(PropertyRef { property })),
            Term::Op { op, args } if !is_reserved(&op) => {
                build_function_ref(op, args).map(ArrayTerm::Function)
            }
            single => build_array_element(single)
                .map(|element| ArrayTerm::Array(ArrayLiteral(vec![element]))),
        },
        other => Err(unexpected("an array", &other)),
    }
}

fn build_array_literal(elements: Vec<Term>) -> Result<ArrayLiteral, Error> {
    elements
        .into_iter()
        .map(build_array_element)
        .collect::<Result<Vec<_>, _>>()
        .map(ArrayLiteral)
}

fn build_array_element(term: Term) -> Result<ArrayElement, Error> {
    let term = ungroup(term);
    match term {
        Term::Interval(args) => build_interval(args).map(ArrayElement::Interval),
        Term::Geometry(geometry) => Ok(ArrayElement::Geometry(geometry)),
        Term::Bbox(values) => BboxLiteral::new(values).map(ArrayElement::Bbox),
        Term::Array(elements) => build_array_literal(elements).map(ArrayElement::Array),
        other => build_scalar(other).map(ArrayElement::Scalar),
    }
}

fn build_is_null_operand(term: Term) -> Result<IsNullOperand, Error> {
    let term = ungroup(term);
    match term {
        Term::Interval(args) => build_interval(args).map(IsNullOperand::Interval),
        Term::Geometry(geometry) => Ok(IsNullOperand::Geometry(geometry)),
        Term::Bbox(values) => BboxLiteral::new(values).map(IsNullOperand::Bbox),
        other => build_scalar(other).map(IsNullOperand::Scalar),
    }
}

fn build_function_ref(name: String, args: Vec<Term>) -> Result<FunctionRef, Error> {
    if is_reserved(&name) {
        return Err(Error::Unexpected {
            expected: "a function",
            found: format!("operation `{name}`"),
        });
    }
    let args = if args.is_empty() {
        None
    } else {
        Some(
            args.into_iter()
                .map(build_function_argument)
                .collect::<Result<Vec<_>, _>>()?,
        )
    };
    Ok(FunctionRef {
        function: Function { name, args },
    })
}

fn build_function_argument(term: Term) -> Result<FunctionArgument, Error> {
    let is_predicate = matches!(&term, Term::Op { op, .. } if is_boolean_op(op));
    if is_predicate {
        build_boolean(term).map(|b| FunctionArgument::Predicate(Box::new(b)))
    } else {
        build_array_element(term).map(FunctionArgument::Element)
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_text, BooleanExpression, Error};

    #[test]
    fn boolean_position_is_typed() {
        assert!(matches!(
            parse_text("\"prop\"").unwrap_err(),
            Error::Unexpected { .. }
        ));
        assert!(matches!(
            parse_text("1 AND 2").unwrap_err(),
            Error::Unexpected { .. }
        ));
    }

    #[test]
    fn boolean_function_is_accepted() {
        let expr = parse_text("hasWings(\"bird\")").unwrap();
        assert!(matches!(expr, BooleanExpression::Function(_)));
    }

    #[test]
    fn patterns_may_not_be_properties() {
        assert!(parse_text("name LIKE pattern_prop").is_err());
        assert!(parse_text("name LIKE CASEI('smith%')").is_ok());
    }

    #[test]
    fn between_is_numeric() {
        assert!(parse_text("depth BETWEEN 100.0 AND 150.0").is_ok());
        assert!(parse_text("depth BETWEEN 'a' AND 'b'").is_err());
    }

    #[test]
    fn interval_arity() {
        assert!(parse_text("T_DURING(t, INTERVAL('2020-01-01', '..'))").is_ok());
        assert!(parse_text("T_DURING(t, INTERVAL('2020-01-01'))").is_err());
    }
}
