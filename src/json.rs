//! The cql2-json codec.
//!
//! Decoding is a strict recursive dispatch over [serde_json::Value]:
//! the variant is chosen by the `op` key or by a single discriminating
//! key, the `args` shape must match exactly, and no type coercions are
//! performed. Failures carry the path of the offending value.
//! Encoding is the inverse; the shapes serde's derive cannot express
//! (constant `op` fields, interval endpoints) are implemented by hand
//! here.

use crate::{
    temporal, Accenti, AndOrExpression, AndOrOp, ArithmeticExpression, ArithmeticOp, ArrayElement,
    ArrayLiteral, ArrayOp, ArrayPredicate, ArrayTerm, BboxLiteral, BinaryComparison,
    BooleanExpression, Casei, CharacterExpression, ComparisonOp, ComparisonPredicate, DateLiteral,
    Function, FunctionArgument, FunctionRef, GeomExpression, InstantLiteral, IntervalEndpoint,
    IntervalLiteral, IsBetweenPredicate, IsInListPredicate, IsLikePredicate, IsNullOperand,
    IsNullPredicate, NotExpression, NumericExpression, PatternExpression, PropertyRef,
    ScalarExpression, SpatialOp, SpatialPredicate, TemporalExpression, TemporalOp,
    TemporalPredicate, TimestampLiteral, ValidationError,
};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use tracing::debug;

type Result<T> = std::result::Result<T, ValidationError>;

/// Decodes a JSON value into a CQL2 expression.
pub(crate) fn decode(value: &Value) -> Result<BooleanExpression> {
    debug!("decoding cql2-json");
    decode_boolean(value, "$")
}

fn error(path: &str, message: impl Into<String>) -> ValidationError {
    ValidationError::new(path, message)
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Rejects any key outside the allowed set.
fn expect_keys(map: &Map<String, Value>, path: &str, keys: &[&str]) -> Result<()> {
    for key in map.keys() {
        if !keys.contains(&key.as_str()) {
            return Err(error(path, format!("unexpected key `{key}`")));
        }
    }
    Ok(())
}

/// Pulls `op` (a string) and `args` out of an operation object,
/// rejecting anything else.
fn op_args<'a>(map: &'a Map<String, Value>, path: &str) -> Result<(&'a str, &'a Value)> {
    expect_keys(map, path, &["op", "args"])?;
    let op = map
        .get("op")
        .ok_or_else(|| error(path, "missing key `op`"))?;
    let op = op
        .as_str()
        .ok_or_else(|| error(path, format!("`op` must be a string, found {}", type_name(op))))?;
    let args = map
        .get("args")
        .ok_or_else(|| error(path, "missing key `args`"))?;
    Ok((op, args))
}

fn args_array<'a>(args: &'a Value, path: &str, op: &str, arity: usize) -> Result<&'a [Value]> {
    let args = args.as_array().ok_or_else(|| {
        error(
            &format!("{path}.args"),
            format!("`args` must be an array, found {}", type_name(args)),
        )
    })?;
    if args.len() != arity {
        return Err(error(
            &format!("{path}.args"),
            format!("`{op}` takes {arity} arguments, found {}", args.len()),
        ));
    }
    Ok(args)
}

fn is_boolean_op(op: &str) -> bool {
    matches!(op, "and" | "or" | "not" | "like" | "between" | "in" | "isNull")
        || ComparisonOp::from_str_op(op).is_some()
        || SpatialOp::from_json_op(op).is_some()
        || TemporalOp::from_json_op(op).is_some()
        || ArrayOp::from_json_op(op).is_some()
}

fn decode_boolean(value: &Value, path: &str) -> Result<BooleanExpression> {
    match value {
        Value::Bool(v) => Ok(BooleanExpression::Bool(*v)),
        Value::Object(map) => {
            if map.contains_key("op") {
                decode_boolean_op(map, path)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(BooleanExpression::Function)
            } else if map.contains_key("property") {
                Err(error(
                    path,
                    "a property reference is not a boolean expression",
                ))
            } else {
                Err(error(path, "expected a boolean expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a boolean expression, found {}", type_name(other)),
        )),
    }
}

fn decode_boolean_op(map: &Map<String, Value>, path: &str) -> Result<BooleanExpression> {
    let (op, args) = op_args(map, path)?;
    match op {
        "and" | "or" => {
            let connective = if op == "and" { AndOrOp::And } else { AndOrOp::Or };
            let args = args.as_array().ok_or_else(|| {
                error(
                    &format!("{path}.args"),
                    format!("`args` must be an array, found {}", type_name(args)),
                )
            })?;
            if args.len() < 2 {
                return Err(error(
                    &format!("{path}.args"),
                    format!("`{op}` takes at least 2 arguments, found {}", args.len()),
                ));
            }
            let args = args
                .iter()
                .enumerate()
                .map(|(i, arg)| decode_boolean(arg, &format!("{path}.args[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            AndOrExpression::new(connective, args)
                .map(BooleanExpression::AndOr)
                .map_err(|err| error(path, err.to_string()))
        }
        "not" => {
            let args = args_array(args, path, op, 1)?;
            let arg = decode_boolean(&args[0], &format!("{path}.args[0]"))?;
            Ok(BooleanExpression::Not(NotExpression { arg: Box::new(arg) }))
        }
        "like" => {
            let args = args_array(args, path, op, 2)?;
            let lhs = decode_character(&args[0], &format!("{path}.args[0]"))?;
            let rhs = decode_pattern(&args[1], &format!("{path}.args[1]"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::Like(
                IsLikePredicate { args: (lhs, rhs) },
            )))
        }
        "between" => {
            let args = args_array(args, path, op, 3)?;
            let operand = decode_numeric(&args[0], &format!("{path}.args[0]"))?;
            let low = decode_numeric(&args[1], &format!("{path}.args[1]"))?;
            let high = decode_numeric(&args[2], &format!("{path}.args[2]"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::Between(
                IsBetweenPredicate {
                    args: (operand, low, high),
                },
            )))
        }
        "in" => {
            let args = args_array(args, path, op, 2)?;
            let item = decode_scalar(&args[0], &format!("{path}.args[0]"))?;
            let list_path = format!("{path}.args[1]");
            let list = args[1].as_array().ok_or_else(|| {
                error(
                    &list_path,
                    format!("`in` list must be an array, found {}", type_name(&args[1])),
                )
            })?;
            if list.is_empty() {
                return Err(error(&list_path, "`in` list must not be empty"));
            }
            let list = list
                .iter()
                .enumerate()
                .map(|(i, value)| decode_scalar(value, &format!("{list_path}[{i}]")))
                .collect::<Result<Vec<_>>>()?;
            IsInListPredicate::new(item, list)
                .map(ComparisonPredicate::InList)
                .map(BooleanExpression::Comparison)
                .map_err(|err| error(path, err.to_string()))
        }
        "isNull" => {
            let arg = decode_is_null_operand(args, &format!("{path}.args"))?;
            Ok(BooleanExpression::Comparison(ComparisonPredicate::IsNull(
                IsNullPredicate { arg },
            )))
        }
        _ => {
            if let Some(op) = ComparisonOp::from_str_op(op) {
                let args = args_array(args, path, op.as_str(), 2)?;
                let lhs = decode_scalar(&args[0], &format!("{path}.args[0]"))?;
                let rhs = decode_scalar(&args[1], &format!("{path}.args[1]"))?;
                Ok(BooleanExpression::Comparison(ComparisonPredicate::Binary(
                    BinaryComparison {
                        op,
                        args: (lhs, rhs),
                    },
                )))
            } else if let Some(op) = SpatialOp::from_json_op(op) {
                let args = args_array(args, path, op.as_str(), 2)?;
                let lhs = decode_geom(&args[0], &format!("{path}.args[0]"))?;
                let rhs = decode_geom(&args[1], &format!("{path}.args[1]"))?;
                Ok(BooleanExpression::Spatial(SpatialPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else if let Some(op) = TemporalOp::from_json_op(op) {
                let args = args_array(args, path, op.as_str(), 2)?;
                let lhs = decode_temporal(&args[0], &format!("{path}.args[0]"))?;
                let rhs = decode_temporal(&args[1], &format!("{path}.args[1]"))?;
                Ok(BooleanExpression::Temporal(TemporalPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else if let Some(op) = ArrayOp::from_json_op(op) {
                let args = args_array(args, path, op.as_str(), 2)?;
                let lhs = decode_array_term(&args[0], &format!("{path}.args[0]"))?;
                let rhs = decode_array_term(&args[1], &format!("{path}.args[1]"))?;
                Ok(BooleanExpression::Array(ArrayPredicate {
                    op,
                    args: (lhs, rhs),
                }))
            } else if ArithmeticOp::from_str_op(op).is_some() {
                Err(error(
                    path,
                    format!("operator `{op}` is not a boolean operator"),
                ))
            } else {
                Err(error(path, format!("unknown operator `{op}`")))
            }
        }
    }
}

fn decode_scalar(value: &Value, path: &str) -> Result<ScalarExpression> {
    match value {
        Value::Bool(v) => Ok(ScalarExpression::Bool(*v)),
        Value::Number(n) => Ok(ScalarExpression::Number(n.clone())),
        Value::String(s) => Ok(ScalarExpression::String(s.clone())),
        Value::Object(map) => {
            if map.contains_key("op") {
                let (op, args) = op_args(map, path)?;
                if let Some(op) = ArithmeticOp::from_str_op(op) {
                    decode_arithmetic(op, args, path)
                        .map(|a| ScalarExpression::Arithmetic(Box::new(a)))
                } else if is_boolean_op(op) {
                    Err(error(
                        path,
                        format!("predicate `{op}` is not a scalar expression"),
                    ))
                } else {
                    Err(error(path, format!("unknown operator `{op}`")))
                }
            } else if map.contains_key("casei") {
                expect_keys(map, path, &["casei"])?;
                let inner = decode_character(&map["casei"], &format!("{path}.casei"))?;
                Ok(ScalarExpression::Casei(Casei {
                    casei: Box::new(inner),
                }))
            } else if map.contains_key("accenti") {
                expect_keys(map, path, &["accenti"])?;
                let inner = decode_character(&map["accenti"], &format!("{path}.accenti"))?;
                Ok(ScalarExpression::Accenti(Accenti {
                    accenti: Box::new(inner),
                }))
            } else if map.contains_key("date") {
                decode_date(map, path).map(|d| ScalarExpression::Instant(InstantLiteral::Date(d)))
            } else if map.contains_key("timestamp") {
                decode_timestamp(map, path)
                    .map(|t| ScalarExpression::Instant(InstantLiteral::Timestamp(t)))
            } else if map.contains_key("property") {
                decode_property(map, path).map(ScalarExpression::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(ScalarExpression::Function)
            } else {
                Err(error(path, "expected a scalar expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a scalar expression, found {}", type_name(other)),
        )),
    }
}

fn decode_numeric(value: &Value, path: &str) -> Result<NumericExpression> {
    match value {
        Value::Number(n) => Ok(NumericExpression::Number(n.clone())),
        Value::Object(map) => {
            if map.contains_key("op") {
                let (op, args) = op_args(map, path)?;
                if let Some(op) = ArithmeticOp::from_str_op(op) {
                    decode_arithmetic(op, args, path)
                        .map(|a| NumericExpression::Arithmetic(Box::new(a)))
                } else {
                    Err(error(
                        path,
                        format!("operator `{op}` is not an arithmetic operator"),
                    ))
                }
            } else if map.contains_key("property") {
                decode_property(map, path).map(NumericExpression::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(NumericExpression::Function)
            } else {
                Err(error(path, "expected a numeric expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a number, found {}", type_name(other)),
        )),
    }
}

fn decode_arithmetic(op: ArithmeticOp, args: &Value, path: &str) -> Result<ArithmeticExpression> {
    let args = args_array(args, path, op.as_str(), 2)?;
    let lhs = decode_numeric(&args[0], &format!("{path}.args[0]"))?;
    let rhs = decode_numeric(&args[1], &format!("{path}.args[1]"))?;
    Ok(ArithmeticExpression {
        op,
        args: (lhs, rhs),
    })
}

fn decode_character(value: &Value, path: &str) -> Result<CharacterExpression> {
    match value {
        Value::String(s) => Ok(CharacterExpression::Literal(s.clone())),
        Value::Object(map) => {
            if map.contains_key("casei") {
                expect_keys(map, path, &["casei"])?;
                let inner = decode_character(&map["casei"], &format!("{path}.casei"))?;
                Ok(CharacterExpression::Casei(Casei {
                    casei: Box::new(inner),
                }))
            } else if map.contains_key("accenti") {
                expect_keys(map, path, &["accenti"])?;
                let inner = decode_character(&map["accenti"], &format!("{path}.accenti"))?;
                Ok(CharacterExpression::Accenti(Accenti {
                    accenti: Box::new(inner),
                }))
            } else if map.contains_key("property") {
                decode_property(map, path).map(CharacterExpression::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(CharacterExpression::Function)
            } else {
                Err(error(path, "expected a character expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a string, found {}", type_name(other)),
        )),
    }
}

/// Patterns admit strings and case/accent wrappers only.
fn decode_pattern(value: &Value, path: &str) -> Result<PatternExpression> {
    match value {
        Value::String(s) => Ok(PatternExpression::Literal(s.clone())),
        Value::Object(map) => {
            if map.contains_key("casei") {
                expect_keys(map, path, &["casei"])?;
                let inner = decode_pattern(&map["casei"], &format!("{path}.casei"))?;
                Ok(PatternExpression::Casei(Casei {
                    casei: Box::new(inner),
                }))
            } else if map.contains_key("accenti") {
                expect_keys(map, path, &["accenti"])?;
                let inner = decode_pattern(&map["accenti"], &format!("{path}.accenti"))?;
                Ok(PatternExpression::Accenti(Accenti {
                    accenti: Box::new(inner),
                }))
            } else {
                Err(error(path, "expected a pattern"))
            }
        }
        other => Err(error(
            path,
            format!("expected a pattern, found {}", type_name(other)),
        )),
    }
}

fn decode_temporal(value: &Value, path: &str) -> Result<TemporalExpression> {
    match value {
        Value::Object(map) => {
            if map.contains_key("date") {
                decode_date(map, path).map(|d| TemporalExpression::Instant(InstantLiteral::Date(d)))
            } else if map.contains_key("timestamp") {
                decode_timestamp(map, path)
                    .map(|t| TemporalExpression::Instant(InstantLiteral::Timestamp(t)))
            } else if map.contains_key("interval") {
                decode_interval(map, path).map(TemporalExpression::Interval)
            } else if map.contains_key("property") {
                decode_property(map, path).map(TemporalExpression::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(TemporalExpression::Function)
            } else {
                Err(error(path, "expected a temporal expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a temporal expression, found {}", type_name(other)),
        )),
    }
}

fn decode_date(map: &Map<String, Value>, path: &str) -> Result<DateLiteral> {
    expect_keys(map, path, &["date"])?;
    let date_path = format!("{path}.date");
    let s = map["date"].as_str().ok_or_else(|| {
        error(
            &date_path,
            format!("`date` must be a string, found {}", type_name(&map["date"])),
        )
    })?;
    temporal::parse_date(s)
        .map(|date| DateLiteral { date })
        .map_err(|err| error(&date_path, err.to_string()))
}

fn decode_timestamp(map: &Map<String, Value>, path: &str) -> Result<TimestampLiteral> {
    expect_keys(map, path, &["timestamp"])?;
    let timestamp_path = format!("{path}.timestamp");
    let s = map["timestamp"].as_str().ok_or_else(|| {
        error(
            &timestamp_path,
            format!(
                "`timestamp` must be a string, found {}",
                type_name(&map["timestamp"])
            ),
        )
    })?;
    temporal::parse_timestamp(s)
        .map(|timestamp| TimestampLiteral { timestamp })
        .map_err(|err| error(&timestamp_path, err.to_string()))
}

fn decode_interval(map: &Map<String, Value>, path: &str) -> Result<IntervalLiteral> {
    expect_keys(map, path, &["interval"])?;
    let interval_path = format!("{path}.interval");
    let endpoints = map["interval"].as_array().ok_or_else(|| {
        error(
            &interval_path,
            format!(
                "`interval` must be an array, found {}",
                type_name(&map["interval"])
            ),
        )
    })?;
    if endpoints.len() != 2 {
        return Err(error(
            &interval_path,
            format!("an interval has 2 endpoints, found {}", endpoints.len()),
        ));
    }
    let start = decode_endpoint(&endpoints[0], &format!("{interval_path}[0]"))?;
    let end = decode_endpoint(&endpoints[1], &format!("{interval_path}[1]"))?;
    Ok(IntervalLiteral {
        interval: (start, end),
    })
}

fn decode_endpoint(value: &Value, path: &str) -> Result<IntervalEndpoint> {
    match value {
        Value::String(s) => {
            temporal::parse_endpoint(s).map_err(|err| error(path, err.to_string()))
        }
        Value::Object(map) => {
            if map.contains_key("property") {
                decode_property(map, path).map(IntervalEndpoint::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(IntervalEndpoint::Function)
            } else {
                Err(error(path, "expected an interval endpoint"))
            }
        }
        other => Err(error(
            path,
            format!("expected an interval endpoint, found {}", type_name(other)),
        )),
    }
}

fn decode_geom(value: &Value, path: &str) -> Result<GeomExpression> {
    match value {
        Value::Object(map) => {
            if map.contains_key("type") {
                decode_geometry(value, path).map(GeomExpression::Geometry)
            } else if map.contains_key("bbox") {
                decode_bbox(map, path).map(GeomExpression::Bbox)
            } else if map.contains_key("property") {
                decode_property(map, path).map(GeomExpression::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(GeomExpression::Function)
            } else {
                Err(error(path, "expected a geometry expression"))
            }
        }
        other => Err(error(
            path,
            format!("expected a geometry expression, found {}", type_name(other)),
        )),
    }
}

/// GeoJSON validation is delegated to the geometry collaborator.
fn decode_geometry(value: &Value, path: &str) -> Result<geojson::Geometry> {
    serde_json::from_value(value.clone())
        .map_err(|err| error(path, format!("invalid GeoJSON geometry: {err}")))
}

fn decode_bbox(map: &Map<String, Value>, path: &str) -> Result<BboxLiteral> {
    expect_keys(map, path, &["bbox"])?;
    let bbox_path = format!("{path}.bbox");
    let values = map["bbox"].as_array().ok_or_else(|| {
        error(
            &bbox_path,
            format!("`bbox` must be an array, found {}", type_name(&map["bbox"])),
        )
    })?;
    let values = values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            value.as_number().cloned().ok_or_else(|| {
                error(
                    &format!("{bbox_path}[{i}]"),
                    format!("expected a number, found {}", type_name(value)),
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;
    BboxLiteral::new(values).map_err(|err| error(&bbox_path, err.to_string()))
}

fn decode_array_term(value: &Value, path: &str) -> Result<ArrayTerm> {
    match value {
        Value::Array(_) => decode_array_literal(value, path).map(ArrayTerm::Array),
        Value::Object(map) => {
            if map.contains_key("property") {
                decode_property(map, path).map(ArrayTerm::Property)
            } else if map.contains_key("function") {
                decode_function_ref(value, path).map(ArrayTerm::Function)
            } else {
                Err(error(path, "expected an array"))
            }
        }
        other => Err(error(
            path,
            format!("expected an array, found {}", type_name(other)),
        )),
    }
}

fn decode_array_literal(value: &Value, path: &str) -> Result<ArrayLiteral> {
    let elements = value
        .as_array()
        .expect("decode_array_literal is only called on arrays");
    elements
        .iter()
        .enumerate()
        .map(|(i, element)| decode_array_element(element, &format!("{path}[{i}]")))
        .collect::<Result<Vec<_>>>()
        .map(ArrayLiteral)
}

fn decode_array_element(value: &Value, path: &str) -> Result<ArrayElement> {
    match value {
        Value::Array(_) => decode_array_literal(value, path).map(ArrayElement::Array),
        Value::Object(map) => {
            if map.contains_key("type") {
                decode_geometry(value, path).map(ArrayElement::Geometry)
            } else if map.contains_key("bbox") {
                decode_bbox(map, path).map(ArrayElement::Bbox)
            } else if map.contains_key("interval") {
                decode_interval(map, path).map(ArrayElement::Interval)
            } else {
                decode_scalar(value, path).map(ArrayElement::Scalar)
            }
        }
        _ => decode_scalar(value, path).map(ArrayElement::Scalar),
    }
}

fn decode_is_null_operand(value: &Value, path: &str) -> Result<IsNullOperand> {
    match value {
        Value::Object(map) => {
            if map.contains_key("type") {
                decode_geometry(value, path).map(IsNullOperand::Geometry)
            } else if map.contains_key("bbox") {
                decode_bbox(map, path).map(IsNullOperand::Bbox)
            } else if map.contains_key("interval") {
                decode_interval(map, path).map(IsNullOperand::Interval)
            } else {
                decode_scalar(value, path).map(IsNullOperand::Scalar)
            }
        }
        _ => decode_scalar(value, path).map(IsNullOperand::Scalar),
    }
}

fn decode_property(map: &Map<String, Value>, path: &str) -> Result<PropertyRef> {
    expect_keys(map, path, &["property"])?;
    let property_path = format!("{path}.property");
    let property = map["property"].as_str().ok_or_else(|| {
        error(
            &property_path,
            format!(
                "`property` must be a string, found {}",
                type_name(&map["property"])
            ),
        )
    })?;
    if property.is_empty() {
        return Err(error(&property_path, "property name must not be empty"));
    }
    Ok(PropertyRef {
        property: property.to_string(),
    })
}

fn decode_function_ref(value: &Value, path: &str) -> Result<FunctionRef> {
    let map = value
        .as_object()
        .expect("decode_function_ref is only called on objects");
    expect_keys(map, path, &["function"])?;
    let function_path = format!("{path}.function");
    let function = map["function"].as_object().ok_or_else(|| {
        error(
            &function_path,
            format!(
                "`function` must be an object, found {}",
                type_name(&map["function"])
            ),
        )
    })?;
    expect_keys(function, &function_path, &["name", "args"])?;
    let name = function
        .get("name")
        .ok_or_else(|| error(&function_path, "missing key `name`"))?;
    let name = name.as_str().ok_or_else(|| {
        error(
            &format!("{function_path}.name"),
            format!("`name` must be a string, found {}", type_name(name)),
        )
    })?;
    if crate::operators::is_reserved_function_name(name) {
        return Err(error(
            &format!("{function_path}.name"),
            format!("`{name}` is a reserved name"),
        ));
    }
    let args = match function.get("args") {
        None => None,
        Some(args) => {
            let args_path = format!("{function_path}.args");
            let args = args.as_array().ok_or_else(|| {
                error(
                    &args_path,
                    format!("`args` must be an array, found {}", type_name(args)),
                )
            })?;
            Some(
                args.iter()
                    .enumerate()
                    .map(|(i, arg)| decode_function_argument(arg, &format!("{args_path}[{i}]")))
                    .collect::<Result<Vec<_>>>()?,
            )
        }
    };
    Ok(FunctionRef {
        function: Function {
            name: name.to_string(),
            args,
        },
    })
}

fn decode_function_argument(value: &Value, path: &str) -> Result<FunctionArgument> {
    if let Value::Object(map) = value {
        if let Some(op) = map.get("op").and_then(Value::as_str) {
            if is_boolean_op(op) {
                return decode_boolean(value, path)
                    .map(|b| FunctionArgument::Predicate(Box::new(b)));
            }
        }
    }
    decode_array_element(value, path).map(FunctionArgument::Element)
}

impl Serialize for NotExpression {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("op", "not")?;
        map.serialize_entry("args", &[&self.arg])?;
        map.end()
    }
}

impl Serialize for IsLikePredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("op", "like")?;
        map.serialize_entry("args", &self.args)?;
        map.end()
    }
}

impl Serialize for IsBetweenPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("op", "between")?;
        map.serialize_entry("args", &self.args)?;
        map.end()
    }
}

impl Serialize for IsInListPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("op", "in")?;
        map.serialize_entry("args", &(self.item(), self.list()))?;
        map.end()
    }
}

impl Serialize for IsNullPredicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("op", "isNull")?;
        map.serialize_entry("args", &self.arg)?;
        map.end()
    }
}

impl Serialize for IntervalEndpoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            IntervalEndpoint::Timestamp(timestamp) => timestamp.serialize(serializer),
            IntervalEndpoint::Date(date) => date.serialize(serializer),
            IntervalEndpoint::Open => serializer.serialize_str(".."),
            IntervalEndpoint::Property(property) => property.serialize(serializer),
            IntervalEndpoint::Function(function) => function.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{parse_json, BooleanExpression, ValidationError};
    use serde_json::json;

    fn decode(value: serde_json::Value) -> BooleanExpression {
        crate::from_json_value(&value).unwrap()
    }

    fn decode_err(value: serde_json::Value) -> ValidationError {
        match crate::from_json_value(&value).unwrap_err() {
            crate::Error::Validation(err) => err,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn roundtrip_comparison() {
        let value = json!({"op": "=", "args": [{"property": "city"}, "Toronto"]});
        let expr = decode(value.clone());
        assert_eq!(expr.to_value().unwrap(), value);
        assert_eq!(expr.to_text().unwrap(), "\"city\" = 'Toronto'");
    }

    #[test]
    fn strict_typing_bool_vs_number() {
        let err = decode_err(json!({
            "op": "between",
            "args": [{"property": "depth"}, true, 150.0],
        }));
        assert_eq!(err.path, "$.args[1]");
        assert!(err.message.contains("expected a number"));
    }

    #[test]
    fn strict_typing_number_vs_string() {
        let err = decode_err(json!({
            "op": "like",
            "args": [{"property": "name"}, 42],
        }));
        assert_eq!(err.path, "$.args[1]");
    }

    #[test]
    fn unknown_operator() {
        let err = decode_err(json!({"op": "frobnicate", "args": [true, true]}));
        assert!(err.message.contains("unknown operator"));
    }

    #[test]
    fn extraneous_key() {
        let err = decode_err(json!({
            "op": "not",
            "args": [true],
            "extra": 1,
        }));
        assert!(err.message.contains("unexpected key"));
    }

    #[test]
    fn temporal_operators_are_camel_case() {
        assert!(parse_json(
            r#"{"op": "t_metBy", "args": [{"property": "a"}, {"property": "b"}]}"#
        )
        .is_ok());
        let err = decode_err(json!({
            "op": "t_metby",
            "args": [{"property": "a"}, {"property": "b"}],
        }));
        assert!(err.message.contains("unknown operator"));
    }

    #[test]
    fn and_arity() {
        let err = decode_err(json!({"op": "and", "args": [true]}));
        assert_eq!(err.path, "$.args");
    }

    #[test]
    fn in_list_must_not_be_empty() {
        let err = decode_err(json!({
            "op": "in",
            "args": [{"property": "x"}, []],
        }));
        assert_eq!(err.path, "$.args[1]");
    }

    #[test]
    fn is_null_takes_a_bare_operand() {
        let value = json!({"op": "isNull", "args": {"property": "x"}});
        let expr = decode(value.clone());
        assert_eq!(expr.to_value().unwrap(), value);
        assert_eq!(expr.to_text().unwrap(), "\"x\" IS NULL");
    }

    #[test]
    fn property_is_not_boolean() {
        let err = decode_err(json!({"property": "x"}));
        assert_eq!(err.path, "$");
    }

    #[test]
    fn function_in_boolean_position() {
        let value = json!({"function": {"name": "isCloudy", "args": [{"property": "scene"}]}});
        let expr = decode(value.clone());
        assert_eq!(expr.to_value().unwrap(), value);
        assert_eq!(expr.to_text().unwrap(), "isCloudy(\"scene\")");
    }

    #[test]
    fn open_interval_endpoint() {
        let value = json!({
            "op": "t_before",
            "args": [{"property": "t"}, {"interval": ["..", "2020-01-01"]}],
        });
        let expr = decode(value.clone());
        assert_eq!(expr.to_value().unwrap(), value);
        assert_eq!(
            expr.to_text().unwrap(),
            "T_BEFORE(\"t\", INTERVAL('..', '2020-01-01'))"
        );
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let err = decode_err(json!({
            "op": "s_intersects",
            "args": [{"property": "geom"}, {"type": "Pointy", "coordinates": [0, 0]}],
        }));
        assert_eq!(err.path, "$.args[1]");
    }

    #[test]
    fn integer_and_float_are_distinct() {
        let int = decode(json!({"op": "=", "args": [{"property": "a"}, 1]}));
        let float = decode(json!({"op": "=", "args": [{"property": "a"}, 1.0]}));
        assert_ne!(int, float);
        assert_eq!(int.to_json().unwrap(), r#"{"op":"=","args":[{"property":"a"},1]}"#);
    }
}
