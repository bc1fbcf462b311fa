//! The CQL2 abstract syntax tree.
//!
//! The root of every expression is a [BooleanExpression]; the two
//! encodings both converge on it. Nodes are immutable values with
//! structural equality; the validating constructors ([`AndOrExpression::new`],
//! [`IsInListPredicate::new`], [`BboxLiteral::new`]) enforce the arities
//! the grammar cannot express in types.

use crate::{
    geometry, AndOrOp, ArithmeticOp, ArrayOp, ComparisonOp, Error, InstantLiteral,
    IntervalLiteral, SpatialOp, TemporalOp,
};
use serde::Serialize;
use serde_json::{Number, Value};
use std::str::FromStr;

/// Quotes a string as a cql2-text character literal, doubling any
/// embedded apostrophe.
pub(crate) fn make_char_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// A case-insensitive wrapper, `{"casei": …}` in JSON.
///
/// The inner kind follows the surrounding context: a character
/// expression in character position, a pattern in pattern position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Casei<T> {
    /// The wrapped expression.
    pub casei: Box<T>,
}

/// An accent-insensitive wrapper, `{"accenti": …}` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Accenti<T> {
    /// The wrapped expression.
    pub accenti: Box<T>,
}

/// A CQL2 expression.
///
/// # Examples
///
/// [BooleanExpression] implements [FromStr], auto-detecting the
/// encoding:
///
/// ```
/// use cql2_syntax::BooleanExpression;
///
/// let expr: BooleanExpression = "landsat:scene_id = 'LC82030282019133LGN00'".parse().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BooleanExpression {
    /// A literal boolean.
    Bool(bool),

    /// An `and`/`or` with two or more operands.
    AndOr(AndOrExpression),

    /// A negation.
    Not(NotExpression),

    /// A comparison predicate.
    Comparison(ComparisonPredicate),

    /// A spatial predicate.
    Spatial(SpatialPredicate),

    /// A temporal predicate.
    Temporal(TemporalPredicate),

    /// An array predicate.
    Array(ArrayPredicate),

    /// A function call in boolean position.
    Function(FunctionRef),
}

/// An `and`/`or` over two or more boolean expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AndOrExpression {
    op: AndOrOp,
    args: Vec<BooleanExpression>,
}

impl AndOrExpression {
    /// Creates a new `and`/`or`, rejecting fewer than two operands.
    pub fn new(op: AndOrOp, args: Vec<BooleanExpression>) -> Result<AndOrExpression, Error> {
        if args.len() < 2 {
            Err(Error::InvalidNumberOfArguments {
                name: op.as_str().to_string(),
                actual: args.len(),
                expected: 2,
            })
        } else {
            Ok(AndOrExpression { op, args })
        }
    }

    /// The connective.
    pub fn op(&self) -> AndOrOp {
        self.op
    }

    /// The operands, at least two of them.
    pub fn args(&self) -> &[BooleanExpression] {
        &self.args
    }
}

/// `{"op": "not", "args": […]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotExpression {
    /// The negated expression.
    pub arg: Box<BooleanExpression>,
}

/// One of the five comparison predicate forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ComparisonPredicate {
    /// `=`, `<>`, `<`, `<=`, `>`, `>=`
    Binary(BinaryComparison),

    /// `LIKE`
    Like(IsLikePredicate),

    /// `BETWEEN`
    Between(IsBetweenPredicate),

    /// `IN`
    InList(IsInListPredicate),

    /// `IS NULL`
    IsNull(IsNullPredicate),
}

/// A binary comparison over two scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinaryComparison {
    /// The comparison operator.
    pub op: ComparisonOp,

    /// Left- and right-hand sides.
    pub args: (ScalarExpression, ScalarExpression),
}

/// `<character> LIKE <pattern>`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsLikePredicate {
    /// The matched expression and the pattern.
    pub args: (CharacterExpression, PatternExpression),
}

/// `<n> BETWEEN <n> AND <n>`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsBetweenPredicate {
    /// Operand, lower bound, upper bound.
    pub args: (NumericExpression, NumericExpression, NumericExpression),
}

/// `<scalar> IN (<scalar>, …)`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsInListPredicate {
    item: ScalarExpression,
    list: Vec<ScalarExpression>,
}

impl IsInListPredicate {
    /// Creates a new `IN` predicate, rejecting an empty list.
    pub fn new(
        item: ScalarExpression,
        list: Vec<ScalarExpression>,
    ) -> Result<IsInListPredicate, Error> {
        if list.is_empty() {
            Err(Error::InvalidNumberOfArguments {
                name: "in".to_string(),
                actual: 0,
                expected: 1,
            })
        } else {
            Ok(IsInListPredicate { item, list })
        }
    }

    /// The tested expression.
    pub fn item(&self) -> &ScalarExpression {
        &self.item
    }

    /// The non-empty candidate list.
    pub fn list(&self) -> &[ScalarExpression] {
        &self.list
    }
}

/// `<operand> IS NULL`.
#[derive(Debug, Clone, PartialEq)]
pub struct IsNullPredicate {
    /// The tested operand.
    pub arg: IsNullOperand,
}

/// Anything that can be tested for null.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IsNullOperand {
    /// A scalar expression.
    Scalar(ScalarExpression),

    /// An interval literal.
    Interval(IntervalLiteral),

    /// A geometry literal.
    Geometry(geojson::Geometry),

    /// A bounding box literal.
    Bbox(BboxLiteral),
}

/// A spatial predicate over two geometry expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpatialPredicate {
    /// The spatial operator.
    pub op: SpatialOp,

    /// The two geometry operands.
    pub args: (GeomExpression, GeomExpression),
}

/// A temporal predicate over two temporal expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemporalPredicate {
    /// The temporal operator.
    pub op: TemporalOp,

    /// The two temporal operands.
    pub args: (TemporalExpression, TemporalExpression),
}

/// An array predicate over two array terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayPredicate {
    /// The array operator.
    pub op: ArrayOp,

    /// The two array operands.
    pub args: (ArrayTerm, ArrayTerm),
}

/// An operand of an array predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayTerm {
    /// An array literal.
    Array(ArrayLiteral),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// An ordered list of array elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayLiteral(pub Vec<ArrayElement>);

/// A member of an array literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayElement {
    /// Any scalar.
    Scalar(ScalarExpression),

    /// An interval literal.
    Interval(IntervalLiteral),

    /// A geometry literal.
    Geometry(geojson::Geometry),

    /// A bounding box literal.
    Bbox(BboxLiteral),

    /// A nested array.
    Array(ArrayLiteral),
}

/// A scalar expression: the members shared by the comparison
/// predicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarExpression {
    /// A literal boolean.
    Bool(bool),

    /// A literal number.
    Number(Number),

    /// A literal string.
    String(String),

    /// A case-insensitive wrapper.
    Casei(Casei<CharacterExpression>),

    /// An accent-insensitive wrapper.
    Accenti(Accenti<CharacterExpression>),

    /// A date or timestamp.
    Instant(InstantLiteral),

    /// An arithmetic expression.
    Arithmetic(Box<ArithmeticExpression>),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// A numeric expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NumericExpression {
    /// An arithmetic expression.
    Arithmetic(Box<ArithmeticExpression>),

    /// A literal number.
    Number(Number),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// A binary arithmetic expression.
///
/// Unary minus has no JSON form; the text parser rewrites `-x` to
/// multiply-by-negative-one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArithmeticExpression {
    /// The arithmetic operator.
    pub op: ArithmeticOp,

    /// The two operands.
    pub args: (NumericExpression, NumericExpression),
}

/// A character expression: a string literal, a case/accent wrapper, or
/// a reference.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CharacterExpression {
    /// A literal string.
    Literal(String),

    /// A case-insensitive wrapper.
    Casei(Casei<CharacterExpression>),

    /// An accent-insensitive wrapper.
    Accenti(Accenti<CharacterExpression>),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// A LIKE pattern: a string literal or a case/accent wrapper, but
/// never a bare property or function.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PatternExpression {
    /// A literal pattern.
    Literal(String),

    /// A case-insensitive wrapper.
    Casei(Casei<PatternExpression>),

    /// An accent-insensitive wrapper.
    Accenti(Accenti<PatternExpression>),
}

/// A temporal expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum TemporalExpression {
    /// A date or timestamp.
    Instant(InstantLiteral),

    /// An interval.
    Interval(IntervalLiteral),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// A geometry expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GeomExpression {
    /// A GeoJSON geometry.
    Geometry(geojson::Geometry),

    /// A bounding box.
    Bbox(BboxLiteral),

    /// A property reference.
    Property(PropertyRef),

    /// A function call.
    Function(FunctionRef),
}

/// A 2D or 3D bounding box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BboxLiteral {
    bbox: Vec<Number>,
}

impl BboxLiteral {
    /// Creates a new bounding box, rejecting lengths other than 4 and 6.
    pub fn new(bbox: Vec<Number>) -> Result<BboxLiteral, Error> {
        if bbox.len() == 4 || bbox.len() == 6 {
            Ok(BboxLiteral { bbox })
        } else {
            Err(Error::InvalidBbox(bbox.len()))
        }
    }

    /// The box values, four or six of them.
    pub fn values(&self) -> &[Number] {
        &self.bbox
    }
}

/// A reference to a named attribute of the dataset being queried.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyRef {
    /// The property name.
    pub property: String,
}

/// `{"function": …}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionRef {
    /// The function call.
    pub function: Function,
}

/// A named function invocation with zero or more arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    /// The function name, case preserved.
    pub name: String,

    /// The arguments, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<FunctionArgument>>,
}

/// A function argument: any expression kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FunctionArgument {
    /// A non-predicate value, shared with array elements.
    Element(ArrayElement),

    /// A boolean predicate.
    Predicate(Box<BooleanExpression>),
}

impl BooleanExpression {
    /// Converts this expression to cql2-text.
    ///
    /// # Examples
    ///
    /// ```
    /// use cql2_syntax::BooleanExpression;
    ///
    /// let expr = BooleanExpression::Bool(true);
    /// assert_eq!(expr.to_text().unwrap(), "TRUE");
    /// ```
    pub fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            BooleanExpression::Bool(v) => {
                if *v {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            BooleanExpression::AndOr(and_or) => {
                let args: Vec<String> = and_or
                    .args()
                    .iter()
                    .map(|arg| arg.to_text())
                    .collect::<Result<_, _>>()?;
                // May result in excessive parens, but guarantees correctness.
                format!(
                    "({})",
                    args.join(&format!(" {} ", and_or.op().as_str().to_uppercase()))
                )
            }
            BooleanExpression::Not(not) => format!("NOT {}", not.arg.to_text()?),
            BooleanExpression::Comparison(comparison) => comparison.to_text()?,
            BooleanExpression::Spatial(spatial) => format!(
                "{}({}, {})",
                spatial.op.as_str().to_uppercase(),
                spatial.args.0.to_text()?,
                spatial.args.1.to_text()?
            ),
            BooleanExpression::Temporal(temporal) => format!(
                "{}({}, {})",
                temporal.op.as_str().to_uppercase(),
                temporal.args.0.to_text()?,
                temporal.args.1.to_text()?
            ),
            BooleanExpression::Array(array) => format!(
                "{}({}, {})",
                array.op.as_str().to_uppercase(),
                array.args.0.to_text()?,
                array.args.1.to_text()?
            ),
            BooleanExpression::Function(function) => function.to_text()?,
        })
    }

    /// Converts this expression to a cql2-json string.
    ///
    /// # Examples
    ///
    /// ```
    /// use cql2_syntax::BooleanExpression;
    ///
    /// let expr = BooleanExpression::Bool(true);
    /// assert_eq!(expr.to_json().unwrap(), "true");
    /// ```
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(Error::from)
    }

    /// Converts this expression to a pretty cql2-json string.
    pub fn to_json_pretty(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(Error::from)
    }

    /// Converts this expression to a [serde_json::Value].
    pub fn to_value(&self) -> Result<Value, Error> {
        serde_json::to_value(self).map_err(Error::from)
    }
}

impl FromStr for BooleanExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<BooleanExpression, Error> {
        crate::parse(s)
    }
}

impl ComparisonPredicate {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            ComparisonPredicate::Binary(binary) => format!(
                "{} {} {}",
                binary.args.0.to_text()?,
                binary.op,
                binary.args.1.to_text()?
            ),
            ComparisonPredicate::Like(like) => format!(
                "{} LIKE {}",
                like.args.0.to_text()?,
                like.args.1.to_text()?
            ),
            ComparisonPredicate::Between(between) => format!(
                "{} BETWEEN {} AND {}",
                between.args.0.to_text()?,
                between.args.1.to_text()?,
                between.args.2.to_text()?
            ),
            ComparisonPredicate::InList(in_list) => {
                let list: Vec<String> = in_list
                    .list()
                    .iter()
                    .map(|value| value.to_text())
                    .collect::<Result<_, _>>()?;
                format!("{} IN ({})", in_list.item().to_text()?, list.join(", "))
            }
            ComparisonPredicate::IsNull(is_null) => {
                format!("{} IS NULL", is_null.arg.to_text()?)
            }
        })
    }
}

impl IsNullOperand {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        match self {
            IsNullOperand::Scalar(scalar) => scalar.to_text(),
            IsNullOperand::Interval(interval) => interval.to_text(),
            IsNullOperand::Geometry(geometry) => geometry::to_wkt(geometry),
            IsNullOperand::Bbox(bbox) => Ok(bbox.to_text()),
        }
    }
}

impl ScalarExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            ScalarExpression::Bool(v) => {
                if *v {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            ScalarExpression::Number(n) => n.to_string(),
            ScalarExpression::String(s) => make_char_literal(s),
            ScalarExpression::Casei(casei) => casei.to_text()?,
            ScalarExpression::Accenti(accenti) => accenti.to_text()?,
            ScalarExpression::Instant(instant) => instant.to_text(),
            ScalarExpression::Arithmetic(arithmetic) => arithmetic.to_text()?,
            ScalarExpression::Property(property) => property.to_text(),
            ScalarExpression::Function(function) => function.to_text()?,
        })
    }
}

impl NumericExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            NumericExpression::Arithmetic(arithmetic) => arithmetic.to_text()?,
            NumericExpression::Number(n) => n.to_string(),
            NumericExpression::Property(property) => property.to_text(),
            NumericExpression::Function(function) => function.to_text()?,
        })
    }
}

impl ArithmeticExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        // May result in excessive parens, but guarantees correctness.
        Ok(format!(
            "({} {} {})",
            self.args.0.to_text()?,
            self.op,
            self.args.1.to_text()?
        ))
    }
}

impl CharacterExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            CharacterExpression::Literal(s) => make_char_literal(s),
            CharacterExpression::Casei(casei) => casei.to_text()?,
            CharacterExpression::Accenti(accenti) => accenti.to_text()?,
            CharacterExpression::Property(property) => property.to_text(),
            CharacterExpression::Function(function) => function.to_text()?,
        })
    }
}

impl PatternExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            PatternExpression::Literal(s) => make_char_literal(s),
            PatternExpression::Casei(casei) => casei.to_text()?,
            PatternExpression::Accenti(accenti) => accenti.to_text()?,
        })
    }
}

impl TemporalExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            TemporalExpression::Instant(instant) => instant.to_text(),
            TemporalExpression::Interval(interval) => interval.to_text()?,
            TemporalExpression::Property(property) => property.to_text(),
            TemporalExpression::Function(function) => function.to_text()?,
        })
    }
}

impl GeomExpression {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(match self {
            GeomExpression::Geometry(g) => geometry::to_wkt(g)?,
            GeomExpression::Bbox(bbox) => bbox.to_text(),
            GeomExpression::Property(property) => property.to_text(),
            GeomExpression::Function(function) => function.to_text()?,
        })
    }
}

impl BboxLiteral {
    pub(crate) fn to_text(&self) -> String {
        let values: Vec<String> = self.bbox.iter().map(|n| n.to_string()).collect();
        format!("BBOX({})", values.join(", "))
    }
}

impl ArrayTerm {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        match self {
            ArrayTerm::Array(array) => array.to_text(),
            ArrayTerm::Property(property) => Ok(property.to_text()),
            ArrayTerm::Function(function) => function.to_text(),
        }
    }
}

impl ArrayLiteral {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        let elements: Vec<String> = self
            .0
            .iter()
            .map(|element| element.to_text())
            .collect::<Result<_, _>>()?;
        Ok(format!("({})", elements.join(", ")))
    }
}

impl ArrayElement {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        match self {
            ArrayElement::Scalar(scalar) => scalar.to_text(),
            ArrayElement::Interval(interval) => interval.to_text(),
            ArrayElement::Geometry(g) => geometry::to_wkt(g),
            ArrayElement::Bbox(bbox) => Ok(bbox.to_text()),
            ArrayElement::Array(array) => array.to_text(),
        }
    }
}

impl PropertyRef {
    /// May not need to be quoted, but it can be, so it's safer and
    /// easier.
    pub(crate) fn to_text(&self) -> String {
        format!("\"{}\"", self.property)
    }
}

impl FunctionRef {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        let args = match &self.function.args {
            Some(args) => {
                let args: Vec<String> = args
                    .iter()
                    .map(|arg| arg.to_text())
                    .collect::<Result<_, _>>()?;
                args.join(", ")
            }
            None => String::new(),
        };
        Ok(format!("{}({})", self.function.name, args))
    }
}

impl FunctionArgument {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        match self {
            FunctionArgument::Element(element) => element.to_text(),
            FunctionArgument::Predicate(predicate) => predicate.to_text(),
        }
    }
}

impl Casei<CharacterExpression> {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(format!("CASEI({})", self.casei.to_text()?))
    }
}

impl Casei<PatternExpression> {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(format!("CASEI({})", self.casei.to_text()?))
    }
}

impl Accenti<CharacterExpression> {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(format!("ACCENTI({})", self.accenti.to_text()?))
    }
}

impl Accenti<PatternExpression> {
    pub(crate) fn to_text(&self) -> Result<String, Error> {
        Ok(format!("ACCENTI({})", self.accenti.to_text()?))
    }
}

#[cfg(test)]
mod tests {
    use super::{
        make_char_literal, AndOrExpression, BboxLiteral, BinaryComparison, BooleanExpression,
        ComparisonPredicate, PropertyRef, ScalarExpression,
    };
    use crate::{AndOrOp, ComparisonOp};

    #[test]
    fn char_literal_escaping() {
        assert_eq!(make_char_literal("a"), "'a'");
        assert_eq!(make_char_literal("a'b"), "'a''b'");
        assert_eq!(make_char_literal("a'b''c"), "'a''b''''c'");
    }

    #[test]
    fn and_or_requires_two_args() {
        let arg = BooleanExpression::Bool(true);
        assert!(AndOrExpression::new(AndOrOp::And, vec![arg.clone()]).is_err());
        assert!(AndOrExpression::new(AndOrOp::And, vec![arg.clone(), arg]).is_ok());
    }

    #[test]
    fn bbox_length() {
        let n = |f: f64| serde_json::Number::from_f64(f).unwrap();
        assert!(BboxLiteral::new(vec![n(0.0), n(0.0), n(1.0), n(1.0)]).is_ok());
        assert!(BboxLiteral::new(vec![n(0.0), n(0.0), n(1.0)]).is_err());
        assert!(BboxLiteral::new(vec![n(0.0); 6]).is_ok());
        assert!(BboxLiteral::new(vec![n(0.0); 5]).is_err());
    }

    #[test]
    fn binary_comparison_text() {
        let expr = BooleanExpression::Comparison(ComparisonPredicate::Binary(BinaryComparison {
            op: ComparisonOp::Eq,
            args: (
                ScalarExpression::Property(PropertyRef {
                    property: "city".to_string(),
                }),
                ScalarExpression::String("Toronto".to_string()),
            ),
        }));
        assert_eq!(expr.to_text().unwrap(), "\"city\" = 'Toronto'");
    }
}
