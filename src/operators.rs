//! Operator enumerations with their cql2-json spellings.
//!
//! Each family keeps an injective string form matching the JSON
//! encoding; the text side normalizes its case-insensitive lexemes to
//! that form.

use serde::Serialize;
use std::fmt;

/// The boolean connectives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AndOrOp {
    /// `and`
    #[serde(rename = "and")]
    And,

    /// `or`
    #[serde(rename = "or")]
    Or,
}

impl AndOrOp {
    /// The cql2-json spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            AndOrOp::And => "and",
            AndOrOp::Or => "or",
        }
    }
}

impl fmt::Display for AndOrOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The binary comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ComparisonOp {
    /// `=`
    #[serde(rename = "=")]
    Eq,

    /// `<>`
    #[serde(rename = "<>")]
    NotEq,

    /// `<`
    #[serde(rename = "<")]
    Lt,

    /// `<=`
    #[serde(rename = "<=")]
    LtEq,

    /// `>`
    #[serde(rename = ">")]
    Gt,

    /// `>=`
    #[serde(rename = ">=")]
    GtEq,
}

impl ComparisonOp {
    /// The cql2-json spelling, which is also the cql2-text one.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::NotEq => "<>",
            ComparisonOp::Lt => "<",
            ComparisonOp::LtEq => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::GtEq => ">=",
        }
    }

    /// Looks up an operator by its symbol.
    pub fn from_str_op(s: &str) -> Option<ComparisonOp> {
        let op = match s {
            "=" => ComparisonOp::Eq,
            "<>" => ComparisonOp::NotEq,
            "<" => ComparisonOp::Lt,
            "<=" => ComparisonOp::LtEq,
            ">" => ComparisonOp::Gt,
            ">=" => ComparisonOp::GtEq,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The arithmetic operators.
///
/// cql2-text defines `div` in addition to the symbolic operators; the
/// JSON encoding spells all of them the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArithmeticOp {
    /// `+`
    #[serde(rename = "+")]
    Add,

    /// `-`
    #[serde(rename = "-")]
    Subtract,

    /// `*`
    #[serde(rename = "*")]
    Multiply,

    /// `/`
    #[serde(rename = "/")]
    Divide,

    /// `^`
    #[serde(rename = "^")]
    Power,

    /// `%`
    #[serde(rename = "%")]
    Modulo,

    /// `div` (integer division)
    #[serde(rename = "div")]
    IntDiv,
}

impl ArithmeticOp {
    /// The cql2-json spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArithmeticOp::Add => "+",
            ArithmeticOp::Subtract => "-",
            ArithmeticOp::Multiply => "*",
            ArithmeticOp::Divide => "/",
            ArithmeticOp::Power => "^",
            ArithmeticOp::Modulo => "%",
            ArithmeticOp::IntDiv => "div",
        }
    }

    /// Looks up an operator by its (lowercased) lexeme.
    pub fn from_str_op(s: &str) -> Option<ArithmeticOp> {
        let op = match s {
            "+" => ArithmeticOp::Add,
            "-" => ArithmeticOp::Subtract,
            "*" => ArithmeticOp::Multiply,
            "/" => ArithmeticOp::Divide,
            "^" => ArithmeticOp::Power,
            "%" => ArithmeticOp::Modulo,
            "div" => ArithmeticOp::IntDiv,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The spatial predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SpatialOp {
    /// `s_contains`
    #[serde(rename = "s_contains")]
    Contains,

    /// `s_crosses`
    #[serde(rename = "s_crosses")]
    Crosses,

    /// `s_disjoint`
    #[serde(rename = "s_disjoint")]
    Disjoint,

    /// `s_equals`
    #[serde(rename = "s_equals")]
    Equals,

    /// `s_intersects`
    #[serde(rename = "s_intersects")]
    Intersects,

    /// `s_overlaps`
    #[serde(rename = "s_overlaps")]
    Overlaps,

    /// `s_touches`
    #[serde(rename = "s_touches")]
    Touches,

    /// `s_within`
    #[serde(rename = "s_within")]
    Within,
}

impl SpatialOp {
    /// The cql2-json spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpatialOp::Contains => "s_contains",
            SpatialOp::Crosses => "s_crosses",
            SpatialOp::Disjoint => "s_disjoint",
            SpatialOp::Equals => "s_equals",
            SpatialOp::Intersects => "s_intersects",
            SpatialOp::Overlaps => "s_overlaps",
            SpatialOp::Touches => "s_touches",
            SpatialOp::Within => "s_within",
        }
    }

    /// Looks up an operator by its case-insensitive text lexeme.
    pub fn from_text(s: &str) -> Option<SpatialOp> {
        SpatialOp::from_json_op(s.to_ascii_lowercase().as_str())
    }

    /// Looks up an operator by its exact JSON spelling.
    pub fn from_json_op(s: &str) -> Option<SpatialOp> {
        let op = match s {
            "s_contains" => SpatialOp::Contains,
            "s_crosses" => SpatialOp::Crosses,
            "s_disjoint" => SpatialOp::Disjoint,
            "s_equals" => SpatialOp::Equals,
            "s_intersects" => SpatialOp::Intersects,
            "s_overlaps" => SpatialOp::Overlaps,
            "s_touches" => SpatialOp::Touches,
            "s_within" => SpatialOp::Within,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for SpatialOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The temporal predicate operators.
///
/// The JSON spelling is camelCase (`t_metBy`); the text encoding is
/// case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TemporalOp {
    /// `t_after`
    #[serde(rename = "t_after")]
    After,

    /// `t_before`
    #[serde(rename = "t_before")]
    Before,

    /// `t_contains`
    #[serde(rename = "t_contains")]
    Contains,

    /// `t_disjoint`
    #[serde(rename = "t_disjoint")]
    Disjoint,

    /// `t_during`
    #[serde(rename = "t_during")]
    During,

    /// `t_equals`
    #[serde(rename = "t_equals")]
    Equals,

    /// `t_finishedBy`
    #[serde(rename = "t_finishedBy")]
    FinishedBy,

    /// `t_finishes`
    #[serde(rename = "t_finishes")]
    Finishes,

    /// `t_intersects`
    #[serde(rename = "t_intersects")]
    Intersects,

    /// `t_meets`
    #[serde(rename = "t_meets")]
    Meets,

    /// `t_metBy`
    #[serde(rename = "t_metBy")]
    MetBy,

    /// `t_overlappedBy`
    #[serde(rename = "t_overlappedBy")]
    OverlappedBy,

    /// `t_overlaps`
    #[serde(rename = "t_overlaps")]
    Overlaps,

    /// `t_startedBy`
    #[serde(rename = "t_startedBy")]
    StartedBy,

    /// `t_starts`
    #[serde(rename = "t_starts")]
    Starts,
}

impl TemporalOp {
    /// The cql2-json spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            TemporalOp::After => "t_after",
            TemporalOp::Before => "t_before",
            TemporalOp::Contains => "t_contains",
            TemporalOp::Disjoint => "t_disjoint",
            TemporalOp::During => "t_during",
            TemporalOp::Equals => "t_equals",
            TemporalOp::FinishedBy => "t_finishedBy",
            TemporalOp::Finishes => "t_finishes",
            TemporalOp::Intersects => "t_intersects",
            TemporalOp::Meets => "t_meets",
            TemporalOp::MetBy => "t_metBy",
            TemporalOp::OverlappedBy => "t_overlappedBy",
            TemporalOp::Overlaps => "t_overlaps",
            TemporalOp::StartedBy => "t_startedBy",
            TemporalOp::Starts => "t_starts",
        }
    }

    /// Looks up an operator by its case-insensitive text lexeme,
    /// canonicalizing `T_METBY` and friends to their camelCase form.
    pub fn from_text(s: &str) -> Option<TemporalOp> {
        let op = match s.to_ascii_lowercase().as_str() {
            "t_after" => TemporalOp::After,
            "t_before" => TemporalOp::Before,
            "t_contains" => TemporalOp::Contains,
            "t_disjoint" => TemporalOp::Disjoint,
            "t_during" => TemporalOp::During,
            "t_equals" => TemporalOp::Equals,
            "t_finishedby" => TemporalOp::FinishedBy,
            "t_finishes" => TemporalOp::Finishes,
            "t_intersects" => TemporalOp::Intersects,
            "t_meets" => TemporalOp::Meets,
            "t_metby" => TemporalOp::MetBy,
            "t_overlappedby" => TemporalOp::OverlappedBy,
            "t_overlaps" => TemporalOp::Overlaps,
            "t_startedby" => TemporalOp::StartedBy,
            "t_starts" => TemporalOp::Starts,
            _ => return None,
        };
        Some(op)
    }

    /// Looks up an operator by its exact JSON spelling.
    pub fn from_json_op(s: &str) -> Option<TemporalOp> {
        TemporalOp::from_text(s).filter(|op| op.as_str() == s)
    }
}

impl fmt::Display for TemporalOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The array predicate operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArrayOp {
    /// `a_containedBy`
    #[serde(rename = "a_containedBy")]
    ContainedBy,

    /// `a_contains`
    #[serde(rename = "a_contains")]
    Contains,

    /// `a_equals`
    #[serde(rename = "a_equals")]
    Equals,

    /// `a_overlaps`
    #[serde(rename = "a_overlaps")]
    Overlaps,
}

impl ArrayOp {
    /// The cql2-json spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayOp::ContainedBy => "a_containedBy",
            ArrayOp::Contains => "a_contains",
            ArrayOp::Equals => "a_equals",
            ArrayOp::Overlaps => "a_overlaps",
        }
    }

    /// Looks up an operator by its case-insensitive text lexeme.
    pub fn from_text(s: &str) -> Option<ArrayOp> {
        let op = match s.to_ascii_lowercase().as_str() {
            "a_containedby" => ArrayOp::ContainedBy,
            "a_contains" => ArrayOp::Contains,
            "a_equals" => ArrayOp::Equals,
            "a_overlaps" => ArrayOp::Overlaps,
            _ => return None,
        };
        Some(op)
    }

    /// Looks up an operator by its exact JSON spelling.
    pub fn from_json_op(s: &str) -> Option<ArrayOp> {
        ArrayOp::from_text(s).filter(|op| op.as_str() == s)
    }
}

impl fmt::Display for ArrayOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// True for names the expression language claims for itself; a user
/// function cannot shadow these in either encoding.
pub(crate) fn is_reserved_function_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    matches!(
        lower.as_str(),
        "and"
            | "or"
            | "not"
            | "like"
            | "between"
            | "in"
            | "isnull"
            | "div"
            | "casei"
            | "accenti"
            | "bbox"
            | "interval"
            | "date"
            | "timestamp"
    ) || SpatialOp::from_json_op(&lower).is_some()
        || TemporalOp::from_text(&lower).is_some()
        || ArrayOp::from_text(&lower).is_some()
}

#[cfg(test)]
mod tests {
    use super::{ArrayOp, ComparisonOp, SpatialOp, TemporalOp};

    #[test]
    fn temporal_canonicalization() {
        assert_eq!(TemporalOp::from_text("T_METBY").unwrap().as_str(), "t_metBy");
        assert_eq!(
            TemporalOp::from_text("t_overlappedby").unwrap().as_str(),
            "t_overlappedBy"
        );
        assert_eq!(
            TemporalOp::from_text("T_StartedBy").unwrap().as_str(),
            "t_startedBy"
        );
    }

    #[test]
    fn array_canonicalization() {
        assert_eq!(
            ArrayOp::from_text("A_CONTAINEDBY").unwrap().as_str(),
            "a_containedBy"
        );
    }

    #[test]
    fn json_spelling_is_exact() {
        assert!(TemporalOp::from_json_op("t_metBy").is_some());
        assert!(TemporalOp::from_json_op("t_metby").is_none());
        assert!(TemporalOp::from_json_op("T_METBY").is_none());
        assert!(ArrayOp::from_json_op("a_containedby").is_none());
        assert!(SpatialOp::from_json_op("s_intersects").is_some());
        assert!(SpatialOp::from_json_op("S_INTERSECTS").is_none());
    }

    #[test]
    fn comparison_symbols() {
        assert_eq!(ComparisonOp::from_str_op("<>").unwrap().as_str(), "<>");
        assert!(ComparisonOp::from_str_op("!=").is_none());
    }
}
