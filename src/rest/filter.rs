//! Filter expressions in the Directus filter grammar.
//!
//! A [`Filter`] is an immutable tree. Leaves compare one field against a
//! value, logical nodes combine children with `_and`/`_or`, and related nodes
//! scope a child filter under a relational field.
//!
//! # Example
//!
//! ```rust
//! use directus_api::rest::Filter;
//!
//! let filter = Filter::and([
//!     Filter::eq("status", "published"),
//!     Filter::related("author", Filter::eq("name", "Ada")),
//! ]);
//!
//! assert_eq!(
//!     filter.to_json(),
//!     r#"{"_and":[{"status":{"_eq":"published"}},{"author":{"name":{"_eq":"Ada"}}}]}"#
//! );
//! assert_eq!(filter.to_string(), "status _eq published && author.name _eq Ada");
//! ```

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// Comparison operators of a filter leaf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `_eq`
    Eq,
    /// `_neq`
    Neq,
    /// `_gt`
    Gt,
    /// `_gte`
    Gte,
    /// `_lt`
    Lt,
    /// `_lte`
    Lte,
    /// `_empty`, carries no value.
    Empty,
    /// `_nempty`, carries no value.
    NotEmpty,
    /// `_in`, carries a list.
    In,
    /// `_between`, carries exactly two bounds.
    Between,
    /// `_starts_with`
    StartsWith,
}

impl Operator {
    /// Returns the wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "_eq",
            Self::Neq => "_neq",
            Self::Gt => "_gt",
            Self::Gte => "_gte",
            Self::Lt => "_lt",
            Self::Lte => "_lte",
            Self::Empty => "_empty",
            Self::NotEmpty => "_nempty",
            Self::In => "_in",
            Self::Between => "_between",
            Self::StartsWith => "_starts_with",
        }
    }
}

/// Logical operators combining child filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogicalOperator {
    /// `_and`
    And,
    /// `_or`
    Or,
}

impl LogicalOperator {
    /// Returns the wire name of the operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::And => "_and",
            Self::Or => "_or",
        }
    }

    const fn infix(self) -> &'static str {
        match self {
            Self::And => " && ",
            Self::Or => " || ",
        }
    }
}

/// A filter expression.
///
/// Field names and value types are not checked locally; a malformed filter
/// is rejected by the server as a validation error.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    /// `{field: {op: value}}`
    Op {
        /// The compared field.
        field: String,
        /// The comparison.
        op: Operator,
        /// The operand.
        value: Value,
    },
    /// `{op: [children...]}`
    Logical {
        /// `_and` or `_or`.
        op: LogicalOperator,
        /// The combined filters, in order.
        children: Vec<Filter>,
    },
    /// `{field: child}`
    Related {
        /// The relational field.
        field: String,
        /// The filter applied to the related item.
        child: Box<Filter>,
    },
    /// `{}`
    Noop,
}

impl Filter {
    fn op(field: impl Into<String>, op: Operator, value: Value) -> Self {
        Self::Op {
            field: field.into(),
            op,
            value,
        }
    }

    /// `field` equals `value`.
    #[must_use]
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Eq, value.into())
    }

    /// `field` differs from `value`.
    #[must_use]
    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Neq, value.into())
    }

    /// `field` is greater than `value`.
    #[must_use]
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Gt, value.into())
    }

    /// `field` is greater than or equal to `value`.
    #[must_use]
    pub fn gte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Gte, value.into())
    }

    /// `field` is less than `value`.
    #[must_use]
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Lt, value.into())
    }

    /// `field` is less than or equal to `value`.
    #[must_use]
    pub fn lte(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::op(field, Operator::Lte, value.into())
    }

    /// `field` is empty.
    #[must_use]
    pub fn empty(field: impl Into<String>) -> Self {
        Self::op(field, Operator::Empty, Value::Null)
    }

    /// `field` is not empty.
    #[must_use]
    pub fn not_empty(field: impl Into<String>) -> Self {
        Self::op(field, Operator::NotEmpty, Value::Null)
    }

    /// `field` is one of `values`.
    #[must_use]
    pub fn is_in<I, V>(field: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let values = values.into_iter().map(Into::into).collect();
        Self::op(field, Operator::In, Value::Array(values))
    }

    /// `field` lies between `from` and `to`.
    #[must_use]
    pub fn between(
        field: impl Into<String>,
        from: impl Into<Value>,
        to: impl Into<Value>,
    ) -> Self {
        Self::op(
            field,
            Operator::Between,
            Value::Array(vec![from.into(), to.into()]),
        )
    }

    /// `field` starts with `prefix`.
    #[must_use]
    pub fn starts_with(field: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self::op(field, Operator::StartsWith, Value::String(prefix.into()))
    }

    /// All of `filters` match.
    #[must_use]
    pub fn and(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::Logical {
            op: LogicalOperator::And,
            children: filters.into_iter().collect(),
        }
    }

    /// Any of `filters` matches.
    #[must_use]
    pub fn or(filters: impl IntoIterator<Item = Self>) -> Self {
        Self::Logical {
            op: LogicalOperator::Or,
            children: filters.into_iter().collect(),
        }
    }

    /// `filter` matches the item related through `field`.
    #[must_use]
    pub fn related(field: impl Into<String>, filter: Self) -> Self {
        Self::Related {
            field: field.into(),
            child: Box::new(filter),
        }
    }

    /// A filter that matches everything.
    #[must_use]
    pub const fn noop() -> Self {
        Self::Noop
    }

    /// Builds the JSON tree of the filter.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Op { field, op, value } => {
                let mut inner = Map::new();
                inner.insert(op.as_str().to_string(), value.clone());
                single(field, Value::Object(inner))
            }
            Self::Logical { op, children } => single(
                op.as_str(),
                Value::Array(children.iter().map(Self::to_value).collect()),
            ),
            Self::Related { field, child } => single(field, child.to_value()),
            Self::Noop => Value::Object(Map::new()),
        }
    }

    /// Serializes the filter to the compact JSON the `filter` query
    /// parameter expects.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

fn single(key: &str, value: Value) -> Value {
    let mut map = Map::new();
    map.insert(key.to_string(), value);
    Value::Object(map)
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Op { field, op, value } => match value {
                Value::String(s) => write!(f, "{field} {} {s}", op.as_str()),
                other => write!(f, "{field} {} {other}", op.as_str()),
            },
            Self::Logical { op, children } => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(op.infix())?;
                    }
                    child.fmt(f)?;
                }
                Ok(())
            }
            Self::Related { field, child } => write!(f, "{field}.{child}"),
            Self::Noop => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_and_serialization_keeps_order() {
        let filter = Filter::and([Filter::eq("a", 1), Filter::eq("b", "x")]);
        assert_eq!(filter.to_json(), r#"{"_and":[{"a":{"_eq":1}},{"b":{"_eq":"x"}}]}"#);
    }

    #[test]
    fn test_or_serialization() {
        let filter = Filter::or([Filter::gt("views", 10), Filter::lte("views", 2)]);
        assert_eq!(
            filter.to_value(),
            json!({"_or": [{"views": {"_gt": 10}}, {"views": {"_lte": 2}}]})
        );
    }

    #[test]
    fn test_operator_leaves() {
        assert_eq!(Filter::neq("a", true).to_value(), json!({"a": {"_neq": true}}));
        assert_eq!(Filter::gte("a", 1.5).to_value(), json!({"a": {"_gte": 1.5}}));
        assert_eq!(Filter::lt("a", -3).to_value(), json!({"a": {"_lt": -3}}));
        assert_eq!(Filter::empty("a").to_value(), json!({"a": {"_empty": null}}));
        assert_eq!(
            Filter::not_empty("a").to_value(),
            json!({"a": {"_nempty": null}})
        );
        assert_eq!(
            Filter::is_in("a", ["x", "y", "z"]).to_value(),
            json!({"a": {"_in": ["x", "y", "z"]}})
        );
        assert_eq!(
            Filter::between("a", 1, 5).to_value(),
            json!({"a": {"_between": [1, 5]}})
        );
        assert_eq!(
            Filter::starts_with("slug", "news-").to_value(),
            json!({"slug": {"_starts_with": "news-"}})
        );
    }

    #[test]
    fn test_related_nests_child() {
        let filter = Filter::related(
            "translations",
            Filter::related("languages_code", Filter::eq("code", "en-GB")),
        );
        assert_eq!(
            filter.to_json(),
            r#"{"translations":{"languages_code":{"code":{"_eq":"en-GB"}}}}"#
        );
    }

    #[test]
    fn test_noop_is_empty_object() {
        assert_eq!(Filter::noop().to_json(), "{}");
        assert_eq!(Filter::noop().to_string(), "");
    }

    #[test]
    fn test_serialize_matches_to_value() {
        let filter = Filter::and([Filter::eq("a", 1), Filter::noop()]);
        assert_eq!(serde_json::to_value(&filter).unwrap(), filter.to_value());
    }

    #[test]
    fn test_display() {
        let filter = Filter::or([
            Filter::and([Filter::eq("a", 1), Filter::eq("b", "x")]),
            Filter::related("c", Filter::gt("d", 2)),
        ]);
        assert_eq!(filter.to_string(), "a _eq 1 && b _eq x || c.d _gt 2");
        assert_eq!(Filter::empty("a").to_string(), "a _empty null");
    }
}
