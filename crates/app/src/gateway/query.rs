//! Typed read-query construction.
//!
//! Filters are values, not strings: a [`Filter`] pairs a column with an
//! [`Op`] and a typed [`FilterValue`], and is only rendered to the backend's
//! `column=op.value` form at request time. Percent-encoding is left to the
//! HTTP client's query serializer, so no user-supplied text is ever spliced
//! into a URL by hand.

use rust_decimal::Decimal;
use uuid::Uuid;

/// A comparison operator understood by the backend's filter grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
}

impl Op {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Eq => "eq",
            Self::Neq => "neq",
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Like => "like",
            Self::In => "in",
        }
    }
}

/// A typed filter operand.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Id(Uuid),
    Text(String),
    Bool(bool),
    Int(i64),
    Number(Decimal),
}

impl FilterValue {
    fn render(&self) -> String {
        match self {
            Self::Id(id) => id.to_string(),
            Self::Text(text) => text.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            Self::Number(value) => value.to_string(),
        }
    }
}

impl From<Uuid> for FilterValue {
    fn from(value: Uuid) -> Self {
        Self::Id(value)
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Decimal> for FilterValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// One column condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    column: &'static str,
    op: Op,
    values: Vec<FilterValue>,
}

impl Filter {
    /// A `column = value` condition.
    #[must_use]
    pub fn eq(column: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::new(column, Op::Eq, value)
    }

    /// A condition with an explicit operator.
    #[must_use]
    pub fn new(column: &'static str, op: Op, value: impl Into<FilterValue>) -> Self {
        Self {
            column,
            op,
            values: vec![value.into()],
        }
    }

    /// A `column in (...)` condition.
    #[must_use]
    pub fn is_in(column: &'static str, values: impl IntoIterator<Item = FilterValue>) -> Self {
        Self {
            column,
            op: Op::In,
            values: values.into_iter().collect(),
        }
    }

    /// Renders the filter to a `(column, "op.value")` query pair.
    #[must_use]
    pub fn to_pair(&self) -> (String, String) {
        let rendered = match self.op {
            Op::In => {
                let list: Vec<String> = self.values.iter().map(FilterValue::render).collect();
                format!("in.({})", list.join(","))
            }
            op => {
                let value = self
                    .values
                    .first()
                    .map(FilterValue::render)
                    .unwrap_or_default();
                format!("{}.{value}", op.as_str())
            }
        };

        (self.column.to_owned(), rendered)
    }
}

/// Sort direction for an `order` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

/// A read query: projection, conditions, ordering and row limit.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    select: &'static str,
    filters: Vec<Filter>,
    order: Option<(&'static str, Direction)>,
    limit: Option<u32>,
}

impl Default for Query {
    fn default() -> Self {
        Self::new()
    }
}

impl Query {
    /// A query selecting all columns with no conditions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            select: "*",
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Overrides the projection, e.g. `"id,name,price"`.
    #[must_use]
    pub fn select(mut self, columns: &'static str) -> Self {
        self.select = columns;
        self
    }

    /// Appends a condition.
    #[must_use]
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Orders by a column.
    #[must_use]
    pub fn order(mut self, column: &'static str, direction: Direction) -> Self {
        self.order = Some((column, direction));
        self
    }

    /// Caps the number of rows returned.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Renders the query to key/value pairs for the request query string.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![("select".to_owned(), self.select.to_owned())];

        pairs.extend(self.filters.iter().map(Filter::to_pair));

        if let Some((column, direction)) = self.order {
            let direction = match direction {
                Direction::Asc => "asc",
                Direction::Desc => "desc",
            };

            pairs.push(("order".to_owned(), format!("{column}.{direction}")));
        }

        if let Some(limit) = self.limit {
            pairs.push(("limit".to_owned(), limit.to_string()));
        }

        pairs
    }
}
