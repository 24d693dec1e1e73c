//! Read options for list and get requests.
//!
//! Options are accumulated into a [`ReadQuery`] in application order: client
//! defaults first, then per-call options. The last writer of a query key
//! wins. Deep options merge per relational field into a single `deep`
//! parameter.
//!
//! # Example
//!
//! ```rust
//! use directus_api::rest::{Filter, ReadOption, ReadQuery};
//!
//! let mut query = ReadQuery::new();
//! query.apply_all(&[
//!     ReadOption::fields(["id", "title", "translations.*"]),
//!     ReadOption::deep_filter("translations", Filter::eq("languages_code", "en-GB")),
//!     ReadOption::limit(10),
//! ]);
//!
//! let pairs = query.into_pairs();
//! assert_eq!(pairs[0], ("deep".to_string(),
//!     r#"{"translations":{"_filter":{"languages_code":{"_eq":"en-GB"}}}}"#.to_string()));
//! assert_eq!(pairs[1], ("fields[]".to_string(), "id".to_string()));
//! assert_eq!(pairs.last().unwrap(), &("limit".to_string(), "10".to_string()));
//! ```

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::rest::filter::Filter;

/// A modification of an outgoing read request.
#[derive(Clone, Debug, PartialEq)]
pub enum ReadOption {
    /// Restricts or expands the returned fields (`fields[]`). Dotted paths
    /// reach into relations, e.g. `author.name`.
    Fields(Vec<String>),
    /// Orders the result (`sort[]`). A leading `-` sorts descending.
    Sort(Vec<String>),
    /// Caps the number of returned items.
    Limit(i64),
    /// Requests every item (`limit=-1`).
    Unlimited,
    /// Skips the first items.
    Offset(u64),
    /// Full-text search over the collection.
    Search(String),
    /// Orders the items of one relational field.
    DeepSort {
        /// The relational field.
        field: String,
        /// The sort fields.
        sort: Vec<String>,
    },
    /// Caps the items of one relational field.
    DeepLimit {
        /// The relational field.
        field: String,
        /// The limit.
        limit: i64,
    },
    /// Filters the items of one relational field.
    DeepFilter {
        /// The relational field.
        field: String,
        /// The filter.
        filter: Filter,
    },
}

fn strings<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl ReadOption {
    /// Selects the returned fields.
    #[must_use]
    pub fn fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Fields(strings(fields))
    }

    /// Sorts by the given fields.
    #[must_use]
    pub fn sort<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Sort(strings(fields))
    }

    /// Caps the number of items.
    #[must_use]
    pub const fn limit(limit: i64) -> Self {
        Self::Limit(limit)
    }

    /// Requests every item.
    #[must_use]
    pub const fn unlimited() -> Self {
        Self::Unlimited
    }

    /// Skips the first `offset` items.
    #[must_use]
    pub const fn offset(offset: u64) -> Self {
        Self::Offset(offset)
    }

    /// Searches the collection.
    #[must_use]
    pub fn search(term: impl Into<String>) -> Self {
        Self::Search(term.into())
    }

    /// Sorts the items of a relational field.
    #[must_use]
    pub fn deep_sort<I, S>(field: impl Into<String>, sort: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::DeepSort {
            field: field.into(),
            sort: strings(sort),
        }
    }

    /// Caps the items of a relational field.
    #[must_use]
    pub fn deep_limit(field: impl Into<String>, limit: i64) -> Self {
        Self::DeepLimit {
            field: field.into(),
            limit,
        }
    }

    /// Filters the items of a relational field.
    #[must_use]
    pub fn deep_filter(field: impl Into<String>, filter: Filter) -> Self {
        Self::DeepFilter {
            field: field.into(),
            filter,
        }
    }
}

/// Query parameters of a read request under construction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReadQuery {
    params: BTreeMap<String, Vec<String>>,
    deep: BTreeMap<String, Map<String, Value>>,
}

impl ReadQuery {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a raw query parameter, replacing earlier values of `key`.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), vec![value.into()]);
    }

    /// Applies one option.
    pub fn apply(&mut self, option: &ReadOption) {
        match option {
            ReadOption::Fields(fields) => {
                self.params.insert("fields[]".to_string(), fields.clone());
            }
            ReadOption::Sort(fields) => {
                self.params.insert("sort[]".to_string(), fields.clone());
            }
            ReadOption::Limit(limit) => self.set("limit", limit.to_string()),
            ReadOption::Unlimited => self.set("limit", "-1"),
            ReadOption::Offset(offset) => self.set("offset", offset.to_string()),
            ReadOption::Search(term) => self.set("search", term.clone()),
            ReadOption::DeepSort { field, sort } => {
                self.deep_entry(field)
                    .insert("_sort".to_string(), Value::from(sort.clone()));
            }
            ReadOption::DeepLimit { field, limit } => {
                self.deep_entry(field)
                    .insert("_limit".to_string(), Value::from(*limit));
            }
            ReadOption::DeepFilter { field, filter } => {
                self.deep_entry(field)
                    .insert("_filter".to_string(), filter.to_value());
            }
        }
    }

    /// Applies options in order.
    pub fn apply_all<'a>(&mut self, options: impl IntoIterator<Item = &'a ReadOption>) {
        for option in options {
            self.apply(option);
        }
    }

    fn deep_entry(&mut self, field: &str) -> &mut Map<String, Value> {
        self.deep.entry(field.to_string()).or_default()
    }

    /// Returns the current values of a parameter.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.params.get(key).map(Vec::as_slice)
    }

    /// Finalizes the query into ordered key/value pairs.
    ///
    /// Keys are emitted in sorted order. The deep options become one `deep`
    /// parameter holding a JSON object keyed by field.
    #[must_use]
    pub fn into_pairs(mut self) -> Vec<(String, String)> {
        if !self.deep.is_empty() {
            let deep: Map<String, Value> = self
                .deep
                .into_iter()
                .map(|(field, options)| (field, Value::Object(options)))
                .collect();
            self.params
                .insert("deep".to_string(), vec![Value::Object(deep).to_string()]);
        }

        self.params
            .into_iter()
            .flat_map(|(key, values)| values.into_iter().map(move |value| (key.clone(), value)))
            .collect()
    }
}
