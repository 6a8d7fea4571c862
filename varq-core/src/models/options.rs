use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Ascending,
    #[default]
    Descending,
}

impl From<&str> for SortOrder {
    /// Only `ascending` (or `asc`) sorts ascending, anything else sorts descending.
    fn from(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "ascending" | "asc" => SortOrder::Ascending,
            _ => SortOrder::Descending,
        }
    }
}

impl<'de> Deserialize<'de> for SortOrder {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(SortOrder::from(value.as_str()))
    }
}

impl Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

///
/// Numeric range facet, start/end/gap of the buckets
///
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFacet {
    pub start: f64,
    pub end: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetOptions {
    pub field: Option<String>,
    /// Comma separated in the REST layer, already split here.
    pub fields: Vec<String>,
    pub query: Option<String>,
    pub prefix: Option<String>,
    pub ranges: BTreeMap<String, RangeFacet>,
}

impl FacetOptions {
    pub fn is_empty(&self) -> bool {
        self.field.is_none()
            && self.fields.is_empty()
            && self.query.is_none()
            && self.prefix.is_none()
            && self.ranges.is_empty()
    }
}

///
/// Pagination, sorting, projection and facet options that travel next to a query.
///
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryOptions {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    pub sort: Option<String>,
    pub order: SortOrder,
    pub count: bool,
    pub facet: FacetOptions,
}

impl QueryOptions {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_skip(mut self, skip: usize) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn with_sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some(field.to_string());
        self.order = order;
        self
    }
}
