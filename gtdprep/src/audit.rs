use polars::frame::DataFrame;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Null counts for the columns of a frame that have at least one missing value, in column
/// order. Columns without missing values are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissingValueReport(Vec<(String, usize)>);

impl MissingValueReport {
    pub fn from_df(df: &DataFrame) -> Self {
        Self(
            df.get_columns()
                .iter()
                .filter(|series| series.null_count() > 0)
                .map(|series| (series.name().to_string(), series.null_count()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Missing count for `column`, `None` when the column has no missing values (or does not
    /// exist)
    pub fn get(&self, column: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// Total number of missing cells across all columns
    pub fn total(&self) -> usize {
        self.0.iter().map(|(_, count)| count).sum()
    }
}

// Serialised as an object keyed by column name, keeping column order.
impl Serialize for MissingValueReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}
