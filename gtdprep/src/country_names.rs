use std::collections::BTreeMap;

use log::debug;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::COL;

/// GTD spellings of country names that differ from the names used by the world-atlas country
/// boundaries, paired with the world-atlas spelling.
const WORLD_ATLAS_NAMES: [(&str, &str); 21] = [
    ("Dominican Republic", "Dominican Rep."),
    ("United States", "United States of America"),
    ("Cyprus", "N. Cyprus"),
    ("Western Sahara", "W. Sahara"),
    ("Vatican City", "Vatican"),
    ("Central African Republic", "Central African Rep."),
    ("Falkland Islands", "Falkland Is."),
    ("Republic of the Congo", "Congo"),
    ("Ivory Coast", "Côte d'Ivoire"),
    ("Antigua and Barbuda", "Antigua and Barb."),
    ("Bosnia-Herzegovina", "Bosnia and Herz."),
    ("Equatorial Guinea", "Eq. Guinea"),
    ("Slovak Republic", "Slovakia"),
    ("Wallis and Futuna", "Wallis and Futuna Is."),
    ("French Polynesia", "Fr. Polynesia"),
    ("Macau", "Macao"),
    ("Democratic Republic of the Congo", "Dem. Rep. Congo"),
    ("Solomon Islands", "Solomon Is."),
    ("East Timor", "Timor leste"),
    ("St. Lucia", "Saint Lucia"),
    ("South Sudan", "S. Sudan"),
];

/// Exact-match renaming of the `country_txt` column. Keys must appear verbatim in the data to
/// have any effect; there is no case folding or fuzzy matching.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct CountryNameMapping(BTreeMap<String, String>);

impl Default for CountryNameMapping {
    fn default() -> Self {
        WORLD_ATLAS_NAMES.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CountryNameMapping {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(from, to)| (from.into(), to.into()))
                .collect(),
        )
    }
}

impl CountryNameMapping {
    /// A mapping that leaves every name unchanged
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Renames matching `country_txt` values in place and returns how many cells changed.
    /// Nulls and unmatched names are kept, as are the row order and every other column
    /// (including the numeric `country` code).
    pub fn apply(&self, df: &mut DataFrame) -> Result<usize> {
        if self.is_empty() {
            return Ok(0);
        }
        let mut replaced = 0;
        let names: Vec<Option<&str>> = df
            .column(COL::COUNTRY_TXT)?
            .str()?
            .into_iter()
            .map(|name| {
                name.map(|name| match self.get(name) {
                    Some(target) => {
                        replaced += 1;
                        target
                    }
                    None => name,
                })
            })
            .collect();
        let names = Series::new(COL::COUNTRY_TXT, names);
        df.with_column(names)?;
        debug!("Renamed {replaced} `{}` values", COL::COUNTRY_TXT);
        Ok(replaced)
    }
}
