//! MovieLens 10M, 20M and 32M
//!
//! These releases ship no user file. Items can optionally be enriched with a
//! side table `meta.csv` (movie id, tags, date, runtime, description).

use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info, warn};

use super::{interaction_fields, DatasetLoader, DatasetPaths};
use crate::config::{MISSING_TAGS, MOVIE_META_FILE};
use crate::error::{ConvertError, Result};
use crate::reader::{read_csv_with_header, read_delimited, TextEncoding};
use crate::reshape::{parse_list_literal, split_release_year};
use crate::schema::{Field, FieldMapping, Relation};
use crate::table::Table;

/// Item columns after the release-year split: id, title, year, genres
const ITEM_COLUMNS: usize = 4;

/// Metadata columns merged after the key: tags, date, runtime, description
const META_COLUMNS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieLensVariant {
    Ml10m,
    Ml20m,
    Ml32m,
}

impl FromStr for MovieLensVariant {
    type Err = ConvertError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ml-10m" => Ok(Self::Ml10m),
            "ml-20m" => Ok(Self::Ml20m),
            "ml-32m" => Ok(Self::Ml32m),
            other => Err(ConvertError::invalid_dataset(
                other,
                "allowed options are 'ml-10m', 'ml-20m' and 'ml-32m'",
            )),
        }
    }
}

impl MovieLensVariant {
    /// `.dat` files with `::` separators rather than CSV with a header
    fn is_dat(self) -> bool {
        matches!(self, Self::Ml10m)
    }

    fn files(self) -> (&'static str, &'static str) {
        if self.is_dat() {
            ("ratings.dat", "movies.dat")
        } else {
            ("ratings.csv", "movies.csv")
        }
    }
}

pub struct MovieLensLoader {
    paths: DatasetPaths,
    variant: MovieLensVariant,
    meta_info: bool,
    inter_fields: FieldMapping,
    item_fields: FieldMapping,
}

impl MovieLensLoader {
    /// Validate the dataset name and the metadata option
    ///
    /// `ml-10m` has no metadata side table, so it cannot be combined with
    /// `meta_info`.
    pub fn new(paths: DatasetPaths, meta_info: bool) -> Result<Self> {
        let variant: MovieLensVariant = paths.name.parse()?;
        if meta_info && variant == MovieLensVariant::Ml10m {
            return Err(ConvertError::IncompatibleOptions(
                "ml-10m does not support meta_info".to_string(),
            ));
        }

        let mut item_fields = FieldMapping::from_fields([
            Field::token("item_id"),
            Field::token_seq("movie_title"),
            Field::token("release_year"),
            Field::token_seq("class"),
        ]);
        if meta_info {
            item_fields.set(4, Field::token_seq("tag"));
            item_fields.set(5, Field::float("date"));
            item_fields.set(6, Field::token("runtime"));
            item_fields.set(7, Field::token_seq("description"));
        }

        Ok(Self {
            paths,
            variant,
            meta_info,
            inter_fields: interaction_fields(),
            item_fields,
        })
    }

    pub fn variant(&self) -> MovieLensVariant {
        self.variant
    }

    fn read_table(&self, file: &str, encoding: TextEncoding) -> Result<Table> {
        let path = self.paths.input_file(file);
        if self.variant.is_dat() {
            read_delimited(&path, "::", encoding)
        } else {
            Ok(read_csv_with_header(&path)?.table)
        }
    }
}

impl DatasetLoader for MovieLensLoader {
    fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    fn fields(&self, relation: Relation) -> Option<&FieldMapping> {
        match relation {
            Relation::Interaction => Some(&self.inter_fields),
            Relation::Item => Some(&self.item_fields),
            Relation::User => None,
        }
    }

    fn load_interactions(&self) -> Result<Table> {
        let (file, _) = self.variant.files();
        self.read_table(file, TextEncoding::Utf8)
    }

    fn load_items(&self) -> Result<Table> {
        let (_, file) = self.variant.files();
        let mut raw = self.read_table(file, TextEncoding::Latin1)?;
        raw.truncate_columns(3);
        let items = split_release_year(raw)?;

        if !self.meta_info {
            return Ok(items);
        }

        let meta = read_csv_with_header(&self.paths.input_file(MOVIE_META_FILE))?;
        debug!(columns = ?meta.headers, "Read movie metadata");
        Ok(merge_metadata(items, meta.table))
    }
}

/// Left-join metadata rows onto items by trimmed movie id
///
/// Item order is kept; an item with several metadata rows is repeated once
/// per match. The tags column is expanded from its list literal.
fn merge_metadata(items: Table, meta: Table) -> Table {
    let mut by_id: HashMap<String, Vec<Vec<String>>> = HashMap::new();
    for row in meta.into_rows() {
        let Some((key, values)) = row.split_first() else {
            continue;
        };
        let mut values = values.to_vec();
        values.resize(META_COLUMNS, String::new());
        by_id.entry(key.trim().to_string()).or_default().push(values);
    }

    let mut merged = Table::new();
    let mut unmatched = 0usize;
    let mut malformed = 0usize;

    for mut item in items.into_rows() {
        item.resize(ITEM_COLUMNS, String::new());
        let key = item[0].trim().to_string();

        match by_id.get(&key) {
            Some(matches) => {
                for values in matches {
                    let mut row = item.clone();
                    let tags = expand_tags(&values[0]).unwrap_or_else(|| {
                        warn!(item_id = %key, tags = %values[0], "Tags are not a list literal, keeping them verbatim");
                        malformed += 1;
                        values[0].clone()
                    });
                    row.push(tags);
                    row.extend(values[1..].iter().cloned());
                    merged.push_row(row);
                }
            },
            None => {
                unmatched += 1;
                item.push(MISSING_TAGS.to_string());
                item.extend(std::iter::repeat(String::new()).take(META_COLUMNS - 1));
                merged.push_row(item);
            },
        }
    }

    info!(rows = merged.num_rows(), unmatched, malformed, "Merged movie metadata");
    merged
}

/// `"['a', 'b']"` -> `"a, b"` and `"[]"` -> `""`; an empty cell gives the
/// missing-tags placeholder
fn expand_tags(cell: &str) -> Option<String> {
    if cell.trim().is_empty() {
        return Some(MISSING_TAGS.to_string());
    }
    parse_list_literal(cell).map(|tags| tags.join(", "))
}
