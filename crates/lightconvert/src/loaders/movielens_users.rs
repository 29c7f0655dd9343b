//! MovieLens 100K and 1M
//!
//! The two oldest MovieLens releases, the only ones with per-user
//! demographics.
//!
//! | Variant | Interactions | Items | Users |
//! |---|---|---|---|
//! | ml-100k | `u.data` (tab) | `u.item` (pipe, Latin-1) | `u.user` (pipe) |
//! | ml-1m | `ratings.dat` | `movies.dat` (Latin-1) | `users.dat` |
//!
//! ml-1m files are `::`-separated.

use std::str::FromStr;
use tracing::{debug, warn};

use super::{interaction_fields, DatasetLoader, DatasetPaths};
use crate::error::{ConvertError, Result};
use crate::reader::{read_delimited, TextEncoding};
use crate::reshape::{
    collapse_one_hot, day_month_year_timestamp, split_release_year, strip_parenthesized_suffix,
    ML100K_GENRES,
};
use crate::schema::{Field, FieldMapping, Relation};
use crate::table::Table;

/// First one-hot genre column of `u.item`
const ML100K_GENRE_OFFSET: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieLensUserVariant {
    Ml100k,
    Ml1m,
}

impl FromStr for MovieLensUserVariant {
    type Err = ConvertError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "ml-100k" => Ok(Self::Ml100k),
            "ml-1m" => Ok(Self::Ml1m),
            other => Err(ConvertError::invalid_dataset(
                other,
                "allowed options are 'ml-100k' and 'ml-1m'",
            )),
        }
    }
}

impl MovieLensUserVariant {
    fn files(self) -> (&'static str, &'static str, &'static str) {
        match self {
            Self::Ml100k => ("u.data", "u.item", "u.user"),
            Self::Ml1m => ("ratings.dat", "movies.dat", "users.dat"),
        }
    }

    fn inter_separator(self) -> &'static str {
        match self {
            Self::Ml100k => "\t",
            Self::Ml1m => "::",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Self::Ml100k => "|",
            Self::Ml1m => "::",
        }
    }
}

pub struct MovieLensUserLoader {
    paths: DatasetPaths,
    variant: MovieLensUserVariant,
    inter_fields: FieldMapping,
    item_fields: FieldMapping,
    user_fields: FieldMapping,
}

impl MovieLensUserLoader {
    /// Fails with [`ConvertError::InvalidDataset`] unless the input directory is
    /// named `ml-100k` or `ml-1m`
    pub fn new(paths: DatasetPaths) -> Result<Self> {
        let variant: MovieLensUserVariant = paths.name.parse()?;

        let mut item_fields = FieldMapping::from_fields([
            Field::token("item_id"),
            Field::token("movie_title"),
            Field::float("date"),
            Field::token_seq("class"),
        ]);
        let mut user_fields = FieldMapping::from_fields([
            Field::token("user_id"),
            Field::token("age"),
            Field::token("gender"),
            Field::token("occupation"),
            Field::token("zip_code"),
        ]);

        if variant == MovieLensUserVariant::Ml1m {
            item_fields.set(2, Field::token("release_year"));
            user_fields.set(1, Field::token("gender"));
            user_fields.set(2, Field::token("age"));
        }

        Ok(Self {
            paths,
            variant,
            inter_fields: interaction_fields(),
            item_fields,
            user_fields,
        })
    }

    pub fn variant(&self) -> MovieLensUserVariant {
        self.variant
    }

    fn load_ml100k_items(&self, raw: Table) -> Table {
        let mut table = Table::new();
        let mut undated = 0usize;

        for row in raw.into_rows() {
            let genres = row
                .get(ML100K_GENRE_OFFSET..)
                .map(|cells| collapse_one_hot(cells, &ML100K_GENRES))
                .unwrap_or_default();

            let id = row.first().cloned().unwrap_or_default();
            let title = strip_parenthesized_suffix(row.get(1).map(String::as_str).unwrap_or(""));
            let date = row.get(2).map(String::as_str).unwrap_or("");
            let timestamp = match day_month_year_timestamp(date) {
                Some(ts) => ts.to_string(),
                None => {
                    if !date.trim().is_empty() {
                        warn!(item_id = %id, date = %date, "Unparseable release date");
                    }
                    undated += 1;
                    String::new()
                },
            };

            table.push_row(vec![id, title, timestamp, genres]);
        }

        if undated > 0 {
            debug!(undated, "Items without a release date");
        }
        table
    }
}

impl DatasetLoader for MovieLensUserLoader {
    fn paths(&self) -> &DatasetPaths {
        &self.paths
    }

    fn fields(&self, relation: Relation) -> Option<&FieldMapping> {
        match relation {
            Relation::Interaction => Some(&self.inter_fields),
            Relation::Item => Some(&self.item_fields),
            Relation::User => Some(&self.user_fields),
        }
    }

    fn load_interactions(&self) -> Result<Table> {
        let (file, _, _) = self.variant.files();
        read_delimited(
            &self.paths.input_file(file),
            self.variant.inter_separator(),
            TextEncoding::Utf8,
        )
    }

    fn load_items(&self) -> Result<Table> {
        let (_, file, _) = self.variant.files();
        let raw = read_delimited(
            &self.paths.input_file(file),
            self.variant.separator(),
            TextEncoding::Latin1,
        )?;

        match self.variant {
            MovieLensUserVariant::Ml100k => Ok(self.load_ml100k_items(raw)),
            MovieLensUserVariant::Ml1m => {
                let mut raw = raw;
                raw.truncate_columns(3);
                split_release_year(raw)
            },
        }
    }

    fn load_users(&self) -> Result<Table> {
        let (_, _, file) = self.variant.files();
        read_delimited(
            &self.paths.input_file(file),
            self.variant.separator(),
            TextEncoding::Utf8,
        )
    }
}
