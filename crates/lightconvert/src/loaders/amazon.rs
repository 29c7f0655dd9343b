//! Amazon Reviews (2023)
//!
//! Each subset ships two JSON-lines files:
//! - `<Subset>.jsonl.gz`: one review per line
//! - `meta_<Subset>.jsonl`: one product per line
//!
//! Reviews are keyed by `parent_asin`, so products are too.

use serde_json::{Map, Value};
use tracing::info;

use super::{interaction_fields, DatasetLoader, DatasetPaths};
use crate::config::AMAZON_PREFIX;
use crate::error::{ConvertError, Result};
use crate::reader::{json_cell, read_gz_json_lines, read_json_lines};
use crate::reshape::{rejoin_categories, LenientDateParser};
use crate::schema::{Field, FieldMapping, Relation};
use crate::table::Table;

const INTERACTION_KEYS: [&str; 4] = ["user_id", "parent_asin", "rating", "timestamp"];

const DATE_DETAIL: &str = "Date First Available";

pub struct AmazonLoader {
    paths: DatasetPaths,
    subset: String,
    inter_fields: FieldMapping,
    item_fields: FieldMapping,
}

impl AmazonLoader {
    pub fn new(paths: DatasetPaths) -> Result<Self> {
        let subset = paths
            .name
            .strip_prefix(AMAZON_PREFIX)
            .filter(|subset| !subset.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                ConvertError::invalid_dataset(
                    &paths.name,
                    format!("Amazon datasets must be named '{}<Subset>'", AMAZON_PREFIX),
                )
            })?;

        Ok(Self {
            paths,
            subset,
            inter_fields: interaction_fields(),
            item_fields: FieldMapping::from_fields([
                Field::token("item_id"),
                Field::token("title"),
                Field::token_seq("description"),
                Field::token_seq("categories"),
                Field::float("price"),
                Field::float("date"),
            ]),
        })
    }

    /// Subset name, e.g. `Video_Games`
    pub fn subset(&self) -> &str {
        &self.subset
    }

    fn reviews_file(&self) -> String {
        format!("{}.jsonl.gz", self.subset)
    }

    fn products_file(&self) -> String {
        format!("meta_{}.jsonl", self.subset)
    }
}

impl DatasetLoader for AmazonLoader {
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
        let parsed = read_gz_json_lines(&self.paths.input_file(&self.reviews_file()))?;

        let rows = parsed
            .records
            .iter()
            .map(|record| {
                INTERACTION_KEYS
                    .iter()
                    .map(|key| json_cell(record.get(*key)))
                    .collect()
            })
            .collect();

        info!(
            subset = %self.subset,
            records = parsed.records.len(),
            skipped = parsed.skipped,
            "Parsed reviews"
        );
        Ok(Table::from_rows(rows))
    }

    fn load_items(&self) -> Result<Table> {
        let parsed = read_json_lines(&self.paths.input_file(&self.products_file()))?;
        let dates = LenientDateParser::new()?;

        let rows = parsed
            .records
            .iter()
            .map(|record| product_row(record, &dates))
            .collect();

        info!(
            subset = %self.subset,
            records = parsed.records.len(),
            skipped = parsed.skipped,
            "Parsed products"
        );
        Ok(Table::from_rows(rows))
    }
}

/// id, title, description, categories, price, date
fn product_row(record: &Map<String, Value>, dates: &LenientDateParser) -> Vec<String> {
    let description = match record.get("description") {
        Some(Value::Array(lines)) => json_cell(lines.first()),
        _ => String::new(),
    };

    let categories: Vec<String> = match record.get("categories") {
        Some(Value::Array(values)) => values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    let price = match record.get("price") {
        None | Some(Value::Null) => "0".to_string(),
        price => json_cell(price),
    };

    let date = record
        .get("details")
        .and_then(|details| details.get(DATE_DETAIL))
        .and_then(Value::as_str)
        .and_then(|value| dates.timestamp(value))
        .map(|ts| ts.to_string())
        .unwrap_or_default();

    vec![
        json_cell(record.get("parent_asin")),
        json_cell(record.get("title")),
        description,
        rejoin_categories(&categories),
        price,
        date,
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn loader(name: &str) -> Result<AmazonLoader> {
        AmazonLoader::new(DatasetPaths::new(format!("/nonexistent/{}", name), "/tmp/out")?)
    }

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {}", other),
        }
    }

    #[test]
    fn test_subset_from_name() {
        let games = loader("Amazon_Video_Games").unwrap();
        assert_eq!(games.subset(), "Video_Games");
        assert_eq!(games.reviews_file(), "Video_Games.jsonl.gz");
        assert_eq!(games.products_file(), "meta_Video_Games.jsonl");
        assert!(games.fields(Relation::User).is_none());
    }

    #[test]
    fn test_rejects_other_datasets_without_io() {
        for name in ["ml-100k", "amazon_books", "Amazon_"] {
            let err = loader(name).err().unwrap();
            assert!(matches!(err, ConvertError::InvalidDataset { .. }), "{}", name);
        }
    }

    #[test]
    fn test_product_row() {
        let dates = LenientDateParser::new().unwrap();
        let record = object(json!({
            "parent_asin": "B01N",
            "title": "HDMI Cable",
            "description": ["Six feet of cable.", "Gold plated."],
            "categories": ["Video Games", "Accessories", "Cables"],
            "price": 7.99,
            "details": {"Date First Available": "January 1, 1995"}
        }));

        assert_eq!(
            product_row(&record, &dates),
            vec!["B01N", "HDMI Cable", "Six feet of cable.", "Accessories, Cables", "7.99", "788918400"]
        );
    }

    #[test]
    fn test_product_row_missing_fields() {
        let dates = LenientDateParser::new().unwrap();
        let record = object(json!({
            "parent_asin": "B02X",
            "title": "Controller",
            "description": [],
            "categories": ["Video Games"],
            "price": null,
            "details": {"Date First Available": "someday"}
        }));

        assert_eq!(
            product_row(&record, &dates),
            vec!["B02X", "Controller", "", "", "0", ""]
        );
    }
}
