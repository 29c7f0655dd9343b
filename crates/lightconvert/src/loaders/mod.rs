//! Dataset loaders
//!
//! One loader per raw file layout. Each implements [`DatasetLoader`]: it knows
//! where its raw files live, how to read them into a [`Table`] and which
//! [`FieldMapping`] turns that table into each output relation.
//!
//! | Family | Datasets | Relations |
//! |---|---|---|
//! | [`MovieLensUserLoader`] | ml-100k, ml-1m | inter, item, user |
//! | [`MovieLensLoader`] | ml-10m, ml-20m, ml-32m | inter, item |
//! | [`AmazonLoader`] | Amazon_* | inter, item |

pub mod amazon;
pub mod movielens;
pub mod movielens_users;

pub use amazon::AmazonLoader;
pub use movielens::MovieLensLoader;
pub use movielens_users::MovieLensUserLoader;

use std::path::PathBuf;
use tracing::{info, info_span};

use crate::error::{ConvertError, Result};
use crate::progress::create_spinner;
use crate::projector::write_projection;
use crate::registry::{LoaderFamily, ResolvedDataset};
use crate::schema::{Field, FieldMapping, Relation};
use crate::table::Table;

/// Optional constructor arguments that passed the registry's capability check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Merge `meta.csv` into the item relation
    pub meta_info: bool,
}

/// Input and output locations of one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    /// Dataset identifier: the last component of the input path
    pub name: String,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl DatasetPaths {
    /// Derive the dataset identifier from `input_dir` without touching the
    /// filesystem
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<Self> {
        let input_dir = input_dir.into();
        let name = input_dir
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                ConvertError::invalid_dataset(
                    input_dir.display().to_string(),
                    "input path must end in a dataset directory name",
                )
            })?;

        Ok(Self {
            name,
            input_dir,
            output_dir: output_dir.into(),
        })
    }

    /// Raw file inside the dataset directory
    pub fn input_file(&self, file: &str) -> PathBuf {
        self.input_dir.join(file)
    }

    /// `<output_dir>/<name>.<ext>` for a relation
    pub fn output_file(&self, relation: Relation) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.name, relation.extension()))
    }
}

/// Interaction mapping shared by every family
pub(crate) fn interaction_fields() -> FieldMapping {
    FieldMapping::from_fields([
        Field::token("user_id"),
        Field::token("item_id"),
        Field::float("rating"),
        Field::float("timestamp"),
    ])
}

/// Common interface of all dataset loaders
pub trait DatasetLoader {
    fn paths(&self) -> &DatasetPaths;

    /// Field mapping of a relation, `None` when the dataset lacks it
    fn fields(&self, relation: Relation) -> Option<&FieldMapping>;

    fn load_interactions(&self) -> Result<Table>;

    fn load_items(&self) -> Result<Table>;

    fn load_users(&self) -> Result<Table> {
        Err(self.unsupported(Relation::User))
    }

    fn name(&self) -> &str {
        &self.paths().name
    }

    fn unsupported(&self, relation: Relation) -> ConvertError {
        ConvertError::Unsupported {
            dataset: self.name().to_string(),
            relation,
        }
    }

    fn load(&self, relation: Relation) -> Result<Table> {
        match relation {
            Relation::Interaction => self.load_interactions(),
            Relation::Item => self.load_items(),
            Relation::User => self.load_users(),
        }
    }

    /// Load one relation and write its TSV file; returns the row count
    fn convert(&self, relation: Relation) -> Result<usize> {
        let mapping = self
            .fields(relation)
            .ok_or_else(|| self.unsupported(relation))?;

        let span = info_span!("convert", dataset = %self.name(), relation = %relation);
        let _enter = span.enter();

        let spinner = create_spinner(format!("Converting {} {}", self.name(), relation));
        let result = self.load(relation).and_then(|table| {
            info!(rows = table.num_rows(), "Loaded {} rows", relation);
            write_projection(&table, mapping, &self.paths().output_file(relation))
        });
        spinner.finish_and_clear();
        result
    }
}

/// Construct the loader for a resolved dataset
///
/// Validation happens here, before any file is opened.
pub fn build_loader(
    resolved: &ResolvedDataset,
    paths: DatasetPaths,
    options: &LoaderOptions,
) -> Result<Box<dyn DatasetLoader>> {
    let loader: Box<dyn DatasetLoader> = match resolved.family {
        LoaderFamily::MovieLensWithUsers => Box::new(MovieLensUserLoader::new(paths)?),
        LoaderFamily::MovieLensWithoutUsers => {
            Box::new(MovieLensLoader::new(paths, options.meta_info)?)
        },
        LoaderFamily::Amazon => Box::new(AmazonLoader::new(paths)?),
    };
    Ok(loader)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::registry::resolve;

    #[test]
    fn test_dataset_paths_use_last_component() {
        let paths = DatasetPaths::new("raw/ml-100k", "out/ml-100k").unwrap();
        assert_eq!(paths.name, "ml-100k");
        assert_eq!(paths.input_file("u.data"), PathBuf::from("raw/ml-100k/u.data"));
        assert_eq!(
            paths.output_file(Relation::Item),
            PathBuf::from("out/ml-100k/ml-100k.item")
        );
    }

    #[test]
    fn test_dataset_paths_reject_root() {
        assert!(DatasetPaths::new("/", "out").is_err());
        assert!(DatasetPaths::new("..", "out").is_err());
    }

    #[test]
    fn test_build_loader_validates_before_io() {
        let resolved = resolve("ml-1m").unwrap();
        let paths = DatasetPaths::new("/nonexistent/ml-20m", "/nonexistent/out").unwrap();

        let err = build_loader(&resolved, paths, &LoaderOptions::default())
            .err()
            .unwrap();
        assert!(matches!(err, ConvertError::InvalidDataset { .. }));
    }

    #[test]
    fn test_interaction_fields() {
        assert_eq!(
            interaction_fields().headers(),
            vec!["user_id:token", "item_id:token", "rating:float", "timestamp:float"]
        );
    }
}
