//! Command-line interface
//!
//! Flags keep their underscore spellings (`--input_path`, `--convert_inter`)
//! so existing conversion scripts keep working.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::config::{DEFAULT_DATASET, INPUT_PATH_ENV, NO_ITEM_FEATURE, OUTPUT_PATH_ENV};
use crate::error::{ConvertError, Result};
use crate::loaders::{build_loader, DatasetPaths, LoaderOptions};
use crate::registry::{resolve, Capability, LoaderFamily, ResolvedDataset};
use crate::schema::Relation;

/// LightConvert - recommendation dataset converter
#[derive(Parser, Debug, Clone)]
#[command(name = "lightconvert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Dataset name, e.g. ml-100k, ml-20m or amazon_video_games
    #[arg(long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Directory holding the raw dataset files
    #[arg(long = "input_path", env = INPUT_PATH_ENV)]
    pub input_path: Option<PathBuf>,

    /// Directory the converted files are written to
    #[arg(long = "output_path", env = OUTPUT_PATH_ENV)]
    pub output_path: Option<PathBuf>,

    /// Interaction type, for datasets with several kinds of interaction
    #[arg(long = "interaction_type")]
    pub interaction_type: Option<String>,

    /// Drop duplicate interactions, for click datasets
    #[arg(long = "duplicate_removal")]
    pub duplicate_removal: bool,

    /// Item feature to emit, for datasets with several item feature sets
    #[arg(long = "item_feature_name", default_value = NO_ITEM_FEATURE)]
    pub item_feature_name: String,

    /// Merge movie metadata (meta.csv) into the item file
    #[arg(long = "meta_info")]
    pub meta_info: bool,

    /// Write the interaction file
    #[arg(long = "convert_inter")]
    pub convert_inter: bool,

    /// Write the item file
    #[arg(long = "convert_item")]
    pub convert_item: bool,

    /// Write the user file
    #[arg(long = "convert_user")]
    pub convert_user: bool,

    /// List supported dataset names and exit
    #[arg(long = "list_datasets")]
    pub list_datasets: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of one invocation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Relations written, with their row counts
    pub converted: Vec<(Relation, usize)>,
    /// Relations the dataset does not provide
    pub unsupported: Vec<Relation>,
}

impl Cli {
    /// Relations requested on the command line, in conversion order
    pub fn requested_relations(&self) -> Vec<Relation> {
        Relation::ALL
            .into_iter()
            .filter(|relation| match relation {
                Relation::Interaction => self.convert_inter,
                Relation::Item => self.convert_item,
                Relation::User => self.convert_user,
            })
            .collect()
    }

    /// Check required paths and resolve the dataset, before any file is read
    pub fn validate(&self) -> Result<(DatasetPaths, ResolvedDataset)> {
        let input = self
            .input_path
            .clone()
            .ok_or(ConvertError::MissingArgument("input_path"))?;
        let output = self
            .output_path
            .clone()
            .ok_or(ConvertError::MissingArgument("output_path"))?;

        let resolved = resolve(&self.dataset)?;
        let paths = DatasetPaths::new(input, output)?;
        Ok((paths, resolved))
    }

    /// Options the resolved family accepts; the rest are reported as ignored
    pub fn loader_options(&self, family: LoaderFamily) -> LoaderOptions {
        let requested = [
            (Capability::MetaInfo, self.meta_info),
            (Capability::InteractionType, self.interaction_type.is_some()),
            (Capability::DuplicateRemoval, self.duplicate_removal),
            (
                Capability::ItemFeatureName,
                self.item_feature_name != NO_ITEM_FEATURE,
            ),
        ];

        for (capability, set) in requested {
            if set && !family.accepts(capability) {
                warn!(dataset = %self.dataset, "Ignoring --{}: not used by this dataset", capability);
            }
        }

        LoaderOptions {
            meta_info: self.meta_info && family.accepts(Capability::MetaInfo),
        }
    }
}

/// Validate, build the loader and run the requested conversions
///
/// A relation the dataset lacks is logged and skipped; any other failure
/// stops the run.
pub fn run(cli: &Cli) -> Result<RunSummary> {
    let (paths, resolved) = cli.validate()?;
    let options = cli.loader_options(resolved.family);

    info!(
        dataset = %resolved.name,
        class = %resolved.class_name,
        input = %paths.input_dir.display(),
        output = %paths.output_dir.display(),
        "Resolved dataset"
    );

    let loader = build_loader(&resolved, paths, &options)?;

    let relations = cli.requested_relations();
    if relations.is_empty() {
        warn!("Nothing to do: pass --convert_inter, --convert_item or --convert_user");
    }

    let mut summary = RunSummary::default();
    for relation in relations {
        match loader.convert(relation) {
            Ok(rows) => summary.converted.push((relation, rows)),
            Err(e @ ConvertError::Unsupported { .. }) => {
                warn!("{}", e);
                summary.unsupported.push(relation);
            },
            Err(e) => return Err(e),
        }
    }

    info!(
        converted = summary.converted.len(),
        unsupported = summary.unsupported.len(),
        "Conversion complete"
    );
    Ok(summary)
}
