//! Configuration constants
//!
//! File names and defaults shared by the loaders and the entry point.

// ============================================================================
// Entry Point Defaults
// ============================================================================

/// Dataset converted when `--dataset` is not given
pub const DEFAULT_DATASET: &str = "ml-1m";

/// `--item_feature_name` value meaning "no item feature selected"
pub const NO_ITEM_FEATURE: &str = "none";

/// Environment variable consulted when `--input_path` is absent
pub const INPUT_PATH_ENV: &str = "LIGHTCONVERT_INPUT_PATH";

/// Environment variable consulted when `--output_path` is absent
pub const OUTPUT_PATH_ENV: &str = "LIGHTCONVERT_OUTPUT_PATH";

// ============================================================================
// Dataset File Layout
// ============================================================================

/// Movie metadata side table inside a MovieLens 20M/32M input directory
pub const MOVIE_META_FILE: &str = "meta.csv";

/// Directory-name prefix of every Amazon review subset
pub const AMAZON_PREFIX: &str = "Amazon_";

/// Placeholder written to the tag column for movies without metadata
pub const MISSING_TAGS: &str = "None";
