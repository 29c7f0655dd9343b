//! Dataset registry
//!
//! Static lookup from a dataset name (as typed on the command line) to the
//! loader class that converts it, plus the optional arguments each loader
//! family accepts.

use std::fmt;

use crate::error::{ConvertError, Result};

/// Loader implementations, one per raw file layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoaderFamily {
    /// MovieLens 100K and 1M, which ship user demographics
    MovieLensWithUsers,
    /// MovieLens 10M, 20M and 32M, with optional movie metadata
    MovieLensWithoutUsers,
    /// Amazon Reviews subsets (JSON-lines)
    Amazon,
}

/// Optional loader arguments gated by the registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Merge an external metadata table into the items
    MetaInfo,
    /// Choose one interaction type out of several
    InteractionType,
    /// Drop duplicate interactions
    DuplicateRemoval,
    /// Choose which item feature to emit
    ItemFeatureName,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = match self {
            Capability::MetaInfo => "meta_info",
            Capability::InteractionType => "interaction_type",
            Capability::DuplicateRemoval => "duplicate_removal",
            Capability::ItemFeatureName => "item_feature_name",
        };
        f.write_str(flag)
    }
}

impl LoaderFamily {
    /// Route a loader class name to its implementation
    ///
    /// Every `Amazon*` class shares one loader regardless of subset.
    pub fn from_class_name(class_name: &str) -> Option<Self> {
        match class_name {
            "MLUser" => Some(Self::MovieLensWithUsers),
            "MLwoUser" => Some(Self::MovieLensWithoutUsers),
            name if name.starts_with("Amazon") => Some(Self::Amazon),
            _ => None,
        }
    }

    /// Optional arguments this family's constructor takes
    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            Self::MovieLensWithoutUsers => &[Capability::MetaInfo],
            Self::MovieLensWithUsers | Self::Amazon => &[],
        }
    }

    pub fn accepts(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }
}

const MOVIELENS_DATASETS: &[(&str, &str)] = &[
    ("ml-100k", "MLUser"),
    ("ml-1m", "MLUser"),
    ("ml-10m", "MLwoUser"),
    ("ml-20m", "MLwoUser"),
    ("ml-32m", "MLwoUser"),
];

/// Amazon Reviews 2023 subsets; names are matched case-insensitively
const AMAZON_SUBSETS: &[&str] = &[
    "All_Beauty",
    "Amazon_Fashion",
    "Appliances",
    "Arts_Crafts_and_Sewing",
    "Automotive",
    "Baby_Products",
    "Beauty_and_Personal_Care",
    "Books",
    "CDs_and_Vinyl",
    "Cell_Phones_and_Accessories",
    "Clothing_Shoes_and_Jewelry",
    "Digital_Music",
    "Electronics",
    "Gift_Cards",
    "Grocery_and_Gourmet_Food",
    "Handmade_Products",
    "Health_and_Household",
    "Health_and_Personal_Care",
    "Home_and_Kitchen",
    "Industrial_and_Scientific",
    "Kindle_Store",
    "Magazine_Subscriptions",
    "Movies_and_TV",
    "Musical_Instruments",
    "Office_Products",
    "Patio_Lawn_and_Garden",
    "Pet_Supplies",
    "Software",
    "Sports_and_Outdoors",
    "Subscription_Boxes",
    "Tools_and_Home_Improvement",
    "Toys_and_Games",
    "Video_Games",
    "Unknown",
];

/// A registry hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDataset {
    /// Registry key (lowercase)
    pub name: String,
    /// Loader class name, e.g. `MLwoUser` or `Amazon_Video_Games`
    pub class_name: String,
    pub family: LoaderFamily,
}

/// Resolve a dataset name case-insensitively
pub fn resolve(dataset: &str) -> Result<ResolvedDataset> {
    let name = dataset.trim().to_lowercase();

    let class_name = MOVIELENS_DATASETS
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, class)| class.to_string())
        .or_else(|| {
            let subset = name.strip_prefix("amazon_")?;
            AMAZON_SUBSETS
                .iter()
                .find(|s| s.eq_ignore_ascii_case(subset))
                .map(|s| format!("Amazon_{}", s))
        })
        .ok_or_else(|| ConvertError::UnknownDataset(dataset.to_string()))?;

    let family = LoaderFamily::from_class_name(&class_name)
        .ok_or_else(|| ConvertError::UnknownDataset(dataset.to_string()))?;

    Ok(ResolvedDataset {
        name,
        class_name,
        family,
    })
}

/// Every registered dataset name
pub fn dataset_names() -> Vec<String> {
    MOVIELENS_DATASETS
        .iter()
        .map(|(name, _)| name.to_string())
        .chain(AMAZON_SUBSETS.iter().map(|s| format!("amazon_{}", s.to_lowercase())))
        .collect()
}
