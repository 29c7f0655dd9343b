//! Output schema: relations, typed fields and field mappings
//!
//! A [`FieldMapping`] says which source column lands in which output column
//! and under which `name:type` header. Keys are source column indices and the
//! output columns are emitted in key order.

use std::collections::BTreeMap;
use std::fmt;

/// The three canonical relations a dataset can be converted into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Interaction,
    Item,
    User,
}

impl Relation {
    /// Every relation, in the order conversions run
    pub const ALL: [Relation; 3] = [Relation::Interaction, Relation::Item, Relation::User];

    /// Output file extension (`ml-1m.inter`, `ml-1m.item`, `ml-1m.user`)
    pub fn extension(self) -> &'static str {
        match self {
            Relation::Interaction => "inter",
            Relation::Item => "item",
            Relation::User => "user",
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Interaction => f.write_str("inter"),
            Relation::Item => f.write_str("item"),
            Relation::User => f.write_str("user"),
        }
    }
}

/// Semantic type tag read by the downstream training pipeline.
///
/// Never checked against the cell contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Token,
    Float,
    TokenSeq,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Token => f.write_str("token"),
            FieldType::Float => f.write_str("float"),
            FieldType::TokenSeq => f.write_str("token_seq"),
        }
    }
}

/// One output column: header name plus type tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub kind: FieldType,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: FieldType) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn token(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Token)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Float)
    }

    pub fn token_seq(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::TokenSeq)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.kind)
    }
}

/// Ordered projection from source column index to output field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    fields: BTreeMap<usize, Field>,
}

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mapping whose keys are the positions of `fields`
    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Self {
        Self {
            fields: fields.into_iter().enumerate().collect(),
        }
    }

    /// Insert or replace the field sourced from column `index`
    pub fn set(&mut self, index: usize, field: Field) {
        self.fields.insert(index, field);
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(&index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// `(source column, field)` pairs in emission order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Field)> {
        self.fields.iter().map(|(index, field)| (*index, field))
    }

    /// Header row: `name:type` per field
    pub fn headers(&self) -> Vec<String> {
        self.fields.values().map(Field::to_string).collect()
    }

    /// Keys run 0, 1, ..., len - 1 without gaps
    pub fn is_contiguous(&self) -> bool {
        self.fields.keys().copied().eq(0..self.fields.len())
    }
}
