//! In-memory table of string cells
//!
//! Loaders read raw files into a [`Table`], reshape it column by column and
//! hand it to the projector. An empty cell stands for a missing value.

/// Row-major table of string cells
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.rows
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Widest row; ragged rows count as padded with empty cells
    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    /// Keep only the first `count` columns of every row
    pub fn truncate_columns(&mut self, count: usize) {
        for row in &mut self.rows {
            row.truncate(count);
        }
    }

    /// Rewrite every cell of `column` in place; short rows are padded first
    pub fn map_column<F>(&mut self, column: usize, mut f: F)
    where
        F: FnMut(&str) -> String,
    {
        for row in &mut self.rows {
            if row.len() <= column {
                row.resize(column + 1, String::new());
            }
            row[column] = f(&row[column]);
        }
    }
}
