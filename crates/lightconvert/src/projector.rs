//! Field projection and TSV output
//!
//! [`write_projection`] selects the mapped columns of a table, writes them
//! under a `name:type` header as tab-separated text and moves the finished
//! file into place in one rename, so a failed run never leaves a truncated
//! output behind.

use std::fs;
use std::io::BufWriter;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{ConvertError, Result};
use crate::schema::FieldMapping;
use crate::table::Table;

/// Source columns to emit, in mapping order
///
/// A mapping whose keys are not `0..n`, or that references a column beyond
/// the table width, is a schema error. Cell contents are not checked against
/// the field types.
pub fn projected_columns(table: &Table, mapping: &FieldMapping) -> Result<Vec<usize>> {
    if !mapping.is_contiguous() {
        return Err(ConvertError::schema(format!(
            "field mapping keys must run from 0 to {} without gaps",
            mapping.len().saturating_sub(1)
        )));
    }

    let width = table.width();
    if let Some((index, field)) = mapping.iter().find(|(index, _)| *index >= width) {
        if !table.is_empty() {
            return Err(ConvertError::schema(format!(
                "field '{}' reads column {} but the table has only {} columns",
                field, index, width
            )));
        }
    }

    Ok(mapping.iter().map(|(index, _)| index).collect())
}

/// Project `table` through `mapping` and write it to `output`
///
/// Rows are streamed from the table into the writer; ragged rows are padded
/// with empty cells. Returns the number of data rows written. The parent
/// directory is created when missing.
pub fn write_projection(table: &Table, mapping: &FieldMapping, output: &Path) -> Result<usize> {
    let columns = projected_columns(table, mapping)?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(BufWriter::new(temp.as_file_mut()));

        writer.write_record(mapping.headers())?;
        for row in table.rows() {
            writer.write_record(
                columns
                    .iter()
                    .map(|&col| row.get(col).map(String::as_str).unwrap_or("")),
            )?;
        }

        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(output)?;

    let rows = table.num_rows();
    debug!(path = %output.display(), columns = columns.len(), "Wrote projection");
    info!(path = %output.display(), rows, "Wrote output file");

    Ok(rows)
}
