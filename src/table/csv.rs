use std::path::Path;

use csv::{ReaderBuilder, Trim};

use crate::foundation::error::{PlacegenError, PlacegenResult};
use crate::table::row::RawRow;

/// Read the input table into ordered untyped rows.
///
/// Returns `None` when the file does not exist (a "nothing to do" run, not an
/// error). The first line is a header and is discarded; data rows keep their
/// 1-based file line numbers, so the first returned row has `line == 2`.
///
/// A structural parse error aborts the whole read: row boundaries cannot be
/// trusted past the first malformed record.
pub fn read_rows(path: &Path) -> PlacegenResult<Option<Vec<RawRow>>> {
    if !path.exists() {
        return Ok(None);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| PlacegenError::parse(format!("open table '{}': {e}", path.display())))?;

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let line = idx + 2;
        let record =
            record.map_err(|e| PlacegenError::parse(format!("table row at line {line}: {e}")))?;
        rows.push(RawRow {
            line,
            fields: record.iter().map(str::to_string).collect(),
        });
    }

    Ok(Some(rows))
}

#[cfg(test)]
#[path = "../../tests/unit/table/csv.rs"]
mod tests;
