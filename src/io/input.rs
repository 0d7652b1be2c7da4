use std::path::Path;

use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use tracing::info;

use crate::error::TakeError;
use crate::stages::RawRow;

const REQUIRED_COLUMNS: [&str; 5] = ["IN", "OUT", "PERSONAJE", "DIÁLOGO", "SCENE"];

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt.to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERROR: {e:?}"),
    }
}

/// Reads the first worksheet of the spreadsheet at `path` into raw rows,
/// matching columns by header name rather than position.
///
/// Fails fast with [`TakeError::MissingColumn`] if any required column is
/// absent from the header row; this is the crate's only validation that
/// aborts the pipeline outright rather than recovering in place.
pub fn read_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening spreadsheet {}", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("spreadsheet has no worksheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet {sheet_name:?}"))?;

    let mut rows = range.rows();
    let header = rows.next().ok_or_else(|| anyhow!("spreadsheet has no header row"))?;

    let mut column_index = std::collections::HashMap::new();
    for (i, cell) in header.iter().enumerate() {
        column_index.insert(cell_to_string(cell).trim().to_uppercase(), i);
    }

    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    for &name in &REQUIRED_COLUMNS {
        let idx = column_index
            .get(name)
            .copied()
            .ok_or_else(|| TakeError::MissingColumn(name.to_string()))?;
        indices.push(idx);
    }
    let [in_idx, out_idx, speaker_idx, dialogue_idx, scene_idx]: [usize; 5] =
        indices.try_into().unwrap();

    let raw_rows: Vec<RawRow> = rows
        .filter(|row| row.iter().any(|c| !matches!(c, Data::Empty)))
        .map(|row| RawRow {
            in_raw: cell_to_string(&row[in_idx]),
            out_raw: cell_to_string(&row[out_idx]),
            speaker: cell_to_string(&row[speaker_idx]),
            dialogue: cell_to_string(&row[dialogue_idx]),
            scene: cell_to_string(&row[scene_idx]),
        })
        .collect();

    info!(rows = raw_rows.len(), sheet = %sheet_name, "read input spreadsheet");

    Ok(raw_rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    #[test]
    fn cell_to_string_covers_every_variant() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("x".into())), "x");
        assert_eq!(cell_to_string(&Data::Int(3)), "3");
        assert_eq!(cell_to_string(&Data::Bool(true)), "true");
    }

    #[test]
    fn reads_rows_by_header_name_regardless_of_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        // Columns deliberately out of the crate's canonical order.
        let headers = ["SCENE", "PERSONAJE", "IN", "OUT", "DIÁLOGO"];
        for (col, header) in headers.iter().enumerate() {
            sheet.write(0, col as u16, *header).unwrap();
        }
        sheet.write(1, 0, "1").unwrap();
        sheet.write(1, 1, "ANA").unwrap();
        sheet.write(1, 2, "00:00:00:00").unwrap();
        sheet.write(1, 3, "00:00:01:00").unwrap();
        sheet.write(1, 4, "hola").unwrap();
        workbook.save(&path).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].scene, "1");
        assert_eq!(rows[0].speaker, "ANA");
        assert_eq!(rows[0].in_raw, "00:00:00:00");
        assert_eq!(rows[0].out_raw, "00:00:01:00");
        assert_eq!(rows[0].dialogue, "hola");
    }

    #[test]
    fn missing_column_is_a_fatal_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in ["IN", "OUT", "PERSONAJE"].iter().enumerate() {
            sheet.write(0, col as u16, *header).unwrap();
        }
        workbook.save(&path).unwrap();

        let err = read_rows(&path).unwrap_err();
        assert!(err.downcast_ref::<TakeError>().is_some());
    }

    #[test]
    fn blank_rows_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write(0, col as u16, *header).unwrap();
        }
        sheet.write(1, 0, "00:00:00:00").unwrap();
        sheet.write(1, 1, "00:00:01:00").unwrap();
        sheet.write(1, 2, "ANA").unwrap();
        sheet.write(1, 3, "hola").unwrap();
        sheet.write(1, 4, "1").unwrap();
        // Row 2 left entirely blank.
        workbook.save(&path).unwrap();

        let rows = read_rows(&path).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
