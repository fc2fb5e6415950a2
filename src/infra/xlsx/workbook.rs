use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader, Sheets};
use chrono::NaiveTime;
use rust_xlsxwriter::{Format, Formula, Workbook};
use tracing::{debug, info};

use crate::domain::entities::record::{Record, COLUMN_COUNT, COLUMN_HEADERS, DATE_FORMAT};

const DATE_NUM_FORMAT: &str = "yyyy/mm/dd";
const TEXT_NUM_FORMAT: &str = "@";

/// Cell values and formulas of one sheet at absolute (row, col) positions.
/// `Data::Empty` marks a blank cell that still has to be written so the row
/// keeps its place in the sheet dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetSnapshot {
    pub name: String,
    pub cells: Vec<(u32, u32, Data)>,
    pub formulas: Vec<(u32, u32, String)>,
}

impl SheetSnapshot {
    pub fn header_only(name: &str) -> Self {
        let cells = COLUMN_HEADERS
            .iter()
            .enumerate()
            .map(|(col_idx, label)| (0, col_idx as u32, Data::String(label.to_string())))
            .collect();
        Self {
            name: name.to_string(),
            cells,
            formulas: Vec::new(),
        }
    }

    /// Keeps the first row as it is and replaces everything below it. Empty
    /// strings become blank cells so that trailing empty records survive.
    pub fn replace_data_rows(&mut self, rows: &[Vec<String>]) {
        self.cells.retain(|(row_idx, _, _)| *row_idx == 0);
        self.formulas.retain(|(row_idx, _, _)| *row_idx == 0);
        if self.cells.is_empty() && self.formulas.is_empty() {
            *self = Self::header_only(&self.name);
        }
        for (idx, row) in rows.iter().enumerate() {
            let row_idx = idx as u32 + 1;
            for (col_idx, value) in row.iter().enumerate() {
                let cell = if value.is_empty() {
                    Data::Empty
                } else {
                    Data::String(value.clone())
                };
                self.cells.push((row_idx, col_idx as u32, cell));
            }
        }
    }

    pub fn last_row_idx(&self) -> u32 {
        self.cells
            .iter()
            .map(|(row_idx, _, _)| *row_idx)
            .chain(self.formulas.iter().map(|(row_idx, _, _)| *row_idx))
            .max()
            .unwrap_or(0)
    }
}

fn is_blank(value: &Data) -> bool {
    match value {
        Data::Empty => true,
        Data::String(text) => text.is_empty(),
        _ => false,
    }
}

pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::String(v) => v.to_string(),
        Data::Float(v) => v.to_string(),
        Data::Int(v) => v.to_string(),
        Data::Bool(v) => v.to_string(),
        Data::DateTime(v) => match v.as_datetime() {
            Some(dt) if dt.time() == NaiveTime::MIN => dt.date().format(DATE_FORMAT).to_string(),
            Some(dt) => dt.format("%Y/%m/%d %H:%M:%S").to_string(),
            None => v.to_string(),
        },
        Data::DateTimeIso(v) => v.to_string(),
        Data::DurationIso(v) => v.to_string(),
        Data::Error(v) => format!("{v:?}"),
        Data::Empty => String::new(),
    }
}

pub fn read_workbook(path: &Path) -> Result<Vec<SheetSnapshot>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open xlsx: {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        let range = workbook
            .worksheet_range(&name)
            .with_context(|| format!("failed to read sheet: {name}"))?;
        let (start_row, start_col) = range.start().unwrap_or((0, 0));
        let cells = range
            .used_cells()
            .filter(|(_, _, value)| !is_blank(value))
            .map(|(row, col, value)| {
                (start_row + row as u32, start_col + col as u32, value.clone())
            })
            .collect();

        let formula_range = workbook
            .worksheet_formula(&name)
            .with_context(|| format!("failed to read formulas of sheet: {name}"))?;
        let (start_row, start_col) = formula_range.start().unwrap_or((0, 0));
        let formulas = formula_range
            .used_cells()
            .filter(|(_, _, formula)| !formula.is_empty())
            .map(|(row, col, formula)| {
                (start_row + row as u32, start_col + col as u32, formula.clone())
            })
            .collect();

        sheets.push(SheetSnapshot {
            name,
            cells,
            formulas,
        });
    }
    Ok(sheets)
}

fn column(col: u32, sheet_name: &str) -> Result<u16> {
    u16::try_from(col).with_context(|| format!("column {col} out of range in sheet {sheet_name}"))
}

pub fn write_workbook(path: &Path, sheets: &[SheetSnapshot]) -> Result<()> {
    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format(DATE_NUM_FORMAT);
    let text_format = Format::new().set_num_format(TEXT_NUM_FORMAT);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .with_context(|| format!("invalid sheet name: {}", sheet.name))?;

        let cached: HashMap<(u32, u32), &Data> = sheet
            .cells
            .iter()
            .map(|(row, col, value)| ((*row, *col), value))
            .collect();
        for (row, col, formula) in &sheet.formulas {
            let result = cached
                .get(&(*row, *col))
                .map(|value| cell_to_string(value))
                .unwrap_or_default();
            worksheet
                .write_formula(
                    *row,
                    column(*col, &sheet.name)?,
                    Formula::new(formula).set_result(result),
                )
                .with_context(|| {
                    format!("failed to write formula ({row}, {col}) in sheet {}", sheet.name)
                })?;
        }
        let formula_cells: HashSet<(u32, u32)> = sheet
            .formulas
            .iter()
            .map(|(row, col, _)| (*row, *col))
            .collect();

        for (row, col, value) in &sheet.cells {
            if formula_cells.contains(&(*row, *col)) {
                continue;
            }
            let col = column(*col, &sheet.name)?;
            let written = match value {
                Data::String(v) | Data::DateTimeIso(v) | Data::DurationIso(v) => {
                    worksheet.write_string(*row, col, v.as_str()).map(|_| ())
                }
                Data::Float(v) => worksheet.write_number(*row, col, *v).map(|_| ()),
                Data::Int(v) => worksheet.write_number(*row, col, *v as f64).map(|_| ()),
                Data::Bool(v) => worksheet.write_boolean(*row, col, *v).map(|_| ()),
                Data::DateTime(v) => worksheet
                    .write_number_with_format(*row, col, v.as_f64(), &date_format)
                    .map(|_| ()),
                Data::Error(v) => worksheet
                    .write_string(*row, col, format!("{v}"))
                    .map(|_| ()),
                Data::Empty => worksheet.write_blank(*row, col, &text_format).map(|_| ()),
            };
            written.with_context(|| {
                format!("failed to write cell ({row}, {col}) in sheet {}", sheet.name)
            })?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("failed to save xlsx: {}", path.display()))?;
    Ok(())
}

/// Creates the file or the sheet with the header row when either is missing.
/// Returns whether anything was written.
pub fn ensure_sheet_with_header(path: &Path, sheet_name: &str) -> Result<bool> {
    if !path.exists() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
        }
        write_workbook(path, &[SheetSnapshot::header_only(sheet_name)])?;
        info!(path = %path.display(), sheet = sheet_name, "created workbook");
        return Ok(true);
    }

    let mut sheets = read_workbook(path)?;
    if sheets.iter().any(|sheet| sheet.name == sheet_name) {
        return Ok(false);
    }

    sheets.push(SheetSnapshot::header_only(sheet_name));
    write_workbook(path, &sheets)?;
    info!(path = %path.display(), sheet = sheet_name, "added sheet to workbook");
    Ok(true)
}

pub fn overwrite_sheet_rows(path: &Path, sheet_name: &str, records: &[Record]) -> Result<()> {
    ensure_sheet_with_header(path, sheet_name)?;

    let mut sheets = read_workbook(path)?;
    let sheet = sheets
        .iter_mut()
        .find(|sheet| sheet.name == sheet_name)
        .with_context(|| format!("sheet disappeared after initialization: {sheet_name}"))?;
    let previous_last_row = sheet.last_row_idx();
    let rows: Vec<Vec<String>> = records.iter().map(Record::to_row).collect();
    sheet.replace_data_rows(&rows);

    write_workbook(path, &sheets)?;
    debug!(
        path = %path.display(),
        sheet = sheet_name,
        previous_last_row,
        written_rows = rows.len(),
        "overwrote sheet rows"
    );
    Ok(())
}

/// Last row recorded in the sheet's `<dimension>`. Blank cells count there
/// while calamine's value range stops at the last non-blank cell.
fn declared_last_row(workbook: &mut Sheets<BufReader<File>>, sheet_name: &str) -> Option<u32> {
    match workbook {
        Sheets::Xlsx(xlsx) => xlsx
            .worksheet_cells_reader(sheet_name)
            .ok()
            .map(|reader| reader.dimensions().end.0),
        _ => None,
    }
}

pub fn read_sheet_rows(path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open xlsx: {}", path.display()))?;
    let declared_last = declared_last_row(&mut workbook, sheet_name);
    let range = workbook
        .worksheet_range(sheet_name)
        .with_context(|| format!("failed to read sheet: {sheet_name}"))?;

    let Some(last_row) = range.end().map(|(row, _)| row).max(declared_last) else {
        return Ok(Vec::new());
    };

    let rows = (1..=last_row)
        .map(|row_idx| {
            (0..COLUMN_COUNT as u32)
                .map(|col_idx| {
                    range
                        .get_value((row_idx, col_idx))
                        .map(cell_to_string)
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();
    Ok(rows)
}
