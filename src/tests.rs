use std::fs;
use std::path::Path;
use std::sync::Arc;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use crate::domain::entities::record::{Record, RecordTable, COLUMN_HEADERS};
use crate::infra::xlsx::store::XlsxWorkbookStore;
use crate::infra::xlsx::workbook::{ensure_sheet_with_header, read_workbook};
use crate::usecase::ports::workbook::{WorkbookError, WorkbookStore, WorkbookTarget};
use crate::usecase::services::workbook_service::WorkbookService;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("should create temp dir")
}

fn record(idx: usize) -> Record {
    Record {
        date: format!("2024/04/{:02}", idx + 1),
        staff_name: format!("担当{idx}"),
        request_categories: "通常免除申請書, その他".to_string(),
        request_detail: "書類再送".to_string(),
        borrower_name: "ヤマダ タロウ".to_string(),
        loan_code: format!("L-{idx:04}"),
        note: if idx % 2 == 0 { String::new() } else { "至急".to_string() },
    }
}

fn table_of(count: usize) -> RecordTable {
    let mut table = RecordTable::new();
    for idx in 0..count {
        table.append(record(idx));
    }
    table
}

fn sheet_rows(path: &Path, sheet_name: &str) -> Vec<Vec<String>> {
    let mut workbook = open_workbook_auto(path).expect("should open xlsx");
    let range = workbook
        .worksheet_range(sheet_name)
        .expect("sheet should exist");
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::String(v) => v.clone(),
                    Data::Empty => String::new(),
                    other => format!("{other:?}"),
                })
                .collect()
        })
        .collect()
}

fn write_fixture(path: &Path, sheets: &[(&str, Vec<Vec<&str>>)]) {
    let mut workbook = Workbook::new();
    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(*name).expect("valid sheet name");
        for (row_idx, row) in rows.iter().enumerate() {
            for (col_idx, value) in row.iter().enumerate() {
                worksheet
                    .write_string(row_idx as u32, col_idx as u16, *value)
                    .expect("should write fixture cell");
            }
        }
    }
    workbook.save(path).expect("should save fixture");
}

fn header_row() -> Vec<String> {
    COLUMN_HEADERS.iter().map(|label| label.to_string()).collect()
}

#[test]
fn ensure_initialized_creates_file_with_header_only() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("requests.xlsx");

    XlsxWorkbookStore
        .ensure_initialized(&path, "Sheet1")
        .expect("ensure_initialized should succeed");

    let sheets = read_workbook(&path).expect("should read workbook");
    assert_eq!(sheets.len(), 1, "new file should hold a single sheet");
    assert_eq!(sheets[0].name, "Sheet1");
    assert_eq!(sheet_rows(&path, "Sheet1"), vec![header_row()]);
}

#[test]
fn ensure_initialized_twice_leaves_file_untouched() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("requests.xlsx");

    let created = ensure_sheet_with_header(&path, "Sheet1").expect("first call should succeed");
    let first = fs::read(&path).expect("should read file bytes");
    let created_again =
        ensure_sheet_with_header(&path, "Sheet1").expect("second call should succeed");
    let second = fs::read(&path).expect("should read file bytes");

    assert!(created, "first call should write the file");
    assert!(!created_again, "second call should not write");
    assert_eq!(first, second, "file bytes should be identical");
}

#[test]
fn ensure_initialized_adds_missing_sheet_and_keeps_others() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("existing.xlsx");
    write_fixture(
        &path,
        &[("集計", vec![vec!["月", "件数"], vec!["4月", "12"]])],
    );

    XlsxWorkbookStore
        .ensure_initialized(&path, "Sheet1")
        .expect("ensure_initialized should succeed");

    let names: Vec<String> = read_workbook(&path)
        .expect("should read workbook")
        .into_iter()
        .map(|sheet| sheet.name)
        .collect();
    assert_eq!(names, vec!["集計".to_string(), "Sheet1".to_string()]);
    assert_eq!(
        sheet_rows(&path, "集計"),
        vec![
            vec!["月".to_string(), "件数".to_string()],
            vec!["4月".to_string(), "12".to_string()],
        ],
        "other sheet should keep its values"
    );
    assert_eq!(sheet_rows(&path, "Sheet1"), vec![header_row()]);
}

#[test]
fn save_then_load_round_trips_rows_in_order() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("round-trip.xlsx");
    let table = table_of(4);
    let store = XlsxWorkbookStore;

    store
        .save(&path, "Sheet1", table.records())
        .expect("save should succeed");
    let rows = store.load(&path, "Sheet1").expect("load should succeed");

    assert_eq!(RecordTable::from_rows(&rows), table);
}

#[test]
fn save_then_load_keeps_trailing_empty_record() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("blank-tail.xlsx");
    let mut table = table_of(1);
    table.append(Record::default());
    let store = XlsxWorkbookStore;

    store
        .save(&path, "Sheet1", table.records())
        .expect("save should succeed");
    let rows = store.load(&path, "Sheet1").expect("load should succeed");

    assert_eq!(rows.len(), 2, "blank last row should be read back");
    assert_eq!(RecordTable::from_rows(&rows), table);
}

#[test]
fn save_shrinking_to_blank_rows_drops_old_values() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("blank-only.xlsx");
    let store = XlsxWorkbookStore;
    store
        .save(&path, "Sheet1", table_of(3).records())
        .expect("first save should succeed");

    let mut table = RecordTable::new();
    table.append(Record::default());
    store
        .save(&path, "Sheet1", table.records())
        .expect("second save should succeed");

    let rows = store.load(&path, "Sheet1").expect("load should succeed");
    assert_eq!(rows, vec![vec![String::new(); 7]]);
}

#[test]
fn ensure_initialized_keeps_formulas_in_other_sheets() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("formula.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("集計").expect("valid sheet name");
    worksheet.write_number(0, 0, 2.0).expect("should write number");
    worksheet
        .write_formula(0, 1, "=A1*2")
        .expect("should write formula");
    workbook.save(&path).expect("should save fixture");

    XlsxWorkbookStore
        .ensure_initialized(&path, "Sheet1")
        .expect("ensure_initialized should succeed");
    XlsxWorkbookStore
        .save(&path, "Sheet1", table_of(2).records())
        .expect("save should succeed");

    let mut reopened = open_workbook_auto(&path).expect("should open xlsx");
    let formulas = reopened
        .worksheet_formula("集計")
        .expect("formula range should be readable");
    assert_eq!(formulas.get_value((0, 1)), Some(&"A1*2".to_string()));
    let values = reopened
        .worksheet_range("集計")
        .expect("sheet should exist");
    assert_eq!(values.get_value((0, 0)), Some(&Data::Float(2.0)));
}

#[test]
fn save_overwrites_previous_data_rows() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("overwrite.xlsx");
    let header: Vec<&str> = COLUMN_HEADERS.to_vec();
    let mut rows = vec![header];
    for _ in 0..5 {
        rows.push(vec!["2023/01/01", "旧担当", "猶予申告書", "", "", "OLD", "古い行"]);
    }
    write_fixture(&path, &[("Sheet1", rows)]);
    let store = XlsxWorkbookStore;

    store
        .save(&path, "Sheet1", table_of(2).records())
        .expect("save should succeed");

    let loaded = store.load(&path, "Sheet1").expect("load should succeed");
    assert_eq!(loaded.len(), 2, "only the saved rows should remain");
    assert_eq!(RecordTable::from_rows(&loaded), table_of(2));
    assert_eq!(sheet_rows(&path, "Sheet1")[0], header_row());
}

#[test]
fn save_keeps_other_sheets() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("multi.xlsx");
    write_fixture(
        &path,
        &[
            ("メモ", vec![vec!["連絡先", "内線 123"]]),
            ("Sheet1", vec![COLUMN_HEADERS.to_vec()]),
        ],
    );

    XlsxWorkbookStore
        .save(&path, "Sheet1", table_of(1).records())
        .expect("save should succeed");

    assert_eq!(
        sheet_rows(&path, "メモ"),
        vec![vec!["連絡先".to_string(), "内線 123".to_string()]]
    );
}

#[test]
fn load_pads_short_rows_and_blank_cells() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("sparse.xlsx");
    let header: Vec<&str> = COLUMN_HEADERS.to_vec();
    write_fixture(
        &path,
        &[(
            "Sheet1",
            vec![
                header,
                vec!["2024/05/01", "佐藤"],
                vec!["", "", "", "", "", "", "メモのみ"],
            ],
        )],
    );

    let rows = XlsxWorkbookStore
        .load(&path, "Sheet1")
        .expect("load should succeed");

    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.len() == 7), "rows should have 7 columns");
    assert_eq!(rows[0][1], "佐藤");
    assert_eq!(rows[0][6], "");
    assert_eq!(rows[1][0], "");
    assert_eq!(rows[1][6], "メモのみ");
}

#[test]
fn load_reads_numeric_cells_as_text() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("numeric.xlsx");
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Sheet1").expect("valid sheet name");
    for (col_idx, label) in COLUMN_HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col_idx as u16, *label)
            .expect("should write header");
    }
    worksheet
        .write_number(1, 5, 12345.0)
        .expect("should write number");
    workbook.save(&path).expect("should save fixture");

    let rows = XlsxWorkbookStore
        .load(&path, "Sheet1")
        .expect("load should succeed");

    assert_eq!(rows[0][5], "12345");
}

#[test]
fn service_save_without_target_and_cancelled_prompt_writes_nothing() {
    let temp_dir = temp_dir();
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));

    let result = service.save(None, None, &table_of(3));

    assert!(matches!(result, Err(WorkbookError::NoTarget)));
    let entries = fs::read_dir(temp_dir.path())
        .expect("should list temp dir")
        .count();
    assert_eq!(entries, 0, "no file should be created");
}

#[test]
fn service_save_binds_chosen_path_as_target() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("申請データ.xlsx");
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));

    let target = service
        .save(None, Some(path.clone()), &table_of(2))
        .expect("save should succeed");

    assert_eq!(target, WorkbookTarget::new(path.clone()));
    assert!(path.exists());
}

#[test]
fn service_save_prefers_existing_target_over_prompt() {
    let temp_dir = temp_dir();
    let bound = temp_dir.path().join("bound.xlsx");
    let other = temp_dir.path().join("other.xlsx");
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));
    let current = WorkbookTarget::with_sheet(bound.clone(), "受付");

    let target = service
        .save(Some(&current), Some(other.clone()), &table_of(1))
        .expect("save should succeed");

    assert_eq!(target, current);
    assert!(bound.exists());
    assert!(!other.exists());
    assert_eq!(sheet_rows(&bound, "受付").len(), 2);
}

#[test]
fn service_open_initializes_missing_file_and_returns_empty_table() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("new.xlsx");
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));

    let (target, records) = service.open(path.clone()).expect("open should succeed");

    assert_eq!(target.sheet_name, "Sheet1");
    assert!(records.is_empty());
    assert_eq!(sheet_rows(&path, "Sheet1"), vec![header_row()]);
}

#[test]
fn service_open_reads_saved_records() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("saved.xlsx");
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));
    service
        .save(None, Some(path.clone()), &table_of(3))
        .expect("save should succeed");

    let (_, records) = service.open(path).expect("open should succeed");

    assert_eq!(records, table_of(3).records().to_vec());
}

#[test]
fn open_fails_on_non_workbook_file() {
    let temp_dir = temp_dir();
    let path = temp_dir.path().join("broken.xlsx");
    fs::write(&path, "not a workbook").expect("should write broken file");
    let service = WorkbookService::new(Arc::new(XlsxWorkbookStore));

    let result = service.open(path);

    assert!(matches!(result, Err(WorkbookError::Open { .. })));
}
