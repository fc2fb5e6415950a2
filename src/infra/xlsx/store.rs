use std::path::Path;

use crate::domain::entities::record::Record;
use crate::infra::xlsx::workbook::{ensure_sheet_with_header, overwrite_sheet_rows, read_sheet_rows};
use crate::usecase::ports::workbook::{WorkbookError, WorkbookStore};

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxWorkbookStore;

impl WorkbookStore for XlsxWorkbookStore {
    fn ensure_initialized(&self, path: &Path, sheet_name: &str) -> Result<(), WorkbookError> {
        ensure_sheet_with_header(path, sheet_name)
            .map(|_| ())
            .map_err(|err| WorkbookError::Open {
                path: path.to_path_buf(),
                message: format!("{err:#}"),
            })
    }

    fn save(
        &self,
        path: &Path,
        sheet_name: &str,
        records: &[Record],
    ) -> Result<(), WorkbookError> {
        overwrite_sheet_rows(path, sheet_name, records).map_err(|err| WorkbookError::Write {
            path: path.to_path_buf(),
            message: format!("{err:#}"),
        })
    }

    fn load(&self, path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>, WorkbookError> {
        read_sheet_rows(path, sheet_name).map_err(|err| WorkbookError::SheetRead {
            sheet: sheet_name.to_string(),
            message: format!("{err:#}"),
        })
    }
}
