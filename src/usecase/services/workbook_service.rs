use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::entities::record::{Record, RecordTable};
use crate::usecase::ports::workbook::{WorkbookError, WorkbookStore, WorkbookTarget};

pub struct WorkbookService {
    store: Arc<dyn WorkbookStore>,
}

impl WorkbookService {
    pub fn new(store: Arc<dyn WorkbookStore>) -> Self {
        Self { store }
    }

    /// Binds the picked file, creating it or its sheet when missing, and
    /// returns its data rows for the caller to adopt as the new table.
    pub fn open(&self, path: PathBuf) -> Result<(WorkbookTarget, Vec<Record>), WorkbookError> {
        let target = WorkbookTarget::new(path);
        self.store
            .ensure_initialized(&target.path, &target.sheet_name)?;
        let rows = self.store.load(&target.path, &target.sheet_name)?;
        let records: Vec<Record> = rows.iter().map(|row| Record::from_row(row)).collect();
        info!(
            path = %target.path.display(),
            sheet = %target.sheet_name,
            rows = records.len(),
            "loaded workbook"
        );
        Ok((target, records))
    }

    /// Writes the table to the session target. Without a target, `chosen_path`
    /// (the answer of a save prompt) becomes the target; `None` there means the
    /// user cancelled and nothing is written.
    pub fn save(
        &self,
        current: Option<&WorkbookTarget>,
        chosen_path: Option<PathBuf>,
        table: &RecordTable,
    ) -> Result<WorkbookTarget, WorkbookError> {
        let target = match (current, chosen_path) {
            (Some(target), _) => target.clone(),
            (None, Some(path)) => WorkbookTarget::new(path),
            (None, None) => {
                warn!("save aborted: no destination selected");
                return Err(WorkbookError::NoTarget);
            }
        };

        self.store
            .save(&target.path, &target.sheet_name, table.records())?;
        info!(
            path = %target.path.display(),
            sheet = %target.sheet_name,
            rows = table.len(),
            "saved workbook"
        );
        Ok(target)
    }
}
