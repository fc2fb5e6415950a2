use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::DEFAULT_SHEET_NAME;
use crate::domain::entities::record::Record;

#[derive(Debug, Error)]
pub enum WorkbookError {
    #[error("no destination file was selected")]
    NoTarget,
    #[error("failed to open workbook {path}: {message}")]
    Open { path: PathBuf, message: String },
    #[error("failed to read sheet {sheet}: {message}")]
    SheetRead { sheet: String, message: String },
    #[error("failed to write workbook {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// File path and sheet name the session persists to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkbookTarget {
    pub path: PathBuf,
    pub sheet_name: String,
}

impl WorkbookTarget {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    #[allow(dead_code)]
    pub fn with_sheet(path: impl Into<PathBuf>, sheet_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            sheet_name: sheet_name.into(),
        }
    }
}

pub trait WorkbookStore: Send + Sync {
    fn ensure_initialized(&self, path: &Path, sheet_name: &str) -> Result<(), WorkbookError>;
    fn save(&self, path: &Path, sheet_name: &str, records: &[Record])
        -> Result<(), WorkbookError>;
    fn load(&self, path: &Path, sheet_name: &str) -> Result<Vec<Vec<String>>, WorkbookError>;
}
