use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;

pub const WINDOW_TITLE: &str = "発送依頼アプリ";
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";
pub const DEFAULT_SAVE_FILE_NAME: &str = "申請データ.xlsx";
pub const XLSX_FILTER_NAME: &str = "Excel Files";
pub const XLSX_EXTENSIONS: [&str; 1] = ["xlsx"];
pub const LOG_DIRECTIVE: &str = "loan_request_form=info";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("com", "hellhbbd", "loan-request-form")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

fn ensure_webview_data_dir(base_data_dir: &Path) -> Result<PathBuf> {
    let webview_data_dir = base_data_dir.join("webview2");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

pub fn default_webview_data_dir() -> Result<PathBuf> {
    ensure_webview_data_dir(project_dirs()?.data_local_dir())
}
