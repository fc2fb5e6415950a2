use std::path::PathBuf;

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};

use crate::config::{DEFAULT_SAVE_FILE_NAME, XLSX_EXTENSIONS, XLSX_FILTER_NAME};

pub fn pick_workbook_to_open() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("ファイルを選択")
        .add_filter(XLSX_FILTER_NAME, &XLSX_EXTENSIONS)
        .pick_file()
}

pub fn pick_workbook_to_save() -> Option<PathBuf> {
    FileDialog::new()
        .set_title("保存ファイルを選択")
        .set_file_name(DEFAULT_SAVE_FILE_NAME)
        .add_filter(XLSX_FILTER_NAME, &XLSX_EXTENSIONS)
        .save_file()
}

fn show_message(level: MessageLevel, title: &str, description: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(description)
        .set_buttons(MessageButtons::Ok)
        .show();
}

pub fn show_info(title: &str, description: &str) {
    show_message(MessageLevel::Info, title, description);
}

pub fn show_warning(title: &str, description: &str) {
    show_message(MessageLevel::Warning, title, description);
}

pub fn show_error(title: &str, description: &str) {
    show_message(MessageLevel::Error, title, description);
}
