use chrono::Local;
use dioxus::prelude::{use_signal, Signal};

use crate::usecase::ports::workbook::WorkbookTarget;
use crate::usecase::services::form_service::FormState;

pub struct AppState {
    pub form: Signal<FormState>,
    pub target: Signal<Option<WorkbookTarget>>,
    pub selected_row: Signal<Option<usize>>,
    pub status: Signal<String>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            form: use_signal(|| FormState::new(Local::now().date_naive())),
            target: use_signal(|| None::<WorkbookTarget>),
            selected_row: use_signal(|| None::<usize>),
            status: use_signal(|| "準備完了".to_string()),
        }
    }
}
