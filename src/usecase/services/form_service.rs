use chrono::NaiveDate;
use tracing::debug;

use crate::domain::entities::category::RequestCategory;
use crate::domain::entities::form::FormFields;
use crate::domain::entities::record::{Record, RecordTable};
use crate::domain::kana::hiragana_to_katakana;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub fields: FormFields,
    pub table: RecordTable,
}

impl FormState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            fields: FormFields::new(today),
            table: RecordTable::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormField {
    StaffName,
    RequestDetail,
    BorrowerName,
    LoanCode,
    Note,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    SetDate(NaiveDate),
    SetText(FormField, String),
    ToggleCategory(RequestCategory),
    ResetCategories,
    ConvertBorrowerKana,
    AddEntry,
    DeleteRow(Option<usize>),
    EditCell {
        row_idx: usize,
        col_idx: usize,
        value: String,
    },
    ReplaceTable(Vec<Record>),
}

pub fn apply_action(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetDate(date) => state.fields.date = date,
        FormAction::SetText(field, value) => {
            let target = match field {
                FormField::StaffName => &mut state.fields.staff_name,
                FormField::RequestDetail => &mut state.fields.request_detail,
                FormField::BorrowerName => &mut state.fields.borrower_name,
                FormField::LoanCode => &mut state.fields.loan_code,
                FormField::Note => &mut state.fields.note,
            };
            *target = value;
        }
        FormAction::ToggleCategory(category) => state.fields.categories.toggle(category),
        FormAction::ResetCategories => state.fields.categories.reset(),
        FormAction::ConvertBorrowerKana => {
            state.fields.borrower_name = hiragana_to_katakana(&state.fields.borrower_name);
        }
        FormAction::AddEntry => {
            let record = state.fields.to_record();
            debug!(row = state.table.len(), "appending record");
            state.table.append(record);
            state.fields.clear_inputs();
        }
        FormAction::DeleteRow(selected) => {
            if let Some(removed) = state.table.remove_at(selected) {
                debug!(?selected, staff = %removed.staff_name, "removed record");
            }
        }
        FormAction::EditCell {
            row_idx,
            col_idx,
            value,
        } => {
            state.table.set_cell(row_idx, col_idx, value);
        }
        FormAction::ReplaceTable(records) => state.table.clear_and_replace(records),
    }
    state
}
