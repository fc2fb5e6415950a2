use chrono::NaiveDate;

use crate::domain::entities::category::CategorySelection;
use crate::domain::entities::record::{format_record_date, Record};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormFields {
    pub date: NaiveDate,
    pub staff_name: String,
    pub categories: CategorySelection,
    pub request_detail: String,
    pub borrower_name: String,
    pub loan_code: String,
    pub note: String,
}

impl FormFields {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            staff_name: String::new(),
            categories: CategorySelection::default(),
            request_detail: String::new(),
            borrower_name: String::new(),
            loan_code: String::new(),
            note: String::new(),
        }
    }

    pub fn to_record(&self) -> Record {
        Record {
            date: format_record_date(self.date),
            staff_name: self.staff_name.clone(),
            request_categories: self.categories.summary(),
            request_detail: self.request_detail.clone(),
            borrower_name: self.borrower_name.clone(),
            loan_code: self.loan_code.clone(),
            note: self.note.clone(),
        }
    }

    /// Empties every input except the date, which carries over to the next entry.
    pub fn clear_inputs(&mut self) {
        self.staff_name.clear();
        self.categories.reset();
        self.request_detail.clear();
        self.borrower_name.clear();
        self.loan_code.clear();
        self.note.clear();
    }
}
