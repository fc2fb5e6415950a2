use chrono::NaiveDate;

pub const COLUMN_COUNT: usize = 7;

pub const COLUMN_HEADERS: [&str; COLUMN_COUNT] = [
    "日付",
    "担当者名",
    "申請区分",
    "申請詳細",
    "借受人氏名",
    "貸付コード",
    "特記事項",
];

pub const DATE_FORMAT: &str = "%Y/%m/%d";

pub fn format_record_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// One logged request. The date is kept as its display string so that rows
/// read back from a workbook and rows entered through the form look the same.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    pub date: String,
    pub staff_name: String,
    pub request_categories: String,
    pub request_detail: String,
    pub borrower_name: String,
    pub loan_code: String,
    pub note: String,
}

impl Record {
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.staff_name.clone(),
            self.request_categories.clone(),
            self.request_detail.clone(),
            self.borrower_name.clone(),
            self.loan_code.clone(),
            self.note.clone(),
        ]
    }

    /// Builds a record from raw cells. Missing cells become empty strings and
    /// anything past the seventh column is dropped.
    pub fn from_row(row: &[String]) -> Self {
        let cell = |idx: usize| row.get(idx).cloned().unwrap_or_default();
        Self {
            date: cell(0),
            staff_name: cell(1),
            request_categories: cell(2),
            request_detail: cell(3),
            borrower_name: cell(4),
            loan_code: cell(5),
            note: cell(6),
        }
    }

    pub fn field(&self, col_idx: usize) -> Option<&str> {
        let value = match col_idx {
            0 => &self.date,
            1 => &self.staff_name,
            2 => &self.request_categories,
            3 => &self.request_detail,
            4 => &self.borrower_name,
            5 => &self.loan_code,
            6 => &self.note,
            _ => return None,
        };
        Some(value.as_str())
    }

    fn field_mut(&mut self, col_idx: usize) -> Option<&mut String> {
        match col_idx {
            0 => Some(&mut self.date),
            1 => Some(&mut self.staff_name),
            2 => Some(&mut self.request_categories),
            3 => Some(&mut self.request_detail),
            4 => Some(&mut self.borrower_name),
            5 => Some(&mut self.loan_code),
            6 => Some(&mut self.note),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordTable {
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        Self {
            records: rows.iter().map(|row| Record::from_row(row)).collect(),
        }
    }

    pub fn append(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Removes the row at `index`. No selection, or an index past the end,
    /// leaves the table as it was.
    pub fn remove_at(&mut self, index: Option<usize>) -> Option<Record> {
        let index = index?;
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    pub fn clear_and_replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    pub fn set_cell(&mut self, row_idx: usize, col_idx: usize, value: String) -> bool {
        match self
            .records
            .get_mut(row_idx)
            .and_then(|record| record.field_mut(col_idx))
        {
            Some(field) => {
                *field = value;
                true
            }
            None => false,
        }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_rows(&self) -> Vec<Vec<String>> {
        self.records.iter().map(Record::to_row).collect()
    }
}
