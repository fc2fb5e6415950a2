use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RequestCategory {
    StandardExemption,
    Deferral,
    AddressNameChange,
    InstallmentSlip,
    OptionalExemption,
    AmountChange,
    DirectDebit,
    StatusReport,
    Other,
}

impl RequestCategory {
    pub const ALL: [RequestCategory; 9] = [
        RequestCategory::StandardExemption,
        RequestCategory::Deferral,
        RequestCategory::AddressNameChange,
        RequestCategory::InstallmentSlip,
        RequestCategory::OptionalExemption,
        RequestCategory::AmountChange,
        RequestCategory::DirectDebit,
        RequestCategory::StatusReport,
        RequestCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RequestCategory::StandardExemption => "通常免除申請書",
            RequestCategory::Deferral => "猶予申告書",
            RequestCategory::AddressNameChange => "住所・氏名 変更届",
            RequestCategory::InstallmentSlip => "払込票（月賦）",
            RequestCategory::OptionalExemption => "任意免除申請書",
            RequestCategory::AmountChange => "変額申請書(少額・増額・一括口振)",
            RequestCategory::DirectDebit => "口振依頼書",
            RequestCategory::StatusReport => "状況申告状況",
            RequestCategory::Other => "その他",
        }
    }
}

/// Checked request categories. Backed by an ordered set keyed on the
/// enumeration order, so the summary never depends on click order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySelection {
    checked: BTreeSet<RequestCategory>,
}

impl CategorySelection {
    pub fn toggle(&mut self, category: RequestCategory) {
        if !self.checked.remove(&category) {
            self.checked.insert(category);
        }
    }

    #[allow(dead_code)]
    pub fn set(&mut self, category: RequestCategory, checked: bool) {
        if checked {
            self.checked.insert(category);
        } else {
            self.checked.remove(&category);
        }
    }

    pub fn is_checked(&self, category: RequestCategory) -> bool {
        self.checked.contains(&category)
    }

    pub fn reset(&mut self) {
        self.checked.clear();
    }

    pub fn selected(&self) -> Vec<&'static str> {
        self.checked.iter().map(|category| category.label()).collect()
    }

    pub fn summary(&self) -> String {
        self.selected().join(", ")
    }
}
