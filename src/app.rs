use std::sync::Arc;

use chrono::NaiveDate;
use dioxus::prelude::*;
use tracing::{error, info};

use crate::domain::entities::category::RequestCategory;
use crate::domain::entities::record::{COLUMN_COUNT, COLUMN_HEADERS};
use crate::infra::xlsx::store::XlsxWorkbookStore;
use crate::platform::desktop::dialogs::{
    pick_workbook_to_open, pick_workbook_to_save, show_error, show_info, show_warning,
};
use crate::ui::state::app_state::AppState;
use crate::usecase::ports::workbook::WorkbookError;
use crate::usecase::services::form_service::{apply_action, FormAction, FormField, FormState};
use crate::usecase::services::workbook_service::WorkbookService;

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";
const FIELD_STYLE: &str = "font-size: 14pt; padding: 4px; margin: 2px 0; width: 100%;";
const BUTTON_STYLE: &str = "font-size: 14pt; padding: 6px 12px;";

fn dispatch(mut form: Signal<FormState>, action: FormAction) {
    let next = apply_action(form(), action);
    form.set(next);
}

#[component]
fn TextField(
    form: Signal<FormState>,
    field: FormField,
    value: String,
    placeholder: &'static str,
) -> Element {
    rsx! {
        input {
            style: FIELD_STYLE,
            placeholder: placeholder,
            value: value,
            oninput: move |event| {
                dispatch(form, FormAction::SetText(field.clone(), event.value()));
            }
        }
    }
}

#[component]
fn CategoryPicker(form: Signal<FormState>) -> Element {
    let selection = form().fields.categories;
    let summary = selection.summary();

    rsx! {
        div { style: "border: 1px solid #ccc; padding: 4px; margin: 2px 0;",
            div { style: "display: flex; gap: 8px; align-items: center;",
                input {
                    style: FIELD_STYLE,
                    readonly: true,
                    placeholder: "申請区分を選択",
                    value: summary,
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| dispatch(form, FormAction::ResetCategories),
                    "リセット"
                }
            }
            div { style: "display: flex; flex-wrap: wrap; gap: 4px 16px;",
                for category in RequestCategory::ALL {
                    label { key: "{category:?}",
                        input {
                            r#type: "checkbox",
                            checked: selection.is_checked(category),
                            onchange: move |_| dispatch(form, FormAction::ToggleCategory(category)),
                        }
                        {category.label()}
                    }
                }
            }
        }
    }
}

#[component]
pub fn App() -> Element {
    let AppState {
        form,
        mut target,
        mut selected_row,
        mut status,
    } = AppState::new();

    let service = use_hook(|| Arc::new(WorkbookService::new(Arc::new(XlsxWorkbookStore))));
    let service_for_open = service.clone();
    let service_for_save = service.clone();

    let state = form();
    let fields = state.fields.clone();
    let records = state.table.records().to_vec();
    let table_is_empty = state.table.is_empty();
    let date_value = fields.date.format(DATE_INPUT_FORMAT).to_string();
    let target_label = target()
        .map(|t| format!("{}（{}）", t.path.display(), t.sheet_name))
        .unwrap_or_else(|| "未選択".to_string());
    let status_text = status();
    let selected = selected_row();

    rsx! {
        div { style: "font-family: Meiryo, sans-serif; font-size: 14pt; padding: 8px;",
            nav { style: "display: flex; gap: 12px; align-items: center; padding: 8px 0;",
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let Some(path) = pick_workbook_to_open() else {
                            *status.write() = "ファイル選択を取り消しました".to_string();
                            return;
                        };
                        match service_for_open.open(path) {
                            Ok((opened, loaded)) => {
                                let count = loaded.len();
                                dispatch(form, FormAction::ReplaceTable(loaded));
                                selected_row.set(None);
                                *status.write() =
                                    format!("{} を読み込みました（{count} 件）", opened.path.display());
                                target.set(Some(opened));
                            }
                            Err(err) => {
                                error!(%err, "failed to open workbook");
                                *status.write() = format!("読み込みに失敗しました：{err}");
                                show_error("読み込み失敗", &err.to_string());
                            }
                        }
                    },
                    "参照ファイルを開く"
                }
                span { "保存先：{target_label}" }
            }

            div { style: "display: flex; gap: 16px;",
                div { style: "flex: 1;",
                    input {
                        style: FIELD_STYLE,
                        r#type: "date",
                        value: date_value,
                        oninput: move |event| {
                            if let Ok(date) = NaiveDate::parse_from_str(&event.value(), DATE_INPUT_FORMAT) {
                                dispatch(form, FormAction::SetDate(date));
                            }
                        }
                    }
                    TextField {
                        form,
                        field: FormField::StaffName,
                        value: fields.staff_name.clone(),
                        placeholder: "担当者名",
                    }
                    CategoryPicker { form }
                    TextField {
                        form,
                        field: FormField::RequestDetail,
                        value: fields.request_detail.clone(),
                        placeholder: "申請詳細",
                    }
                }
                div { style: "flex: 1;",
                    div { style: "display: flex; gap: 8px;",
                        input {
                            style: FIELD_STYLE,
                            placeholder: "借受人氏名（ひらがな→Enterでカタカナ）",
                            value: fields.borrower_name.clone(),
                            oninput: move |event| {
                                dispatch(form, FormAction::SetText(FormField::BorrowerName, event.value()));
                            },
                            onkeydown: move |event| {
                                if event.key() == Key::Enter {
                                    dispatch(form, FormAction::ConvertBorrowerKana);
                                }
                            }
                        }
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| dispatch(form, FormAction::ConvertBorrowerKana),
                            "カナ変換"
                        }
                    }
                    TextField {
                        form,
                        field: FormField::LoanCode,
                        value: fields.loan_code.clone(),
                        placeholder: "貸付コード",
                    }
                    TextField {
                        form,
                        field: FormField::Note,
                        value: fields.note.clone(),
                        placeholder: "特記事項",
                    }
                }
            }

            div { style: "display: flex; gap: 12px; padding: 8px 0;",
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        dispatch(form, FormAction::AddEntry);
                        *status.write() = format!("追加しました（全 {} 件）", form().table.len());
                    },
                    "追加（入力内容を追加します。）"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let selected = selected_row();
                        if selected.is_none() {
                            *status.write() = "削除する行の番号を選択してください".to_string();
                            return;
                        }
                        dispatch(form, FormAction::DeleteRow(selected));
                        selected_row.set(None);
                        *status.write() = "行を削除しました".to_string();
                    },
                    "削除（間違えた行の数字を選択してから削除）"
                }
                button {
                    style: BUTTON_STYLE,
                    onclick: move |_| {
                        let current = target();
                        let chosen = if current.is_none() { pick_workbook_to_save() } else { None };
                        let snapshot = form();
                        match service_for_save.save(current.as_ref(), chosen, &snapshot.table) {
                            Ok(saved) => {
                                info!(path = %saved.path.display(), "save finished");
                                *status.write() = format!("{} に保存しました", saved.path.display());
                                target.set(Some(saved));
                                show_info("保存完了", "Excelに保存されました。");
                            }
                            Err(WorkbookError::NoTarget) => {
                                *status.write() = "保存を中止しました".to_string();
                                show_warning("保存中止", "保存先が選択されていません。");
                            }
                            Err(err) => {
                                error!(%err, "failed to save workbook");
                                *status.write() = format!("保存に失敗しました：{err}");
                                show_error("保存失敗", &err.to_string());
                            }
                        }
                    },
                    "保存（入力・変更した内容を保存）"
                }
            }

            if table_is_empty {
                p { style: "color: #666;", "まだ行がありません" }
            }
            table { style: "border-collapse: collapse; width: 100%;",
                thead {
                    tr {
                        th { "#" }
                        for header in COLUMN_HEADERS {
                            th { style: "border: 1px solid #ccc; padding: 4px;", "{header}" }
                        }
                    }
                }
                tbody {
                    for (row_idx, record) in records.iter().enumerate() {
                        tr {
                            key: "{row_idx}",
                            style: if selected == Some(row_idx) { "background: #dbeafe;" } else { "" },
                            td {
                                button {
                                    onclick: move |_| selected_row.set(Some(row_idx)),
                                    {(row_idx + 1).to_string()}
                                }
                            }
                            for col_idx in 0..COLUMN_COUNT {
                                td { style: "border: 1px solid #ccc;",
                                    input {
                                        style: "width: 100%; font-size: 14pt;",
                                        value: record.field(col_idx).unwrap_or_default().to_string(),
                                        oninput: move |event| {
                                            dispatch(
                                                form,
                                                FormAction::EditCell { row_idx, col_idx, value: event.value() },
                                            );
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }

            p { style: "color: #444; padding-top: 8px;", "{status_text}" }
        }
    }
}
