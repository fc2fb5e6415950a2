pub mod form_service;
pub mod workbook_service;
