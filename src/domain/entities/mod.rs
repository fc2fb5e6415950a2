pub mod category;
pub mod form;
pub mod record;
