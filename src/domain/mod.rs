pub mod entities;
pub mod kana;
