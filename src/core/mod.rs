// src/core/mod.rs

pub mod definition;
pub mod formatter;
pub mod i18n;
pub mod parser;
pub mod values;
pub mod wrapper;
