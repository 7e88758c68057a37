//! Output formatting for catalogs and tool results

pub mod console;
pub mod formatter;
pub mod json;
