pub mod constants;
pub mod error_utils;
pub mod formatting;
