pub mod error;
pub mod report;
pub mod rules;
pub mod value;
pub mod value_path;
