pub mod contract;
pub mod format;
pub mod records;
pub mod validation;
