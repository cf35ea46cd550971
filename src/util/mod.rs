//! Utility modules

pub mod format;
pub mod summation;
pub mod time;
