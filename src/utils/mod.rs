pub mod comparators;
pub mod error;
pub mod logger;
pub mod validation;
