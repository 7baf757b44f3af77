pub mod envelope;
pub mod error;
pub mod identifiers;
pub mod logger;
pub mod reputation;
pub mod validation;
