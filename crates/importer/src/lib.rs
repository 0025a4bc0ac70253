pub mod error;
pub mod roster;

pub use error::{ImporterError, Result};
pub use roster::{
    models::RosterFile,
    transformer::{ImportOptions, ImportSummary, RosterImporter},
    validator::{RosterValidator, ValidationReport},
};
