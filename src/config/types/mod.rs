//! Configuration utility types.
//!
//! | Module   | Purpose                                  |
//! |----------|------------------------------------------|
//! | `error`  | Loading errors, collected problems       |
//! | `field`  | Settings that validation can reject      |

mod error;
mod field;

pub use error::{ConfigDiagnostics, ConfigError};
pub use field::ConfigField;
