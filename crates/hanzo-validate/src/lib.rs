//! # Hanzo Validate
//!
//! Declarative record validation and input sanitization.
//!
//! Give it a record of field values and a schema of per-field rules; it
//! returns a verdict, a localized error for the first failing field, and a
//! copy of the record with markup, script and SQL metacharacters stripped
//! from fields that ask for it.
//!
//! - **Rules**: `required`, `minLength`, `maxLength`, `type`, `regex`,
//!   `sanitize`; unknown rule names are ignored
//! - **Types**: string, number, boolean, array, object, date, email
//! - **Locales**: `en` (fallback), `es`, `fr`
//! - **Fail-fast**: validation stops at the first failing field
//!
//! ## Quick Start
//!
//! ```rust
//! use hanzo_validate::{validate, record_from_json, Schema, ValidateOptions};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::from_json(&json!({
//!         "username": {"required": true, "minLength": 3, "sanitize": true},
//!         "email": {"required": true, "type": "email"},
//!     }))?;
//!     let data = record_from_json(json!({
//!         "username": "  <b>jo</b>hn ",
//!         "email": "john@example.com",
//!     }))?;
//!
//!     let result = validate(&data, &schema, &ValidateOptions::new().with_locale("fr"));
//!
//!     if result.is_valid {
//!         println!("Clean: {:?}", result.sanitized_data["username"]);
//!     } else {
//!         for (field, message) in &result.errors {
//!             println!("{}: {}", field, message);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────────────┐
//! │ data+schema │ ──► │ Validator                    │
//! └─────────────┘     │  for each field, each rule:  │
//!                     │ ┌──────────┐  ┌────────────┐ │
//!                     │ │ Rule     │─►│ Type       │ │
//!                     │ │ dispatch │  │ checkers   │ │
//!                     │ └──────────┘  └────────────┘ │
//!                     │      │        ┌────────────┐ │
//!                     │      ├───────►│ Sanitizer  │ │
//!                     │      │        └────────────┘ │
//!                     │      ▼ first failure         │
//!                     │ ┌──────────┐                 │
//!                     │ │ Messages │                 │
//!                     │ └──────────┘                 │
//!                     └──────────────────────────────┘
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod messages;
pub mod patterns;
pub mod rules;
pub mod sanitize;
pub mod schema;
pub mod types;
pub mod types_check;
pub mod validator;

pub use config::ValidatorConfig;
pub use error::{Result, ValidateError};
pub use messages::message;
pub use rules::{Outcome, Rule, TypeRule};
pub use sanitize::{sanitize, sanitize_str};
pub use schema::{RuleSet, Schema};
pub use types::*;
pub use types_check::TypeName;
pub use validator::{validate, Validator, ValidatorBuilder};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::ValidatorConfig;
    pub use crate::error::{Result, ValidateError};
    pub use crate::schema::{RuleSet, Schema};
    pub use crate::types::*;
    pub use crate::types_check::TypeName;
    pub use crate::validator::{validate, Validator};
}
