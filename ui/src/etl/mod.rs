//! Headless core of the "Create ETL" dialog.
//!
//! - [`form`]: draft state holder and submit gating
//! - [`merge`]: reconciles result columns with column edits
//! - [`validator`]: column name rules and hints
//! - [`submit`]: runs the injected create action
//! - [`advice`]: query run-time advisory

pub mod advice;
pub mod form;
pub mod merge;
pub mod submit;
pub mod validator;

pub use advice::{timeout_advice, TimeoutAdvice};
pub use form::{Draft, EtlForm, SubmitStatus};
pub use submit::{submit, SubmitEffects, SubmitOutcome, ETL_LIST_ROUTE};
pub use validator::{rule_from_pattern, Hint, NameRule, SharedNameRule};
