//! Staging requests and their outcome
//!
//! Staging is file-granular: a specifier that matches nothing is reported and
//! skipped while the remaining files are still staged.

pub mod add_report;
pub mod add_target;
