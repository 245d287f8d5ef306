//! Declarative assertions over rendered structured documents.
//!
//! Documents are parsed into [`serde_json::Value`] trees; validators resolve a
//! path inside the selected document and report pass/fail with line-oriented
//! failure messages.

pub mod cmd;
pub mod domain;
pub mod engine;
pub mod io;
pub mod util;
