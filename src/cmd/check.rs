use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::error::SuiteError;
use crate::domain::report::SuiteReport;
use crate::domain::rules::AssertionSuite;
use crate::engine::r#assert;
use crate::io::{self, Format, IoError};

/// Input arguments for the check command execution API.
#[derive(Debug, Clone)]
pub struct CheckCommandArgs {
    pub input: Option<PathBuf>,
    pub from: Option<Format>,
    pub suite: PathBuf,
}

/// Structured command response that carries exit-code mapping and JSON payload.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CheckCommandResponse {
    pub exit_code: i32,
    pub payload: Value,
}

pub fn run_with_stdin<R: Read>(args: &CheckCommandArgs, stdin: R) -> CheckCommandResponse {
    match execute(args, stdin) {
        Ok(report) => report_response(report),
        Err(InputUsage(message)) => CheckCommandResponse {
            exit_code: 3,
            payload: json!({
                "error": "input_usage_error",
                "message": message,
            }),
        },
    }
}

pub fn pipeline_steps() -> Vec<String> {
    [
        "load_suite",
        "resolve_input_format",
        "read_documents",
        "validate_assertions",
    ]
    .into_iter()
    .map(ToOwned::to_owned)
    .collect()
}

pub fn deterministic_guards() -> Vec<String> {
    [
        "assertions_run_in_declaration_order",
        "failure_payloads_render_yaml_with_sorted_keys",
    ]
    .into_iter()
    .map(ToOwned::to_owned)
    .collect()
}

fn report_response(report: SuiteReport) -> CheckCommandResponse {
    let exit_code = if report.passed { 0 } else { 2 };
    match serde_json::to_value(&report) {
        Ok(payload) => CheckCommandResponse { exit_code, payload },
        Err(_) => CheckCommandResponse {
            exit_code: 1,
            payload: json!({
                "error": "internal_error",
                "message": "failed to serialize check report"
            }),
        },
    }
}

fn execute<R: Read>(args: &CheckCommandArgs, stdin: R) -> Result<SuiteReport, InputUsage> {
    let suite = load_suite(&args.suite).map_err(InputUsage::from)?;
    let input_format = io::resolve_input_format(args.from, args.input.as_deref())
        .map_err(map_io_as_input_usage)?;
    let documents = load_documents(args, stdin, input_format)?;
    r#assert::execute_suite(&documents, &suite).map_err(InputUsage::from)
}

/// Loads and schema-checks a suite file; the format follows the extension.
pub fn load_suite(path: &Path) -> Result<AssertionSuite, SuiteError> {
    let display = path.display().to_string();
    let format = io::resolve_input_format(None, Some(path)).map_err(|source| {
        SuiteError::ResolveFormat {
            path: display.clone(),
            source,
        }
    })?;
    let file = File::open(path).map_err(|source| SuiteError::OpenFile {
        path: display.clone(),
        source,
    })?;
    let documents = io::reader::read_documents(file, format).map_err(|source| {
        SuiteError::Read {
            path: display.clone(),
            source,
        }
    })?;
    if documents.len() != 1 {
        return Err(SuiteError::DocumentCount {
            found: documents.len(),
        });
    }
    let suite_value = documents.into_iter().next().unwrap_or(Value::Null);
    let suite = serde_json::from_value(suite_value).map_err(|source| SuiteError::Schema { source })?;
    r#assert::compile_suite(&suite)?;
    Ok(suite)
}

fn load_documents<R: Read>(
    args: &CheckCommandArgs,
    stdin: R,
    format: Format,
) -> Result<Vec<Value>, InputUsage> {
    if let Some(path) = &args.input {
        let file = File::open(path).map_err(|err| {
            InputUsage(format!(
                "failed to open input file `{}`: {err}",
                path.display()
            ))
        })?;
        io::reader::read_documents(file, format).map_err(map_io_as_input_usage)
    } else {
        io::reader::read_documents(stdin, format).map_err(map_io_as_input_usage)
    }
}

fn map_io_as_input_usage(error: IoError) -> InputUsage {
    InputUsage(error.to_string())
}

/// Every failure before validation is the caller's input; exit code 3.
struct InputUsage(String);

impl From<SuiteError> for InputUsage {
    fn from(error: SuiteError) -> Self {
        Self(error.to_string())
    }
}
