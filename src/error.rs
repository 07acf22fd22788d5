use reqwest::StatusCode;
use thiserror::Error;

pub const NOT_CONFIGURED: &str = "Spreadsheet web app URL is not configured.";

/// Everything that can go wrong between the desk and the spreadsheet.
#[derive(Debug, Error)]
pub enum SheetError {
	#[error("{}", NOT_CONFIGURED)]
	NotConfigured,

	#[error("backend returned HTTP {}: {details}", .status.as_u16())]
	Status { status: StatusCode, details: String },

	#[error("{0}")]
	Transport(#[from] reqwest::Error),

	#[error("malformed response: {0}")]
	Malformed(String),

	/// The spreadsheet answered, but said no.
	#[error("{0}")]
	Rejected(String),
}

impl SheetError {
	/// Wraps the cause with the operation that failed. Configuration and
	/// backend refusals are shown as they are.
	pub fn describe(&self, operation: &str) -> String {
		match self {
			SheetError::NotConfigured | SheetError::Rejected(_) => self.to_string(),
			_ => format!("{operation}: {self}"),
		}
	}
}
