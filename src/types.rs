use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mapper::lenient_text;

pub const ON_SHELF: &str = "On Shelf";
pub const CHECKED_OUT: &str = "Checked Out";

/// One row of the LIBRARY tab. Every cell stays a string, exactly as the
/// spreadsheet returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Book {
	pub barcode: String,
	pub book_id: String,
	pub title: String,
	pub author: String,
	pub publisher: String,
	pub publication_year: String,
	pub genre: String,
	pub status: String,
	pub borrower: String,
	pub checkout_date: String,
	pub due_date: String,
	pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookStatus {
	OnShelf,
	CheckedOut,
	Other(String),
}

impl BookStatus {
	pub fn parse(cell: &str) -> Self {
		match cell.trim() {
			ON_SHELF => BookStatus::OnShelf,
			CHECKED_OUT => BookStatus::CheckedOut,
			other => BookStatus::Other(other.to_string()),
		}
	}

	pub fn is_on_shelf(&self) -> bool {
		matches!(self, BookStatus::OnShelf)
	}

	pub fn is_checked_out(&self) -> bool {
		matches!(self, BookStatus::CheckedOut)
	}
}

impl fmt::Display for BookStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BookStatus::OnShelf => f.write_str(ON_SHELF),
			BookStatus::CheckedOut => f.write_str(CHECKED_OUT),
			BookStatus::Other(raw) => f.write_str(raw),
		}
	}
}

impl Book {
	pub fn status(&self) -> BookStatus {
		BookStatus::parse(&self.status)
	}

	/// A checked out book names its borrower, a shelved one does not.
	pub fn is_consistent(&self) -> bool {
		let has_borrower = !self.borrower.trim().is_empty();
		match self.status() {
			BookStatus::OnShelf => !has_borrower,
			BookStatus::CheckedOut => has_borrower,
			BookStatus::Other(_) => false,
		}
	}
}

/// One row of the CHECKOUT LOG tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogEntry {
	pub timestamp: String,
	pub book_id: String,
	pub title: String,
	pub borrower: String,
	pub action: String,
	pub notes: String,
}

impl LogEntry {
	pub fn kind(&self) -> Option<ScanAction> {
		ScanAction::parse(&self.action)
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Borrower {
	pub name: String,
}

/// What the spreadsheet decided to do with a scanned book. The desk never
/// works this out on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanAction {
	Checkout,
	Return,
}

impl ScanAction {
	pub fn parse(cell: &str) -> Option<Self> {
		match cell.trim() {
			"Checkout" => Some(ScanAction::Checkout),
			"Return" => Some(ScanAction::Return),
			_ => None,
		}
	}
}

impl fmt::Display for ScanAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ScanAction::Checkout => f.write_str("Checkout"),
			ScanAction::Return => f.write_str("Return"),
		}
	}
}

/// Body of a scan POST. Carries no action field: the backend decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRequest {
	pub book_id: String,
	pub borrower: String,
	pub due_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum BorrowerRequest {
	AddBorrower {
		#[serde(rename = "borrowerName")]
		borrower_name: String,
	},
	EditBorrower {
		#[serde(rename = "oldName")]
		old_name: String,
		#[serde(rename = "newName")]
		new_name: String,
	},
}

/// Reply to a scan. Only `success` decides the outcome; the echoed fields
/// are display text and accept whatever scalar the sheet hands back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanResponse {
	pub success: bool,
	#[serde(deserialize_with = "lenient_text")]
	pub message: Option<String>,
	#[serde(deserialize_with = "lenient_text")]
	pub action: Option<String>,
	#[serde(deserialize_with = "lenient_text")]
	pub book_id: Option<String>,
	#[serde(deserialize_with = "lenient_text")]
	pub title: Option<String>,
	#[serde(deserialize_with = "lenient_text")]
	pub borrower: Option<String>,
	#[serde(deserialize_with = "lenient_text")]
	pub new_status: Option<String>,
}

impl ScanResponse {
	pub fn kind(&self) -> Option<ScanAction> {
		self.action.as_deref().and_then(ScanAction::parse)
	}

	/// Banner text for a successful scan, e.g. `Checkout: ML-001 (Wind) by Liam`.
	/// An action the desk does not know is shown as sent.
	pub fn summary(&self) -> String {
		let action = match (self.kind(), self.action.as_deref()) {
			(Some(kind), _) => kind.to_string(),
			(None, Some(raw)) if !raw.trim().is_empty() => raw.trim().to_string(),
			(None, _) => "Scan".to_string(),
		};
		format!(
			"{}: {} ({}) by {}",
			action,
			self.book_id.as_deref().unwrap_or_default(),
			self.title.as_deref().unwrap_or_default(),
			self.borrower.as_deref().unwrap_or_default(),
		)
	}
}

/// `{ success, message? }`: the reply to borrower writes, and the result of
/// every desk command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Ack {
	pub success: bool,
	#[serde(deserialize_with = "lenient_text")]
	pub message: Option<String>,
}

impl Ack {
	pub fn ok(message: Option<String>) -> Self {
		Ack { success: true, message }
	}

	pub fn failed(message: impl Into<String>) -> Self {
		Ack { success: false, message: Some(message.into()) }
	}
}
