use serde::Deserialize;

pub const DEFAULT_DUE_DAYS: u32 = 14;
pub const MIN_DUE_DAYS: u32 = 1;
pub const MAX_DUE_DAYS: u32 = 365;

/// Raw scan station submission. Everything is text until checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ScanForm {
	pub book_id: String,
	pub borrower: String,
	pub due_days: String,
}

/// What the scan station shows: the typed book id, the picked borrower and
/// the loan length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDraft {
	pub book_id: String,
	pub borrower: Option<String>,
	pub due_days: u32,
}

impl Default for ScanDraft {
	fn default() -> Self {
		ScanDraft {
			book_id: String::new(),
			borrower: None,
			due_days: DEFAULT_DUE_DAYS,
		}
	}
}

pub fn parse_due_days(raw: &str) -> u32 {
	raw.trim()
		.parse::<i64>()
		.map(|days| days.clamp(MIN_DUE_DAYS as i64, MAX_DUE_DAYS as i64) as u32)
		.unwrap_or(DEFAULT_DUE_DAYS)
}

impl ScanForm {
	pub fn into_draft(self) -> ScanDraft {
		let borrower = Some(self.borrower).filter(|b| !b.is_empty());
		ScanDraft {
			due_days: parse_due_days(&self.due_days),
			book_id: self.book_id,
			borrower,
		}
	}
}

/// A scan that passed the local presence checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidScan {
	pub book_id: String,
	pub borrower: String,
	pub due_days: u32,
}

impl ScanDraft {
	pub fn validate(&self) -> Result<ValidScan, &'static str> {
		let book_id = self.book_id.trim();
		if book_id.is_empty() {
			return Err("Please enter a Book ID.");
		}
		let borrower = match self.borrower.as_deref() {
			Some(name) if !name.is_empty() => name,
			_ => return Err("Please select a Borrower."),
		};
		Ok(ValidScan {
			book_id: book_id.to_string(),
			borrower: borrower.to_string(),
			due_days: self.due_days,
		})
	}

	/// Keep the picked borrower while it is still listed, otherwise fall back
	/// to the first one. `None` when there is nobody to pick.
	pub fn resolve_borrower(&mut self, names: &[String]) {
		let still_listed = self
			.borrower
			.as_ref()
			.is_some_and(|picked| names.iter().any(|n| n == picked));
		if !still_listed {
			self.borrower = names.first().cloned();
		}
	}
}

/// Add and rename share one form; `old_name` marks a rename.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BorrowerForm {
	pub name: String,
	pub old_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BorrowerCommand {
	Add { name: String },
	Rename { old_name: String, new_name: String },
	/// The new name only differs in case or whitespace. Close the editor,
	/// do not call the backend.
	Unchanged,
}

impl BorrowerForm {
	pub fn command(&self) -> Result<BorrowerCommand, &'static str> {
		let name = self.name.trim();
		match self.old_name.as_deref() {
			Some(old_name) => {
				if name.is_empty() {
					return Err("Borrower name cannot be empty.");
				}
				if name.to_lowercase() == old_name.to_lowercase() {
					return Ok(BorrowerCommand::Unchanged);
				}
				Ok(BorrowerCommand::Rename {
					old_name: old_name.to_string(),
					new_name: name.to_string(),
				})
			}
			None => {
				if name.is_empty() {
					return Err("Please enter a borrower name.");
				}
				Ok(BorrowerCommand::Add { name: name.to_string() })
			}
		}
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BorrowerQuery {
	pub edit: Option<String>,
}

/// An open rename: which row, and what is typed in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
	pub original: String,
	pub text: String,
}

/// Borrower manager input state. At most one row is edited at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BorrowerDraft {
	pub add_text: String,
	pub editing: Option<EditSession>,
}

impl BorrowerDraft {
	pub fn editing(name: &str) -> Self {
		BorrowerDraft {
			add_text: String::new(),
			editing: Some(EditSession {
				original: name.to_string(),
				text: name.to_string(),
			}),
		}
	}
}
