//! Client for the spreadsheet web app: one read per tab, one write per
//! mutation. Nothing here panics or retries; every failure comes back as a
//! [`SheetError`].

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::SheetError;
use crate::mapper;
use crate::types::{Ack, Book, Borrower, BorrowerRequest, LogEntry, ScanRequest, ScanResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
	Library,
	CheckoutLog,
	Borrowers,
}

impl Tab {
	pub fn as_str(self) -> &'static str {
		match self {
			Tab::Library => "LIBRARY",
			Tab::CheckoutLog => "CHECKOUT LOG",
			Tab::Borrowers => "BORROWERS",
		}
	}
}

/// `{ success, headers?, data?, message? }` as returned by a tab read.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Envelope {
	success: bool,
	headers: Option<Vec<Value>>,
	data: Option<Vec<Vec<Value>>>,
	#[serde(deserialize_with = "mapper::lenient_text")]
	message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SheetClient {
	http: Client,
	endpoint: Option<String>,
}

impl SheetClient {
	/// An empty or blank endpoint counts as unset.
	pub fn new(http: Client, endpoint: Option<String>) -> Self {
		let endpoint = endpoint.filter(|url| !url.trim().is_empty());
		SheetClient { http, endpoint }
	}

	pub fn is_configured(&self) -> bool {
		self.endpoint.is_some()
	}

	fn endpoint(&self) -> Result<&str, SheetError> {
		self.endpoint.as_deref().ok_or(SheetError::NotConfigured)
	}

	pub async fn get_library_data(&self) -> Result<Vec<Book>, SheetError> {
		self.fetch_tab(Tab::Library).await
	}

	pub async fn get_checkout_log(&self) -> Result<Vec<LogEntry>, SheetError> {
		self.fetch_tab(Tab::CheckoutLog).await
	}

	pub async fn get_borrowers(&self) -> Result<Vec<Borrower>, SheetError> {
		self.fetch_tab(Tab::Borrowers).await
	}

	async fn fetch_tab<T: DeserializeOwned>(&self, tab: Tab) -> Result<Vec<T>, SheetError> {
		let endpoint = self.endpoint()?;
		debug!(tab = tab.as_str(), "fetching tab");

		let response = self
			.http
			.get(endpoint)
			.query(&[("tab", tab.as_str())])
			.send()
			.await;
		let envelope: Envelope = match read_json(response).await {
			Ok(envelope) => envelope,
			Err(err) => {
				warn!(tab = tab.as_str(), error = %err, "tab read failed");
				return Err(err);
			}
		};

		if !envelope.success {
			let message = envelope
				.message
				.unwrap_or_else(|| "An unknown error occurred.".to_string());
			warn!(tab = tab.as_str(), %message, "tab read rejected");
			return Err(SheetError::Rejected(message));
		}

		let headers: Vec<String> = envelope
			.headers
			.unwrap_or_default()
			.iter()
			.map(mapper::cell_text)
			.collect();
		let rows = envelope.data.unwrap_or_default();
		mapper::map_table(&headers, &rows).map_err(|e| SheetError::Malformed(e.to_string()))
	}

	/// The backend decides between checkout and return from the book's
	/// current status. `success: false` comes back as `Ok`.
	pub async fn scan_book(
		&self,
		book_id: &str,
		borrower: &str,
		due_days: u32,
	) -> Result<ScanResponse, SheetError> {
		let request = ScanRequest {
			book_id: book_id.to_string(),
			borrower: borrower.to_string(),
			due_days,
		};
		self.post("scan", &request).await
	}

	pub async fn add_borrower(&self, name: &str) -> Result<Ack, SheetError> {
		let request = BorrowerRequest::AddBorrower {
			borrower_name: name.to_string(),
		};
		self.post("addBorrower", &request).await
	}

	pub async fn edit_borrower(&self, old_name: &str, new_name: &str) -> Result<Ack, SheetError> {
		let request = BorrowerRequest::EditBorrower {
			old_name: old_name.to_string(),
			new_name: new_name.to_string(),
		};
		self.post("editBorrower", &request).await
	}

	async fn post<B, R>(&self, action: &str, body: &B) -> Result<R, SheetError>
	where
		B: Serialize + ?Sized,
		R: DeserializeOwned,
	{
		let endpoint = self.endpoint()?;
		debug!(action, "posting to sheet");

		let response = self.http.post(endpoint).json(body).send().await;
		read_json(response).await.map_err(|err| {
			warn!(action, error = %err, "sheet write failed");
			err
		})
	}
}

async fn read_json<T: DeserializeOwned>(
	response: Result<Response, reqwest::Error>,
) -> Result<T, SheetError> {
	let response = response?;
	let status = response.status();
	if !status.is_success() {
		let details = response.text().await.unwrap_or_default();
		return Err(SheetError::Status { status, details });
	}
	let body = response.bytes().await?;
	serde_json::from_slice(&body).map_err(|e| SheetError::Malformed(e.to_string()))
}
