//! The desk owns everything the pages show: the three tab snapshots, the
//! in-flight flag and the banner. Handlers only ever talk to the spreadsheet
//! through the commands here.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::SheetError;
use crate::sheet::{SheetClient, Tab};
use crate::types::{Ack, Book, Borrower, LogEntry};

pub type SharedState = Arc<Mutex<DeskState>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
	Success,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
	pub id: Uuid,
	pub kind: BannerKind,
	pub text: String,
}

/// Last rows read from one tab, replaced wholesale on every refresh.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
	pub rows: Vec<T>,
	pub refreshed_at: Option<DateTime<Local>>,
}

impl<T> Default for Snapshot<T> {
	fn default() -> Self {
		Snapshot { rows: Vec::new(), refreshed_at: None }
	}
}

#[derive(Debug, Default)]
pub struct DeskState {
	pub books: Snapshot<Book>,
	pub log: Snapshot<LogEntry>,
	pub borrowers: Snapshot<Borrower>,
	pub banner: Option<Banner>,
	banner_timer: Option<JoinHandle<()>>,
}

impl DeskState {
	pub fn borrower_names(&self) -> Vec<String> {
		self.borrowers.rows.iter().map(|b| b.name.clone()).collect()
	}
}

impl Drop for DeskState {
	fn drop(&mut self) {
		if let Some(timer) = self.banner_timer.take() {
			timer.abort();
		}
	}
}

/// Keeps the in-flight flag raised while alive.
struct InFlight(Arc<AtomicUsize>);

impl Drop for InFlight {
	fn drop(&mut self) {
		self.0.fetch_sub(1, Ordering::SeqCst);
	}
}

#[derive(Clone)]
pub struct Desk {
	sheet: SheetClient,
	state: SharedState,
	in_flight: Arc<AtomicUsize>,
	banner_ttl: Duration,
}

impl Desk {
	pub fn new(sheet: SheetClient, banner_ttl: Duration) -> Self {
		Desk {
			sheet,
			state: Arc::new(Mutex::new(DeskState::default())),
			in_flight: Arc::new(AtomicUsize::new(0)),
			banner_ttl,
		}
	}

	pub fn state(&self) -> &SharedState {
		&self.state
	}

	pub fn banner_ttl(&self) -> Duration {
		self.banner_ttl
	}

	/// True while any backend call has not settled yet.
	pub fn is_loading(&self) -> bool {
		self.in_flight.load(Ordering::SeqCst) > 0
	}

	fn begin(&self) -> InFlight {
		self.in_flight.fetch_add(1, Ordering::SeqCst);
		InFlight(self.in_flight.clone())
	}

	/// Shows a banner and schedules its expiry. Any previous banner and its
	/// timer are replaced under the same lock.
	pub async fn notify(&self, kind: BannerKind, text: impl Into<String>) {
		let banner = Banner {
			id: Uuid::new_v4(),
			kind,
			text: text.into(),
		};
		debug!(?kind, text = %banner.text, "banner");

		let id = banner.id;
		let ttl = self.banner_ttl;
		let weak = Arc::downgrade(&self.state);

		let mut state = self.state.lock().await;
		if let Some(old) = state.banner_timer.take() {
			old.abort();
		}
		state.banner = Some(banner);
		state.banner_timer = Some(tokio::spawn(async move {
			tokio::time::sleep(ttl).await;
			let Some(state) = weak.upgrade() else { return };
			let mut state = state.lock().await;
			if state.banner.as_ref().is_some_and(|b| b.id == id) {
				state.banner = None;
				state.banner_timer = None;
			}
		}));
	}

	pub async fn dismiss(&self) {
		let mut state = self.state.lock().await;
		if let Some(timer) = state.banner_timer.take() {
			timer.abort();
		}
		state.banner = None;
	}

	/// Local validation failures surface like every other error.
	pub async fn reject(&self, text: &str) -> Ack {
		self.notify(BannerKind::Error, text).await;
		Ack::failed(text)
	}

	/// Cancels the pending banner expiry. Called on shutdown.
	pub async fn teardown(&self) {
		let mut state = self.state.lock().await;
		if let Some(timer) = state.banner_timer.take() {
			timer.abort();
		}
	}

	async fn fail(&self, err: SheetError, operation: &str) -> Ack {
		let text = err.describe(operation);
		self.notify(BannerKind::Error, text.as_str()).await;
		Ack::failed(text)
	}

	async fn refresh<T, F>(
		&self,
		tab: Tab,
		fetch: F,
		slot: fn(&mut DeskState) -> &mut Snapshot<T>,
	) -> Ack
	where
		F: Future<Output = Result<Vec<T>, SheetError>>,
	{
		let _busy = self.begin();
		match fetch.await {
			Ok(rows) => {
				info!(tab = tab.as_str(), rows = rows.len(), "tab refreshed");
				let mut state = self.state.lock().await;
				*slot(&mut state) = Snapshot {
					rows,
					refreshed_at: Some(Local::now()),
				};
				Ack::ok(None)
			}
			Err(err) => {
				let operation = format!("Failed to fetch {} data", tab.as_str());
				self.fail(err, &operation).await
			}
		}
	}

	pub async fn refresh_books(&self) -> Ack {
		self.refresh(Tab::Library, self.sheet.get_library_data(), |s| &mut s.books)
			.await
	}

	pub async fn refresh_log(&self) -> Ack {
		self.refresh(Tab::CheckoutLog, self.sheet.get_checkout_log(), |s| &mut s.log)
			.await
	}

	pub async fn refresh_borrowers(&self) -> Ack {
		self.refresh(Tab::Borrowers, self.sheet.get_borrowers(), |s| &mut s.borrowers)
			.await
	}

	/// The mount load: all three tabs at once, each landing on its own.
	pub async fn load_all(&self) {
		tokio::join!(self.refresh_books(), self.refresh_log(), self.refresh_borrowers());
	}

	pub async fn scan_book(&self, book_id: &str, borrower: &str, due_days: u32) -> Ack {
		let response = {
			let _busy = self.begin();
			self.sheet.scan_book(book_id, borrower, due_days).await
		};
		match response {
			Ok(response) if response.success => {
				info!(book_id, action = ?response.kind(), "scan recorded");
				self.notify(BannerKind::Success, response.summary()).await;
				tokio::join!(self.refresh_books(), self.refresh_log());
				Ack::ok(response.message)
			}
			Ok(response) => {
				let text = response.message.unwrap_or_else(|| "Scan failed.".to_string());
				self.reject(&text).await
			}
			Err(err) => self.fail(err, "Failed to process scan").await,
		}
	}

	pub async fn add_borrower(&self, name: &str) -> Ack {
		let response = {
			let _busy = self.begin();
			self.sheet.add_borrower(name).await
		};
		match response {
			Ok(ack) if ack.success => {
				info!(name, "borrower added");
				let text = ack
					.message
					.clone()
					.unwrap_or_else(|| format!("Borrower '{name}' added."));
				self.notify(BannerKind::Success, text).await;
				self.refresh_borrowers().await;
				ack
			}
			Ok(ack) => {
				let text = ack.message.unwrap_or_else(|| "Failed to add borrower.".to_string());
				self.reject(&text).await
			}
			Err(err) => self.fail(err, "Failed to add borrower").await,
		}
	}

	/// A rename also touches the borrower column of books and log rows, so
	/// all three tabs are read again.
	pub async fn edit_borrower(&self, old_name: &str, new_name: &str) -> Ack {
		let response = {
			let _busy = self.begin();
			self.sheet.edit_borrower(old_name, new_name).await
		};
		match response {
			Ok(ack) if ack.success => {
				info!(old_name, new_name, "borrower renamed");
				let text = ack
					.message
					.clone()
					.unwrap_or_else(|| format!("Borrower '{old_name}' updated to '{new_name}'."));
				self.notify(BannerKind::Success, text).await;
				self.load_all().await;
				ack
			}
			Ok(ack) => {
				let text = ack.message.unwrap_or_else(|| "Failed to update borrower.".to_string());
				self.reject(&text).await
			}
			Err(err) => self.fail(err, "Failed to edit borrower").await,
		}
	}
}
