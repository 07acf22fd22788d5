//! An in-process stand-in for the spreadsheet web app. It keeps the three
//! tabs in memory, toggles books on scan, and records every request so tests
//! can assert on what the desk actually sent.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
	extract::{Query, State},
	http::StatusCode,
	response::{IntoResponse, Response},
	routing::get,
	Json, Router,
};
use home_library::{Desk, SheetClient};
use serde_json::{json, Value};
use tokio::sync::Notify;

#[derive(Debug, Clone, Default)]
pub struct FakeBook {
	pub barcode: String,
	pub book_id: String,
	pub title: String,
	pub status: String,
	pub borrower: String,
	pub due_date: String,
}

impl FakeBook {
	pub fn on_shelf(book_id: &str, title: &str) -> Self {
		FakeBook {
			barcode: book_id.to_string(),
			book_id: book_id.to_string(),
			title: title.to_string(),
			status: "On Shelf".to_string(),
			..FakeBook::default()
		}
	}
}

#[derive(Debug, Default)]
pub struct Sheet {
	pub books: Vec<FakeBook>,
	pub log: Vec<[String; 5]>,
	pub borrowers: Vec<String>,
	/// Answer every read with this status and a text body.
	pub read_status: Option<u16>,
	/// Answer reads of this one tab with a 500.
	pub failing_tab: Option<String>,
	/// Served verbatim for the LIBRARY tab when set.
	pub raw_library: Option<Value>,
	/// Served verbatim for scan writes when set. The write is still recorded.
	pub raw_scan: Option<Value>,
	/// The next request is recorded, then held until this is notified.
	pub gate: Option<Arc<Notify>>,
	pub reads: Vec<String>,
	pub writes: Vec<Value>,
}

type Shared = Arc<Mutex<Sheet>>;

pub struct FakeSheet {
	pub sheet: Shared,
	pub url: String,
}

impl FakeSheet {
	pub fn reads(&self) -> Vec<String> {
		self.sheet.lock().unwrap().reads.clone()
	}

	pub fn writes(&self) -> Vec<Value> {
		self.sheet.lock().unwrap().writes.clone()
	}

	pub fn clear_requests(&self) {
		let mut sheet = self.sheet.lock().unwrap();
		sheet.reads.clear();
		sheet.writes.clear();
	}

	pub fn desk(&self) -> Desk {
		Desk::new(
			SheetClient::new(reqwest::Client::new(), Some(self.url.clone())),
			Duration::from_secs(5),
		)
	}
}

pub fn library() -> Sheet {
	Sheet {
		books: vec![
			FakeBook::on_shelf("ML-001", "Wind"),
			FakeBook::on_shelf("ML-002", "Rain"),
		],
		borrowers: vec!["Liam".to_string(), "Ava".to_string()],
		..Sheet::default()
	}
}

pub async fn spawn(sheet: Sheet) -> FakeSheet {
	let shared: Shared = Arc::new(Mutex::new(sheet));
	let app = Router::new()
		.route("/exec", get(read_tab).post(write))
		.with_state(shared.clone());

	let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
	let addr = listener.local_addr().unwrap();
	tokio::spawn(async move {
		axum::serve(listener, app).await.unwrap();
	});

	FakeSheet {
		sheet: shared,
		url: format!("http://{addr}/exec"),
	}
}

async fn read_tab(State(sheet): State<Shared>, Query(query): Query<HashMap<String, String>>) -> Response {
	let tab = query.get("tab").cloned().unwrap_or_default();
	let gate = {
		let mut sheet = sheet.lock().unwrap();
		sheet.reads.push(tab.clone());
		sheet.gate.take()
	};
	if let Some(gate) = gate {
		gate.notified().await;
	}
	let sheet = sheet.lock().unwrap();

	if let Some(code) = sheet.read_status {
		return (StatusCode::from_u16(code).unwrap(), "sheet exploded").into_response();
	}
	if sheet.failing_tab.as_deref() == Some(tab.as_str()) {
		return (StatusCode::INTERNAL_SERVER_ERROR, "tab exploded").into_response();
	}

	let body = match tab.as_str() {
		"LIBRARY" => match &sheet.raw_library {
			Some(raw) => raw.clone(),
			None => json!({
				"success": true,
				"headers": ["Barcode", "Book ID", "Title", "Status", "Borrower", "Due Date"],
				"data": sheet.books.iter().map(|b| json!([
					b.barcode, b.book_id, b.title, b.status, b.borrower, b.due_date,
				])).collect::<Vec<_>>(),
			}),
		},
		"CHECKOUT LOG" => json!({
			"success": true,
			"headers": ["Timestamp", "Book ID", "Title", "Borrower", "Action"],
			"data": sheet.log,
		}),
		"BORROWERS" => json!({
			"success": true,
			"headers": ["Name"],
			"data": sheet.borrowers.iter().map(|n| json!([n])).collect::<Vec<_>>(),
		}),
		_ => json!({ "success": false, "message": format!("Unknown tab: {tab}") }),
	};
	Json(body).into_response()
}

fn text(body: &Value, key: &str) -> String {
	body.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

async fn write(State(sheet): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
	let gate = {
		let mut sheet = sheet.lock().unwrap();
		sheet.writes.push(body.clone());
		sheet.gate.take()
	};
	if let Some(gate) = gate {
		gate.notified().await;
	}
	let mut sheet = sheet.lock().unwrap();

	let reply = match body.get("action").and_then(Value::as_str) {
		Some("addBorrower") => {
			let name = text(&body, "borrowerName");
			if sheet.borrowers.iter().any(|b| b.eq_ignore_ascii_case(&name)) {
				json!({ "success": false, "message": format!("Borrower '{name}' already exists.") })
			} else {
				sheet.borrowers.push(name);
				json!({ "success": true })
			}
		}
		Some("editBorrower") => {
			let old_name = text(&body, "oldName");
			let new_name = text(&body, "newName");
			match sheet.borrowers.iter().position(|b| b.eq_ignore_ascii_case(&old_name)) {
				None => json!({ "success": false, "message": "Borrower not found." }),
				Some(at) => {
					sheet.borrowers[at] = new_name.clone();
					for book in sheet.books.iter_mut().filter(|b| b.borrower == old_name) {
						book.borrower = new_name.clone();
					}
					for row in sheet.log.iter_mut().filter(|r| r[3] == old_name) {
						row[3] = new_name.clone();
					}
					json!({ "success": true })
				}
			}
		}
		_ => match sheet.raw_scan.clone() {
			Some(raw) => raw,
			None => scan(&mut sheet, &body),
		},
	};
	Json(reply)
}

fn scan(sheet: &mut Sheet, body: &Value) -> Value {
	let book_id = text(body, "bookId");
	let borrower = text(body, "borrower");
	let due_days = body.get("dueDays").and_then(Value::as_u64).unwrap_or(14);

	let Some(book) = sheet.books.iter_mut().find(|b| b.book_id == book_id) else {
		return json!({ "success": false, "message": format!("Book ID {book_id} not found.") });
	};

	let (action, who) = if book.status == "On Shelf" {
		book.status = "Checked Out".to_string();
		book.borrower = borrower.clone();
		book.due_date = format!("in {due_days} days");
		("Checkout", borrower)
	} else {
		book.status = "On Shelf".to_string();
		book.due_date.clear();
		("Return", std::mem::take(&mut book.borrower))
	};
	let title = book.title.clone();
	let new_status = book.status.clone();

	let row = [
		format!("2026-10-18 10:{:02}", sheet.log.len()),
		book_id.clone(),
		title.clone(),
		who.clone(),
		action.to_string(),
	];
	sheet.log.push(row);

	json!({
		"success": true,
		"action": action,
		"bookId": book_id,
		"title": title,
		"borrower": who,
		"newStatus": new_status,
	})
}
