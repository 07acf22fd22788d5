use std::path::Path;

use axum::{
	extract::{Query, State},
	http::{StatusCode, Uri},
	response::Redirect,
	routing::{get, post},
	Form, Router,
};
use maud::Markup;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Deserialize;
use tower_cookies::{Cookie, CookieManagerLayer, Cookies};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::desk::{Desk, DeskState};
use crate::forms::{
	parse_due_days, BorrowerCommand, BorrowerDraft, BorrowerForm, BorrowerQuery, EditSession,
	ScanDraft, ScanForm,
};
use crate::views::{self, Chrome, Page};

const BORROWER_COOKIE: &str = "scan_borrower";
const DUE_DAYS_COOKIE: &str = "scan_due_days";

pub fn router(desk: Desk, static_dir: &Path) -> Router {
	Router::new()
		.route("/", get(display_scan).post(perform_scan))
		.route("/library", get(display_library))
		.route("/checkout-log", get(display_log))
		.route("/manage-borrowers", get(display_borrowers).post(perform_borrower))
		.route("/refresh", post(perform_refresh))
		.route("/banner", get(display_banner))
		.route("/banner/dismiss", post(dismiss_banner))
		.route("/healthz", get(|| async { "ok" }))
		.nest_service("/static", ServeDir::new(static_dir))
		.fallback(display_missing)
		.with_state(desk)
		.layer(CookieManagerLayer::new())
		.layer(TraceLayer::new_for_http())
}

/// Wraps a view in the shell, reading the desk once.
async fn render(
	desk: &Desk,
	current: &str,
	active: Option<Page>,
	view: impl FnOnce(&DeskState, bool) -> Markup,
) -> Markup {
	let loading = desk.is_loading();
	let state = desk.state().lock().await;
	let body = view(&state, loading);
	views::layout(
		&Chrome {
			current,
			active,
			banner: state.banner.as_ref(),
			banner_ttl: desk.banner_ttl(),
			loading,
		},
		body,
	)
}

/// Values are percent-encoded on the way out; `Cookies::get` decodes them.
fn remember(cookies: &Cookies, name: &'static str, value: &str) {
	let encoded = utf8_percent_encode(value, NON_ALPHANUMERIC).to_string();
	let mut cookie = Cookie::new(name, encoded);
	cookie.set_path("/");
	cookies.add(cookie);
}

fn remembered_draft(cookies: &Cookies) -> ScanDraft {
	let mut draft = ScanDraft::default();
	if let Some(borrower) = cookies.get(BORROWER_COOKIE) {
		draft.borrower = Some(borrower.value().to_string()).filter(|b| !b.is_empty());
	}
	if let Some(days) = cookies.get(DUE_DAYS_COOKIE) {
		draft.due_days = parse_due_days(days.value());
	}
	draft
}

async fn render_scan(desk: &Desk, mut draft: ScanDraft) -> Markup {
	let today = chrono::Local::now().date_naive();
	render(desk, Page::Scan.path(), Some(Page::Scan), |state, _| {
		let names = state.borrower_names();
		draft.resolve_borrower(&names);
		views::scan_station(&draft, &names, today)
	})
	.await
}

async fn display_scan(State(desk): State<Desk>, cookies: Cookies) -> Markup {
	render_scan(&desk, remembered_draft(&cookies)).await
}

async fn perform_scan(State(desk): State<Desk>, cookies: Cookies, Form(form): Form<ScanForm>) -> Markup {
	let mut draft = form.into_draft();
	if let Some(borrower) = &draft.borrower {
		remember(&cookies, BORROWER_COOKIE, borrower);
	}
	remember(&cookies, DUE_DAYS_COOKIE, &draft.due_days.to_string());

	match draft.validate() {
		Err(reason) => {
			desk.reject(reason).await;
		}
		Ok(scan) => {
			let ack = desk.scan_book(&scan.book_id, &scan.borrower, scan.due_days).await;
			if ack.success {
				draft.book_id.clear();
			}
		}
	}
	render_scan(&desk, draft).await
}

async fn display_library(State(desk): State<Desk>, uri: Uri) -> Markup {
	render(&desk, &uri.to_string(), Some(Page::Library), |state, loading| {
		views::library_table(&state.books, loading)
	})
	.await
}

async fn display_log(State(desk): State<Desk>, uri: Uri) -> Markup {
	render(&desk, &uri.to_string(), Some(Page::CheckoutLog), |state, loading| {
		views::log_table(&state.log, loading)
	})
	.await
}

async fn render_borrowers(desk: &Desk, current: &str, draft: BorrowerDraft) -> Markup {
	render(desk, current, Some(Page::Borrowers), |state, loading| {
		views::borrower_manager(&state.borrowers.rows, loading, &draft)
	})
	.await
}

async fn display_borrowers(
	State(desk): State<Desk>,
	uri: Uri,
	Query(query): Query<BorrowerQuery>,
) -> Markup {
	let listed = {
		let state = desk.state().lock().await;
		query
			.edit
			.filter(|name| state.borrowers.rows.iter().any(|b| &b.name == name))
	};
	let draft = match listed {
		Some(name) => BorrowerDraft::editing(&name),
		None => BorrowerDraft::default(),
	};
	render_borrowers(&desk, &uri.to_string(), draft).await
}

async fn perform_borrower(State(desk): State<Desk>, Form(form): Form<BorrowerForm>) -> Markup {
	// What to show if the command does not go through: the user's text, as typed.
	let retained = match &form.old_name {
		Some(old_name) => BorrowerDraft {
			add_text: String::new(),
			editing: Some(EditSession {
				original: old_name.clone(),
				text: form.name.clone(),
			}),
		},
		None => BorrowerDraft {
			add_text: form.name.clone(),
			editing: None,
		},
	};

	let draft = match form.command() {
		Err(reason) => {
			desk.reject(reason).await;
			retained
		}
		Ok(BorrowerCommand::Unchanged) => BorrowerDraft::default(),
		Ok(BorrowerCommand::Add { name }) => {
			if desk.add_borrower(&name).await.success {
				BorrowerDraft::default()
			} else {
				retained
			}
		}
		Ok(BorrowerCommand::Rename { old_name, new_name }) => {
			if desk.edit_borrower(&old_name, &new_name).await.success {
				BorrowerDraft::default()
			} else {
				retained
			}
		}
	};
	render_borrowers(&desk, Page::Borrowers.path(), draft).await
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RefreshForm {
	back: String,
}

/// Only same-site paths are followed back.
fn local_path(back: &str) -> &str {
	if back.starts_with('/') && !back.starts_with("//") {
		back
	} else {
		"/"
	}
}

async fn perform_refresh(State(desk): State<Desk>, Form(form): Form<RefreshForm>) -> Redirect {
	desk.load_all().await;
	Redirect::to(local_path(&form.back))
}

async fn display_banner(State(desk): State<Desk>) -> Markup {
	let state = desk.state().lock().await;
	views::banner(state.banner.as_ref(), desk.banner_ttl())
}

async fn dismiss_banner(State(desk): State<Desk>) -> Markup {
	desk.dismiss().await;
	views::banner(None, desk.banner_ttl())
}

async fn display_missing(State(desk): State<Desk>, uri: Uri) -> (StatusCode, Markup) {
	let path = uri.path().to_string();
	let page = render(&desk, "/", None, |_, _| views::not_found(&path)).await;
	(StatusCode::NOT_FOUND, page)
}
