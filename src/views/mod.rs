//! Page chrome and the four desk views. Everything here is a pure function of
//! what it is handed; no view reaches the spreadsheet.

mod borrowers;
mod library;
mod log;
mod scan;

use std::time::Duration;

use maud::{html, Markup, DOCTYPE};

use crate::desk::{Banner, BannerKind};

pub use borrowers::borrower_manager;
pub use library::library_table;
pub use log::log_table;
pub use scan::scan_station;

/// The tabs of the navigation bar. Each one has its own URL so a view can be
/// bookmarked and reloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
	Scan,
	Library,
	CheckoutLog,
	Borrowers,
}

impl Page {
	pub const ALL: [Page; 4] = [Page::Scan, Page::Library, Page::CheckoutLog, Page::Borrowers];

	pub fn path(self) -> &'static str {
		match self {
			Page::Scan => "/",
			Page::Library => "/library",
			Page::CheckoutLog => "/checkout-log",
			Page::Borrowers => "/manage-borrowers",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Page::Scan => "Scan Station",
			Page::Library => "Library",
			Page::CheckoutLog => "Checkout Log",
			Page::Borrowers => "Manage Borrowers",
		}
	}
}

/// What the shell needs besides the view itself.
pub struct Chrome<'a> {
	/// Request target, used to poll the same view while loading.
	pub current: &'a str,
	pub active: Option<Page>,
	pub banner: Option<&'a Banner>,
	pub banner_ttl: Duration,
	pub loading: bool,
}

pub fn layout(chrome: &Chrome<'_>, body: Markup) -> Markup {
	let title = chrome.active.map(Page::label).unwrap_or("Not found");
	html! {
		(DOCTYPE)
		html lang="en" {
			head {
				meta charset="utf-8";
				meta name="viewport" content="width=device-width, initial-scale=1";
				title { "Home Library · " (title) }
				link rel="stylesheet" href="/static/style.css";
				script src="https://unpkg.com/htmx.org@1.9.10" {}
			}
			body hx-boost="true" {
				(header())
				(banner(chrome.banner, chrome.banner_ttl))
				main.desk {
					(navigation(chrome.active))
					form.refresh method="post" action="/refresh" {
						input type="hidden" name="back" value=(chrome.current);
						button type="submit" { "Refresh" }
					}
					@if chrome.loading {
						div #panel hx-get=(chrome.current) hx-trigger="load delay:1s"
							hx-select="#panel" hx-swap="outerHTML" {
							(spinner())
							(body)
						}
					} @else {
						div #panel { (body) }
					}
				}
			}
		}
	}
}

fn header() -> Markup {
	html! {
		header.masthead {
			h1 { span.tilt-left { "Home" } " " span.tilt-right { "Library" } }
			p.tagline { "Read, Share, Grow!" }
		}
	}
}

fn navigation(active: Option<Page>) -> Markup {
	html! {
		nav.tabs {
			@for page in Page::ALL {
				a.tab.active[active == Some(page)] href=(page.path()) { (page.label()) }
			}
		}
	}
}

/// The banner slot. While a banner shows, it asks for itself again once its
/// lifetime is over, which swaps in an empty slot.
pub fn banner(banner: Option<&Banner>, ttl: Duration) -> Markup {
	match banner {
		Some(banner) => {
			let kind = match banner.kind {
				BannerKind::Success => "success",
				BannerKind::Error => "error",
			};
			html! {
				div.(kind) #banner role="alert" aria-live="polite"
					hx-get="/banner" hx-trigger=(format!("load delay:{}ms", ttl.as_millis()))
					hx-swap="outerHTML" {
					span { (banner.text) }
					button.dismiss type="button" hx-post="/banner/dismiss" hx-target="#banner"
						hx-swap="outerHTML" aria-label="Dismiss" { "×" }
				}
			}
		}
		None => html! { div #banner {} },
	}
}

pub fn spinner() -> Markup {
	html! {
		div.spinner {
			div.wheel {}
			p { "Loading..." }
		}
	}
}

pub fn not_found(path: &str) -> Markup {
	html! {
		section.card {
			h2 { "Page not found" }
			p.empty { "Nothing lives at " code { (path) } "." }
		}
	}
}
