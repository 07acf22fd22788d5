use maud::{html, Markup};

use super::spinner;
use crate::desk::Snapshot;
use crate::types::{LogEntry, ScanAction};

/// Rows are shown in the order the spreadsheet returned them.
pub fn log_table(log: &Snapshot<LogEntry>, loading: bool) -> Markup {
	let rows = &log.rows;
	if loading && rows.is_empty() {
		return spinner();
	}

	html! {
		section.card.table-card {
			h2 { "Checkout Log" }
			@if rows.is_empty() {
				p.empty { "No checkout history yet." }
			} @else {
				table {
					thead {
						tr {
							th scope="col" { "Timestamp" }
							th scope="col" { "Book ID" }
							th scope="col" { "Title" }
							th scope="col" { "Borrower" }
							th scope="col" { "Action" }
						}
					}
					tbody {
						@for entry in rows {
							@let action_class = match entry.kind() {
								Some(ScanAction::Checkout) => "checkout",
								Some(ScanAction::Return) => "return",
								None => "other",
							};
							tr {
								td { (entry.timestamp) }
								td { (entry.book_id) }
								td { (entry.title) }
								td { (entry.borrower) }
								td.action.(action_class) { (entry.action) }
							}
						}
					}
				}
			}
			@if let Some(at) = log.refreshed_at {
				p.updated { "Updated " (at.format("%H:%M:%S")) }
			}
			@if loading && !rows.is_empty() {
				div.overlay { (spinner()) }
			}
		}
	}
}
