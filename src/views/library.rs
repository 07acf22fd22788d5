use maud::{html, Markup};
use tracing::debug;

use super::spinner;
use crate::barcode;
use crate::desk::Snapshot;
use crate::types::Book;

const QUIET_ZONE: u32 = 10;
const BAR_HEIGHT: u32 = 50;
const CAPTION_HEIGHT: u32 = 14;

fn or_dash(cell: &str) -> &str {
	if cell.is_empty() {
		"-"
	} else {
		cell
	}
}

/// Inline SVG Code 128 with the value printed underneath. Falls back to
/// text for values Code 128 B cannot carry.
fn barcode_svg(value: &str) -> Markup {
	let bars = match barcode::bars(value) {
		Ok(bars) => bars,
		Err(err) => {
			debug!(value, %err, "barcode drawn as text");
			return html! { span.barcode-text { (value) } };
		}
	};
	let modules = bars.last().map(|(x, w)| x + w).unwrap_or(0);
	let width = modules + 2 * QUIET_ZONE;
	let height = BAR_HEIGHT + CAPTION_HEIGHT;

	html! {
		svg.barcode xmlns="http://www.w3.org/2000/svg" viewBox=(format!("0 0 {width} {height}"))
			role="img" aria-label=(format!("Barcode {value}")) {
			@for (x, w) in &bars {
				rect x=(x + QUIET_ZONE) y="0" width=(w) height=(BAR_HEIGHT) {}
			}
			text x=(width / 2) y=(height - 2) text-anchor="middle" font-size="12" { (value) }
		}
	}
}

pub fn library_table(books: &Snapshot<Book>, loading: bool) -> Markup {
	let rows = &books.rows;
	if loading && rows.is_empty() {
		return spinner();
	}

	html! {
		section.card.table-card {
			h2 { "Our Library" }
			@if rows.is_empty() {
				p.empty { "No books in the library yet. Add some IDs to your spreadsheet!" }
			} @else {
				table {
					thead {
						tr {
							th scope="col" { "Book ID" }
							th scope="col" { "Barcode" }
							th scope="col" { "Title" }
							th scope="col" { "Author" }
							th scope="col" { "Publisher" }
							th scope="col" { "Pub. Year" }
							th scope="col" { "Status" }
							th scope="col" { "Borrower" }
							th scope="col" { "Due Date" }
						}
					}
					tbody {
						@for book in rows {
							@let status = book.status();
							@let status_class = if status.is_on_shelf() { "on-shelf" } else { "checked-out" };
							tr {
								td { (book.book_id) }
								td {
									@if book.barcode.is_empty() {
										"-"
									} @else {
										(barcode_svg(&book.barcode))
									}
								}
								td { (book.title) }
								td { (or_dash(&book.author)) }
								td { (or_dash(&book.publisher)) }
								td { (or_dash(&book.publication_year)) }
								td.status.(status_class) { (status) }
								td { (or_dash(&book.borrower)) }
								td { (or_dash(&book.due_date)) }
							}
						}
					}
				}
			}
			@if let Some(at) = books.refreshed_at {
				p.updated { "Updated " (at.format("%H:%M:%S")) }
			}
			@if loading && !rows.is_empty() {
				div.overlay { (spinner()) }
			}
		}
	}
}
