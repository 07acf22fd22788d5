use chrono::{Duration, NaiveDate};
use maud::{html, Markup};

use crate::forms::{ScanDraft, MAX_DUE_DAYS, MIN_DUE_DAYS};

/// The scan form. `borrowers` is the current list of names; the draft's
/// selection is expected to be resolved against it already.
pub fn scan_station(draft: &ScanDraft, borrowers: &[String], today: NaiveDate) -> Markup {
	let none_available = borrowers.is_empty();
	let due_on = today + Duration::days(i64::from(draft.due_days));

	html! {
		section.card.scan {
			h2 { "Scan Station!" }
			form method="post" action="/" {
				label for="borrower" { "Who's Borrowing?" }
				select #borrower name="borrower" aria-label="Select borrower" disabled[none_available] {
					@if none_available {
						option value="" { "No borrowers available" }
					}
					@for name in borrowers {
						option value=(name) selected[draft.borrower.as_deref() == Some(name.as_str())] {
							(name)
						}
					}
				}

				label for="due_days" { "Due in (days)" }
				input #due_days type="number" name="due_days" value=(draft.due_days)
					min=(MIN_DUE_DAYS) max=(MAX_DUE_DAYS) aria-label="Due days";
				p.hint { "Due on " time datetime=(due_on) { (due_on.format("%b %-d, %Y")) } }

				label for="book_id" { "Scan Book ID" }
				input.scan-input #book_id type="text" name="book_id" value=(draft.book_id)
					placeholder="e.g., ML-001" autocomplete="off" autocapitalize="off"
					spellcheck="false" aria-label="Book ID to scan" autofocus;

				button.primary type="submit" aria-label="Process scan" disabled[none_available] {
					"Process Scan"
				}
			}
		}
	}
}
