use maud::{html, Markup};

use super::spinner;
use crate::forms::BorrowerDraft;
use crate::types::Borrower;

/// Borrower list with one inline editor at a time and the add form below.
/// Inputs lock while a request is out or another row is being edited.
pub fn borrower_manager(borrowers: &[Borrower], loading: bool, draft: &BorrowerDraft) -> Markup {
	let editing = draft.editing.is_some();

	html! {
		section.card.borrowers {
			h2 { "Manage Our Borrowers" }
			@if loading {
				(spinner())
			}
			div.inset {
				h3 { "Current Borrowers" }
				@if borrowers.is_empty() && !loading {
					p.empty { "No borrowers added yet. Add some below!" }
				} @else {
					ul.borrower-list {
						@for borrower in borrowers {
							li {
								@match draft.editing.as_ref().filter(|e| e.original == borrower.name) {
									Some(session) => {
										form.edit-row method="post" action="/manage-borrowers" {
											input type="hidden" name="old_name" value=(session.original);
											input type="text" name="name" value=(session.text)
												aria-label=(format!("Edit borrower name {}", borrower.name))
												hx-get="/manage-borrowers" hx-trigger="keyup[key=='Escape']"
												hx-target="body" hx-push-url="true"
												disabled[loading] autofocus;
											button.primary type="submit" disabled[loading]
												aria-label=(format!("Save changes for {}", borrower.name)) { "Save" }
											a.button.secondary href="/manage-borrowers"
												aria-label=(format!("Cancel editing {}", borrower.name)) { "Cancel" }
										}
									}
									None => {
										span.name { (borrower.name) }
										form.edit-link method="get" action="/manage-borrowers" {
											input type="hidden" name="edit" value=(borrower.name);
											button type="submit" disabled[loading || editing]
												aria-label=(format!("Edit {}", borrower.name)) { "Edit" }
										}
									}
								}
							}
						}
					}
				}
			}

			form.add method="post" action="/manage-borrowers" {
				label for="new_borrower" { "Add New Borrower Name" }
				input #new_borrower type="text" name="name" value=(draft.add_text)
					placeholder="e.g., Liam" autocomplete="off" autocapitalize="words"
					spellcheck="false" aria-label="New borrower name"
					disabled[loading || editing] autofocus[!editing];
				button.accent type="submit" aria-label="Add new borrower" disabled[loading || editing] {
					"Add Borrower"
				}
			}
		}
	}
}
