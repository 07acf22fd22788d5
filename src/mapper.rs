//! Turns the spreadsheet's `headers` + `data` grid into typed records.
//!
//! The same routine serves every tab: headers become field names through
//! [`field_name`] and each cell is copied verbatim into that field.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::{Map, Value};

/// `"Book ID"` -> `"bookId"`, `"Publication Year"` -> `"publicationYear"`.
///
/// Trims and lowercases, then every run of non `[a-z0-9]` characters that is
/// followed by a `[a-z0-9]` character is dropped and that character is
/// upper-cased. A trailing run is kept as is.
pub fn field_name(header: &str) -> String {
	let lowered = header.trim().to_lowercase();
	let mut out = String::with_capacity(lowered.len());
	let mut pending = String::new();

	for ch in lowered.chars() {
		if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
			if pending.is_empty() {
				out.push(ch);
			} else {
				pending.clear();
				out.push(ch.to_ascii_uppercase());
			}
		} else {
			pending.push(ch);
		}
	}
	out.push_str(&pending);
	out
}

/// A cell as text: strings verbatim, `null` empty, anything else as JSON.
pub fn cell_text(cell: &Value) -> String {
	match cell {
		Value::String(s) => s.clone(),
		Value::Null => String::new(),
		other => other.to_string(),
	}
}

/// `deserialize_with` helper for echoed fields the spreadsheet may send as
/// numbers. `null` and a missing field both read as `None`.
pub fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	let cell = Option::<Value>::deserialize(deserializer)?;
	Ok(cell.filter(|v| !v.is_null()).map(|v| cell_text(&v)))
}

/// One untyped record per row, keyed by normalized header.
///
/// Short rows leave the missing fields out, extra cells are ignored and a
/// repeated field name keeps the right-most cell.
pub fn map_rows(headers: &[String], rows: &[Vec<Value>]) -> Vec<Map<String, Value>> {
	let names: Vec<String> = headers.iter().map(|h| field_name(h)).collect();
	rows.iter()
		.map(|row| {
			names.iter()
				.zip(row.iter())
				.map(|(name, cell)| (name.clone(), Value::String(cell_text(cell))))
				.collect()
		})
		.collect()
}

pub fn map_table<T: DeserializeOwned>(
	headers: &[String],
	rows: &[Vec<Value>],
) -> Result<Vec<T>, serde_json::Error> {
	map_rows(headers, rows)
		.into_iter()
		.map(|record| serde_json::from_value(Value::Object(record)))
		.collect()
}
