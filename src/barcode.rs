// Code 128 labels for the library table. Encoding is done by `barcoders`;
// this module only turns its modules into bar rectangles.

use barcoders::sym::code128::Code128;
use thiserror::Error;

/// Selects character set B, which covers printable ASCII.
const SET_B: char = 'Ɓ';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BarcodeError {
	#[error("nothing to encode")]
	Empty,
	#[error("{0:?} cannot be encoded in Code 128 B")]
	Unsupported(String),
}

/// One entry per module, 1 for bar and 0 for space.
pub fn modules(value: &str) -> Result<Vec<u8>, BarcodeError> {
	if value.is_empty() {
		return Err(BarcodeError::Empty);
	}
	// set selectors inside the value would switch sets mid-label
	if !value.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
		return Err(BarcodeError::Unsupported(value.to_string()));
	}
	let symbol = Code128::new(format!("{SET_B}{value}"))
		.map_err(|_| BarcodeError::Unsupported(value.to_string()))?;
	Ok(symbol.encode())
}

/// `(offset, width)` of each bar, in modules from the left edge.
pub fn bars(value: &str) -> Result<Vec<(u32, u32)>, BarcodeError> {
	let mut out: Vec<(u32, u32)> = Vec::new();
	let mut in_bar = false;
	for (x, module) in (0u32..).zip(modules(value)?) {
		match (module, in_bar) {
			(1, true) => {
				if let Some(last) = out.last_mut() {
					last.1 += 1;
				}
			}
			(1, false) => {
				out.push((x, 1));
				in_bar = true;
			}
			_ => in_bar = false,
		}
	}
	Ok(out)
}
