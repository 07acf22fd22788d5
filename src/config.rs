//! Settings read from the environment (and `.env`, loaded in `main`).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
	/// Spreadsheet web app endpoint. `None` when unset or blank; every
	/// backend call then fails without touching the network.
	/// Env: `SHEET_WEB_APP_URL`
	pub sheet_url: Option<String>,

	/// Env: `LISTEN_ADDR`, default `0.0.0.0:8080`
	pub listen_addr: SocketAddr,

	/// How long a banner stays up.
	/// Env: `MESSAGE_TTL_SECS`, default `5`
	pub message_ttl: Duration,

	/// Env: `STATIC_DIR`, default `static`
	pub static_dir: PathBuf,
}

impl Config {
	pub fn from_env() -> anyhow::Result<Self> {
		Self::from_lookup(|key| std::env::var(key).ok())
	}

	pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
		let sheet_url = lookup("SHEET_WEB_APP_URL")
			.map(|url| url.trim().to_string())
			.filter(|url| !url.is_empty());

		let listen_addr = match lookup("LISTEN_ADDR") {
			Some(addr) => addr
				.parse()
				.with_context(|| format!("LISTEN_ADDR is not a socket address: {addr}"))?,
			None => SocketAddr::from(([0, 0, 0, 0], 8080)),
		};

		let message_ttl = match lookup("MESSAGE_TTL_SECS") {
			Some(secs) => Duration::from_secs(
				secs.trim()
					.parse()
					.with_context(|| format!("MESSAGE_TTL_SECS is not a number of seconds: {secs}"))?,
			),
			None => Duration::from_secs(5),
		};

		let static_dir = lookup("STATIC_DIR")
			.map(PathBuf::from)
			.unwrap_or_else(|| PathBuf::from("static"));

		Ok(Config {
			sheet_url,
			listen_addr,
			message_ttl,
			static_dir,
		})
	}
}
