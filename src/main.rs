// home library desk

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use home_library::{routes, Config, Desk, SheetClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("info,home_library=debug")),
		)
		.init();

	dotenvy::dotenv().ok();
	let config = Config::from_env()?;
	info!(?config, "starting home library desk v{}", env!("CARGO_PKG_VERSION"));

	let sheet = SheetClient::new(reqwest::Client::new(), config.sheet_url.clone());
	if !sheet.is_configured() {
		warn!("SHEET_WEB_APP_URL is not set; every spreadsheet call will fail");
	}
	let desk = Desk::new(sheet, config.message_ttl);

	// first load of all three tabs, like opening the page
	let loader = desk.clone();
	tokio::spawn(async move { loader.load_all().await });

	let app = routes::router(desk.clone(), &config.static_dir);
	let listener = tokio::net::TcpListener::bind(config.listen_addr)
		.await
		.with_context(|| format!("can't bind {}", config.listen_addr))?;
	info!("listening on http://{}", config.listen_addr);

	axum::serve(listener, app)
		.with_graceful_shutdown(shutdown_signal())
		.await
		.context("server error")?;

	desk.teardown().await;
	info!("shut down");
	Ok(())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		tokio::signal::ctrl_c()
			.await
			.expect("failed to install Ctrl+C handler");
	};

	#[cfg(unix)]
	let terminate = async {
		tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
			.expect("failed to install SIGTERM handler")
			.recv()
			.await;
	};

	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		() = ctrl_c => info!("received Ctrl+C"),
		() = terminate => info!("received SIGTERM"),
	}
}
