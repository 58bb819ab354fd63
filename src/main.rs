use anyhow::Result;
use clap::Parser;
use submitted_codes_rs::{
	config::{Args, FetcherKind},
	downloader::Downloader,
	fetcher::{BrowserFetcher, CodeFetcher, HttpFetcher},
};

// Main Function
#[tokio::main]
async fn main() -> Result<()> {
	if pretty_env_logger::try_init().is_err() {
		log::warn!("Logger is already initialized.");
	}

	let settings = Args::parse().into_settings()?;
	log::info!("start! user: {}", settings.user);

	let fetcher: Box<dyn CodeFetcher> = match settings.fetcher {
		FetcherKind::Browser => Box::new(
			BrowserFetcher::connect(
				&settings.webdriver_url,
				settings.headless,
				settings.wait_timeout,
			)
			.await?,
		),
		FetcherKind::Http => Box::new(HttpFetcher::new()?),
	};

	let report = Downloader::new(settings, fetcher)?.run().await?;

	log::info!(
		"finish! written: {}, skipped: {}, failed: {}",
		report.written,
		report.skipped,
		report.failed
	);

	Ok(())
}
