use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde_json::json;
use tokio::time::Duration;

const CODE_ELEMENT_ID: &str = "submission-code";

static CODE_SELECTOR: Lazy<Selector> =
	Lazy::new(|| Selector::parse("#submission-code").unwrap());

/// Source of the code text shown on a submission page.
#[async_trait]
pub trait CodeFetcher: Send {
	async fn fetch_code(&mut self, url: &str) -> Result<String>;

	async fn close(&mut self) -> Result<()> {
		Ok(())
	}
}

/// The page renders a non-breaking space before some line breaks.
pub fn clean_code(text: &str) -> String {
	text.replace("\u{a0}\n", "\n")
}

pub struct BrowserFetcher {
	client: Client,
	wait_timeout: Duration,
}

impl BrowserFetcher {
	/// Connects to a running WebDriver service (chromedriver by default).
	pub async fn connect(webdriver_url: &str, headless: bool, wait_timeout: Duration) -> Result<Self> {
		let mut args = vec!["--disable-dev-shm-usage"];
		if headless {
			args.push("--headless");
			args.push("--disable-gpu");
		}

		let mut caps = serde_json::Map::new();
		caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

		let client = ClientBuilder::native()
			.capabilities(caps)
			.connect(webdriver_url)
			.await
			.with_context(|| format!("Failed to start a WebDriver session at {}", webdriver_url))?;

		log::info!("WebDriver session started at {}", webdriver_url);

		Ok(Self {
			client,
			wait_timeout,
		})
	}
}

#[async_trait]
impl CodeFetcher for BrowserFetcher {
	async fn fetch_code(&mut self, url: &str) -> Result<String> {
		log::debug!("Opening {} in browser", url);
		self.client.goto(url).await?;

		let element = self
			.client
			.wait()
			.at_most(self.wait_timeout)
			.for_element(Locator::Id(CODE_ELEMENT_ID))
			.await
			.map_err(|e| anyhow!("Submission code did not appear at {}: {}", url, e))?;

		let text = match element.prop("innerText").await? {
			Some(text) => text,
			None => element.text().await?,
		};

		Ok(clean_code(&text))
	}

	async fn close(&mut self) -> Result<()> {
		self.client.clone().close().await?;
		log::info!("WebDriver session closed");
		Ok(())
	}
}

/// Reads the code from the server-rendered page without a browser.
pub struct HttpFetcher {
	client: reqwest::Client,
}

impl HttpFetcher {
	pub fn new() -> Result<Self> {
		let client = reqwest::Client::builder()
			.user_agent(concat!(
				env!("CARGO_PKG_NAME"),
				"/",
				env!("CARGO_PKG_VERSION")
			))
			.build()?;

		Ok(Self { client })
	}
}

fn extract_code(body: &str) -> Option<String> {
	let document = Html::parse_document(body);
	let element = document.select(&CODE_SELECTOR).next()?;
	Some(element.text().collect::<Vec<_>>().join(""))
}

#[async_trait]
impl CodeFetcher for HttpFetcher {
	async fn fetch_code(&mut self, url: &str) -> Result<String> {
		let response = self.client.get(url).send().await?;

		log::debug!("Received status {} from {}", response.status(), url);

		if !response.status().is_success() {
			return Err(anyhow!(
				"Failed to fetch URL: {} - Status: {}",
				url,
				response.status()
			));
		}

		let body = response.text().await?;
		let code = extract_code(&body)
			.ok_or_else(|| anyhow!("No submission code found at {}", url))?;

		Ok(clean_code(&code))
	}
}
