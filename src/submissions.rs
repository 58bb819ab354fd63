use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::time::Duration;

/// The submissions endpoint returns at most this many records per request.
pub const PAGE_LIMIT: usize = 500;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Submission {
	pub id: u64,
	pub epoch_second: i64,
	pub problem_id: String,
	pub contest_id: String,
	pub user_id: String,
	pub language: String,
	pub point: f64,
	pub length: u64,
	pub result: String,
	pub execution_time: Option<u64>,
}

impl Submission {
	pub fn is_accepted(&self) -> bool {
		self.result == "AC"
	}
}

pub struct SubmissionsApi {
	client: reqwest::Client,
	base_url: String,
	user_id: String,
}

impl SubmissionsApi {
	pub fn new(base_url: &str, user_id: &str) -> Result<Self> {
		let client = reqwest::Client::builder()
			.user_agent(concat!(
				env!("CARGO_PKG_NAME"),
				"/",
				env!("CARGO_PKG_VERSION")
			))
			.build()?;

		Ok(Self {
			client,
			base_url: base_url.trim_end_matches('/').to_string(),
			user_id: user_id.to_string(),
		})
	}

	/// One page of submissions made at or after `from_second`, sorted by id.
	pub async fn fetch_page(&self, from_second: i64) -> Result<Vec<Submission>> {
		let url = format!("{}/user/submissions", self.base_url);
		let from = from_second.to_string();
		let response = self
			.client
			.get(&url)
			.query(&[
				("user", self.user_id.as_str()),
				("from_second", from.as_str()),
			])
			.send()
			.await?;

		log::debug!(
			"Received status {} from {} (from_second={})",
			response.status(),
			url,
			from_second
		);

		if !response.status().is_success() {
			return Err(anyhow!(
				"Failed to fetch submissions for {} - Status: {}",
				self.user_id,
				response.status()
			));
		}

		let mut page: Vec<Submission> = response.json().await?;
		page.sort_by_key(|submission| submission.id);
		Ok(page)
	}

	/// Walks the submission history from `from_second` until a short page,
	/// sleeping `interval` after every request.
	pub async fn fetch_all(
		&self,
		from_second: i64,
		interval: Duration,
		retries: u16,
	) -> Result<Vec<Submission>> {
		let mut submissions: Vec<Submission> = Vec::new();
		let mut cursor = from_second;
		let mut failures: u16 = 0;

		loop {
			let result = self.fetch_page(cursor).await;
			tokio::time::sleep(interval).await;

			let page = match result {
				Ok(page) => {
					failures = 0;
					page
				}
				Err(e) => {
					log::error!("Error fetching submissions from {}: {}", cursor, e);
					if failures >= retries {
						return Err(e);
					}
					failures += 1;
					continue;
				}
			};

			let count = page.len();
			log::info!(
				"Fetched {} submissions from epoch second {}",
				count,
				cursor
			);

			match page.last() {
				Some(last) => cursor = last.epoch_second + 1,
				None => break,
			}
			submissions.extend(page);

			if count < PAGE_LIMIT {
				break;
			}
		}

		Ok(submissions)
	}
}
