use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tokio::time::Duration;

pub const DEFAULT_API_URL: &str = "https://kenkoooo.com/atcoder/atcoder-api/v3";
pub const DEFAULT_CONTEST_URL: &str = "https://atcoder.jp";
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherKind {
	/// Render the submission page in a WebDriver session
	Browser,
	/// Parse the server-rendered submission page directly
	Http,
}

#[derive(Parser, Debug)]
#[clap(about, version, author)]
pub struct Args {
	/// AtCoder user id
	#[arg(env = "ATCODER_USER")]
	pub user: String,

	#[arg(short, long, default_value = "./submitted")]
	pub output_dir: PathBuf,

	#[arg(long, default_value_t = 2016)]
	pub first_year: i32,

	#[clap(long)]
	pub overwrite: bool,

	#[arg(long, value_enum, default_value_t = FetcherKind::Browser)]
	pub fetcher: FetcherKind,

	#[arg(long, env = "WEBDRIVER_URL", default_value = DEFAULT_WEBDRIVER_URL)]
	pub webdriver_url: String,

	#[clap(long)]
	pub no_headless: bool,

	/// Seconds to wait for the code element to appear
	#[arg(long, default_value_t = 20)]
	pub wait_timeout: u64,

	/// Seconds to sleep between requests
	#[arg(long, default_value_t = 2)]
	pub interval: u64,

	#[arg(short, long, default_value_t = 5)]
	pub retries: u16,

	#[arg(long, default_value = DEFAULT_API_URL)]
	pub api_url: String,

	#[arg(long, default_value = DEFAULT_CONTEST_URL)]
	pub contest_url: String,

	/// Also write the collected submission records to this JSON file
	#[arg(long)]
	pub dump_json: Option<PathBuf>,
}

/// Validated run settings.
#[derive(Debug, Clone)]
pub struct Settings {
	pub user: String,
	pub output_dir: PathBuf,
	pub from_second: i64,
	pub overwrite: bool,
	pub fetcher: FetcherKind,
	pub webdriver_url: String,
	pub headless: bool,
	pub wait_timeout: Duration,
	pub interval: Duration,
	pub retries: u16,
	pub api_url: String,
	pub contest_url: String,
	pub dump_json: Option<PathBuf>,
}

impl Args {
	pub fn into_settings(self) -> Result<Settings> {
		let user = self.user.trim().to_string();
		if user.is_empty() {
			return Err(anyhow!("User id must not be empty"));
		}

		Ok(Settings {
			user,
			output_dir: self.output_dir,
			from_second: first_epoch_second(self.first_year)?,
			overwrite: self.overwrite,
			fetcher: self.fetcher,
			webdriver_url: self.webdriver_url,
			headless: !self.no_headless,
			wait_timeout: Duration::from_secs(self.wait_timeout),
			interval: Duration::from_secs(self.interval),
			retries: self.retries,
			api_url: self.api_url.trim_end_matches('/').to_string(),
			contest_url: self.contest_url.trim_end_matches('/').to_string(),
			dump_json: self.dump_json,
		})
	}
}

/// Epoch second of Jan 1, 00:00:00 UTC of `year`.
pub fn first_epoch_second(year: i32) -> Result<i64> {
	NaiveDate::from_ymd_opt(year, 1, 1)
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|datetime| datetime.and_utc().timestamp())
		.ok_or_else(|| anyhow!("Invalid first submit year: {}", year))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_first_epoch_second() {
		const TEST_YEARS: [(i32, i64); 3] = [
			(1970, 0),
			(2016, 1_451_606_400),
			(2021, 1_609_459_200),
		];

		for (year, expected) in TEST_YEARS {
			let result = first_epoch_second(year).unwrap();
			assert_eq!(
				result, expected,
				"Expected '{}' for year '{}', but got '{}'",
				expected, year, result
			);
		}
	}

	#[test]
	fn test_defaults() {
		let settings = Args::parse_from(["submitted_codes_rs", "tourist"])
			.into_settings()
			.unwrap();

		assert_eq!(settings.user, "tourist");
		assert_eq!(settings.output_dir, PathBuf::from("./submitted"));
		assert_eq!(settings.from_second, 1_451_606_400);
		assert!(!settings.overwrite);
		assert!(settings.headless);
		assert_eq!(settings.fetcher, FetcherKind::Browser);
		assert_eq!(settings.wait_timeout, Duration::from_secs(20));
		assert_eq!(settings.interval, Duration::from_secs(2));
		assert_eq!(settings.api_url, DEFAULT_API_URL);
		assert_eq!(settings.contest_url, DEFAULT_CONTEST_URL);
	}

	#[test]
	fn test_overrides() {
		let settings = Args::parse_from([
			"submitted_codes_rs",
			"tourist",
			"-o",
			"out",
			"--first-year",
			"2021",
			"--overwrite",
			"--fetcher",
			"http",
			"--no-headless",
			"--interval",
			"0",
			"--contest-url",
			"http://localhost:8080/",
		])
		.into_settings()
		.unwrap();

		assert_eq!(settings.output_dir, PathBuf::from("out"));
		assert_eq!(settings.from_second, 1_609_459_200);
		assert!(settings.overwrite);
		assert!(!settings.headless);
		assert_eq!(settings.fetcher, FetcherKind::Http);
		assert_eq!(settings.interval, Duration::ZERO);
		assert_eq!(settings.contest_url, "http://localhost:8080");
	}

	#[test]
	fn test_blank_user_is_rejected() {
		let result = Args::parse_from(["submitted_codes_rs", "  "]).into_settings();
		assert!(result.is_err());
	}
}
