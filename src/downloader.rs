use crate::{
	config::Settings,
	fetcher::CodeFetcher,
	naming::{output_path, submission_url},
	organize::organize_by_contest,
	submissions::{Submission, SubmissionsApi},
};
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::{fs::File, path::Path};
use tokio::fs;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadReport {
	pub written: usize,
	pub skipped: usize,
	pub failed: usize,
}

pub struct Downloader {
	settings: Settings,
	api: SubmissionsApi,
	fetcher: Box<dyn CodeFetcher>,
}

fn write_json<T: Serialize>(data: &[T], path: &Path) -> Result<()> {
	let file = File::create(path)
		.with_context(|| format!("Failed to create {}", path.display()))?;
	serde_json::to_writer_pretty(file, &data)?;

	Ok(())
}

impl Downloader {
	pub fn new(settings: Settings, fetcher: Box<dyn CodeFetcher>) -> Result<Self> {
		let api = SubmissionsApi::new(&settings.api_url, &settings.user)?;

		Ok(Self {
			settings,
			api,
			fetcher,
		})
	}

	/// Collects the user's submissions and saves every missing accepted code.
	/// The fetcher is closed before returning, whatever the outcome.
	pub async fn run(mut self) -> Result<DownloadReport> {
		let result = self.download_all().await;

		if let Err(e) = self.fetcher.close().await {
			log::warn!("Failed to close fetcher: {}", e);
		}

		result
	}

	async fn download_all(&mut self) -> Result<DownloadReport> {
		log::info!("Collecting submissions of {}", self.settings.user);
		let submissions = self
			.api
			.fetch_all(
				self.settings.from_second,
				self.settings.interval,
				self.settings.retries,
			)
			.await?;
		log::info!("Collected {} submissions", submissions.len());

		if let Some(path) = &self.settings.dump_json {
			write_json(&submissions, path)?;
			log::info!("Wrote submission records to {}", path.display());
		}

		let by_contest = organize_by_contest(&submissions);
		let total: usize = by_contest.values().map(Vec::len).sum();
		log::info!(
			"{} accepted problems across {} contests",
			total,
			by_contest.len()
		);

		let progress_bar = ProgressBar::new(total as u64);
		progress_bar.set_style(
			ProgressStyle::default_bar()
				.template("{msg} {spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({eta_precise})")
				.expect("Failed to set progress bar style.")
				.progress_chars("##-"),
		);
		progress_bar.set_message("Downloading submitted codes");

		let mut report = DownloadReport::default();

		for (contest_id, contest_submissions) in &by_contest {
			let contest_dir = self.settings.output_dir.join(contest_id);
			fs::create_dir_all(&contest_dir)
				.await
				.with_context(|| format!("Failed to create {}", contest_dir.display()))?;

			for submission in contest_submissions {
				self.download_one(submission, &mut report).await?;
				progress_bar.inc(1);
			}
		}

		progress_bar.finish_with_message(format!(
			"Done! - Written: {}, Skipped: {}, Failed: {}",
			report.written, report.skipped, report.failed
		));

		Ok(report)
	}

	async fn download_one(
		&mut self,
		submission: &Submission,
		report: &mut DownloadReport,
	) -> Result<()> {
		let path = output_path(&self.settings.output_dir, submission);
		if !self.settings.overwrite {
			match fs::try_exists(&path).await {
				Ok(false) => {}
				Ok(true) => {
					log::debug!("Skipping {}, already saved", path.display());
					report.skipped += 1;
					return Ok(());
				}
				Err(e) => {
					log::warn!(
						"Skipping {}, cannot check for a saved copy: {}",
						path.display(),
						e
					);
					report.skipped += 1;
					return Ok(());
				}
			}
		}

		let url = submission_url(&self.settings.contest_url, submission);
		let result = self.fetcher.fetch_code(&url).await;

		match result {
			Ok(code) => match fs::write(&path, code).await {
				Ok(()) => {
					log::info!("Saved {} -> {}", url, path.display());
					report.written += 1;
				}
				Err(e) => {
					log::error!("Failed to write {}: {}", path.display(), e);
					report.failed += 1;
				}
			},
			Err(e) => {
				log::error!("Error fetching code for {}: {}", url, e);
				report.failed += 1;
			}
		}

		tokio::time::sleep(self.settings.interval).await;
		Ok(())
	}
}
