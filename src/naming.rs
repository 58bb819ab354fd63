use crate::submissions::Submission;
use std::path::{Path, PathBuf};

/// Contests whose problems are lettered `a..z, aa..az, ba..` and saved by number.
const LONG_CONTESTS: [&str; 1] = ["typical90"];

const NUM_ALPHABETS: usize = 26;
const MAX_PROBLEM_PER_CONTEST: usize = 201;

// Checked in order, so longer or more specific labels come before their prefixes.
const EXTENSIONS: [(&str, &str); 21] = [
	("Py", "py"),
	("Rust", "rs"),
	("C++", "cpp"),
	("C#", "cs"),
	("JavaScript", "js"),
	("TypeScript", "ts"),
	("Java", "java"),
	("Kotlin", "kt"),
	("Scala", "scala"),
	("Go", "go"),
	("Haskell", "hs"),
	("Ruby", "rb"),
	("Swift", "swift"),
	("Nim", "nim"),
	("OCaml", "ml"),
	("Julia", "jl"),
	("Zig", "zig"),
	("Bash", "sh"),
	("Crystal", "cr"),
	("D (", "d"),
	("C (", "c"),
];

pub fn problem_suffix(problem_id: &str) -> &str {
	problem_id.rsplit('_').next().unwrap_or(problem_id)
}

/// `a` -> `001`, `z` -> `026`, `aa` -> `027`, ... up to the 201st problem.
pub fn long_contest_number(suffix: &str) -> Option<String> {
	let letter = |c: u8| c.is_ascii_lowercase().then(|| (c - b'a') as usize);

	let index = match suffix.as_bytes() {
		[only] => letter(*only)?,
		[first, second] => (letter(*first)? + 1) * NUM_ALPHABETS + letter(*second)?,
		_ => return None,
	};

	(index < MAX_PROBLEM_PER_CONTEST).then(|| format!("{:03}", index + 1))
}

pub fn file_extension(language: &str) -> &'static str {
	EXTENSIONS
		.iter()
		.find(|(label, _)| language.contains(label))
		.map(|(_, extension)| *extension)
		.unwrap_or("txt")
}

pub fn file_stem(submission: &Submission) -> String {
	let suffix = problem_suffix(&submission.problem_id);

	if LONG_CONTESTS.contains(&submission.contest_id.as_str()) {
		if let Some(number) = long_contest_number(suffix) {
			return number;
		}
		log::warn!(
			"Problem {} is outside the numbered range, keeping its letters",
			submission.problem_id
		);
	}

	suffix.to_string()
}

pub fn output_path(output_dir: &Path, submission: &Submission) -> PathBuf {
	output_dir.join(&submission.contest_id).join(format!(
		"{}.{}",
		file_stem(submission),
		file_extension(&submission.language)
	))
}

pub fn submission_url(contest_url: &str, submission: &Submission) -> String {
	format!(
		"{}/contests/{}/submissions/{}",
		contest_url.trim_end_matches('/'),
		submission.contest_id,
		submission.id
	)
}
