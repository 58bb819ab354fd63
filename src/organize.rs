use crate::submissions::Submission;
use std::collections::BTreeMap;

/// Latest accepted submission per problem, keyed by problem id.
pub fn latest_accepted(submissions: &[Submission]) -> BTreeMap<String, Submission> {
	let mut by_problem: BTreeMap<String, Submission> = BTreeMap::new();

	for submission in submissions.iter().filter(|s| s.is_accepted()) {
		match by_problem.get(&submission.problem_id) {
			Some(kept) if kept.id > submission.id => {}
			_ => {
				by_problem.insert(submission.problem_id.clone(), submission.clone());
			}
		}
	}

	by_problem
}

pub fn group_by_contest(
	by_problem: BTreeMap<String, Submission>,
) -> BTreeMap<String, Vec<Submission>> {
	let mut by_contest: BTreeMap<String, Vec<Submission>> = BTreeMap::new();

	for submission in by_problem.into_values() {
		by_contest
			.entry(submission.contest_id.clone())
			.or_default()
			.push(submission);
	}

	by_contest
}

pub fn organize_by_contest(submissions: &[Submission]) -> BTreeMap<String, Vec<Submission>> {
	group_by_contest(latest_accepted(submissions))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn submission(id: u64, contest_id: &str, problem_id: &str, result: &str) -> Submission {
		Submission {
			id,
			epoch_second: id as i64 * 10,
			problem_id: problem_id.to_string(),
			contest_id: contest_id.to_string(),
			user_id: "tourist".to_string(),
			language: "Rust (1.42.0)".to_string(),
			point: 100.0,
			length: 100,
			result: result.to_string(),
			execution_time: Some(1),
		}
	}

	#[test]
	fn test_latest_accepted_keeps_newest_ac() {
		let submissions = vec![
			submission(1, "abc100", "abc100_a", "AC"),
			submission(2, "abc100", "abc100_a", "WA"),
			submission(3, "abc100", "abc100_a", "AC"),
			submission(4, "abc100", "abc100_a", "TLE"),
		];

		let latest = latest_accepted(&submissions);
		assert_eq!(latest.len(), 1);
		assert_eq!(latest["abc100_a"].id, 3);
	}

	#[test]
	fn test_latest_accepted_is_order_independent() {
		let submissions = vec![
			submission(9, "abc100", "abc100_b", "AC"),
			submission(5, "abc100", "abc100_b", "AC"),
		];

		let latest = latest_accepted(&submissions);
		assert_eq!(latest["abc100_b"].id, 9);
	}

	#[test]
	fn test_unsolved_problems_are_dropped() {
		let submissions = vec![
			submission(1, "abc100", "abc100_a", "WA"),
			submission(2, "abc100", "abc100_b", "CE"),
		];

		assert!(organize_by_contest(&submissions).is_empty());
	}

	#[test]
	fn test_group_by_contest() {
		let submissions = vec![
			submission(1, "arc050", "arc050_b", "AC"),
			submission(2, "abc100", "abc100_c", "AC"),
			submission(3, "abc100", "abc100_a", "AC"),
			submission(4, "arc050", "arc050_b", "AC"),
			submission(5, "typical90", "typical90_aa", "AC"),
		];

		let by_contest = organize_by_contest(&submissions);
		let contests: Vec<&str> = by_contest.keys().map(|k| k.as_str()).collect();
		assert_eq!(contests, vec!["abc100", "arc050", "typical90"]);

		let abc: Vec<&str> = by_contest["abc100"]
			.iter()
			.map(|s| s.problem_id.as_str())
			.collect();
		assert_eq!(abc, vec!["abc100_a", "abc100_c"]);

		assert_eq!(by_contest["arc050"].len(), 1);
		assert_eq!(by_contest["arc050"][0].id, 4);
	}
}
