//! Ranking and per-skill breakdown for the job role matcher.

use crate::api::{MatchResult, MatchedCandidate};

/// What the results panel of the matcher shows.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum MatchView {
	/// No search has run yet.
	#[default]
	Prompt,
	Loading,
	/// The request failed; the message is shown inline.
	Failed(String),
	/// The search ran and nobody scored.
	Empty,
	Results {
		required_skills: Vec<String>,
		candidates: Vec<MatchedCandidate>,
	},
}

impl MatchView {
	pub fn from_result(result: MatchResult) -> Self {
		if result.matched_candidates.is_empty() {
			return MatchView::Empty;
		}
		MatchView::Results {
			required_skills: result.required_skills,
			candidates: rank_candidates(result.matched_candidates),
		}
	}

	pub fn is_loading(&self) -> bool {
		matches!(self, MatchView::Loading)
	}
}

/// Highest total score first; equal scores keep the order the server sent.
pub fn rank_candidates(mut candidates: Vec<MatchedCandidate>) -> Vec<MatchedCandidate> {
	candidates.sort_by(|a, b| b.total_score.total_cmp(&a.total_score));
	candidates
}

#[derive(Clone, Debug, PartialEq)]
pub struct SkillBar {
	pub skill: String,
	pub score: f64,
	pub max: f64,
	/// `score / max`, clamped to `0..=1`.
	pub fraction: f64,
}

/// One bar per required skill, in the role's order.
///
/// The candidate's `max_score` is split evenly across the required skills;
/// skills the candidate has no score for show as zero.
pub fn skill_breakdown(candidate: &MatchedCandidate, required_skills: &[String]) -> Vec<SkillBar> {
	if required_skills.is_empty() {
		return Vec::new();
	}
	let per_skill = candidate.max_score / required_skills.len() as f64;

	required_skills
		.iter()
		.map(|skill| {
			let score = candidate
				.skill_scores
				.iter()
				.find(|s| &s.skill == skill)
				.map_or(0.0, |s| s.score);
			let fraction = if per_skill > 0.0 {
				(score / per_skill).clamp(0.0, 1.0)
			} else {
				0.0
			};
			SkillBar {
				skill: skill.clone(),
				score,
				max: per_skill,
				fraction,
			}
		})
		.collect()
}

/// `4` rather than `4.0`; fractional scores keep one decimal.
pub fn format_score(score: f64) -> String {
	if score.fract() == 0.0 {
		format!("{score:.0}")
	} else {
		format!("{score:.1}")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::api::SkillScore;

	fn candidate(name: &str, total: f64, scores: &[(&str, f64)]) -> MatchedCandidate {
		MatchedCandidate {
			name: name.into(),
			title: "Engineer".into(),
			total_score: total,
			max_score: 4.0,
			skill_scores: scores
				.iter()
				.map(|&(skill, score)| SkillScore {
					skill: skill.into(),
					score,
				})
				.collect(),
		}
	}

	#[test]
	fn ranking_is_descending_and_stable() {
		let ranked = rank_candidates(vec![
			candidate("john", 2.0, &[]),
			candidate("elena", 4.0, &[]),
			candidate("maria", 2.0, &[]),
		]);
		let names: Vec<_> = ranked.iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, ["elena", "john", "maria"]);
	}

	#[test]
	fn zero_candidates_is_empty_not_failed() {
		let view = MatchView::from_result(MatchResult {
			required_skills: vec!["Python".into()],
			matched_candidates: vec![],
		});
		assert_eq!(view, MatchView::Empty);
	}

	#[test]
	fn breakdown_follows_required_skills() {
		let required = vec!["Python".to_string(), "SQL".to_string()];
		let elena = candidate("elena", 3.0, &[("SQL", 1.0), ("Python", 2.0), ("Go", 2.0)]);
		let bars = skill_breakdown(&elena, &required);

		assert_eq!(bars.len(), 2);
		assert_eq!(bars[0].skill, "Python");
		assert_eq!(bars[0].max, 2.0);
		assert_eq!(bars[0].fraction, 1.0);
		assert_eq!(bars[1].fraction, 0.5);
	}

	#[test]
	fn missing_scores_and_overflow_are_clamped() {
		let required = vec!["Python".to_string(), "AWS".to_string()];
		// certified skills score above the per-skill share
		let maria = candidate("maria", 4.0, &[("AWS", 4.0)]);
		let bars = skill_breakdown(&maria, &required);
		assert_eq!(bars[0].score, 0.0);
		assert_eq!(bars[0].fraction, 0.0);
		assert_eq!(bars[1].fraction, 1.0);

		assert!(skill_breakdown(&maria, &[]).is_empty());
	}

	#[test]
	fn scores_format_without_trailing_zero() {
		assert_eq!(format_score(4.0), "4");
		assert_eq!(format_score(2.5), "2.5");
	}
}
