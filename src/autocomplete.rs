//! Skill tagging with backend suggestions.

use crate::api::SkillSuggestion;

/// Whether `query` is long enough to ask the backend about.
pub fn should_query(query: &str, min_chars: usize) -> bool {
	query.trim().chars().count() >= min_chars
}

/// Suggestion names, without the ones already tagged.
pub fn filter_suggestions(suggestions: Vec<SkillSuggestion>, tagged: &SkillTags) -> Vec<String> {
	suggestions
		.into_iter()
		.map(|s| s.name)
		.filter(|name| !tagged.contains(name))
		.collect()
}

/// Manually tagged skills in the order they were added, without duplicates.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SkillTags(Vec<String>);

impl SkillTags {
	/// Returns false when the skill is blank or already tagged.
	pub fn add(&mut self, skill: &str) -> bool {
		let skill = skill.trim();
		if skill.is_empty() || self.contains(skill) {
			return false;
		}
		self.0.push(skill.to_string());
		true
	}

	pub fn remove(&mut self, skill: &str) -> bool {
		let before = self.0.len();
		self.0.retain(|s| s != skill);
		self.0.len() != before
	}

	pub fn contains(&self, skill: &str) -> bool {
		self.0.iter().any(|s| s == skill)
	}

	pub fn as_slice(&self) -> &[String] {
		&self.0
	}

	pub fn clear(&mut self) {
		self.0.clear();
	}

	pub fn to_vec(&self) -> Vec<String> {
		self.0.clone()
	}
}
