//! Request and response bodies of the matching backend.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct JobRole {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SkillScore {
	pub skill: String,
	pub score: f64,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct MatchedCandidate {
	pub name: String,
	#[serde(default)]
	pub title: String,
	pub total_score: f64,
	pub max_score: f64,
	#[serde(default)]
	pub skill_scores: Vec<SkillScore>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct MatchResult {
	#[serde(default)]
	pub required_skills: Vec<String>,
	#[serde(default)]
	pub matched_candidates: Vec<MatchedCandidate>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct SkillSuggestion {
	pub name: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ProcessTextRequest {
	pub name: String,
	pub title: String,
	pub text: String,
	pub manual_skills: Vec<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct ProcessTextResponse {
	#[serde(default)]
	pub status: String,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CredlyIngestRequest {
	pub candidate_name: String,
	pub candidate_title: String,
	pub credly_url: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CredlyIngestResponse {
	pub message: String,
	#[serde(default)]
	pub extracted_skills: Vec<String>,
}
