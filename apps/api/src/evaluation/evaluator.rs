//! Narrative Evaluator: builds a structured prompt from the scoring
//! output, makes a single LLM call, and parses the returned JSON into an
//! `Evaluation`.
//!
//! This module returns `Result`: the fallback substitution is a policy
//! decision made by the caller, not buried here.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::evaluation::prompts::{EVALUATION_PROMPT_TEMPLATE, EVALUATION_SYSTEM};
use crate::llm_client::{LlmClient, LlmError};
use crate::matching::scoring::MatchResult;

/// Character bound applied to the resume and JD text included in the prompt.
const TEXT_PREFIX_CHARS: usize = 2000;
/// At most this many matched/missing skill names are listed in the prompt.
const SKILL_LIST_CAP: usize = 15;

/// First brace-delimited object in the response, greedy. The model is told
/// to return bare JSON but sometimes wraps it in prose.
static JSON_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{.*\}").expect("json object pattern"));

/// Qualitative evaluation of a candidate. Immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub overall_fit: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub red_flags: String,
    pub recommendation: String,
    pub confidence: String,
    pub learning_plan_30: String,
    pub learning_plan_60: String,
    pub learning_plan_90: String,
    pub resume_tips: String,
    /// 0-5 scalar derived from `recommendation`; the LLM does not set it.
    #[serde(default)]
    pub role_fit_score: f64,
}

impl Evaluation {
    /// The fixed record substituted when the LLM call fails or returns
    /// unusable content. Its role-fit score is a literal 3.0, not derived
    /// from the recommendation mapping.
    pub fn fallback() -> Self {
        Self {
            overall_fit: "Analysis completed. Review detailed scores below.".to_string(),
            strengths: vec![
                "Technical skills present".to_string(),
                "Relevant experience".to_string(),
                "Educational background".to_string(),
            ],
            weaknesses: vec![
                "Some gaps in required skills".to_string(),
                "Additional training recommended".to_string(),
            ],
            red_flags: String::new(),
            recommendation: "Moderate Fit".to_string(),
            confidence: "Medium".to_string(),
            learning_plan_30: "Focus on top priority skills from missing list".to_string(),
            learning_plan_60: "Complete relevant certifications".to_string(),
            learning_plan_90: "Build real-world project portfolio".to_string(),
            resume_tips: "Add more quantifiable achievements and keywords".to_string(),
            role_fit_score: 3.0,
        }
    }
}

/// Maps a recommendation label to the 0-5 role-fit score. Total: any
/// unrecognized label maps to 2.0.
pub fn role_fit_score(recommendation: &str) -> f64 {
    match recommendation {
        "Strong Fit" => 4.5,
        "Moderate Fit" => 3.5,
        _ => 2.0,
    }
}

/// Runs the narrative evaluation: one LLM call, JSON extraction, parse,
/// role-fit derivation. Any failure is returned to the caller, which
/// substitutes `Evaluation::fallback()`.
pub async fn evaluate(
    llm: &LlmClient,
    resume_text: &str,
    jd_text: &str,
    result: &MatchResult,
) -> Result<Evaluation, LlmError> {
    let prompt = build_prompt(resume_text, jd_text, result);

    let raw = llm.call(&prompt, EVALUATION_SYSTEM).await?;

    let json = extract_json_object(&raw).ok_or(LlmError::MissingJson)?;
    let mut evaluation: Evaluation = serde_json::from_str(json)?;
    evaluation.role_fit_score = role_fit_score(&evaluation.recommendation);
    Ok(evaluation)
}

fn build_prompt(resume_text: &str, jd_text: &str, result: &MatchResult) -> String {
    let matched = skill_list(result.matched_flat.iter().map(|m| m.skill.as_str()));
    let missing = skill_list(result.missing_flat.iter().map(|m| m.skill.as_str()));

    EVALUATION_PROMPT_TEMPLATE
        .replace("{job_description}", &truncate_chars(jd_text, TEXT_PREFIX_CHARS))
        .replace("{resume}", &truncate_chars(resume_text, TEXT_PREFIX_CHARS))
        .replace("{ats_score}", &result.overall_score.to_string())
        .replace("{matched_skills}", &matched)
        .replace("{missing_skills}", &missing)
}

/// Joins at most `SKILL_LIST_CAP` skill names as a comma-separated list.
fn skill_list<'a>(skills: impl Iterator<Item = &'a str>) -> String {
    skills.take(SKILL_LIST_CAP).collect::<Vec<_>>().join(", ")
}

/// Bounded character prefix; always lands on a char boundary.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Returns the first brace-delimited JSON object in `text`, greedy.
fn extract_json_object(text: &str) -> Option<&str> {
    JSON_OBJECT_RE.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::scoring::{MatchedSkill, MissingSkill, Priority};

    fn result_with_skills(matched: &[&str], missing: &[&str]) -> MatchResult {
        MatchResult {
            matched: vec![],
            missing: vec![],
            category_scores: vec![],
            overall_score: 66.7,
            matched_flat: matched
                .iter()
                .map(|s| MatchedSkill {
                    skill: s.to_string(),
                    category: "Tech".to_string(),
                    confidence: 100,
                })
                .collect(),
            missing_flat: missing
                .iter()
                .map(|s| MissingSkill {
                    skill: s.to_string(),
                    category: "Tech".to_string(),
                    priority: Priority::High,
                })
                .collect(),
        }
    }

    #[test]
    fn test_role_fit_score_mapping_is_total() {
        assert_eq!(role_fit_score("Strong Fit"), 4.5);
        assert_eq!(role_fit_score("Moderate Fit"), 3.5);
        assert_eq!(role_fit_score("Weak Fit"), 2.0);
        assert_eq!(role_fit_score("anything else"), 2.0);
        assert_eq!(role_fit_score(""), 2.0);
    }

    #[test]
    fn test_fallback_record_is_fixed() {
        let fallback = Evaluation::fallback();
        assert_eq!(fallback.recommendation, "Moderate Fit");
        assert_eq!(fallback.confidence, "Medium");
        // Literal 3.0 on the fallback path, not the 3.5 the mapping
        // would give "Moderate Fit".
        assert_eq!(fallback.role_fit_score, 3.0);
        assert_eq!(fallback.red_flags, "");
    }

    #[test]
    fn test_extract_json_object_from_wrapped_text() {
        let raw = "Here is the evaluation:\n{\"overall_fit\": \"good\"}\nHope this helps!";
        assert_eq!(extract_json_object(raw), Some("{\"overall_fit\": \"good\"}"));
    }

    #[test]
    fn test_extract_json_object_is_greedy() {
        let raw = "{\"a\": {\"b\": 1}} trailing {\"c\": 2}";
        // Greedy match spans from the first brace to the last.
        assert_eq!(extract_json_object(raw), Some("{\"a\": {\"b\": 1}} trailing {\"c\": 2}"));
    }

    #[test]
    fn test_extract_json_object_none_without_braces() {
        assert_eq!(extract_json_object("no json here"), None);
    }

    #[test]
    fn test_evaluation_parses_llm_json() {
        let json = r#"{
            "overall_fit": "Solid backend candidate.",
            "strengths": ["Python depth", "Cloud experience"],
            "weaknesses": ["No Kubernetes"],
            "red_flags": "",
            "recommendation": "Strong Fit",
            "confidence": "High",
            "learning_plan_30": "Learn Kubernetes basics",
            "learning_plan_60": "Deploy a cluster",
            "learning_plan_90": "Pass the CKA",
            "resume_tips": "Quantify achievements"
        }"#;
        let mut evaluation: Evaluation = serde_json::from_str(json).unwrap();
        evaluation.role_fit_score = role_fit_score(&evaluation.recommendation);
        assert_eq!(evaluation.role_fit_score, 4.5);
        assert_eq!(evaluation.strengths.len(), 2);
    }

    #[test]
    fn test_build_prompt_caps_skill_lists_at_15() {
        let many: Vec<String> = (0..30).map(|i| format!("Skill{i}")).collect();
        let many_refs: Vec<&str> = many.iter().map(String::as_str).collect();
        let result = result_with_skills(&many_refs, &[]);

        let prompt = build_prompt("resume", "jd", &result);
        assert!(prompt.contains("Skill14"));
        assert!(!prompt.contains("Skill15,"));
        assert!(!prompt.contains("Skill29"));
    }

    #[test]
    fn test_build_prompt_truncates_long_documents() {
        let long_resume = "x".repeat(5000);
        let result = result_with_skills(&["Python"], &["Go"]);

        let prompt = build_prompt(&long_resume, "jd text", &result);
        // 2000-char prefix, not the full document
        assert!(!prompt.contains(&"x".repeat(2001)));
        assert!(prompt.contains(&"x".repeat(2000)));
        assert!(prompt.contains("66.7/100"));
    }

    #[test]
    fn test_truncate_chars_respects_char_boundaries() {
        let text = "héllo wörld".repeat(400);
        let truncated = truncate_chars(&text, 2000);
        assert_eq!(truncated.chars().count(), 2000);
    }
}
