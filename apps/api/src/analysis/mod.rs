//! Analysis pipeline. Pure assembly of the deterministic stages: parse
//! both documents, score the match, and fold everything plus the LLM
//! evaluation into an `AnalysisSession`. HTTP concerns live in
//! `handlers`; nothing here touches the network.

pub mod handlers;

use serde::Serialize;

use crate::evaluation::evaluator::Evaluation;
use crate::matching::contact::{extract_contact_info, first_non_blank_line, ContactInfo};
use crate::matching::scoring::MatchResult;
use crate::matching::taxonomy::{detect_skills, SkillProfile, SkillTaxonomy};
use crate::session::AnalysisSession;

/// Job title used when the JD text has no non-blank line.
const FALLBACK_JOB_TITLE: &str = "Position";

/// Top skills carried into a batch summary row.
const SUMMARY_SKILL_CAP: usize = 3;

/// Parsed resume: contact fields, detected skills, and the raw text the
/// evaluator prompts quote from.
#[derive(Debug, Clone)]
pub struct ResumeData {
    pub contact: ContactInfo,
    pub skills: SkillProfile,
    pub raw_text: String,
}

pub fn parse_resume(text: &str, taxonomy: &SkillTaxonomy) -> ResumeData {
    ResumeData {
        contact: extract_contact_info(text),
        skills: detect_skills(text, taxonomy),
        raw_text: text.to_string(),
    }
}

/// Parsed job description. The title is the first non-blank line of the
/// posting, which is what job boards put there.
#[derive(Debug, Clone)]
pub struct JobDescription {
    pub title: String,
    pub skills: SkillProfile,
    pub text: String,
}

pub fn parse_job_description(text: &str, taxonomy: &SkillTaxonomy) -> JobDescription {
    JobDescription {
        title: first_non_blank_line(text).unwrap_or_else(|| FALLBACK_JOB_TITLE.to_string()),
        skills: detect_skills(text, taxonomy),
        text: text.to_string(),
    }
}

/// Assembles the session record from the pipeline stages' outputs.
pub fn build_session(
    resume: &ResumeData,
    jd: &JobDescription,
    result: &MatchResult,
    evaluation: Evaluation,
) -> AnalysisSession {
    AnalysisSession {
        candidate_name: resume.contact.name.clone(),
        email: resume.contact.email.clone(),
        phone: resume.contact.phone.clone(),
        linkedin: resume.contact.linkedin.clone(),
        github: resume.contact.github.clone(),
        job_title: jd.title.clone(),
        ats_score: result.overall_score,
        role_fit_score: evaluation.role_fit_score,
        category_scores: result.category_scores.clone(),
        matched_skills: result.matched_flat.iter().map(|m| m.skill.clone()).collect(),
        missing_skills: result.missing_flat.iter().map(|m| m.skill.clone()).collect(),
        matched_skills_detailed: result.matched_flat.clone(),
        missing_skills_detailed: result.missing_flat.clone(),
        ai_analysis: evaluation,
        timestamp: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
    }
}

/// One row of the batch ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateSummary {
    pub name: String,
    pub email: String,
    pub ats_score: f64,
    pub matched_count: usize,
    pub missing_count: usize,
    pub top_skills: Vec<String>,
}

pub fn summarize_candidate(resume: &ResumeData, result: &MatchResult) -> CandidateSummary {
    CandidateSummary {
        name: resume.contact.name.clone(),
        email: resume.contact.email.clone(),
        ats_score: result.overall_score,
        matched_count: result.matched_flat.len(),
        missing_count: result.missing_flat.len(),
        top_skills: result
            .matched_flat
            .iter()
            .take(SUMMARY_SKILL_CAP)
            .map(|m| m.skill.clone())
            .collect(),
    }
}

/// Sorts candidates best-first by ATS score. Stable: ties keep upload
/// order.
pub fn sort_candidates(candidates: &mut [CandidateSummary]) {
    candidates.sort_by(|a, b| {
        b.ats_score
            .partial_cmp(&a.ats_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
