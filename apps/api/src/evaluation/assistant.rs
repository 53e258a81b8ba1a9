//! Career-coach chat assistant. Each answer is a single LLM call whose
//! system turn is a context block rendered from the session's analysis,
//! so the model only ever sees data from THIS candidate's run.

use crate::evaluation::prompts::{CHAT_CONTEXT_TEMPLATE, CHAT_PROMPT_TEMPLATE};
use crate::llm_client::{LlmClient, LlmError};
use crate::session::AnalysisSession;

/// Skill names included in the context block.
const CONTEXT_SKILL_CAP: usize = 15;
/// Strengths/weaknesses included in the context block.
const CONTEXT_POINT_CAP: usize = 3;
/// Skill names repeated in the per-question prompt.
const PROMPT_SKILL_CAP: usize = 10;

/// Renders the assistant's system turn from a completed analysis. Built
/// once per session and cached by the store.
///
/// The skill counts shown are the counts of the capped lists, so the
/// block never claims more skills than it names.
pub fn build_chat_context(session: &AnalysisSession) -> String {
    let matched_shown = session.matched_skills.len().min(CONTEXT_SKILL_CAP);
    let missing_shown = session.missing_skills.len().min(CONTEXT_SKILL_CAP);

    CHAT_CONTEXT_TEMPLATE
        .replace("{candidate_name}", &session.candidate_name)
        .replace("{job_title}", &session.job_title)
        .replace("{ats_score}", &session.ats_score.to_string())
        .replace("{role_fit_score}", &session.role_fit_score.to_string())
        .replace("{matched_count}", &matched_shown.to_string())
        .replace(
            "{matched_skills}",
            &join_capped(&session.matched_skills, CONTEXT_SKILL_CAP, ", "),
        )
        .replace("{missing_count}", &missing_shown.to_string())
        .replace(
            "{missing_skills}",
            &join_capped(&session.missing_skills, CONTEXT_SKILL_CAP, ", "),
        )
        .replace(
            "{strengths}",
            &join_capped(&session.ai_analysis.strengths, CONTEXT_POINT_CAP, "\n"),
        )
        .replace(
            "{weaknesses}",
            &join_capped(&session.ai_analysis.weaknesses, CONTEXT_POINT_CAP, "\n"),
        )
}

/// Answers one user question against the session's analysis. Stateless
/// between calls: no chat history is kept or replayed.
pub async fn answer(
    llm: &LlmClient,
    chat_context: &str,
    session: &AnalysisSession,
    question: &str,
) -> Result<String, LlmError> {
    let prompt = CHAT_PROMPT_TEMPLATE
        .replace("{question}", question)
        .replace("{ats_score}", &session.ats_score.to_string())
        .replace("{role_fit_score}", &session.role_fit_score.to_string())
        .replace(
            "{matched_skills}",
            &join_capped(&session.matched_skills, PROMPT_SKILL_CAP, ", "),
        )
        .replace(
            "{missing_skills}",
            &join_capped(&session.missing_skills, PROMPT_SKILL_CAP, ", "),
        );

    llm.call(&prompt, chat_context).await
}

fn join_capped(items: &[String], cap: usize, sep: &str) -> String {
    items
        .iter()
        .take(cap)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(sep)
}
