//! In-memory session store. Each completed analysis lives under a UUID
//! handed back to the client; chat and results lookups are scoped to that
//! id. State is process-local and dropped on restart.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;
use crate::evaluation::evaluator::Evaluation;
use crate::matching::scoring::{CategoryScore, MatchedSkill, MissingSkill};

/// Everything one analysis run produced, as returned by the results
/// endpoint and consumed by the chat assistant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSession {
    pub candidate_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub job_title: String,
    pub ats_score: f64,
    pub role_fit_score: f64,
    pub category_scores: Vec<CategoryScore>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub matched_skills_detailed: Vec<MatchedSkill>,
    pub missing_skills_detailed: Vec<MissingSkill>,
    pub ai_analysis: Evaluation,
    pub timestamp: String,
}

/// What the store knows about a session id. Chat and results handlers
/// match on this instead of probing an option.
#[derive(Debug, Clone)]
pub enum SessionState {
    NoAnalysis,
    AnalysisReady(AnalysisSession),
}

#[derive(Debug)]
struct SessionEntry {
    analysis: AnalysisSession,
    /// Rendered lazily on the first chat message, then reused.
    chat_context: Option<String>,
}

/// Shared handle to the session map. Cloning is cheap; all clones see
/// the same sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
}

impl SessionStore {
    /// Stores a completed analysis under `session_id`, or under a fresh
    /// UUID when none is given. A caller re-analyzing under its existing
    /// id replaces the prior analysis in place, so one caller holds at
    /// most one live session; the stale chat context is dropped with it.
    pub async fn insert(&self, session_id: Option<Uuid>, analysis: AnalysisSession) -> Uuid {
        let id = session_id.unwrap_or_else(Uuid::new_v4);
        self.inner.write().await.insert(
            id,
            SessionEntry {
                analysis,
                chat_context: None,
            },
        );
        id
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn state(&self, id: Uuid) -> SessionState {
        match self.inner.read().await.get(&id) {
            Some(entry) => SessionState::AnalysisReady(entry.analysis.clone()),
            None => SessionState::NoAnalysis,
        }
    }

    /// The session's analysis, or the typed no-analysis rejection.
    pub async fn analysis(&self, id: Uuid) -> Result<AnalysisSession, AppError> {
        match self.state(id).await {
            SessionState::AnalysisReady(analysis) => Ok(analysis),
            SessionState::NoAnalysis => Err(AppError::NoAnalysis),
        }
    }

    /// Returns the cached chat context for `id`, rendering it with
    /// `render` on first use.
    pub async fn ensure_chat_context<F>(&self, id: Uuid, render: F) -> Result<String, AppError>
    where
        F: FnOnce(&AnalysisSession) -> String,
    {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or(AppError::NoAnalysis)?;
        if entry.chat_context.is_none() {
            entry.chat_context = Some(render(&entry.analysis));
        }
        Ok(entry.chat_context.clone().unwrap_or_default())
    }
}
