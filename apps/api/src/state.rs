use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::taxonomy::SkillTaxonomy;
use crate::session::SessionStore;

/// Shared application state, cloned per request by Axum.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    pub taxonomy: Arc<SkillTaxonomy>,
    pub sessions: SessionStore,
}
