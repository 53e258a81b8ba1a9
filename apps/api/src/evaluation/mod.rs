//! LLM-backed layers on top of the deterministic match result: the
//! narrative evaluator and the conversational assistant. Both go through
//! `llm_client`; both degrade to fixed fallbacks at the caller instead of
//! surfacing faults.

pub mod assistant;
pub mod evaluator;
pub mod prompts;
