//! Deterministic matching core: contact extraction, taxonomy-based skill
//! detection, and the weighted category-normalized scorer. Everything in
//! this module is pure and synchronous. No I/O here.

pub mod contact;
pub mod scoring;
pub mod taxonomy;
