//! Expansion of recurring templates into dated occurrences.
//!
//! A [`template::RecurringTemplate`] supplies its rule and start point, the
//! [`generator`] walks the rule up to a [`horizon::Horizon`] and attempts one
//! insert per point through an [`store::OccurrenceStore`], and the
//! [`orchestrator`] runs that over every template of a kind while streaming
//! [`progress::ProgressEvent`]s.

pub mod generator;
pub mod horizon;
pub mod orchestrator;
pub mod progress;
pub mod store;
pub mod template;
