//! Orchestration services: correlation strategies, album/share resolution,
//! the upload orchestrator, and the result store.

pub mod albums;
pub mod correlation;
pub mod orchestrator;
pub mod result_store;
