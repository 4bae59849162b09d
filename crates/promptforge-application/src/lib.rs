//! Application layer for PromptForge.
//!
//! Wires validated requests, the prompt generator and the history store into
//! the generation state machine exposed to presentation layers.

pub mod generation_controller;
pub mod status;

pub use generation_controller::GenerationController;
pub use status::{STATUS_NOTICE_TTL, StatusNotice};
