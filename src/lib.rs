//! Photograph a menu or product and get back a translated menu or a review card.

pub mod acquisition;
pub mod config;
pub mod inference;
pub mod logging;
pub mod orchestrator;
pub mod ui;
