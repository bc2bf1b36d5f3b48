//! Bridge between the UI thread and the async request worker.

pub mod commands;
pub mod runtime;
