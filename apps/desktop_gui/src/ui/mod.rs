//! egui single-page view.

pub mod app;
