// Form Controller: multipart intake, validation, and the submission cycle.
// Rendering goes through render::render_resume; mail goes through the
// Notifier in AppState, never directly.

pub mod controller;
pub mod handlers;
pub mod models;
pub mod upload;
pub mod validation;
