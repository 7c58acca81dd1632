/*!
 * Session lifecycle management.
 *
 * This module contains:
 * - `controller`: The session controller state machine
 * - `models`: Controller inputs and outputs
 */

pub mod controller;
pub mod models;

pub use controller::SessionController;
pub use models::{AnalyzeFrameParams, AnalyzeOutcome, FeedbackParams, SessionHistory};
