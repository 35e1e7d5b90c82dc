pub mod feedback;

pub use feedback::{CreateFeedbackPayload, Feedback, NewFeedback};
