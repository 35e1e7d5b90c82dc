pub mod feedback;
pub mod health;

pub use feedback::{create_feedback_handler, delete_feedback_handler, get_all_feedback_handler};

pub use health::health_handler;
