pub mod handler;
pub mod honeypot;
pub mod metadata;
pub mod parser;
pub mod validate;

pub use handler::{SubmissionHandler, SubmitResponse};
