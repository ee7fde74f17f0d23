pub mod lead;

pub use lead::{SubmissionInput, SubmissionRecord};
