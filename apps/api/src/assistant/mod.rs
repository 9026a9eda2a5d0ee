// Assistant: chat transcript, prompt construction and the review flows that
// call the completion client. Reads the resume; never writes it.

pub mod handlers;
pub mod markdown;
pub mod prompts;
pub mod service;
pub mod session;
pub mod transcript;
