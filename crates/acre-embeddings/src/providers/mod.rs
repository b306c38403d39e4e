//! Embedding provider backends.

mod openai_http;

pub use openai_http::OpenAiHttpProvider;
