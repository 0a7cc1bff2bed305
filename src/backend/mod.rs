pub mod client;
pub mod http;
pub mod types;

pub use client::{BackendError, ChatBackend};
pub use http::HttpBackend;
pub use types::{ChatRequest, ChatResponse};
