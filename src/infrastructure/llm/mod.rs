//! # LLM
//!
//! Thin HTTP wrapper over hosted text-generation APIs (Gemini and OpenAI-compatible).
//! Agents from the configuration map to a provider, a model and credentials.
//!
//! ```rust,ignore
//! let client = Client::new(app_config);
//! let context = Context::new()
//!     .add_system_message("You are a helpful assistant.")
//!     .add_user_message("What is 2+2?")
//!     .with_temperature(0.8);
//! let response = client.chat("gemini", context).await?;
//! println!("{}", response.content);
//! ```

mod client;
pub mod providers;
mod types;

pub use client::Client;

pub use types::{Context, Error, MessageRole, Provider, Response, TokenUsage};
