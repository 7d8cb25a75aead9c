//! # Anthropic Claude API Client
//!
//! Minimal client for the Anthropic Messages API, used to write attendee
//! itineraries.
//!
//! ## Example
//!
//! ```no_run
//! use pd_registration_anthropic::{AnthropicClient, MessagesRequest};
//! use pd_registration_anthropic::types::Message;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = AnthropicClient::new(std::env::var("ANTHROPIC_API_KEY")?);
//!
//!     let request = MessagesRequest::new(vec![
//!         Message::user("Write a short welcome for a PD day attendee."),
//!     ]);
//!
//!     let response = client.messages(request).await?;
//!     println!("{}", response.text());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod messages;
pub mod types;

// Re-export main types for convenience
pub use client::AnthropicClient;
pub use error::ClaudeError;
pub use messages::{DEFAULT_MODEL, MessagesRequest, MessagesResponse};
pub use types::{ContentBlock, Message, Role, StopReason, Usage};
