//! Provider implementations for LappyBot.
//!
//! Text generation goes through `lappybot_core::Provider`, image lookup
//! through `lappybot_core::ImageSearch`. The router builds both from
//! configuration.

pub mod image_search;
pub mod openai_compat;
pub mod retry;
pub mod router;

pub use image_search::{GoogleImageSearch, UnconfiguredImageSearch};
pub use openai_compat::OpenAiCompatProvider;
pub use retry::RetryProvider;
pub use router::{ProviderRouter, build_from_config, build_generator, build_image_search};
