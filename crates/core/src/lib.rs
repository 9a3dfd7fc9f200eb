//! # LappyBot Core
//!
//! Domain types, traits, and error definitions for the LappyBot laptop assistant.
//! This crate has **no framework dependencies**; it defines the domain model
//! that the catalog engine, the providers, and the chat agent implement against.
//!
//! ## Design Philosophy
//!
//! External collaborators (text generation, image lookup) are traits here.
//! Implementations live in `lappybot-providers`. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with scripted/mock implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod image;
pub mod laptop;
pub mod message;
pub mod provider;

// Re-export key types at crate root for ergonomics
pub use error::{CatalogError, Error, ProviderError, Result};
pub use image::ImageSearch;
pub use laptop::{GpuType, LaptopRecord};
pub use message::{Message, Role, SessionId, Transcript};
pub use provider::{Provider, ProviderRequest, ProviderResponse};
