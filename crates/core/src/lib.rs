//! # LeetMentor Core
//!
//! Domain types, traits, and error definitions for the LeetMentor
//! conversational assistant. This crate has **zero framework dependencies** —
//! it defines the domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! The LLM backend is defined as a trait here; implementations live in the
//! providers crate. This enables:
//! - Swapping backends via configuration
//! - Testing the pipeline with scripted mock providers
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod intent;
pub mod message;
pub mod provider;
pub mod session;

// Re-export key types at crate root for ergonomics
pub use error::{Error, PipelineError, ProviderError, Result, SessionError};
pub use intent::Intent;
pub use message::{Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use session::{Session, SessionId};
