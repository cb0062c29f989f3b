//! # RigForge Name Generation
//!
//! Best-effort AI name suggestions for custom PC builds.
//!
//! The public entry point, [`suggest_build_name`], is infallible: with no
//! API key configured it returns `Custom Build <date>` without any network
//! traffic, and any provider failure degrades to `Pro Build <date>`. The
//! ledger never depends on this crate; assembly goes ahead with whatever
//! name the caller settled on.

pub mod client;
pub mod config;

pub use client::{suggest_build_name, ChatNameSource, ComponentSummary, NameSource};
pub use config::NamegenConfig;

use thiserror::Error;

/// Why a provider call produced no usable name.
#[derive(Debug, Error)]
pub enum NamegenError {
    /// No API key configured; the caller should use the offline fallback.
    #[error("no API key configured")]
    MissingApiKey,

    /// The HTTP request itself failed (network, TLS, timeout).
    #[error("provider request failed: {0}")]
    Request(String),

    /// The provider answered with a non-success status.
    #[error("provider returned {status}: {body}")]
    Provider { status: u16, body: String },

    /// The response body was not the expected chat completion shape.
    #[error("provider response parse failed: {0}")]
    Parse(String),

    /// The completion carried no assistant content.
    #[error("provider response missing assistant content")]
    EmptyResponse,
}
