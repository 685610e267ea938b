//! Text-generation service used to write and translate drafts.

mod client;
mod sse_parser;

pub use client::ChatClient;

use std::future::Future;

use anyhow::Result;

/// A service that turns one prompt into one reply.
///
/// Implementations report transport, auth and quota failures as errors; the
/// composer treats them all alike.
pub trait TextGenerator: Send + Sync {
    /// Whether a credential is available. Checked before every call so a
    /// missing key is reported without touching the network.
    fn has_credential(&self) -> bool;

    fn generate_text(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

impl<T: TextGenerator> TextGenerator for &T {
    fn has_credential(&self) -> bool {
        (**self).has_credential()
    }

    fn generate_text(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send {
        (**self).generate_text(prompt)
    }
}
