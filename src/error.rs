//! Errors reported by drafting operations.

use thiserror::Error;

/// An action the caller should have kept disabled.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    #[error("Select a template or describe the email first")]
    NoTemplate,

    #[error("Select at least one recipient first")]
    NoRecipients,

    #[error("An email is already being generated")]
    GenerationInFlight,

    #[error("A translation is already in progress")]
    TranslationInFlight,

    #[error("There is no draft to translate")]
    NothingToTranslate,
}

/// Failure of a generation or translation request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// No API key is configured; no request was sent.
    #[error("No API key is configured for the text-generation service")]
    Configuration,

    /// The service was unreachable, rejected the request, or replied with nothing usable.
    #[error("Text generation failed: {0}")]
    Service(String),

    /// The translation reply was not a `{"subject", "body"}` object.
    #[error("Translation reply could not be parsed: {0}")]
    TranslationParse(String),

    #[error(transparent)]
    Precondition(#[from] Precondition),
}

impl ComposeError {
    /// Wraps a collaborator error, keeping its whole context chain.
    pub fn service(err: &anyhow::Error) -> Self {
        Self::Service(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("Failed to connect to API endpoint");
        let message = ComposeError::service(&err).to_string();
        assert!(message.contains("Failed to connect to API endpoint"));
        assert!(message.contains("connection refused"));
    }

    #[test]
    fn test_precondition_converts_transparently() {
        let err: ComposeError = Precondition::NoRecipients.into();
        assert_eq!(err.to_string(), "Select at least one recipient first");
    }
}
