use std::sync::atomic::{AtomicU64, Ordering};

use crate::draft::{Draft, LanguageTag, clean_body, clean_subject};
use crate::error::{ComposeError, Precondition};
use crate::llm::TextGenerator;
use crate::profile::SenderProfile;
use crate::prompt::{
    compile_body_prompt, compile_subject_prompt, compile_translation_prompt,
    parse_translation_reply,
};
use crate::recipient::Recipient;
use crate::template::Selection;

/// Body shown when no API key is configured.
pub const CREDENTIAL_MISSING_MESSAGE: &str =
    "API 키가 설정되지 않았습니다. 설정 파일 또는 환경 변수에 API 키를 등록한 후 다시 시도해주세요.";

/// Body shown when a generation call fails.
pub const SERVICE_FAILURE_MESSAGE: &str =
    "이메일 생성 중 오류가 발생했습니다. 잠시 후 다시 시도해주세요.";

/// Body shown when the service replies with an empty body.
pub const EMPTY_BODY_MESSAGE: &str = "이메일 본문 생성에 실패했습니다.";

/// Everything one generation cycle needs.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub selection: &'a Selection,
    pub sender: &'a SenderProfile,
    pub recipients: &'a [Recipient],
    pub closing_remark: &'a str,
}

impl GenerationRequest<'_> {
    /// Checks the preconditions `generate` enforces, without side effects.
    pub fn validate(&self) -> Result<(), Precondition> {
        if !self.selection.is_ready() {
            return Err(Precondition::NoTemplate);
        }
        if self.recipients.is_empty() {
            return Err(Precondition::NoRecipients);
        }
        Ok(())
    }
}

/// Result of an async operation that may have been overtaken by a newer generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome<T> {
    Completed(T),
    /// A newer generation started while this one was in flight; its result was dropped.
    Superseded,
}

/// A finished generation cycle.
///
/// When `failure` is set, `draft.body` holds the matching fixed message and
/// `draft.language` is `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub draft: Draft,
    pub failure: Option<ComposeError>,
}

impl Generated {
    fn failed(subject: String, message: &str, failure: ComposeError) -> Self {
        Self {
            draft: Draft {
                subject,
                body: message.to_string(),
                language: None,
            },
            failure: Some(failure),
        }
    }
}

/// Sequences the remote calls behind generation and translation.
///
/// Every `generate` takes a new epoch. Results that resolve after a newer epoch
/// has started are reported as [`Outcome::Superseded`] and never applied.
pub struct Composer<G> {
    generator: G,
    epoch: AtomicU64,
}

impl<G: TextGenerator> Composer<G> {
    pub const fn new(generator: G) -> Self {
        Self {
            generator,
            epoch: AtomicU64::new(0),
        }
    }

    pub const fn generator(&self) -> &G {
        &self.generator
    }

    pub fn current_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.current_epoch() == epoch
    }

    /// Generates a subject, then a body.
    ///
    /// Precondition violations return before any call is made. Service and
    /// credential failures never return `Err`; they are reported in
    /// [`Generated::failure`] with a fixed message in the body.
    pub async fn generate(
        &self,
        request: GenerationRequest<'_>,
    ) -> Result<Outcome<Generated>, Precondition> {
        request.validate()?;

        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(epoch, template = ?request.selection.kind(), "Generating email");

        if !self.generator.has_credential() {
            tracing::warn!(epoch, "No API key configured, skipping generation");
            return Ok(Outcome::Completed(Generated::failed(
                String::new(),
                CREDENTIAL_MISSING_MESSAGE,
                ComposeError::Configuration,
            )));
        }

        let subject_prompt = compile_subject_prompt(request.selection, &request.sender.name);
        let subject_reply = self.generator.generate_text(&subject_prompt).await;
        if !self.is_current(epoch) {
            tracing::debug!(epoch, "Subject result superseded, dropping");
            return Ok(Outcome::Superseded);
        }
        let subject = match subject_reply {
            Ok(raw) => clean_subject(&raw),
            Err(e) => {
                let failure = ComposeError::service(&e);
                tracing::warn!(epoch, error = %failure, "Subject generation failed");
                return Ok(Outcome::Completed(Generated::failed(
                    String::new(),
                    SERVICE_FAILURE_MESSAGE,
                    failure,
                )));
            }
        };

        let body_prompt = compile_body_prompt(
            request.selection,
            request.sender,
            request.recipients,
            request.closing_remark,
        );
        let body_reply = self.generator.generate_text(&body_prompt).await;
        if !self.is_current(epoch) {
            tracing::debug!(epoch, "Body result superseded, dropping");
            return Ok(Outcome::Superseded);
        }
        let body = match body_reply {
            Ok(raw) => clean_body(&raw),
            Err(e) => {
                let failure = ComposeError::service(&e);
                tracing::warn!(epoch, error = %failure, "Body generation failed");
                return Ok(Outcome::Completed(Generated::failed(
                    subject,
                    SERVICE_FAILURE_MESSAGE,
                    failure,
                )));
            }
        };

        if body.is_empty() {
            tracing::warn!(epoch, "Service returned an empty body");
            return Ok(Outcome::Completed(Generated::failed(
                subject,
                EMPTY_BODY_MESSAGE,
                ComposeError::Service("the service returned an empty body".to_string()),
            )));
        }

        tracing::info!(epoch, subject_len = subject.len(), body_len = body.len(), "Email generated");
        Ok(Outcome::Completed(Generated {
            draft: Draft {
                subject,
                body,
                language: Some(LanguageTag::Korean),
            },
            failure: None,
        }))
    }

    /// Translates `draft` into `target`.
    ///
    /// Returns a clone of `draft` without calling the service when its body is
    /// empty or it is already in `target`. On error the caller keeps `draft`.
    pub async fn translate(
        &self,
        draft: &Draft,
        target: LanguageTag,
    ) -> Result<Outcome<Draft>, ComposeError> {
        if !draft.can_translate_to(target) {
            tracing::debug!(%target, "Nothing to translate");
            return Ok(Outcome::Completed(draft.clone()));
        }
        if !self.generator.has_credential() {
            return Err(ComposeError::Configuration);
        }

        let epoch = self.current_epoch();
        tracing::info!(epoch, from = ?draft.language, to = %target, "Translating draft");

        let prompt = compile_translation_prompt(draft, target);
        let reply = self.generator.generate_text(&prompt).await;
        if !self.is_current(epoch) {
            tracing::debug!(epoch, "Translation superseded by a new generation, dropping");
            return Ok(Outcome::Superseded);
        }

        let raw = reply.map_err(|e| ComposeError::service(&e))?;
        let translated = parse_translation_reply(&raw, target).inspect_err(|e| {
            tracing::warn!(epoch, error = %e, "Translation reply rejected");
        })?;

        tracing::info!(epoch, to = %target, "Translation finished");
        Ok(Outcome::Completed(translated))
    }
}
