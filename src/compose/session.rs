use super::composer::{Composer, GenerationRequest, Outcome};
use crate::draft::{Draft, LanguageTag};
use crate::error::{ComposeError, Precondition};
use crate::llm::TextGenerator;
use crate::profile::SenderProfile;
use crate::recipient::{Recipient, RecipientSet};
use crate::store::{KeyValueStore, ProfileStore};
use crate::template::{ClosingRemarkTable, FieldRecord, Selection, TemplateKind};

/// Everything the user is working on in one drafting session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub selection: Option<Selection>,
    pub recipients: RecipientSet,
    pub profile: SenderProfile,
    pub closing_remarks: ClosingRemarkTable,
    pub draft: Draft,
    pub generating: bool,
    pub translating: bool,
}

impl SessionState {
    /// Closing remark for the selected template. Empty for free text.
    pub fn closing_remark(&self) -> &str {
        self.selection
            .as_ref()
            .and_then(Selection::kind)
            .map_or("", |kind| self.closing_remarks.get(kind))
    }
}

/// Drives generation and translation for one draft.
///
/// Profile and closing remark changes are written through to the store as
/// soon as they are made.
pub struct Session<G, S> {
    state: SessionState,
    composer: Composer<G>,
    store: ProfileStore<S>,
}

impl<G: TextGenerator, S: KeyValueStore> Session<G, S> {
    /// Starts a session with the profile and closing remarks saved in `store`.
    pub fn new(generator: G, store: S) -> Self {
        let store = ProfileStore::new(store);
        let state = SessionState {
            profile: store.load_profile(),
            closing_remarks: store.load_closing_remarks(),
            ..SessionState::default()
        };
        Self {
            state,
            composer: Composer::new(generator),
            store,
        }
    }

    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    pub const fn draft(&self) -> &Draft {
        &self.state.draft
    }

    pub const fn composer(&self) -> &Composer<G> {
        &self.composer
    }

    /// Selects a template with empty fields. Re-selecting the current one keeps its fields.
    pub fn select_template(&mut self, kind: TemplateKind) {
        if self.state.selection.as_ref().and_then(Selection::kind) == Some(kind) {
            return;
        }
        tracing::debug!(template = %kind, "Template selected");
        self.state.selection = Some(Selection::Template(FieldRecord::empty(kind)));
    }

    /// Replaces the form data, selecting its template.
    pub fn set_fields(&mut self, record: FieldRecord) {
        self.state.selection = Some(Selection::Template(record));
    }

    /// Sets one form field of the selected template.
    ///
    /// # Errors
    ///
    /// Returns an error if no template is selected or the field is unknown.
    pub fn set_field(&mut self, field: &str, value: &str) -> anyhow::Result<()> {
        match &mut self.state.selection {
            Some(Selection::Template(record)) => record.set(field, value),
            _ => anyhow::bail!("Select a template before setting fields"),
        }
    }

    /// Drops any template and describes the email in the user's own words.
    pub fn set_free_text(&mut self, description: &str) {
        tracing::debug!("Free-text description set");
        self.state.selection = Some(Selection::FreeText(description.to_string()));
    }

    /// Returns `false` if the recipient was already selected.
    pub fn add_recipient(&mut self, recipient: Recipient) -> bool {
        self.state.recipients.add(recipient)
    }

    /// Returns `false` if no recipient with `id` was selected.
    pub fn remove_recipient(&mut self, id: &str) -> bool {
        self.state.recipients.remove(id)
    }

    pub fn update_profile(&mut self, profile: SenderProfile) {
        self.state.profile = profile;
        self.store.save_profile(&self.state.profile);
    }

    pub fn set_closing_remark(&mut self, kind: TemplateKind, remark: &str) {
        self.state.closing_remarks.set(kind, remark);
        self.store.save_closing_remarks(&self.state.closing_remarks);
    }

    pub fn reset_closing_remark(&mut self, kind: TemplateKind) {
        self.state.closing_remarks.reset(kind);
        self.store.save_closing_remarks(&self.state.closing_remarks);
    }

    /// Hand edit. The draft's language is unchanged.
    pub fn edit_subject(&mut self, subject: &str) {
        self.state.draft.subject = subject.to_string();
    }

    /// Hand edit. The draft's language is unchanged.
    pub fn edit_body(&mut self, body: &str) {
        self.state.draft.body = body.to_string();
    }

    /// Runs one generation cycle into the draft.
    ///
    /// Precondition violations return `Err` and leave the draft untouched.
    /// Otherwise the draft is cleared and then filled; `Ok(Some(_))` means it
    /// holds a failure message rather than generated text.
    pub async fn generate(&mut self) -> Result<Option<ComposeError>, Precondition> {
        if self.state.generating {
            return Err(Precondition::GenerationInFlight);
        }
        let Some(selection) = &self.state.selection else {
            return Err(Precondition::NoTemplate);
        };
        let request = GenerationRequest {
            selection,
            sender: &self.state.profile,
            recipients: self.state.recipients.as_slice(),
            closing_remark: selection
                .kind()
                .map_or("", |kind| self.state.closing_remarks.get(kind)),
        };
        request.validate()?;

        self.state.draft = Draft::default();
        self.state.generating = true;
        let outcome = self.composer.generate(request).await;
        self.state.generating = false;

        match outcome? {
            Outcome::Completed(generated) => {
                self.state.draft = generated.draft;
                Ok(generated.failure)
            }
            Outcome::Superseded => Ok(None),
        }
    }

    /// Translates the draft in place.
    ///
    /// Translating into the current language does nothing. An empty draft, or
    /// one holding a failure message, has nothing to translate. On error the
    /// draft keeps its previous subject, body and language.
    pub async fn translate(&mut self, target: LanguageTag) -> Result<(), ComposeError> {
        if self.state.translating {
            return Err(Precondition::TranslationInFlight.into());
        }
        if self.state.generating {
            return Err(Precondition::GenerationInFlight.into());
        }
        if self.state.draft.body.is_empty() || self.state.draft.language.is_none() {
            return Err(Precondition::NothingToTranslate.into());
        }

        self.state.translating = true;
        let outcome = self.composer.translate(&self.state.draft, target).await;
        self.state.translating = false;

        if let Outcome::Completed(translated) = outcome? {
            self.state.draft = translated;
        }
        Ok(())
    }

    /// Body as plain text for the clipboard. The draft is not modified.
    pub fn plain_body(&self) -> String {
        self.state.draft.plain_body()
    }
}
