#![allow(clippy::unwrap_used)]
//! End-to-end drafting flow through the public [`Session`] API.
//!
//! A canned generator stands in for the network service so every prompt
//! and reply can be inspected.

use std::collections::VecDeque;
use std::sync::Mutex;

use maildraft::compose::{CREDENTIAL_MISSING_MESSAGE, Session};
use maildraft::draft::LanguageTag;
use maildraft::error::{ComposeError, Precondition};
use maildraft::llm::TextGenerator;
use maildraft::profile::SenderProfile;
use maildraft::recipient::Recipient;
use maildraft::store::{MemoryStore, SqliteStore};
use maildraft::template::TemplateKind;
use tempfile::TempDir;

struct CannedGenerator {
    credential: bool,
    replies: Mutex<VecDeque<anyhow::Result<String>>>,
    prompts: Mutex<Vec<String>>,
}

impl CannedGenerator {
    fn new(replies: Vec<&str>) -> Self {
        Self {
            credential: true,
            replies: Mutex::new(replies.into_iter().map(|r| Ok(r.to_string())).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl TextGenerator for CannedGenerator {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn generate_text(&self, prompt: &str) -> anyhow::Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("no reply scripted")))
    }
}

fn hong() -> Recipient {
    Recipient {
        id: "1".to_string(),
        name: "홍길동".to_string(),
        position: "선임".to_string(),
        role: "개발자".to_string(),
        department: None,
        email: "hong@company.com".to_string(),
    }
}

fn sender() -> SenderProfile {
    SenderProfile {
        name: "김철수".to_string(),
        department: "개발팀".to_string(),
        position: "대리".to_string(),
        email: "chulsoo@company.com".to_string(),
        fixed_closing_remark: "감사합니다.".to_string(),
    }
}

fn leave_session(generator: &CannedGenerator) -> Session<&CannedGenerator, MemoryStore> {
    let mut session = Session::new(generator, MemoryStore::default());
    session.update_profile(sender());
    session.select_template(TemplateKind::AnnualLeave);
    session.set_field("startDate", "2024-01-01").unwrap();
    session.set_field("endDate", "2024-01-03").unwrap();
    session.set_field("reason", "가족 여행").unwrap();
    session.add_recipient(hong());
    session
}

#[tokio::test]
async fn test_generate_then_translate_then_copy() {
    let generator = CannedGenerator::new(vec![
        "\"[연차 신청] 김철수 대리\"",
        "```html\n<p>홍길동 선임님, 안녕하세요.</p><script>x()</script><p>감사합니다.</p>\n```",
        r#"{"subject": "[Leave Request] Kim Chulsoo", "body": "<p>Hello Hong,</p><p>Thank you.</p>"}"#,
    ]);
    let mut session = leave_session(&generator);

    let failure = session.generate().await.unwrap();
    assert!(failure.is_none());
    assert_eq!(session.draft().subject, "[연차 신청] 김철수 대리");
    assert_eq!(
        session.draft().body,
        "<p>홍길동 선임님, 안녕하세요.</p><p>감사합니다.</p>"
    );
    assert_eq!(session.draft().language, Some(LanguageTag::Korean));

    let prompts = generator.prompts();
    assert_eq!(prompts.len(), 2);
    assert!(prompts[0].contains("연차 신청"));
    assert!(prompts[1].contains("홍길동 선임님"));
    assert!(prompts[1].contains("가족 여행"));
    assert!(prompts[1].contains(TemplateKind::AnnualLeave.default_closing_remark()));
    assert!(prompts[1].contains("감사합니다."));

    session.translate(LanguageTag::English).await.unwrap();
    assert_eq!(session.draft().subject, "[Leave Request] Kim Chulsoo");
    assert_eq!(session.draft().language, Some(LanguageTag::English));
    assert!(generator.prompts()[2].contains("English"));

    let plain = session.plain_body();
    assert!(plain.contains("Hello Hong,"));
    assert!(plain.contains("Thank you."));
    assert!(!plain.contains('<'));
    // Copying never changes the draft itself
    assert!(session.draft().body.starts_with("<p>"));
}

#[tokio::test]
async fn test_translation_failure_keeps_draft() {
    let generator = CannedGenerator::new(vec!["제목", "<p>본문</p>", "I cannot answer in JSON."]);
    let mut session = leave_session(&generator);
    session.generate().await.unwrap();
    let before = session.draft().clone();

    let err = session.translate(LanguageTag::Japanese).await.unwrap_err();

    assert!(matches!(err, ComposeError::TranslationParse(_)));
    assert_eq!(session.draft(), &before);
}

#[tokio::test]
async fn test_generate_without_recipients_is_rejected() {
    let generator = CannedGenerator::new(vec![]);
    let mut session = Session::new(&generator, MemoryStore::default());
    session.select_template(TemplateKind::WeeklyReport);

    assert_eq!(session.generate().await.unwrap_err(), Precondition::NoRecipients);
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn test_missing_credential_fills_body_with_notice() {
    let mut generator = CannedGenerator::new(vec!["unused"]);
    generator.credential = false;
    let mut session = leave_session(&generator);

    let failure = session.generate().await.unwrap();

    assert_eq!(failure, Some(ComposeError::Configuration));
    assert_eq!(session.draft().body, CREDENTIAL_MISSING_MESSAGE);
    assert!(session.draft().subject.is_empty());
    assert!(generator.prompts().is_empty());
}

#[tokio::test]
async fn test_free_text_draft() {
    let generator = CannedGenerator::new(vec!["회의실 예약 요청", "<p>회의실 예약 부탁드립니다.</p>"]);
    let mut session = Session::new(&generator, MemoryStore::default());
    session.set_free_text("다음 주 화요일 오후 회의실 예약 요청");
    session.add_recipient(hong());

    assert!(session.generate().await.unwrap().is_none());

    let prompts = generator.prompts();
    assert!(prompts[1].contains("다음 주 화요일 오후 회의실 예약 요청"));
    assert!(!prompts[1].contains("[맺음말]"));
}

#[tokio::test]
async fn test_profile_and_remarks_survive_restart() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("store.db");
    let generator = CannedGenerator::new(vec![]);

    {
        let mut session = Session::new(&generator, SqliteStore::open(db_path.clone()).unwrap());
        session.update_profile(sender());
        session.set_closing_remark(TemplateKind::Dispatch, "잘 부탁드립니다.");
    }

    let session = Session::new(&generator, SqliteStore::open(db_path).unwrap());
    assert_eq!(session.state().profile, sender());
    assert_eq!(
        session.state().closing_remarks.get(TemplateKind::Dispatch),
        "잘 부탁드립니다."
    );
    assert_eq!(
        session.state().closing_remarks.get(TemplateKind::AnnualLeave),
        TemplateKind::AnnualLeave.default_closing_remark()
    );
}
