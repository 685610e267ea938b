//! Subject and body prompts for a generation cycle.

use std::fmt::Write as _;

use super::detail::render_details;
use crate::draft::ALLOWED_TAGS;
use crate::profile::SenderProfile;
use crate::recipient::{Recipient, greeting};
use crate::template::Selection;

/// Builds the instruction for a one-line subject.
pub fn compile_subject_prompt(selection: &Selection, sender_name: &str) -> String {
    let mut prompt = String::from("다음 정보를 바탕으로 업무용 이메일의 제목을 한 줄로 작성해주세요.\n");

    push_section(&mut prompt, "이메일 종류", &email_kind(selection));
    push_section(&mut prompt, "작성자", sender_name.trim());
    push_section(&mut prompt, "상세 정보", &render_details(selection));

    prompt.push_str(
        "\n[작성 규칙]\n\
         - 제목은 한국어로 작성합니다.\n\
         - 이메일 종류와 핵심 정보(날짜, 장소 등)가 한눈에 드러나도록 간결하게 작성합니다.\n\
         - 제목 텍스트만 출력하고 따옴표, 설명, 마크다운은 포함하지 않습니다.\n",
    );
    prompt
}

/// Builds the instruction for the HTML body.
///
/// The greeting and the sender's department, position and name are embedded
/// verbatim and must be used as given.
pub fn compile_body_prompt(
    selection: &Selection,
    sender: &SenderProfile,
    recipients: &[Recipient],
    closing_remark: &str,
) -> String {
    let greeting = greeting(recipients);
    let introduction = sender.introduction();

    let mut prompt = String::from("다음 정보를 바탕으로 업무용 이메일 본문을 한국어로 작성해주세요.\n");

    push_section(&mut prompt, "이메일 종류", &email_kind(selection));
    push_section(&mut prompt, "받는 사람", &greeting);
    push_section(&mut prompt, "보내는 사람", &sender_block(sender));
    push_section(&mut prompt, "상세 정보", &render_details(selection));
    push_section(&mut prompt, "맺음말", closing_remark.trim());

    let tags = ALLOWED_TAGS
        .iter()
        .map(|tag| format!("<{tag}>"))
        .collect::<Vec<_>>()
        .join(", ");

    let mut rules = vec![
        format!(
            "본문은 반드시 \"{greeting}\"(으)로 시작하고, 이어서 \"{introduction}입니다.\"라고 보내는 사람을 소개합니다. \
             받는 사람과 보내는 사람의 부서, 직급, 이름은 주어진 그대로 쓰고 바꾸거나 생략하지 않습니다."
        ),
        "상세 정보의 날짜, 기간, 장소 등은 빠짐없이 정확하게 포함하고, 여러 항목은 <ul><li> 목록으로 정리합니다.".to_string(),
    ];
    if !closing_remark.trim().is_empty() {
        rules.push("맺음말 문장은 본문 끝부분에 그대로 포함합니다.".to_string());
    }
    let fixed_closing = sender.fixed_closing_remark.trim();
    if !fixed_closing.is_empty() {
        rules.push(format!("본문의 마지막 문장은 \"{fixed_closing}\"입니다."));
    }
    rules.extend([
        "서명(이름, 연락처, 회사 정보 등)은 넣지 않습니다.".to_string(),
        format!("HTML 태그는 {tags}만 사용하고 다른 태그나 속성은 쓰지 않습니다."),
        "마크다운이나 코드 블록(```)으로 감싸지 말고 HTML 본문만 출력합니다.".to_string(),
    ]);

    prompt.push_str("\n[작성 규칙]\n");
    for (i, rule) in rules.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {rule}", i + 1);
    }
    prompt
}

fn email_kind(selection: &Selection) -> String {
    selection
        .kind()
        .map_or_else(|| "기타 (직접 작성)".to_string(), |kind| kind.display_name().to_string())
}

fn sender_block(sender: &SenderProfile) -> String {
    [
        ("부서", &sender.department),
        ("직급", &sender.position),
        ("이름", &sender.name),
        ("이메일", &sender.email),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("- {label}: {}", value.trim()))
    .collect::<Vec<_>>()
    .join("\n")
}

/// Appends `\n[title]\nbody\n`, skipping empty sections.
fn push_section(prompt: &mut String, title: &str, body: &str) {
    if body.is_empty() {
        return;
    }
    let _ = write!(prompt, "\n[{title}]\n{body}\n");
}
