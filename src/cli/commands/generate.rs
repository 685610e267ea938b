use anyhow::{Context, Result, bail};

use super::{load_config_file, resolve_recipient};
use crate::cli::GenerateArgs;
use crate::compose::Session;
use crate::config::{ResolveOptions, resolve_config};
use crate::draft::{Draft, LanguageTag};
use crate::input::{DescriptionSource, read_description};
use crate::llm::{ChatClient, TextGenerator};
use crate::store::{KeyValueStore, SqliteStore};
use crate::template::TemplateKind;
use crate::ui::Spinner;

pub async fn run_generate(options: &ResolveOptions, args: GenerateArgs) -> Result<()> {
    let target = args
        .lang
        .as_deref()
        .map(str::parse::<LanguageTag>)
        .transpose()?;

    let config_file = load_config_file()?;
    let resolved = resolve_config(options, &config_file)?;
    let client = ChatClient::from_config(&resolved);
    let mut session = Session::new(client, SqliteStore::new()?);

    fill_selection(&mut session, &args)?;
    for key in &args.to {
        let recipient = resolve_recipient(&config_file.recipients, key)?;
        session.add_recipient(recipient.clone());
    }

    if session.state().profile.introduction().is_empty() {
        eprintln!("Warning: Sender profile is empty. Run 'maildraft profile' to set it.");
    }

    let failure = {
        let _spinner = Spinner::new("Generating email...");
        session.generate().await?
    };
    if let Some(failure) = failure {
        bail!("{}\n\nCause: {failure}", session.draft().body);
    }

    let translation_error = match target {
        Some(target) => {
            let _spinner = Spinner::new(&format!("Translating to {}...", target.english_name()));
            session.translate(target).await.err()
        }
        None => None,
    };

    print!("{}", render(session.draft(), args.plain));

    if let Some(e) = translation_error {
        return Err(e).context("The untranslated draft was printed instead");
    }
    Ok(())
}

fn fill_selection<G: TextGenerator, S: KeyValueStore>(
    session: &mut Session<G, S>,
    args: &GenerateArgs,
) -> Result<()> {
    if let Some(id) = &args.template {
        let kind: TemplateKind = id.parse()?;
        session.select_template(kind);
        for field in &args.fields {
            let (name, value) = parse_field(field)?;
            session.set_field(name, value)?;
        }
        return Ok(());
    }

    let source =
        DescriptionSource::from_args(args.describe.as_deref(), args.describe_file.as_deref());
    if let Some(source) = source {
        session.set_free_text(&read_description(source)?);
    }
    Ok(())
}

fn parse_field(field: &str) -> Result<(&str, &str)> {
    let Some((name, value)) = field.split_once('=') else {
        bail!("Invalid field '{field}': expected NAME=VALUE, e.g. startDate=2024-01-01");
    };
    Ok((name.trim(), value.trim()))
}

/// Subject, blank line, body.
fn render(draft: &Draft, plain: bool) -> String {
    let body = if plain {
        draft.plain_body()
    } else {
        draft.body.clone()
    };
    format!("{}\n\n{body}\n", draft.subject)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        assert_eq!(parse_field("startDate=2024-01-01").unwrap(), ("startDate", "2024-01-01"));
        assert_eq!(parse_field(" reason = a=b ").unwrap(), ("reason", "a=b"));
        assert!(parse_field("reason").is_err());
    }

    #[test]
    fn test_render_html_and_plain() {
        let draft = Draft {
            subject: "[연차 신청] 김철수".to_string(),
            body: "<p>안녕하세요</p><ul><li>1월 1일</li></ul>".to_string(),
            language: Some(LanguageTag::Korean),
        };

        assert_eq!(
            render(&draft, false),
            "[연차 신청] 김철수\n\n<p>안녕하세요</p><ul><li>1월 1일</li></ul>\n"
        );

        let plain = render(&draft, true);
        assert!(plain.starts_with("[연차 신청] 김철수\n\n안녕하세요"));
        assert!(plain.contains("1월 1일"));
        assert!(!plain.contains('<'));
    }
}
