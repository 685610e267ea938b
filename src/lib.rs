//! # maildraft - Business Email Drafting CLI
//!
//! `maildraft` turns a filled-in template (annual leave, business trip, weekly
//! report, ...) into a Korean business email using an OpenAI-compatible API,
//! and can translate the result while keeping its markup intact.
//!
//! ## Features
//!
//! - **Templates**: seven email templates with typed form fields
//! - **Prompt compiler**: deterministic subject and body prompts
//! - **Translation**: Korean, English, Japanese and Simplified Chinese
//! - **Interactive mode**: compose a draft step by step with `maildraft compose`
//!
//! ## Quick Start
//!
//! ```bash
//! # Save who you are once
//! maildraft profile --name 김철수 --department 개발팀 --position 대리
//!
//! # Generate an annual leave request
//! maildraft generate -t annual_leave \
//!     -f startDate=2024-01-01 -f endDate=2024-01-03 -f reason="가족 여행" \
//!     --to 1
//!
//! # Translate it into English as plain text
//! maildraft generate -t annual_leave -f startDate=2024-01-01 --to 1 --lang en --plain
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/maildraft/config.toml`:
//!
//! ```toml
//! [maildraft]
//! provider = "openai"
//! model = "gpt-4o-mini"
//!
//! [providers.openai]
//! endpoint = "https://api.openai.com"
//! api_key_env = "OPENAI_API_KEY"
//!
//! [[recipients]]
//! id = "1"
//! name = "홍길동"
//! position = "선임"
//! role = "개발자"
//! email = "hong@company.com"
//! ```

/// Command-line interface definitions and handlers.
pub mod cli;

/// Generation and translation of drafts.
pub mod compose;

/// Configuration file management and provider settings.
pub mod config;

/// The draft, its languages, and markup cleanup.
pub mod draft;

/// Errors reported by drafting operations.
pub mod error;

/// File system utilities.
pub mod fs;

/// Free-text description input from arguments, files and stdin.
pub mod input;

/// Text-generation client for OpenAI-compatible APIs.
pub mod llm;

/// XDG-style path utilities for configuration and data.
pub mod paths;

/// The sender's profile.
pub mod profile;

/// Prompt compilation from templates and form data.
pub mod prompt;

/// Recipient directory and selection.
pub mod recipient;

/// Interactive compose mode.
pub mod repl;

/// Durable storage for the profile and closing remarks.
pub mod store;

/// Email templates and their form fields.
pub mod template;

/// Terminal UI components (spinner, colors, clipboard).
pub mod ui;
