use serde::{Deserialize, Serialize};

/// The person sending the email.
///
/// Missing fields in a persisted blob load as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SenderProfile {
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    /// Sentence the body must end with, e.g. `감사합니다.`
    pub fixed_closing_remark: String,
}

impl SenderProfile {
    /// `"{department} {position} {name}"` with blank parts skipped.
    pub fn introduction(&self) -> String {
        [&self.department, &self.position, &self.name]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
