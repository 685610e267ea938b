//! Recipients and the selection of who an email is addressed to.

use serde::{Deserialize, Serialize};

/// A person in the recipient directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: Option<String>,
    pub email: String,
}

impl Recipient {
    /// `"{name} {position}님"`, or `"{name}님"` without a position.
    pub fn honorific(&self) -> String {
        let position = self.position.trim();
        if position.is_empty() {
            format!("{}님", self.name)
        } else {
            format!("{} {position}님", self.name)
        }
    }

    /// Secondary line shown next to the name: `position · role[ · department] · email`.
    pub fn summary(&self) -> String {
        let mut parts = vec![self.position.as_str(), self.role.as_str()];
        if let Some(department) = &self.department {
            parts.push(department);
        }
        parts.push(&self.email);
        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" · ")
    }

    fn matches(&self, needle: &str) -> bool {
        [
            Some(self.name.as_str()),
            Some(self.email.as_str()),
            Some(self.position.as_str()),
            Some(self.role.as_str()),
            self.department.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Recipients selected for the current draft, in selection order, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipientSet {
    recipients: Vec<Recipient>,
}

impl RecipientSet {
    /// Adds a recipient. Returns `false` if one with the same id is already selected.
    pub fn add(&mut self, recipient: Recipient) -> bool {
        if self.contains(&recipient.id) {
            return false;
        }
        self.recipients.push(recipient);
        true
    }

    /// Removes a recipient by id. Returns `false` if it was not selected.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.recipients.len();
        self.recipients.retain(|r| r.id != id);
        self.recipients.len() != before
    }

    pub fn contains(&self, id: &str) -> bool {
        self.recipients.iter().any(|r| r.id == id)
    }

    pub const fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub const fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipient> {
        self.recipients.iter()
    }

    pub fn as_slice(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Comma-separated email addresses for the header line.
    pub fn addresses(&self) -> String {
        self.recipients
            .iter()
            .map(|r| r.email.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<'a> IntoIterator for &'a RecipientSet {
    type Item = &'a Recipient;
    type IntoIter = std::slice::Iter<'a, Recipient>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Greeting that opens the body: each recipient's honorific, comma-joined.
///
/// Empty when no recipients are selected.
pub fn greeting(recipients: &[Recipient]) -> String {
    recipients
        .iter()
        .map(Recipient::honorific)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Searches the directory for recipients not yet selected.
///
/// Matching is a case-insensitive substring test over name, email, position,
/// role and department. An empty query matches everyone.
pub fn search<'a>(
    directory: &'a [Recipient],
    query: &str,
    selected: &RecipientSet,
) -> Vec<&'a Recipient> {
    let needle = query.trim().to_lowercase();
    directory
        .iter()
        .filter(|r| !selected.contains(&r.id))
        .filter(|r| r.matches(&needle))
        .collect()
}

/// Resolves `key` to one directory entry: an exact id, or a query matching exactly one person.
///
/// Otherwise returns every match, which is empty when nothing matched.
pub fn lookup<'a>(directory: &'a [Recipient], key: &str) -> Result<&'a Recipient, Vec<&'a Recipient>> {
    let key = key.trim();
    if let Some(recipient) = directory.iter().find(|r| r.id == key) {
        return Ok(recipient);
    }
    let matches = search(directory, key, &RecipientSet::default());
    if let [only] = matches.as_slice() {
        return Ok(*only);
    }
    Err(matches)
}
