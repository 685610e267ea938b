use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TemplateKind;

/// Per-template closing sentences, seeded with built-in defaults.
///
/// Only overrides are stored; lookups fall back to
/// [`TemplateKind::default_closing_remark`], so every template always resolves
/// to a non-empty sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClosingRemarkTable {
    overrides: BTreeMap<TemplateKind, String>,
}

impl ClosingRemarkTable {
    pub fn get(&self, kind: TemplateKind) -> &str {
        self.overrides
            .get(&kind)
            .map_or_else(|| kind.default_closing_remark(), String::as_str)
    }

    /// Overrides the closing remark. A blank remark restores the default.
    pub fn set(&mut self, kind: TemplateKind, remark: &str) {
        let remark = remark.trim();
        if remark.is_empty() {
            self.overrides.remove(&kind);
        } else {
            self.overrides.insert(kind, remark.to_string());
        }
    }

    pub fn reset(&mut self, kind: TemplateKind) {
        self.overrides.remove(&kind);
    }

    pub fn is_customized(&self, kind: TemplateKind) -> bool {
        self.overrides.contains_key(&kind)
    }

    /// Parses a persisted table, dropping unknown template ids and blank entries.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let raw: BTreeMap<String, String> = serde_json::from_str(json)?;
        let mut table = Self::default();
        for (id, remark) in raw {
            match TemplateKind::from_id(&id) {
                Some(kind) => table.set(kind, &remark),
                None => tracing::warn!(template = %id, "Ignoring closing remark for unknown template"),
            }
        }
        Ok(table)
    }
}
