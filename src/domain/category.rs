//! Domain types representing ledger categories.

use serde::{Deserialize, Serialize};

use crate::domain::common::*;

/// Display color used when a category reference cannot be resolved.
pub const FALLBACK_CATEGORY_COLOR: &str = "#6b7280";
/// Display name used when a category reference cannot be resolved.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown";

/// Named, typed and colored classification for transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default = "Category::fallback_color")]
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl Category {
    pub fn fallback_color() -> String {
        FALLBACK_CATEGORY_COLOR.into()
    }

    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        kind: TransactionKind,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            color: color.into(),
            icon: None,
        }
    }

    pub fn from_draft(id: impl Into<String>, draft: CategoryDraft) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            kind: draft.kind,
            color: draft.color,
            icon: draft.icon,
        }
    }

    pub fn apply_patch(&mut self, patch: &CategoryPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(icon) = &patch.icon {
            self.icon = Some(icon.clone());
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Caller-supplied fields for a new category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryDraft {
    pub fn new(name: impl Into<String>, kind: TransactionKind, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            color: color.into(),
            icon: None,
        }
    }
}

/// Partial category used for updates and form validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl CategoryPatch {
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

impl From<&CategoryDraft> for CategoryPatch {
    fn from(draft: &CategoryDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            kind: Some(draft.kind),
            color: Some(draft.color.clone()),
            icon: draft.icon.clone(),
        }
    }
}
