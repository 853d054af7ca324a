use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{MemeError, MemeResult};

/// A static template entry: base artwork plus the metadata the caption source chooses from.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Template {
    /// Stable identifier the caption source answers with.
    pub id: String,
    /// Human-readable name; doubles as a layout hint for the caption source.
    pub name: String,
    /// Reference to the source artwork.
    pub url: String,
}

impl Template {
    /// Build a template entry.
    pub fn new(id: impl Into<String>, name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Ordered, immutable template catalog. Never empty.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    /// Build a catalog, rejecting empty lists, blank ids and duplicate ids.
    pub fn new(templates: Vec<Template>) -> MemeResult<Self> {
        if templates.is_empty() {
            return Err(MemeError::validation(
                "template catalog must contain at least one template",
            ));
        }
        for (i, t) in templates.iter().enumerate() {
            if t.id.trim().is_empty() {
                return Err(MemeError::validation(format!(
                    "template #{i} has an empty id"
                )));
            }
            if templates[..i].iter().any(|prev| prev.id == t.id) {
                return Err(MemeError::validation(format!(
                    "duplicate template id '{}'",
                    t.id
                )));
            }
        }
        Ok(Self { templates })
    }

    /// The catalog shipped with memepulse.
    pub fn builtin() -> Self {
        let templates = [
            ("distracted-boyfriend", "Distracted Boyfriend", "https://i.imgflip.com/1ur9b0.jpg"),
            ("drake-hotline-bling", "Drake Hotline Bling", "https://i.imgflip.com/30b1gx.jpg"),
            ("two-buttons", "Two Buttons", "https://i.imgflip.com/1g8my4.jpg"),
            ("woman-yelling-at-cat", "Woman Yelling at a Cat", "https://i.imgflip.com/3l60ph.jpg"),
            ("this-is-fine", "This Is Fine", "https://i.imgflip.com/1otk95.jpg"),
            ("expanding-brain", "Expanding Brain", "https://i.imgflip.com/1jwhww.jpg"),
            ("success-kid", "Success Kid", "https://i.imgflip.com/1b42wl.jpg"),
        ]
        .into_iter()
        .map(|(id, name, url)| Template::new(id, name, url))
        .collect();
        Self { templates }
    }

    /// Parse a catalog from a JSON array of `{id, name, url}` objects.
    pub fn from_json(json: &str) -> MemeResult<Self> {
        let templates: Vec<Template> = serde_json::from_str(json)
            .map_err(|e| MemeError::validation(format!("parse template catalog: {e}")))?;
        Self::new(templates)
    }

    /// Read a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> MemeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read template catalog '{}'", path.display()))?;
        Self::from_json(&json)
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Look up a template, substituting the first catalog entry for unknown ids.
    ///
    /// The boolean is `true` when the fallback was taken.
    pub fn resolve_or_fallback(&self, id: &str) -> (&Template, bool) {
        match self.get(id) {
            Some(t) => (t, false),
            None => (&self.templates[0], true),
        }
    }

    /// Templates in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/catalog.rs"]
mod tests;
