//! Raw IFC (ISO 10303-21) text, kept for line-oriented scanning.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Entity, ModelAccess};

static FILE_SCHEMA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"FILE_SCHEMA\s*\(\s*\(\s*'([^']+)'").expect("FILE_SCHEMA pattern is valid")
});

/// The text of an IFC file plus the schema declared in its header.
///
/// Exposes no entities; it only serves the text-scanning strategies and the
/// schema check. Attach it to a [`super::Model`] to get both.
#[derive(Debug, Clone, Default)]
pub struct SourceDocument {
    schema: Option<String>,
    text: String,
}

impl SourceDocument {
    /// Wrap raw STEP text, reading the schema from the `FILE_SCHEMA` header.
    ///
    /// ```rust
    /// use takeoff_core::model::SourceDocument;
    ///
    /// let doc = SourceDocument::from_step_text("HEADER;\nFILE_SCHEMA(('IFC4'));\nENDSEC;\n");
    /// assert_eq!(doc.schema(), Some("IFC4"));
    /// ```
    pub fn from_step_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let schema = FILE_SCHEMA
            .captures(&text)
            .map(|caps| caps[1].trim().to_ascii_uppercase());
        SourceDocument { schema, text }
    }

    /// The declared schema identifier, if the header had one
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// The raw text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ModelAccess for SourceDocument {
    fn schema(&self) -> &str {
        self.schema.as_deref().unwrap_or("")
    }

    fn by_type(&self, _type_name: &str) -> Vec<&Entity> {
        Vec::new()
    }

    fn related(&self, _entity: &Entity, _relation: &str) -> Vec<&Entity> {
        Vec::new()
    }

    fn source_text(&self) -> Option<&str> {
        Some(&self.text)
    }
}
