//! # Model Access
//!
//! The extraction code never parses IFC itself. It talks to a model reader
//! through [`ModelAccess`]: list entities of a type, read an attribute,
//! follow a relation, and (for the force/moment scan) get the raw text.
//!
//! [`Model`] is the in-memory implementation used by the CLI and tests. It
//! is built from a JSON snapshot written by any IFC reader:
//!
//! ```json
//! {
//!   "schema": "IFC4",
//!   "entities": [
//!     {"id": 10, "type": "IfcBeam", "attributes": {"GlobalId": "1x"},
//!      "relations": {"IsDefinedBy": [11]}},
//!     {"id": 11, "type": "IfcRelDefinesByProperties",
//!      "relations": {"RelatingPropertyDefinition": [12]}}
//!   ]
//! }
//! ```

pub mod entity;
pub mod source;

pub use entity::{AttributeValue, Entity};
pub use source::SourceDocument;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::errors::TakeoffResult;

/// Read access to a BIM model.
pub trait ModelAccess {
    /// Declared schema identifier (`IFC4`, `IFC2X3`, ...)
    fn schema(&self) -> &str;

    /// All entities of a type, in model order
    fn by_type(&self, type_name: &str) -> Vec<&Entity>;

    /// A named attribute of an entity
    fn attribute<'a>(&self, entity: &'a Entity, name: &str) -> Option<&'a AttributeValue> {
        entity.attributes.get(name)
    }

    /// Entities reached from `entity` through a named relation
    fn related(&self, entity: &Entity, relation: &str) -> Vec<&Entity>;

    /// Raw document text, when the reader kept it
    fn source_text(&self) -> Option<&str>;
}

/// Serialized form of a [`Model`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSnapshot {
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

/// In-memory model with an id index and optional raw source text.
#[derive(Debug, Clone, Default)]
pub struct Model {
    schema: String,
    entities: Vec<Entity>,
    index: HashMap<u64, usize>,
    source: Option<SourceDocument>,
}

impl Model {
    /// Build a model from entities
    pub fn new(schema: impl Into<String>, entities: Vec<Entity>) -> Self {
        let index = entities
            .iter()
            .enumerate()
            .map(|(position, entity)| (entity.id, position))
            .collect();
        Model {
            schema: schema.into(),
            entities,
            index,
            source: None,
        }
    }

    /// Parse a JSON snapshot
    pub fn from_json(json: &str) -> TakeoffResult<Self> {
        let snapshot: ModelSnapshot = serde_json::from_str(json)?;
        Ok(Model::from(snapshot))
    }

    /// Attach raw IFC text. If the snapshot declared no schema, the
    /// header schema of the text is used instead.
    pub fn with_source(mut self, source: SourceDocument) -> Self {
        if self.schema.trim().is_empty() {
            if let Some(schema) = source.schema() {
                self.schema = schema.to_string();
            }
        }
        self.source = Some(source);
        self
    }

    /// Entity by step id
    pub fn get(&self, id: u64) -> Option<&Entity> {
        self.index.get(&id).map(|&position| &self.entities[position])
    }

    /// Number of entities
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the model holds no entities
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Convert back to the serialized form (drops the raw source)
    pub fn to_snapshot(&self) -> ModelSnapshot {
        ModelSnapshot {
            schema: self.schema.clone(),
            entities: self.entities.clone(),
        }
    }
}

impl From<ModelSnapshot> for Model {
    fn from(snapshot: ModelSnapshot) -> Self {
        Model::new(snapshot.schema, snapshot.entities)
    }
}

impl ModelAccess for Model {
    fn schema(&self) -> &str {
        &self.schema
    }

    fn by_type(&self, type_name: &str) -> Vec<&Entity> {
        self.entities.iter().filter(|entity| entity.is_a(type_name)).collect()
    }

    fn related(&self, entity: &Entity, relation: &str) -> Vec<&Entity> {
        entity
            .relations
            .get(relation)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| {
                        let target = self.get(*id);
                        if target.is_none() {
                            tracing::warn!(from = entity.id, to = *id, relation, "dangling relation");
                        }
                        target
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn source_text(&self) -> Option<&str> {
        self.source.as_ref().map(SourceDocument::text)
    }
}
