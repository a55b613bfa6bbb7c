//! Typed entities and attribute values as exposed by a model reader.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute value of a model entity.
///
/// Deserialized untagged, so a snapshot writes plain JSON values:
/// `"Name": "Gross Weight"`, `"WeightValue": 812.5`,
/// `"Coordinates": [120.0, 0.0, 96.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Numeric value, if this is a number
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Number(value) => Some(*value),
            _ => None,
        }
    }

    /// Text value, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// List elements, if this is a list
    pub fn as_list(&self) -> Option<&[AttributeValue]> {
        match self {
            AttributeValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Every element as a number; `None` if this is not a list of numbers
    pub fn as_f64_list(&self) -> Option<Vec<f64>> {
        self.as_list()?.iter().map(AttributeValue::as_f64).collect()
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<Vec<f64>> for AttributeValue {
    fn from(values: Vec<f64>) -> Self {
        AttributeValue::List(values.into_iter().map(AttributeValue::Number).collect())
    }
}

/// One instance from the model, with its attributes and outgoing relations.
///
/// Relations hold the ids of related entities, keyed by the IFC attribute
/// or inverse name that links them (`IsDefinedBy`, `Quantities`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Step instance number (`#123`)
    pub id: u64,

    /// IFC type name, e.g. `IfcQuantityWeight`
    #[serde(rename = "type")]
    pub type_name: String,

    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeValue>,

    #[serde(default)]
    pub relations: BTreeMap<String, Vec<u64>>,
}

impl Entity {
    /// Create an entity with no attributes or relations
    pub fn new(id: u64, type_name: impl Into<String>) -> Self {
        Entity {
            id,
            type_name: type_name.into(),
            attributes: BTreeMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Add an attribute (builder pattern)
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Add related entity ids under a relation name (builder pattern)
    pub fn with_relation(mut self, relation: impl Into<String>, targets: impl IntoIterator<Item = u64>) -> Self {
        self.relations.entry(relation.into()).or_default().extend(targets);
        self
    }

    /// IFC type names are case-insensitive (`IFCBEAM` == `IfcBeam`)
    pub fn is_a(&self, type_name: &str) -> bool {
        self.type_name.eq_ignore_ascii_case(type_name)
    }

    /// The `Name` attribute, if present and textual
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("Name").and_then(AttributeValue::as_str)
    }

    /// A numeric attribute
    pub fn number(&self, attribute: &str) -> Option<f64> {
        self.attributes.get(attribute).and_then(AttributeValue::as_f64)
    }

    /// A textual attribute
    pub fn text(&self, attribute: &str) -> Option<&str> {
        self.attributes.get(attribute).and_then(AttributeValue::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_attribute_values() {
        let json = r#"{
            "id": 12,
            "type": "IFCQUANTITYWEIGHT",
            "attributes": {"Name": "Gross Weight", "WeightValue": 410.5, "Coordinates": [1.0, 2.0, 3.0]}
        }"#;
        let entity: Entity = serde_json::from_str(json).unwrap();

        assert!(entity.is_a("IfcQuantityWeight"));
        assert_eq!(entity.name(), Some("Gross Weight"));
        assert_eq!(entity.number("WeightValue"), Some(410.5));
        assert_eq!(
            entity.attributes["Coordinates"].as_f64_list(),
            Some(vec![1.0, 2.0, 3.0])
        );
        assert!(entity.relations.is_empty());
    }

    #[test]
    fn test_mixed_list_is_not_numeric() {
        let value = AttributeValue::List(vec![AttributeValue::Number(1.0), AttributeValue::from("x")]);
        assert_eq!(value.as_f64_list(), None);
    }

    #[test]
    fn test_builder() {
        let entity = Entity::new(1, "IfcBeam")
            .with_attribute("GlobalId", "0abc")
            .with_relation("IsDefinedBy", [2, 3]);
        assert_eq!(entity.text("GlobalId"), Some("0abc"));
        assert_eq!(entity.relations["IsDefinedBy"], vec![2, 3]);
    }
}
