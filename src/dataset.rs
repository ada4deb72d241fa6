//! Labeled dataset model.
//!
//! A [`Dataset`] is a table of [`Entity`] rows over a fixed schema of
//! [`Attribute`]s. Every entity carries a stable [`EntityId`] used to match
//! rows across independently labeled datasets (see [`crate::metrics::rand_index`]).
//!
//! Attributes are either *regular* (read by distance measures) or *special*
//! (they carry a role such as `cluster` or `Silhouette` and are skipped by
//! distance measures, but still summarized by the typical-value calculator).
//!
//! ```rust
//! use cluster_validity::dataset::{Attribute, Dataset, Value};
//!
//! let dataset = Dataset::from_rows(
//!     vec![
//!         Attribute::numeric("x"),
//!         Attribute::nominal("cluster").with_role("cluster"),
//!     ],
//!     vec![
//!         ("a".into(), vec![Value::from(0.0), Value::from("c1")]),
//!         ("b".into(), vec![Value::from(1.0), Value::from("c2")]),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(dataset.len(), 2);
//! assert!(dataset.attribute("cluster").is_ok());
//! ```

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// Rendering of a missing value when read as a nominal string.
pub const MISSING_VALUE: &str = "?";

static MISSING: Value = Value::Missing;

/// Kind of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AttributeKind {
    /// Categorical values; supports equality only.
    Nominal,
    /// Real values; supports ordering and subtraction.
    Numeric,
}

/// Attribute descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    name: String,
    kind: AttributeKind,
    role: Option<String>,
}

impl Attribute {
    /// Create a regular nominal attribute.
    pub fn nominal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Nominal,
            role: None,
        }
    }

    /// Create a regular numeric attribute.
    pub fn numeric(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: AttributeKind::Numeric,
            role: None,
        }
    }

    /// Mark the attribute as special with the given role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Attribute name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Attribute kind.
    pub fn kind(&self) -> AttributeKind {
        self.kind
    }

    /// Role of a special attribute, `None` for regular attributes.
    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Whether the attribute carries a role.
    pub fn is_special(&self) -> bool {
        self.role.is_some()
    }

    fn accepts(&self, value: &Value) -> bool {
        matches!(
            (self.kind, value),
            (_, Value::Missing)
                | (AttributeKind::Nominal, Value::Nominal(_))
                | (AttributeKind::Numeric, Value::Numeric(_))
        )
    }
}

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Nominal value.
    Nominal(String),
    /// Numeric value.
    Numeric(f64),
    /// Unknown value.
    Missing,
}

impl Value {
    /// Numeric reading of the value. Anything that is not numeric reads as NaN.
    pub fn as_numeric(&self) -> f64 {
        match self {
            Value::Numeric(v) => *v,
            _ => f64::NAN,
        }
    }

    /// Nominal reading of the value.
    pub fn as_nominal(&self) -> Cow<'_, str> {
        match self {
            Value::Nominal(s) => Cow::Borrowed(s.as_str()),
            Value::Numeric(v) => Cow::Owned(format_numeric(*v)),
            Value::Missing => Cow::Borrowed(MISSING_VALUE),
        }
    }

    /// Whether the value is unknown.
    pub fn is_missing(&self) -> bool {
        match self {
            Value::Missing => true,
            Value::Numeric(v) => v.is_nan(),
            Value::Nominal(_) => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_nominal())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Nominal(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Nominal(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Numeric(value)
    }
}

fn format_numeric(v: f64) -> String {
    if v.is_nan() {
        MISSING_VALUE.to_string()
    } else {
        v.to_string()
    }
}

/// Stable identity of an entity, comparable across datasets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(String);

impl EntityId {
    /// Create an identity from any string-like key.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EntityId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

/// One data row.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entity {
    id: EntityId,
    values: Vec<Value>,
}

impl Entity {
    /// Identity of the entity.
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    /// Values aligned with the dataset schema.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Value of the attribute at `index`. Out-of-schema indices read as missing.
    pub fn value(&self, index: usize) -> &Value {
        self.values.get(index).unwrap_or(&MISSING)
    }
}

/// A labeled dataset: schema plus entities, indexed by identity.
///
/// Deserialization replays every row through [`DatasetBuilder`], so the
/// identity index is rebuilt and malformed rows are rejected.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawDataset"))]
pub struct Dataset {
    attributes: Vec<Attribute>,
    entities: Vec<Entity>,
    #[cfg_attr(feature = "serde", serde(skip))]
    positions: HashMap<EntityId, usize>,
}

impl Dataset {
    /// Start building a dataset over the given schema.
    pub fn builder(attributes: Vec<Attribute>) -> Result<DatasetBuilder> {
        DatasetBuilder::new(attributes)
    }

    /// Build a dataset from `(id, values)` rows.
    pub fn from_rows(
        attributes: Vec<Attribute>,
        rows: impl IntoIterator<Item = (EntityId, Vec<Value>)>,
    ) -> Result<Self> {
        let mut builder = DatasetBuilder::new(attributes)?;
        for (id, values) in rows {
            builder.push(id, values)?;
        }
        Ok(builder.build())
    }

    /// Schema of the dataset.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Resolve an attribute by name, returning its schema index.
    pub fn attribute(&self, name: &str) -> Result<(usize, &Attribute)> {
        self.attributes
            .iter()
            .enumerate()
            .find(|(_, attribute)| attribute.name == name)
            .ok_or_else(|| Error::missing_attribute(name))
    }

    /// Attributes without a role, with their schema indices.
    pub fn regular_attributes(&self) -> impl Iterator<Item = (usize, &Attribute)> + '_ {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, attribute)| !attribute.is_special())
    }

    /// Entities in insertion order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Iterate entities in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Entity> {
        self.entities.iter()
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the dataset has no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity at `position`.
    pub fn entity(&self, position: usize) -> Option<&Entity> {
        self.entities.get(position)
    }

    /// Look an entity up by identity.
    pub fn entity_by_id(&self, id: &EntityId) -> Option<&Entity> {
        self.position_of(id).map(|position| &self.entities[position])
    }

    /// Position of the entity with the given identity.
    pub fn position_of(&self, id: &EntityId) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Append a new attribute and assign one value per entity, in entity order.
    ///
    /// Returns the schema index of the new attribute.
    pub fn add_attribute(&mut self, attribute: Attribute, values: Vec<Value>) -> Result<usize> {
        if self.attribute(attribute.name()).is_ok() {
            return Err(Error::invalid_dataset(format!(
                "attribute '{}' already exists",
                attribute.name()
            )));
        }
        if values.len() != self.entities.len() {
            return Err(Error::invalid_dataset(format!(
                "attribute '{}' has {} values for {} entities",
                attribute.name(),
                values.len(),
                self.entities.len()
            )));
        }
        if let Some(value) = values.iter().find(|value| !attribute.accepts(value)) {
            return Err(Error::invalid_dataset(format!(
                "value '{}' does not fit {:?} attribute '{}'",
                value,
                attribute.kind(),
                attribute.name()
            )));
        }

        for (entity, value) in self.entities.iter_mut().zip(values) {
            entity.values.push(value);
        }
        self.attributes.push(attribute);
        Ok(self.attributes.len() - 1)
    }
}

impl PartialEq for Dataset {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes && self.entities == other.entities
    }
}

/// Serialized form of a [`Dataset`], validated on conversion.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawDataset {
    attributes: Vec<Attribute>,
    entities: Vec<Entity>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawDataset> for Dataset {
    type Error = Error;

    fn try_from(raw: RawDataset) -> Result<Self> {
        let mut builder = DatasetBuilder::new(raw.attributes)?;
        for entity in raw.entities {
            builder.push(entity.id, entity.values)?;
        }
        Ok(builder.build())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Entity;
    type IntoIter = std::slice::Iter<'a, Entity>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}

/// Row-by-row dataset construction with schema validation.
#[derive(Debug, Clone)]
pub struct DatasetBuilder {
    dataset: Dataset,
}

impl DatasetBuilder {
    /// Create a builder; attribute names must be unique.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self> {
        for (i, attribute) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|a| a.name == attribute.name) {
                return Err(Error::invalid_dataset(format!(
                    "duplicate attribute '{}'",
                    attribute.name
                )));
            }
        }
        Ok(Self {
            dataset: Dataset {
                attributes,
                entities: Vec::new(),
                positions: HashMap::new(),
            },
        })
    }

    /// Append one entity.
    pub fn push(&mut self, id: impl Into<EntityId>, values: Vec<Value>) -> Result<&mut Self> {
        let id = id.into();
        let schema = &self.dataset.attributes;
        if values.len() != schema.len() {
            return Err(Error::invalid_dataset(format!(
                "entity '{id}' has {} values, schema has {} attributes",
                values.len(),
                schema.len()
            )));
        }
        if let Some((attribute, value)) = schema
            .iter()
            .zip(&values)
            .find(|(attribute, value)| !attribute.accepts(value))
        {
            return Err(Error::invalid_dataset(format!(
                "entity '{id}': value '{value}' does not fit {:?} attribute '{}'",
                attribute.kind, attribute.name
            )));
        }
        if self.dataset.positions.contains_key(&id) {
            return Err(Error::invalid_dataset(format!("duplicate entity id '{id}'")));
        }

        let _ = self
            .dataset
            .positions
            .insert(id.clone(), self.dataset.entities.len());
        self.dataset.entities.push(Entity { id, values });
        Ok(self)
    }

    /// Finish building.
    pub fn build(self) -> Dataset {
        self.dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Vec<Attribute> {
        vec![
            Attribute::numeric("x"),
            Attribute::nominal("color"),
            Attribute::nominal("cluster").with_role("cluster"),
        ]
    }

    #[test]
    fn test_builder_and_lookup() -> Result<()> {
        let mut builder = Dataset::builder(schema())?;
        builder
            .push("a", vec![1.0.into(), "red".into(), "c1".into()])?
            .push("b", vec![Value::Missing, "blue".into(), "c2".into()])?;
        let dataset = builder.build();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.attribute("color")?.0, 1);
        assert_eq!(dataset.position_of(&"b".into()), Some(1));
        assert_eq!(
            dataset.entity_by_id(&"a".into()).map(|e| e.value(0)),
            Some(&Value::Numeric(1.0))
        );
        assert!(dataset.entity_by_id(&"zz".into()).is_none());
        Ok(())
    }

    #[test]
    fn test_regular_attributes_skip_special() -> Result<()> {
        let dataset = Dataset::builder(schema())?.build();
        let names: Vec<&str> = dataset
            .regular_attributes()
            .map(|(_, a)| a.name())
            .collect();
        assert_eq!(names, vec!["x", "color"]);
        Ok(())
    }

    #[test]
    fn test_missing_attribute() {
        let dataset = Dataset::default();
        assert_eq!(
            dataset.attribute("cluster").unwrap_err(),
            Error::missing_attribute("cluster")
        );
    }

    #[test]
    fn test_builder_rejects_bad_rows() -> Result<()> {
        let mut builder = Dataset::builder(schema())?;
        assert!(builder.push("a", vec![1.0.into()]).is_err());
        assert!(builder
            .push("a", vec!["one".into(), "red".into(), "c1".into()])
            .is_err());
        builder.push("a", vec![1.0.into(), "red".into(), "c1".into()])?;
        assert!(builder
            .push("a", vec![2.0.into(), "red".into(), "c1".into()])
            .is_err());

        assert!(Dataset::builder(vec![Attribute::numeric("x"), Attribute::nominal("x")]).is_err());
        Ok(())
    }

    #[test]
    fn test_value_rendering() {
        assert_eq!(Value::from(2.0).to_string(), "2");
        assert_eq!(Value::from(2.5).to_string(), "2.5");
        assert_eq!(Value::Numeric(f64::NAN).to_string(), MISSING_VALUE);
        assert_eq!(Value::Missing.to_string(), MISSING_VALUE);
        assert_eq!(Value::from("c1").as_nominal(), "c1");
        assert!(Value::Missing.as_numeric().is_nan());
    }

    #[test]
    fn test_add_attribute() -> Result<()> {
        let mut dataset = Dataset::from_rows(
            vec![Attribute::numeric("x")],
            vec![("a".into(), vec![1.0.into()]), ("b".into(), vec![2.0.into()])],
        )?;

        let index = dataset.add_attribute(
            Attribute::numeric("score").with_role("Silhouette"),
            vec![0.5.into(), Value::Missing],
        )?;
        assert_eq!(index, 1);
        assert_eq!(dataset.entities()[0].value(1), &Value::Numeric(0.5));
        assert!(dataset.entities()[1].value(1).is_missing());

        // Same name again, wrong arity, wrong kind.
        assert!(dataset
            .add_attribute(Attribute::numeric("score"), vec![0.0.into(), 0.0.into()])
            .is_err());
        assert!(dataset
            .add_attribute(Attribute::numeric("other"), vec![0.0.into()])
            .is_err());
        assert!(dataset
            .add_attribute(Attribute::numeric("other"), vec!["a".into(), "b".into()])
            .is_err());
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip_rebuilds_index() -> Result<()> {
        let mut builder = Dataset::builder(schema())?;
        builder
            .push("a", vec![1.0.into(), "red".into(), "c1".into()])?
            .push("b", vec![Value::Missing, "blue".into(), "c2".into()])?;
        let dataset = builder.build();

        let json = serde_json::to_string(&dataset).unwrap();
        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dataset);
        assert_eq!(back.position_of(&"b".into()), Some(1));
        assert_eq!(back.entity_by_id(&"a".into()), Some(&dataset.entities()[0]));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_validates_rows() {
        let schema = r#"[{"name":"x","kind":"Numeric","role":null}]"#;
        let parse = |entities: &str| {
            serde_json::from_str::<Dataset>(&format!(
                r#"{{"attributes":{schema},"entities":{entities}}}"#
            ))
        };

        assert!(parse(r#"[{"id":"a","values":[{"Numeric":1.0}]}]"#).is_ok());
        // Duplicate id, wrong arity, wrong kind.
        let duplicate = parse(
            r#"[{"id":"a","values":[{"Numeric":1.0}]},{"id":"a","values":[{"Numeric":2.0}]}]"#,
        );
        assert!(duplicate.unwrap_err().to_string().contains("duplicate entity id"));
        assert!(parse(r#"[{"id":"a","values":[]}]"#).is_err());
        assert!(parse(r#"[{"id":"a","values":[{"Nominal":"one"}]}]"#).is_err());
    }
}
