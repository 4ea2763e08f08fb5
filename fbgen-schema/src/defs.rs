//! Enum, struct and field definitions as handed over by the front end.

use serde::{Deserialize, Serialize};

use crate::{Namespace, Scalar, Type};

/// Declaration attributes that influence generated code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attributes {
    /// Restrict the generated type to its package/assembly.
    pub private: bool,
    /// Enum values combine as bit flags.
    pub bit_flags: bool,
    /// Emit a `partial` C# declaration.
    pub csharp_partial: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumVal {
    pub name: String,
    pub value: i128,
    /// Payload type of a union member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub union_type: Option<Type>,
    #[serde(default)]
    pub doc: Vec<String>,
}

impl EnumVal {
    pub fn new(name: impl Into<String>, value: i128) -> Self {
        Self {
            name: name.into(),
            value,
            union_type: None,
            doc: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub doc: Vec<String>,
    pub underlying: Scalar,
    #[serde(default)]
    pub is_union: bool,
    #[serde(default)]
    pub attributes: Attributes,
    /// Values in ascending order of their constant.
    pub values: Vec<EnumVal>,
}

impl EnumDef {
    pub fn qualified_name(&self) -> String {
        self.namespace.qualify(&self.name)
    }

    pub fn min_value(&self) -> Option<&EnumVal> {
        self.values.iter().min_by_key(|v| v.value)
    }

    pub fn max_value(&self) -> Option<&EnumVal> {
        self.values.iter().max_by_key(|v| v.value)
    }

    /// `max - min`, zero for empty enums.
    pub fn distance(&self) -> u128 {
        match (self.min_value(), self.max_value()) {
            (Some(min), Some(max)) => max.value.abs_diff(min.value),
            _ => 0,
        }
    }

    pub fn find_by_value(&self, value: i128) -> Option<&EnumVal> {
        self.values.iter().find(|v| v.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: Type,
    /// Vtable slot offset for tables, inline byte offset for structs.
    pub offset: u16,
    /// Padding bytes inserted before this field in a fixed struct.
    #[serde(default)]
    pub padding: usize,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub key: bool,
    /// Default value literal as written in the schema.
    #[serde(default = "default_constant")]
    pub default: String,
    #[serde(default)]
    pub doc: Vec<String>,
    /// Root table of a nested buffer stored in this `[ubyte]` field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nested_flatbuffer: Option<String>,
}

fn default_constant() -> String {
    "0".to_string()
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: Type, offset: u16) -> Self {
        Self {
            name: name.into(),
            ty,
            offset,
            padding: 0,
            deprecated: false,
            required: false,
            key: false,
            default: default_constant(),
            doc: Vec::new(),
            nested_flatbuffer: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default = value.into();
        self
    }

    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn keyed(mut self) -> Self {
        self.key = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDef {
    pub name: String,
    #[serde(default)]
    pub namespace: Namespace,
    #[serde(default)]
    pub doc: Vec<String>,
    /// Fixed-layout struct rather than a table.
    #[serde(default)]
    pub fixed: bool,
    #[serde(default)]
    pub bytesize: usize,
    #[serde(default = "default_minalign")]
    pub minalign: usize,
    #[serde(default)]
    pub sortbysize: bool,
    #[serde(default)]
    pub attributes: Attributes,
    pub fields: Vec<FieldDef>,
}

fn default_minalign() -> usize {
    1
}

impl StructDef {
    pub fn qualified_name(&self) -> String {
        self.namespace.qualify(&self.name)
    }

    pub fn key_field(&self) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.key && !f.deprecated)
    }

    pub fn has_key(&self) -> bool {
        self.key_field().is_some()
    }

    /// The discriminant companion (`<name>_type`) of a union field.
    pub fn union_type_field(&self, field: &FieldDef) -> Option<&FieldDef> {
        let name = format!("{}_type", field.name);
        self.fields.iter().find(|f| f.name == name)
    }

    /// Fields still part of the generated API.
    pub fn live_fields(&self) -> impl Iterator<Item = &FieldDef> {
        self.fields.iter().filter(|f| !f.deprecated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumDef {
        EnumDef {
            name: "Color".into(),
            namespace: Namespace::parse("Game"),
            doc: Vec::new(),
            underlying: Scalar::Byte,
            is_union: false,
            attributes: Attributes::default(),
            values: vec![
                EnumVal::new("Red", -1),
                EnumVal::new("Green", 1),
                EnumVal::new("Blue", 8),
            ],
        }
    }

    #[test]
    fn test_enum_range() {
        let def = color();
        assert_eq!(def.min_value().unwrap().name, "Red");
        assert_eq!(def.max_value().unwrap().name, "Blue");
        assert_eq!(def.distance(), 9);
        assert_eq!(def.find_by_value(1).unwrap().name, "Green");
        assert_eq!(def.qualified_name(), "Game.Color");
    }

    #[test]
    fn test_empty_enum_distance() {
        let mut def = color();
        def.values.clear();
        assert_eq!(def.distance(), 0);
        assert!(def.min_value().is_none());
    }

    #[test]
    fn test_field_defaults_from_json() {
        let field: FieldDef = serde_json::from_str(
            r#"{"name": "hp", "type": {"kind": "scalar", "scalar": "short"}, "offset": 8}"#,
        )
        .unwrap();
        assert_eq!(field.default, "0");
        assert!(!field.deprecated);
        assert_eq!(field.padding, 0);
    }

    #[test]
    fn test_union_type_field() {
        let table = StructDef {
            name: "Monster".into(),
            namespace: Namespace::default(),
            doc: Vec::new(),
            fixed: false,
            bytesize: 0,
            minalign: 1,
            sortbysize: false,
            attributes: Attributes::default(),
            fields: vec![
                FieldDef::new("equipped_type", Type::enumeration(Scalar::UType, "Equipment"), 4),
                FieldDef::new("equipped", Type::union("Equipment"), 6),
            ],
        };
        let union_field = &table.fields[1];
        assert_eq!(
            table.union_type_field(union_field).map(|f| f.name.as_str()),
            Some("equipped_type")
        );
        assert!(!table.has_key());
    }
}
