use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    EnumDef, Namespace, StructDef, Type,
    error::{Error, ReferenceKind, Result, SourceContext},
};

/// The on-disk shape of a resolved schema.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SchemaFile {
    file_name: String,
    current_namespace: Namespace,
    root_type: Option<String>,
    file_identifier: Option<String>,
    file_extension: Option<String>,
    included_files: Vec<String>,
    root_file: Option<String>,
    buffer: Option<Vec<u8>>,
    enums: Vec<EnumDef>,
    structs: Vec<StructDef>,
}

/// A fully resolved schema: every reference names an existing definition.
///
/// Definitions are keyed by qualified name and keep declaration order.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    pub file_name: String,
    pub current_namespace: Namespace,
    pub root_type: Option<String>,
    pub file_identifier: Option<String>,
    pub file_extension: Option<String>,
    pub included_files: Vec<String>,
    pub root_file: Option<String>,
    pub buffer: Option<Vec<u8>>,
    enums: IndexMap<String, EnumDef>,
    structs: IndexMap<String, StructDef>,
}

impl Schema {
    /// Read and resolve a schema file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path).map_err(|source| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source,
            })
        })?;
        Self::from_json(&src, path.display().to_string())
    }

    /// Parse and resolve a schema document.
    pub fn from_json(src: &str, filename: impl Into<String>) -> Result<Self> {
        let ctx = SourceContext::new(src, filename);
        let file: SchemaFile = serde_json::from_str(src).map_err(|e| ctx.parse_error(e))?;
        let schema = Self::index(file, &ctx)?;
        schema.resolve(&ctx)?;
        tracing::debug!(
            file = ctx.filename(),
            enums = schema.enums.len(),
            structs = schema.structs.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    fn index(file: SchemaFile, ctx: &SourceContext) -> Result<Self> {
        let mut enums = IndexMap::with_capacity(file.enums.len());
        for def in file.enums {
            let name = def.qualified_name();
            if enums.insert(name.clone(), def).is_some() {
                return Err(ctx.duplicate(name));
            }
        }
        let mut structs = IndexMap::with_capacity(file.structs.len());
        for def in file.structs {
            let name = def.qualified_name();
            if structs.contains_key(&name) || enums.contains_key(&name) {
                return Err(ctx.duplicate(name));
            }
            structs.insert(name, def);
        }
        Ok(Self {
            file_name: file.file_name,
            current_namespace: file.current_namespace,
            root_type: file.root_type,
            file_identifier: file.file_identifier,
            file_extension: file.file_extension,
            included_files: file.included_files,
            root_file: file.root_file,
            buffer: file.buffer,
            enums,
            structs,
        })
    }

    /// Check that every reference points at a definition of the right kind.
    fn resolve(&self, ctx: &SourceContext) -> Result<()> {
        if let Some(root) = &self.root_type {
            self.expect_struct(ctx, root, "root_type")?;
        }
        for def in self.enums.values() {
            for val in &def.values {
                if let Some(ty) = &val.union_type {
                    let owner = format!("{}.{}", def.qualified_name(), val.name);
                    self.resolve_type(ctx, ty, &owner)?;
                }
            }
        }
        for def in self.structs.values() {
            for field in &def.fields {
                let owner = format!("{}.{}", def.qualified_name(), field.name);
                self.resolve_type(ctx, &field.ty, &owner)?;
                if let Some(nested) = &field.nested_flatbuffer {
                    self.expect_struct(ctx, nested, &owner)?;
                }
            }
        }
        Ok(())
    }

    fn resolve_type(&self, ctx: &SourceContext, ty: &Type, owner: &str) -> Result<()> {
        match ty {
            Type::Scalar {
                enum_ref: Some(name),
                ..
            }
            | Type::Union { name } => self.expect_enum(ctx, name, owner),
            Type::Struct { name } => self.expect_struct(ctx, name, owner),
            Type::Vector { element } | Type::Array { element, .. } => {
                self.resolve_type(ctx, element, owner)
            }
            Type::Scalar { enum_ref: None, .. } | Type::String => Ok(()),
        }
    }

    fn expect_struct(&self, ctx: &SourceContext, name: &str, owner: &str) -> Result<()> {
        if self.structs.contains_key(name) {
            Ok(())
        } else {
            Err(ctx.unresolved(ReferenceKind::Struct, name, owner))
        }
    }

    fn expect_enum(&self, ctx: &SourceContext, name: &str, owner: &str) -> Result<()> {
        if self.enums.contains_key(name) {
            Ok(())
        } else {
            Err(ctx.unresolved(ReferenceKind::Enum, name, owner))
        }
    }

    pub fn add_enum(&mut self, def: EnumDef) {
        self.enums.insert(def.qualified_name(), def);
    }

    pub fn add_struct(&mut self, def: StructDef) {
        self.structs.insert(def.qualified_name(), def);
    }

    /// Enums in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDef> {
        self.enums.values()
    }

    /// Structs and tables in declaration order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        self.structs.values()
    }

    pub fn enum_def(&self, name: &str) -> Result<&EnumDef> {
        self.enums.get(name).ok_or_else(|| {
            Box::new(Error::UnknownEnum {
                name: name.to_string(),
            })
        })
    }

    pub fn struct_def(&self, name: &str) -> Result<&StructDef> {
        self.structs.get(name).ok_or_else(|| {
            Box::new(Error::UnknownStruct {
                name: name.to_string(),
            })
        })
    }

    /// Whether `def` is the buffer's root table.
    pub fn is_root(&self, def: &StructDef) -> bool {
        self.root_type
            .as_deref()
            .is_some_and(|root| root == def.qualified_name())
    }

    /// Whether `ty` references a fixed struct.
    pub fn is_fixed_struct(&self, ty: &Type) -> Result<bool> {
        match ty {
            Type::Struct { name } => Ok(self.struct_def(name)?.fixed),
            _ => Ok(false),
        }
    }

    /// Bytes `ty` occupies inline in its container.
    pub fn inline_size(&self, ty: &Type) -> Result<usize> {
        match ty {
            Type::Struct { name } => {
                let def = self.struct_def(name)?;
                Ok(if def.fixed { def.bytesize } else { 4 })
            }
            Type::Array { element, length } => {
                Ok(self.inline_size(element)? * usize::from(*length))
            }
            other => Ok(other.size_class()),
        }
    }

    /// Alignment of `ty` when stored inline.
    pub fn inline_alignment(&self, ty: &Type) -> Result<usize> {
        match ty {
            Type::Struct { name } => {
                let def = self.struct_def(name)?;
                Ok(if def.fixed { def.minalign } else { 4 })
            }
            Type::Array { element, .. } => self.inline_alignment(element),
            other => Ok(other.size_class()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Scalar;

    const SCHEMA: &str = r#"{
        "file_name": "monster",
        "current_namespace": ["Game"],
        "root_type": "Game.Monster",
        "file_identifier": "MONS",
        "enums": [
            {"name": "Color", "namespace": ["Game"], "underlying": "byte",
             "values": [{"name": "Red", "value": 0}, {"name": "Blue", "value": 2}]}
        ],
        "structs": [
            {"name": "Vec3", "namespace": ["Game"], "fixed": true, "bytesize": 12, "minalign": 4,
             "fields": [
                {"name": "x", "type": {"kind": "scalar", "scalar": "float"}, "offset": 0},
                {"name": "y", "type": {"kind": "scalar", "scalar": "float"}, "offset": 4},
                {"name": "z", "type": {"kind": "scalar", "scalar": "float"}, "offset": 8}
             ]},
            {"name": "Monster", "namespace": ["Game"],
             "fields": [
                {"name": "pos", "type": {"kind": "struct", "name": "Game.Vec3"}, "offset": 4},
                {"name": "color", "type": {"kind": "scalar", "scalar": "byte", "enum": "Game.Color"}, "offset": 6, "default": "2"}
             ]}
        ]
    }"#;

    #[test]
    fn test_load_indexes_in_declaration_order() {
        let schema = Schema::from_json(SCHEMA, "monster.json").unwrap();
        let names: Vec<_> = schema.structs().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["Vec3", "Monster"]);
        assert_eq!(schema.enum_def("Game.Color").unwrap().values.len(), 2);
        assert!(schema.is_root(schema.struct_def("Game.Monster").unwrap()));
        assert!(!schema.is_root(schema.struct_def("Game.Vec3").unwrap()));
    }

    #[test]
    fn test_inline_layout() {
        let schema = Schema::from_json(SCHEMA, "monster.json").unwrap();
        let vec3 = Type::structure("Game.Vec3");
        assert_eq!(schema.inline_size(&vec3).unwrap(), 12);
        assert_eq!(schema.inline_alignment(&vec3).unwrap(), 4);
        assert_eq!(
            schema.inline_size(&Type::array(vec3.clone(), 2)).unwrap(),
            24
        );
        assert_eq!(schema.inline_size(&Type::structure("Game.Monster")).unwrap(), 4);
        assert_eq!(schema.inline_size(&Type::scalar(Scalar::Short)).unwrap(), 2);
        assert!(schema.is_fixed_struct(&vec3).unwrap());
    }

    #[test]
    fn test_dangling_reference_is_reported() {
        let src = SCHEMA.replace(r#""name": "Game.Vec3""#, r#""name": "Game.Vec4""#);
        let err = Schema::from_json(&src, "monster.json").unwrap_err();
        match *err {
            Error::Unresolved { name, referenced_by, .. } => {
                assert_eq!(name, "Game.Vec4");
                assert_eq!(referenced_by, "Game.Monster.pos");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_definition_is_reported() {
        let src = r#"{"structs": [
            {"name": "A", "fields": []},
            {"name": "A", "fields": []}
        ]}"#;
        let err = Schema::from_json(src, "dup.json").unwrap_err();
        assert!(matches!(*err, Error::Duplicate { ref name, .. } if name == "A"));
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Schema::from_json("{\"structs\": [}", "bad.json").unwrap_err();
        match *err {
            Error::Parse { span, .. } => assert!(span.is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_open_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("schema.json");
        fs::write(&path, SCHEMA).unwrap();

        let schema = Schema::open(&path).unwrap();
        assert_eq!(schema.file_name, "monster");
        assert_eq!(schema.file_identifier.as_deref(), Some("MONS"));

        let missing = Schema::open(temp.path().join("missing.json")).unwrap_err();
        assert!(matches!(*missing, Error::Io { .. }));
    }
}
