//! Fixed struct and table declarations.
//!
//! One [`StructEmitter::emit`] call produces the accessor class and, for
//! C# fixed structs, its vector wrapper. Members come in a fixed order:
//!
//! 1. Runtime plumbing (version check, root accessors, `__init`, `__assign`)
//! 2. Field accessors, plus mutators when the buffer is mutable
//! 3. Builders (`create`, `start`, `add`, vector helpers, `end`, `finish`)
//! 4. Key lookup for keyed tables
//! 5. Deep clone where the backend has it

mod accessors;
mod builders;
mod clone;
mod lookup;
mod path;
mod plan;

pub use path::FieldPath;
pub use plan::BuildPlan;

use fbgen_core::make_camel;
use fbgen_schema::{FieldDef, StructDef};
use tracing::debug;

use crate::{
    GenerateOptions, Result,
    builder::{
        ClassKind, ClassSpec, Declaration, Expr, FieldSpec, Member, MethodSpec, Statement,
        Visibility,
    },
};

use super::{TypeMapper, wrappers};

/// Emits the accessor class of one fixed struct or table.
pub struct StructEmitter<'a> {
    mapper: TypeMapper<'a>,
    options: &'a GenerateOptions,
}

impl<'a> StructEmitter<'a> {
    pub fn new(mapper: TypeMapper<'a>, options: &'a GenerateOptions) -> Self {
        Self { mapper, options }
    }

    pub fn emit(&self, def: &StructDef) -> Result<Vec<Declaration>> {
        let caps = self.mapper.profile().caps;
        let mut class = self.header(def);

        if !def.fixed {
            self.root_accessors(def, &mut class);
        }
        self.reuse_hooks(def, &mut class);
        class.blank();

        for field in def.live_fields() {
            let mut members = self.accessors(def, field)?;
            if self.options.mutable_buffer {
                members.extend(self.mutator(def, field)?);
            }
            attach_doc(&mut members, &field.doc);
            class.members.extend(members);
        }
        class.blank();

        if def.fixed {
            class.push(self.create_struct(def)?);
        } else {
            self.table_builders(def, &mut class)?;
            if let Some(key) = def.key_field() {
                class.blank();
                self.lookup(def, key, &mut class)?;
            }
        }
        if caps.deep_clone {
            class.blank();
            class.push(self.clone_method(def)?);
        }

        debug!(
            name = %def.qualified_name(),
            fixed = def.fixed,
            members = class.members.len(),
            "emitted struct"
        );
        let mut out = vec![Declaration::Class(class)];
        if def.fixed && caps.collection_wrappers {
            out.push(wrappers::struct_vector(def));
        }
        Ok(out)
    }

    fn header(&self, def: &StructDef) -> ClassSpec {
        let p = self.mapper.profile();
        let runtime = if def.fixed { "Struct" } else { "Table" };
        let kind = if p.caps.value_type_accessors {
            ClassKind::Struct
        } else {
            ClassKind::Class
        };
        let mut class = ClassSpec::new(kind, &def.name);
        class.doc = def.doc.clone();
        class.visibility = p.visibility(def.attributes.private);

        if p.caps.value_type_accessors {
            if def.attributes.csharp_partial {
                class.modifiers.push("partial".to_string());
            }
            class.interfaces.push(format!("IFlatbufferObject<{}>", def.name));
            class.push(FieldSpec::new(Visibility::Private, runtime, "__p"));
            class.push(MethodSpec::property("byteBuffer", "ByteBuffer").returning(Expr::runtime("bb")));
        } else {
            class.modifiers.push(p.final_keyword.to_string());
            class.base = Some(runtime.to_string());
        }
        class
    }

    /// Version check, `getRootAs` and the identifier test of the root table.
    fn root_accessors(&self, def: &StructDef, class: &mut ClassSpec) {
        let p = self.mapper.profile();
        let name = def.name.as_str();
        let root_as = format!("getRootAs{name}");
        let bb = || Expr::ident("_bb");
        let position = || Expr::member(bb(), p.bb_position);

        class.push(
            MethodSpec::new("ValidateVersion").static_().statement(Statement::expr(Expr::call(
                Expr::ident(p.constants_class),
                "FLATBUFFERS_1_11_1",
                vec![],
            ))),
        );
        class.push(
            MethodSpec::new(&root_as)
                .static_()
                .returns(name)
                .param("ByteBuffer", "_bb")
                .returning(Expr::func(&root_as, vec![bb(), Expr::new_object(name, vec![])])),
        );

        let mut with_obj = MethodSpec::new(&root_as)
            .static_()
            .returns(name)
            .param("ByteBuffer", "_bb")
            .param(name, "obj");
        if let Some(preamble) = p.byte_order_preamble {
            with_obj = with_obj.statement(Statement::expr(Expr::ident(preamble)));
        }
        let root = Expr::add(Expr::call(bb(), "getInt", vec![position()]), position());
        class.push(with_obj.returning(Expr::call(
            Expr::ident("obj"),
            "__assign",
            vec![root, bb()],
        )));

        if self.mapper.schema().is_root(def)
            && let Some(identifier) = &self.mapper.schema().file_identifier
        {
            class.push(
                MethodSpec::new(format!("{name}BufferHasIdentifier"))
                    .static_()
                    .returns(p.bool_type)
                    .param("ByteBuffer", "_bb")
                    .returning(Expr::static_helper(
                        "__has_identifier",
                        vec![bb(), Expr::str(identifier)],
                    )),
            );
        }
    }

    /// `__init` and `__assign`, which point an accessor at a buffer position.
    fn reuse_hooks(&self, def: &StructDef, class: &mut ClassSpec) {
        let p = self.mapper.profile();
        let args = || vec![Expr::ident("_i"), Expr::ident("_bb")];
        let init = if p.caps.value_type_accessors {
            let runtime = if def.fixed { "Struct" } else { "Table" };
            Statement::assign("__p", Expr::new_object(runtime, args()))
        } else {
            Statement::expr(Expr::helper("__reset", args()))
        };
        class.push(
            MethodSpec::new("__init")
                .param("int", "_i")
                .param("ByteBuffer", "_bb")
                .statement(init),
        );
        class.push(
            MethodSpec::new("__assign")
                .returns(&def.name)
                .param("int", "_i")
                .param("ByteBuffer", "_bb")
                .statement(Statement::expr(Expr::func("__init", args())))
                .returning(Expr::this()),
        );
    }

    /// Annotation for accessors returning a reference that may be absent.
    fn nullable(&self, field: &FieldDef) -> Option<String> {
        let annotation = self.mapper.profile().nullable_annotation?;
        let reference = !self.mapper.destination_type(&field.ty, true).is_scalar();
        (self.options.gen_nullable && !field.required && reference).then(|| annotation.to_string())
    }
}

/// Put `doc` on the first method of a field's member group.
fn attach_doc(members: &mut [Member], doc: &[String]) {
    if doc.is_empty() {
        return;
    }
    if let Some(Member::Method(first)) = members.iter_mut().find(|m| matches!(m, Member::Method(_))) {
        first.doc = doc.to_vec();
    }
}

/// Canonical member name of a field (`equipped_type` -> `equippedType`).
fn camel(name: &str) -> String {
    make_camel(name, false)
}

/// `equipped_type` -> `EquippedType`, for names built around a field.
fn pascal(name: &str) -> String {
    make_camel(name, true)
}

/// `int o = __offset(slot)`.
fn offset_local(slot: u16) -> Statement {
    Statement::local("int", "o", Expr::helper("__offset", vec![Expr::int(slot)]))
}

fn ident_o() -> Expr {
    Expr::ident("o")
}

#[cfg(test)]
mod tests {
    use fbgen_schema::Namespace;

    use super::*;
    use crate::{
        builder::MethodKind,
        language::{CSHARP, JAVA},
        testing,
    };

    fn emit(profile: &crate::language::BackendProfile, name: &str, options: &GenerateOptions) -> Vec<Declaration> {
        let schema = testing::monster_schema();
        let ns = Namespace::parse("Game");
        let emitter = StructEmitter::new(TypeMapper::new(profile, &schema, &ns), options);
        emitter.emit(schema.struct_def(name).unwrap()).unwrap()
    }

    fn class(decls: &[Declaration]) -> &ClassSpec {
        let Declaration::Class(class) = &decls[0] else {
            panic!("expected a class");
        };
        class
    }

    fn method_names(class: &ClassSpec) -> Vec<&str> {
        class
            .members
            .iter()
            .filter_map(|m| match m {
                Member::Method(m) => Some(m.name.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_java_table_header() {
        let options = GenerateOptions::default();
        let decls = emit(&JAVA, "Game.Monster", &options);
        assert_eq!(decls.len(), 1);
        let monster = class(&decls);
        assert_eq!(monster.kind, ClassKind::Class);
        assert_eq!(monster.base.as_deref(), Some("Table"));
        assert_eq!(monster.modifiers, vec!["final".to_string()]);
        assert_eq!(monster.doc, vec!["A monster.".to_string()]);

        let names = method_names(monster);
        assert_eq!(
            &names[..6],
            [
                "ValidateVersion",
                "getRootAsMonster",
                "getRootAsMonster",
                "MonsterBufferHasIdentifier",
                "__init",
                "__assign",
            ]
        );
    }

    #[test]
    fn test_csharp_struct_gets_vector_wrapper() {
        let options = GenerateOptions::default();
        let decls = emit(&CSHARP, "Game.Vec3", &options);
        let names: Vec<&str> = decls.iter().map(Declaration::name).collect();
        assert_eq!(names, ["Vec3", "FlatBufferVectorOfVec3"]);

        let vec3 = class(&decls);
        assert_eq!(vec3.kind, ClassKind::Struct);
        assert_eq!(vec3.interfaces, vec!["IFlatbufferObject<Vec3>".to_string()]);
        let Member::Field(runtime) = &vec3.members[0] else {
            panic!("expected the runtime field first");
        };
        assert_eq!(runtime.ty, "Struct");
        // Fixed structs have no root accessors.
        assert!(!method_names(vec3).contains(&"getRootAsVec3"));
        assert!(method_names(vec3).contains(&"createVec3"));
        assert!(method_names(vec3).contains(&"clone"));
    }

    #[test]
    fn test_identifier_only_on_root() {
        let options = GenerateOptions::default();
        let decls = emit(&JAVA, "Game.Weapon", &options);
        let names = method_names(class(&decls));
        assert!(names.contains(&"getRootAsWeapon"));
        assert!(!names.iter().any(|n| n.ends_with("BufferHasIdentifier")));
        assert!(!names.iter().any(|n| n.starts_with("finish")));
    }

    #[test]
    fn test_partial_modifier() {
        let mut schema = testing::monster_schema();
        let mut def = schema.struct_def("Game.Weapon").unwrap().clone();
        def.attributes.csharp_partial = true;
        schema.add_struct(def.clone());
        let ns = Namespace::parse("Game");
        let options = GenerateOptions::default();
        let emitter = StructEmitter::new(TypeMapper::new(&CSHARP, &schema, &ns), &options);
        let decls = emitter.emit(&def).unwrap();
        assert_eq!(class(&decls).modifiers, vec!["partial".to_string()]);
    }

    #[test]
    fn test_field_doc_on_first_accessor() {
        let mut schema = testing::monster_schema();
        let mut def = schema.struct_def("Game.Monster").unwrap().clone();
        def.fields[0].doc = vec!["Where it stands.".into()];
        schema.add_struct(def.clone());
        let ns = Namespace::parse("Game");
        let options = GenerateOptions::default();
        let emitter = StructEmitter::new(TypeMapper::new(&JAVA, &schema, &ns), &options);
        let decls = emitter.emit(&def).unwrap();

        let documented: Vec<&MethodSpec> = class(&decls)
            .members
            .iter()
            .filter_map(|m| match m {
                Member::Method(m) if !m.doc.is_empty() => Some(m),
                _ => None,
            })
            .collect();
        assert_eq!(documented.len(), 1);
        assert_eq!(documented[0].name, "pos");
        assert!(documented[0].params.is_empty());
    }

    #[test]
    fn test_mutators_follow_option() {
        let plain = emit(&CSHARP, "Game.Monster", &GenerateOptions::default());
        assert!(!method_names(class(&plain)).iter().any(|n| n.starts_with("mutate")));

        let options = GenerateOptions {
            mutable_buffer: true,
            ..GenerateOptions::default()
        };
        let mutable = emit(&CSHARP, "Game.Monster", &options);
        let names = method_names(class(&mutable));
        assert!(names.contains(&"mutateHp"));
        assert!(names.contains(&"mutateInventory"));
        assert!(!names.contains(&"mutateName"));
    }

    #[test]
    fn test_properties_are_properties() {
        let decls = emit(&CSHARP, "Game.Monster", &GenerateOptions::default());
        let hp = class(&decls)
            .members
            .iter()
            .find_map(|m| match m {
                Member::Method(m) if m.name == "hp" => Some(m),
                _ => None,
            })
            .unwrap();
        assert_eq!(hp.kind, MethodKind::Property);
        assert_eq!(hp.return_type.as_deref(), Some("short"));
    }
}
