//! Typed vector and union wrappers for backends with collection support.

use fbgen_schema::{EnumDef, StructDef, Type};

use crate::{
    Result,
    builder::{
        ClassKind, ClassSpec, Declaration, Expr, FieldSpec, MethodSpec, Statement, Visibility,
    },
};

use super::{TypeMapper, builder_call};

fn wrapper(name: String, interfaces: Vec<String>) -> ClassSpec {
    let mut class = ClassSpec::new(ClassKind::Struct, name);
    class.interfaces = interfaces;
    class
}

fn private(ty: impl Into<String>, name: &str) -> FieldSpec {
    FieldSpec::new(Visibility::Private, ty, name)
}

fn byte_buffer_property(source: Expr) -> MethodSpec {
    MethodSpec::property("byteBuffer", "ByteBuffer").returning(source)
}

/// `FlatBufferUnionOf<E>`: discriminant plus typed payload access.
pub fn union_accessor(mapper: &TypeMapper, def: &EnumDef) -> Result<Declaration> {
    let enum_name = mapper.qualify(&def.namespace, &def.name);
    let union = format!("Union<{enum_name}>");
    let mut class = wrapper(
        format!("FlatBufferUnionOf{}", def.name),
        vec![format!("IFlatbufferUnion<{enum_name}>")],
    );

    class.push(private(&union, "__p"));
    class.blank();
    class.push(
        MethodSpec::new("__init")
            .param(&enum_name, "type")
            .param("int", "i")
            .param("ByteBuffer", "bb")
            .statement(Statement::assign(
                "__p",
                Expr::new_object(
                    &union,
                    vec![Expr::ident("type"), Expr::ident("i"), Expr::ident("bb")],
                ),
            )),
    );
    class.blank();
    class.push(
        MethodSpec::property("type", &enum_name)
            .returning(Expr::member(Expr::ident("__p"), "type")),
    );
    class.blank();
    class.push(
        MethodSpec::new("get")
            .returns("TTable")
            .generic("TTable")
            .bound("TTable : struct, IFlatbufferObject<TTable>")
            .returning(
                Expr::call(Expr::ident("__p"), "__to", vec![]).with_generics(vec!["TTable".into()]),
            ),
    );
    class.blank();

    let mut cases = Vec::new();
    for val in def.values.iter().filter(|v| v.value != 0) {
        let Some(payload) = &val.union_type else {
            continue;
        };
        let get = Expr::func("get", vec![]).with_generics(vec![mapper.type_get(payload)?]);
        let clone = Expr::call(get, "clone", vec![Expr::ident("builder")]);
        cases.push((
            Expr::ident(format!("{enum_name}.{}", val.name)),
            Statement::ret(Expr::member(clone, "Value")),
        ));
    }
    class.push(
        MethodSpec::new("clone")
            .returns("int")
            .param("FlatBufferBuilder", "builder")
            .statement(Statement::Switch {
                on: Expr::SelfMember("type".into()),
                cases,
                default: Box::new(Statement::ret(Expr::int(0))),
            })
            .block(),
    );
    Ok(Declaration::Class(class))
}

/// `FlatBufferUnionCollectionOf<E>`: walks the discriminant vector and the
/// payload offset vector together.
pub fn union_collection(mapper: &TypeMapper, def: &EnumDef) -> Result<Declaration> {
    let enum_name = mapper.qualify(&def.namespace, &def.name);
    let union = format!("FlatBufferUnionOf{}", def.name);
    let collection = format!("FlatBufferUnionCollectionOf{}", def.name);
    let mut class = wrapper(
        collection.clone(),
        vec![
            format!("IFlatbufferCollection<{union}>"),
            "IFlatbufferUnionCollection".into(),
        ],
    );

    let discriminants = Type::enumeration(def.underlying, def.qualified_name());
    class.push(private(mapper.vector_type(&discriminants)?, "_enumVector"));
    class.push(private("int", "_tableVectorOffset"));
    class.blank();
    class.push(
        MethodSpec::new("__init")
            .param("int", "enumVectorOffset")
            .param("int", "tableVectorOffset")
            .param("ByteBuffer", "bb")
            .statement(Statement::expr(Expr::call(
                Expr::ident("_enumVector"),
                "__init",
                vec![Expr::ident("enumVectorOffset"), Expr::ident("bb")],
            )))
            .statement(Statement::assign("_tableVectorOffset", Expr::ident("tableVectorOffset"))),
    );
    class.blank();
    class.push(
        MethodSpec::new("clone")
            .returns("VectorOffset")
            .param("FlatBufferBuilder", "builder")
            .returning(
                Expr::call(
                    Expr::ident(format!("Union<{enum_name}>")),
                    "__clone",
                    vec![Expr::ident("builder"), Expr::this()],
                )
                .with_generics(vec![union.clone(), collection]),
            ),
    );
    class.blank();
    class.push(
        MethodSpec::property("count", "int")
            .returning(Expr::member(Expr::ident("_enumVector"), "Count")),
    );
    class.blank();

    let int_size = Expr::ident("sizeof(int)");
    let slot = Expr::add(
        Expr::add(Expr::ident("_tableVectorOffset"), int_size.clone()),
        Expr::binary(int_size, "*", Expr::ident("index")),
    );
    let bb = Expr::member(Expr::ident("_enumVector"), "ByteBuffer");
    class.push(
        MethodSpec::indexer(&union)
            .param("int", "index")
            .statement(Statement::local("int", "o", slot))
            .statement(Statement::compound(
                "o",
                "+=",
                Expr::call(bb.clone(), "getInt", vec![Expr::ident("o")]),
            ))
            .statement(Statement::local(&union, "t", Expr::Default(union.clone())))
            .statement(Statement::expr(Expr::call(
                Expr::ident("t"),
                "__init",
                vec![
                    Expr::index(Expr::ident("_enumVector"), vec![Expr::ident("index")]),
                    Expr::ident("o"),
                    bb,
                ],
            )))
            .returning(Expr::ident("t"))
            .block(),
    );
    Ok(Declaration::Class(class))
}

/// `FlatBufferVectorOf<E>`: a vector of the underlying integer read as `E`.
pub fn enum_vector(mapper: &TypeMapper, def: &EnumDef) -> Result<Declaration> {
    let p = mapper.profile();
    let mut class = wrapper(
        format!("FlatBufferVectorOf{}", def.name),
        vec![
            format!("IFlatbufferCollection<{}>", def.name),
            "IFlatbufferVector".into(),
        ],
    );
    class.visibility = p.visibility(def.attributes.private);

    class.push(private(mapper.vector_type(&Type::scalar(def.underlying))?, "_vector"));
    class.blank();
    class.push(
        MethodSpec::new("__init")
            .param("int", "i")
            .param("ByteBuffer", "bb")
            .statement(Statement::expr(Expr::call(
                Expr::ident("_vector"),
                "__init",
                vec![Expr::ident("i"), Expr::ident("bb")],
            ))),
    );
    class.blank();
    class.push(byte_buffer_property(Expr::member(Expr::ident("_vector"), "ByteBuffer")));
    class.blank();
    class.push(
        MethodSpec::property("count", "int").returning(Expr::member(Expr::ident("_vector"), "Count")),
    );
    class.blank();
    class.push(
        MethodSpec::indexer(&def.name).param("int", "index").returning(Expr::cast(
            &def.name,
            Expr::index(Expr::ident("_vector"), vec![Expr::ident("index")]),
        )),
    );
    class.blank();
    class.push(
        MethodSpec::new("clone")
            .returns("VectorOffset")
            .param("FlatBufferBuilder", "builder")
            .returning(Expr::call(Expr::ident("_vector"), "clone", vec![Expr::ident("builder")])),
    );
    Ok(Declaration::Class(class))
}

/// `FlatBufferVectorOf<S>`: a vector of fixed structs laid out inline.
pub fn struct_vector(def: &StructDef) -> Declaration {
    let size = Expr::size(def.bytesize);
    let mut class = wrapper(
        format!("FlatBufferVectorOf{}", def.name),
        vec![
            format!("IFlatbufferCollection<{}>", def.name),
            "IFlatbufferVector".into(),
        ],
    );

    class.push(private("ByteBuffer", "_bb"));
    class.push(private("int", "_start_pos"));
    class.push(private("int", "_count"));
    class.blank();
    class.push(
        MethodSpec::new("__init")
            .param("int", "i")
            .param("ByteBuffer", "bb")
            .statement(Statement::assign("_bb", Expr::ident("bb")))
            .statement(Statement::assign(
                "_start_pos",
                Expr::add(Expr::ident("i"), Expr::ident("sizeof(int)")),
            ))
            .statement(Statement::assign(
                "_count",
                Expr::binary(
                    Expr::call(Expr::ident("bb"), "getInt", vec![Expr::ident("i")]),
                    "/",
                    size.clone(),
                ),
            ))
            .block(),
    );
    class.blank();
    class.push(byte_buffer_property(Expr::ident("_bb")));
    class.blank();
    class.push(MethodSpec::property("count", "int").returning(Expr::ident("_count")));
    class.blank();
    class.push(
        MethodSpec::indexer(&def.name)
            .param("int", "index")
            .statement(Statement::local(
                "int",
                "o",
                Expr::add(
                    Expr::ident("_start_pos"),
                    Expr::binary(size.clone(), "*", Expr::ident("index")),
                ),
            ))
            .statement(Statement::local(&def.name, "t", Expr::Default(def.name.clone())))
            .statement(Statement::expr(Expr::call(
                Expr::ident("t"),
                "__init",
                vec![Expr::ident("o"), Expr::ident("_bb")],
            )))
            .returning(Expr::ident("t"))
            .block(),
    );
    class.blank();
    class.push(
        MethodSpec::new("clone")
            .returns("VectorOffset")
            .param("FlatBufferBuilder", "builder")
            .returning(builder_call(
                "cloneVectorData",
                vec![
                    Expr::ident("_bb"),
                    Expr::ident("_start_pos"),
                    size,
                    Expr::ident("_count"),
                    Expr::size(def.minalign),
                ],
            ))
            .block(),
    );
    Declaration::Class(class)
}

#[cfg(test)]
mod tests {
    use fbgen_schema::Namespace;

    use super::*;
    use crate::{
        builder::{Member, MethodKind},
        language::CSHARP,
        testing,
    };

    fn methods(decl: &Declaration) -> Vec<&MethodSpec> {
        let Declaration::Class(class) = decl else {
            panic!("expected a class");
        };
        class
            .members
            .iter()
            .filter_map(|m| match m {
                Member::Method(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_union_clone_skips_none() {
        let schema = testing::monster_schema();
        let ns = Namespace::parse("Game");
        let mapper = TypeMapper::new(&CSHARP, &schema, &ns);
        let decl = union_accessor(&mapper, schema.enum_def("Game.Equipment").unwrap()).unwrap();

        let clone = methods(&decl).into_iter().find(|m| m.name == "clone").unwrap();
        let Statement::Switch { cases, .. } = &clone.body[0] else {
            panic!("expected a switch");
        };
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].0, Expr::ident("Equipment.Weapon"));
    }

    #[test]
    fn test_union_collection_indexer() {
        let schema = testing::monster_schema();
        let ns = Namespace::parse("Game");
        let mapper = TypeMapper::new(&CSHARP, &schema, &ns);
        let decl = union_collection(&mapper, schema.enum_def("Game.Equipment").unwrap()).unwrap();

        let indexer = methods(&decl)
            .into_iter()
            .find(|m| m.kind == MethodKind::Indexer)
            .unwrap();
        assert_eq!(indexer.return_type.as_deref(), Some("FlatBufferUnionOfEquipment"));
        assert_eq!(indexer.body.len(), 5);
    }

    #[test]
    fn test_struct_vector_uses_layout() {
        let schema = testing::monster_schema();
        let decl = struct_vector(schema.struct_def("Game.Vec3").unwrap());
        assert_eq!(decl.name(), "FlatBufferVectorOfVec3");

        let clone = methods(&decl).into_iter().find(|m| m.name == "clone").unwrap();
        let Statement::Return(Some(Expr::Call { args, .. })) = &clone.body[0] else {
            panic!("expected a returned call");
        };
        assert_eq!(args[2], Expr::int(12));
        assert_eq!(args[4], Expr::int(4));
    }
}
