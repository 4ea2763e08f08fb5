//! Key comparison, sorted vectors and binary search for keyed tables.

use fbgen_schema::{FieldDef, StructDef};

use super::StructEmitter;
use crate::{
    Result,
    builder::{ClassSpec, Expr, MethodSpec, ParamSpec, Statement, Visibility},
    emit::builder_call,
    language::{ComparatorStyle, KeySort},
};

fn ident(name: &str) -> Expr {
    Expr::ident(name)
}

impl StructEmitter<'_> {
    pub(super) fn lookup(&self, def: &StructDef, key: &FieldDef, class: &mut ClassSpec) -> Result<()> {
        class.push(self.keys_compare(def, key)?);
        class.push(self.sorted_vector(def));
        class.push(self.lookup_by_key(def, key)?.block());
        Ok(())
    }

    /// Three-way comparison of the keys of two built tables.
    fn keys_compare(&self, def: &StructDef, key: &FieldDef) -> Result<MethodSpec> {
        let p = self.mapper.profile();
        let buffer = || ident(p.key_buffer);
        let method = match p.key_sort {
            KeySort::Override => MethodSpec::new("keysCompare")
                .visibility(Visibility::Protected)
                .annotation("@Override")
                .param("Integer", "o1")
                .param("Integer", "o2")
                .param("ByteBuffer", p.key_buffer),
            KeySort::Static => {
                let offset = self.mapper.offset_type(def);
                MethodSpec::new("keysCompare")
                    .static_()
                    .param(&offset, "o1")
                    .param(&offset, "o2")
                    .param("FlatBufferBuilder", "builder")
            }
        };
        let raw = |name: &str| {
            if p.caps.generic_offsets {
                Expr::member(ident(name), "Value")
            } else {
                ident(name)
            }
        };
        let field_of = |table: &str| {
            Expr::static_helper("__offset", vec![Expr::int(key.offset), raw(table), buffer()])
        };
        let method = method.returns("int");

        if key.ty.as_scalar().is_none() {
            return Ok(method.returning(Expr::static_helper(
                "compareStrings",
                vec![field_of("o1"), field_of("o2"), buffer()],
            )));
        }
        let ty = self.mapper.destination_name(&key.ty)?;
        Ok(method
            .statement(Statement::local(
                &ty,
                "val_1",
                self.mapper.read_dest(&key.ty, buffer(), field_of("o1"))?,
            ))
            .statement(Statement::local(
                &ty,
                "val_2",
                self.mapper.read_dest(&key.ty, buffer(), field_of("o2"))?,
            ))
            .returning(compare(p.comparator, ident("val_1"), ident("val_2"))))
    }

    /// `createSortedVectorOf<Name>`: sort built tables by key, then store
    /// them as a vector.
    fn sorted_vector(&self, def: &StructDef) -> MethodSpec {
        let p = self.mapper.profile();
        let method = MethodSpec::new(format!("createSortedVectorOf{}", def.name))
            .static_()
            .returns(p.refs.vector_offset)
            .param("FlatBufferBuilder", "builder");
        match p.key_sort {
            KeySort::Override => method
                .param_spec(ParamSpec::array("int", "offsets", 1))
                .returning(builder_call(
                    "createSortedVectorOfTables",
                    vec![Expr::new_object(&def.name, vec![]), ident("offsets")],
                )),
            KeySort::Static => {
                let offset = self.mapper.offset_type(def);
                let comparator = Expr::Lambda {
                    params: vec![
                        (offset.clone(), "o1".to_string()),
                        (offset.clone(), "o2".to_string()),
                    ],
                    body: Box::new(Expr::func(
                        "keysCompare",
                        vec![ident("o1"), ident("o2"), ident("builder")],
                    )),
                };
                method
                    .param_spec(ParamSpec::array(offset, "offsets", 1))
                    .statement(Statement::expr(Expr::call(
                        ident("Array"),
                        "Sort",
                        vec![ident("offsets"), comparator],
                    )))
                    .returning(builder_call("createVectorOfTables", vec![ident("offsets")]))
                    .block()
            }
        }
    }

    /// `__lookup_by_key`: binary search of a sorted table vector. `span`
    /// halves each step; `start` skips past elements known to be smaller.
    fn lookup_by_key(&self, def: &StructDef, key: &FieldDef) -> Result<MethodSpec> {
        let p = self.mapper.profile();
        let bb = || ident("bb");
        let mut method = MethodSpec::new("__lookup_by_key")
            .static_()
            .returns(self.mapper.optional(&def.name));
        if p.caps.object_reuse {
            method = method.param(&def.name, "obj");
        }
        let key_type = self.mapper.destination_name(&key.ty)?;
        method = method
            .param("int", "vectorLocation")
            .param(&key_type, "key")
            .param("ByteBuffer", "bb");

        let is_string = key.ty.as_scalar().is_none();
        if is_string {
            method = method.statement(Statement::local("byte[]", "byteKey", ident(p.utf8_key)));
        }
        method = method
            .statement(Statement::local(
                "int",
                "span",
                Expr::call(
                    bb(),
                    "getInt",
                    vec![Expr::binary(ident("vectorLocation"), "-", Expr::int(4))],
                ),
            ))
            .statement(Statement::local("int", "start", Expr::int(0)));

        let element = Expr::add(
            ident("vectorLocation"),
            Expr::binary(
                Expr::int(4),
                "*",
                Expr::paren(Expr::add(ident("start"), ident("middle"))),
            ),
        );
        let key_position = Expr::static_helper(
            "__offset",
            vec![
                Expr::int(key.offset),
                Expr::binary(Expr::member(bb(), p.bb_length), "-", ident("tableOffset")),
                bb(),
            ],
        );
        let mut body = vec![
            Statement::local("int", "middle", Expr::binary(ident("span"), "/", Expr::int(2))),
            Statement::local(
                "int",
                "tableOffset",
                Expr::static_helper("__indirect", vec![element, bb()]),
            ),
        ];
        let comp = if is_string {
            Expr::static_helper("compareStrings", vec![key_position, ident("byteKey"), bb()])
        } else {
            body.push(Statement::local(
                &key_type,
                "val",
                self.mapper.read_dest(&key.ty, bb(), key_position)?,
            ));
            compare(p.comparator, ident("val"), ident("key"))
        };
        body.push(Statement::local("int", "comp", comp));

        let target = if p.caps.object_reuse {
            Expr::paren(Expr::cond(
                Expr::binary(ident("obj"), "==", Expr::null()),
                Expr::new_object(&def.name, vec![]),
                ident("obj"),
            ))
        } else {
            Expr::new_object(&def.name, vec![])
        };
        let found = Statement::ret(Expr::call(target, "__assign", vec![ident("tableOffset"), bb()]));
        body.push(Statement::if_else(
            Expr::binary(ident("comp"), ">", Expr::int(0)),
            vec![Statement::assign("span", ident("middle"))],
            vec![Statement::if_else(
                Expr::binary(ident("comp"), "<", Expr::int(0)),
                vec![
                    Statement::Increment("middle".to_string()),
                    Statement::compound("start", "+=", ident("middle")),
                    Statement::compound("span", "-=", ident("middle")),
                ],
                vec![found],
            )],
        ));

        Ok(method
            .statement(Statement::While {
                cond: Expr::binary(ident("span"), "!=", Expr::int(0)),
                body,
            })
            .returning(Expr::null()))
    }
}

/// Negative, zero or positive as `lhs` sorts before, with or after `rhs`.
fn compare(style: ComparatorStyle, lhs: Expr, rhs: Expr) -> Expr {
    match style {
        ComparatorStyle::CompareTo => Expr::call(lhs, "compareTo", vec![rhs]),
        ComparatorStyle::Ternary => Expr::cond(
            Expr::binary(lhs.clone(), ">", rhs.clone()),
            Expr::int(1),
            Expr::cond(Expr::binary(lhs, "<", rhs), Expr::int(-1), Expr::int(0)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use fbgen_schema::{Namespace, Scalar, Type};

    use super::*;
    use crate::{
        GenerateOptions,
        builder::{ClassKind, Member},
        emit::TypeMapper,
        language::{BackendProfile, CSHARP, JAVA},
        testing,
    };

    fn lookup_methods(profile: &BackendProfile, def: &StructDef) -> Vec<MethodSpec> {
        let schema = testing::monster_schema();
        let ns = Namespace::parse("Game");
        let options = GenerateOptions::default();
        let emitter = StructEmitter::new(TypeMapper::new(profile, &schema, &ns), &options);
        let key = def.key_field().unwrap();
        let mut class = ClassSpec::new(ClassKind::Class, &def.name);
        emitter.lookup(def, key, &mut class).unwrap();
        class
            .members
            .into_iter()
            .filter_map(|m| match m {
                Member::Method(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    fn weapon() -> StructDef {
        testing::monster_schema()
            .struct_def("Game.Weapon")
            .unwrap()
            .clone()
    }

    fn keyed_stat() -> StructDef {
        let mut def = testing::table_def(
            "Stat",
            vec![("id", Type::String), ("rank", Type::scalar(Scalar::Int))],
        );
        def.fields[0].key = false;
        def.fields[1].key = true;
        def.namespace = Namespace::parse("Game");
        def
    }

    #[test]
    fn test_java_comparator_override() {
        let methods = lookup_methods(&JAVA, &weapon());
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["keysCompare", "createSortedVectorOfWeapon", "__lookup_by_key"]);

        let compare = &methods[0];
        assert_eq!(compare.visibility, Visibility::Protected);
        assert_eq!(compare.annotations, vec!["@Override".to_string()]);
        let offset = |o: &str| {
            Expr::static_helper("__offset", vec![Expr::int(4), ident(o), ident("_bb")])
        };
        assert_eq!(
            compare.body,
            vec![Statement::ret(Expr::static_helper(
                "compareStrings",
                vec![offset("o1"), offset("o2"), ident("_bb")]
            ))]
        );
    }

    #[test]
    fn test_csharp_sort_uses_static_comparator() {
        let methods = lookup_methods(&CSHARP, &weapon());
        let compare = &methods[0];
        assert!(compare.is_static);
        assert_eq!(compare.params[0].ty, "Offset<Weapon>");
        let Statement::Return(Some(Expr::Helper { args, .. })) = &compare.body[0] else {
            panic!("expected a string comparison");
        };
        let Expr::Helper { args: inner, .. } = &args[0] else {
            panic!("expected a field offset");
        };
        assert_eq!(inner[1], Expr::member(ident("o1"), "Value"));
        assert_eq!(args[2], ident("builder.DataBuffer"));

        let sorted = &methods[1];
        assert_eq!(sorted.return_type.as_deref(), Some("VectorOffset"));
        assert_eq!(sorted.params[1].rank, 1);
        assert_eq!(sorted.body.len(), 2);
    }

    #[test]
    fn test_string_lookup_body() {
        let methods = lookup_methods(&CSHARP, &weapon());
        let lookup = &methods[2];
        assert_eq!(lookup.return_type.as_deref(), Some("Weapon?"));
        let params: Vec<(&str, &str)> = lookup
            .params
            .iter()
            .map(|p| (p.ty.as_str(), p.name.as_str()))
            .collect();
        assert_eq!(
            params,
            [("int", "vectorLocation"), ("string", "key"), ("ByteBuffer", "bb")]
        );
        assert_eq!(
            lookup.body[0],
            Statement::local(
                "byte[]",
                "byteKey",
                ident("System.Text.Encoding.UTF8.GetBytes(key)")
            )
        );
        assert_eq!(lookup.body.last(), Some(&Statement::ret(Expr::null())));
        let Statement::While { body, .. } = &lookup.body[3] else {
            panic!("expected the search loop");
        };
        // middle, tableOffset, comp, branch.
        assert_eq!(body.len(), 4);
    }

    #[test]
    fn test_java_lookup_reuses_object() {
        let methods = lookup_methods(&JAVA, &weapon());
        let lookup = &methods[2];
        assert_eq!(lookup.params[0].name, "obj");
        assert_eq!(lookup.return_type.as_deref(), Some("Weapon"));
    }

    #[test]
    fn test_scalar_key_compares_numerically() {
        let java = lookup_methods(&JAVA, &keyed_stat());
        let compare = &java[0];
        assert_eq!(compare.body.len(), 3);
        assert_eq!(
            compare.body[2],
            Statement::ret(Expr::cond(
                Expr::binary(ident("val_1"), ">", ident("val_2")),
                Expr::int(1),
                Expr::cond(
                    Expr::binary(ident("val_1"), "<", ident("val_2")),
                    Expr::int(-1),
                    Expr::int(0)
                )
            ))
        );

        let cs = lookup_methods(&CSHARP, &keyed_stat());
        let lookup = &cs[2];
        // No byte key for scalar keys.
        assert_eq!(lookup.params[1].ty, "int");
        let Statement::While { body, .. } = &lookup.body[2] else {
            panic!("expected the search loop");
        };
        assert_eq!(
            body[3],
            Statement::local(
                "int",
                "comp",
                Expr::call(ident("val"), "compareTo", vec![ident("key")])
            )
        );
    }
}
