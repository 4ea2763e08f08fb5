//! Field accessors and in-place mutators.

use fbgen_schema::{FieldDef, Scalar, StructDef, Type};

use super::{StructEmitter, camel, ident_o, offset_local, pascal};
use crate::{
    Error, Result,
    builder::{Expr, Member, MethodSpec, Statement},
    language::ByteAccess,
};

const UNION_BOUND: &str = "TTable : struct, IFlatbufferObject<TTable>";

fn runtime_bb() -> Expr {
    Expr::runtime("bb")
}

fn bb_pos() -> Expr {
    Expr::runtime("bb_pos")
}

fn present(name: &str) -> Expr {
    Expr::binary(Expr::ident(name), "!=", Expr::int(0))
}

impl StructEmitter<'_> {
    /// Every accessor of one field, in declaration order.
    pub(super) fn accessors(&self, def: &StructDef, field: &FieldDef) -> Result<Vec<Member>> {
        let mut out = match &field.ty {
            Type::Scalar { .. } => vec![self.scalar(def, field)?],
            Type::String => vec![self.string(def, field)],
            Type::Struct { .. } => self.structure(def, field)?,
            Type::Union { .. } => vec![self.union(def, field)],
            Type::Vector { element } | Type::Array { element, .. } => {
                self.element(def, field, element)?
            }
        };
        if field.ty.is_vector() {
            out.push(self.length(field));
            if self.mapper.profile().caps.collection_wrappers {
                out.push(self.collection(def, field)?);
            }
            out.extend(self.by_key(field)?);
        }
        out.extend(self.byte_access(field)?);
        out.extend(self.nested(field)?);
        Ok(out)
    }

    /// Position of an inline value: fixed structs address fields directly,
    /// tables through the vtable offset `o`.
    fn inline_pos(&self, def: &StructDef, field: &FieldDef) -> Expr {
        if def.fixed {
            Expr::add(bb_pos(), Expr::int(field.offset))
        } else {
            Expr::add(ident_o(), bb_pos())
        }
    }

    /// Return `value`, or `absent` when a table field is not set.
    fn guarded(&self, def: &StructDef, field: &FieldDef, value: Expr, absent: Expr) -> Vec<Statement> {
        if def.fixed || field.ty.is_array() {
            return vec![Statement::ret(value)];
        }
        vec![
            offset_local(field.offset),
            Statement::ret(Expr::cond(present("o"), value, absent)),
        ]
    }

    /// `(T?)` cast of table fields read into nullable value types.
    fn optional_cast(&self, def: &StructDef, field: &FieldDef) -> Result<Option<String>> {
        let p = self.mapper.profile();
        let element = field.ty.underlying();
        let wrapped = matches!(element, Type::Struct { .. } | Type::Union { .. });
        if def.fixed || p.optional_suffix.is_empty() || !wrapped {
            return Ok(None);
        }
        Ok(Some(self.mapper.optional(&self.mapper.destination_name(&field.ty)?)))
    }

    /// The accessor object a struct read is assigned into.
    fn target(&self, type_name: &str) -> Expr {
        if self.mapper.profile().caps.object_reuse {
            Expr::ident("obj")
        } else {
            Expr::new_object(type_name, vec![])
        }
    }

    /// Literal cast applied to scalar defaults where the backend types them.
    fn default_cast(&self, field: &FieldDef) -> Result<String> {
        let p = self.mapper.profile();
        let scalar_like = field.ty.is_scalar() || field.ty.element().is_some_and(Type::is_scalar);
        let enum_value = field.ty.is_scalar() && field.ty.enum_ref().is_some();
        if p.caps.typed_defaults && scalar_like && !enum_value {
            Ok(self.mapper.destination_name(&field.ty)?)
        } else {
            Ok(String::new())
        }
    }

    fn scalar(&self, def: &StructDef, field: &FieldDef) -> Result<Member> {
        let value = self
            .mapper
            .read_dest(&field.ty, runtime_bb(), self.inline_pos(def, field))?;
        let absent = Expr::cast_if(
            &self.default_cast(field)?,
            Expr::ident(self.mapper.default_value(field, true)?),
        );
        Ok(MethodSpec::property(camel(&field.name), self.mapper.destination_name(&field.ty)?)
            .statements(self.guarded(def, field, value, absent))
            .into())
    }

    fn string(&self, def: &StructDef, field: &FieldDef) -> Member {
        let value = Expr::helper("__string", vec![self.inline_pos(def, field)]);
        MethodSpec::property(camel(&field.name), self.mapper.profile().string_type)
            .return_annotation(self.nullable(field))
            .statements(self.guarded(def, field, value, Expr::null()))
            .into()
    }

    fn structure(&self, def: &StructDef, field: &FieldDef) -> Result<Vec<Member>> {
        let p = self.mapper.profile();
        let name = camel(&field.name);
        let type_name = self.mapper.type_get(&field.ty)?;
        let pos = if def.fixed || self.mapper.is_fixed_struct(&field.ty)? {
            self.inline_pos(def, field)
        } else {
            Expr::helper("__indirect", vec![self.inline_pos(def, field)])
        };
        let assign = Expr::call(self.target(&type_name), "__assign", vec![pos, runtime_bb()]);
        let optional = self.optional_cast(def, field)?;
        let value = match &optional {
            Some(cast) => Expr::cast(cast, assign),
            None => assign,
        };
        let body = self.guarded(def, field, value, Expr::null());

        if p.caps.object_reuse {
            let overload = MethodSpec::new(&name)
                .returns(&type_name)
                .return_annotation(self.nullable(field))
                .returning(Expr::func(&name, vec![Expr::new_object(&type_name, vec![])]));
            let main = MethodSpec::new(&name)
                .returns(&type_name)
                .return_annotation(self.nullable(field))
                .param(&type_name, "obj")
                .statements(body);
            return Ok(vec![overload.into(), main.into()]);
        }
        let returns = optional.unwrap_or(type_name);
        Ok(vec![MethodSpec::property(name, returns).statements(body).into()])
    }

    fn union(&self, def: &StructDef, field: &FieldDef) -> Member {
        let p = self.mapper.profile();
        let name = camel(&field.name);
        if p.caps.generic_unions {
            let value = Expr::cast(
                "TTable?",
                Expr::helper("__union", vec![ident_o()]).with_generics(vec!["TTable".into()]),
            );
            return MethodSpec::new(name)
                .returns("TTable?")
                .generic("TTable")
                .bound(UNION_BOUND)
                .statements(self.guarded(def, field, value, Expr::null()))
                .into();
        }
        let table = p.refs.union_table;
        let value = Expr::helper("__union", vec![Expr::ident("obj"), ident_o()]);
        MethodSpec::new(name)
            .returns(table)
            .return_annotation(self.nullable(field))
            .param(table, "obj")
            .statements(self.guarded(def, field, value, Expr::null()))
            .into()
    }

    /// Indexed access to vector and fixed array elements.
    fn element(&self, def: &StructDef, field: &FieldDef, element: &Type) -> Result<Vec<Member>> {
        let p = self.mapper.profile();
        let name = camel(&field.name);
        let j = || Expr::ident("j");
        let base = if field.ty.is_array() {
            Expr::add(bb_pos(), Expr::int(field.offset))
        } else {
            Expr::helper("__vector", vec![ident_o()])
        };
        let index = Expr::add(
            base,
            Expr::binary(j(), "*", Expr::size(self.mapper.inline_size(element)?)),
        );
        let dest = self.mapper.destination_name(&field.ty)?;
        let optional = self.optional_cast(def, field)?;
        let absent = match element {
            Type::Scalar { scalar: Scalar::Bool, .. } => Expr::ident("false"),
            Type::Scalar { .. } => Expr::cast_if(&self.default_cast(field)?, Expr::int(0)),
            _ => Expr::null(),
        };

        let mut out = Vec::new();
        let method = match element {
            Type::Struct { .. } => {
                let pos = if self.mapper.is_fixed_struct(element)? {
                    index
                } else {
                    Expr::helper("__indirect", vec![index])
                };
                let assign = Expr::call(self.target(&dest), "__assign", vec![pos, runtime_bb()]);
                let value = match &optional {
                    Some(cast) => Expr::cast(cast, assign),
                    None => assign,
                };
                let mut method = MethodSpec::new(&name)
                    .returns(optional.clone().unwrap_or_else(|| dest.clone()))
                    .return_annotation(self.nullable(field));
                if p.caps.object_reuse {
                    out.push(
                        MethodSpec::new(&name)
                            .returns(&dest)
                            .return_annotation(self.nullable(field))
                            .param("int", "j")
                            .returning(Expr::func(
                                &name,
                                vec![Expr::new_object(&dest, vec![]), j()],
                            ))
                            .into(),
                    );
                    method = method.param(&dest, "obj");
                }
                method.param("int", "j").statements(self.guarded(def, field, value, absent))
            }
            Type::Union { .. } => {
                let pos = Expr::binary(index, "-", bb_pos());
                if p.caps.generic_unions {
                    let value = Expr::cast(
                        "TTable?",
                        Expr::helper("__union", vec![pos]).with_generics(vec!["TTable".into()]),
                    );
                    MethodSpec::new(&name)
                        .returns("TTable?")
                        .generic("TTable")
                        .param("int", "j")
                        .bound(UNION_BOUND)
                        .statements(self.guarded(def, field, value, absent))
                } else {
                    let value = Expr::helper("__union", vec![Expr::ident("obj"), pos]);
                    MethodSpec::new(&name)
                        .returns(&dest)
                        .return_annotation(self.nullable(field))
                        .param(&dest, "obj")
                        .param("int", "j")
                        .statements(self.guarded(def, field, value, absent))
                }
            }
            Type::String => MethodSpec::new(&name)
                .returns(&dest)
                .return_annotation(self.nullable(field))
                .param("int", "j")
                .statements(self.guarded(
                    def,
                    field,
                    Expr::helper("__string", vec![index]),
                    absent,
                )),
            _ => {
                let value = self.mapper.read_dest(&field.ty, runtime_bb(), index)?;
                MethodSpec::new(&name)
                    .returns(&dest)
                    .param("int", "j")
                    .statements(self.guarded(def, field, value, absent))
            }
        };
        out.push(method.into());
        Ok(out)
    }

    fn length(&self, field: &FieldDef) -> Member {
        let len = Expr::helper("__vector_len", vec![ident_o()]);
        MethodSpec::property(format!("{}Length", camel(&field.name)), "int")
            .statement(offset_local(field.offset))
            .returning(Expr::cond(present("o"), len, Expr::int(0)))
            .into()
    }

    /// Read-only collection view over a vector, `null` when absent.
    fn collection(&self, def: &StructDef, field: &FieldDef) -> Result<Member> {
        let element = field.ty.underlying();
        let collection = self.mapper.collection_type(element)?;
        let vector = self.mapper.vector_type(element)?;
        let indirect = |var: &str| {
            Expr::helper("__indirect", vec![Expr::add(Expr::ident(var), bb_pos())])
        };

        let mut body = Vec::new();
        let mut cond = present("o");
        let mut init_args = Vec::new();
        if element.is_union() {
            let type_field = def.union_type_field(field).ok_or_else(|| Error::MissingUnionType {
                table: def.qualified_name(),
                field: field.name.clone(),
            })?;
            body.push(Statement::local(
                "int",
                "oEnum",
                Expr::helper("__offset", vec![Expr::int(type_field.offset)]),
            ));
            cond = Expr::binary(present("oEnum"), "&&", cond);
            init_args.push(indirect("oEnum"));
        }
        init_args.push(indirect("o"));
        init_args.push(runtime_bb());

        body.push(offset_local(field.offset));
        body.push(Statement::if_else(
            cond,
            vec![
                Statement::local(&vector, "v", Expr::Default(vector.clone())),
                Statement::expr(Expr::call(Expr::ident("v"), "__init", init_args)),
                Statement::ret(Expr::new_object(&collection, vec![Expr::ident("v")])),
            ],
            vec![Statement::ret(Expr::null())],
        ));
        Ok(MethodSpec::property(
            format!("{}Collection", camel(&field.name)),
            self.mapper.optional(&collection),
        )
        .statements(body)
        .into())
    }

    /// Binary search by key over a vector of keyed tables.
    fn by_key(&self, field: &FieldDef) -> Result<Vec<Member>> {
        let Some(Type::Struct { name: table }) = field.ty.element() else {
            return Ok(Vec::new());
        };
        let table_def = self.mapper.schema().struct_def(table)?;
        let Some(key) = table_def.key_field().filter(|_| !table_def.fixed) else {
            return Ok(Vec::new());
        };
        let p = self.mapper.profile();
        let qualified = self.mapper.struct_name(table)?;
        let returns = self.mapper.optional(&qualified);
        let key_type = self.mapper.destination_name(&key.ty)?;
        let name = format!("{}ByKey", camel(&field.name));
        let lookup = |obj: Option<Expr>| {
            let mut args: Vec<Expr> = obj.into_iter().collect();
            args.push(Expr::helper("__vector", vec![ident_o()]));
            args.push(Expr::ident("key"));
            args.push(runtime_bb());
            vec![
                offset_local(field.offset),
                Statement::ret(Expr::cond(
                    present("o"),
                    Expr::call(Expr::ident(&qualified), "__lookup_by_key", args),
                    Expr::null(),
                )),
            ]
        };

        let mut out = Vec::new();
        let reuse = p.caps.object_reuse;
        out.push(
            MethodSpec::new(&name)
                .returns(&returns)
                .param(&key_type, "key")
                .statements(lookup(reuse.then(Expr::null)))
                .into(),
        );
        if reuse {
            out.push(
                MethodSpec::new(&name)
                    .returns(&returns)
                    .param(&returns, "obj")
                    .param(&key_type, "key")
                    .statements(lookup(Some(Expr::ident("obj"))))
                    .into(),
            );
        }
        Ok(out)
    }

    /// Raw byte views of strings and scalar vectors.
    fn byte_access(&self, field: &FieldDef) -> Result<Vec<Member>> {
        let element = match &field.ty {
            Type::String => None,
            Type::Vector { element } if element.is_scalar() => Some(element.as_ref()),
            _ => return Ok(Vec::new()),
        };
        let p = self.mapper.profile();
        let slot = || Expr::int(field.offset);
        Ok(match p.byte_access {
            ByteAccess::ByteBuffer => {
                let size = match element {
                    Some(element) => self.mapper.inline_size(element)?,
                    None => 1,
                };
                let name = camel(&field.name);
                vec![
                    MethodSpec::new(format!("{name}AsByteBuffer"))
                        .returns("ByteBuffer")
                        .returning(Expr::helper(
                            "__vector_as_bytebuffer",
                            vec![slot(), Expr::size(size)],
                        ))
                        .into(),
                    MethodSpec::new(format!("{name}InByteBuffer"))
                        .returns("ByteBuffer")
                        .param("ByteBuffer", "_bb")
                        .returning(Expr::helper(
                            "__vector_in_bytebuffer",
                            vec![Expr::ident("_bb"), slot(), Expr::size(size)],
                        ))
                        .into(),
                ]
            }
            ByteAccess::SpanOrSegment => {
                let bytes = format!("get{}Bytes", pascal(&field.name));
                let element_type = match element {
                    Some(element) => self.mapper.basic_name(element, true)?,
                    None => "byte".to_string(),
                };
                vec![
                    Member::Conditional {
                        symbol: "ENABLE_SPAN_T".to_string(),
                        then: vec![
                            MethodSpec::new(&bytes)
                                .returns("Span<byte>")
                                .returning(Expr::helper("__vector_as_span", vec![slot()]))
                                .into(),
                        ],
                        otherwise: vec![
                            MethodSpec::new(&bytes)
                                .returns("ArraySegment<byte>?")
                                .returning(Expr::helper("__vector_as_arraysegment", vec![slot()]))
                                .into(),
                        ],
                    },
                    MethodSpec::new(format!("get{}Array", pascal(&field.name)))
                        .returns(format!("{element_type}[]"))
                        .returning(
                            Expr::helper("__vector_as_array", vec![slot()])
                                .with_generics(vec![element_type.clone()]),
                        )
                        .into(),
                ]
            }
        })
    }

    /// Typed access to a byte vector holding a nested buffer.
    fn nested(&self, field: &FieldDef) -> Result<Vec<Member>> {
        let Some(nested) = &field.nested_flatbuffer else {
            return Ok(Vec::new());
        };
        let p = self.mapper.profile();
        let nested_def = self.mapper.schema().struct_def(nested)?;
        let type_name = self.mapper.struct_name(nested)?;
        let returns = self.mapper.optional(&type_name);
        let root = Expr::helper(
            "__indirect",
            vec![Expr::helper("__vector", vec![ident_o()])],
        );
        let assign = Expr::call(self.target(&type_name), "__assign", vec![root, runtime_bb()]);
        let body = |value: Expr| {
            vec![
                offset_local(field.offset),
                Statement::ret(Expr::cond(present("o"), value, Expr::null())),
            ]
        };

        if p.caps.object_reuse {
            let name = format!("{}As{}", camel(&field.name), nested_def.name);
            return Ok(vec![
                MethodSpec::new(&name)
                    .returns(&returns)
                    .returning(Expr::func(&name, vec![Expr::new_object(&type_name, vec![])]))
                    .into(),
                MethodSpec::new(&name)
                    .returns(&returns)
                    .param(&type_name, "obj")
                    .statements(body(assign))
                    .into(),
            ]);
        }
        let name = format!("get{}As{}", pascal(&field.name), nested_def.name);
        Ok(vec![
            MethodSpec::new(name)
                .returns(&returns)
                .statements(body(Expr::cast(&returns, assign)))
                .into(),
        ])
    }

    /// `mutate<Name>` writing a scalar, or a scalar element, in place.
    pub(super) fn mutator(&self, def: &StructDef, field: &FieldDef) -> Result<Option<Member>> {
        let element = field.ty.underlying();
        if !element.is_scalar() {
            return Ok(None);
        }
        let p = self.mapper.profile();
        let series = field.ty.is_series();

        let mut method = MethodSpec::new(format!("mutate{}", pascal(&field.name)));
        if series {
            method = method.param("int", "j");
        }
        method = method.param(self.mapper.destination_name(element)?, &field.name);

        let arg = if element.as_scalar() == Some(Scalar::Bool) {
            Expr::cast(
                "byte",
                Expr::cond(Expr::ident(&field.name), Expr::int(1), Expr::int(0)),
            )
        } else {
            Expr::ident(&field.name)
        };
        let value = Expr::cast_if(&self.mapper.source_cast(&field.ty, true), arg);
        let index = if series {
            let base = if field.ty.is_array() {
                Expr::add(bb_pos(), Expr::int(field.offset))
            } else {
                Expr::helper("__vector", vec![ident_o()])
            };
            Expr::add(
                base,
                Expr::binary(
                    Expr::ident("j"),
                    "*",
                    Expr::size(self.mapper.inline_size(element)?),
                ),
            )
        } else {
            self.inline_pos(def, field)
        };
        let write = Statement::expr(Expr::call(
            runtime_bb(),
            self.mapper.setter(element)?,
            vec![index, value],
        ));

        if def.fixed {
            return Ok(Some(method.statement(write).into()));
        }
        Ok(Some(
            method
                .returns(p.bool_type)
                .statement(offset_local(field.offset))
                .statement(Statement::if_else(
                    present("o"),
                    vec![write, Statement::ret(Expr::ident("true"))],
                    vec![Statement::ret(Expr::ident("false"))],
                ))
                .into(),
        ))
    }
}
