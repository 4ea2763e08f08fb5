//! Static builder methods: `create`, `start`, `add`, vector helpers,
//! `end` and `finish`.

use fbgen_schema::{FieldDef, StructDef, Type};

use super::{
    BuildPlan, FieldPath, StructEmitter, camel, pascal,
    path::{struct_args, struct_body},
};
use crate::{
    Result,
    builder::{ClassSpec, Expr, MethodSpec, ParamSpec, Statement},
    emit::builder_call,
};

/// Parameter limit of one-shot table constructors. The JVM caps a method
/// at 255 parameter slots and 64-bit values take two.
const MAX_CREATE_PARAMS: usize = 127;

fn builder() -> Expr {
    Expr::ident("builder")
}

fn builder_method(name: impl Into<String>) -> MethodSpec {
    MethodSpec::new(name)
        .static_()
        .param("FlatBufferBuilder", "builder")
}

impl StructEmitter<'_> {
    /// `create<Name>` of a fixed struct, taking every scalar leaf.
    pub(super) fn create_struct(&self, def: &StructDef) -> Result<MethodSpec> {
        let p = self.mapper.profile();
        let root = FieldPath::root();
        let mut method = builder_method(format!("create{}", def.name)).returns(self.mapper.offset_type(def));
        for param in struct_args(&self.mapper, def, &root)? {
            method = method.param_spec(param);
        }
        let offset = Expr::member(builder(), p.builder_offset);
        Ok(method
            .statements(struct_body(&self.mapper, def, &root)?)
            .returning(self.mapper.offset_construct(def, offset))
            .block())
    }

    pub(super) fn table_builders(&self, def: &StructDef, class: &mut ClassSpec) -> Result<()> {
        if let Some(create) = self.create_table(def)? {
            class.push(create);
            class.blank();
        }
        class.push(
            builder_method(format!("start{}", def.name)).statement(Statement::expr(builder_call(
                "startTable",
                vec![Expr::size(def.fields.len())],
            ))),
        );
        for (index, field) in def.fields.iter().enumerate() {
            if field.deprecated {
                continue;
            }
            class.push(self.add_field(index, field)?);
            if field.ty.is_vector() {
                for method in self.vector_builders(field)? {
                    class.push(method);
                }
            }
        }
        class.push(self.end_table(def));
        if self.mapper.schema().is_root(def) {
            for prefix in ["", "SizePrefixed"] {
                class.push(self.finish(def, prefix));
            }
        }
        Ok(())
    }

    /// One-shot table constructor, when every field can be passed as an
    /// argument.
    fn create_table(&self, def: &StructDef) -> Result<Option<MethodSpec>> {
        let p = self.mapper.profile();
        let inline_structs = p.caps.inline_struct_create;
        let mut fixed = Vec::new();
        for field in def.live_fields() {
            if self.mapper.is_fixed_struct(&field.ty)? {
                fixed.push(field);
            }
        }
        if (!inline_structs && !fixed.is_empty()) || def.live_fields().count() >= MAX_CREATE_PARAMS {
            return Ok(None);
        }

        let mut method = builder_method(format!("create{}", def.name)).returns(self.mapper.offset_type(def));
        for field in &fixed {
            let generic = format!("T{}", pascal(&field.name));
            let target = field.ty.struct_ref().map(|n| self.mapper.struct_name(n)).transpose()?;
            method = method.generic(&generic).bound(format!(
                "{generic} : IFlatbufferConvertible<{}>",
                target.unwrap_or_default()
            ));
        }
        for field in def.live_fields() {
            let param = if self.mapper.is_fixed_struct(&field.ty)? {
                let generic = format!("T{}", pascal(&field.name));
                ParamSpec::new(&generic, &field.name).with_default(Expr::Default(generic))
            } else {
                let ty = self
                    .mapper
                    .basic_name(&self.mapper.destination_type(&field.ty, false), true)?;
                ParamSpec::new(ty, create_arg(field))
                    .with_default(Expr::ident(self.mapper.default_value_basic(field, true)?))
            };
            method = method.param_spec(param);
        }

        method = method.statement(Statement::expr(builder_call(
            "startTable",
            vec![Expr::size(def.fields.len())],
        )));
        for field in BuildPlan::new(def).slots() {
            let value = if self.mapper.is_fixed_struct(&field.ty)? {
                Expr::call(Expr::ident(&field.name), "write", vec![builder()])
            } else {
                Expr::ident(create_arg(field))
            };
            method = method.statement(Statement::expr(Expr::call(
                Expr::ident(&def.name),
                format!("add{}", pascal(&field.name)),
                vec![builder(), value],
            )));
        }
        Ok(Some(
            method
                .returning(Expr::call(
                    Expr::ident(&def.name),
                    format!("end{}", def.name),
                    vec![builder()],
                ))
                .block(),
        ))
    }

    /// `add<Field>` storing one slot; `index` counts deprecated fields too.
    fn add_field(&self, index: usize, field: &FieldDef) -> Result<MethodSpec> {
        let p = self.mapper.profile();
        let ty = &field.ty;
        let arg = if ty.is_scalar() {
            camel(&field.name)
        } else {
            format!("{}Offset", camel(&field.name))
        };
        let cast = self.mapper.source_cast_basic(ty, true);
        let mut value = Expr::cast_if(&cast, Expr::ident(&arg));
        if p.caps.generic_offsets && !ty.is_scalar() && !ty.is_union() {
            value = Expr::member(value, "Value");
        }
        let default = Expr::ident(self.mapper.default_value(field, false)?);
        let default = if p.caps.narrow_literals {
            Expr::cast_if(&cast, default)
        } else {
            default
        };
        let param_type = self
            .mapper
            .basic_name(&self.mapper.destination_type(ty, false), true)?;
        Ok(builder_method(format!("add{}", pascal(&field.name)))
            .param(param_type, &arg)
            .statement(Statement::expr(builder_call(
                format!("add{}", self.mapper.method_suffix(ty)?),
                vec![Expr::size(index), value, default],
            ))))
    }

    /// `create<Field>Vector` variants and `start<Field>Vector`.
    fn vector_builders(&self, field: &FieldDef) -> Result<Vec<MethodSpec>> {
        let Some(element) = field.ty.element() else {
            return Ok(Vec::new());
        };
        let p = self.mapper.profile();
        let size = self.mapper.inline_size(element)?;
        let alignment = self.mapper.inline_alignment(element)?;
        let vector_offset = p.refs.vector_offset;
        let create = format!("create{}Vector", pascal(&field.name));
        let data = || Expr::ident("data");
        let start = |count: Expr| {
            Statement::expr(builder_call(
                "startVector",
                vec![Expr::size(size), count, Expr::size(alignment)],
            ))
        };
        let end = || Expr::call(builder(), "endVector", vec![]);
        let count = || Expr::member(data(), p.count_member);
        let backward = |body: Statement| Statement::For {
            var: "i".to_string(),
            start: Expr::binary(count(), "-", Expr::int(1)),
            cond: Expr::binary(Expr::ident("i"), ">=", Expr::int(0)),
            body: vec![body],
        };

        let mut out = Vec::new();
        if !self.mapper.is_fixed_struct(element)? {
            let element_type = self.mapper.basic_name(element, true)?;
            let mut value = Expr::cast_if(
                &self.mapper.source_cast_basic(element, false),
                Expr::index(data(), vec![Expr::ident("i")]),
            );
            if p.caps.generic_offsets && matches!(element, Type::Struct { .. } | Type::String) {
                value = Expr::member(value, "Value");
            }
            let add = Statement::expr(builder_call(
                format!("add{}", self.mapper.method_suffix(element)?),
                vec![value],
            ));
            let method = if p.caps.generic_offsets {
                builder_method(&create)
                    .generic("TList")
                    .param("TList", "data")
                    .bound(format!("TList : IList<{element_type}>"))
            } else {
                builder_method(&create).param_spec(ParamSpec::array(&element_type, "data", 1))
            };
            out.push(
                method
                    .returns(vector_offset)
                    .statement(start(count()))
                    .statement(backward(add))
                    .returning(end()),
            );

            if p.caps.block_copy && element.is_scalar() && element.enum_ref().is_none() {
                let block = format!("{create}Block");
                let copy = || Statement::expr(builder_call("add", vec![data()]));
                out.push(
                    builder_method(&block)
                        .returns(vector_offset)
                        .param_spec(ParamSpec::array(&element_type, "data", 1))
                        .statement(start(Expr::member(data(), p.array_length_member)))
                        .statement(copy())
                        .returning(end()),
                );
                out.push(
                    builder_method(&block)
                        .returns(vector_offset)
                        .param(format!("ArraySegment<{element_type}>"), "data")
                        .statement(start(count()))
                        .statement(copy())
                        .returning(end()),
                );
            }
        } else if p.caps.inline_struct_create {
            let element_type = self.mapper.type_get(element)?;
            let write = Statement::expr(Expr::call(
                Expr::index(data(), vec![Expr::ident("i")]),
                "write",
                vec![builder()],
            ));
            out.push(
                builder_method(&create)
                    .returns(vector_offset)
                    .generic("T")
                    .generic("TList")
                    .param("TList", "data")
                    .bound("TList : IList<T>")
                    .bound(format!("T : IFlatbufferConvertible<{element_type}>"))
                    .statement(start(count()))
                    .statement(backward(write))
                    .returning(end()),
            );
        }

        out.push(
            builder_method(format!("start{}Vector", pascal(&field.name)))
                .param("int", "numElems")
                .statement(start(Expr::ident("numElems"))),
        );
        Ok(out)
    }

    /// `end<Name>`, checking required fields.
    fn end_table(&self, def: &StructDef) -> MethodSpec {
        let mut method = builder_method(format!("end{}", def.name))
            .returns(self.mapper.offset_type(def))
            .statement(Statement::local(
                "int",
                "o",
                Expr::call(builder(), "endTable", vec![]),
            ));
        for field in def.live_fields().filter(|f| f.required) {
            method = method.statement(Statement::commented(
                Statement::expr(builder_call(
                    "required",
                    vec![Expr::ident("o"), Expr::int(field.offset)],
                )),
                &field.name,
            ));
        }
        method
            .returning(self.mapper.offset_construct(def, Expr::ident("o")))
            .block()
    }

    fn finish(&self, def: &StructDef, prefix: &str) -> MethodSpec {
        let p = self.mapper.profile();
        let offset = if p.caps.generic_offsets {
            Expr::member(Expr::ident("offset"), "Value")
        } else {
            Expr::ident("offset")
        };
        let mut args = vec![offset];
        if let Some(identifier) = &self.mapper.schema().file_identifier {
            args.push(Expr::str(identifier));
        }
        builder_method(format!("finish{prefix}{}Buffer", def.name))
            .param(self.mapper.offset_type(def), "offset")
            .statement(Statement::expr(builder_call(format!("finish{prefix}"), args)))
    }
}

/// Argument name in the one-shot constructor: the schema name, with an
/// `Offset` suffix for values built beforehand.
fn create_arg(field: &FieldDef) -> String {
    if field.ty.is_scalar() {
        field.name.clone()
    } else {
        format!("{}Offset", field.name)
    }
}
