//! Deep copy of an accessor's object into another builder.

use fbgen_schema::{FieldDef, StructDef, Type};

use super::{BuildPlan, StructEmitter, camel, pascal};
use crate::{
    Error, Result,
    builder::{Expr, MethodSpec, Statement},
    emit::builder_call,
};

fn builder() -> Expr {
    Expr::ident("builder")
}

impl StructEmitter<'_> {
    /// `clone(builder)`. Fixed structs copy their bytes; tables copy every
    /// sub-object first, then start the table and add each slot.
    pub(super) fn clone_method(&self, def: &StructDef) -> Result<MethodSpec> {
        let p = self.mapper.profile();
        let method = MethodSpec::new("clone")
            .returns(self.mapper.offset_type(def))
            .param("FlatBufferBuilder", "builder")
            .block();

        if def.fixed {
            return Ok(method
                .statement(Statement::expr(builder_call(
                    "prep",
                    vec![Expr::size(def.minalign), Expr::size(def.bytesize)],
                )))
                .statement(Statement::expr(builder_call(
                    "putBytesFrom",
                    vec![
                        Expr::runtime("bb"),
                        Expr::runtime("bb_pos"),
                        Expr::size(def.bytesize),
                    ],
                )))
                .returning(
                    self.mapper
                        .offset_construct(def, Expr::member(builder(), p.builder_offset)),
                ));
        }

        let plan = BuildPlan::new(def);
        let mut body = Vec::new();
        for field in plan.offsets(&self.mapper)? {
            body.extend(self.clone_offset(def, field)?);
        }
        body.push(Statement::expr(builder_call(
            "startTable",
            vec![Expr::size(def.fields.len())],
        )));
        for field in plan.slots() {
            let value = if field.ty.is_scalar() {
                Expr::SelfMember(camel(&field.name))
            } else {
                // Fixed structs are written inline, so they are copied between
                // startTable and their slot add.
                if let Some(name) = field.ty.struct_ref()
                    && self.mapper.is_fixed_struct(&field.ty)?
                {
                    body.extend(self.clone_inline(field, name)?);
                }
                Expr::ident(offset_name(field))
            };
            body.push(Statement::expr(Expr::call(
                Expr::ident(&def.name),
                format!("add{}", pascal(&field.name)),
                vec![builder(), value],
            )));
        }
        Ok(method.statements(body).returning(Expr::call(
            Expr::ident(&def.name),
            format!("end{}", def.name),
            vec![builder()],
        )))
    }

    /// Copy one sub-object into `builder`, keeping its offset in a local.
    /// Inline values have nothing to copy.
    fn clone_offset(&self, def: &StructDef, field: &FieldDef) -> Result<Option<Statement>> {
        let p = self.mapper.profile();
        let slot = || Expr::int(field.offset);
        let name = offset_name(field);
        Ok(Some(match &field.ty {
            Type::String => Statement::local(
                p.refs.string_offset,
                name,
                Expr::helper("__clone_string", vec![builder(), slot()]),
            ),
            Type::Vector { element } if element.is_union() => {
                let type_field = def.union_type_field(field).ok_or_else(|| Error::MissingUnionType {
                    table: def.qualified_name(),
                    field: field.name.clone(),
                })?;
                Statement::local(
                    p.refs.vector_offset,
                    name,
                    Expr::helper(
                        "__clone_vector_union",
                        vec![builder(), Expr::int(type_field.offset), slot()],
                    )
                    .with_generics(vec![self.mapper.vector_type(element)?]),
                )
            }
            Type::Vector { element } => Statement::local(
                p.refs.vector_offset,
                name,
                Expr::helper("__clone_vector", vec![builder(), slot()])
                    .with_generics(vec![self.mapper.vector_type(element)?]),
            ),
            Type::Struct { name: table } => {
                let target = self.mapper.schema().struct_def(table)?;
                Statement::local(
                    self.mapper.offset_type(target),
                    name,
                    Expr::helper("__clone_table", vec![builder(), slot()])
                        .with_generics(vec![self.mapper.struct_name(table)?]),
                )
            }
            Type::Union { name: union } => Statement::local(
                "int",
                name,
                Expr::helper(
                    "__clone_union",
                    vec![
                        builder(),
                        Expr::SelfMember(format!("{}Type", camel(&field.name))),
                        slot(),
                    ],
                )
                .with_generics(vec![
                    self.mapper.enum_name(union)?,
                    self.mapper.enum_sibling(union, "FlatBufferUnionOf")?,
                ]),
            ),
            Type::Scalar { .. } | Type::Array { .. } => return Ok(None),
        }))
    }

    /// An inline struct field is optional on read; absent ones add a
    /// default offset.
    fn clone_inline(&self, field: &FieldDef, qualified: &str) -> Result<Vec<Statement>> {
        let struct_name = self.mapper.struct_name(qualified)?;
        let target = self.mapper.schema().struct_def(qualified)?;
        let optional = format!("{}Optional", camel(&field.name));
        let offset_type = self.mapper.offset_type(target);
        Ok(vec![
            Statement::local(
                self.mapper.optional(&struct_name),
                &optional,
                Expr::SelfMember(camel(&field.name)),
            ),
            Statement::local(
                &offset_type,
                offset_name(field),
                Expr::cond(
                    Expr::member(Expr::ident(&optional), "HasValue"),
                    Expr::call(
                        Expr::member(Expr::ident(&optional), "Value"),
                        "clone",
                        vec![builder()],
                    ),
                    Expr::Default(offset_type.clone()),
                ),
            ),
        ])
    }
}

fn offset_name(field: &FieldDef) -> String {
    format!("{}Offset", camel(&field.name))
}
