//! Flattening of nested fixed structs into constructor arguments.

use fbgen_core::make_camel;
use fbgen_schema::{FieldDef, StructDef, Type};

use crate::{
    Error, Result,
    builder::{Expr, ParamSpec, Statement},
    emit::{TypeMapper, builder_call},
};

/// Where a value sits inside nested fixed structs.
///
/// Each segment is one containing field. Segments that are fixed arrays add
/// a dimension to every argument below them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath {
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    name: String,
    array: bool,
}

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    /// The path one level down, inside `field`.
    pub fn child(&self, field: &FieldDef) -> Self {
        let mut segments = self.segments.clone();
        segments.push(Segment {
            name: field.name.clone(),
            array: field.ty.is_array(),
        });
        Self { segments }
    }

    /// Array dimensions enclosing this path.
    pub fn rank(&self) -> usize {
        self.segments.iter().filter(|s| s.array).count()
    }

    /// Name of the argument for `leaf`, prefixed with every containing
    /// field name so nested arguments never clash.
    pub fn argument(&self, leaf: &str) -> String {
        let mut name = String::new();
        for segment in &self.segments {
            name.push_str(&segment.name);
            name.push('_');
        }
        name.push_str(leaf);
        name
    }

    /// Loop variable counting down dimension `depth`.
    pub fn index_var(depth: usize) -> String {
        format!("_idx{depth}")
    }

    /// `arg[_idx0 - 1][_idx1 - 1]...` for `rank` dimensions.
    fn element(arg: String, rank: usize) -> Expr {
        if rank == 0 {
            return Expr::ident(arg);
        }
        let indices = (0..rank)
            .map(|depth| Expr::binary(Expr::ident(Self::index_var(depth)), "-", Expr::int(1)))
            .collect();
        Expr::index(Expr::ident(arg), indices)
    }
}

/// The fixed struct `name` nested in `parent`.
fn nested<'a>(mapper: &TypeMapper<'a>, parent: &StructDef, name: &str) -> Result<&'a StructDef> {
    let def = mapper.schema().struct_def(name)?;
    if !def.fixed {
        return Err(Error::ExpectedFixedStruct {
            name: def.qualified_name(),
            parent: parent.qualified_name(),
        });
    }
    Ok(def)
}

fn leaf_name(mapper: &TypeMapper, field: &FieldDef) -> String {
    make_camel(&field.name, mapper.profile().first_camel_upper)
}

/// One argument per scalar leaf of `def`, nested structs flattened.
pub fn struct_args(mapper: &TypeMapper, def: &StructDef, path: &FieldPath) -> Result<Vec<ParamSpec>> {
    let mut params = Vec::new();
    for field in &def.fields {
        let ty = match &field.ty {
            Type::Array { element, .. } => element.as_ref().clone(),
            other => mapper.destination_type(other, false),
        };
        if let Some(name) = ty.struct_ref() {
            let nested = nested(mapper, def, name)?;
            params.extend(struct_args(mapper, nested, &path.child(field))?);
            continue;
        }
        let rank = path.rank() + usize::from(field.ty.is_array());
        params.push(ParamSpec::array(
            mapper.basic_name(&ty, true)?,
            path.argument(&leaf_name(mapper, field)),
            rank,
        ));
    }
    Ok(params)
}

/// Statements writing `def` inline: `prep` for alignment, then fields last
/// to first with explicit padding, fixed arrays as counted loops.
pub fn struct_body(mapper: &TypeMapper, def: &StructDef, path: &FieldPath) -> Result<Vec<Statement>> {
    let mut out = vec![Statement::expr(builder_call(
        "prep",
        vec![Expr::size(def.minalign), Expr::size(def.bytesize)],
    ))];
    for field in def.fields.iter().rev() {
        if field.padding > 0 {
            out.push(Statement::expr(builder_call("pad", vec![Expr::size(field.padding)])));
        }
        match &field.ty {
            Type::Struct { name } => {
                let nested = nested(mapper, def, name)?;
                out.extend(struct_body(mapper, nested, &path.child(field))?);
            }
            Type::Array { element, length } => {
                let var = FieldPath::index_var(path.rank());
                let body = match element.struct_ref() {
                    Some(name) => {
                        let nested = nested(mapper, def, name)?;
                        struct_body(mapper, nested, &path.child(field))?
                    }
                    None => vec![put(mapper, element, path, field, path.rank() + 1)?],
                };
                out.push(Statement::For {
                    start: Expr::int(*length),
                    cond: Expr::binary(Expr::ident(&var), ">", Expr::int(0)),
                    var,
                    body,
                });
            }
            ty => out.push(put(mapper, ty, path, field, path.rank())?),
        }
    }
    Ok(out)
}

fn put(
    mapper: &TypeMapper,
    ty: &Type,
    path: &FieldPath,
    field: &FieldDef,
    rank: usize,
) -> Result<Statement> {
    let arg = FieldPath::element(path.argument(&leaf_name(mapper, field)), rank);
    let value = Expr::cast_if(&mapper.source_cast(ty, true), arg);
    Ok(Statement::expr(builder_call(
        format!("put{}", mapper.method_suffix(ty)?),
        vec![value],
    )))
}
