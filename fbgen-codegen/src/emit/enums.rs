//! Enum declarations.

use fbgen_schema::{EnumDef, EnumVal, Scalar};

use crate::{
    GenerateOptions, Result,
    builder::{
        ClassKind, ClassSpec, Declaration, EnumSpec, Expr, FieldSpec, MethodSpec, VariantSpec,
    },
};

use super::{TypeMapper, wrappers};

/// Dense value-to-name table of `def`, indexed by `value - min`.
///
/// `None` when the enum has no values or its constants are too sparse: the
/// average gap `(max - min) / count` must stay below `max_sparseness`.
/// Gaps between declared constants hold empty strings.
pub fn name_table(def: &EnumDef, max_sparseness: u64) -> Option<Vec<String>> {
    let count = def.values.len() as u128;
    if count == 0 {
        return None;
    }
    let range = def.distance();
    if range / count >= u128::from(max_sparseness) {
        return None;
    }
    let min = def.min_value()?.value;
    let mut names = vec![String::new(); usize::try_from(range).ok()? + 1];
    for val in &def.values {
        let slot = usize::try_from(val.value - min).ok()?;
        names[slot] = val.name.clone();
    }
    Some(names)
}

/// Emits one enum and, where the backend has them, its typed wrappers.
pub struct EnumEmitter<'a> {
    mapper: TypeMapper<'a>,
    options: &'a GenerateOptions,
}

impl<'a> EnumEmitter<'a> {
    pub fn new(mapper: TypeMapper<'a>, options: &'a GenerateOptions) -> Self {
        Self { mapper, options }
    }

    pub fn emit(&self, def: &EnumDef) -> Result<Vec<Declaration>> {
        let caps = self.mapper.profile().caps;
        let mut out = Vec::new();
        if caps.native_enums {
            out.push(Declaration::Enum(self.native(def)));
        } else {
            out.push(Declaration::Class(self.constants(def)));
        }
        if def.is_union && caps.union_helpers {
            out.push(wrappers::union_accessor(&self.mapper, def)?);
            out.push(wrappers::union_collection(&self.mapper, def)?);
        }
        if caps.collection_wrappers {
            out.push(wrappers::enum_vector(&self.mapper, def)?);
        }
        Ok(out)
    }

    fn native(&self, def: &EnumDef) -> EnumSpec {
        let p = self.mapper.profile();
        let mut attributes = Vec::new();
        if def.attributes.bit_flags {
            attributes.push("[System.FlagsAttribute]".to_string());
        }
        EnumSpec {
            doc: def.doc.clone(),
            attributes,
            visibility: p.visibility(def.attributes.private),
            name: def.name.clone(),
            underlying: p.keyword(def.underlying).to_string(),
            variants: def
                .values
                .iter()
                .map(|val| VariantSpec {
                    name: val.name.clone(),
                    value: self.constant(def, val),
                    doc: val.doc.clone(),
                })
                .collect(),
        }
    }

    /// A non-instantiable class of integer constants, plus the name table
    /// when the constants are dense enough.
    fn constants(&self, def: &EnumDef) -> ClassSpec {
        let p = self.mapper.profile();
        let mut class = ClassSpec::new(ClassKind::Class, &def.name);
        class.doc = def.doc.clone();
        class.visibility = p.visibility(def.attributes.private);
        class.modifiers.push(p.final_keyword.to_string());
        class.push(MethodSpec::constructor(&def.name));

        let keyword = p.keyword(def.underlying);
        for val in &def.values {
            let mut field = FieldSpec::constant(keyword, &val.name, self.constant(def, val));
            field.doc = val.doc.clone();
            class.push(field);
        }

        if let Some(names) = name_table(def, self.options.max_sparseness) {
            class.blank();
            let literal = Expr::ArrayLit(names.into_iter().map(Expr::Str).collect());
            class.push(FieldSpec::constant(
                format!("{}[]", p.string_type),
                "names",
                literal,
            ));
            class.blank();

            let index = match def.min_value() {
                Some(min) if min.value != 0 => {
                    Expr::binary(Expr::ident("e"), "-", Expr::ident(&min.name))
                }
                _ => Expr::ident("e"),
            };
            class.push(
                MethodSpec::new("name")
                    .static_()
                    .returns(p.string_type)
                    .param("int", "e")
                    .returning(Expr::index(Expr::ident("names"), vec![index])),
            );
        }
        class
    }

    /// A value's constant in the enum's underlying type.
    fn constant(&self, def: &EnumDef, val: &EnumVal) -> Expr {
        let p = self.mapper.profile();
        match def.underlying {
            Scalar::ULong if !p.has_unsigned_64 => {
                Expr::ident(format!("{}{}", val.value as u64 as i64, p.long_suffix))
            }
            Scalar::Long | Scalar::ULong => {
                Expr::ident(format!("{}{}", val.value, p.long_suffix))
            }
            _ => Expr::int(val.value),
        }
    }
}
