//! Schema types to backend type names, casts, masks and default literals.

use fbgen_core::make_camel;
use fbgen_schema::{FieldDef, Namespace, Scalar, Schema, StructDef, Type};

use crate::{
    Error, Result,
    builder::Expr,
    language::BackendProfile,
};

/// Maps resolved types for one backend, relative to the namespace the
/// declaration is being emitted into.
///
/// Every method is a pure function of its arguments and the mapper's three
/// inputs, so identical schemas always map to identical text.
#[derive(Clone, Copy)]
pub struct TypeMapper<'a> {
    profile: &'a BackendProfile,
    schema: &'a Schema,
    namespace: &'a Namespace,
}

impl<'a> TypeMapper<'a> {
    pub fn new(profile: &'a BackendProfile, schema: &'a Schema, namespace: &'a Namespace) -> Self {
        Self {
            profile,
            schema,
            namespace,
        }
    }

    pub fn profile(&self) -> &'a BackendProfile {
        self.profile
    }

    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn namespace(&self) -> &'a Namespace {
        self.namespace
    }

    /// `name` as seen from the current namespace: bare when declared in it,
    /// fully qualified otherwise.
    pub fn qualify(&self, namespace: &Namespace, name: &str) -> String {
        if namespace == self.namespace {
            name.to_string()
        } else {
            namespace.qualify(name)
        }
    }

    pub fn struct_name(&self, qualified: &str) -> Result<String> {
        let def = self.schema.struct_def(qualified)?;
        Ok(self.qualify(&def.namespace, &def.name))
    }

    pub fn enum_name(&self, qualified: &str) -> Result<String> {
        let def = self.schema.enum_def(qualified)?;
        Ok(self.qualify(&def.namespace, &def.name))
    }

    /// A name declared next to an enum, such as its vector wrapper.
    pub fn enum_sibling(&self, qualified: &str, prefix: &str) -> Result<String> {
        let def = self.schema.enum_def(qualified)?;
        Ok(self.qualify(&def.namespace, &format!("{prefix}{}", def.name)))
    }

    /// Type handed to builder methods: the scalar keyword or an offset type.
    ///
    /// With `overrides`, native enums name the enum and table references
    /// are typed offsets where the backend has them.
    pub fn basic_name(&self, ty: &Type, overrides: bool) -> Result<String> {
        let p = self.profile;
        Ok(match ty {
            Type::Scalar { scalar, .. } => match ty.enum_ref() {
                Some(name) if overrides && p.caps.native_enums => self.enum_name(name)?,
                _ => p.keyword(*scalar).to_string(),
            },
            Type::String => p.refs.string_offset.to_string(),
            Type::Vector { .. } => p.refs.vector_offset.to_string(),
            Type::Struct { name } if overrides && p.caps.generic_offsets => {
                format!("Offset<{}>", self.struct_name(name)?)
            }
            Type::Array { .. } | Type::Struct { .. } | Type::Union { .. } => "int".to_string(),
        })
    }

    /// Type an accessor returns for `ty`, element type for series.
    pub fn type_get(&self, ty: &Type) -> Result<String> {
        match ty {
            Type::Scalar { .. } => self.basic_name(ty, true),
            Type::String => Ok(self.profile.string_type.to_string()),
            Type::Vector { element } | Type::Array { element, .. } => self.type_get(element),
            Type::Struct { name } => self.struct_name(name),
            Type::Union { .. } => Ok(self.profile.refs.union_table.to_string()),
        }
    }

    /// The type a value is read into. Backends without unsigned types widen
    /// unsigned scalars; `in_vector` applies the rule to series elements.
    pub fn destination_type(&self, ty: &Type, in_vector: bool) -> Type {
        if self.profile.widening.is_empty() {
            return ty.clone();
        }
        match ty {
            Type::Scalar { scalar, .. } => match self.profile.widening_for(*scalar) {
                Some(rule) => Type::scalar(rule.to),
                None => ty.clone(),
            },
            Type::Vector { element } | Type::Array { element, .. } if in_vector => {
                self.destination_type(element, in_vector)
            }
            _ => ty.clone(),
        }
    }

    pub fn destination_name(&self, ty: &Type) -> Result<String> {
        self.type_get(&self.destination_type(ty, true))
    }

    /// Mask literal clearing the sign-extended bits a widened read brings in.
    pub fn destination_mask(&self, ty: &Type, in_vector: bool) -> Option<&'static str> {
        match ty {
            Type::Scalar { scalar, .. } => self.profile.widening_for(*scalar).map(|w| w.mask),
            Type::Vector { element } | Type::Array { element, .. } if in_vector => {
                self.destination_mask(element, in_vector)
            }
            _ => None,
        }
    }

    /// Cast applied to a raw read, empty when none is needed.
    pub fn destination_cast(&self, ty: &Type) -> Result<String> {
        if let Some(element) = ty.element() {
            return self.destination_cast(element);
        }
        if let Some(rule) = ty.as_scalar().and_then(|s| self.profile.widening_for(s)) {
            return Ok(rule.read_cast.to_string());
        }
        match ty.enum_ref() {
            Some(name) if self.profile.caps.native_enums => self.enum_name(name),
            _ => Ok(String::new()),
        }
    }

    /// Cast narrowing a caller's value to its stored width, empty when none
    /// is needed. `from_destination` means the value has the widened type.
    pub fn source_cast(&self, ty: &Type, from_destination: bool) -> String {
        if let Some(element) = ty.element() {
            return self.source_cast(element, from_destination);
        }
        let Some(scalar) = ty.as_scalar() else {
            return String::new();
        };
        if from_destination && let Some(rule) = self.profile.widening_for(scalar) {
            return rule.narrow.to_string();
        }
        if self.profile.caps.native_enums && ty.enum_ref().is_some() {
            return self.profile.keyword(scalar).to_string();
        }
        String::new()
    }

    /// [`source_cast`](Self::source_cast) for scalars only.
    pub fn source_cast_basic(&self, ty: &Type, from_destination: bool) -> String {
        if ty.is_scalar() {
            self.source_cast(ty, from_destination)
        } else {
            String::new()
        }
    }

    /// The field's declared default as a literal of its destination type.
    pub fn default_value(&self, field: &FieldDef, overrides: bool) -> Result<String> {
        let p = self.profile;
        let Some(scalar) = field.ty.as_scalar() else {
            return Ok("0".to_string());
        };
        let text = field.default.trim();
        if overrides
            && p.caps.native_enums
            && let Some(name) = field.ty.enum_ref()
        {
            return self.enum_default(field, name, text);
        }
        match scalar {
            Scalar::Bool => Ok(if matches!(text, "0" | "false") {
                "false".to_string()
            } else {
                "true".to_string()
            }),
            Scalar::ULong if !p.has_unsigned_64 => {
                let bits = text
                    .parse::<u64>()
                    .map_err(|_| invalid_default(field, "unsigned 64-bit"))?;
                Ok(format!("{}{}", bits as i64, p.long_suffix))
            }
            Scalar::UInt | Scalar::Long => {
                parse_integer(field, text)?;
                Ok(format!("{text}{}", p.long_suffix))
            }
            Scalar::Float | Scalar::Double => self.float_default(field, scalar, text),
            _ => {
                parse_integer(field, text)?;
                Ok(text.to_string())
            }
        }
    }

    fn enum_default(&self, field: &FieldDef, name: &str, text: &str) -> Result<String> {
        let def = self.schema.enum_def(name)?;
        let value = parse_integer(field, text)?;
        let enum_name = self.qualify(&def.namespace, &def.name);
        Ok(match def.find_by_value(value) {
            Some(val) => format!("{enum_name}.{}", val.name),
            None => format!("({enum_name}){value}"),
        })
    }

    fn float_default(&self, field: &FieldDef, scalar: Scalar, text: &str) -> Result<String> {
        let floats = &self.profile.floats;
        let class = if scalar == Scalar::Float {
            floats.float_class
        } else {
            floats.double_class
        };
        let value: f64 = text
            .parse()
            .map_err(|_| invalid_default(field, "floating point"))?;
        if value.is_nan() {
            return Ok(format!("{class}.{}", floats.nan));
        }
        if value.is_infinite() {
            let name = if value > 0.0 {
                floats.positive_infinity
            } else {
                floats.negative_infinity
            };
            return Ok(format!("{class}.{name}"));
        }
        let mut literal = text.to_string();
        if !literal.contains(['.', 'e', 'E']) {
            literal.push_str(".0");
        }
        if scalar == Scalar::Float {
            literal.push('f');
        }
        Ok(literal)
    }

    /// Default of a builder parameter. Offsets get typed defaults where the
    /// backend has typed offsets.
    pub fn default_value_basic(&self, field: &FieldDef, overrides: bool) -> Result<String> {
        if field.ty.is_scalar() {
            return self.default_value(field, overrides);
        }
        let p = self.profile;
        if overrides && p.caps.generic_offsets {
            match &field.ty {
                Type::String => return Ok(format!("default({})", p.refs.string_offset)),
                Type::Vector { .. } => return Ok(format!("default({})", p.refs.vector_offset)),
                Type::Struct { name } => {
                    return Ok(format!("default(Offset<{}>)", self.struct_name(name)?));
                }
                _ => {}
            }
        }
        Ok("0".to_string())
    }

    /// Read a scalar of type `ty` from `buffer` at `pos`, without casts.
    pub fn read(&self, ty: &Type, buffer: Expr, pos: Expr) -> Result<Expr> {
        let scalar = scalar_of(ty)?;
        let keyword = self.profile.keyword(scalar);
        let method = if keyword == "byte" || scalar == Scalar::Bool {
            "get".to_string()
        } else {
            format!("get{}", make_camel(keyword, true))
        };
        let call = Expr::call(buffer, method, vec![pos]);
        Ok(if scalar == Scalar::Bool {
            Expr::binary(Expr::int(0), "!=", call)
        } else {
            call
        })
    }

    /// [`read`](Self::read) with the destination cast and mask applied.
    pub fn read_dest(&self, ty: &Type, buffer: Expr, pos: Expr) -> Result<Expr> {
        let read = Expr::cast_if(&self.destination_cast(ty)?, self.read(ty, buffer, pos)?);
        Ok(match self.destination_mask(ty, true) {
            Some(mask) => Expr::binary(read, "&", Expr::ident(mask)),
            None => read,
        })
    }

    /// Buffer method writing a scalar in place.
    pub fn setter(&self, ty: &Type) -> Result<String> {
        let scalar = scalar_of(ty)?;
        let keyword = self.profile.keyword(scalar);
        Ok(if keyword == "byte" || scalar == Scalar::Bool {
            "put".to_string()
        } else {
            format!("put{}", make_camel(keyword, true))
        })
    }

    /// Suffix of the builder's `add`/`put` methods for `ty`.
    pub fn method_suffix(&self, ty: &Type) -> Result<String> {
        if let Some(scalar) = ty.as_scalar() {
            return Ok(make_camel(self.profile.keyword(scalar), true));
        }
        Ok(if self.schema.is_fixed_struct(ty)? {
            "Struct".to_string()
        } else {
            "Offset".to_string()
        })
    }

    /// Offset type returned when building `def`.
    pub fn offset_type(&self, def: &StructDef) -> String {
        if self.profile.caps.generic_offsets {
            format!("Offset<{}>", self.qualify(&def.namespace, &def.name))
        } else {
            "int".to_string()
        }
    }

    /// Wrap a raw offset expression in the backend's offset type.
    pub fn offset_construct(&self, def: &StructDef, raw: Expr) -> Expr {
        if self.profile.caps.generic_offsets {
            Expr::new_object(self.offset_type(def), vec![raw])
        } else {
            raw
        }
    }

    /// Vector wrapper type over elements of type `element`.
    pub fn vector_type(&self, element: &Type) -> Result<String> {
        const BASE: &str = "FlatBufferVectorOf";
        if let Some(name) = element.enum_ref() {
            return self.enum_sibling(name, BASE);
        }
        Ok(match element {
            Type::Scalar { scalar, .. } => {
                format!("{BASE}{}", make_camel(self.profile.keyword(*scalar), true))
            }
            Type::String => format!("{BASE}String"),
            Type::Vector { element } | Type::Array { element, .. } => {
                format!("{BASE}Vector<{}>", self.vector_type(element)?)
            }
            Type::Struct { name } => {
                let def = self.schema.struct_def(name)?;
                if def.fixed {
                    self.qualify(&def.namespace, &format!("{BASE}{}", def.name))
                } else {
                    format!("{BASE}Table<{}>", self.qualify(&def.namespace, &def.name))
                }
            }
            Type::Union { name } => {
                let def = self.schema.enum_def(name)?;
                format!("FlatBufferUnionCollectionOf{}", def.name)
            }
        })
    }

    /// Read-only collection type exposing elements of type `element`.
    pub fn collection_type(&self, element: &Type) -> Result<String> {
        const BASE: &str = "FlatBufferReadOnlyCollection";
        Ok(match element {
            Type::Vector { element } => format!("{BASE}<{}>", self.collection_type(element)?),
            Type::Union { name } => format!(
                "{BASE}<{}, {}>",
                self.enum_sibling(name, "FlatBufferUnionOf")?,
                self.vector_type(element)?
            ),
            _ => format!(
                "{BASE}<{}, {}>",
                self.type_get(element)?,
                self.vector_type(element)?
            ),
        })
    }

    pub fn inline_size(&self, ty: &Type) -> Result<usize> {
        Ok(self.schema.inline_size(ty)?)
    }

    pub fn inline_alignment(&self, ty: &Type) -> Result<usize> {
        Ok(self.schema.inline_alignment(ty)?)
    }

    /// Whether `ty` is stored inline as a fixed struct.
    pub fn is_fixed_struct(&self, ty: &Type) -> Result<bool> {
        Ok(self.schema.is_fixed_struct(ty)?)
    }

    /// Optional-type suffix where the backend marks nullable value types.
    pub fn optional(&self, name: &str) -> String {
        format!("{name}{}", self.profile.optional_suffix)
    }
}

fn parse_integer(field: &FieldDef, text: &str) -> Result<i128> {
    text.parse::<i128>()
        .map_err(|_| invalid_default(field, "integer"))
}

/// Scalar stored for `ty`, looking through series to their elements.
fn scalar_of(ty: &Type) -> Result<Scalar> {
    ty.underlying().as_scalar().ok_or_else(|| Error::NotScalar {
        ty: format!("{ty:?}"),
    })
}

fn invalid_default(field: &FieldDef, expected: &'static str) -> Error {
    Error::InvalidDefault {
        field: field.name.clone(),
        value: field.default.clone(),
        expected,
    }
}
