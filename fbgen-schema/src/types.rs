//! Resolved field types.

use serde::{Deserialize, Serialize};

/// Scalar base types, named as in the schema language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scalar {
    Bool,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    /// Discriminant companion of a union field. Stored as an unsigned
    /// byte but never widened.
    UType,
}

impl Scalar {
    /// Size in bytes when stored inline.
    pub fn size(self) -> usize {
        match self {
            Self::Bool | Self::Byte | Self::UByte | Self::UType => 1,
            Self::Short | Self::UShort => 2,
            Self::Int | Self::UInt | Self::Float => 4,
            Self::Long | Self::ULong | Self::Double => 8,
        }
    }

    pub fn is_float(self) -> bool {
        matches!(self, Self::Float | Self::Double)
    }

    pub fn is_integer(self) -> bool {
        !self.is_float() && self != Self::Bool
    }
}

/// A fully resolved type. Struct, enum and union references carry the
/// qualified name of their definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Type {
    Scalar {
        scalar: Scalar,
        #[serde(default, rename = "enum", skip_serializing_if = "Option::is_none")]
        enum_ref: Option<String>,
    },
    String,
    Vector {
        element: Box<Type>,
    },
    Array {
        element: Box<Type>,
        length: u16,
    },
    /// Reference to a fixed struct or a table.
    Struct {
        name: String,
    },
    /// Union payload; `name` is the union enum.
    Union {
        name: String,
    },
}

impl Type {
    pub fn scalar(scalar: Scalar) -> Self {
        Self::Scalar {
            scalar,
            enum_ref: None,
        }
    }

    pub fn enumeration(scalar: Scalar, name: impl Into<String>) -> Self {
        Self::Scalar {
            scalar,
            enum_ref: Some(name.into()),
        }
    }

    pub fn vector(element: Type) -> Self {
        Self::Vector {
            element: Box::new(element),
        }
    }

    pub fn array(element: Type, length: u16) -> Self {
        Self::Array {
            element: Box::new(element),
            length,
        }
    }

    pub fn structure(name: impl Into<String>) -> Self {
        Self::Struct { name: name.into() }
    }

    pub fn union(name: impl Into<String>) -> Self {
        Self::Union { name: name.into() }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar { scalar, .. } => Some(*scalar),
            _ => None,
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar { .. })
    }

    /// Vectors and fixed arrays.
    pub fn is_series(&self) -> bool {
        matches!(self, Self::Vector { .. } | Self::Array { .. })
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array { .. })
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector { .. })
    }

    /// Element type of a vector or array.
    pub fn element(&self) -> Option<&Type> {
        match self {
            Self::Vector { element } | Self::Array { element, .. } => Some(element),
            _ => None,
        }
    }

    /// The element type for series, the type itself otherwise.
    pub fn underlying(&self) -> &Type {
        self.element().unwrap_or(self)
    }

    /// Enum backing an integer scalar, if any.
    pub fn enum_ref(&self) -> Option<&str> {
        match self {
            Self::Scalar {
                scalar,
                enum_ref: Some(name),
            } if scalar.is_integer() => Some(name),
            _ => None,
        }
    }

    /// Enum attached to this type or, for series, to its element.
    pub fn any_enum_ref(&self) -> Option<&str> {
        match self {
            Self::Union { name } => Some(name),
            _ => self.underlying().enum_ref(),
        }
    }

    pub fn struct_ref(&self) -> Option<&str> {
        match self {
            Self::Struct { name } => Some(name),
            _ => None,
        }
    }

    pub fn is_union(&self) -> bool {
        matches!(self, Self::Union { .. })
    }

    /// Size class used when grouping table fields by size: the scalar width,
    /// or the 4-byte offset every reference occupies in a table.
    pub fn size_class(&self) -> usize {
        match self {
            Self::Scalar { scalar, .. } => scalar.size(),
            _ => 4,
        }
    }
}
