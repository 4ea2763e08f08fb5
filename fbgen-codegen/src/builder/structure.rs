//! Type declarations: classes, native enums and their members.

use super::{Expr, MethodSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
    Protected,
    Internal,
    /// Java package-private: no modifier at all.
    Package,
}

impl Visibility {
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Internal => "internal",
            Self::Package => "",
        }
    }
}

/// A data member.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub doc: Vec<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_final: bool,
    pub ty: String,
    pub name: String,
    pub value: Option<Expr>,
}

impl FieldSpec {
    pub fn new(visibility: Visibility, ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            doc: Vec::new(),
            visibility,
            is_static: false,
            is_final: false,
            ty: ty.into(),
            name: name.into(),
            value: None,
        }
    }

    /// A `static final` constant.
    pub fn constant(ty: impl Into<String>, name: impl Into<String>, value: Expr) -> Self {
        Self {
            doc: Vec::new(),
            visibility: Visibility::Public,
            is_static: true,
            is_final: true,
            ty: ty.into(),
            name: name.into(),
            value: Some(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Field(FieldSpec),
    Method(MethodSpec),
    /// Members compiled only when `symbol` is defined.
    Conditional {
        symbol: String,
        then: Vec<Member>,
        otherwise: Vec<Member>,
    },
    Blank,
}

impl From<MethodSpec> for Member {
    fn from(method: MethodSpec) -> Self {
        Self::Method(method)
    }
}

impl From<FieldSpec> for Member {
    fn from(field: FieldSpec) -> Self {
        Self::Field(field)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    /// A value type (C# `struct`).
    Struct,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassSpec {
    pub doc: Vec<String>,
    /// Attribute lines above the declaration.
    pub attributes: Vec<String>,
    pub visibility: Visibility,
    /// Modifiers after the visibility, such as `final` or `partial`.
    pub modifiers: Vec<String>,
    pub kind: ClassKind,
    pub name: String,
    pub base: Option<String>,
    pub interfaces: Vec<String>,
    pub members: Vec<Member>,
}

impl ClassSpec {
    pub fn new(kind: ClassKind, name: impl Into<String>) -> Self {
        Self {
            doc: Vec::new(),
            attributes: Vec::new(),
            visibility: Visibility::Public,
            modifiers: Vec::new(),
            kind,
            name: name.into(),
            base: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn push(&mut self, member: impl Into<Member>) {
        self.members.push(member.into());
    }

    /// Separate member groups. Never leads and never doubles up.
    pub fn blank(&mut self) {
        if !matches!(self.members.last(), None | Some(Member::Blank)) {
            self.members.push(Member::Blank);
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariantSpec {
    pub name: String,
    pub value: Expr,
    pub doc: Vec<String>,
}

/// A native enum declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSpec {
    pub doc: Vec<String>,
    pub attributes: Vec<String>,
    pub visibility: Visibility,
    pub name: String,
    pub underlying: String,
    pub variants: Vec<VariantSpec>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Class(ClassSpec),
    Enum(EnumSpec),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Self::Class(class) => &class.name,
            Self::Enum(spec) => &spec.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_keywords() {
        assert_eq!(Visibility::Public.keyword(), "public");
        assert_eq!(Visibility::Internal.keyword(), "internal");
        assert_eq!(Visibility::Package.keyword(), "");
    }

    #[test]
    fn test_class_members() {
        let mut class = ClassSpec::new(ClassKind::Class, "Color");
        class.push(MethodSpec::constructor("Color"));
        class.blank();
        class.push(FieldSpec::constant("byte", "Red", Expr::int(0)));
        assert_eq!(class.members.len(), 3);
        assert!(matches!(class.members[1], Member::Blank));

        let decl = Declaration::Class(class);
        assert_eq!(decl.name(), "Color");
    }
}
