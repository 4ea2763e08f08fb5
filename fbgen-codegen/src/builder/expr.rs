//! Expression and statement trees.
//!
//! Trees only carry structure. Spelling (helper prefixes, method case,
//! brace placement, index syntax) is decided by a
//! [`Renderer`](crate::language::Renderer).

/// Which runtime prefix a helper call goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperScope {
    /// Called on the accessor's runtime object (`__p.` in C#).
    Instance,
    /// Called on the runtime class (`Table.` in C#).
    Static,
}

/// An expression in generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Identifier or pre-rendered literal, emitted verbatim.
    Ident(String),
    Int(i128),
    /// String literal; quoted on output.
    Str(String),
    /// A runtime member such as `bb_pos` or `bb`, behind the accessor prefix.
    Runtime(String),
    /// A runtime helper call such as `__offset(4)`.
    Helper {
        name: String,
        scope: HelperScope,
        generics: Vec<String>,
        args: Vec<Expr>,
    },
    /// A method call. The method name follows the backend's case convention.
    Call {
        recv: Option<Box<Expr>>,
        method: String,
        generics: Vec<String>,
        args: Vec<Expr>,
    },
    /// Member access, spelled exactly as given.
    Member { recv: Box<Expr>, name: String },
    /// One of the generated type's own accessors, read without arguments.
    SelfMember(String),
    Binary {
        lhs: Box<Expr>,
        op: &'static str,
        rhs: Box<Expr>,
    },
    Cast { ty: String, expr: Box<Expr> },
    Cond {
        cond: Box<Expr>,
        then: Box<Expr>,
        otherwise: Box<Expr>,
    },
    New { ty: String, args: Vec<Expr> },
    /// `default(T)`.
    Default(String),
    Index { recv: Box<Expr>, indices: Vec<Expr> },
    ArrayLit(Vec<Expr>),
    Lambda {
        params: Vec<(String, String)>,
        body: Box<Expr>,
    },
    Paren(Box<Expr>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Self::Ident(name.into())
    }

    pub fn int(value: impl Into<i128>) -> Self {
        Self::Int(value.into())
    }

    /// A byte count or index from the schema layout.
    pub fn size(value: usize) -> Self {
        Self::Int(value as i128)
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    pub fn null() -> Self {
        Self::ident("null")
    }

    pub fn this() -> Self {
        Self::ident("this")
    }

    pub fn runtime(name: impl Into<String>) -> Self {
        Self::Runtime(name.into())
    }

    pub fn helper(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Helper {
            name: name.into(),
            scope: HelperScope::Instance,
            generics: Vec::new(),
            args,
        }
    }

    pub fn static_helper(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Helper {
            name: name.into(),
            scope: HelperScope::Static,
            generics: Vec::new(),
            args,
        }
    }

    /// A call without receiver.
    pub fn func(method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            recv: None,
            method: method.into(),
            generics: Vec::new(),
            args,
        }
    }

    pub fn call(recv: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::Call {
            recv: Some(Box::new(recv)),
            method: method.into(),
            generics: Vec::new(),
            args,
        }
    }

    /// Attach type arguments to a call or helper.
    pub fn with_generics(mut self, types: Vec<String>) -> Self {
        match &mut self {
            Self::Call { generics, .. } | Self::Helper { generics, .. } => *generics = types,
            _ => {}
        }
        self
    }

    pub fn member(recv: Expr, name: impl Into<String>) -> Self {
        Self::Member {
            recv: Box::new(recv),
            name: name.into(),
        }
    }

    pub fn binary(lhs: Expr, op: &'static str, rhs: Expr) -> Self {
        Self::Binary {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(lhs, "+", rhs)
    }

    pub fn cast(ty: impl Into<String>, expr: Expr) -> Self {
        Self::Cast {
            ty: ty.into(),
            expr: Box::new(expr),
        }
    }

    /// Cast only when `ty` is non-empty.
    pub fn cast_if(ty: &str, expr: Expr) -> Self {
        if ty.is_empty() {
            expr
        } else {
            Self::cast(ty, expr)
        }
    }

    pub fn cond(cond: Expr, then: Expr, otherwise: Expr) -> Self {
        Self::Cond {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        }
    }

    pub fn new_object(ty: impl Into<String>, args: Vec<Expr>) -> Self {
        Self::New {
            ty: ty.into(),
            args,
        }
    }

    pub fn index(recv: Expr, indices: Vec<Expr>) -> Self {
        Self::Index {
            recv: Box::new(recv),
            indices,
        }
    }

    pub fn paren(expr: Expr) -> Self {
        Self::Paren(Box::new(expr))
    }

    /// Whether the expression needs parentheses when used as a receiver.
    pub(crate) fn needs_parens_as_receiver(&self) -> bool {
        matches!(
            self,
            Self::New { .. } | Self::Binary { .. } | Self::Cond { .. } | Self::Cast { .. }
        )
    }
}

/// A statement in generated code.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Local {
        ty: String,
        name: String,
        value: Expr,
    },
    Assign {
        target: String,
        op: &'static str,
        value: Expr,
    },
    Increment(String),
    Expr(Expr),
    Return(Option<Expr>),
    If {
        cond: Expr,
        then: Vec<Statement>,
        otherwise: Vec<Statement>,
    },
    While {
        cond: Expr,
        body: Vec<Statement>,
    },
    /// A counting-down loop: `for (int var = start; cond; var--)`.
    For {
        var: String,
        start: Expr,
        cond: Expr,
        body: Vec<Statement>,
    },
    Switch {
        on: Expr,
        cases: Vec<(Expr, Statement)>,
        default: Box<Statement>,
    },
    /// A statement followed by a trailing line comment.
    Commented {
        statement: Box<Statement>,
        comment: String,
    },
}

impl Statement {
    pub fn local(ty: impl Into<String>, name: impl Into<String>, value: Expr) -> Self {
        Self::Local {
            ty: ty.into(),
            name: name.into(),
            value,
        }
    }

    pub fn assign(target: impl Into<String>, value: Expr) -> Self {
        Self::Assign {
            target: target.into(),
            op: "=",
            value,
        }
    }

    pub fn compound(target: impl Into<String>, op: &'static str, value: Expr) -> Self {
        Self::Assign {
            target: target.into(),
            op,
            value,
        }
    }

    pub fn ret(value: Expr) -> Self {
        Self::Return(Some(value))
    }

    pub fn expr(value: Expr) -> Self {
        Self::Expr(value)
    }

    pub fn if_else(cond: Expr, then: Vec<Statement>, otherwise: Vec<Statement>) -> Self {
        Self::If {
            cond,
            then,
            otherwise,
        }
    }

    pub fn commented(statement: Statement, comment: impl Into<String>) -> Self {
        Self::Commented {
            statement: Box::new(statement),
            comment: comment.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_generics_only_touches_calls() {
        let call = Expr::helper("__vector_as_array", vec![Expr::int(4)])
            .with_generics(vec!["byte".into()]);
        assert!(matches!(call, Expr::Helper { ref generics, .. } if generics == &["byte"]));

        let ident = Expr::ident("o").with_generics(vec!["T".into()]);
        assert_eq!(ident, Expr::ident("o"));
    }

    #[test]
    fn test_cast_if_skips_empty_casts() {
        assert_eq!(Expr::cast_if("", Expr::ident("x")), Expr::ident("x"));
        assert!(matches!(Expr::cast_if("long", Expr::ident("x")), Expr::Cast { .. }));
    }

    #[test]
    fn test_receiver_parens() {
        assert!(Expr::new_object("Vec3", vec![]).needs_parens_as_receiver());
        assert!(!Expr::runtime("bb").needs_parens_as_receiver());
        assert!(!Expr::func("pos", vec![]).needs_parens_as_receiver());
    }
}
