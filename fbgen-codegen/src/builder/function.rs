//! Method, property and constructor declarations.

use super::{Expr, Statement, Visibility};

/// What kind of member a [`MethodSpec`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Method,
    /// A read-only property where the backend has them, a no-argument
    /// method otherwise.
    Property,
    /// `this[...]` indexer; parameters become the index list.
    Indexer,
    Constructor,
}

/// How a body is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Everything on the signature line.
    #[default]
    Inline,
    /// One statement per line inside braces.
    Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub ty: String,
    pub name: String,
    /// Array rank; zero for plain values.
    pub rank: usize,
    /// Default argument, rendered only by backends that support them.
    pub default: Option<Expr>,
}

impl ParamSpec {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            rank: 0,
            default: None,
        }
    }

    /// A native array of `ty` with the given rank.
    pub fn array(ty: impl Into<String>, name: impl Into<String>, rank: usize) -> Self {
        Self {
            rank,
            ..Self::new(ty, name)
        }
    }

    pub fn with_default(mut self, value: Expr) -> Self {
        self.default = Some(value);
        self
    }
}

/// A method-like member.
///
/// `name` is lower camel case; the renderer applies the backend's leading
/// case. Names starting with `__` are runtime hooks and are never recased.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodSpec {
    pub name: String,
    pub doc: Vec<String>,
    pub visibility: Visibility,
    pub is_static: bool,
    /// Lines emitted above the signature, such as `@Override`.
    pub annotations: Vec<String>,
    pub kind: MethodKind,
    pub return_type: Option<String>,
    /// Annotation placed before the return type, such as `@Nullable`.
    pub return_annotation: Option<String>,
    pub generics: Vec<String>,
    pub params: Vec<ParamSpec>,
    /// Generic constraints, such as `TTable : struct, IFlatbufferObject<TTable>`.
    pub bounds: Vec<String>,
    pub body: Vec<Statement>,
    pub layout: Layout,
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: Vec::new(),
            visibility: Visibility::Public,
            is_static: false,
            annotations: Vec::new(),
            kind: MethodKind::Method,
            return_type: None,
            return_annotation: None,
            generics: Vec::new(),
            params: Vec::new(),
            bounds: Vec::new(),
            body: Vec::new(),
            layout: Layout::Inline,
        }
    }

    pub fn property(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name).kind(MethodKind::Property).returns(ty)
    }

    pub fn indexer(ty: impl Into<String>) -> Self {
        Self::new("this").kind(MethodKind::Indexer).returns(ty)
    }

    pub fn constructor(name: impl Into<String>) -> Self {
        Self::new(name)
            .kind(MethodKind::Constructor)
            .visibility(Visibility::Private)
    }

    pub fn kind(mut self, kind: MethodKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn doc(mut self, lines: &[String]) -> Self {
        self.doc = lines.to_vec();
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn annotation(mut self, line: impl Into<String>) -> Self {
        self.annotations.push(line.into());
        self
    }

    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.return_type = Some(ty.into());
        self
    }

    pub fn return_annotation(mut self, annotation: Option<String>) -> Self {
        self.return_annotation = annotation;
        self
    }

    pub fn generic(mut self, name: impl Into<String>) -> Self {
        self.generics.push(name.into());
        self
    }

    pub fn param(mut self, ty: impl Into<String>, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::new(ty, name));
        self
    }

    pub fn param_spec(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn bound(mut self, bound: impl Into<String>) -> Self {
        self.bounds.push(bound.into());
        self
    }

    pub fn statement(mut self, statement: Statement) -> Self {
        self.body.push(statement);
        self
    }

    pub fn statements(mut self, statements: impl IntoIterator<Item = Statement>) -> Self {
        self.body.extend(statements);
        self
    }

    /// Shorthand for a body that only returns `value`.
    pub fn returning(self, value: Expr) -> Self {
        self.statement(Statement::ret(value))
    }

    pub fn block(mut self) -> Self {
        self.layout = Layout::Block;
        self
    }
}
