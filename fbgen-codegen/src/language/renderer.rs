//! Lowering of the code model to text.

use crate::builder::{
    ClassKind, ClassSpec, CodeBuilder, CodeFragment, Declaration, EnumSpec, Expr, FieldSpec,
    HelperScope, Layout, Member, MethodKind, MethodSpec, ParamSpec, Statement,
};

use super::BackendProfile;

/// Turns declarations into backend source text.
///
/// Backends implement the few syntax points that are genuinely different
/// (inheritance, array types and indexing); everything else is driven by
/// the [`BackendProfile`].
pub trait Renderer {
    fn profile(&self) -> &BackendProfile;

    /// Inheritance clause after a class name, with its leading space.
    fn inheritance(&self, class: &ClassSpec) -> String;

    /// Native array type of the given rank.
    fn array_type(&self, element: &str, rank: usize) -> String;

    /// Element access on a native array.
    fn index(&self, recv: &str, indices: &[String]) -> String;

    fn method_name(&self, name: &str) -> String {
        self.profile().method_name(name)
    }

    fn expr(&self, expr: &Expr) -> String {
        let p = self.profile();
        match expr {
            Expr::Ident(name) => name.clone(),
            Expr::Int(value) => value.to_string(),
            Expr::Str(value) => format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")),
            Expr::Runtime(name) => format!("{}{}", p.accessor_prefix, name),
            Expr::Helper {
                name,
                scope,
                generics,
                args,
            } => {
                let prefix = match scope {
                    HelperScope::Instance => p.accessor_prefix,
                    HelperScope::Static => p.static_prefix,
                };
                format!(
                    "{prefix}{}{}({})",
                    self.method_name(name),
                    type_args(generics),
                    self.args(args)
                )
            }
            Expr::Call {
                recv,
                method,
                generics,
                args,
            } => {
                let recv = recv
                    .as_ref()
                    .map(|r| format!("{}.", self.receiver(r)))
                    .unwrap_or_default();
                format!(
                    "{recv}{}{}({})",
                    self.method_name(method),
                    type_args(generics),
                    self.args(args)
                )
            }
            Expr::Member { recv, name } => format!("{}.{}", self.receiver(recv), name),
            Expr::SelfMember(name) => {
                if p.caps.properties {
                    self.method_name(name)
                } else {
                    format!("{name}()")
                }
            }
            Expr::Binary { lhs, op, rhs } => {
                format!("{} {op} {}", self.expr(lhs), self.expr(rhs))
            }
            Expr::Cast { ty, expr } => {
                let inner = match expr.as_ref() {
                    Expr::Binary { .. } | Expr::Cond { .. } => format!("({})", self.expr(expr)),
                    other => self.expr(other),
                };
                format!("({ty}){inner}")
            }
            Expr::Cond {
                cond,
                then,
                otherwise,
            } => format!(
                "{} ? {} : {}",
                self.expr(cond),
                self.expr(then),
                self.expr(otherwise)
            ),
            Expr::New { ty, args } => format!("new {ty}({})", self.args(args)),
            Expr::Default(ty) => format!("default({ty})"),
            Expr::Index { recv, indices } => {
                let indices: Vec<String> = indices.iter().map(|i| self.expr(i)).collect();
                self.index(&self.receiver(recv), &indices)
            }
            Expr::ArrayLit(items) if items.is_empty() => "{ }".to_string(),
            Expr::ArrayLit(items) => format!("{{ {} }}", self.args(items)),
            Expr::Lambda { params, body } => {
                let params: Vec<String> = params
                    .iter()
                    .map(|(ty, name)| format!("{ty} {name}"))
                    .collect();
                format!("({}) => {}", params.join(", "), self.expr(body))
            }
            Expr::Paren(inner) => format!("({})", self.expr(inner)),
        }
    }

    fn receiver(&self, expr: &Expr) -> String {
        if expr.needs_parens_as_receiver() {
            format!("({})", self.expr(expr))
        } else {
            self.expr(expr)
        }
    }

    fn args(&self, args: &[Expr]) -> String {
        args.iter()
            .map(|a| self.expr(a))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// `header` followed by a braced body, honoring the backend's brace style.
    fn braced(&self, header: String, body: Vec<CodeFragment>, close: &str) -> Vec<CodeFragment> {
        if self.profile().caps.open_brace_newline {
            vec![
                CodeFragment::Line(header),
                CodeFragment::block("{", body, Some(close.to_string())),
            ]
        } else {
            vec![CodeFragment::block(
                format!("{header} {{"),
                body,
                Some(close.to_string()),
            )]
        }
    }

    fn statements(&self, statements: &[Statement]) -> Vec<CodeFragment> {
        statements.iter().flat_map(|s| self.statement(s)).collect()
    }

    fn statement(&self, statement: &Statement) -> Vec<CodeFragment> {
        match statement {
            Statement::If { .. } => self.if_chain(statement),
            Statement::While { cond, body } => self.braced(
                format!("while ({})", self.expr(cond)),
                self.statements(body),
                "}",
            ),
            Statement::For {
                var,
                start,
                cond,
                body,
            } => self.braced(
                format!(
                    "for (int {var} = {}; {}; {var}--)",
                    self.expr(start),
                    self.expr(cond)
                ),
                self.statements(body),
                "}",
            ),
            Statement::Switch { on, cases, default } => {
                let mut body: Vec<CodeFragment> = cases
                    .iter()
                    .map(|(label, s)| {
                        CodeFragment::Line(format!(
                            "case {}: {}",
                            self.expr(label),
                            self.statement_inline(s)
                        ))
                    })
                    .collect();
                body.push(CodeFragment::Line(format!(
                    "default: {}",
                    self.statement_inline(default)
                )));
                self.braced(format!("switch ({})", self.expr(on)), body, "}")
            }
            other => vec![CodeFragment::Line(self.statement_inline(other))],
        }
    }

    /// `if` / `else if` / `else` in the backend's brace style.
    fn if_chain(&self, statement: &Statement) -> Vec<CodeFragment> {
        let mut arms: Vec<(Option<&Expr>, &[Statement])> = Vec::new();
        let mut current = statement;
        while let Statement::If {
            cond,
            then,
            otherwise,
        } = current
        {
            arms.push((Some(cond), then));
            match otherwise.as_slice() {
                [next @ Statement::If { .. }] => current = next,
                [] => break,
                rest => {
                    arms.push((None, rest));
                    break;
                }
            }
        }

        let newline = self.profile().caps.open_brace_newline;
        let mut out = Vec::new();
        for (i, (cond, body)) in arms.iter().enumerate() {
            let keyword = match (i, cond) {
                (0, Some(c)) => format!("if ({})", self.expr(c)),
                (_, Some(c)) => format!("else if ({})", self.expr(c)),
                (_, None) => "else".to_string(),
            };
            let body = self.statements(body);
            if newline {
                out.push(CodeFragment::Line(keyword));
                out.push(CodeFragment::block("{", body, Some("}".to_string())));
            } else {
                let header = if i == 0 {
                    format!("{keyword} {{")
                } else {
                    format!("}} {keyword} {{")
                };
                out.push(CodeFragment::Line(header));
                out.push(CodeFragment::Indent(body));
            }
        }
        if !newline {
            out.push(CodeFragment::line("}"));
        }
        out
    }

    /// A statement on a single line.
    fn statement_inline(&self, statement: &Statement) -> String {
        match statement {
            Statement::Local { ty, name, value } => {
                format!("{ty} {name} = {};", self.expr(value))
            }
            Statement::Assign { target, op, value } => {
                format!("{target} {op} {};", self.expr(value))
            }
            Statement::Increment(name) => format!("{name}++;"),
            Statement::Expr(expr) => format!("{};", self.expr(expr)),
            Statement::Return(Some(value)) => format!("return {};", self.expr(value)),
            Statement::Return(None) => "return;".to_string(),
            Statement::If {
                cond,
                then,
                otherwise,
            } => {
                let mut out = format!("if ({}) {}", self.expr(cond), self.inline_body(then));
                match otherwise.as_slice() {
                    [] => {}
                    [next @ Statement::If { .. }] => {
                        out.push_str(" else ");
                        out.push_str(&self.statement_inline(next));
                    }
                    rest => {
                        out.push_str(" else ");
                        out.push_str(&self.inline_body(rest));
                    }
                }
                out
            }
            Statement::While { cond, body } => {
                format!("while ({}) {}", self.expr(cond), self.inline_body(body))
            }
            Statement::For {
                var,
                start,
                cond,
                body,
            } => {
                let body = match body.as_slice() {
                    [single] => self.statement_inline(single),
                    many => self.inline_body(many),
                };
                format!(
                    "for (int {var} = {}; {}; {var}--) {body}",
                    self.expr(start),
                    self.expr(cond)
                )
            }
            Statement::Switch { on, cases, default } => {
                let mut out = format!("switch ({}) {{", self.expr(on));
                for (label, s) in cases {
                    out.push_str(&format!(
                        " case {}: {}",
                        self.expr(label),
                        self.statement_inline(s)
                    ));
                }
                out.push_str(&format!(" default: {} }}", self.statement_inline(default)));
                out
            }
            Statement::Commented { statement, comment } => {
                format!("{}  // {comment}", self.statement_inline(statement))
            }
        }
    }

    fn inline_body(&self, statements: &[Statement]) -> String {
        if statements.is_empty() {
            return "{ }".to_string();
        }
        let inner: Vec<String> = statements
            .iter()
            .map(|s| self.statement_inline(s))
            .collect();
        format!("{{ {} }}", inner.join(" "))
    }

    fn doc(&self, lines: &[String]) -> Vec<CodeFragment> {
        if lines.is_empty() {
            return Vec::new();
        }
        let style = self.profile().doc;
        let mut out = Vec::new();
        if let Some(start) = style.start {
            out.push(CodeFragment::line(start));
        }
        for line in lines {
            if line.is_empty() {
                out.push(CodeFragment::line(style.line));
            } else {
                out.push(CodeFragment::Line(format!("{} {line}", style.line)));
            }
        }
        if let Some(end) = style.end {
            out.push(CodeFragment::line(end));
        }
        out
    }

    fn param(&self, param: &ParamSpec) -> String {
        let ty = if param.rank > 0 {
            self.array_type(&param.ty, param.rank)
        } else {
            param.ty.clone()
        };
        match &param.default {
            Some(value) if self.profile().caps.default_params => {
                format!("{ty} {} = {}", param.name, self.expr(value))
            }
            _ => format!("{ty} {}", param.name),
        }
    }

    fn signature(&self, method: &MethodSpec) -> String {
        let p = self.profile();
        let mut parts: Vec<String> = Vec::new();
        let visibility = method.visibility.keyword();
        if !visibility.is_empty() {
            parts.push(visibility.to_string());
        }
        if method.is_static {
            parts.push("static".to_string());
        }
        if let Some(annotation) = &method.return_annotation {
            parts.push(annotation.clone());
        }
        match (&method.return_type, method.kind) {
            (Some(ty), _) => parts.push(ty.clone()),
            (None, MethodKind::Method) => parts.push("void".to_string()),
            _ => {}
        }
        let params: Vec<String> = method.params.iter().map(|param| self.param(param)).collect();
        let params = params.join(", ");
        let name = match method.kind {
            MethodKind::Constructor => format!("{}({params})", method.name),
            MethodKind::Indexer => format!("this[{params}]"),
            MethodKind::Property if p.caps.properties => self.method_name(&method.name),
            MethodKind::Property => format!("{}()", self.method_name(&method.name)),
            MethodKind::Method => format!(
                "{}{}({params})",
                self.method_name(&method.name),
                type_args(&method.generics)
            ),
        };
        parts.push(name);
        let mut signature = parts.join(" ");
        for bound in &method.bounds {
            signature.push_str(" where ");
            signature.push_str(bound);
        }
        signature
    }

    fn method(&self, method: &MethodSpec) -> Vec<CodeFragment> {
        let mut out = self.doc(&method.doc);
        out.extend(method.annotations.iter().cloned().map(CodeFragment::Line));
        let signature = self.signature(method);
        let getter = match method.kind {
            MethodKind::Indexer => true,
            MethodKind::Property => self.profile().caps.properties,
            _ => false,
        };
        match method.layout {
            Layout::Inline => {
                let body = self.inline_body(&method.body);
                let line = if getter {
                    format!("{signature} {{ get {body} }}")
                } else {
                    format!("{signature} {body}")
                };
                out.push(CodeFragment::Line(line));
            }
            Layout::Block => {
                let body = self.statements(&method.body);
                let body = if getter {
                    self.braced("get".to_string(), body, "}")
                } else {
                    body
                };
                out.extend(self.braced(signature, body, "}"));
            }
        }
        out
    }

    fn field(&self, field: &FieldSpec) -> Vec<CodeFragment> {
        let mut out = self.doc(&field.doc);
        let mut parts: Vec<String> = Vec::new();
        let visibility = field.visibility.keyword();
        if !visibility.is_empty() {
            parts.push(visibility.to_string());
        }
        if field.is_static {
            parts.push("static".to_string());
        }
        if field.is_final {
            parts.push(self.profile().final_keyword.to_string());
        }
        parts.push(field.ty.clone());
        parts.push(field.name.clone());
        let mut line = parts.join(" ");
        if let Some(value) = &field.value {
            line.push_str(" = ");
            line.push_str(&self.expr(value));
        }
        line.push(';');
        out.push(CodeFragment::Line(line));
        out
    }

    fn members(&self, members: &[Member]) -> Vec<CodeFragment> {
        let mut out = Vec::new();
        for member in members {
            match member {
                Member::Field(field) => out.extend(self.field(field)),
                Member::Method(method) => out.extend(self.method(method)),
                Member::Blank => out.push(CodeFragment::Blank),
                Member::Conditional {
                    symbol,
                    then,
                    otherwise,
                } => {
                    out.push(CodeFragment::Directive(format!("#if {symbol}")));
                    out.extend(self.members(then));
                    if !otherwise.is_empty() {
                        out.push(CodeFragment::directive("#else"));
                        out.extend(self.members(otherwise));
                    }
                    out.push(CodeFragment::directive("#endif"));
                }
            }
        }
        out
    }

    fn class(&self, class: &ClassSpec) -> Vec<CodeFragment> {
        let mut out = self.doc(&class.doc);
        out.extend(class.attributes.iter().cloned().map(CodeFragment::Line));
        let mut parts: Vec<&str> = Vec::new();
        let visibility = class.visibility.keyword();
        if !visibility.is_empty() {
            parts.push(visibility);
        }
        parts.extend(class.modifiers.iter().map(String::as_str));
        parts.push(match class.kind {
            ClassKind::Class => "class",
            ClassKind::Struct => "struct",
        });
        parts.push(&class.name);
        let header = format!("{}{}", parts.join(" "), self.inheritance(class));
        out.extend(self.braced(header, self.members(&class.members), self.profile().type_close));
        out
    }

    fn enumeration(&self, spec: &EnumSpec) -> Vec<CodeFragment> {
        let mut out = self.doc(&spec.doc);
        out.extend(spec.attributes.iter().cloned().map(CodeFragment::Line));
        let visibility = spec.visibility.keyword();
        let header = if visibility.is_empty() {
            format!("enum {} : {}", spec.name, spec.underlying)
        } else {
            format!("{visibility} enum {} : {}", spec.name, spec.underlying)
        };
        let mut body = Vec::new();
        for variant in &spec.variants {
            body.extend(self.doc(&variant.doc));
            body.push(CodeFragment::Line(format!(
                "{} = {},",
                variant.name,
                self.expr(&variant.value)
            )));
        }
        out.extend(self.braced(header, body, self.profile().type_close));
        out
    }

    fn declaration(&self, declaration: &Declaration) -> Vec<CodeFragment> {
        match declaration {
            Declaration::Class(class) => self.class(class),
            Declaration::Enum(spec) => self.enumeration(spec),
        }
    }

    /// Lay out declarations, each followed by a blank line.
    fn render(&self, declarations: &[Declaration]) -> String {
        declarations
            .iter()
            .fold(CodeBuilder::default(), |b, d| b.emit(self.declaration(d)).blank())
            .build()
    }
}

fn type_args(generics: &[String]) -> String {
    if generics.is_empty() {
        String::new()
    } else {
        format!("<{}>", generics.join(", "))
    }
}
