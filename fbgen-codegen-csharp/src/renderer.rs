use fbgen_codegen::{
    builder::ClassSpec,
    language::{BackendProfile, CSHARP, Renderer},
};

/// C# syntax: `: Base, IFace` inheritance, rectangular `T[,]` arrays and
/// `a[i, j]` access.
#[derive(Debug, Clone, Copy, Default)]
pub struct CSharpRenderer;

impl CSharpRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for CSharpRenderer {
    fn profile(&self) -> &BackendProfile {
        &CSHARP
    }

    fn inheritance(&self, class: &ClassSpec) -> String {
        let parents: Vec<&str> = class
            .base
            .iter()
            .chain(&class.interfaces)
            .map(String::as_str)
            .collect();
        if parents.is_empty() {
            String::new()
        } else {
            format!(" : {}", parents.join(", "))
        }
    }

    fn array_type(&self, element: &str, rank: usize) -> String {
        if rank == 0 {
            return element.to_string();
        }
        format!("{element}[{}]", ",".repeat(rank - 1))
    }

    fn index(&self, recv: &str, indices: &[String]) -> String {
        format!("{recv}[{}]", indices.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use fbgen_codegen::builder::{
        ClassKind, Declaration, EnumSpec, Expr, FieldSpec, MethodSpec, VariantSpec, Visibility,
    };

    use super::*;

    #[test]
    fn test_inheritance_clause() {
        let renderer = CSharpRenderer::new();
        let mut class = ClassSpec::new(ClassKind::Struct, "Monster");
        assert_eq!(renderer.inheritance(&class), "");
        class.interfaces.push("IFlatbufferObject<Monster>".into());
        assert_eq!(renderer.inheritance(&class), " : IFlatbufferObject<Monster>");
        class.base = Some("Base".into());
        assert_eq!(
            renderer.inheritance(&class),
            " : Base, IFlatbufferObject<Monster>"
        );
    }

    #[test]
    fn test_rectangular_arrays() {
        let renderer = CSharpRenderer::new();
        assert_eq!(renderer.array_type("int", 1), "int[]");
        assert_eq!(renderer.array_type("int", 3), "int[,,]");
        assert_eq!(renderer.index("a", &["i".into(), "j".into()]), "a[i, j]");
    }

    #[test]
    fn test_render_struct_with_property() {
        let mut class = ClassSpec::new(ClassKind::Struct, "Stat");
        class.interfaces.push("IFlatbufferObject<Stat>".into());
        class.push(FieldSpec::new(Visibility::Private, "Table", "__p"));
        class.push(MethodSpec::property("byteBuffer", "ByteBuffer").returning(Expr::runtime("bb")));
        let text = CSharpRenderer::new().render(&[Declaration::Class(class)]);
        insta::assert_snapshot!(text, @r"
        public struct Stat : IFlatbufferObject<Stat>
        {
          private Table __p;
          public ByteBuffer ByteBuffer { get { return __p.bb; } }
        };
        ");
    }

    #[test]
    fn test_render_native_enum() {
        let spec = EnumSpec {
            doc: vec!["Primary colors.".into()],
            attributes: vec!["[System.FlagsAttribute]".into()],
            visibility: Visibility::Public,
            name: "Color".into(),
            underlying: "sbyte".into(),
            variants: vec![
                VariantSpec {
                    name: "Red".into(),
                    value: Expr::int(1),
                    doc: Vec::new(),
                },
                VariantSpec {
                    name: "Green".into(),
                    value: Expr::int(2),
                    doc: Vec::new(),
                },
            ],
        };
        let text = CSharpRenderer::new().render(&[Declaration::Enum(spec)]);
        insta::assert_snapshot!(text, @r"
        /// Primary colors.
        [System.FlagsAttribute]
        public enum Color : sbyte
        {
          Red = 1,
          Green = 2,
        };
        ");
    }
}
