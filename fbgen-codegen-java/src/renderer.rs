use fbgen_codegen::{
    builder::ClassSpec,
    language::{BackendProfile, JAVA, Renderer},
};

/// Java syntax: `extends`/`implements`, `T[][]` arrays, `a[i][j]` access.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaRenderer;

impl JavaRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for JavaRenderer {
    fn profile(&self) -> &BackendProfile {
        &JAVA
    }

    fn inheritance(&self, class: &ClassSpec) -> String {
        let mut out = String::new();
        if let Some(base) = &class.base {
            out.push_str(" extends ");
            out.push_str(base);
        }
        if !class.interfaces.is_empty() {
            out.push_str(" implements ");
            out.push_str(&class.interfaces.join(", "));
        }
        out
    }

    fn array_type(&self, element: &str, rank: usize) -> String {
        format!("{element}{}", "[]".repeat(rank))
    }

    fn index(&self, recv: &str, indices: &[String]) -> String {
        indices
            .iter()
            .fold(recv.to_string(), |acc, index| format!("{acc}[{index}]"))
    }
}
