//! Backend dispatch.

use clap::ValueEnum;
use fbgen_codegen::{GenerateOptions, language::LanguageCodegen};
use fbgen_codegen_csharp::Generator as CSharpGenerator;
use fbgen_codegen_java::Generator as JavaGenerator;
use fbgen_schema::Schema;

/// Target language of the generated accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Java,
    #[value(alias = "cs")]
    Csharp,
}

impl Language {
    /// Create the generator for this language.
    pub fn generator<'a>(
        self,
        schema: &'a Schema,
        options: &'a GenerateOptions,
    ) -> Box<dyn LanguageCodegen + 'a> {
        match self {
            Self::Java => Box::new(JavaGenerator::new(schema, options)),
            Self::Csharp => Box::new(CSharpGenerator::new(schema, options)),
        }
    }
}
