use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum ModelError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Failed to read model file `{path}`")]
    #[diagnostic(
        code(model::io),
        help("Check that the file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Reference `{spec}` has not been resolved")]
    #[diagnostic(
        code(model::unresolved_reference),
        help("References are only usable after the resolution phase has linked them.")
    )]
    Unresolved { spec: String },
}

#[derive(Error, Debug, Diagnostic)]
pub enum SyntaxError {
    #[error("Invalid model JSON: {message}")]
    #[diagnostic(
        code(syntax::invalid_json),
        help("The model description must be a single well-formed JSON document.")
    )]
    InvalidJson {
        message: String,
        #[source_code]
        src: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("Invalid model structure: {message}")]
    #[diagnostic(
        code(syntax::invalid_structure),
        help("Check that `documents`, `types` and `services` are arrays of objects and `root` is a string.")
    )]
    InvalidStructure { message: String },
}

#[derive(Error, Debug, Diagnostic, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Type `{id}` referenced by `{referrer}` does not exist")]
    #[diagnostic(
        code(resolver::unknown_type),
        help("Declare a type with this name, or fix the spelling. Only a single `[]` suffix is understood.")
    )]
    UnknownType { id: String, referrer: String },

    #[error("Service `{id}` referenced by locator `{referrer}` does not exist")]
    #[diagnostic(
        code(resolver::unknown_service),
        help("Locators must point to a service declared in the `services` array.")
    )]
    UnknownService { id: String, referrer: String },

    #[error("Root service `{id}` does not exist")]
    #[diagnostic(
        code(resolver::unknown_root),
        help("The `root` entry must name a service declared in the `services` array.")
    )]
    UnknownRoot { id: String },
}
