use crate::builder::Builder;
use crate::error::{ModelError, ResolveError, SyntaxError};
use crate::model::Model;
use crate::raw::RawModel;
use crate::resolver::Resolver;
use crate::utils::offset_of_line_and_column;
use miette::NamedSource;
use serde::Deserialize;
use std::path::Path;

/// Knobs of the analysis. The defaults reproduce the behaviour the model format expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzeOptions {
    /// Word separator used to turn identifiers into names.
    pub name_separator: char,
    /// Also link the type specs of locator parameters. Off by default, in which case those
    /// parameters keep their textual spec after analysis.
    pub resolve_locator_parameters: bool,
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        AnalyzeOptions {
            name_separator: '_',
            resolve_locator_parameters: false,
        }
    }
}

impl AnalyzeOptions {
    #[must_use]
    pub fn with_name_separator(mut self, separator: char) -> Self {
        self.name_separator = separator;
        self
    }

    #[must_use]
    pub fn with_locator_parameters_resolved(mut self, resolve: bool) -> Self {
        self.resolve_locator_parameters = resolve;
        self
    }
}

/// Analyzes a JSON model description and returns the linked [`Model`].
///
/// # Arguments
///
/// * `source` - The JSON text.
/// * `file_name` - Name used when reporting syntax errors.
///
/// # Errors
///
/// Returns a `ModelError` if the text is not valid JSON of the expected shape, or if any
/// type, service or root reference cannot be found.
pub fn analyze(source: &str, file_name: &str) -> Result<Model, ModelError> {
    analyze_with(source, file_name, &AnalyzeOptions::default())
}

/// Like [`analyze`], with explicit options.
///
/// # Errors
///
/// See [`analyze`].
pub fn analyze_with(
    source: &str,
    file_name: &str,
    options: &AnalyzeOptions,
) -> Result<Model, ModelError> {
    let raw: RawModel = serde_json::from_str(source).map_err(|err| {
        let offset = offset_of_line_and_column(source, err.line(), err.column());
        SyntaxError::InvalidJson {
            message: err.to_string(),
            src: NamedSource::new(file_name, source.to_string()),
            span: (offset, 0).into(),
        }
    })?;
    Ok(analyze_raw(raw, options)?)
}

/// Analyzes an already parsed JSON value.
///
/// # Errors
///
/// Returns a `ModelError` if the value does not have the shape of a model description or
/// if a reference cannot be found.
pub fn analyze_value(
    value: &serde_json::Value,
    options: &AnalyzeOptions,
) -> Result<Model, ModelError> {
    let raw = RawModel::deserialize(value).map_err(|err| SyntaxError::InvalidStructure {
        message: err.to_string(),
    })?;
    Ok(analyze_raw(raw, options)?)
}

/// Reads and analyzes a model description file.
///
/// # Errors
///
/// Returns `ModelError::Io` if the file cannot be read, otherwise see [`analyze`].
pub fn analyze_file(path: impl AsRef<Path>, options: &AnalyzeOptions) -> Result<Model, ModelError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_string_lossy().to_string(),
        source,
    })?;
    analyze_with(&source, &path.to_string_lossy(), options)
}

/// Builds every node first, then links. Linking earlier would fail on forward references.
pub fn analyze_raw(raw: RawModel, options: &AnalyzeOptions) -> Result<Model, ResolveError> {
    let builder = Builder::new(options.name_separator);

    let documents = builder.build_documents(raw.documents.unwrap_or_default());
    let types = builder.build_types(raw.types.unwrap_or_default());
    let services = builder.build_services(raw.services.unwrap_or_default());
    log::debug!(
        "Built {} documents, {} types and {} services",
        documents.len(),
        types.len(),
        services.len()
    );

    let mut model = Model {
        documents,
        types,
        services,
        root: None,
    };

    let resolver = Resolver::new(&model, options.resolve_locator_parameters);
    resolver.resolve(&mut model, raw.root.as_deref())?;
    log::debug!(
        "Resolved model references, root service: {:?}",
        model.root_service().map(|s| s.concept.id.as_str())
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use crate::analyze;
    use crate::error::{ModelError, ResolveError};
    use crate::model::{Reference, TypeRef};

    #[test]
    fn test_empty_document() {
        let model = analyze("{}", "model.json").unwrap();
        assert!(model.documents.is_empty());
        assert!(model.types.is_empty());
        assert!(model.services.is_empty());
        assert!(model.root.is_none());
    }

    #[test]
    fn test_null_collections_are_empty() {
        let model = analyze(
            r#"{ "documents": null, "types": null, "services": null, "root": null }"#,
            "model.json",
        )
        .unwrap();
        assert!(model.types.is_empty());
        assert!(model.root.is_none());
    }

    #[test]
    fn test_forward_reference() {
        let source = r#"{
            "types": [
                { "name": "Vm", "attributes": [ { "name": "disk", "type": "Disk" } ] },
                { "name": "Disk" }
            ]
        }"#;
        let model = analyze(source, "model.json").unwrap();
        let vm = model.types[0].as_struct().unwrap();
        let disk = model.find_type("Disk").unwrap();
        assert_eq!(
            vm.attributes[0].type_ref,
            Some(Reference::Resolved(TypeRef::Type(disk)))
        );
    }

    #[test]
    fn test_invalid_json_is_a_syntax_error() {
        let err = analyze("{ \"types\": [ }", "model.json").unwrap_err();
        assert!(matches!(err, ModelError::Syntax(_)));
    }

    #[test]
    fn test_unknown_root() {
        let err = analyze(r#"{ "services": [ { "name": "a" } ], "root": "z" }"#, "m.json")
            .unwrap_err();
        match err {
            ModelError::Resolve(ResolveError::UnknownRoot { id }) => assert_eq!(id, "z"),
            other => panic!("Expected an unknown root error, got {other:?}"),
        }
    }
}
