//! Construction phase: turns raw records into graph nodes.
//!
//! Nothing here looks anything up. Type specs of members and parameters, and the target
//! service of locators, are kept as [`Reference::Unresolved`] for the resolver.

use crate::model::{
    Annotation, AnnotationParameter, Concept, Document, EnumType, EnumValue, Locator,
    MemberKind, Method, MethodId, Parameter, PrimitiveType, Reference, Service, ServiceId,
    StructMember, StructType, Type, TypeId,
};
use crate::names::Name;
use crate::raw::{
    RawAnnotation, RawAnnotationParameter, RawCommon, RawDocument, RawLocator, RawMember,
    RawMethod, RawService, RawType,
};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TITLE_HEADER: Regex = Regex::new(r"(?m)^==[ \t]+([^\r\n]*)").unwrap();
}

pub struct Builder {
    separator: char,
}

impl Builder {
    pub fn new(separator: char) -> Self {
        Builder { separator }
    }

    pub fn build_documents(&self, raw: Vec<RawDocument>) -> Vec<Document> {
        raw.into_iter().map(|r| self.build_document(r)).collect()
    }

    fn build_document(&self, raw: RawDocument) -> Document {
        let html = raw.common.html.clone().unwrap_or_default();
        let mut concept = self.build_concept(raw.common);
        // Documents always carry their html, even without a doc.
        concept.html = html;
        Document {
            concept,
            title: extract_title(raw.source.as_deref()),
        }
    }

    /// Builds one node per record; the handle of each is its position in the result.
    pub fn build_types(&self, raw: Vec<RawType>) -> Vec<Type> {
        raw.into_iter()
            .enumerate()
            .map(|(i, r)| self.build_type(TypeId(i), r))
            .collect()
    }

    fn build_type(&self, id: TypeId, raw: RawType) -> Type {
        let kind = raw.kind.clone();
        match kind.as_deref() {
            Some("primitive") => Type::Primitive(PrimitiveType {
                concept: self.build_concept(raw.common),
            }),
            Some("enum") => Type::Enum(EnumType {
                concept: self.build_concept(raw.common),
                values: raw
                    .values
                    .unwrap_or_default()
                    .into_iter()
                    .map(|v| EnumValue {
                        concept: self.build_concept(v.common),
                    })
                    .collect(),
            }),
            kind => {
                if let Some(kind) = kind {
                    log::warn!(
                        "Unknown kind `{kind}` of type `{}`, treating it as a struct",
                        raw.common.name.as_deref().unwrap_or_default()
                    );
                }
                Type::Struct(self.build_struct(id, raw))
            }
        }
    }

    fn build_struct(&self, id: TypeId, raw: RawType) -> StructType {
        let attributes = self.build_members(id, MemberKind::Attribute, raw.attributes);
        let links = self.build_members(id, MemberKind::Link, raw.links);
        StructType {
            concept: self.build_concept(raw.common),
            attributes,
            links,
        }
    }

    fn build_members(
        &self,
        declaring_type: TypeId,
        kind: MemberKind,
        raw: Option<Vec<RawMember>>,
    ) -> Vec<StructMember> {
        raw.unwrap_or_default()
            .into_iter()
            .map(|member| StructMember {
                type_ref: member.type_spec.filter(|s| !s.is_empty()).map(Reference::Unresolved),
                concept: self.build_concept(member.common),
                kind,
                declaring_type,
            })
            .collect()
    }

    pub fn build_services(&self, raw: Vec<RawService>) -> Vec<Service> {
        raw.into_iter()
            .enumerate()
            .map(|(i, r)| self.build_service(ServiceId(i), r))
            .collect()
    }

    fn build_service(&self, id: ServiceId, raw: RawService) -> Service {
        let methods = raw
            .methods
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, m)| self.build_method(MethodId { service: id, index }, m))
            .collect();
        let locators = raw
            .locators
            .unwrap_or_default()
            .into_iter()
            .map(|l| self.build_locator(l))
            .collect();
        Service {
            concept: self.build_concept(raw.common),
            methods,
            locators,
        }
    }

    fn build_method(&self, id: MethodId, raw: RawMethod) -> Method {
        Method {
            concept: self.build_concept(raw.common),
            parameters: raw
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| self.build_parameter(p, Some(id)))
                .collect(),
            service: id.service,
        }
    }

    fn build_locator(&self, raw: RawLocator) -> Locator {
        Locator {
            concept: self.build_concept(raw.common),
            // Locator parameters never point back to a method.
            parameters: raw
                .parameters
                .unwrap_or_default()
                .into_iter()
                .map(|p| self.build_parameter(p, None))
                .collect(),
            service: Reference::Unresolved(raw.service.unwrap_or_default()),
        }
    }

    fn build_parameter(&self, raw: RawMember, method: Option<MethodId>) -> Parameter {
        Parameter {
            type_ref: raw.type_spec.filter(|s| !s.is_empty()).map(Reference::Unresolved),
            is_in: raw.is_in.unwrap_or(false),
            is_out: raw.is_out.unwrap_or(false),
            concept: self.build_concept(raw.common),
            method,
        }
    }

    /// Name, documentation and annotations, common to every concept.
    pub fn build_concept(&self, raw: RawCommon) -> Concept {
        let id = raw.name.unwrap_or_default();
        let (doc, html, summary) = match raw.doc {
            Some(doc) if !doc.is_empty() => {
                let html = raw.html.unwrap_or_default();
                let summary = summarize(&html).to_string();
                (doc, html, summary)
            }
            _ => (String::new(), String::new(), String::new()),
        };
        Concept {
            name: self.parse_name(&id),
            id,
            doc,
            html,
            summary,
            annotations: self.build_annotations(raw.annotations),
        }
    }

    pub fn build_annotations(&self, raw: Option<Vec<RawAnnotation>>) -> Vec<Annotation> {
        raw.unwrap_or_default()
            .into_iter()
            .map(|a| {
                let id = a.name.unwrap_or_default();
                Annotation {
                    name: self.parse_name(&id),
                    id,
                    parameters: a
                        .parameters
                        .unwrap_or_default()
                        .into_iter()
                        .map(|p| self.build_annotation_parameter(p))
                        .collect(),
                }
            })
            .collect()
    }

    fn build_annotation_parameter(&self, raw: RawAnnotationParameter) -> AnnotationParameter {
        let id = raw.name.unwrap_or_default();
        AnnotationParameter {
            name: self.parse_name(&id),
            id,
            values: raw.values.unwrap_or_default(),
        }
    }

    fn parse_name(&self, id: &str) -> Name {
        Name::parse_using_separator(id, self.separator)
    }
}

/// The prefix of `html` up to and including the first `.`, or all of it.
pub fn summarize(html: &str) -> &str {
    match html.find('.') {
        Some(i) => &html[..=i],
        None => html,
    }
}

/// The text of the first `== Title` line of `source`, or an empty string.
pub fn extract_title(source: Option<&str>) -> String {
    source
        .and_then(|s| TITLE_HEADER.captures(s))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}
