//! Queries over an analyzed [`Model`], the way a documentation front end navigates it:
//! by identifier, and from a type or service to everything that points at it.

use crate::model::{
    Document, Locator, MemberKind, Method, MethodId, Model, Parameter, Reference, Service,
    ServiceId, StructMember, StructType, TypeId, TypeRef,
};

/// A place in the model whose resolved type refers to a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Member {
        owner: TypeId,
        kind: MemberKind,
        index: usize,
    },
    MethodParameter {
        method: MethodId,
        index: usize,
    },
    LocatorParameter {
        service: ServiceId,
        locator: usize,
        index: usize,
    },
}

fn refers_to(type_ref: &Option<Reference<TypeRef>>, target: TypeId) -> bool {
    matches!(type_ref, Some(Reference::Resolved(r)) if r.target() == target)
}

impl Model {
    /// First type whose identifier is `id`.
    pub fn find_type(&self, id: &str) -> Option<TypeId> {
        self.types.iter().position(|t| t.id() == id).map(TypeId)
    }

    /// First service whose identifier is `id`.
    pub fn find_service(&self, id: &str) -> Option<ServiceId> {
        self.services
            .iter()
            .position(|s| s.concept.id == id)
            .map(ServiceId)
    }

    pub fn find_document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.concept.id == id)
    }

    /// Every member and parameter whose resolved type, or list element type, is `target`.
    /// Unresolved locator parameters are skipped.
    pub fn usages_of(&self, target: TypeId) -> Vec<Usage> {
        let mut usages = Vec::new();

        for (i, ty) in self.types.iter().enumerate() {
            if let Some(st) = ty.as_struct() {
                for (index, member) in st.members().enumerate() {
                    if refers_to(&member.type_ref, target) {
                        usages.push(Usage::Member {
                            owner: TypeId(i),
                            kind: member.kind,
                            index: match member.kind {
                                MemberKind::Attribute => index,
                                MemberKind::Link => index - st.attributes.len(),
                            },
                        });
                    }
                }
            }
        }

        for (s, service) in self.services.iter().enumerate() {
            for (m, method) in service.methods.iter().enumerate() {
                for (index, parameter) in method.parameters.iter().enumerate() {
                    if refers_to(&parameter.type_ref, target) {
                        usages.push(Usage::MethodParameter {
                            method: MethodId {
                                service: ServiceId(s),
                                index: m,
                            },
                            index,
                        });
                    }
                }
            }
            for (l, locator) in service.locators.iter().enumerate() {
                for (index, parameter) in locator.parameters.iter().enumerate() {
                    if refers_to(&parameter.type_ref, target) {
                        usages.push(Usage::LocatorParameter {
                            service: ServiceId(s),
                            locator: l,
                            index,
                        });
                    }
                }
            }
        }

        usages
    }

    /// Locators of any service that navigate to `target`, with the service owning each.
    pub fn locators_targeting(&self, target: ServiceId) -> Vec<(ServiceId, &Locator)> {
        self.services
            .iter()
            .enumerate()
            .flat_map(|(s, service)| {
                service
                    .locators
                    .iter()
                    .filter(move |l| matches!(l.service, Reference::Resolved(id) if id == target))
                    .map(move |l| (ServiceId(s), l))
            })
            .collect()
    }
}

impl StructType {
    /// Attributes followed by links.
    pub fn members(&self) -> impl Iterator<Item = &StructMember> {
        self.attributes.iter().chain(self.links.iter())
    }

    pub fn find_member(&self, id: &str) -> Option<&StructMember> {
        self.members().find(|m| m.concept.id == id)
    }
}

impl Service {
    pub fn find_method(&self, id: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.concept.id == id)
    }

    pub fn find_locator(&self, id: &str) -> Option<&Locator> {
        self.locators.iter().find(|l| l.concept.id == id)
    }
}

impl Method {
    pub fn find_parameter(&self, id: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.concept.id == id)
    }
}
