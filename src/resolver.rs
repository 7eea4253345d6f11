use crate::error::ResolveError;
use crate::model::{
    ListType, Model, Parameter, Reference, ServiceId, StructMember, Type, TypeId, TypeRef,
};
use std::collections::HashMap;

/// Suffix that turns a type spec into a list of that type.
const LIST_SUFFIX: &str = "[]";

/// Identifier to handle map over one collection of the model.
///
/// When two entries share an identifier the first one wins, and the shadowed one is logged.
#[derive(Debug, Clone)]
pub struct Lookup<K> {
    by_id: HashMap<String, K>,
}

impl<K: Copy> Lookup<K> {
    pub fn build<'a>(entries: impl IntoIterator<Item = (&'a str, K)>, collection: &str) -> Self {
        let mut by_id = HashMap::new();
        for (id, handle) in entries {
            if by_id.contains_key(id) {
                log::warn!("Duplicate {collection} identifier `{id}`, keeping the first one");
                continue;
            }
            by_id.insert(id.to_string(), handle);
        }
        Lookup { by_id }
    }

    pub fn get(&self, id: &str) -> Option<K> {
        self.by_id.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// The linking pass. Rewrites every deferred reference of a fully built [`Model`].
pub struct Resolver {
    pub types: Lookup<TypeId>,
    pub services: Lookup<ServiceId>,
    resolve_locator_parameters: bool,
}

impl Resolver {
    /// Indexes the types and services of `model`. Must run after every node is built.
    pub fn new(model: &Model, resolve_locator_parameters: bool) -> Self {
        let types = Lookup::build(
            model.types.iter().enumerate().map(|(i, t)| (t.id(), TypeId(i))),
            "type",
        );
        let services = Lookup::build(
            model
                .services
                .iter()
                .enumerate()
                .map(|(i, s)| (s.concept.id.as_str(), ServiceId(i))),
            "service",
        );
        Resolver {
            types,
            services,
            resolve_locator_parameters,
        }
    }

    pub fn resolve(&self, model: &mut Model, root: Option<&str>) -> Result<(), ResolveError> {
        // 1. Struct attributes and links
        for ty in &mut model.types {
            if let Type::Struct(st) = ty {
                let owner = st.concept.id.as_str();
                for member in st.attributes.iter_mut().chain(st.links.iter_mut()) {
                    self.resolve_member(owner, member)?;
                }
            }
        }

        // 2. Method parameters
        for service in &mut model.services {
            let service_id = service.concept.id.as_str();
            for method in &mut service.methods {
                let method_id = method.concept.id.as_str();
                for parameter in &mut method.parameters {
                    self.resolve_parameter(&format!("{service_id}.{method_id}"), parameter)?;
                }
            }
        }

        // 3. Locator targets. Locator parameters keep their specs unless asked otherwise.
        for service in &mut model.services {
            let service_id = service.concept.id.as_str();
            for locator in &mut service.locators {
                if let Reference::Unresolved(spec) = &locator.service {
                    let target =
                        self.services
                            .get(spec)
                            .ok_or_else(|| ResolveError::UnknownService {
                                id: spec.clone(),
                                referrer: format!("{service_id}/{}", locator.concept.id),
                            })?;
                    log::trace!(
                        "Locator `{service_id}/{}` -> service #{}",
                        locator.concept.id,
                        target.index()
                    );
                    locator.service = Reference::Resolved(target);
                }
                if self.resolve_locator_parameters {
                    let referrer = format!("{service_id}/{}", locator.concept.id);
                    for parameter in &mut locator.parameters {
                        self.resolve_parameter(&referrer, parameter)?;
                    }
                }
            }
        }

        // 4. Root service
        if let Some(root) = root {
            let id = self
                .services
                .get(root)
                .ok_or_else(|| ResolveError::UnknownRoot {
                    id: root.to_string(),
                })?;
            model.root = Some(id);
        }

        Ok(())
    }

    fn resolve_member(&self, owner: &str, member: &mut StructMember) -> Result<(), ResolveError> {
        let referrer = format!("{owner}.{}", member.concept.id);
        self.resolve_slot(&referrer, &mut member.type_ref)
    }

    fn resolve_parameter(
        &self,
        owner: &str,
        parameter: &mut Parameter,
    ) -> Result<(), ResolveError> {
        let referrer = format!("{owner}.{}", parameter.concept.id);
        self.resolve_slot(&referrer, &mut parameter.type_ref)
    }

    fn resolve_slot(
        &self,
        referrer: &str,
        slot: &mut Option<Reference<TypeRef>>,
    ) -> Result<(), ResolveError> {
        if let Some(Reference::Unresolved(spec)) = slot {
            let resolved = self.resolve_type_spec(spec, referrer)?;
            log::trace!("{referrer}: `{spec}` -> {resolved:?}");
            *slot = Some(Reference::Resolved(resolved));
        }
        Ok(())
    }

    /// Resolves `Name` to the type with that identifier and `Name[]` to a list of it.
    ///
    /// Only one suffix is stripped: `Name[][]` looks up `Name[]`, which does not exist.
    pub fn resolve_type_spec(&self, spec: &str, referrer: &str) -> Result<TypeRef, ResolveError> {
        let (id, is_list) = match spec.strip_suffix(LIST_SUFFIX) {
            Some(element) => (element, true),
            None => (spec, false),
        };
        let found = self
            .types
            .get(id)
            .ok_or_else(|| ResolveError::UnknownType {
                id: id.to_string(),
                referrer: referrer.to_string(),
            })?;
        Ok(if is_list {
            TypeRef::List(ListType { element: found })
        } else {
            TypeRef::Type(found)
        })
    }
}
