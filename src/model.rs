//! The cross-linked model graph.
//!
//! Types and services are stored in arenas owned by [`Model`]. Every cross-entity field is a
//! copyable handle into those arenas ([`TypeId`], [`ServiceId`], [`MethodId`]), so structs that
//! reference each other, or themselves, never form ownership cycles.

use crate::error::ModelError;
use crate::names::Name;

/// Handle of a type in [`Model::types`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub(crate) usize);

impl TypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of a service in [`Model::services`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServiceId(pub(crate) usize);

impl ServiceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle of a method: the owning service and the position in its method list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodId {
    pub service: ServiceId,
    pub index: usize,
}

/// Base shape shared by every node of the graph.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Concept {
    /// Raw schema identifier.
    pub id: String,
    pub name: Name,
    pub doc: String,
    pub html: String,
    /// First sentence of `html`.
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    pub name: Name,
    pub parameters: Vec<AnnotationParameter>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct AnnotationParameter {
    pub id: String,
    pub name: Name,
    pub values: Vec<String>,
}

/// A reference that starts as the textual spec from the input and is rewritten in place
/// by the resolution phase.
#[derive(Debug, Clone, PartialEq)]
pub enum Reference<T> {
    Unresolved(String),
    Resolved(T),
}

impl<T> Reference<T> {
    /// Returns the linked target.
    ///
    /// # Errors
    /// Returns [`ModelError::Unresolved`] if the reference still holds its textual spec.
    pub fn resolved(&self) -> Result<&T, ModelError> {
        match self {
            Reference::Resolved(target) => Ok(target),
            Reference::Unresolved(spec) => Err(ModelError::Unresolved { spec: spec.clone() }),
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, Reference::Resolved(_))
    }

    /// The textual spec, while the reference is still unresolved.
    pub fn spec(&self) -> Option<&str> {
        match self {
            Reference::Unresolved(spec) => Some(spec),
            Reference::Resolved(_) => None,
        }
    }
}

/// A resolved type reference: either a declared type or a list of one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Type(TypeId),
    List(ListType),
}

impl TypeRef {
    /// The declared type behind this reference, looking through lists.
    pub fn target(&self) -> TypeId {
        match self {
            TypeRef::Type(id) => *id,
            TypeRef::List(list) => list.element,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, TypeRef::List(_))
    }
}

/// Synthesized while resolving a `Name[]` spec; never present in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListType {
    pub element: TypeId,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Document {
    pub concept: Concept,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Primitive(PrimitiveType),
    Enum(EnumType),
    Struct(StructType),
}

impl Type {
    pub fn concept(&self) -> &Concept {
        match self {
            Type::Primitive(t) => &t.concept,
            Type::Enum(t) => &t.concept,
            Type::Struct(t) => &t.concept,
        }
    }

    pub fn id(&self) -> &str {
        &self.concept().id
    }

    pub fn as_struct(&self) -> Option<&StructType> {
        match self {
            Type::Struct(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            Type::Enum(t) => Some(t),
            _ => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, Type::Primitive(_))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct PrimitiveType {
    pub concept: Concept,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnumType {
    pub concept: Concept,
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct EnumValue {
    pub concept: Concept,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub concept: Concept,
    pub attributes: Vec<StructMember>,
    pub links: Vec<StructMember>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberKind {
    Attribute,
    Link,
}

/// An attribute or link of a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct StructMember {
    pub concept: Concept,
    pub kind: MemberKind,
    /// `None` when the input gave no type.
    pub type_ref: Option<Reference<TypeRef>>,
    pub declaring_type: TypeId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub concept: Concept,
    pub methods: Vec<Method>,
    pub locators: Vec<Locator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Method {
    pub concept: Concept,
    pub parameters: Vec<Parameter>,
    pub service: ServiceId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub concept: Concept,
    pub type_ref: Option<Reference<TypeRef>>,
    pub is_in: bool,
    pub is_out: bool,
    /// Set only for parameters of a method, never for locator parameters.
    pub method: Option<MethodId>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    pub concept: Concept,
    pub parameters: Vec<Parameter>,
    pub service: Reference<ServiceId>,
}

/// Gives uniform access to the [`Concept`] embedded in every node.
pub trait HasConcept {
    fn concept(&self) -> &Concept;

    fn id(&self) -> &str {
        &self.concept().id
    }

    fn name(&self) -> &Name {
        &self.concept().name
    }

    fn summary(&self) -> &str {
        &self.concept().summary
    }
}

macro_rules! impl_has_concept {
    ($($node:ty),* $(,)?) => {
        $(
            impl HasConcept for $node {
                fn concept(&self) -> &Concept {
                    &self.concept
                }
            }
        )*
    };
}

impl_has_concept!(
    Document,
    PrimitiveType,
    EnumType,
    EnumValue,
    StructType,
    StructMember,
    Service,
    Method,
    Parameter,
    Locator,
);

impl HasConcept for Type {
    fn concept(&self) -> &Concept {
        Type::concept(self)
    }
}

/// The analyzed model. Owns every document, type and service.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Model {
    pub documents: Vec<Document>,
    pub types: Vec<Type>,
    pub services: Vec<Service>,
    pub root: Option<ServiceId>,
}

impl Model {
    /// # Panics
    /// Panics if `id` was not produced for this model.
    pub fn type_(&self, id: TypeId) -> &Type {
        &self.types[id.0]
    }

    /// # Panics
    /// Panics if `id` was not produced for this model.
    pub fn service(&self, id: ServiceId) -> &Service {
        &self.services[id.0]
    }

    /// # Panics
    /// Panics if `id` was not produced for this model.
    pub fn method(&self, id: MethodId) -> &Method {
        &self.service(id.service).methods[id.index]
    }

    pub fn root_service(&self) -> Option<&Service> {
        self.root.map(|id| self.service(id))
    }

    pub fn type_ids(&self) -> impl Iterator<Item = TypeId> {
        (0..self.types.len()).map(TypeId)
    }

    pub fn service_ids(&self) -> impl Iterator<Item = ServiceId> {
        (0..self.services.len()).map(ServiceId)
    }

    /// Renders a resolved reference as `Disk` or `Disk[]`.
    pub fn type_ref_name(&self, type_ref: &TypeRef) -> String {
        match type_ref {
            TypeRef::Type(id) => self.type_(*id).id().to_string(),
            TypeRef::List(list) => format!("{}[]", self.type_(list.element).id()),
        }
    }
}
