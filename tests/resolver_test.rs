use miette::Report;
use model_analyzer::error::{ModelError, ResolveError};
use model_analyzer::model::{HasConcept, ListType, Model, Reference, Type, TypeRef};
use model_analyzer::analyze;

fn resolve_ok(source: &str) -> Model {
    match analyze(source, "test.json") {
        Ok(model) => model,
        Err(err) => {
            let report = Report::from(err);
            panic!("{:#}", report);
        }
    }
}

fn resolve_err(source: &str) -> ResolveError {
    match analyze(source, "test.json") {
        Ok(_) => panic!("Expected a ResolveError, but got Ok"),
        Err(ModelError::Resolve(err)) => err,
        Err(other) => panic!("Expected a ResolveError, but got {other:?}"),
    }
}

fn member_type(model: &Model, type_id: &str, member_id: &str) -> TypeRef {
    let ty = model.type_(model.find_type(type_id).unwrap());
    let member = ty.as_struct().unwrap().find_member(member_id).unwrap();
    *member.type_ref.as_ref().unwrap().resolved().unwrap()
}

#[test]
fn test_forward_and_backward_references_resolve_alike() {
    let forward = resolve_ok(
        r#"{ "types": [
            { "name": "Vm", "links": [ { "name": "disk", "type": "Disk" } ] },
            { "name": "Disk" }
        ] }"#,
    );
    let backward = resolve_ok(
        r#"{ "types": [
            { "name": "Disk" },
            { "name": "Vm", "links": [ { "name": "disk", "type": "Disk" } ] }
        ] }"#,
    );

    let f = member_type(&forward, "Vm", "disk");
    let b = member_type(&backward, "Vm", "disk");
    assert_eq!(forward.type_(f.target()).id(), "Disk");
    assert_eq!(backward.type_(b.target()).id(), "Disk");
    assert!(!f.is_list() && !b.is_list());
}

#[test]
fn test_list_suffix() {
    let model = resolve_ok(
        r#"{ "types": [
            { "name": "Vm", "attributes": [ { "name": "disks", "type": "Disk[]" } ] },
            { "name": "Disk" }
        ] }"#,
    );
    let disk = model.find_type("Disk").unwrap();
    assert_eq!(
        member_type(&model, "Vm", "disks"),
        TypeRef::List(ListType { element: disk })
    );
}

#[test]
fn test_self_reference() {
    let model = resolve_ok(
        r#"{ "types": [
            { "name": "Node", "links": [ { "name": "parent", "type": "Node" }, { "name": "children", "type": "Node[]" } ] }
        ] }"#,
    );
    let node = model.find_type("Node").unwrap();
    assert_eq!(member_type(&model, "Node", "parent"), TypeRef::Type(node));
    assert_eq!(member_type(&model, "Node", "children").target(), node);
}

#[test]
fn test_every_member_is_resolved_and_declared() {
    let model = resolve_ok(
        r#"{ "types": [
            { "name": "A", "attributes": [ { "name": "b", "type": "B" } ], "links": [ { "name": "c", "type": "C[]" } ] },
            { "name": "B", "links": [ { "name": "a", "type": "A" } ] },
            { "name": "C", "kind": "primitive" }
        ] }"#,
    );
    for (id, ty) in model.type_ids().zip(&model.types) {
        if let Type::Struct(st) = ty {
            for member in st.members() {
                assert_eq!(member.declaring_type, id);
                assert!(member.type_ref.as_ref().unwrap().is_resolved());
            }
        }
    }
}

#[test]
fn test_method_parameters_point_back_and_locator_parameters_do_not() {
    let model = resolve_ok(
        r#"{
            "types": [ { "name": "string", "kind": "primitive" } ],
            "services": [
                {
                    "name": "vms",
                    "methods": [
                        { "name": "list", "parameters": [ { "name": "search", "type": "string", "in": true } ] },
                        { "name": "add", "parameters": [ { "name": "name", "type": "string" } ] }
                    ],
                    "locators": [ { "name": "vm", "service": "vm", "parameters": [ { "name": "id", "type": "string" } ] } ]
                },
                { "name": "vm" }
            ]
        }"#,
    );
    let vms = model.service(model.find_service("vms").unwrap());
    for method in &vms.methods {
        for parameter in &method.parameters {
            let owner = parameter.method.unwrap();
            assert_eq!(model.method(owner), method);
        }
    }
    for locator in &vms.locators {
        for parameter in &locator.parameters {
            assert!(parameter.method.is_none());
            assert_eq!(
                parameter.type_ref,
                Some(Reference::Unresolved("string".to_string()))
            );
        }
    }
}

#[test]
fn test_root_resolution() {
    let model = resolve_ok(r#"{ "services": [ { "name": "a" }, { "name": "b" } ], "root": "b" }"#);
    assert_eq!(model.root, model.find_service("b"));
    assert_eq!(model.root_service().unwrap().id(), "b");

    let no_root = resolve_ok(r#"{ "services": [ { "name": "a" } ] }"#);
    assert!(no_root.root.is_none());
}

#[test]
fn test_duplicate_identifiers_resolve_to_first() {
    let model = resolve_ok(
        r#"{ "types": [
            { "name": "Disk", "kind": "primitive" },
            { "name": "Vm", "links": [ { "name": "disk", "type": "Disk" } ] },
            { "name": "Disk" }
        ] }"#,
    );
    let disk = member_type(&model, "Vm", "disk").target();
    assert_eq!(disk.index(), 0);
    assert!(model.type_(disk).is_primitive());
}

#[test]
fn test_unresolvable_attribute_fails() {
    let err = resolve_err(
        r#"{ "types": [ { "name": "Vm", "attributes": [ { "name": "x", "type": "Nope" } ] } ] }"#,
    );
    assert_eq!(
        err,
        ResolveError::UnknownType {
            id: "Nope".to_string(),
            referrer: "Vm.x".to_string(),
        }
    );
}

#[test]
fn test_unresolvable_list_element_fails() {
    let err = resolve_err(
        r#"{ "types": [ { "name": "Vm", "links": [ { "name": "nics", "type": "Nic[]" } ] } ] }"#,
    );
    assert!(matches!(err, ResolveError::UnknownType { id, .. } if id == "Nic"));
}

#[test]
fn test_locator_without_target_fails() {
    let err = resolve_err(r#"{ "services": [ { "name": "a", "locators": [ { "name": "b" } ] } ] }"#);
    assert!(matches!(err, ResolveError::UnknownService { id, .. } if id.is_empty()));
}

#[test]
fn test_unknown_locator_parameter_type_is_not_checked() {
    let model = resolve_ok(
        r#"{ "services": [
            { "name": "a", "locators": [ { "name": "b", "service": "a", "parameters": [ { "name": "id", "type": "Nope" } ] } ] }
        ] }"#,
    );
    let locator = &model.services[0].locators[0];
    assert_eq!(locator.parameters[0].type_ref.as_ref().unwrap().spec(), Some("Nope"));
}

#[test]
fn test_empty_type_spec_is_treated_as_absent() {
    let model = resolve_ok(
        r#"{ "types": [ { "name": "Vm", "attributes": [ { "name": "x", "type": "" } ] } ] }"#,
    );
    let vm = model.types[0].as_struct().unwrap();
    assert_eq!(vm.attributes[0].type_ref, None);
}
