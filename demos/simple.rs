use model_analyzer::analyze;
use model_analyzer::model::HasConcept;

fn main() {
    let model_data = r#"{
        "types": [
            { "name": "Vm", "links": [ { "name": "disks", "type": "Disk[]" } ] },
            { "name": "Disk", "doc": "A virtual disk. Attached to VMs.", "html": "A virtual disk. Attached to VMs." }
        ],
        "services": [ { "name": "vms" } ],
        "root": "vms"
    }"#;

    match analyze(model_data, "example.json") {
        Ok(model) => {
            for ty in &model.types {
                println!("{}: {}", ty.id(), ty.concept().summary);
                if let Some(st) = ty.as_struct() {
                    for member in st.members() {
                        if let Some(Ok(type_ref)) = member.type_ref.as_ref().map(|r| r.resolved()) {
                            println!("  {} -> {}", member.id(), model.type_ref_name(type_ref));
                        }
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to analyze model: {e:?}");
        }
    }
}
