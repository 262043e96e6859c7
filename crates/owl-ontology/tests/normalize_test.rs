//! Integration tests for loading and normalizing an OWL/XML ontology

use owl2proto_ontology::OntologyLoader;
use owl2proto_ir::Ontology;
use std::path::PathBuf;

const CLOUD: &str = "http://example.com/cloud/";

fn testdata_path(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("testdata")
        .join(path)
}

fn load_cloud() -> Ontology {
    OntologyLoader::new("Resource")
        .load_from_file(&testdata_path("cloud.owx"))
        .expect("fixture ontology should load")
}

fn iri(name: &str) -> String {
    format!("{CLOUD}{name}")
}

#[test]
fn test_all_declared_classes_become_resources() {
    let ontology = load_cloud();

    let names: Vec<&str> = ontology.resources().map(|r| r.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ActivityLogging",
            "AtRestEncryption",
            "BlockStorage",
            "BootLogging",
            "Compute",
            "Container",
            "Logging",
            "ObjectStorage",
            "Resource",
            "SecurityFeature",
            "Storage",
            "VirtualMachine",
        ]
    );
    assert!(!ontology.contains(&iri("Ghost")));
}

#[test]
fn test_hierarchy_is_linked_both_ways() {
    let ontology = load_cloud();

    let resource = ontology.get(&iri("Resource")).unwrap();
    assert_eq!(resource.parent, None);
    assert_eq!(resource.children, vec![iri("Compute"), iri("Storage")]);

    let container = ontology.get(&iri("Container")).unwrap();
    assert_eq!(container.parent.as_deref(), Some(iri("Compute").as_str()));

    let compute = ontology.get(&iri("Compute")).unwrap();
    assert_eq!(compute.children, vec![iri("VirtualMachine"), iri("Container")]);
    assert!(compute.is_abstract());
}

#[test]
fn test_labels_and_comments() {
    let ontology = load_cloud();

    let vm = ontology.get(&iri("VirtualMachine")).unwrap();
    assert_eq!(vm.name, "VirtualMachine");

    let resource = ontology.get(&iri("Resource")).unwrap();
    assert_eq!(
        resource.comments,
        vec!["A resource is anything that can be deployed in the cloud.".to_string()]
    );

    let enabled = &ontology.annotations["prop:enabled"];
    assert_eq!(
        enabled.comment().as_deref(),
        Some("Whether the feature is switched on.\nDefaults to false.")
    );
}

#[test]
fn test_data_property_shapes() {
    let ontology = load_cloud();
    let resource = ontology.get(&iri("Resource")).unwrap();

    let fields: Vec<(&str, &str)> = resource
        .relationships
        .iter()
        .map(|r| (r.name.as_str(), r.field_type.as_str()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("name", "string"),
            ("creationTime", "google.protobuf.Timestamp"),
            ("labels", "map<string, string>"),
            ("id", "string"),
        ]
    );

    let security = ontology.get(&iri("SecurityFeature")).unwrap();
    assert_eq!(security.relationships[0].field_type, "bool");
    assert_eq!(
        security.relationships[0].comment.as_deref(),
        Some("Whether the feature is switched on.\nDefaults to false.")
    );

    let logging = ontology.get(&iri("Logging")).unwrap();
    assert_eq!(logging.relationships[0].name, "retentionPeriod");
    assert_eq!(logging.relationships[0].field_type, "google.protobuf.Duration");
}

#[test]
fn test_object_properties() {
    let ontology = load_cloud();
    let vm = ontology.get(&iri("VirtualMachine")).unwrap();

    let objects: Vec<(&str, &str)> = vm
        .object_relationships
        .iter()
        .map(|o| (o.property_name.as_str(), o.target_name.as_str()))
        .collect();
    assert_eq!(objects, vec![("runsOn", "Resource"), ("offers", "ActivityLogging")]);
    assert_eq!(vm.object_relationships[0].target, iri("Resource"));
    assert_eq!(vm.object_relationships[0].owner, iri("VirtualMachine"));
}

#[test]
fn test_prefixes_are_kept() {
    let ontology = load_cloud();

    assert_eq!(ontology.prefixes.len(), 5);
    assert_eq!(ontology.prefixes.get("prop"), Some("http://example.com/cloud/prop/"));
    assert_eq!(ontology.prefixes.abbreviate(&iri("Storage")), ":Storage");
}

#[test]
fn test_ir_serializes_to_json() {
    let ontology = load_cloud();

    let json = serde_json::to_string(&ontology).unwrap();
    let back: Ontology = serde_json::from_str(&json).unwrap();
    assert_eq!(back.len(), ontology.len());
    assert_eq!(back.get(&iri("VirtualMachine")), ontology.get(&iri("VirtualMachine")));
}
