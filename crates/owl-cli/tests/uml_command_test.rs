use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::{Command, Output};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static TEMP_FILE_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cargo_bin() -> PathBuf {
    if let Ok(path) = env::var("CARGO_BIN_EXE_owl2proto") {
        return PathBuf::from(path);
    }

    let target_dir = env::var("CARGO_TARGET_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| repo_root().join("target"));
    let executable_name = format!("owl2proto{}", std::env::consts::EXE_SUFFIX);
    let fallback = target_dir.join("debug").join(executable_name);

    if fallback.exists() {
        return fallback;
    }

    panic!(
        "CARGO_BIN_EXE_owl2proto is not set and fallback binary was not found at {}",
        fallback.display()
    );
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn testdata_path(path: &str) -> PathBuf {
    repo_root().join("testdata").join(path)
}

fn unique_temp_path(name: &str, extension: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time after epoch")
        .as_nanos();
    let counter = TEMP_FILE_COUNTER.fetch_add(1, Ordering::SeqCst);
    let filename = format!(
        "owl2proto-cli-{name}-{}-{nanos}-{counter}.{extension}",
        std::process::id()
    );
    env::temp_dir().join(filename)
}


fn run_owl2proto(args: &[&str]) -> Output {
    Command::new(cargo_bin())
        .args(args)
        .output()
        .expect("run owl2proto")
}

fn assert_exit_code(output: &Output, expected: i32) {
    let actual = output.status.code().unwrap_or(-1);
    assert_eq!(
        actual,
        expected,
        "unexpected exit code; stdout: {}; stderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

fn remove_if_exists(path: &Path) {
    let _ = fs::remove_file(path);
}

#[test]
fn uml_writes_diagram() {
    let output_path = unique_temp_path("cloud", "puml");

    let output = run_owl2proto(&[
        "uml",
        testdata_path("cloud.owx").to_string_lossy().as_ref(),
        "--root-resource-name",
        "Resource",
        "--output-path",
        output_path.to_string_lossy().as_ref(),
    ]);
    assert_exit_code(&output, 0);

    let diagram = fs::read_to_string(&output_path).expect("diagram should be written");
    assert!(diagram.starts_with("@startuml ontology\n"));
    assert!(diagram.ends_with("@enduml\n"));
    assert!(diagram.contains("class SecurityFeature {\n\tenabled\n}\n"));
    assert!(diagram.contains("Logging <|-- BootLogging"));
    assert!(diagram.contains("ActivityLogging <-- VirtualMachine : offers"));

    remove_if_exists(&output_path);
}

#[test]
fn uml_missing_input_fails_without_output() {
    let output_path = unique_temp_path("missing-input", "puml");
    let missing = unique_temp_path("does-not-exist", "owx");

    let output = run_owl2proto(&[
        "uml",
        missing.to_string_lossy().as_ref(),
        "--root-resource-name",
        "Resource",
        "--output-path",
        output_path.to_string_lossy().as_ref(),
    ]);

    assert!(!output.status.success());
    assert!(!output_path.exists());
}
