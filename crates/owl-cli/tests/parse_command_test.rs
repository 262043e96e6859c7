use std::env;
use std::fs;
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

fn write_temp_file(name: &str, extension: &str, content: &str) -> PathBuf {
    let path = unique_temp_path(name, extension);
    fs::write(&path, content).expect("temporary file should be writable");
    path
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

#[test]
fn parse_outputs_json_to_stdout() {
    let output = run_owl2proto(&[
        "parse",
        testdata_path("cloud.owx").to_string_lossy().as_ref(),
        "--root-resource-name",
        "Resource",
    ]);
    assert_exit_code(&output, 0);

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["root_resource"], "Resource");

    let resources = json["resources"].as_object().expect("resources map");
    assert_eq!(resources.len(), 12);
    assert_eq!(
        resources["http://example.com/cloud/VirtualMachine"]["parent"],
        "http://example.com/cloud/Compute"
    );
    assert_eq!(json["prefixes"]["prop"], "http://example.com/cloud/prop/");
}

#[test]
fn parse_writes_json_file() {
    let output_path = unique_temp_path("parsed", "json");

    let output = run_owl2proto(&[
        "parse",
        testdata_path("cloud.owx").to_string_lossy().as_ref(),
        "--root-resource-name",
        "Resource",
        "--output",
        output_path.to_string_lossy().as_ref(),
    ]);
    assert_exit_code(&output, 0);
    assert!(output.stdout.is_empty());

    let content = fs::read_to_string(&output_path).expect("JSON should be written");
    let json: serde_json::Value = serde_json::from_str(&content).expect("valid JSON");
    assert!(json["resources"]["http://example.com/cloud/Resource"]["children"].is_array());

    let _ = fs::remove_file(output_path);
}

#[test]
fn parse_malformed_input_fails() {
    let input = write_temp_file("malformed", "owx", "<Ontology><Prefix name=\"ex\"");

    let output = run_owl2proto(&[
        "parse",
        input.to_string_lossy().as_ref(),
        "--root-resource-name",
        "Resource",
    ]);

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let _ = fs::remove_file(input);
}
