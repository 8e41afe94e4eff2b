use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use velo_cli::cli::commands::{
    artifact_file_name, classify_document, generate_command, load_config, load_document,
    write_artifacts,
};
use velo_codegen::{Artifact, CodegenConfig, ComponentKind};

const SIGN_IN: &str = r#"{
    "root": {
        "id": "0:1",
        "type": "FRAME",
        "name": "Sign In",
        "layoutMode": "VERTICAL",
        "itemSpacing": 16,
        "fills": [{ "type": "SOLID", "color": { "r": 1, "g": 1, "b": 1 } }],
        "children": [
            { "id": "0:2", "type": "FRAME", "name": "Top App Bar" },
            {
                "id": "2:1",
                "type": "INSTANCE",
                "name": "Email",
                "children": [{ "id": "2:2", "type": "TEXT", "name": "Text", "characters": "Email address" }]
            },
            {
                "id": "5:1",
                "type": "INSTANCE",
                "name": "Remember",
                "children": [{ "id": "5:2", "type": "TEXT", "name": "Label", "characters": "Remember me" }]
            },
            {
                "id": "6:1",
                "type": "INSTANCE",
                "name": "Submit",
                "children": [{ "id": "6:2", "type": "TEXT", "name": "Button", "characters": "Sign in" }]
            }
        ]
    },
    "instances": { "2:1": "125:1", "5:1": "153:1", "6:1": "159:1" }
}"#;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_document() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "sign_in.json", SIGN_IN);

    let document = load_document(&path).unwrap();
    let root = document.root.unwrap();
    assert_eq!(root.name, "Sign In");
    assert_eq!(root.children.len(), 4);
    assert_eq!(document.source.instances.len(), 3);
}

#[test]
fn test_load_document_reports_invalid_json() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "broken.json", "{ \"root\": ");

    let err = load_document(&path).unwrap_err();
    assert!(err.to_string().contains("Invalid design document"));
}

#[test]
fn test_load_missing_document() {
    let dir = TempDir::new().unwrap();
    assert!(load_document(&dir.path().join("absent.json")).is_err());
}

#[test]
fn test_load_config_defaults() {
    assert_eq!(load_config(None).unwrap(), CodegenConfig::default());
}

#[test]
fn test_load_partial_config() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "velo.json", r#"{ "navigation_shell": false, "max_width": null }"#);

    let config = load_config(Some(&path)).unwrap();
    assert!(!config.navigation_shell);
    assert_eq!(config.max_width, None);
    assert!(config.register_fonts);
    assert!(config.is_skipped("Top App Bar"));
}

#[test]
fn test_generate_writes_view_and_view_model() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "sign_in.json", SIGN_IN);
    let output_dir = dir.path().join("generated");

    generate_command(&input, &output_dir, None, false).unwrap();

    let view = fs::read_to_string(output_dir.join("SignInView.swift")).unwrap();
    let view_model = fs::read_to_string(output_dir.join("SignInViewModel.swift")).unwrap();

    assert!(view.contains("struct SignInView: View {"));
    assert!(view.contains("text: $viewModel.emailAddress,"));
    assert!(view.contains("CheckboxView(isChecked: $viewModel.isChecked, text: \"Remember me\")"));
    assert!(!view.contains("Top App Bar"));
    assert!(view_model.contains("@Published var emailAddress: String = \"\""));
    assert!(view_model.contains("@Published var isChecked: Bool = false"));
}

#[test]
fn test_generate_without_selection_writes_diagnostic() {
    let dir = TempDir::new().unwrap();
    let input = write_fixture(&dir, "empty.json", "{}");
    let output_dir = dir.path().join("generated");

    let err = generate_command(&input, &output_dir, None, false).unwrap_err();
    assert!(err.to_string().contains("No valid node selected."));

    let diagnostic = fs::read_to_string(output_dir.join("CodegenError.txt")).unwrap();
    assert_eq!(diagnostic, "No valid node selected.");
}

#[test]
fn test_artifact_file_names() {
    assert_eq!(artifact_file_name(&Artifact::swift("HomeView.swift", "")), "HomeView.swift");
    assert_eq!(artifact_file_name(&Artifact::diagnostic("boom")), "CodegenError.txt");
}

#[test]
fn test_write_artifacts_creates_directory() {
    let dir = TempDir::new().unwrap();
    let output_dir = dir.path().join("nested").join("out");
    let artifacts = vec![
        Artifact::swift("AView.swift", "struct AView {}"),
        Artifact::swift("AViewModel.swift", "class AViewModel {}"),
    ];

    let written = write_artifacts(&artifacts, &output_dir).unwrap();
    assert_eq!(written, [output_dir.join("AView.swift"), output_dir.join("AViewModel.swift")]);
    assert_eq!(fs::read_to_string(&written[1]).unwrap(), "class AViewModel {}");
}

#[test]
fn test_classify_document() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(&dir, "sign_in.json", SIGN_IN);
    let document = load_document(&path).unwrap();

    let instances = classify_document(&document, &CodegenConfig::default()).unwrap();
    let kinds: Vec<_> = instances.iter().map(|i| (i.id.as_str(), i.kind)).collect();
    assert_eq!(
        kinds,
        [
            ("2:1", ComponentKind::InputField),
            ("5:1", ComponentKind::Checkbox),
            ("6:1", ComponentKind::Button),
        ]
    );
}

#[test]
fn test_classify_document_without_root() {
    let document = serde_json::from_str("{}").unwrap();
    assert!(classify_document(&document, &CodegenConfig::default()).is_err());
}
