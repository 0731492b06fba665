use project_template::cli::{build, list};
use project_template::error::Error;
use project_template::store::TemplateStore;
use std::fs;
use test_log::test;
mod utils;
use utils::{build_fixture, request, run_and_assert, write_tree, TEMPLATES_DIR};

#[test]
fn test_executable_file_is_evaluated() {
    run_and_assert("greeting", "tests/expected/greeting", &[]);
}

#[test]
fn test_template_arguments_reach_the_scope() {
    run_and_assert(
        "rust_cli",
        "tests/expected/rust_cli",
        &["--name", "widget", "--count", "3", "--features", "cli", "log"],
    );
}

#[test]
fn test_custom_delimiters() {
    run_and_assert("custom_delimiters", "tests/expected/custom_delimiters", &[]);
}

#[test]
fn test_defaults_apply_without_arguments() {
    let tmp_dir = tempfile::tempdir().unwrap();
    build_fixture("rust_cli", tmp_dir.path(), &[]).unwrap();

    let main = fs::read_to_string(tmp_dir.path().join("src/main.rs")).unwrap();
    assert!(main.contains("for _ in 0..1 {"));
    assert!(main.contains("Hello from app!"));
    let readme = fs::read_to_string(tmp_dir.path().join("README.md")).unwrap();
    assert!(readme.contains("Features: none"));
}

#[test]
fn test_builds_are_deterministic() {
    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let args = ["--name", "twice"];
    build_fixture("rust_cli", first.path(), &args).unwrap();
    build_fixture("rust_cli", second.path(), &args).unwrap();

    assert!(!dir_diff::is_different(first.path(), second.path()).unwrap());
}

#[test]
fn test_conflict_aborts_the_build() {
    let templates = tempfile::tempdir().unwrap();
    write_tree(
        templates.path(),
        &[
            ("conflict/config.json", "{}"),
            ("conflict/files/out.txt", "generated"),
            ("conflict/files/z.txt", "later"),
        ],
    );
    let output = tempfile::tempdir().unwrap();
    fs::write(output.path().join("out.txt"), "user data").unwrap();

    let store = TemplateStore::with_dir(templates.path());
    let err = build(&store, &request("conflict", output.path(), &[])).unwrap_err();

    match err {
        Error::DestinationConflict { path } => assert!(path.ends_with("out.txt")),
        other => panic!("Expected DestinationConflict, got {other}"),
    }
    assert_eq!(fs::read_to_string(output.path().join("out.txt")).unwrap(), "user data");
    assert!(!output.path().join("z.txt").exists());
}

#[test]
fn test_skip_conflicts_keeps_existing_files() {
    let templates = tempfile::tempdir().unwrap();
    write_tree(
        templates.path(),
        &[
            ("conflict/config.json", "{}"),
            ("conflict/files/out.txt", "generated"),
            ("conflict/files/z.txt", "later"),
        ],
    );
    let output = tempfile::tempdir().unwrap();
    fs::write(output.path().join("out.txt"), "user data").unwrap();

    let mut build_request = request("conflict", output.path(), &[]);
    build_request.skip_conflicts = true;
    let summary = build(&TemplateStore::with_dir(templates.path()), &build_request).unwrap();

    assert_eq!(summary.skipped, vec![output.path().join("out.txt")]);
    assert_eq!(summary.copied, vec![output.path().join("z.txt")]);
    assert_eq!(fs::read_to_string(output.path().join("out.txt")).unwrap(), "user data");
    assert_eq!(fs::read_to_string(output.path().join("z.txt")).unwrap(), "later");
}

#[test]
fn test_overridable_files_are_replaced() {
    let tmp_dir = tempfile::tempdir().unwrap();
    fs::write(tmp_dir.path().join("README.md"), "outdated").unwrap();

    let summary = build_fixture("rust_cli", tmp_dir.path(), &["--name", "widget"]).unwrap();

    let readme = fs::read_to_string(tmp_dir.path().join("README.md")).unwrap();
    assert!(readme.starts_with("# Widget\n"));
    assert!(summary.written.contains(&tmp_dir.path().join("README.md")));
}

#[test]
fn test_directory_in_the_way_cannot_be_overridden() {
    let tmp_dir = tempfile::tempdir().unwrap();
    fs::create_dir(tmp_dir.path().join("README.md")).unwrap();

    let err = build_fixture("rust_cli", tmp_dir.path(), &[]).unwrap_err();
    assert!(matches!(err, Error::CannotOverrideDirectory { path } if path.ends_with("README.md")));
}

#[test]
fn test_non_executable_files_are_copied_byte_for_byte() {
    let templates = tempfile::tempdir().unwrap();
    let bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, 0xff, b'<', b'<', b'<'];
    write_tree(templates.path(), &[("binary/config.json", r#"{ "can_execute": ["*.txt"] }"#)]);
    fs::create_dir_all(templates.path().join("binary/files")).unwrap();
    fs::write(templates.path().join("binary/files/logo.png"), bytes).unwrap();
    let output = tempfile::tempdir().unwrap();

    build(&TemplateStore::with_dir(templates.path()), &request("binary", output.path(), &[]))
        .unwrap();
    assert_eq!(fs::read(output.path().join("logo.png")).unwrap(), bytes);
}

#[test]
fn test_config_scope_sees_cwd_dir_name() {
    let templates = tempfile::tempdir().unwrap();
    write_tree(
        templates.path(),
        &[
            (
                "named/config.json",
                r#"{ "can_execute": ["*"], "scope": { "project": "<<<cwd_dir_name>>>-app" } }"#,
            ),
            ("named/files/name.txt", "<<<project>>> in <<<cwd_dir_name>>>"),
        ],
    );
    let output = tempfile::tempdir().unwrap();

    build(&TemplateStore::with_dir(templates.path()), &request("named", output.path(), &[]))
        .unwrap();
    assert_eq!(fs::read_to_string(output.path().join("name.txt")).unwrap(), "demo-app in demo");
}

#[test]
fn test_unterminated_expression_is_reported() {
    let templates = tempfile::tempdir().unwrap();
    write_tree(
        templates.path(),
        &[
            ("broken/config.json", r#"{ "can_execute": ["*.txt"] }"#),
            ("broken/files/bad.txt", "line one\nvalue = <<<1 + 1\n"),
        ],
    );
    let output = tempfile::tempdir().unwrap();

    let store = TemplateStore::with_dir(templates.path());
    let err = build(&store, &request("broken", output.path(), &[])).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad.txt"));
    assert!(message.contains("Text row: 2"));
    assert!(message.contains("Text column: 8"));
    assert!(!output.path().join("bad.txt").exists());
}

#[test]
fn test_invalid_template_arguments_are_rejected() {
    let tmp_dir = tempfile::tempdir().unwrap();

    let err = build_fixture("rust_cli", tmp_dir.path(), &["--count", "many"]).unwrap_err();
    assert!(matches!(err, Error::ArgumentParsingError(message) if message.contains("many")));

    let err = build_fixture("rust_cli", tmp_dir.path(), &["--unknown"]).unwrap_err();
    assert!(matches!(err, Error::ArgumentParsingError(_)));
    assert_eq!(fs::read_dir(tmp_dir.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_config_is_a_load_error() {
    let templates = tempfile::tempdir().unwrap();
    write_tree(templates.path(), &[("bad/config.json", r#"{ "can_override": "*.md" }"#)]);
    let output = tempfile::tempdir().unwrap();

    let store = TemplateStore::with_dir(templates.path());
    let err = build(&store, &request("bad", output.path(), &[])).unwrap_err();
    match err {
        Error::ConfigLoadError { template, source, .. } => {
            assert_eq!(template, "bad");
            assert!(matches!(*source, Error::ConfigValidationError { .. }));
        }
        other => panic!("Expected ConfigLoadError, got {other}"),
    }
}

#[test]
fn test_missing_template_and_store() {
    let output = tempfile::tempdir().unwrap();

    let err = build_fixture("does_not_exist", output.path(), &[]).unwrap_err();
    assert!(matches!(err, Error::TemplateNotFound { name, .. } if name == "does_not_exist"));

    let missing = TemplateStore::with_dir(output.path().join("nowhere"));
    let err = build(&missing, &request("greeting", output.path(), &[])).unwrap_err();
    assert!(matches!(err, Error::TemplatesDirectoryMissing { .. }));
    assert!(matches!(list(&missing), Err(Error::TemplatesDirectoryMissing { .. })));
}

#[test]
fn test_list_fixture_templates() {
    let listing = list(&TemplateStore::with_dir(TEMPLATES_DIR)).unwrap();
    let names: Vec<&str> = listing.templates.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["custom_delimiters", "greeting", "rust_cli"]);
    assert_eq!(listing.templates[1].description, "Smallest possible template");
    assert!(listing.errors.is_empty());
}
