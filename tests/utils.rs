#![allow(dead_code)]

use log::debug;
use project_template::cli::{build, BuildRequest};
use project_template::error::Result;
use project_template::store::TemplateStore;
use project_template::template::BuildSummary;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Directory holding the fixture templates.
pub const TEMPLATES_DIR: &str = "tests/templates";

/// Value bound to `cwd_dir_name` in every fixture build.
pub const CWD_DIR_NAME: &str = "demo";

fn relative_files(dir: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

fn print_content(label: &str, content: &[u8]) {
    println!("  --- {label} content:");
    match std::str::from_utf8(content) {
        Ok(s) => println!("{s}"),
        Err(_) => println!("  (binary content, {} bytes)", content.len()),
    }
}

/// Prints the files present in only one of two directories and the contents
/// of files that differ.
///
/// # Arguments
/// * `actual` - The materialized output.
/// * `expected` - The directory with the expected output.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let actual_files = relative_files(actual);
    let expected_files = relative_files(expected);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {actual:?}");
    println!("Expected output: {expected:?}");

    for file in actual_files.difference(&expected_files) {
        println!("  + {file:?} (only in actual output)");
    }
    for file in expected_files.difference(&actual_files) {
        println!("  - {file:?} (only in expected output)");
    }
    for file in actual_files.intersection(&expected_files) {
        let actual_content = fs::read(actual.join(file)).unwrap();
        let expected_content = fs::read(expected.join(file)).unwrap();
        if actual_content != expected_content {
            println!("\n  File: {file:?}");
            print_content("Actual", &actual_content);
            print_content("Expected", &expected_content);
        }
    }
    println!("=== End of Comparison ===\n");
}

/// A build request for `template` writing into `output_root`.
pub fn request(template: &str, output_root: &Path, args: &[&str]) -> BuildRequest {
    BuildRequest {
        template_name: template.to_string(),
        output_root: output_root.to_path_buf(),
        cwd_dir_name: CWD_DIR_NAME.to_string(),
        skip_conflicts: false,
        template_args: args.iter().map(|arg| arg.to_string()).collect(),
    }
}

/// Builds a fixture template from [`TEMPLATES_DIR`].
pub fn build_fixture(template: &str, output_root: &Path, args: &[&str]) -> Result<BuildSummary> {
    build(&TemplateStore::with_dir(TEMPLATES_DIR), &request(template, output_root, args))
}

/// Writes `files` (relative path, content) below `dir`.
pub fn write_tree(dir: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = dir.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

/// Builds a fixture template into a fresh directory, and asserts that the
/// result is identical to `expected_dir`.
///
/// # Arguments
/// * `template` - Name of the template under [`TEMPLATES_DIR`].
/// * `expected_dir` - Path to the directory with expected output.
/// * `args` - Template arguments, as given after `--`.
pub fn run_and_assert(template: &str, expected_dir: &str, args: &[&str]) {
    let tmp_dir = tempfile::tempdir().unwrap();
    build_fixture(template, tmp_dir.path(), args).unwrap();

    match dir_diff::is_different(tmp_dir.path(), expected_dir) {
        Ok(true) => {
            print_dir_diff(tmp_dir.path(), expected_dir.as_ref());
            panic!("Directories differ. See above for details.");
        }
        Ok(false) => {}
        Err(e) => debug!("Error comparing directories: {e:?}"),
    }
    assert!(!dir_diff::is_different(tmp_dir.path(), expected_dir).unwrap());
}
