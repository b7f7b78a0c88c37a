use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn minionsuite(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_minionsuite"))
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .env_remove("MINIONSUITE_LOG_LEVEL")
        .args(args)
        .output()
        .expect("run minionsuite")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempdir().unwrap();
    let output = minionsuite(dir.path(), &[]);

    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.starts_with("Usage: minionsuite [generator] [parameters]"));
    assert!(text.contains("mvccontroller:test:"));
}

#[test]
fn test_generator_help_writes_nothing() {
    let dir = tempdir().unwrap();
    let output = minionsuite(dir.path(), &["servicegen", "-h"]);

    assert!(output.status.success());
    assert!(stdout(&output).contains("-grm|--generate-result-model:"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_unknown_generator_fails() {
    let dir = tempdir().unwrap();
    let output = minionsuite(dir.path(), &["viewgen"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("viewgen is an invalid generator."));
}

#[test]
fn test_missing_model_fails_before_writing() {
    let dir = tempdir().unwrap();
    let output = minionsuite(
        dir.path(),
        &["apicontroller", "-m", "Models/Missing.cs", "-ns", "Blog", "-o", "out"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Missing.cs doesn't exist."));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_servicegen_with_short_flags() {
    let dir = tempdir().unwrap();
    let model = fixture("Post.cs");
    let output = minionsuite(
        dir.path(),
        &[
            "servicegen",
            "-m",
            model.to_str().unwrap(),
            "-ns",
            "Blog.Services",
            "-o",
            "Services",
            "-db",
            "BlogContext",
            "-gpm",
            "-grm",
        ],
    );
    assert!(output.status.success(), "{}", stderr(&output));

    let services = dir.path().join("Services");
    for name in ["IPostService.cs", "PostService.cs", "IPageModel.cs", "PageModel.cs", "ResultModel.cs"] {
        assert!(services.join(name).is_file(), "{name} missing");
        assert!(stdout(&output).contains(name));
    }
    let class = fs::read_to_string(services.join("PostService.cs")).unwrap();
    assert!(class.contains("public PostService(BlogContext context)"));
}

#[test]
fn test_project_config_supplies_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("minionsuite.toml"),
        "namespace = \"Blog.Controllers\"\noutput = \"Controllers\"\npage_size = 12\n",
    )
    .unwrap();
    let model = fixture("Counter.cs");

    let output = minionsuite(dir.path(), &["mvccontroller", "-m", model.to_str().unwrap()]);
    assert!(output.status.success(), "{}", stderr(&output));

    let text = fs::read_to_string(dir.path().join("Controllers").join("CountersController.cs")).unwrap();
    assert!(text.contains("namespace Blog.Controllers\n"));
    assert!(text.contains("private const int PAGE_SIZE = 12;"));
}

#[test]
fn test_explicit_config_must_exist() {
    let dir = tempdir().unwrap();
    let model = fixture("Counter.cs");
    let output = minionsuite(
        dir.path(),
        &["apicontroller", "-m", model.to_str().unwrap(), "--config", "absent.toml"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("absent.toml"));
}
