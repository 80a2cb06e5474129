//! CLI surface tests: help, version, plan and completions

mod common;

use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    common::launchkit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--entry-point"));
}

#[test]
fn test_version_flag() {
    common::launchkit_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_version_command_shows_config_locations() {
    let workspace = common::TestWorkspace::new();
    workspace
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("launchkit"))
        .stdout(predicate::str::contains(format!(
            "Minimum Rust version: {}",
            env!("CARGO_PKG_RUST_VERSION")
        )))
        .stdout(predicate::str::contains("launchkit.yaml"));
}

#[test]
fn test_verbose_conflicts_with_quiet() {
    common::launchkit_cmd()
        .args(["-v", "-q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_plan_shows_default_steps() {
    let workspace = common::TestWorkspace::new();
    workspace.init_app("streamlit>=1.30\npandas\n");

    workspace
        .cmd()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("pip install --upgrade pip"))
        .stdout(predicate::str::contains("pip install -r requirements.txt"))
        .stdout(predicate::str::contains("streamlit run app.py"))
        .stdout(predicate::str::contains("2 entries"));
}

#[test]
fn test_plan_runs_nothing() {
    let workspace = common::TestWorkspace::new();
    workspace.init_app("pandas\n");
    workspace.write_step_scripts(
        "echo upgrade >> steps.log",
        "echo install >> steps.log",
        "echo launch >> steps.log",
    );

    workspace.cmd().arg("plan").assert().success();
    assert!(!workspace.file_exists("steps.log"));
}

#[test]
fn test_plan_reports_missing_manifest_without_failing() {
    let workspace = common::TestWorkspace::new();

    workspace
        .cmd()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("Dependency manifest not found"))
        .stdout(predicate::str::contains("missing"));
}

#[test]
fn test_plan_json() {
    let workspace = common::TestWorkspace::new();
    workspace.init_app("streamlit[charts]>=1.30 ; python_version >= '3.9'\n-r base.txt\n");

    let output = workspace
        .cmd()
        .args(["plan", "--json", "--entry-point", "main.py"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["plan"]["manifest"], "requirements.txt");
    assert_eq!(report["plan"]["entry_point"], "main.py");
    assert_eq!(report["plan"]["launch"]["program"], "streamlit");
    assert_eq!(
        report["plan"]["launch"]["args"],
        serde_json::json!(["run", "main.py"])
    );
    assert_eq!(report["entry_point_exists"], false);
    assert!(report["manifest_error"].is_null());

    let entries = report["manifest"]["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["kind"], "requirement");
    assert_eq!(entries[0]["name"], "streamlit");
    assert_eq!(entries[1]["kind"], "directive");
}

#[test]
fn test_plan_json_with_broken_manifest() {
    let workspace = common::TestWorkspace::new();
    workspace.init_app("pandas\n===\n");

    let output = workspace.cmd().args(["plan", "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(report["manifest"].is_null());
    assert!(
        report["manifest_error"]
            .as_str()
            .unwrap()
            .contains("line 2")
    );
}

#[test]
fn test_plan_accepts_pip_compile_output_and_flags_duplicates() {
    let workspace = common::TestWorkspace::new();
    workspace.init_app(
        "pandas==2.0.3 \\\n    --hash=sha256:abc123\n    # via -r requirements.in\n.\nPandas>=2\n",
    );

    workspace
        .cmd()
        .arg("plan")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 entries"))
        .stdout(predicate::str::contains("--hash"))
        .stdout(predicate::str::contains(
            "Pandas on line 5 was already declared on line 1",
        ));

    let output = workspace.cmd().args(["plan", "--json"]).output().unwrap();
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["manifest"]["entries"][1]["kind"], "reference");
    assert_eq!(report["manifest"]["entries"][1]["target"], ".");
    assert_eq!(report["duplicates"][0]["first_line"], 1);
    assert_eq!(report["duplicates"][0]["line"], 5);
}

#[test]
fn test_completions_bash() {
    common::launchkit_cmd()
        .args(["completions", "--shell", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("launchkit"));
}

#[test]
fn test_completions_unknown_shell() {
    common::launchkit_cmd()
        .args(["completions", "--shell", "tcsh"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Unknown shell: tcsh"))
        .stderr(predicate::str::contains("Supported shells"));
}
