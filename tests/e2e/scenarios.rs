use std::fs;
use super::helpers::{TestProject, GPL_TEXT, MIT_TEXT, POLICY};

#[test]
fn test_allowed_module_is_materialized() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);
    project.add_module_source("github.com/x/y", MIT_TEXT);
    project.write_manifest(&["github.com/x/y"]);

    let output = project.run_auditor(&["check"]);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(fs::read_to_string(project.artifact("github.com/x/y")).unwrap(), MIT_TEXT);
    assert!(String::from_utf8_lossy(&output.stdout).contains("License Audit (1 modules)"));
}

#[test]
fn test_denied_module_stops_audit() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);
    project.add_module_source("github.com/x/z", GPL_TEXT);
    project.add_module_source("github.com/x/y", MIT_TEXT);
    project.write_manifest(&["github.com/x/z", "github.com/x/y"]);

    let output = project.run_auditor(&["check", "--jobs", "1"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("github.com/x/z"));
    assert!(stderr.contains("GPL-3.0"));
    assert!(!project.artifact("github.com/x/z").exists());
    assert!(!project.artifact("github.com/x/y").exists());
}

#[test]
fn test_override_replaces_detected_text() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);
    project.add_module_source("github.com/x/w", MIT_TEXT);
    project.write("overrides/github.com/x/w/LICENSE", "OVERRIDE TEXT");
    project.write_manifest(&["github.com/x/w"]);

    let output = project.run_auditor(&["check"]);

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(project.artifact("github.com/x/w")).unwrap(), "OVERRIDE TEXT");
}

#[test]
fn test_missing_override_falls_back() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);
    project.add_module_source("github.com/x/w", MIT_TEXT);
    project.write_manifest(&["github.com/x/w"]);

    let output = project.run_auditor(&["check"]);

    assert!(output.status.success());
    assert_eq!(fs::read_to_string(project.artifact("github.com/x/w")).unwrap(), MIT_TEXT);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Nothing found for"));
}

#[test]
fn test_missing_policy_fails() {
    let project = TestProject::new();
    project.add_module_source("github.com/x/y", MIT_TEXT);
    project.write_manifest(&["github.com/x/y"]);

    let output = project.run_auditor(&["check"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No policy configured"));
    assert!(!project.artifact("github.com/x/y").exists());
}

#[test]
fn test_json_report_and_parallel_workers() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);
    let modules = ["github.com/a/one", "github.com/a/two", "github.com/a/three"];
    for module in &modules {
        project.add_module_source(module, MIT_TEXT);
    }
    project.write_manifest(&modules);

    let output = project.run_auditor(&["--quiet", "check", "--jobs", "3", "--format", "json", "--output", "report.json"]);

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.path().join("report.json")).unwrap()).unwrap();
    assert_eq!(report["summary"]["total_modules"], 3);
    assert_eq!(report["summary"]["allowed"], 3);
    for module in &modules {
        assert!(project.artifact(module).exists());
    }
}

#[test]
fn test_config_validate() {
    let project = TestProject::new();
    project.write("license-audit.toml", POLICY);

    let output = project.run_auditor(&["config", "--validate"]);
    assert!(output.status.success());

    project.write("broken.toml", "[policy.allow]\npatterns = [\"[\"]\n");
    let output = project.run_auditor(&["config", "--validate", "--config", "broken.toml"]);
    assert_eq!(output.status.code(), Some(1));
}
