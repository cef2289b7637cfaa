use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

pub const MIT_TEXT: &str = "MIT License\n\nPermission is hereby granted, free of charge, to any person obtaining a copy\n";
pub const GPL_TEXT: &str = "GNU GENERAL PUBLIC LICENSE\nVersion 3, 29 June 2007\n";

pub const POLICY: &str = r#"
[policy]
override_path = "overrides"
exec_path = "dist/"

[policy.allow]
exact = ["MIT", "Apache-2.0"]

[policy.deny]
exact = ["GPL-3.0"]

[policy.override]
"github.com/x/w" = "w"
"#;

pub struct TestProject {
    pub dir: TempDir,
    pub binary_path: String,
}

impl TestProject {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let binary_path = env!("CARGO_BIN_EXE_mod-license-auditor").to_string();

        Self { dir, binary_path }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// Add a vendored module source tree with a LICENSE file
    pub fn add_module_source(&self, module_path: &str, license_text: &str) {
        self.write(&format!("vendor/{}/LICENSE", module_path), license_text);
    }

    pub fn write_manifest(&self, module_paths: &[&str]) {
        let mut manifest = String::new();
        for path in module_paths {
            manifest.push_str(&format!(
                "[[module]]\npath = \"{}\"\nversion = \"v1.0.0\"\ndir = \"vendor/{}\"\n\n",
                path, path
            ));
        }
        self.write("modules.toml", &manifest);
    }

    pub fn artifact(&self, module_path: &str) -> PathBuf {
        self.dir.path().join("dist/License").join(module_path).join("LICENSE")
    }

    pub fn run_auditor(&self, args: &[&str]) -> std::process::Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run mod-license-auditor")
    }
}
