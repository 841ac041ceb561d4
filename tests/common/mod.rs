//! Common test utilities for assetgraph integration tests

#![allow(dead_code)]

use std::path::PathBuf;
use tempfile::TempDir;

/// A throwaway project directory
pub struct TestProject {
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestProject {
    /// Create an empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write an asset bundle class at `path`, named after the file
    ///
    /// `depends` entries are written verbatim, so both `'AppAsset'` and
    /// `AppAsset::class` forms can be used.
    pub fn write_bundle(&self, path: &str, namespace: &str, depends: &[&str]) {
        let class = std::path::Path::new(path)
            .file_stem()
            .and_then(|s| s.to_str())
            .expect("bundle path needs a file name");
        let content = format!(
            "<?php\n\nnamespace {namespace};\n\nuse yii\\web\\AssetBundle;\n\n\
             class {class} extends AssetBundle\n{{\n    \
             public $basePath = '@webroot';\n    \
             public $baseUrl = '@web';\n    \
             public $css = ['css/site.css'];\n    \
             public $depends = [\n        {}\n    ];\n}}\n",
            depends.join(",\n        ")
        );
        self.write_file(path, &content);
    }

    /// Write an application-level bundle under `assets/`
    pub fn app_bundle(&self, name: &str, depends: &[&str]) {
        self.write_bundle(&format!("assets/{name}.php"), "app\\assets", depends);
    }
}

#[allow(deprecated)]
pub fn assetgraph_cmd() -> assert_cmd::Command {
    assert_cmd::Command::cargo_bin("assetgraph").expect("Failed to find assetgraph binary")
}

/// Run the binary against `project`, returning stdout
pub fn run_ok(project: &TestProject, args: &[&str]) -> String {
    let output = assetgraph_cmd()
        .arg("--project")
        .arg(&project.path)
        .args(args)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).expect("stdout is not UTF-8")
}

/// Run with `--format json` and parse stdout
pub fn run_json(project: &TestProject, args: &[&str]) -> serde_json::Value {
    let mut all = args.to_vec();
    all.extend(["--format", "json"]);
    serde_json::from_str(&run_ok(project, &all)).expect("stdout is not JSON")
}
