use policy_audit::Config;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Scenario-1 policy used across the tests
pub const PASSWORD_POLICY: &str =
    r#"{"displayName": "Policy A", "id": "123", "settings": {"minLength": 6}}"#;

/// A paginated Graph-style export with two policies
pub const PAGED_EXPORT: &str = r#"{
  "@odata.context": "https://graph.microsoft.com/beta/$metadata#deviceManagement/deviceCompliancePolicies",
  "value": [
    {"name": "P1", "passwordRequired": true},
    {"name": "P2", "passwordRequired": false}
  ]
}"#;

/// Temporary backup folder plus an output location inside the same temp dir
pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub input_root: PathBuf,
    pub output_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let input_root = temp_dir.path().join("IntuneBackup");
        let output_path = temp_dir.path().join("IntuneDocs").join("report.html");
        fs::create_dir_all(&input_root).unwrap();

        TestEnvironment {
            temp_dir,
            input_root,
            output_path,
        }
    }

    /// Writes `content` to `<input_root>/<category>/<file_name>`, creating the category folder
    pub fn write_export(&self, category: &str, file_name: &str, content: &str) -> PathBuf {
        let dir = self.input_root.join(category);
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    pub fn config(&self) -> Config {
        Config {
            input_root: self.input_root.clone(),
            output_path: self.output_path.clone(),
            open_report: false,
            ..Config::default()
        }
    }

    pub fn read_report(&self) -> String {
        fs::read_to_string(&self.output_path).unwrap()
    }
}

/// Position of `needle` in `haystack`, panicking with a readable message when absent
pub fn position(haystack: &str, needle: &str) -> usize {
    haystack
        .find(needle)
        .unwrap_or_else(|| panic!("{:?} not found in report", needle))
}

pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

pub fn exists(path: &Path) -> bool {
    path.exists()
}
