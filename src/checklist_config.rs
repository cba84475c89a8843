use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Checklist configuration loaded from a JSON file.
///
/// Every field is optional in the file; missing fields take the defaults below, which
/// describe the Woofy repository layout. Paths are relative to the checked base directory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChecklistConfig {
    /// ADR index and the baseline architecture record
    #[serde(default = "default_adr_files")]
    pub adr_files: Vec<String>,

    /// Negative test suite for the chat handler
    #[serde(default = "default_negative_tests")]
    pub negative_tests: String,

    /// Substring counted once per test case in the negative test suite
    #[serde(default = "default_test_marker")]
    pub test_marker: String,

    /// CI workflow that must reference the automation token and coverage
    #[serde(default = "default_test_workflow")]
    pub test_workflow: String,

    #[serde(default = "default_required_token")]
    pub required_token: String,

    #[serde(default = "default_coverage_keyword")]
    pub coverage_keyword: String,

    #[serde(default = "default_codeql_workflow")]
    pub codeql_workflow: String,

    #[serde(default = "default_changelog")]
    pub changelog: String,

    #[serde(default = "default_security_log")]
    pub security_log: String,

    /// Core documentation files reviewed in the final step
    #[serde(default = "default_core_docs")]
    pub core_docs: Vec<String>,

    /// How many of `core_docs` must exist for the final review to pass
    #[serde(default = "default_min_core_docs")]
    pub min_core_docs: usize,
}

fn default_adr_files() -> Vec<String> {
    vec![
        "architecture/adr/README.md".to_string(),
        "architecture/adr/ADR-0001-serverless-baseline-architecture.md".to_string(),
    ]
}

fn default_negative_tests() -> String {
    "tests/test_lambda_woofy_handler_negative.py".to_string()
}

fn default_test_marker() -> String {
    "def test_".to_string()
}

fn default_test_workflow() -> String {
    ".github/workflows/test.yml".to_string()
}

fn default_required_token() -> String {
    "COPILOT_TOKEN".to_string()
}

fn default_coverage_keyword() -> String {
    "coverage".to_string()
}

fn default_codeql_workflow() -> String {
    ".github/workflows/codeql.yml".to_string()
}

fn default_changelog() -> String {
    "CHANGELOG.md".to_string()
}

fn default_security_log() -> String {
    "SECURITY_REMEDIATION_LOG.md".to_string()
}

fn default_core_docs() -> Vec<String> {
    [
        "README.md",
        "SECURITY.md",
        "CONTRIBUTING.md",
        "CHANGELOG.md",
        "SECURITY_REMEDIATION_LOG.md",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_min_core_docs() -> usize {
    4
}

impl Default for ChecklistConfig {
    fn default() -> Self {
        Self {
            adr_files: default_adr_files(),
            negative_tests: default_negative_tests(),
            test_marker: default_test_marker(),
            test_workflow: default_test_workflow(),
            required_token: default_required_token(),
            coverage_keyword: default_coverage_keyword(),
            codeql_workflow: default_codeql_workflow(),
            changelog: default_changelog(),
            security_log: default_security_log(),
            core_docs: default_core_docs(),
            min_core_docs: default_min_core_docs(),
        }
    }
}

impl ChecklistConfig {
    /// Load checklist configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read checklist config file: {}",
                path.as_ref().display()
            )
        })?;

        let config: ChecklistConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse checklist config JSON")?;

        Ok(config)
    }
}
