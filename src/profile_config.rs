use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A keyword scan over the README: passes when at least `min_found` of `keywords`
/// appear (case-sensitive substring match).
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub min_found: usize,
}

impl KeywordRule {
    fn new(keywords: &[&str], min_found: usize) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            min_found,
        }
    }

    /// Rule that requires every keyword.
    fn all(keywords: &[&str]) -> Self {
        Self::new(keywords, keywords.len())
    }
}

/// Organization profile configuration loaded from a JSON file.
///
/// Missing fields take the defaults below, which describe the organization profile
/// repository the Woofy project is published under.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ProfileConfig {
    #[serde(default = "default_readme")]
    pub readme: String,

    /// Logo shown on the profile page
    #[serde(default = "default_logo")]
    pub logo: String,

    #[serde(default = "default_requirements")]
    pub requirements: String,

    /// The trimmed requirements file must be longer than this many characters
    #[serde(default = "default_min_requirements_chars")]
    pub min_requirements_chars: usize,

    #[serde(default = "default_git_dir")]
    pub git_dir: String,

    /// Files checked for presence by the structure check
    #[serde(default = "default_required_files")]
    pub required_files: Vec<String>,

    #[serde(default = "default_sections")]
    pub sections: KeywordRule,

    #[serde(default = "default_projects")]
    pub projects: KeywordRule,

    #[serde(default = "default_tech_stack")]
    pub tech_stack: KeywordRule,

    #[serde(default = "default_contact")]
    pub contact: KeywordRule,

    #[serde(default = "default_metrics")]
    pub metrics: KeywordRule,
}

fn default_readme() -> String {
    "README.md".to_string()
}

fn default_logo() -> String {
    "image.jpg".to_string()
}

fn default_requirements() -> String {
    "requirements.txt".to_string()
}

fn default_min_requirements_chars() -> usize {
    100
}

fn default_git_dir() -> String {
    ".git".to_string()
}

fn default_required_files() -> Vec<String> {
    ["README.md", "requirements.txt", "organization_logo.png"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_sections() -> KeywordRule {
    KeywordRule::all(&[
        "Bakery Street Project",
        "Mission",
        "Vision",
        "Featured Projects",
        "Technology Stack",
        "Contact",
        "Services",
    ])
}

fn default_projects() -> KeywordRule {
    KeywordRule::all(&["Poly-AI Framework", "DYADS", "Voidshatter", "PeakyBlenders"])
}

fn default_tech_stack() -> KeywordRule {
    KeywordRule::new(&["Python", "JavaScript", "AI/ML", "Docker", "Kubernetes"], 3)
}

fn default_contact() -> KeywordRule {
    KeywordRule::new(&["Contact", "Email", "LinkedIn", "GitHub", "Website"], 2)
}

fn default_metrics() -> KeywordRule {
    KeywordRule::new(&["$2.5M", "ROI", "customers", "projects", "repositories"], 2)
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            readme: default_readme(),
            logo: default_logo(),
            requirements: default_requirements(),
            min_requirements_chars: default_min_requirements_chars(),
            git_dir: default_git_dir(),
            required_files: default_required_files(),
            sections: default_sections(),
            projects: default_projects(),
            tech_stack: default_tech_stack(),
            contact: default_contact(),
            metrics: default_metrics(),
        }
    }
}

impl ProfileConfig {
    /// Load profile configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!(
                "Failed to read profile config file: {}",
                path.as_ref().display()
            )
        })?;

        let config: ProfileConfig = serde_json::from_str(&content)
            .with_context(|| "Failed to parse profile config JSON")?;

        Ok(config)
    }
}
