//! Repository checklist validation.
//!
//! Checks a repository tree for the documentation, test and workflow files the Woofy
//! project requires before a milestone, and renders a pass/fail report.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::checklist_config::ChecklistConfig;

#[derive(Error, Debug)]
pub enum ChecklistError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The checklist items, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistItem {
    Adr,
    NegativeTests,
    CopilotToken,
    Security,
    Documentation,
    FinalReview,
}

impl ChecklistItem {
    pub const ALL: [ChecklistItem; 6] = [
        ChecklistItem::Adr,
        ChecklistItem::NegativeTests,
        ChecklistItem::CopilotToken,
        ChecklistItem::Security,
        ChecklistItem::Documentation,
        ChecklistItem::FinalReview,
    ];

    /// Stable key used in JSON output.
    pub fn key(&self) -> &'static str {
        match self {
            ChecklistItem::Adr => "adr",
            ChecklistItem::NegativeTests => "negative_tests",
            ChecklistItem::CopilotToken => "copilot_token",
            ChecklistItem::Security => "security",
            ChecklistItem::Documentation => "documentation",
            ChecklistItem::FinalReview => "final_review",
        }
    }

    /// Section heading in the rendered report.
    pub fn heading(&self) -> &'static str {
        match self {
            ChecklistItem::Adr => "📋 ADR Review",
            ChecklistItem::NegativeTests => "🧪 Negative Test Cases",
            ChecklistItem::CopilotToken => "🤖 COPILOT_TOKEN Integration",
            ChecklistItem::Security => "🛡️ Coverage & Security",
            ChecklistItem::Documentation => "📝 Changelog & Security Log",
            ChecklistItem::FinalReview => "📚 Final Documentation Review",
        }
    }

    /// Title-cased key, as shown in the summary.
    pub fn summary_name(&self) -> String {
        self.key()
            .split('_')
            .map(|w| {
                let mut chars = w.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailKind {
    Pass,
    Fail,
    File,
    Count,
    Setting,
}

impl DetailKind {
    fn icon(&self) -> &'static str {
        match self {
            DetailKind::Pass => "✅",
            DetailKind::Fail => "❌",
            DetailKind::File => "📄",
            DetailKind::Count => "🔢",
            DetailKind::Setting => "🔧",
        }
    }
}

/// One line of evidence under a checklist item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detail {
    pub kind: DetailKind,
    pub text: String,
}

impl Detail {
    fn new(kind: DetailKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemOutcome {
    pub item: ChecklistItem,
    pub passed: bool,
    pub details: Vec<Detail>,
}

/// Result of running the whole checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChecklistReport {
    pub outcomes: Vec<ItemOutcome>,
    /// Number of test cases found in the negative test suite, when it exists.
    pub negative_test_count: Option<usize>,
}

impl ChecklistReport {
    pub fn all_passed(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn outcome(&self, item: ChecklistItem) -> Option<&ItemOutcome> {
        self.outcomes.iter().find(|o| o.item == item)
    }

    pub fn passed(&self, item: ChecklistItem) -> bool {
        self.outcome(item).is_some_and(|o| o.passed)
    }

    pub fn failed_items(&self) -> Vec<ChecklistItem> {
        self.outcomes
            .iter()
            .filter(|o| !o.passed)
            .map(|o| o.item)
            .collect()
    }
}

const RULE: &str = "==================================================";

impl fmt::Display for ChecklistReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "🔍 Validating Critical Checklist Items")?;
        writeln!(f, "{RULE}")?;
        for (idx, outcome) in self.outcomes.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}. {}", idx + 1, outcome.item.heading())?;
            for d in &outcome.details {
                writeln!(f, "   {} {}", d.kind.icon(), d.text)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "📊 VALIDATION SUMMARY")?;
        writeln!(f, "{RULE}")?;
        for outcome in &self.outcomes {
            let icon = if outcome.passed { "✅" } else { "❌" };
            writeln!(f, "{icon} {}", outcome.item.summary_name())?;
        }

        let all_passed = self.all_passed();
        writeln!(f)?;
        writeln!(
            f,
            "🎯 Overall Status: {}",
            if all_passed { "✅ PASSED" } else { "❌ FAILED" }
        )?;
        writeln!(f)?;
        if all_passed {
            writeln!(f, "🎉 All critical checklist items have been successfully implemented!")?;
            writeln!(f, "📋 Ready for final milestone progression.")
        } else {
            writeln!(f, "⚠️  Some checklist items need attention before proceeding.")
        }
    }
}

/// Checklist bound to one repository tree.
#[derive(Debug, Clone)]
pub struct Checklist {
    base: PathBuf,
    config: ChecklistConfig,
}

impl Checklist {
    pub fn new(base: impl Into<PathBuf>, config: ChecklistConfig) -> Self {
        Self {
            base: base.into(),
            config,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Evaluate every item. Fails only when a file that exists cannot be read.
    pub fn run(&self) -> Result<ChecklistReport, ChecklistError> {
        let workflow = self.read_if_exists(&self.config.test_workflow)?;
        let (negative_tests, negative_test_count) = self.check_negative_tests()?;

        let outcomes = vec![
            self.check_adr(),
            negative_tests,
            self.check_copilot_token(workflow.as_deref()),
            self.check_security(workflow.as_deref()),
            self.check_documentation(),
            self.check_final_review(),
        ];

        for o in &outcomes {
            tracing::debug!(item = o.item.key(), passed = o.passed, "checklist item evaluated");
        }

        Ok(ChecklistReport {
            outcomes,
            negative_test_count,
        })
    }

    fn exists(&self, rel: &str) -> bool {
        self.base.join(rel).exists()
    }

    fn read_if_exists(&self, rel: &str) -> Result<Option<String>, ChecklistError> {
        let path = self.base.join(rel);
        if !path.exists() {
            return Ok(None);
        }
        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|source| ChecklistError::Read { path, source })
    }

    fn check_adr(&self) -> ItemOutcome {
        let passed = self.config.adr_files.iter().all(|f| self.exists(f));
        let mut details = Vec::new();
        if passed {
            details.push(Detail::new(
                DetailKind::Pass,
                "Architecture ADR documentation exists",
            ));
            for f in &self.config.adr_files {
                details.push(Detail::new(DetailKind::File, f.as_str()));
            }
        } else {
            details.push(Detail::new(DetailKind::Fail, "Missing ADR documentation"));
        }
        ItemOutcome {
            item: ChecklistItem::Adr,
            passed,
            details,
        }
    }

    fn check_negative_tests(&self) -> Result<(ItemOutcome, Option<usize>), ChecklistError> {
        let rel = &self.config.negative_tests;
        let Some(content) = self.read_if_exists(rel)? else {
            let outcome = ItemOutcome {
                item: ChecklistItem::NegativeTests,
                passed: false,
                details: vec![Detail::new(DetailKind::Fail, "Missing negative test cases")],
            };
            return Ok((outcome, None));
        };

        let count = if self.config.test_marker.is_empty() {
            0
        } else {
            content.matches(self.config.test_marker.as_str()).count()
        };
        let outcome = ItemOutcome {
            item: ChecklistItem::NegativeTests,
            passed: true,
            details: vec![
                Detail::new(DetailKind::Pass, "Lambda Woofy handler negative tests exist"),
                Detail::new(DetailKind::File, rel.as_str()),
                Detail::new(
                    DetailKind::Count,
                    format!("{count} negative test cases implemented"),
                ),
            ],
        };
        Ok((outcome, Some(count)))
    }

    fn check_copilot_token(&self, workflow: Option<&str>) -> ItemOutcome {
        let token = &self.config.required_token;
        let (passed, details) = match workflow {
            Some(content) if content.contains(token.as_str()) => (
                true,
                vec![
                    Detail::new(
                        DetailKind::Pass,
                        format!("{token} configured in GitHub Actions"),
                    ),
                    Detail::new(DetailKind::Setting, "Automation tasks configured"),
                ],
            ),
            Some(_) => (
                false,
                vec![Detail::new(
                    DetailKind::Fail,
                    format!("{token} not found in workflows"),
                )],
            ),
            None => (
                false,
                vec![Detail::new(
                    DetailKind::Fail,
                    "GitHub Actions workflow not found",
                )],
            ),
        };
        ItemOutcome {
            item: ChecklistItem::CopilotToken,
            passed,
            details,
        }
    }

    fn check_security(&self, workflow: Option<&str>) -> ItemOutcome {
        let mut details = Vec::new();
        let codeql = self.exists(&self.config.codeql_workflow);
        if codeql {
            details.push(Detail::new(
                DetailKind::Pass,
                "CodeQL security scanning configured",
            ));
        }
        let coverage =
            workflow.is_some_and(|content| content.contains(self.config.coverage_keyword.as_str()));
        if coverage {
            details.push(Detail::new(DetailKind::Pass, "Coverage reporting configured"));
        }
        let passed = codeql && coverage;
        if !passed {
            details.push(Detail::new(
                DetailKind::Fail,
                "Incomplete security configuration",
            ));
        }
        ItemOutcome {
            item: ChecklistItem::Security,
            passed,
            details,
        }
    }

    fn check_documentation(&self) -> ItemOutcome {
        let changelog = &self.config.changelog;
        let security_log = &self.config.security_log;
        let passed = self.exists(changelog) && self.exists(security_log);
        let details = if passed {
            vec![
                Detail::new(
                    DetailKind::Pass,
                    format!("Both {changelog} and {security_log} exist"),
                ),
                Detail::new(DetailKind::File, changelog.as_str()),
                Detail::new(DetailKind::File, security_log.as_str()),
            ]
        } else {
            vec![Detail::new(
                DetailKind::Fail,
                "Missing changelog or security log",
            )]
        };
        ItemOutcome {
            item: ChecklistItem::Documentation,
            passed,
            details,
        }
    }

    fn check_final_review(&self) -> ItemOutcome {
        let existing: Vec<&String> = self
            .config
            .core_docs
            .iter()
            .filter(|d| self.exists(d))
            .collect();
        let mut details = vec![Detail::new(
            DetailKind::Pass,
            format!(
                "{}/{} core documentation files exist",
                existing.len(),
                self.config.core_docs.len()
            ),
        )];
        details.extend(
            existing
                .iter()
                .map(|d| Detail::new(DetailKind::File, d.as_str())),
        );
        ItemOutcome {
            item: ChecklistItem::FinalReview,
            passed: existing.len() >= self.config.min_core_docs,
            details,
        }
    }
}
