#![forbid(unsafe_code)]
#![doc = r#"
Woofy Sim

Simulate the responses the Woofy serverless chat handler is expected to produce for
malformed, hostile and failing invocations, and validate that a Woofy repository carries
its required documentation and workflows.

Crate highlights
- Library: pure classification via `classify(Option<&ScenarioInput>)`.
- HTTP router (in `server`): `/status` and `/simulate`, for driving the classifier in-process.
- Checklist: `Checklist::run` plus the `validate-checklist` binary.
- Profile: `ProfileChecker::run` over the organization profile repository (`--profile`).

Modules
- `models`: Scenario input and Lambda-style response.
- `labels`: Error labels and the static response table.
- `classifier`: Ordered decision rules from scenario to response.
- `context`: Simulated invocation context used for log correlation.
- `server`: Axum router over the classifier.
- `checklist` / `checklist_config`: Repository checklist and its configuration.
- `profile` / `profile_config`: Organization profile checks and their configuration.
- `util`: Shared helpers (tracing, env, error responses).
"#]

pub mod checklist;
pub mod checklist_config;
pub mod classifier;
pub mod context;
pub mod labels;
pub mod models;
pub mod profile;
pub mod profile_config;
pub mod server;
pub mod util;

pub use crate::checklist::{Checklist, ChecklistItem, ChecklistReport};
pub use crate::checklist_config::ChecklistConfig;
pub use crate::classifier::{classify, classify_with_limits, ClassifierLimits};
pub use crate::labels::ErrorLabel;
pub use crate::models::{HandlerResponse, ScenarioInput};
pub use crate::profile::{ProfileCheck, ProfileChecker, ProfileReport};
pub use crate::profile_config::ProfileConfig;
