use std::env;
use std::process::ExitCode;

use serde::Serialize;
use woofy_sim::checklist::Checklist;
use woofy_sim::checklist_config::ChecklistConfig;
use woofy_sim::profile::ProfileChecker;
use woofy_sim::profile_config::ProfileConfig;
use woofy_sim::util::init_tracing;

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    // First non-flag positional arg is the repository root (default: current directory)
    let base = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .cloned()
        .or_else(|| env::var("WOOFY_CHECKLIST_ROOT").ok())
        .unwrap_or_else(|| ".".to_string());

    let config_arg = args
        .iter()
        .find(|a| a.starts_with("--config="))
        .and_then(|a| a.strip_prefix("--config="))
        .map(|s| s.to_string());

    let json_output = args.iter().any(|a| a == "--json");

    if args.iter().any(|a| a == "--profile") {
        run_profile(&base, config_arg, json_output)
    } else {
        run_checklist(&base, config_arg, json_output)
    }
}

fn run_checklist(base: &str, config_arg: Option<String>, json_output: bool) -> ExitCode {
    let config = match config_arg {
        Some(path) => {
            tracing::info!("Loading checklist configuration from: {}", path);
            match ChecklistConfig::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to load checklist config: {:#}", e);
                    return ExitCode::from(2);
                }
            }
        }
        None => ChecklistConfig::default(),
    };

    tracing::info!("Validating checklist under: {}", base);
    let report = match Checklist::new(base, config).run() {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Checklist could not be evaluated: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(code) = emit(&report, json_output) {
        return code;
    }

    if report.all_passed() {
        ExitCode::SUCCESS
    } else {
        tracing::warn!("Failed items: {:?}", report.failed_items());
        ExitCode::from(1)
    }
}

fn run_profile(base: &str, config_arg: Option<String>, json_output: bool) -> ExitCode {
    let config = match config_arg {
        Some(path) => {
            tracing::info!("Loading profile configuration from: {}", path);
            match ProfileConfig::load_from_file(&path) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Failed to load profile config: {:#}", e);
                    return ExitCode::from(2);
                }
            }
        }
        None => ProfileConfig::default(),
    };

    tracing::info!("Checking organization profile under: {}", base);
    let report = match ProfileChecker::new(base, config).run() {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Profile could not be checked: {}", e);
            return ExitCode::from(2);
        }
    };

    if let Err(code) = emit(&report, json_output) {
        return code;
    }

    if report.success() {
        ExitCode::SUCCESS
    } else {
        tracing::warn!("Failed checks: {:?}", report.failed_checks());
        ExitCode::from(1)
    }
}

fn emit<R: Serialize + std::fmt::Display>(report: &R, json_output: bool) -> Result<(), ExitCode> {
    if json_output {
        match serde_json::to_string_pretty(report) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                tracing::error!("Failed to serialize report: {}", e);
                return Err(ExitCode::from(2));
            }
        }
    } else {
        print!("{report}");
    }
    Ok(())
}
