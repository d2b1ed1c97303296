//! Orchestration results.

use serde::Serialize;

use crate::error::OrchestrationAborted;
use crate::plan::Criticality;

/// Outcome of one plan entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallResult {
    /// Primary package name of the entry.
    pub package: String,
    /// Criticality of the entry.
    pub criticality: Criticality,
    /// Whether the entry ended up installed.
    pub succeeded: bool,
    /// Alternative that satisfied the entry after the primary failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_alternative: Option<String>,
    /// Failure description when the entry did not succeed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,
}

impl InstallResult {
    pub(crate) fn installed(package: &str, criticality: Criticality) -> Self {
        Self {
            package: package.to_string(),
            criticality,
            succeeded: true,
            used_alternative: None,
            error_detail: None,
        }
    }

    pub(crate) fn via_alternative(package: &str, alternative: &str) -> Self {
        Self {
            used_alternative: Some(alternative.to_string()),
            ..Self::installed(package, Criticality::Critical)
        }
    }

    pub(crate) fn failed(package: &str, criticality: Criticality, detail: String) -> Self {
        Self {
            package: package.to_string(),
            criticality,
            succeeded: false,
            used_alternative: None,
            error_detail: Some(detail),
        }
    }
}

/// Overall outcome of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum Verdict {
    /// Every entry succeeded or was a tolerated optional failure.
    Completed,
    /// A critical entry could not be satisfied; later entries were not attempted.
    Aborted {
        /// Primary package name of the unsatisfied entry.
        unsatisfied_entry: String,
    },
}

/// Per-run record of attempted entries and the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrchestrationReport {
    /// Environment whose plan ran.
    pub environment: String,
    /// Package manager the plan ran against.
    pub backend: String,
    /// Results in plan order. Entries after an abort are absent.
    pub results: Vec<InstallResult>,
    /// Overall verdict.
    pub verdict: Verdict,
}

impl OrchestrationReport {
    /// Whether the run completed.
    pub fn is_completed(&self) -> bool {
        self.verdict == Verdict::Completed
    }

    /// Entries that did not succeed.
    pub fn failures(&self) -> impl Iterator<Item = &InstallResult> {
        self.results.iter().filter(|r| !r.succeeded)
    }

    /// Result for a primary package name.
    pub fn result(&self, package: &str) -> Option<&InstallResult> {
        self.results.iter().find(|r| r.package == package)
    }

    /// Error describing an abort, if the run aborted.
    pub fn abort_error(&self) -> Option<OrchestrationAborted> {
        match &self.verdict {
            Verdict::Completed => None,
            Verdict::Aborted { unsatisfied_entry } => Some(OrchestrationAborted {
                environment: self.environment.clone(),
                unsatisfied_entry: unsatisfied_entry.clone(),
            }),
        }
    }

    /// Convert into a `Result`, so callers can stop dependent work with `?`.
    pub fn into_result(self) -> Result<Self, OrchestrationAborted> {
        match self.abort_error() {
            Some(err) => Err(err),
            None => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(verdict: Verdict) -> OrchestrationReport {
        OrchestrationReport {
            environment: "c".into(),
            backend: "winget".into(),
            results: vec![
                InstallResult::via_alternative("mingw", "visualstudio2022buildtools"),
                InstallResult::failed("gdb", Criticality::Optional, "exit code 1".into()),
                InstallResult::installed("clang-format", Criticality::Optional),
            ],
            verdict,
        }
    }

    #[test]
    fn completed_report_converts_to_ok() {
        let report = report(Verdict::Completed);
        assert!(report.is_completed());
        assert!(report.abort_error().is_none());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn aborted_report_converts_to_error() {
        let report = report(Verdict::Aborted {
            unsatisfied_entry: "mingw".into(),
        });

        let err = report.into_result().unwrap_err();

        assert_eq!(err.environment, "c");
        assert_eq!(err.unsatisfied_entry, "mingw");
    }

    #[test]
    fn failures_filter_results() {
        let report = report(Verdict::Completed);

        let failed: Vec<&str> = report.failures().map(|r| r.package.as_str()).collect();

        assert_eq!(failed, vec!["gdb"]);
        assert_eq!(
            report.result("mingw").unwrap().used_alternative.as_deref(),
            Some("visualstudio2022buildtools")
        );
    }

    #[test]
    fn serializes_verdict_with_status_tag() {
        let json = serde_json::to_value(report(Verdict::Aborted {
            unsatisfied_entry: "mingw".into(),
        }))
        .unwrap();

        assert_eq!(json["verdict"]["status"], "aborted");
        assert_eq!(json["verdict"]["unsatisfied_entry"], "mingw");
        assert_eq!(json["results"][0]["used_alternative"], "visualstudio2022buildtools");
        assert!(json["results"][2].get("error_detail").is_none());
    }
}
