//! Checker engine: orchestrates an ordered set of feature checkers
//! against one source file.

use crate::analysis::{AnalysisContext, DEFAULT_CACHE_CAPACITY};
use crate::check::{catalog, FeatureChecker};
use crate::error::Error;
use crate::parser::{parse, SourceFile};
use crate::report::{CheckOutput, CheckReport, OutputFormat};

/// Engine configuration.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    pub output_format: OutputFormat,
    /// Capacity of the per-context line-index cache.
    pub cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            output_format: OutputFormat::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

/// Holds an ordered list of feature checkers and an output-shape
/// selector.
///
/// Checkers run strictly one at a time, in registration order, each
/// performing an independent full traversal of the shared tree. The
/// engine does not fuse patterns into one pass: the cost is
/// O(checkers × tree size), and in exchange every checker's compiled
/// visitor and traversal state stay wholly private to its call.
#[derive(Debug, Default)]
pub struct CheckerEngine {
    checkers: Vec<FeatureChecker>,
    config: EngineConfig,
}

impl CheckerEngine {
    /// An empty engine with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            checkers: Vec::new(),
            config,
        }
    }

    /// Register a checker. Returns the engine for chaining.
    pub fn add_checker(mut self, checker: FeatureChecker) -> Self {
        self.checkers.push(checker);
        self
    }

    /// Register the default bundle covering the whole feature catalog.
    pub fn with_default_checkers(mut self) -> Self {
        self.checkers.extend(catalog::default_checkers());
        self
    }

    pub fn checker_names(&self) -> Vec<&str> {
        self.checkers.iter().map(|c| c.name.as_str()).collect()
    }

    /// Run every registered checker against one source file.
    ///
    /// Parse failures and checker failures abort the call outright; no
    /// partial results are produced. Checkers with no matches are
    /// omitted from the result entirely.
    pub fn check(&self, source: &SourceFile) -> Result<CheckOutput, Error> {
        let report = self.check_report(source)?;
        Ok(match self.config.output_format {
            OutputFormat::Map => CheckOutput::Map(report),
            OutputFormat::Object => CheckOutput::Object(report.to_object()?),
            OutputFormat::Json => CheckOutput::Json(report.to_json_string()?),
        })
    }

    /// Like [`check`](Self::check), but always yields the ordered map
    /// form regardless of the configured output shape.
    pub fn check_report(&self, source: &SourceFile) -> Result<CheckReport, Error> {
        let parsed = parse(source)?;
        let ctx = AnalysisContext::with_cache_capacity(&parsed, self.config.cache_capacity);

        let mut report = CheckReport::new();
        for checker in &self.checkers {
            let sites = (checker.check)(&ctx).map_err(|source| Error::Checker {
                name: checker.name.clone(),
                source,
            })?;
            if !sites.is_empty() {
                report.insert(checker.name.clone(), sites);
            }
        }
        Ok(report)
    }
}

/// An engine preloaded with the default checker bundle.
pub fn build_default_engine() -> CheckerEngine {
    CheckerEngine::new().with_default_checkers()
}

/// An engine preloaded with the default bundle and a custom config.
pub fn build_default_engine_with_config(config: EngineConfig) -> CheckerEngine {
    CheckerEngine::with_config(config).with_default_checkers()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::FeatureSite;
    use crate::check::check_kind;

    #[test]
    fn parse_failure_aborts_with_no_partial_output() {
        let engine = build_default_engine();
        let err = engine
            .check(&SourceFile::new("bad.sol", "contract C {"))
            .unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn empty_results_are_omitted() {
        let engine = build_default_engine();
        let report = engine
            .check_report(&SourceFile::new("a.sol", "contract C {}"))
            .unwrap();
        assert!(!report.contains("Loop"));
        assert!(!report.contains("Recursion"));
    }

    #[test]
    fn checker_fault_aborts_the_batch() {
        let engine = CheckerEngine::new()
            .add_checker(FeatureChecker::new("Faulty", |_| {
                Err(anyhow::anyhow!("node shape mismatch"))
            }))
            .add_checker(FeatureChecker::new("Struct", |ctx| {
                check_kind(ctx, "struct_declaration")
            }));
        let err = engine
            .check(&SourceFile::new("a.sol", "contract C { struct S { uint x; } }"))
            .unwrap_err();
        match err {
            Error::Checker { name, .. } => assert_eq!(name, "Faulty"),
            other => panic!("expected checker error, got {other:?}"),
        }
    }

    #[test]
    fn registration_order_is_result_order() {
        let engine = CheckerEngine::new()
            .add_checker(FeatureChecker::new("Second", |ctx| {
                check_kind(ctx, "contract_declaration")
            }))
            .add_checker(FeatureChecker::new("First", |ctx| {
                check_kind(ctx, "contract_declaration")
            }));
        let report = engine
            .check_report(&SourceFile::new("a.sol", "contract C {}"))
            .unwrap();
        let names: Vec<_> = report.names().collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn custom_checker_sites_survive_rendering() {
        let engine = CheckerEngine::with_config(EngineConfig {
            output_format: OutputFormat::Json,
            ..EngineConfig::default()
        })
        .add_checker(FeatureChecker::new("Contract", |ctx| {
            check_kind(ctx, "contract_declaration")
        }));
        let output = engine
            .check(&SourceFile::new("a.sol", "contract C {}"))
            .unwrap();
        let CheckOutput::Json(json) = output else {
            panic!("expected json output");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let sites: Vec<FeatureSite> =
            serde_json::from_value(value["Contract"].clone()).unwrap();
        assert_eq!(sites.len(), 1);
        assert_eq!(sites[0].literal.as_deref(), Some("contract C {}"));
    }
}
