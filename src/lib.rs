//! Solscope - language-feature analysis for Solidity.
//!
//! Solscope detects which language features a Solidity source file uses
//! (recursion, inheritance depth, low-level calls, inline assembly, …)
//! by matching declarative patterns against its parsed syntax tree and
//! reporting, for every match, the matched source text and its location.
//!
//! # Architecture
//!
//! - `parser`: the tree-sitter parsing boundary
//! - `analysis`: analysis context, locations, site capture, and the
//!   structured-visitor pattern engine
//! - `check`: the checker protocol and the concrete feature checkers
//! - `engine`: sequential orchestration of checkers over one file
//! - `report`: output shapes (ordered map, plain object, JSON text)
//!
//! # Example
//!
//! ```no_run
//! use solscope::{build_default_engine, SourceFile};
//!
//! let engine = build_default_engine();
//! let report = engine
//!     .check_report(&SourceFile::new("c.sol", "contract C { function f() public { f(); } }"))
//!     .unwrap();
//! assert!(report.contains("Recursion"));
//! ```
//!
//! # Adding a Checker
//!
//! Implement a function over [`AnalysisContext`] using the entry points
//! in [`check`] (by node kind, by kind list, by structured pattern, by
//! raw-text regex, or by driving the primitive traversal directly) and
//! register it with [`CheckerEngine::add_checker`].

pub mod analysis;
pub mod check;
pub mod cli;
pub mod engine;
pub mod error;
pub mod parser;
pub mod report;

pub use analysis::{
    capture_site, AnalysisContext, FeatureSite, LineColumn, LineIndex, MatchContext, Pattern,
    SourceSpan, Visit,
};
pub use check::catalog::{default_checkers, Feature, ALL_FEATURES};
pub use check::{
    check_kind, check_kinds, check_lexical, check_pattern, run_visitor, FeatureChecker,
};
pub use engine::{
    build_default_engine, build_default_engine_with_config, CheckerEngine, EngineConfig,
};
pub use error::Error;
pub use parser::{parse, ParsedFile, SourceFile};
pub use report::{CheckOutput, CheckReport, OutputFormat};
