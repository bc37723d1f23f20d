//! AST-backed analysis: context, locations, site capture, and the
//! structured-visitor pattern engine.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌────────────────┐     ┌────────────────┐
//! │ SourceFile   │────▶│ parser::parse  │────▶│ ParsedFile     │
//! └──────────────┘     └────────────────┘     └────────────────┘
//!                                                     │
//!                                                     ▼
//! ┌──────────────┐     ┌────────────────┐     ┌────────────────┐
//! │ FeatureSites │◀────│ CompiledVisitor│◀────│ AnalysisContext│
//! │ (captured)   │     │ (one walk)     │     │ (line indexes) │
//! └──────────────┘     └────────────────┘     └────────────────┘
//! ```
//!
//! One context is created per `check` call; each checker compiles and
//! runs its own visitor over the shared tree.

mod context;
pub mod location;
pub mod nodes;
mod site;
mod visitor;

pub use context::AnalysisContext;
pub use location::{IndexerCache, LineIndex, DEFAULT_CACHE_CAPACITY};
pub use site::{capture_site, span_of, FeatureSite, LineColumn, SourceSpan};
pub use visitor::{
    compile, walk_tree, CompiledVisitor, MatchContext, Pattern, PatternHandler, Predicate,
    TraversalContext, Visit,
};
