//! Test-flow generators built on the oaf data model.
//!
//! [`SuiteGenerator`] is the entry point: it filters the endpoint set, asks
//! the [`DependencyResolver`] for the happy path, then appends the edge and
//! error cases of every selected endpoint.

pub mod dependency;
pub mod edge_cases;
pub mod error_cases;
pub mod request;
pub mod suite;
pub mod verbs;

pub use dependency::{
    DependencyGraph, DependencyResolver, EdgeType, analyze_dependencies, resolve_execution_order,
    resource_type,
};
pub use edge_cases::EdgeCaseGenerator;
pub use error_cases::ErrorCaseGenerator;
pub use suite::SuiteGenerator;
pub use verbs::{EnVerbs, VerbTable, ZhTwVerbs};
