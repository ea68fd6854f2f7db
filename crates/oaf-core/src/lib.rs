pub mod analyzer;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod flow;
pub mod naming;
pub mod schema;

pub use analyzer::{AuthenticationFlow, EndpointCatalog, SpecAnalyzer};
pub use config::{ErrorCaseConfig, GeneratorOptions, Locale, OafConfig, SynthesizerOptions};
pub use endpoint::{EndpointInfo, HttpMethod};
pub use flow::{CaseCategory, CaptureRule, FlowDocument, FlowSummary, GeneratedStep};
pub use schema::{JsonSchema, SchemaKind, SchemaType};

/// Trait for generators that derive test steps from a single endpoint.
///
/// Implementations are pure: the same endpoint always yields the same
/// number of steps, and no step is modified after it is returned.
pub trait StepGenerator {
    fn generate(&self, endpoint: &EndpointInfo) -> Vec<GeneratedStep>;
}
