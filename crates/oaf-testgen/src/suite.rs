use oaf_core::{
    AuthenticationFlow, EndpointInfo, FlowDocument, FlowSummary, GeneratorOptions, OafConfig,
    SpecAnalyzer, StepGenerator, SynthesizerOptions,
};
use oaf_synth::DataSynthesizer;

use crate::dependency::DependencyResolver;
use crate::edge_cases::EdgeCaseGenerator;
use crate::error_cases::ErrorCaseGenerator;

pub const DEFAULT_FLOW_NAME: &str = "Generated API test flow";

/// Composes the happy path and the per-endpoint edge and error cases into
/// one flow document.
#[derive(Debug, Clone)]
pub struct SuiteGenerator {
    name: String,
    description: Option<String>,
    synthesizer: DataSynthesizer,
}

impl Default for SuiteGenerator {
    fn default() -> Self {
        Self::new(SynthesizerOptions::default())
    }
}

impl SuiteGenerator {
    pub fn new(options: SynthesizerOptions) -> Self {
        Self {
            name: DEFAULT_FLOW_NAME.to_string(),
            description: None,
            synthesizer: DataSynthesizer::new(options),
        }
    }

    pub fn from_config(config: &OafConfig) -> Self {
        Self {
            name: config.name.clone(),
            description: config.description.clone(),
            synthesizer: DataSynthesizer::new(config.synthesizer.clone()),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn generate(&self, endpoints: &[EndpointInfo], options: &GeneratorOptions) -> FlowDocument {
        self.generate_with_auth(endpoints, options, None)
    }

    /// Pull endpoints and the login flow from the analyzer.
    pub fn generate_from_analyzer(
        &self,
        analyzer: &dyn SpecAnalyzer,
        options: &GeneratorOptions,
    ) -> FlowDocument {
        let endpoints = analyzer.extract_endpoints();
        let auth_flow = analyzer.authentication_flow();
        if let Some(flow) = &auth_flow {
            log::debug!("authentication flow via `{}`", flow.operation_id);
        }
        self.generate_with_auth(&endpoints, options, auth_flow)
    }

    fn generate_with_auth(
        &self,
        endpoints: &[EndpointInfo],
        options: &GeneratorOptions,
        auth_flow: Option<AuthenticationFlow>,
    ) -> FlowDocument {
        let selected = filter_endpoints(endpoints, &options.endpoints);
        log::debug!("{} of {} endpoints selected", selected.len(), endpoints.len());

        let mut steps = Vec::new();

        if options.include_success_cases {
            let resolver =
                DependencyResolver::new(self.synthesizer.clone()).with_authentication_flow(auth_flow);
            steps.extend(resolver.resolve_execution_order(&selected));
        }

        let mut per_endpoint: Vec<Box<dyn StepGenerator>> = Vec::new();
        if options.include_edge_cases {
            per_endpoint.push(Box::new(EdgeCaseGenerator::new(self.synthesizer.clone())));
        }
        if options.include_error_cases && options.error_cases.any_enabled() {
            per_endpoint.push(Box::new(ErrorCaseGenerator::new(
                self.synthesizer.clone(),
                options.error_cases,
            )));
        }

        for endpoint in &selected {
            for generator in &per_endpoint {
                steps.extend(generator.generate(endpoint));
            }
        }

        let summary = FlowSummary {
            endpoints: selected.iter().map(EndpointInfo::operation_name).collect(),
            total_tests: steps.len(),
        };
        log::info!(
            "generated {} steps for {} endpoints",
            summary.total_tests,
            summary.endpoints.len()
        );

        FlowDocument {
            name: self.name.clone(),
            description: self.description.clone(),
            steps,
            summary,
        }
    }
}

/// Whether an allow-list entry selects `endpoint`: its operationId,
/// `"METHOD /path"`, or a bare `"/path"` matching every method.
pub fn matches_filter(endpoint: &EndpointInfo, entry: &str) -> bool {
    let entry = entry.trim();
    if entry.starts_with('/') {
        return endpoint.path == entry;
    }
    if let Some((method, path)) = entry.split_once(char::is_whitespace) {
        return method.eq_ignore_ascii_case(endpoint.method.as_str()) && path.trim() == endpoint.path;
    }
    endpoint.operation_name() == entry
}

/// Endpoints selected by `filter`, in input order. An empty filter selects
/// everything.
pub fn filter_endpoints(endpoints: &[EndpointInfo], filter: &[String]) -> Vec<EndpointInfo> {
    if filter.is_empty() {
        return endpoints.to_vec();
    }

    for entry in filter {
        if !endpoints.iter().any(|ep| matches_filter(ep, entry)) {
            log::warn!("endpoint filter `{entry}` matches no endpoint");
        }
    }

    endpoints
        .iter()
        .filter(|ep| filter.iter().any(|entry| matches_filter(ep, entry)))
        .cloned()
        .collect()
}
