// system-tests/tests/helpers/runs.rs
// ============================================================================
// Module: Run Builders
// Description: Template and collaborator assembly for live runs.
// Purpose: Drive the orchestrator against a fixture the way the CLI does.
// Dependencies: data-integrate-{core,config,clients,dialects}
// ============================================================================

use data_integrate_clients::OfflineCatalogClient;
use data_integrate_config::parse_template;
use data_integrate_core::Collaborators;
use data_integrate_core::DatabaseConnection;
use data_integrate_core::DialectStrategy;
use data_integrate_core::HintPolicy;
use data_integrate_core::NamespaceAllocator;
use data_integrate_core::NoopEventSink;
use data_integrate_core::Orchestrator;
use data_integrate_core::OrchestratorConfig;
use data_integrate_core::RunError;
use data_integrate_core::RunReport;
use data_integrate_core::TestTemplate;
use data_integrate_dialects::BulkInsertProducer;
use data_integrate_dialects::create_strategy;

/// Fixed seed so schema and data are reproducible across runs.
pub const RUN_SEED: u64 = 7;

/// Builds a template with one read assertion.
pub fn read_template(
    dialect: &str,
    row_count: u64,
    table_name: Option<&str>,
    keep_table: bool,
) -> TestTemplate {
    let table_line = table_name.map_or_else(String::new, |name| format!("  table_name: {name}\n"));
    let yaml = format!(
        "name: live_{dialect}\n\
         database:\n  type: {dialect}\n\
         schema:\n  field_count: 6\n  max_field_size: 64\n{table_line}\
         data:\n  row_count: {row_count}\n  keep_table: {keep_table}\n\
         tests:\n  - type: read\n    expected: {row_count}\n    tolerance: 0\n"
    );
    parse_template(&yaml, HintPolicy::Strict).expect("live template parses")
}

/// Runs `template` against `connection` with an offline catalog.
pub async fn run_template(
    connection: &DatabaseConnection,
    template: &TestTemplate,
) -> Result<RunReport, RunError> {
    let namespace = NamespaceAllocator::new("sys").generate_namespace(&template.name);
    let mut strategy = create_strategy(connection).expect("dialect is supported");
    let catalog = OfflineCatalogClient::new();
    let producer = BulkInsertProducer::new(200, Some(RUN_SEED));
    let orchestrator = Orchestrator::new(OrchestratorConfig {
        seed: Some(RUN_SEED),
        ..OrchestratorConfig::default()
    });
    orchestrator
        .run(
            template,
            &namespace,
            Collaborators {
                strategy: strategy.as_mut(),
                catalog: &catalog,
                producer: &producer,
                streaming: None,
                events: &NoopEventSink,
            },
        )
        .await
}

/// Opens a connected strategy for direct inspection.
pub async fn connected(connection: &DatabaseConnection) -> Box<dyn DialectStrategy> {
    let mut strategy = create_strategy(connection).expect("dialect is supported");
    strategy.connect().await.expect("connect succeeds");
    strategy
}
