// crates/data-integrate-core/src/runtime/orchestrator.rs
// ============================================================================
// Module: Test Orchestrator
// Description: End-to-end lifecycle of one templated harness run.
// Purpose: Connect, reconcile, register, execute assertions, and clean up.
// Dependencies: rand, thiserror, time, tokio, crate::{core, interfaces, runtime}
// ============================================================================

//! ## Overview
//! A run moves through `Connected -> Reconciled -> Registered ->
//! Executing -> Finalized -> CleanedUp`. Each phase is a separate function
//! that receives the values produced by the previous one ([`RunPlan`],
//! [`RunContext`]) instead of sharing mutable state.
//!
//! ## Invariants
//! - Nothing runs unless `connect` succeeded.
//! - No assertion runs against an unregistered asset.
//! - Assertions run strictly in template order.
//! - Cleanup is attempted after every connected run, including fatal errors
//!   and deadline expiry, unless the table is retained.
//! - A retained table that this run wrote is still dropped when the run
//!   fails after writing it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::time::Instant;

use crate::core::Assertion;
use crate::core::AssertionKind;
use crate::core::AssertionResult;
use crate::core::HintPolicy;
use crate::core::ReconcileOutcome;
use crate::core::RunEvent;
use crate::core::RunEventKind;
use crate::core::RunPlan;
use crate::core::RunReport;
use crate::core::SynthesisRequest;
use crate::core::TestTemplate;
use crate::interfaces::AssetRequest;
use crate::interfaces::CatalogClient;
use crate::interfaces::DataProducer;
use crate::interfaces::DataSourceRequest;
use crate::interfaces::DialectError;
use crate::interfaces::DialectStrategy;
use crate::interfaces::RunEventSink;
use crate::interfaces::StreamReadRequest;
use crate::interfaces::StreamWriteRequest;
use crate::interfaces::StreamingClient;
use crate::runtime::reconcile::ReconcileError;
use crate::runtime::reconcile::reconcile;
use crate::runtime::validator::RowCountValidator;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Prefix of catalog data source names.
pub const DATA_SOURCE_NAME_PREFIX: &str = "test_datasource_";
/// Default cleanup bound.
pub const DEFAULT_CLEANUP_TIMEOUT: Duration = Duration::from_secs(30);
/// Assertion parameter selecting the row source.
pub const SOURCE_PARAM: &str = "source";
/// Row source backed by the streaming data service.
pub const STREAM_SOURCE: &str = "stream";
/// Row source backed by the target database.
pub const DATABASE_SOURCE: &str = "database";
/// Default streaming chain identifier.
pub const DEFAULT_CHAIN_INFO_ID: &str = "test_chain";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Overall deadline covering connect through the last assertion.
    pub deadline: Option<Duration>,
    /// Bound on the cleanup drop.
    pub cleanup_timeout: Duration,
    /// Treatment of unrecognized type hints.
    pub hint_policy: HintPolicy,
    /// Seed for schema synthesis; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            deadline: None,
            cleanup_timeout: DEFAULT_CLEANUP_TIMEOUT,
            hint_policy: HintPolicy::Strict,
            seed: None,
        }
    }
}

/// External collaborators for one run.
pub struct Collaborators<'a> {
    /// Dialect strategy for the target database (unconnected).
    pub strategy: &'a mut dyn DialectStrategy,
    /// Asset-catalog client.
    pub catalog: &'a dyn CatalogClient,
    /// Bulk producer.
    pub producer: &'a dyn DataProducer,
    /// Optional streaming client for `source = "stream"` assertions.
    pub streaming: Option<&'a dyn StreamingClient>,
    /// Run event sink.
    pub events: &'a dyn RunEventSink,
}

/// Shared view of the collaborators once connected.
#[derive(Clone, Copy)]
pub struct Services<'a> {
    /// Connected dialect strategy.
    pub strategy: &'a dyn DialectStrategy,
    /// Asset-catalog client.
    pub catalog: &'a dyn CatalogClient,
    /// Bulk producer.
    pub producer: &'a dyn DataProducer,
    /// Optional streaming client.
    pub streaming: Option<&'a dyn StreamingClient>,
    /// Run event sink.
    pub events: &'a dyn RunEventSink,
}

// ============================================================================
// SECTION: Errors and Context
// ============================================================================

/// Fatal run errors. No report is produced.
#[derive(Debug, Error)]
pub enum RunError {
    /// Connecting to the target database failed.
    #[error("connect failed: {0}")]
    Connect(DialectError),
    /// Reconciliation failed.
    #[error("reconcile failed: {0}")]
    Reconcile(#[from] ReconcileError),
    /// Catalog registration failed.
    #[error("registration failed: {0}")]
    Registration(String),
    /// The run deadline expired.
    #[error("run deadline exceeded during {0}")]
    DeadlineExceeded(&'static str),
}

/// Run state after reconciliation and registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Resolved names.
    pub plan: RunPlan,
    /// Reconcile outcome.
    pub reconcile: ReconcileOutcome,
    /// Column names when the schema was synthesized in this run.
    pub fields: Vec<String>,
    /// Catalog data source id.
    pub data_source_id: i64,
    /// Catalog asset id.
    pub asset_id: i64,
}

/// Catalog ids assigned during registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredIds {
    /// Data source id.
    pub data_source_id: i64,
    /// Asset id.
    pub asset_id: i64,
}

// ============================================================================
// SECTION: Orchestrator
// ============================================================================

/// Drives templated runs.
#[derive(Debug, Clone, Default)]
pub struct Orchestrator {
    /// Settings.
    config: OrchestratorConfig,
}

impl Orchestrator {
    /// Creates an orchestrator.
    #[must_use]
    pub const fn new(config: OrchestratorConfig) -> Self {
        Self { config }
    }

    /// Returns the settings.
    #[must_use]
    pub const fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Executes `template` under `namespace`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError`] when connect, reconcile, or registration fails,
    /// or when the deadline expires. Assertion failures are reported in the
    /// returned [`RunReport`], not as errors.
    pub async fn run(
        &self,
        template: &TestTemplate,
        namespace: &str,
        collaborators: Collaborators<'_>,
    ) -> Result<RunReport, RunError> {
        let started_at = OffsetDateTime::now_utc();
        let deadline = self.config.deadline.map(|limit| Instant::now() + limit);
        let plan = RunPlan::resolve(template, namespace);
        collaborators.events.record(
            &RunEvent::new(
                namespace,
                RunEventKind::Planned,
                format!("template {} asset {}", template.name, plan.asset_name),
            )
            .with_table(&plan.table_name),
        );

        let Collaborators {
            strategy,
            catalog,
            producer,
            streaming,
            events,
        } = collaborators;

        match within_deadline(deadline, strategy.connect()).await {
            Some(Ok(())) => events.record(&RunEvent::new(
                namespace,
                RunEventKind::Connected,
                strategy.connection_info().redacted(),
            )),
            Some(Err(err)) => {
                events.record(&RunEvent::new(
                    namespace,
                    RunEventKind::ConnectFailed,
                    err.to_string(),
                ));
                return Err(RunError::Connect(err));
            }
            None => {
                events.record(&RunEvent::new(
                    namespace,
                    RunEventKind::DeadlineExceeded,
                    "deadline expired while connecting",
                ));
                return Err(RunError::DeadlineExceeded("connect"));
            }
        }

        let services = Services {
            strategy: &*strategy,
            catalog,
            producer,
            streaming,
            events,
        };
        let (body, wrote_data) =
            match within_deadline(deadline, self.reconcile(template, &plan, services)).await {
                Some(Ok((outcome, fields))) => {
                    let body = within_deadline(
                        deadline,
                        self.register_and_execute(template, &plan, outcome, fields, services),
                    )
                    .await
                    .unwrap_or_else(|| Err(deadline_expired(events, namespace)));
                    (body, outcome.wrote_data())
                }
                Some(Err(err)) => {
                    let wrote_data =
                        matches!(err, RunError::Reconcile(ReconcileError::Produce(_)));
                    (Err(err), wrote_data)
                }
                None => (Err(deadline_expired(events, namespace)), false),
            };

        self.cleanup(services, &plan, body.is_err() && wrote_data).await;
        strategy.close().await;

        let mut report = body?;
        report.started_at = started_at;
        report.finalize(OffsetDateTime::now_utc());
        events.record(&RunEvent::new(
            namespace,
            RunEventKind::Finished,
            format!(
                "{} passed, {} failed, has_failure={}",
                report.passed_count(),
                report.failed_count(),
                report.has_failure
            ),
        ));
        Ok(report)
    }

    /// Registers the asset and executes every assertion.
    async fn register_and_execute(
        &self,
        template: &TestTemplate,
        plan: &RunPlan,
        reconcile: ReconcileOutcome,
        fields: Vec<String>,
        services: Services<'_>,
    ) -> Result<RunReport, RunError> {
        let started_at = OffsetDateTime::now_utc();
        let ids = self.register(template, plan, services).await?;
        let context = RunContext {
            plan: plan.clone(),
            reconcile,
            fields,
            data_source_id: ids.data_source_id,
            asset_id: ids.asset_id,
        };

        let mut report = RunReport {
            template_name: template.name.clone(),
            namespace: plan.namespace.clone(),
            table_name: plan.table_name.clone(),
            asset_name: plan.asset_name.clone(),
            data_source_id: ids.data_source_id,
            asset_id: ids.asset_id,
            reconcile,
            started_at,
            ended_at: started_at,
            duration_ms: 0,
            results: Vec::with_capacity(template.tests.len()),
            has_failure: false,
        };
        for assertion in &template.tests {
            let result = self.execute_assertion(assertion, &context, services).await;
            services.events.record(
                &RunEvent::new(
                    &plan.namespace,
                    RunEventKind::AssertionFinished,
                    format!("{} passed={}: {}", result.kind, result.passed, result.message),
                )
                .with_table(&plan.table_name),
            );
            report.push(result);
        }
        Ok(report)
    }

    // ------------------------------------------------------------------------
    // Phases
    // ------------------------------------------------------------------------

    /// Reconciles the target table and returns the outcome and column names.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Reconcile`] on any reconcile failure.
    pub async fn reconcile(
        &self,
        template: &TestTemplate,
        plan: &RunPlan,
        services: Services<'_>,
    ) -> Result<(ReconcileOutcome, Vec<String>), RunError> {
        let request = SynthesisRequest {
            dialect: services.strategy.dialect(),
            table_name: &plan.table_name,
            field_count: template.schema.field_count,
            row_count: template.data.row_count,
            type_hints: &template.schema.field_types,
            max_field_size: template.schema.max_field_size,
            hint_policy: self.config.hint_policy,
        };
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let reconciled =
            reconcile(services.strategy, services.producer, &request, &mut rng).await?;
        let kind = match reconciled.outcome {
            ReconcileOutcome::Kept { .. } => RunEventKind::TableKept,
            ReconcileOutcome::Regenerated { previous_rows, .. } => {
                services.events.record(
                    &RunEvent::new(
                        &plan.namespace,
                        RunEventKind::TableDropped,
                        format!("stale table held {previous_rows} rows"),
                    )
                    .with_table(&plan.table_name),
                );
                RunEventKind::TableCreated
            }
            ReconcileOutcome::Created { .. } => RunEventKind::TableCreated,
        };
        let rows = match reconciled.outcome {
            ReconcileOutcome::Kept { rows }
            | ReconcileOutcome::Created { rows }
            | ReconcileOutcome::Regenerated { rows, .. } => rows,
        };
        services.events.record(
            &RunEvent::new(
                &plan.namespace,
                kind,
                format!("{} ({rows} rows)", reconciled.outcome.label()),
            )
            .with_table(&plan.table_name),
        );
        let fields = reconciled
            .schema
            .map(|schema| schema.column_names().into_iter().map(str::to_string).collect())
            .unwrap_or_default();
        Ok((reconciled.outcome, fields))
    }

    /// Registers a data source and an asset with the catalog.
    ///
    /// When asset creation fails after the data source was created, the data
    /// source is deleted on a best-effort basis.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Registration`] when either call fails or is
    /// rejected.
    pub async fn register(
        &self,
        template: &TestTemplate,
        plan: &RunPlan,
        services: Services<'_>,
    ) -> Result<RegisteredIds, RunError> {
        let connection = services.strategy.connection_info();
        let source_request = DataSourceRequest {
            name: format!("{DATA_SOURCE_NAME_PREFIX}{}", plan.namespace),
            host: connection.host.clone(),
            port: connection.port,
            db_type: services.strategy.dialect().catalog_code(),
            username: connection.user.clone(),
            password: connection.password.clone(),
            database_name: connection.database.clone(),
        };
        let data_source_id = match services.catalog.create_data_source(&source_request).await {
            Ok(registration) if registration.success => registration.id,
            Ok(registration) => {
                return Err(self.registration_failed(
                    services,
                    plan,
                    format!("create data source rejected: {}", registration.message),
                ));
            }
            Err(err) => {
                return Err(self.registration_failed(
                    services,
                    plan,
                    format!("create data source failed: {err}"),
                ));
            }
        };
        services.events.record(&RunEvent::new(
            &plan.namespace,
            RunEventKind::DataSourceRegistered,
            format!("data source {} id {data_source_id}", source_request.name),
        ));

        let asset_request = AssetRequest {
            asset_name: template.name.clone(),
            asset_en_name: plan.asset_name.clone(),
            data_source_id,
            database_name: connection.database.clone(),
            table_name: plan.table_name.clone(),
        };
        let failure = match services.catalog.create_asset(&asset_request).await {
            Ok(registration) if registration.success => {
                services.events.record(
                    &RunEvent::new(
                        &plan.namespace,
                        RunEventKind::AssetRegistered,
                        format!("asset {} id {}", plan.asset_name, registration.id),
                    )
                    .with_table(&plan.table_name),
                );
                return Ok(RegisteredIds {
                    data_source_id,
                    asset_id: registration.id,
                });
            }
            Ok(registration) => format!("create asset rejected: {}", registration.message),
            Err(err) => format!("create asset failed: {err}"),
        };

        let compensation = match services.catalog.delete_data_source(data_source_id).await {
            Ok(()) => format!("deleted data source {data_source_id}"),
            Err(err) => format!("data source {data_source_id} left behind: {err}"),
        };
        services.events.record(&RunEvent::new(
            &plan.namespace,
            RunEventKind::Compensated,
            compensation,
        ));
        Err(self.registration_failed(services, plan, failure))
    }

    /// Logs and wraps a registration failure.
    fn registration_failed(
        &self,
        services: Services<'_>,
        plan: &RunPlan,
        message: String,
    ) -> RunError {
        services.events.record(&RunEvent::new(
            &plan.namespace,
            RunEventKind::RegistrationFailed,
            message.clone(),
        ));
        RunError::Registration(message)
    }

    /// Executes one assertion. Failures are captured in the result.
    pub async fn execute_assertion(
        &self,
        assertion: &Assertion,
        context: &RunContext,
        services: Services<'_>,
    ) -> AssertionResult {
        match &assertion.kind {
            AssertionKind::Read => self.execute_read(assertion, context, services).await,
            AssertionKind::Write => self.execute_write(assertion, context, services).await,
            AssertionKind::ReadWrite => {
                let write = self.execute_write(assertion, context, services).await;
                if !write.passed {
                    return write;
                }
                self.execute_read(assertion, context, services).await
            }
            AssertionKind::Unknown(kind) => {
                let now = OffsetDateTime::now_utc();
                AssertionResult::errored(
                    kind,
                    assertion.expected,
                    format!("unknown test type: {kind}"),
                    now,
                    now,
                )
            }
        }
    }

    /// Counts rows from the configured source and validates them.
    async fn execute_read(
        &self,
        assertion: &Assertion,
        context: &RunContext,
        services: Services<'_>,
    ) -> AssertionResult {
        let started_at = OffsetDateTime::now_utc();
        let validator = RowCountValidator::new(assertion.expected, assertion.tolerance);
        let observed = match assertion.param_str(SOURCE_PARAM).unwrap_or(DATABASE_SOURCE) {
            DATABASE_SOURCE => services
                .strategy
                .row_count(&context.plan.table_name)
                .await
                .map_err(|err| err.to_string()),
            STREAM_SOURCE => match services.streaming {
                Some(streaming) => {
                    let request = StreamReadRequest {
                        asset_name: context.plan.asset_name.clone(),
                        chain_info_id: assertion
                            .param_str("chain_info_id")
                            .unwrap_or(DEFAULT_CHAIN_INFO_ID)
                            .to_string(),
                        request_id: request_id("read"),
                        db_fields: context.fields.clone(),
                    };
                    streaming.read_row_count(&request).await.map_err(|err| err.to_string())
                }
                None => Err("streaming client not configured".to_string()),
            },
            other => Err(format!("unknown read source: {other}")),
        };
        let ended_at = OffsetDateTime::now_utc();
        match observed {
            Ok(observed) => AssertionResult::from_verdict(
                AssertionKind::Read.as_str(),
                validator.validate_read(observed),
                started_at,
                ended_at,
            ),
            Err(error) => AssertionResult::errored(
                AssertionKind::Read.as_str(),
                assertion.expected,
                error,
                started_at,
                ended_at,
            ),
        }
    }

    /// Optionally writes through the stream, then re-counts the table.
    async fn execute_write(
        &self,
        assertion: &Assertion,
        context: &RunContext,
        services: Services<'_>,
    ) -> AssertionResult {
        let started_at = OffsetDateTime::now_utc();
        let validator = RowCountValidator::new(assertion.expected, assertion.tolerance);
        let kind = AssertionKind::Write.as_str();
        match assertion.param_str(SOURCE_PARAM).unwrap_or(DATABASE_SOURCE) {
            DATABASE_SOURCE => {}
            STREAM_SOURCE => {
                let Some(streaming) = services.streaming else {
                    return AssertionResult::errored(
                        kind,
                        assertion.expected,
                        "streaming client not configured".to_string(),
                        started_at,
                        OffsetDateTime::now_utc(),
                    );
                };
                let request = StreamWriteRequest {
                    asset_name: context.plan.asset_name.clone(),
                    request_id: request_id("write"),
                    table_name: context.plan.table_name.clone(),
                    row_count: assertion
                        .params
                        .get("rows")
                        .and_then(serde_json::Value::as_u64)
                        .unwrap_or(assertion.expected),
                };
                if let Err(err) = streaming.write_rows(&request).await {
                    return AssertionResult::errored(
                        kind,
                        assertion.expected,
                        err.to_string(),
                        started_at,
                        OffsetDateTime::now_utc(),
                    );
                }
            }
            other => {
                return AssertionResult::errored(
                    kind,
                    assertion.expected,
                    format!("unknown write source: {other}"),
                    started_at,
                    OffsetDateTime::now_utc(),
                );
            }
        }
        let verdict = validator.validate_write(services.strategy, &context.plan.table_name).await;
        let ended_at = OffsetDateTime::now_utc();
        match verdict {
            Ok(verdict) => AssertionResult::from_verdict(kind, verdict, started_at, ended_at),
            Err(err) => AssertionResult::errored(
                kind,
                assertion.expected,
                err.to_string(),
                started_at,
                ended_at,
            ),
        }
    }

    /// Drops the run table unless it is retained. Failures are logged only.
    ///
    /// `discard_written` drops a retained table as well; it is set when the
    /// run wrote the table and then failed.
    pub async fn cleanup(&self, services: Services<'_>, plan: &RunPlan, discard_written: bool) {
        if plan.retain_table && !discard_written {
            services.events.record(
                &RunEvent::new(&plan.namespace, RunEventKind::CleanupSkipped, "table retained")
                    .with_table(&plan.table_name),
            );
            return;
        }
        let drop_table = services.strategy.cleanup(&plan.table_name);
        let outcome = tokio::time::timeout(self.config.cleanup_timeout, drop_table).await;
        let (kind, message) = match outcome {
            Ok(Ok(())) => (RunEventKind::CleanedUp, "table dropped".to_string()),
            Ok(Err(err)) => (RunEventKind::CleanupFailed, err.to_string()),
            Err(_) => (RunEventKind::CleanupFailed, "cleanup timed out".to_string()),
        };
        services
            .events
            .record(&RunEvent::new(&plan.namespace, kind, message).with_table(&plan.table_name));
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Records deadline expiry and returns the matching error.
fn deadline_expired(events: &dyn RunEventSink, namespace: &str) -> RunError {
    events.record(&RunEvent::new(
        namespace,
        RunEventKind::DeadlineExceeded,
        "deadline expired before the run finished",
    ));
    RunError::DeadlineExceeded("run")
}

/// Awaits `future`, bounded by `deadline` when set. `None` means expiry.
async fn within_deadline<F: Future>(deadline: Option<Instant>, future: F) -> Option<F::Output> {
    match deadline {
        Some(deadline) => tokio::time::timeout_at(deadline, future).await.ok(),
        None => Some(future.await),
    }
}

/// Builds a request id such as `read_1700000000`.
fn request_id(kind: &str) -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{kind}_{secs}")
}
