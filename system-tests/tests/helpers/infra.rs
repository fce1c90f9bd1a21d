// system-tests/tests/helpers/infra.rs
// ============================================================================
// Module: System Test Infrastructure
// Description: MySQL and PostgreSQL fixtures for live-database system tests.
// Purpose: Provide isolated database servers for reconcile verification.
// Dependencies: testcontainers, data-integrate-core, system-tests
// ============================================================================

//! ## Overview
//! Each fixture either adopts an endpoint from the environment or starts a
//! container. MySQL-protocol dialects (`mysql`, `gbase`) run against the MySQL
//! fixture; PostgreSQL-protocol dialects (`kingbase`, `vastbase`) run against
//! the PostgreSQL fixture.

use data_integrate_core::DatabaseConnection;
use system_tests::config::Endpoint;
use system_tests::config::SystemTestConfig;
use testcontainers::ContainerAsync;
use testcontainers::GenericImage;
use testcontainers::ImageExt;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::AsyncRunner;

pub const DATABASE_PASSWORD: &str = "secret";
pub const DATABASE_NAME: &str = "integration";
const MYSQL_PORT: u16 = 3306;
const POSTGRES_PORT: u16 = 5432;

pub struct DatabaseFixture {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub database: String,
    _container: Option<ContainerAsync<GenericImage>>,
}

impl DatabaseFixture {
    pub async fn mysql(config: &SystemTestConfig) -> Result<Self, String> {
        if let Some(endpoint) = &config.mysql {
            return Ok(Self::external(endpoint, "root"));
        }
        ensure_docker_available()?;
        let container = GenericImage::new("mysql", "8.0")
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_env_var("MYSQL_ROOT_PASSWORD", DATABASE_PASSWORD)
            .with_env_var("MYSQL_DATABASE", DATABASE_NAME)
            .start()
            .await
            .map_err(|err| format!("failed to start mysql container: {err}"))?;
        let port = container
            .get_host_port_ipv4(MYSQL_PORT.tcp())
            .await
            .map_err(|err| format!("failed to resolve mysql port: {err}"))?;
        Ok(Self::container("root", port, container))
    }

    pub async fn postgres(config: &SystemTestConfig) -> Result<Self, String> {
        if let Some(endpoint) = &config.postgres {
            return Ok(Self::external(endpoint, "postgres"));
        }
        ensure_docker_available()?;
        let container = GenericImage::new("postgres", "16")
            .with_exposed_port(POSTGRES_PORT.tcp())
            .with_env_var("POSTGRES_PASSWORD", DATABASE_PASSWORD)
            .with_env_var("POSTGRES_DB", DATABASE_NAME)
            .start()
            .await
            .map_err(|err| format!("failed to start postgres container: {err}"))?;
        let port = container
            .get_host_port_ipv4(POSTGRES_PORT.tcp())
            .await
            .map_err(|err| format!("failed to resolve postgres port: {err}"))?;
        Ok(Self::container("postgres", port, container))
    }

    /// Builds a connection profile for `dialect` against this server.
    pub fn connection(&self, dialect: &str) -> DatabaseConnection {
        DatabaseConnection {
            name: format!("system-{dialect}"),
            dialect: dialect.to_string(),
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: DATABASE_PASSWORD.to_string(),
            database: self.database.clone(),
        }
    }

    fn external(endpoint: &Endpoint, user: &str) -> Self {
        Self {
            host: endpoint.host.clone(),
            port: endpoint.port,
            user: user.to_string(),
            database: DATABASE_NAME.to_string(),
            _container: None,
        }
    }

    fn container(user: &str, port: u16, container: ContainerAsync<GenericImage>) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port,
            user: user.to_string(),
            database: DATABASE_NAME.to_string(),
            _container: Some(container),
        }
    }
}

fn ensure_docker_available() -> Result<(), String> {
    let output = std::process::Command::new("docker")
        .arg("info")
        .output()
        .map_err(|err| format!("docker info failed: {err}"))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("docker info failed: {stderr}"));
    }
    Ok(())
}
