// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Gateway runtime orchestration.

use std::sync::Arc;

use bodega_api::{ApiConfig, ApiServer, AppState};
use bodega_config::BodegaConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::error::{BinError, BinResult};
use crate::shutdown::ShutdownCoordinator;

// =============================================================================
// GatewayRuntime
// =============================================================================

/// Builds the gateway from configuration and runs it until shutdown.
pub struct GatewayRuntime {
    config: Arc<BodegaConfig>,
    shutdown: ShutdownCoordinator,
}

impl GatewayRuntime {
    /// Creates a new gateway runtime.
    pub fn new(config: BodegaConfig) -> Self {
        Self {
            config: Arc::new(config),
            shutdown: ShutdownCoordinator::new(),
        }
    }

    /// Returns the shutdown coordinator.
    pub fn shutdown(&self) -> &ShutdownCoordinator {
        &self.shutdown
    }

    /// Builds the shared state for this configuration.
    pub fn build_state(&self) -> BinResult<AppState> {
        let api_config = ApiConfig::from_config(&self.config);
        Ok(AppState::builder().config(api_config).build()?)
    }

    /// Builds the server for this configuration.
    pub fn build_server(&self) -> BinResult<ApiServer> {
        Ok(ApiServer::new(self.build_state()?))
    }

    /// Runs the gateway until a shutdown signal arrives.
    ///
    /// An unreachable backend is logged but does not stop startup; `/ready`
    /// keeps reporting it.
    pub async fn run(self) -> BinResult<()> {
        info!(version = bodega_core::VERSION, "Starting Bodega gateway");

        let state = self.build_state()?;
        if !state.backend().ping().await {
            warn!(
                error = %BinError::backend_unreachable(state.backend().base_url()),
                "Starting without a reachable backend"
            );
        }

        let server = ApiServer::new(state);
        let addr = server.addr();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| BinError::Bind { addr, source })?;
        let signal = self.shutdown.shutdown_signal();

        let watcher = {
            let shutdown = self.shutdown.clone();
            tokio::spawn(async move { shutdown.wait_for_shutdown().await })
        };

        let result = server.serve(listener, signal.wait()).await;
        watcher.abort();
        result?;

        info!("Bodega gateway shutdown complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_config::{ConfigFormat, ConfigLoader};

    fn config() -> BodegaConfig {
        ConfigLoader::new()
            .with_environment(Vec::<(String, String)>::new())
            .load_from_str(
                r#"
backend:
  url: "http://127.0.0.1:4000/api"
jwt:
  secret: "runtime-test-secret-that-is-long-enough"
"#,
                ConfigFormat::Yaml,
            )
            .unwrap()
    }

    #[test]
    fn test_build_server() {
        let runtime = GatewayRuntime::new(config());
        let server = runtime.build_server().unwrap();
        assert_eq!(server.addr().port(), 3000);
    }

    #[tokio::test]
    async fn test_run_stops_on_shutdown() {
        let mut config = config();
        config.server.port = 0;
        let runtime = GatewayRuntime::new(config);
        runtime.shutdown().initiate_shutdown();

        tokio::time::timeout(std::time::Duration::from_secs(5), runtime.run())
            .await
            .expect("runtime should stop")
            .unwrap();
    }

    #[tokio::test]
    async fn test_run_reports_port_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let mut config = config();
        config.server.bind_address = "127.0.0.1".parse().unwrap();
        config.server.port = taken.local_addr().unwrap().port();

        let err = GatewayRuntime::new(config).run().await.unwrap_err();
        assert!(matches!(err, BinError::Bind { .. }));
        assert_eq!(err.exit_code(), crate::error::EXIT_BIND);
    }
}
