// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `run` command.

use bodega_config::{load_config, BodegaConfig};
use tracing::info;

use crate::cli::{Cli, RunArgs};
use crate::error::{BinError, BinResult};
use crate::logging::init_logging;
use crate::runtime::GatewayRuntime;

/// Loads configuration, starts logging and runs the gateway.
pub async fn run(cli: &Cli, args: RunArgs) -> BinResult<()> {
    let mut config = load_config(cli.config.as_deref())
        .map_err(|e| BinError::from(e).with_context("Failed to load configuration"))?;
    apply_overrides(&mut config, &args);

    init_logging(
        cli.effective_log_level(config.logging.level.as_str()),
        cli.effective_log_format(config.logging.format),
    );

    info!(
        addr = %config.server.socket_addr(),
        backend = %config.backend.base_url(),
        "Configuration loaded"
    );

    GatewayRuntime::new(config).run().await
}

fn apply_overrides(config: &mut BodegaConfig, args: &RunArgs) {
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref dir) = args.pages_dir {
        config.server.pages_dir = dir.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_apply_overrides() {
        let mut config = BodegaConfig::default();
        apply_overrides(
            &mut config,
            &RunArgs {
                port: Some(8081),
                pages_dir: Some(PathBuf::from("/srv/bodega")),
            },
        );
        assert_eq!(config.server.port, 8081);
        assert_eq!(config.server.pages_dir, PathBuf::from("/srv/bodega"));

        let before = config.server.port;
        apply_overrides(&mut config, &RunArgs::default());
        assert_eq!(config.server.port, before);
    }
}
