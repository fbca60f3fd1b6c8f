// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `validate` command.

use bodega_api::BackendClient;
use bodega_config::{load_config, BodegaConfig};

use crate::cli::{Cli, OutputFormat, ValidateArgs};
use crate::error::{BinError, BinResult};

/// Minimum recommended HS256 secret length in bytes.
const MIN_SECRET_LEN: usize = 32;

/// Loads and validates the configuration, then prints a summary.
pub async fn validate(cli: &Cli, args: ValidateArgs) -> BinResult<()> {
    if let Some(ref path) = cli.config {
        if !path.exists() {
            return Err(BinError::config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }
    }

    let config = load_config(cli.config.as_deref())
        .map_err(|e| BinError::from(e).with_context("Configuration validation failed"))?;
    let warnings = collect_warnings(&config);
    let source = cli
        .config
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(environment)".to_string());

    match args.format {
        OutputFormat::Text => {
            println!("✓ Configuration is valid: {}", source);
            println!();
            println!("Summary:");
            println!("  Listen:   {}", config.server.socket_addr());
            println!("  Backend:  {}", config.backend.base_url());
            println!("  Pages:    {}", config.server.pages_dir.display());
            println!(
                "  CORS:     {}",
                if config.server.cors.is_enabled() { "enabled" } else { "disabled" }
            );

            if !warnings.is_empty() {
                println!();
                println!("Warnings:");
                for warning in &warnings {
                    println!("  ⚠ {}", warning);
                }
            }

            if args.show_config {
                println!();
                println!("Parsed configuration:");
                println!(
                    "{}",
                    serde_json::to_string_pretty(&redacted(&config))
                        .unwrap_or_else(|_| "(serialization error)".to_string())
                );
            }
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "valid": true,
                "source": source,
                "summary": {
                    "listen": config.server.socket_addr().to_string(),
                    "backend_url": config.backend.base_url(),
                    "pages_dir": config.server.pages_dir.display().to_string(),
                    "cors_enabled": config.server.cors.is_enabled(),
                },
                "warnings": warnings,
                "config": if args.show_config { Some(redacted(&config)) } else { None },
            });
            let rendered = serde_json::to_string_pretty(&output)
                .map_err(|e| BinError::runtime(format!("Failed to render output: {}", e)))?;
            println!("{}", rendered);
        }
    }

    if args.check_backend {
        check_backend(&config).await?;
        if args.format == OutputFormat::Text {
            println!("✓ Backend reachable: {}", config.backend.base_url());
        }
    }

    if args.strict && !warnings.is_empty() {
        return Err(BinError::config(format!(
            "Strict mode: {} warning(s) found",
            warnings.len()
        )));
    }

    Ok(())
}

/// Sends one request to the backend; any HTTP answer counts.
async fn check_backend(config: &BodegaConfig) -> BinResult<()> {
    let url = config.backend.base_url();
    let client = BackendClient::new(url, config.backend.timeout())?;
    if client.ping().await {
        Ok(())
    } else {
        Err(BinError::backend_unreachable(url))
    }
}

/// Non-fatal problems worth reporting.
fn collect_warnings(config: &BodegaConfig) -> Vec<String> {
    let mut warnings = Vec::new();

    let secret_len = config
        .jwt
        .secret
        .as_ref()
        .map(|s| s.expose().len())
        .unwrap_or(0);
    if secret_len < MIN_SECRET_LEN {
        warnings.push(format!(
            "JWT secret is shorter than {} bytes",
            MIN_SECRET_LEN
        ));
    }

    if !config.server.pages_dir.exists() {
        warnings.push(format!(
            "Page bundle directory does not exist: {}",
            config.server.pages_dir.display()
        ));
    }

    let cors = &config.server.cors;
    if cors.allow_credentials && cors.allowed_origins.iter().any(|o| o == "*") {
        warnings.push("CORS credentials are ignored with a wildcard origin".to_string());
    }

    warnings
}

/// Configuration as JSON with the secret removed.
fn redacted(config: &BodegaConfig) -> serde_json::Value {
    let mut value = serde_json::to_value(config).unwrap_or(serde_json::Value::Null);
    if let Some(jwt) = value.get_mut("jwt").and_then(|v| v.as_object_mut()) {
        if jwt.contains_key("secret") {
            jwt.insert("secret".to_string(), serde_json::json!("***"));
        }
    }
    value
}
