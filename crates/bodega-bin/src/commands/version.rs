// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Implementation of the `version` command.

use crate::cli::Cli;
use crate::error::BinResult;

/// Prints version information for every component.
pub fn version(_cli: &Cli) -> BinResult<()> {
    println!("Bodega - role-aware gateway for the winery management app");
    println!();
    println!("Version Information:");
    println!("  bodega-bin:    {}", env!("CARGO_PKG_VERSION"));
    println!("  bodega-core:   {}", bodega_core::VERSION);
    println!("  bodega-api:    {}", bodega_api::VERSION);
    println!("  bodega-config: {}", bodega_config::VERSION);
    println!();
    println!("Build Information:");
    println!("  Target:        {}", std::env::consts::ARCH);
    println!("  OS:            {}", std::env::consts::OS);
    println!();
    println!("License: PolyForm Noncommercial License 1.0.0");
    println!("Copyright (c) 2025 Sylvex. All rights reserved.");

    Ok(())
}
