// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! HTTP handlers not covered by the proxy route table.

mod health;
mod pages;

pub use health::{health, ready, HealthStatus, ReadinessStatus};
pub use pages::{api_not_found, root};
