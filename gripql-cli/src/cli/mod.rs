// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for GripQL
//!
//! Provides query document validation and inspection, and prints sample
//! queries assembled with the builder.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_example, handle_inspect, handle_version};
