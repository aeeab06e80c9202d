// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end workflow tests for the kbcal-core crate.
//!
//! These tests drive the event store through a real file-backed storage and
//! reload it the way the application does on every start.

mod config_driven;
mod event_lifecycle;
mod persistence;
