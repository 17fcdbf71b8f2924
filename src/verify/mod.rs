// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The verification layer.
//!
//! Two complementary approaches to catching bugs:
//!
//! 1. **Restore-time validation** (`WordStore::from_parts`, snapshot restore)
//!    that returns errors. Snapshots come from outside, so they are never
//!    trusted blindly.
//!
//! 2. **Runtime contracts** (this module) that panic in debug builds when an
//!    invariant established by construction is violated. Zero-cost in
//!    release, but they catch algorithmic errors when tests run.

mod contracts;

pub use contracts::*;
