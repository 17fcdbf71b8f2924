// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Ordering primitives shared by the word store and its callers.

pub mod bisect;

pub use bisect::{leftmost_match, rightmost_match};
