// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI subsystem for the geometry sampler

pub mod export;
pub mod reporter;

pub use export::SampleSet;
pub use reporter::Reporter;
