// Copyright 2026 the Nanotile Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, recording, and JSON export for nanotile frame traces.
//!
//! This crate provides [`TraceSink`](nanotile_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary event recording, read back
//!   with [`recorder::decode`].
//! - [`json::export`]: Chrome Trace Event Format JSON export of a recording.

pub mod json;
pub mod pretty;
pub mod recorder;
