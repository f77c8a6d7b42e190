// Copyright 2026 the Marquee Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing and Chrome trace export for Marquee
//! frame-loop diagnostics.
//!
//! This crate provides [`TraceSink`](marquee_core::trace::TraceSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] writes one human-readable line per event.
//! - [`recorder::RecorderSink`] keeps a compact binary recording, read back
//!   with [`recorder::decode`].
//! - [`chrome::export`] turns a recording into Chrome Trace Event Format
//!   JSON.

pub mod chrome;
pub mod pretty;
pub mod recorder;
