//! Purpose: Library crate behind the `file-client` CLI and its tests.
//! Exports: `core` (error taxonomy), `api` (config, backend contract, transports, dispatch).
//! Role: Holds every design decision; `main.rs` only parses flags and wires outputs.
//! Invariants: One identifier resolves through exactly one backend call per invocation.
//! Invariants: Configuration is passed explicitly; there is no ambient context.
pub mod api;
pub mod core;
