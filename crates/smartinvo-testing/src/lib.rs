//! Testing infrastructure for smartinvo tests.
//!
//! This crate provides utilities for writing deterministic tests:
//! - `StubBackend`: scripted in-process `Backend` with a call log and gates
//! - `StubServer`: canned HTTP service on a loopback port
//! - `TestWorld`: isolated config + stub server for CLI runs
//! - `assertions`: checks over revealed frame sequences
//! - `fixtures`: wire payloads for every endpoint

pub mod assertions;
pub mod fixtures;
pub mod server;
pub mod stub;
pub mod world;

pub use server::{RecordedRequest, StubServer};
pub use stub::{Gate, RecordedCall, StubBackend};
pub use world::{CliResult, TestWorld};
