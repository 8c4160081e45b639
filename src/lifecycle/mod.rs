//! Mode lifecycle
//!
//! Per-tick orchestration (pre-process, process, post-process) and the
//! single entry point for mode changes. Enter, exit and per-frame behavior
//! fan out per mode; modes without a handler do nothing unless a species
//! hook supplies behavior.

pub mod behaviors;
pub mod callbacks;
pub mod dispatcher;
pub mod motion;
