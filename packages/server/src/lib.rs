//! Playback synchronization server library.
//!
//! This library implements a WebSocket-based synchronization engine for
//! clients watching the same media stream: rooms, play/pause relay, and
//! recomputed `stats` snapshots broadcast after every mutating event.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
