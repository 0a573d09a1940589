//! # DELVE
//!
//! The simulation crate, tying entities and tiles together one tick at a time.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          SIMULATION TICK                         │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  InputState ──> player_system ──> PhysicsResolver ──> follow     │
//! │                                        │                │        │
//! │                                        v                v        │
//! │  ┌─────────────┐               ┌─────────────┐   ┌────────────┐  │
//! │  │ delve_core  │<─────────────>│  TileWorld  │   │  Camera2D  │  │
//! │  │  Ecs        │               │  (chunks)   │   │  follow    │  │
//! │  └──────┬──────┘               └──────┬──────┘   └─────┬──────┘  │
//! │         │ gather_lights               │ solidity       │ view    │
//! │         └──────────────────> LightMap <────────────────┘         │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `camera`: view bounds, visible tile rectangles, smoothing and zoom
//! - `config`: TOML-backed tunables
//! - `input`: held buttons and press edges
//! - `lighting`: flood-fill light grid
//! - `physics`: gravity and axis-separated tile collision
//! - `simulation`: the per-frame tick
//! - `systems`: player control, followers, light gathering

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod camera;
pub mod config;
pub mod error;
pub mod input;
pub mod lighting;
pub mod physics;
pub mod simulation;
pub mod systems;

pub use delve_core as core;
pub use delve_procedural as procedural;

pub use camera::{Camera2D, TileRect, ZOOM_STEP};
pub use config::{
    CameraConfig, LightingConfig, PhysicsConfig, PlayerConfig, SimulationConfig, WorldConfig,
};
pub use error::{ConfigError, ConfigResult};
pub use input::{Button, InputState};
pub use lighting::{darkness_alpha, LightMap, LightSource, LightStats, MAX_DARKNESS_ALPHA};
pub use physics::{PhysicsResolver, PhysicsStats};
pub use simulation::{Simulation, TickStats};
pub use systems::{follow_system, gather_lights, player_system};
