#![warn(clippy::all, rust_2018_idioms)]
//! Layout and routing core of a schematic canvas for logic gates.
//!
//! Gates are placed from fixed templates, their pins become typed connection
//! points, and a two-click gesture joins two points with an orthogonal wire
//! routed around the placed gates. Rendering and input plumbing live in the
//! host, which drives a [`Canvas`] per session.

pub mod assets;
pub mod canvas;
pub mod config;
pub mod connection_manager;
pub mod coords;
pub mod db;
pub mod drag;
pub mod error;
pub mod routing;
pub mod wiring;
pub use canvas::Canvas;
pub use error::LayoutError;
