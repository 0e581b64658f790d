//! Layer 1: Primitives
//!
//! # Purpose
//!
//! This layer provides the data model shared by every other layer:
//! coordinate reference systems, points and observations, regular grids with
//! named layers, cell values, the regression matrix, and the error type.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives ← You are here
//! ```

/// Error type.
pub mod errors;

/// Coordinate reference system identifiers.
pub mod crs;

/// Reference points, observations and their sets.
pub mod point;

/// Regular grids and named layers.
pub mod grid;

/// Cell values and column kinds.
pub mod value;

/// Column schema and regression matrix.
pub mod matrix;
