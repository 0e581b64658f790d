//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the feature-engineering core:
//! - Buffer-distance layers (per point and per class)
//! - Overlay of observations on grid layers
//! - Melt-and-stack of per-target blocks
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Buffer-distance layer kernels and site grouping.
pub mod buffer_distance;

/// Point-on-grid overlay.
pub mod overlay;

/// Stacking of per-target regression blocks.
pub mod stacking;
