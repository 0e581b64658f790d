//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure numerical functions with no knowledge of
//! generation or assembly workflows:
//! - Planar distance kernels (scalar and SIMD)
//! - Point-in-cell lookup
//! - Case-weight transforms
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
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Planar distance kernels.
pub mod distance;

/// Point-in-cell lookup.
pub mod cell;

/// Case-weight transforms.
pub mod weights;
