//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer measures and reports, without transforming data:
//! - Cost estimates for buffer-distance generation
//! - Row accounting for assembly
//! - Accuracy diagnostics
//! - K-fold partitions for engine comparison
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
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Cost estimate for buffer-distance generation.
pub mod cost;

/// Assembly row accounting.
pub mod report;

/// Accuracy diagnostics.
pub mod diagnostics;

/// K-fold partitions.
pub mod cv;
