//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides the assembly modes selected from the API builder:
//! - Single: one target variable
//! - Stacked: several target variables melted into one matrix
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Single-target assembly.
pub mod single;

/// Stacked multivariate assembly.
pub mod stacked;
