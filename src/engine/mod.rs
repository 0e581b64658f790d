//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates execution:
//! - Input validation
//! - Buffer-distance and assembly execution
//! - Output types
//! - Model specification and the regression-engine seam
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Input validation.
pub mod validator;

/// Buffer-distance and assembly executors.
pub mod executor;

/// Output types.
pub mod output;

/// Model specification and engine trait.
pub mod model;
