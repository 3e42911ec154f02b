// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types shared by every other layer.
//   - no burn types
//   - no file I/O
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// A single (window, target) example
pub mod sample;

// Abstractions the data layer implements
pub mod traits;

// Error taxonomy for the regressor core
pub mod error;
