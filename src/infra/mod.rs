// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns used by several layers:
//
//   device.rs  - ExecutionContext (explicit device handle) and
//                the backend choice made at startup
//
//   metrics.rs - per-batch loss CSV and the JSON run report
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Execution context and backend selection
pub mod device;

/// Batch-loss CSV logger and run report
pub mod metrics;
