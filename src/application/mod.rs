// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Coordinates the other layers for one complete run. No model
// math and no printing here.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// Load → split → train → evaluate → report
pub mod run_use_case;
