// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Workflow coordination only: each use case wires the data,
// ml and infra layers together for one CLI command and returns
// a plain result for Layer 1 to print.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The resumable training workflow
pub mod train_use_case;

// Checkpoint directory listing
pub mod list_use_case;
