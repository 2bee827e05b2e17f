// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Everything that touches the checkpoint directory:
//
//   checkpoint.rs   — CheckpointStore
//                     Resolves save/load paths using the
//                     `{timestamp}_wgt_{epoch}.h5` convention,
//                     finds the latest checkpoint and keeps the
//                     session's epoch counter in step with it.
//
//   metrics.rs      — Epoch metrics logging
//                     Appends mean loss / accuracy per epoch
//                     to metrics.csv.
//
//   config_store.rs — Training config snapshot
//                     Writes / reads train_config.json.
//
// None of these files match the checkpoint pattern except the
// weight files themselves, so they can share one directory.
//
// Reference: Rust Book §9 (Error Handling with anyhow)
//            Rust Book §12 (I/O and File Handling)

/// Checkpoint discovery, saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// TrainConfig JSON persistence
pub mod config_store;
