// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Produces the (features, labels) pair the training session
// slices into batches.
//
//   CSV file ──► CsvLoader ─────┐
//                               ├──► Dataset ──► TrainingSession
//   seed ──────► SyntheticSource┘
//
// Reference: csv crate documentation
//            Rust Book §13 (Iterators and Closures)

/// Dataset container and the DatasetSource trait
pub mod dataset;

/// Reads numeric CSV rows (last column = class label)
pub mod loader;

/// Seeded, shuffled clustered data for demos and smoke runs
pub mod synthetic;
