// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits describing the training harness:
// what a trainable model can do, how it is compiled, what a
// checkpoint filename means, and what can go wrong.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO directory walking or weight I/O
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// The capability interface every trainable model implements
pub mod traits;

// Loss / optimizer / metric identities attached at compile time
pub mod compiled;

// The `{timestamp}_wgt_{epoch}.h5` filename codec
pub mod checkpoint_name;

// Typed errors surfaced by the training session and checkpoint store
pub mod error;
