// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types and traits that describe the classifier's
// world: records read from disk, the vocabulary, encoded
// examples, per-epoch summaries and the error taxonomy.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O or network calls
//   - Only plain Rust structs, enums, and traits
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Labelled text records and their encoded form
pub mod record;

// Token → index mapping with reserved PAD / UNK slots
pub mod vocabulary;

// Typed errors for data, model and configuration failures
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;
