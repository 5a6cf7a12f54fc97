// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong in any specific
// business layer:
//
//   vocab_store.rs — Vocabulary persistence
//                    Loads a token → index JSON file, or builds
//                    one by word frequency from the training
//                    texts and saves it for the next run.
//
//   run_store.rs   — Run configuration persistence
//                    Writes the resolved TrainConfig as JSON
//                    into the output directory.
//
//   metrics.rs     — Epoch reporters
//                    Logs each epoch's mean loss and appends it
//                    to a CSV file for later plotting.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Vocabulary loading, building, and saving
pub mod vocab_store;

/// Training configuration persistence
pub mod run_store;

/// Per-epoch loss reporting (log + CSV)
pub mod metrics;
