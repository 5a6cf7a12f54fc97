// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model and optimiser code lives here. The data
// layer only touches Burn's Dataset/Batcher traits.
//
// What's in this layer:
//
//   model.rs     — The BiLSTM classifier
//                  • Token embeddings
//                  • Stacked bidirectional LSTM encoder
//                  • Dropout between layers and on the output
//                  • Last-token (or last-position) pooling
//                  • Linear head producing one logit
//
//   trainer.rs   — The training loop
//                  Forward pass, BCE-with-logits loss,
//                  backward pass, Adam step, per-epoch report
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)
//            Hochreiter & Schmidhuber (1997) LSTM

/// Bidirectional LSTM binary classifier
pub mod model;

/// Mini-batch training loop
pub mod trainer;

/// NdArray draws every random tensor from one process-wide generator.
/// Tests that initialise parameters or run dropout hold this lock so a
/// seeded draw in one test is never interleaved with another test's.
#[cfg(test)]
pub(crate) fn backend_rng_guard() -> std::sync::MutexGuard<'static, ()> {
    static BACKEND_RNG: std::sync::Mutex<()> = std::sync::Mutex::new(());
    BACKEND_RNG.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
