// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Mini-batch gradient descent with Burn's DataLoader and Adam.
//
// Per batch:
//   forward → BCE-with-logits loss → backward → optimiser step
//
// Burn builds a fresh gradient set on every `backward()` call,
// so nothing carries over between batches. `optim.step` takes
// the model by value and returns the updated one: the next
// forward pass can only ever see a fully applied update.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use std::sync::Arc;

use anyhow::{bail, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, wgpu::WgpuDevice, Autodiff, NdArray, Wgpu},
    data::dataloader::{DataLoader, DataLoaderBuilder},
    nn::loss::{BinaryCrossEntropyLoss, BinaryCrossEntropyLossConfig},
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::application::train_use_case::{ComputeDevice, TrainConfig};
use crate::data::{
    batcher::{ClassificationBatch, ClassificationBatcher},
    dataset::TextDataset,
};
use crate::domain::traits::{EpochReporter, EpochSummary};
use crate::ml::model::{BiLstmClassifier, ClassifierConfig};

type GpuBackend = Autodiff<Wgpu>;
type CpuBackend = Autodiff<NdArray>;

pub type BatchLoader<B> = Arc<dyn DataLoader<B, ClassificationBatch<B>>>;

/// Train with the concrete stack described by `cfg`.
/// Returns the per-epoch summaries in order.
pub fn run_training(
    cfg:      &TrainConfig,
    dataset:  TextDataset,
    reporter: &mut dyn EpochReporter,
) -> Result<Vec<EpochSummary>> {
    match cfg.device {
        ComputeDevice::Wgpu => {
            let device = WgpuDevice::default();
            tracing::info!("Using WGPU device: {:?}", device);
            train_on::<GpuBackend>(cfg, dataset, reporter, device)
        }
        ComputeDevice::Cpu => {
            let device = NdArrayDevice::default();
            tracing::info!("Using CPU (ndarray) device");
            train_on::<CpuBackend>(cfg, dataset, reporter, device)
        }
    }
}

fn train_on<B: AutodiffBackend>(
    cfg:      &TrainConfig,
    dataset:  TextDataset,
    reporter: &mut dyn EpochReporter,
    device:   B::Device,
) -> Result<Vec<EpochSummary>> {
    // One seed drives both parameter init and the batch shuffle
    let model: BiLstmClassifier<B> = seeded_model(&model_config(cfg), &device, cfg.seed);
    tracing::info!(
        "Model ready: {} bidirectional layers, hidden_dim={}, embedding_dim={}",
        cfg.num_layers, cfg.hidden_dim, cfg.embedding_dim
    );

    let mut optim = AdamConfig::new().with_epsilon(1e-8).init();
    let loss_fn   = BinaryCrossEntropyLossConfig::new().with_logits(true).init(&device);
    let loader    = build_loader::<B>(dataset, cfg.batch_size, cfg.num_workers, cfg.seed);

    let (_model, summaries) = train_epochs(
        model,
        loader.as_ref(),
        &loss_fn,
        &mut optim,
        cfg.learning_rate,
        cfg.num_epochs,
        reporter,
    )?;

    tracing::info!("Training complete!");
    Ok(summaries)
}

pub fn model_config(cfg: &TrainConfig) -> ClassifierConfig {
    ClassifierConfig::new(
        cfg.vocab_size,
        cfg.embedding_dim,
        cfg.hidden_dim,
        cfg.num_layers,
        cfg.max_seq_length,
    )
    .with_num_classes(cfg.num_classes)
    .with_dropout(cfg.dropout)
    .with_pooling(cfg.pooling)
}

/// Seed the backend and build a model whose parameters are all drawn now.
///
/// Burn initialises parameters lazily, on first use. A throwaway forward
/// pass pulls every parameter out of the seeded stream before anything
/// else can draw from the backend generator.
pub fn seeded_model<B: Backend>(
    config: &ClassifierConfig,
    device: &B::Device,
    seed:   u64,
) -> BiLstmClassifier<B> {
    B::seed(device, seed);
    let model: BiLstmClassifier<B> = config.init(device);

    let tokens  = Tensor::<B, 2, Int>::zeros([1, config.max_seq_length], device);
    let lengths = Tensor::<B, 1, Int>::zeros([1], device);
    let _ = model.forward(tokens, lengths);

    model
}

/// Shuffled mini-batches; the same seed yields the same order on every run.
pub fn build_loader<B: Backend>(
    dataset:     TextDataset,
    batch_size:  usize,
    num_workers: usize,
    seed:        u64,
) -> BatchLoader<B> {
    DataLoaderBuilder::new(ClassificationBatcher::new())
        .batch_size(batch_size)
        .shuffle(seed)
        .num_workers(num_workers)
        .build(dataset)
}

/// Run `num_epochs` full passes over `loader`, stepping the optimiser
/// after every batch and reporting each epoch's mean loss.
pub fn train_epochs<B, O>(
    mut model:     BiLstmClassifier<B>,
    loader:        &dyn DataLoader<B, ClassificationBatch<B>>,
    loss_fn:       &BinaryCrossEntropyLoss<B>,
    optim:         &mut O,
    learning_rate: f64,
    num_epochs:    usize,
    reporter:      &mut dyn EpochReporter,
) -> Result<(BiLstmClassifier<B>, Vec<EpochSummary>)>
where
    B: AutodiffBackend,
    O: Optimizer<BiLstmClassifier<B>, B>,
{
    let mut summaries = Vec::with_capacity(num_epochs);

    for epoch in 1..=num_epochs {
        let mut loss_sum = 0.0f64;
        let mut batches  = 0usize;

        for batch in loader.iter() {
            let loss = model.forward_loss(batch.tokens, batch.lengths, batch.targets, loss_fn)?;

            loss_sum += loss.clone().into_scalar().elem::<f64>();
            batches  += 1;

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(learning_rate, model, grads);
        }

        if batches == 0 {
            bail!("epoch {epoch} produced no mini-batches");
        }

        let summary = EpochSummary {
            epoch,
            num_epochs,
            mean_loss: loss_sum / batches as f64,
            batches,
        };
        reporter.report(&summary)?;
        summaries.push(summary);
    }

    Ok((model, summaries))
}
