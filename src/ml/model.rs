use burn::{
    nn::{
        conv::{Conv1d, Conv1dConfig},
        pool::{MaxPool1d, MaxPool1dConfig},
        BatchNorm, BatchNormConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};

use crate::domain::error::RegressorError;
use crate::ml::geometry::{sequence_geometry, Stage, StageKind};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct RegressorConfig {
    pub word_size: usize,
}

impl RegressorConfig {
    /// Build the network; kernel widths come from the geometry of
    /// `word_size`, so this fails with InvalidGeometry for windows
    /// that are too short.
    pub fn init<B: Backend>(&self, device: &B::Device) -> Result<Regressor<B>, RegressorError> {
        let geometry = sequence_geometry(self.word_size)?;
        let [conv1, pool1, conv2, pool2, conv3] = match geometry.stages() {
            [a, b, c, d, e] => [*a, *b, *c, *d, *e],
            other => {
                return Err(RegressorError::shape("5 geometry stages", format!("{}", other.len())))
            }
        };

        Ok(Regressor {
            conv1: build_conv(&conv1, device),
            pool1: build_pool(&pool1),
            norm1: BatchNormConfig::new(64).init(device),
            conv2: build_conv(&conv2, device),
            pool2: build_pool(&pool2),
            norm2: BatchNormConfig::new(128).init(device),
            conv3: build_conv(&conv3, device),
            dense1: LinearConfig::new(32, 64).init(device),
            dense2: LinearConfig::new(64, 1).init(device),
            rescale: LinearConfig::new(1, 1).init(device),
            word_size: self.word_size,
        })
    }
}

fn build_conv<B: Backend>(stage: &Stage, device: &B::Device) -> Conv1d<B> {
    let (channels_in, channels_out) = match stage.kind {
        StageKind::Conv { in_channels, out_channels } => (in_channels, out_channels),
        StageKind::MaxPool => (1, 1),
    };
    Conv1dConfig::new(channels_in, channels_out, stage.kernel).init(device)
}

fn build_pool(stage: &Stage) -> MaxPool1d {
    MaxPool1dConfig::new(stage.kernel).with_stride(1).init()
}

/// Three conv/pool/batch-norm stages, two dense layers, a sigmoid
/// squash and a trailing 1→1 affine rescale.
#[derive(Module, Debug)]
pub struct Regressor<B: Backend> {
    pub conv1:     Conv1d<B>,
    pub pool1:     MaxPool1d,
    pub norm1:     BatchNorm<B, 1>,
    pub conv2:     Conv1d<B>,
    pub pool2:     MaxPool1d,
    pub norm2:     BatchNorm<B, 1>,
    pub conv3:     Conv1d<B>,
    pub dense1:    Linear<B>,
    pub dense2:    Linear<B>,
    pub rescale:   Linear<B>,
    pub word_size: usize,
}

impl<B: Backend> Regressor<B> {
    /// x: [batch, 1, word_size] → [batch, 1]
    pub fn forward(&self, x: Tensor<B, 3>) -> Tensor<B, 2> {
        let x = self.conv1.forward(x);              // [N, 64, p1]
        let x = self.pool1.forward(x);              // [N, 64, p2]
        let x = relu(self.norm1.forward(x));

        let x = self.conv2.forward(x);              // [N, 128, p3]
        let x = self.pool2.forward(x);              // [N, 128, p4]
        let x = relu(self.norm2.forward(x));

        let x = relu(self.conv3.forward(x));        // [N, 32, 1]
        let x: Tensor<B, 2> = x.flatten(1, 2);      // [N, 32]

        let x = relu(self.dense1.forward(x));       // [N, 64]
        let x = sigmoid(self.dense2.forward(x));    // [N, 1]
        self.rescale.forward(x)
    }

    /// windows: [batch, word_size] → [batch, 1], checking the width.
    pub fn predict(&self, windows: Tensor<B, 2>) -> Result<Tensor<B, 2>, RegressorError> {
        let [batch, width] = windows.dims();
        if width != self.word_size {
            return Err(RegressorError::shape(
                format!("[{batch}, {}]", self.word_size),
                format!("[{batch}, {width}]"),
            ));
        }
        Ok(self.forward(windows.reshape([batch, 1, width])))
    }

    pub fn word_size(&self) -> usize {
        self.word_size
    }
}
