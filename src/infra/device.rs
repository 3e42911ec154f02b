// ============================================================
// Layer 6 — Execution Context
// ============================================================
// The device handle is chosen once, at startup, and then passed
// explicitly into every constructor that creates tensors. There
// is no global device.
//
//   BackendChoice::Wgpu   → Autodiff<Wgpu>,    WgpuDevice::default()
//   BackendChoice::Ndarray → Autodiff<NdArray>, NdArrayDevice::Cpu
//
// Device discovery itself belongs to wgpu; this module only
// records which backend the caller picked.

use burn::{
    backend::ndarray::NdArrayDevice,
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which compute backend a run should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendChoice {
    /// GPU / accelerator through wgpu
    Wgpu,
    /// General-purpose processor through ndarray
    Ndarray,
}

impl BackendChoice {
    pub fn label(&self) -> &'static str {
        match self {
            BackendChoice::Wgpu    => "accelerator (wgpu)",
            BackendChoice::Ndarray => "general-purpose processor (ndarray)",
        }
    }
}

/// Device handle threaded through model, batcher and trainer.
#[derive(Debug, Clone)]
pub struct ExecutionContext<B: Backend> {
    device: B::Device,
}

impl<B: Backend> ExecutionContext<B> {
    pub fn new(device: B::Device) -> Self {
        tracing::info!("Current computing device: {:?}", device);
        Self { device }
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }
}

impl<B: AutodiffBackend> ExecutionContext<B> {
    /// Same device, viewed from the non-autodiff backend used for
    /// evaluation.
    pub fn inner(&self) -> ExecutionContext<B::InnerBackend> {
        ExecutionContext { device: self.device.clone() }
    }
}

impl<B> ExecutionContext<B>
where
    B: Backend<Device = NdArrayDevice>,
{
    pub fn cpu() -> Self {
        Self { device: NdArrayDevice::Cpu }
    }
}
