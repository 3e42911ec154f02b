// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap, picks the backend once, and hands
// off to Layer 2. Printing the report happens here and nowhere
// else.

pub mod commands;

use anyhow::Result;
use burn::backend::{
    ndarray::NdArrayDevice,
    wgpu::WgpuDevice,
    Autodiff, NdArray, Wgpu,
};
use clap::Parser;
use commands::{Commands, GeometryArgs, RunArgs};

use crate::application::run_use_case::{RunConfig, RunUseCase};
use crate::infra::device::{BackendChoice, ExecutionContext};
use crate::ml::geometry::sequence_geometry;

#[derive(Parser, Debug)]
#[command(
    name = "word-freq-regressor",
    version = "0.1.0",
    about = "Train a 1-D convolutional regressor on character-code windows of words."
)]
pub struct Cli {
    /// The subcommand to run (run or geometry)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the handler for the parsed subcommand.
    pub fn run(self) -> Result<()> {
        match &self.command {
            Commands::Run(args)      => self.run_training(args),
            Commands::Geometry(args) => self.run_geometry(args),
        }
    }

    /// Handles the `run` subcommand.
    /// Builds the execution context for the chosen backend, runs the
    /// use case on it and prints the report.
    fn run_training(&self, args: &RunArgs) -> Result<()> {
        tracing::info!("Computing backend: {}", args.backend.label());
        let use_case = RunUseCase::new(RunConfig::from(args));

        let report = match args.backend {
            BackendChoice::Wgpu => {
                let ctx = ExecutionContext::<Autodiff<Wgpu>>::new(WgpuDevice::default());
                use_case.execute(&ctx)?
            }
            BackendChoice::Ndarray => {
                let ctx = ExecutionContext::<Autodiff<NdArray>>::new(NdArrayDevice::Cpu);
                use_case.execute(&ctx)?
            }
        };

        println!("{}", report.render());
        Ok(())
    }

    /// Handles the `geometry` subcommand.
    /// Prints p1..p4 and one line per stage, or the InvalidGeometry error.
    fn run_geometry(&self, args: &GeometryArgs) -> Result<()> {
        let geometry = sequence_geometry(args.word_size)?;
        println!(
            "word_size={} p1={} p2={} p3={} p4={}",
            geometry.word_size, geometry.p1, geometry.p2, geometry.p3, geometry.p4
        );
        for stage in geometry.stages() {
            println!("  {stage}");
        }
        Ok(())
    }
}
