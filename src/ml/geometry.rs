// ============================================================
// Layer 5 — Sequence Geometry
// ============================================================
// Derives every kernel and pool width of the regressor from the
// input window length W, so the same architecture works for any
// feature-window width.
//
// All convolutions and pools are "valid" with stride 1, so a
// stage with kernel k turns length L into L - k + 1:
//
//   conv1  k = floor(W  / 3)   W  → p1 = W  - floor(W/3)  + 1
//   pool1  k = floor(p1 / 2)   p1 → p2 = p1 - floor(p1/2) + 1
//   conv2  k = floor(p2 / 3)   p2 → p3 = p2 - floor(p2/3) + 1
//   pool2  k = floor(p3 / 2)   p3 → p4 = p3 - floor(p3/2) + 1
//   conv3  k = p4              p4 → 1
//
// Example, W = 30:
//   conv1 k=10  30 → 21
//   pool1 k=10  21 → 12
//   conv2 k=4   12 → 9
//   pool2 k=4    9 → 6
//   conv3 k=6    6 → 1
//
// A zero kernel is rejected with InvalidGeometry; the smallest
// valid window is 3.

use serde::Serialize;
use std::fmt;

use crate::domain::error::RegressorError;

/// Smallest window for which every derived kernel is at least 1.
pub const MIN_WORD_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StageKind {
    Conv { in_channels: usize, out_channels: usize },
    MaxPool,
}

/// One spatial stage: its kernel and the widths on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stage {
    pub name:      &'static str,
    pub kind:      StageKind,
    pub in_width:  usize,
    pub out_width: usize,
    pub kernel:    usize,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            StageKind::Conv { in_channels, out_channels } => {
                format!("conv {in_channels:>3}→{out_channels:<3}")
            }
            StageKind::MaxPool => "maxpool    ".to_string(),
        };
        write!(
            f,
            "{:<6} {} kernel={:<3} width {:>3} → {}",
            self.name, kind, self.kernel, self.in_width, self.out_width
        )
    }
}

/// The four derived widths plus the stage table built from them.
/// Immutable once computed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeometrySpec {
    pub word_size: usize,
    pub p1: usize,
    pub p2: usize,
    pub p3: usize,
    pub p4: usize,
    stages: Vec<Stage>,
}

impl GeometrySpec {
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn stage(&self, name: &str) -> Option<&Stage> {
        self.stages.iter().find(|s| s.name == name)
    }

    /// Spatial width left after the last convolution.
    pub fn output_width(&self) -> usize {
        self.stages.last().map(|s| s.out_width).unwrap_or(0)
    }
}

/// Compute the geometry for window length `word_size`.
pub fn sequence_geometry(word_size: usize) -> Result<GeometrySpec, RegressorError> {
    let mut stages = Vec::with_capacity(5);
    let mut width  = word_size;

    let plan: [(&'static str, StageKind, usize); 4] = [
        ("conv1", StageKind::Conv { in_channels: 1,  out_channels: 64 },  3),
        ("pool1", StageKind::MaxPool,                                     2),
        ("conv2", StageKind::Conv { in_channels: 64, out_channels: 128 }, 3),
        ("pool2", StageKind::MaxPool,                                     2),
    ];

    for (name, kind, divisor) in plan {
        let kernel = width / divisor;
        if kernel == 0 {
            return Err(RegressorError::InvalidGeometry {
                window: word_size,
                stage:  name,
                width:  kernel,
            });
        }
        let out_width = width - kernel + 1;
        stages.push(Stage { name, kind, in_width: width, out_width, kernel });
        width = out_width;
    }

    // conv3 consumes the whole remaining extent
    stages.push(Stage {
        name:      "conv3",
        kind:      StageKind::Conv { in_channels: 128, out_channels: 32 },
        in_width:  width,
        out_width: 1,
        kernel:    width,
    });

    Ok(GeometrySpec {
        word_size,
        p1: stages[0].out_width,
        p2: stages[1].out_width,
        p3: stages[2].out_width,
        p4: stages[3].out_width,
        stages,
    })
}
