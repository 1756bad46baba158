//! Discretisation of daily maximum temperatures into six labelled, equal-width bins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered temperature categories, coldest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemperatureBin {
    Freezing,
    Cold,
    Spring,
    ProbablySpring,
    Perfect,
    HotterThanTheSun,
}

impl TemperatureBin {
    pub const ALL: [TemperatureBin; 6] = [
        TemperatureBin::Freezing,
        TemperatureBin::Cold,
        TemperatureBin::Spring,
        TemperatureBin::ProbablySpring,
        TemperatureBin::Perfect,
        TemperatureBin::HotterThanTheSun,
    ];

    /// Number of bins.
    pub const COUNT: usize = Self::ALL.len();

    pub fn label(&self) -> &'static str {
        match self {
            TemperatureBin::Freezing => "Freezing",
            TemperatureBin::Cold => "Cold",
            TemperatureBin::Spring => "Spring?",
            TemperatureBin::ProbablySpring => "Probably Spring",
            TemperatureBin::Perfect => "Perfect",
            TemperatureBin::HotterThanTheSun => "Hotter than the sun",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|bin| bin.label() == label)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for TemperatureBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Edges of `TemperatureBin::COUNT` equal-width, right-closed bins spanning `[min, max]`.
///
/// The lowest edge is pushed down by 0.1% of the range so that `min` itself
/// falls in the first bin. When `min == max` the range is widened by 0.1% on
/// both sides (or by 0.001 when the value is zero).
pub fn equal_width_edges(min: f64, max: f64) -> [f64; TemperatureBin::COUNT + 1] {
    let bins = TemperatureBin::COUNT;
    let (low, high) = if min == max {
        let pad = if min == 0.0 { 0.001 } else { min.abs() * 0.001 };
        (min - pad, max + pad)
    } else {
        (min, max)
    };

    let step = (high - low) / bins as f64;
    let mut edges = [0.0; TemperatureBin::COUNT + 1];
    for (i, edge) in edges.iter_mut().enumerate() {
        *edge = low + step * i as f64;
    }
    edges[bins] = high;
    if min != max {
        edges[0] -= (max - min) * 0.001;
    }
    edges
}

/// Bin of `value` for the given edges. Values outside `(edges[0], edges[last]]` have no bin.
pub fn assign_bin(value: f64, edges: &[f64; TemperatureBin::COUNT + 1]) -> Option<TemperatureBin> {
    if value.is_nan() || value <= edges[0] || value > edges[TemperatureBin::COUNT] {
        return None;
    }
    // First right edge that is >= value.
    let idx = edges[1..].iter().position(|&right| value <= right)?;
    TemperatureBin::ALL.get(idx).copied()
}
