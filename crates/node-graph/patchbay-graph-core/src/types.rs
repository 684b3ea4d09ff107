use hashbrown::HashMap;
use patchbay_spread_core::Spread;
use serde::{Deserialize, Serialize};

/// The node kinds implemented by this evaluation core.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    // Polar <-> cartesian conversion, three scalar pins per side
    Polar3d,
    Cartesian3d,

    // Normalization, scalar-component and vector-grouped flavours
    Normalize3d,
    Normalize3dVector,

    // Vector-grouped products
    CrossProduct3d,
    DotProduct3d,
}

/// Number of consecutive scalars forming one logical group on a pin.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PinArity {
    /// Plain scalar pin.
    Scalar,
    /// Three consecutive scalars form one 3D vector.
    Vector3,
}

impl PinArity {
    /// Flat scalars consumed per logical group.
    pub fn group_size(self) -> usize {
        match self {
            PinArity::Scalar => 1,
            PinArity::Vector3 => 3,
        }
    }
}

/// Named spreads keyed by pin id, as exchanged with the host per evaluation.
pub type PinValues = HashMap<String, Spread>;
