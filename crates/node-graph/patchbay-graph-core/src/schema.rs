use serde::Serialize;
use thiserror::Error;

use crate::types::{NodeType, PinArity};

/// Declared pin: id, display label, grouping arity and the default spread
/// used when the host supplies no data for the pin.
#[derive(Debug, Clone, Serialize)]
pub struct PinSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub arity: PinArity,
    pub defaults: &'static [f64],
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeSignature {
    pub type_id: NodeType,
    pub name: &'static str,
    pub category: &'static str,
    pub inputs: Vec<PinSpec>,
    pub outputs: Vec<PinSpec>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Registry {
    pub version: &'static str,
    pub nodes: Vec<NodeSignature>,
}

/// Signature validation failure, raised at node-construction time rather
/// than during evaluation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("pin '{pin}' declares {len} default value(s), not a multiple of the {arity:?} group size")]
    DefaultArityMismatch {
        pin: &'static str,
        arity: PinArity,
        len: usize,
    },
}

impl PinSpec {
    /// A pin's defaults must hold whole groups for its arity.
    pub fn validate(&self) -> Result<(), SchemaError> {
        if self.defaults.len() % self.arity.group_size() != 0 {
            return Err(SchemaError::DefaultArityMismatch {
                pin: self.id,
                arity: self.arity,
                len: self.defaults.len(),
            });
        }
        Ok(())
    }
}

impl NodeSignature {
    pub fn validate(&self) -> Result<(), SchemaError> {
        for pin in self.inputs.iter().chain(self.outputs.iter()) {
            pin.validate()?;
        }
        Ok(())
    }
}

// Helpers
fn scalar(id: &'static str, label: &'static str, defaults: &'static [f64]) -> PinSpec {
    PinSpec {
        id,
        label,
        arity: PinArity::Scalar,
        defaults,
    }
}
fn vector3(id: &'static str, label: &'static str, defaults: &'static [f64]) -> PinSpec {
    PinSpec {
        id,
        label,
        arity: PinArity::Vector3,
        defaults,
    }
}

/// Static signature for `kind`: pins, labels, arities and defaults.
pub fn signature(kind: NodeType) -> NodeSignature {
    use NodeType::*;
    match kind {
        Polar3d => NodeSignature {
            type_id: kind,
            name: "Polar (3d)",
            category: "3d",
            inputs: vec![
                scalar("x", "X", &[0.0]),
                scalar("y", "Y", &[0.0]),
                scalar("z", "Z", &[-1.0]),
            ],
            outputs: vec![
                scalar("pitch", "Pitch", &[0.0]),
                scalar("yaw", "Yaw", &[0.0]),
                scalar("length", "Length", &[1.0]),
            ],
        },
        Cartesian3d => NodeSignature {
            type_id: kind,
            name: "Cartesian (3d)",
            category: "3d",
            inputs: vec![
                scalar("pitch", "Pitch", &[0.0]),
                scalar("yaw", "Yaw", &[0.0]),
                scalar("length", "Length", &[1.0]),
            ],
            outputs: vec![
                scalar("x", "X", &[0.0]),
                scalar("y", "Y", &[0.0]),
                scalar("z", "Z", &[1.0]),
            ],
        },
        Normalize3d => NodeSignature {
            type_id: kind,
            name: "Normalize (3d)",
            category: "3d",
            inputs: vec![
                scalar("x", "X", &[1.0]),
                scalar("y", "Y", &[0.0]),
                scalar("z", "Z", &[0.0]),
            ],
            outputs: vec![
                scalar("normalized_x", "Normalized X", &[1.0]),
                scalar("normalized_y", "Normalized Y", &[0.0]),
                scalar("normalized_z", "Normalized Z", &[0.0]),
                scalar("input_length", "Input Length", &[0.0]),
            ],
        },
        Normalize3dVector => NodeSignature {
            type_id: kind,
            name: "Normalize (3d Vector)",
            category: "3d",
            inputs: vec![vector3("xyz", "XYZ", &[])],
            outputs: vec![
                vector3("normalized_xyz", "Normalized XYZ", &[]),
                scalar("input_length", "Input Length", &[0.0]),
            ],
        },
        CrossProduct3d => NodeSignature {
            type_id: kind,
            name: "Multiply (3d Cross)",
            category: "3d",
            inputs: vec![
                vector3("a", "Input 1 XYZ", &[]),
                vector3("b", "Input 2 XYZ", &[]),
            ],
            outputs: vec![vector3("out", "Output XYZ", &[])],
        },
        DotProduct3d => NodeSignature {
            type_id: kind,
            name: "Multiply (3d Dot)",
            category: "3d",
            inputs: vec![
                vector3("a", "Input 1 XYZ", &[]),
                vector3("b", "Input 2 XYZ", &[]),
            ],
            outputs: vec![scalar("out", "Output", &[0.0])],
        },
    }
}

pub fn registry() -> Registry {
    use NodeType::*;
    Registry {
        version: "1",
        nodes: [
            Polar3d,
            Cartesian3d,
            Normalize3d,
            Normalize3dVector,
            CrossProduct3d,
            DotProduct3d,
        ]
        .into_iter()
        .map(signature)
        .collect(),
    }
}

/// Export the registry as JSON for authoring tools.
pub fn registry_json() -> Result<serde_json::Value, serde_json::Error> {
    serde_json::to_value(registry())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_signature_validates() {
        for node in registry().nodes {
            node.validate()
                .unwrap_or_else(|err| panic!("signature for {:?}: {err}", node.type_id));
        }
    }

    #[test]
    fn pin_ids_are_unique_per_side() {
        for node in registry().nodes {
            for pins in [&node.inputs, &node.outputs] {
                let mut ids: Vec<_> = pins.iter().map(|pin| pin.id).collect();
                ids.sort_unstable();
                ids.dedup();
                assert_eq!(ids.len(), pins.len(), "duplicate pin id on {:?}", node.type_id);
            }
        }
    }

    #[test]
    fn it_should_reject_partial_group_defaults() {
        let bad = PinSpec {
            id: "xyz",
            label: "XYZ",
            arity: PinArity::Vector3,
            defaults: &[1.0, 2.0],
        };
        assert_eq!(
            bad.validate(),
            Err(SchemaError::DefaultArityMismatch {
                pin: "xyz",
                arity: PinArity::Vector3,
                len: 2,
            })
        );
    }

    #[test]
    fn registry_exports_all_nodes_as_json() {
        let json = registry_json().expect("registry serializes");
        let nodes = json
            .get("nodes")
            .and_then(|n| n.as_array())
            .expect("nodes array present");
        assert_eq!(nodes.len(), 6);
        assert_eq!(nodes[0]["name"], "Polar (3d)");
        assert_eq!(nodes[0]["inputs"][2]["defaults"][0], -1.0);
    }
}
