//! Per-node evaluation: input resolution, width computation and the
//! write-then-finalize protocol on output spreads.

use std::borrow::Cow;

use hashbrown::HashMap;
use patchbay_spread_core::Spread;
use thiserror::Error;

use crate::schema::{signature, NodeSignature};
use crate::types::{NodeType, PinValues};

use super::numeric::{cartesian_to_polar, cross3, dot3, normalize3, polar_to_cartesian};
use super::width::{group_count, max_input_len, read_scalar, read_vec3, GroupRounding};

/// Declared input pins resolved to concrete spreads for one evaluation.
type ResolvedInputs<'a> = HashMap<&'static str, Cow<'a, Spread>>;

/// Caller contract violations detected during evaluation.
///
/// Degenerate numeric inputs (empty spreads, zero vectors) are not errors;
/// they take the documented fallbacks instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The host wired a spread to a pin id the node does not declare.
    #[error("node {node:?} has no input pin '{pin}'")]
    UnknownInputPin { node: NodeType, pin: String },
}

/// Evaluate one node for the current frame.
///
/// Each declared input pin resolves to the host-supplied spread when present
/// (even if empty), otherwise to the signature default. Output spreads are
/// taken from `outputs` (created when absent), overwritten at flat offsets
/// and finalized to the evaluation width before being put back.
pub fn evaluate(
    kind: NodeType,
    inputs: &PinValues,
    outputs: &mut PinValues,
) -> Result<(), EvalError> {
    let sig = signature(kind);
    let resolved = resolve_inputs(&sig, inputs)?;
    log::trace!(
        "evaluating {kind:?} with {} supplied input pin(s)",
        inputs.len()
    );

    match kind {
        NodeType::Polar3d => eval_polar3d(&resolved, outputs),
        NodeType::Cartesian3d => eval_cartesian3d(&resolved, outputs),
        NodeType::Normalize3d => eval_normalize3d(&resolved, outputs),
        NodeType::Normalize3dVector => eval_normalize3d_vector(&resolved, outputs),
        NodeType::CrossProduct3d => eval_cross_product3d(&resolved, outputs),
        NodeType::DotProduct3d => eval_dot_product3d(&resolved, outputs),
    }
    Ok(())
}

fn resolve_inputs<'a>(
    sig: &NodeSignature,
    inputs: &'a PinValues,
) -> Result<ResolvedInputs<'a>, EvalError> {
    for key in inputs.keys() {
        if !sig.inputs.iter().any(|pin| pin.id == key.as_str()) {
            return Err(EvalError::UnknownInputPin {
                node: sig.type_id,
                pin: key.clone(),
            });
        }
    }
    Ok(sig
        .inputs
        .iter()
        .map(|pin| {
            let spread = match inputs.get(pin.id) {
                Some(spread) => Cow::Borrowed(spread),
                None => Cow::Owned(Spread::from_slice(pin.defaults)),
            };
            (pin.id, spread)
        })
        .collect())
}

/// Fetch a resolved pin. Resolution inserts every declared pin, so a miss
/// is a bug in the kernel's pin ids.
fn pin<'a>(ins: &'a ResolvedInputs<'_>, id: &str) -> &'a Spread {
    match ins.get(id) {
        Some(spread) => spread.as_ref(),
        None => unreachable!("pin '{id}' not resolved"),
    }
}

/// Take an output spread out of the map, reusing the caller's buffer.
fn take_output(outputs: &mut PinValues, id: &str) -> Spread {
    outputs.remove(id).unwrap_or_default()
}

fn eval_polar3d(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let (x, y, z) = (pin(ins, "x"), pin(ins, "y"), pin(ins, "z"));
    let width = max_input_len([x, y, z]);

    let mut pitch_out = take_output(outputs, "pitch");
    let mut yaw_out = take_output(outputs, "yaw");
    let mut length_out = take_output(outputs, "length");

    for i in 0..width {
        let (pitch, yaw, length) =
            cartesian_to_polar(read_scalar(x, i), read_scalar(y, i), read_scalar(z, i));
        pitch_out.set(i, pitch);
        yaw_out.set(i, yaw);
        length_out.set(i, length);
    }

    pitch_out.set_length(width);
    yaw_out.set_length(width);
    length_out.set_length(width);

    outputs.insert("pitch".to_string(), pitch_out);
    outputs.insert("yaw".to_string(), yaw_out);
    outputs.insert("length".to_string(), length_out);
}

fn eval_cartesian3d(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let (pitch, yaw, length) = (pin(ins, "pitch"), pin(ins, "yaw"), pin(ins, "length"));
    let width = max_input_len([pitch, yaw, length]);

    let mut x_out = take_output(outputs, "x");
    let mut y_out = take_output(outputs, "y");
    let mut z_out = take_output(outputs, "z");

    for i in 0..width {
        let (x, y, z) = polar_to_cartesian(
            read_scalar(pitch, i),
            read_scalar(yaw, i),
            read_scalar(length, i),
        );
        x_out.set(i, x);
        y_out.set(i, y);
        z_out.set(i, z);
    }

    x_out.set_length(width);
    y_out.set_length(width);
    z_out.set_length(width);

    outputs.insert("x".to_string(), x_out);
    outputs.insert("y".to_string(), y_out);
    outputs.insert("z".to_string(), z_out);
}

fn eval_normalize3d(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let (x, y, z) = (pin(ins, "x"), pin(ins, "y"), pin(ins, "z"));
    let width = max_input_len([x, y, z]);

    let mut nx_out = take_output(outputs, "normalized_x");
    let mut ny_out = take_output(outputs, "normalized_y");
    let mut nz_out = take_output(outputs, "normalized_z");
    let mut length_out = take_output(outputs, "input_length");

    for i in 0..width {
        let (unit, length) =
            normalize3([read_scalar(x, i), read_scalar(y, i), read_scalar(z, i)]);
        nx_out.set(i, unit[0]);
        ny_out.set(i, unit[1]);
        nz_out.set(i, unit[2]);
        length_out.set(i, length);
    }

    nx_out.set_length(width);
    ny_out.set_length(width);
    nz_out.set_length(width);
    length_out.set_length(width);

    outputs.insert("normalized_x".to_string(), nx_out);
    outputs.insert("normalized_y".to_string(), ny_out);
    outputs.insert("normalized_z".to_string(), nz_out);
    outputs.insert("input_length".to_string(), length_out);
}

fn eval_normalize3d_vector(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let xyz = pin(ins, "xyz");
    let groups = group_count(max_input_len([xyz]), 3, GroupRounding::Ceil);

    let mut xyz_out = take_output(outputs, "normalized_xyz");
    let mut length_out = take_output(outputs, "input_length");

    for g in 0..groups {
        let (unit, length) = normalize3(read_vec3(xyz, g));
        xyz_out.set(g * 3, unit[0]);
        xyz_out.set(g * 3 + 1, unit[1]);
        xyz_out.set(g * 3 + 2, unit[2]);
        length_out.set(g, length);
    }

    // Vector outputs are restored to whole groups even when the trailing
    // group was only partially defined by the input.
    xyz_out.set_length(groups * 3);
    length_out.set_length(groups);

    outputs.insert("normalized_xyz".to_string(), xyz_out);
    outputs.insert("input_length".to_string(), length_out);
}

fn eval_cross_product3d(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let (a, b) = (pin(ins, "a"), pin(ins, "b"));
    let groups = group_count(max_input_len([a, b]), 3, GroupRounding::Ceil);

    let mut out = take_output(outputs, "out");

    for g in 0..groups {
        let v = cross3(read_vec3(a, g), read_vec3(b, g));
        out.set(g * 3, v[0]);
        out.set(g * 3 + 1, v[1]);
        out.set(g * 3 + 2, v[2]);
    }

    out.set_length(groups * 3);
    outputs.insert("out".to_string(), out);
}

fn eval_dot_product3d(ins: &ResolvedInputs<'_>, outputs: &mut PinValues) {
    let (a, b) = (pin(ins, "a"), pin(ins, "b"));
    let groups = group_count(max_input_len([a, b]), 3, GroupRounding::Ceil);

    let mut out = take_output(outputs, "out");

    for g in 0..groups {
        out.set(g, dot3(read_vec3(a, g), read_vec3(b, g)));
    }

    out.set_length(groups);
    outputs.insert("out".to_string(), out);
}
