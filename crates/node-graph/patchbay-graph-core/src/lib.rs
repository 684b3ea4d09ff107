pub mod eval;
pub mod schema;
pub mod types;

pub use eval::{evaluate, EvalError};
pub use schema::{registry, registry_json, signature, NodeSignature, PinSpec, Registry, SchemaError};
pub use types::{NodeType, PinArity, PinValues};
