//! Intermediate representation for proto to XState code generation.
//!
//! ## Module Structure
//!
//! - `naming`: identifiers derived from descriptor nodes
//! - `gate`: whether a file is generated, and under which name
//! - `types`: output model (imports, events, unions, dispatch tables)
//! - `codegen`: descriptor tree -> output model
//! - `render`: output model -> TypeScript text via the built-in template

mod codegen;
pub mod gate;
pub mod naming;
mod render;
pub mod types;

pub use codegen::{STREAM_MODULE, TRANSPORT_MODULE, codegen_module};
pub use render::Renderer;
