//! Quill: a dynamic scripting language with a single-pass, grammar-driven bytecode
//! compiler.
//!
//! The pipeline is: `syntax` produces the parse events of a unit, `compiler` translates
//! them into `code`, resolving variables into `frame` slots, and `runtime` executes the
//! code.

pub mod code;
pub mod compiler;
pub mod fmt;
pub mod frame;
pub mod runtime;
pub mod symbol;
pub mod syntax;
pub mod term;
#[cfg(test)]
mod tests;
