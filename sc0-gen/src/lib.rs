//! Stack code (SC0) generator for the AST0 teaching language.
//!
//! The pipeline is `parser::parse` (AST0 text to [`ir::ast::Program`]) followed
//! by [`backends::generate`] (program to a flat list of [`ir::Instruction`]).

pub mod backends;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

use std::fmt::Write;

pub use backends::{Generated, generate};
pub use error::{CompileError, GenError};
pub use ir::Instruction;

/// Header line of a generated listing.
pub const LISTING_HEADER: &str = "# Stack Code (SC0)";

/// Parses AST0 source and generates its SC0 code.
pub fn compile(source: &str) -> Result<Generated, CompileError> {
    let program = parser::parse(source)?;
    Ok(generate(&program)?)
}

/// Numbered listing: header, blank line, then `<index>. <instruction>` lines.
pub fn render_listing(code: &[Instruction]) -> String {
    let mut out = format!("{}\n\n", LISTING_HEADER);
    for (index, instruction) in code.iter().enumerate() {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{}. {}", index, instruction);
    }
    out
}
