pub mod sc0;
pub mod vars;

use crate::error::GenError;
use crate::ir::Instruction;
use crate::ir::ast;

pub use sc0::Sc0Backend;
pub use vars::VarTable;

/// Result of one generation run: the code and the slots it was given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub code: Vec<Instruction>,
    pub vars: VarTable,
}

/// Translates `program` into SC0 code with a fresh variable table.
pub fn generate(program: &ast::Program) -> Result<Generated, GenError> {
    let mut backend = Sc0Backend::new();
    let code = backend.compile_program(program)?;
    Ok(Generated {
        code,
        vars: backend.into_vars(),
    })
}
