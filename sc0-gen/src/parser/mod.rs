pub mod lexer;
pub mod parser;

use tracing::debug;

use crate::error::CompileError;
use crate::ir::ast;

/// Reads the AST0 text form into a program tree.
pub fn parse(source: &str) -> Result<ast::Program, CompileError> {
    let tokens = lexer::tokenize(source)?;
    debug!(tokens = tokens.len(), "tokenized AST0 source");
    let program = parser::parse_tokens(tokens)?;
    debug!(statements = program.statements.len(), "parsed AST0 program");
    Ok(program)
}
