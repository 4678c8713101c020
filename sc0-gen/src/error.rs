use thiserror::Error;

/// Exit code for unreadable or malformed input.
pub const EXIT_INPUT: u8 = 1;
/// Exit code for a well-formed program the generator rejects.
pub const EXIT_GENERATE: u8 = 3;

/// Failures of a single generation run. No partial code accompanies them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("Unsupported node: {node}")]
    UnsupportedNode { node: String },

    #[error("Id is not defined: {name}")]
    UndefinedIdentifier { name: String },

    #[error("Print statement has no argument")]
    MissingPrintArgument,
}

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("Syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Code generation failed: {0}")]
    Generate(#[from] GenError),
}

impl CompileError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Generate(_) => EXIT_GENERATE,
            Self::SyntaxError { .. } | Self::LexerError { .. } | Self::IoError { .. } => EXIT_INPUT,
        }
    }
}
