use std::fmt;

/// Index into the machine's variable area.
pub type Slot = usize;

/// Signed jump distance, counted from the jumping instruction itself:
/// an instruction at index `i` with offset `n` transfers control to `i + n`.
pub type Offset = isize;

/// One SC0 stack-machine instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Const(i32),
    Load(Slot),
    Store(Slot),
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Neg,
    Print,
    /// Pops one value, jumps if it is zero.
    Ifz(Offset),
    /// Pops right then left, jumps if `left == right`; likewise for the others.
    Ifeq(Offset),
    Ifne(Offset),
    Iflt(Offset),
    Ifle(Offset),
    Ifgt(Offset),
    Ifge(Offset),
    Goto(Offset),
}

impl Instruction {
    pub fn opcode(&self) -> &'static str {
        match self {
            Self::Const(_) => "CONST",
            Self::Load(_) => "LOAD",
            Self::Store(_) => "STORE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Neg => "NEG",
            Self::Print => "PRINT",
            Self::Ifz(_) => "IFZ",
            Self::Ifeq(_) => "IFEQ",
            Self::Ifne(_) => "IFNE",
            Self::Iflt(_) => "IFLT",
            Self::Ifle(_) => "IFLE",
            Self::Ifgt(_) => "IFGT",
            Self::Ifge(_) => "IFGE",
            Self::Goto(_) => "GOTO",
        }
    }

    /// Relative offset of a jump, `None` for every other instruction.
    pub fn jump_offset(&self) -> Option<Offset> {
        match *self {
            Self::Ifz(n)
            | Self::Ifeq(n)
            | Self::Ifne(n)
            | Self::Iflt(n)
            | Self::Ifle(n)
            | Self::Ifgt(n)
            | Self::Ifge(n)
            | Self::Goto(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let opcode = self.opcode();
        match *self {
            Self::Const(value) => write!(f, "{} {}", opcode, value),
            Self::Load(slot) | Self::Store(slot) => write!(f, "{} {}", opcode, slot),
            _ => match self.jump_offset() {
                Some(offset) => write!(f, "{} {:+}", opcode, offset),
                None => f.write_str(opcode),
            },
        }
    }
}
