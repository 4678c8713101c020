pub mod ast;
pub mod instruction;

pub use instruction::{Instruction, Offset, Slot};
