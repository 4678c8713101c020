use tracing::{debug, trace};

use crate::error::GenError;
use crate::ir::ast::{self, BinaryOperator, UnaryOperator};
use crate::ir::{Instruction, Offset};

use super::vars::VarTable;

/// SC0 code generator.
///
/// Every node compiles to a self-contained instruction list whose length is
/// known before the parent emits a jump around it, so jump offsets are
/// computed directly from child lengths and nothing is ever patched.
#[derive(Debug, Default)]
pub struct Sc0Backend {
    vars: VarTable,
}

impl Sc0Backend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vars(&self) -> &VarTable {
        &self.vars
    }

    pub fn into_vars(self) -> VarTable {
        self.vars
    }

    pub fn compile_program(&mut self, program: &ast::Program) -> Result<Vec<Instruction>, GenError> {
        debug!(statements = program.statements.len(), "generating SC0 code");

        let mut code = Vec::new();
        for statement in &program.statements {
            code.extend(self.compile_statement(statement)?);
        }

        debug!(
            instructions = code.len(),
            variables = self.vars.len(),
            "generation finished"
        );
        Ok(code)
    }

    pub fn compile_statement(&mut self, statement: &ast::Statement) -> Result<Vec<Instruction>, GenError> {
        match statement {
            ast::Statement::Block(statements) => {
                let mut code = Vec::new();
                for statement in statements {
                    code.extend(self.compile_statement(statement)?);
                }
                Ok(code)
            }
            ast::Statement::Assign { target, value } => self.compile_assign(target, value),
            ast::Statement::If {
                condition,
                then_branch,
                else_branch,
            } => self.compile_if(condition, then_branch, else_branch.as_deref()),
            ast::Statement::While { condition, body } => self.compile_while(condition, body),
            ast::Statement::Print { argument } => {
                // A bare `Print ()` has no value to print.
                let argument = argument.as_ref().ok_or(GenError::MissingPrintArgument)?;
                let mut code = self.compile_expression(argument)?;
                code.push(Instruction::Print);
                Ok(code)
            }
        }
    }

    // Assign x 1
    // Assign y x
    //        CONST 1
    //        STORE 0   # x is slot 0
    //        LOAD 0
    //        STORE 1   # y is slot 1
    fn compile_assign(&mut self, target: &str, value: &ast::Expression) -> Result<Vec<Instruction>, GenError> {
        let mut code = self.compile_expression(value)?;
        let slot = self.vars.slot_or_insert(target);
        code.push(Instruction::Store(slot));
        Ok(code)
    }

    //   cond
    //   IFZ +n1        n1 = |then| + 2 with an else branch, |then| + 1 without
    //   then
    //  [GOTO +n2]      n2 = |else| + 1
    //  [else]
    fn compile_if(
        &mut self,
        condition: &ast::Expression,
        then_branch: &ast::Statement,
        else_branch: Option<&ast::Statement>,
    ) -> Result<Vec<Instruction>, GenError> {
        let mut code = self.compile_expression(condition)?;
        let then_code = self.compile_statement(then_branch)?;

        match else_branch {
            None => {
                code.push(Instruction::Ifz(distance(then_code.len() + 1)));
                code.extend(then_code);
            }
            Some(else_branch) => {
                let else_code = self.compile_statement(else_branch)?;
                code.push(Instruction::Ifz(distance(then_code.len() + 2)));
                code.extend(then_code);
                code.push(Instruction::Goto(distance(else_code.len() + 1)));
                code.extend(else_code);
            }
        }
        Ok(code)
    }

    //   cond
    //   IFZ +n1        n1 = |body| + 2, lands past the GOTO
    //   body
    //   GOTO -n2       n2 = |cond| + 1 + |body|, lands on the first cond instruction
    fn compile_while(&mut self, condition: &ast::Expression, body: &ast::Statement) -> Result<Vec<Instruction>, GenError> {
        let mut code = self.compile_expression(condition)?;
        let body_code = self.compile_statement(body)?;

        code.push(Instruction::Ifz(distance(body_code.len() + 2)));
        code.extend(body_code);

        let back = -distance(code.len());
        trace!(offset = back, "loop back-edge");
        code.push(Instruction::Goto(back));
        Ok(code)
    }

    /// Expressions only read the variable table.
    pub fn compile_expression(&self, expression: &ast::Expression) -> Result<Vec<Instruction>, GenError> {
        match expression {
            ast::Expression::Binop { op, left, right } => self.compile_binop(*op, left, right),
            ast::Expression::Unop { op, operand } => {
                let mut code = self.compile_expression(operand)?;
                match op {
                    UnaryOperator::Neg => code.push(Instruction::Neg),
                    // 0 becomes 1, anything else becomes 0
                    UnaryOperator::Not => code.extend(boolean_idiom(Instruction::Ifz(TRUE_DISTANCE))),
                }
                Ok(code)
            }
            ast::Expression::Id(name) => {
                let slot = self
                    .vars
                    .slot(name)
                    .ok_or_else(|| GenError::UndefinedIdentifier { name: name.clone() })?;
                Ok(vec![Instruction::Load(slot)])
            }
            ast::Expression::IntLit(value) => Ok(vec![Instruction::Const(*value)]),
            ast::Expression::BoolLit(value) => Ok(vec![Instruction::Const(i32::from(*value))]),
            ast::Expression::StrLit(_) => Err(GenError::UnsupportedNode {
                node: format!("StrLit {}", expression),
            }),
        }
    }

    // Both operands are always evaluated: && and || do not short-circuit.
    fn compile_binop(
        &self,
        op: BinaryOperator,
        left: &ast::Expression,
        right: &ast::Expression,
    ) -> Result<Vec<Instruction>, GenError> {
        let mut code = self.compile_expression(left)?;
        code.extend(self.compile_expression(right)?);

        match op {
            BinaryOperator::Add => code.push(Instruction::Add),
            BinaryOperator::Sub => code.push(Instruction::Sub),
            BinaryOperator::Mul => code.push(Instruction::Mul),
            BinaryOperator::Div => code.push(Instruction::Div),
            BinaryOperator::And => code.push(Instruction::And),
            BinaryOperator::Or => code.push(Instruction::Or),
            BinaryOperator::Eq => code.extend(boolean_idiom(Instruction::Ifeq(TRUE_DISTANCE))),
            BinaryOperator::Ne => code.extend(boolean_idiom(Instruction::Ifne(TRUE_DISTANCE))),
            BinaryOperator::Lt => code.extend(boolean_idiom(Instruction::Iflt(TRUE_DISTANCE))),
            BinaryOperator::Le => code.extend(boolean_idiom(Instruction::Ifle(TRUE_DISTANCE))),
            BinaryOperator::Gt => code.extend(boolean_idiom(Instruction::Ifgt(TRUE_DISTANCE))),
            BinaryOperator::Ge => code.extend(boolean_idiom(Instruction::Ifge(TRUE_DISTANCE))),
        }
        Ok(code)
    }
}

/// From the conditional jump to the `CONST 1` of the boolean idiom.
const TRUE_DISTANCE: Offset = 3;

//   <jump> +3
//   CONST 0
//   GOTO +2
//   CONST 1
fn boolean_idiom(jump: Instruction) -> [Instruction; 4] {
    [
        jump,
        Instruction::Const(0),
        Instruction::Goto(2),
        Instruction::Const(1),
    ]
}

// Vec lengths never exceed isize::MAX, so the conversion is exact.
fn distance(len: usize) -> Offset {
    len as Offset
}
