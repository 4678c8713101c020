use sc0_gen::Instruction;

const STEP_LIMIT: usize = 100_000;

/// Executes SC0 code and returns the printed values.
///
/// Jumps transfer control to `index + offset` of the jumping instruction.
/// Execution stops when control reaches one past the last instruction.
pub fn execute(code: &[Instruction]) -> Result<Vec<i32>, String> {
    let mut stack: Vec<i32> = Vec::new();
    let mut vars: Vec<i32> = Vec::new();
    let mut output = Vec::new();
    let mut pc: isize = 0;

    for _ in 0..STEP_LIMIT {
        if pc == code.len() as isize {
            return Ok(output);
        }
        let index = usize::try_from(pc).map_err(|_| format!("jump to negative index {}", pc))?;
        let instruction = *code
            .get(index)
            .ok_or_else(|| format!("jump past the end to index {}", pc))?;

        let mut next = pc + 1;
        match instruction {
            Instruction::Const(n) => stack.push(n),
            Instruction::Load(slot) => {
                let value = *vars.get(slot).ok_or_else(|| format!("load of unset slot {}", slot))?;
                stack.push(value);
            }
            Instruction::Store(slot) => {
                let value = pop(&mut stack)?;
                if vars.len() <= slot {
                    vars.resize(slot + 1, 0);
                }
                vars[slot] = value;
            }
            Instruction::Add => arithmetic(&mut stack, |l, r| Ok(l.wrapping_add(r)))?,
            Instruction::Sub => arithmetic(&mut stack, |l, r| Ok(l.wrapping_sub(r)))?,
            Instruction::Mul => arithmetic(&mut stack, |l, r| Ok(l.wrapping_mul(r)))?,
            Instruction::Div => {
                arithmetic(&mut stack, |l, r| l.checked_div(r).ok_or_else(|| "division by zero".to_string()))?
            }
            Instruction::And => arithmetic(&mut stack, |l, r| Ok(l & r))?,
            Instruction::Or => arithmetic(&mut stack, |l, r| Ok(l | r))?,
            Instruction::Neg => {
                let value = pop(&mut stack)?;
                stack.push(value.wrapping_neg());
            }
            Instruction::Print => output.push(pop(&mut stack)?),
            Instruction::Ifz(offset) => {
                if pop(&mut stack)? == 0 {
                    next = pc + offset;
                }
            }
            Instruction::Goto(offset) => next = pc + offset,
            compare => {
                let right = pop(&mut stack)?;
                let left = pop(&mut stack)?;
                let taken = match compare {
                    Instruction::Ifeq(_) => left == right,
                    Instruction::Ifne(_) => left != right,
                    Instruction::Iflt(_) => left < right,
                    Instruction::Ifle(_) => left <= right,
                    Instruction::Ifgt(_) => left > right,
                    Instruction::Ifge(_) => left >= right,
                    other => return Err(format!("unhandled instruction {}", other)),
                };
                if taken {
                    next = pc + compare.jump_offset().unwrap_or(1);
                }
            }
        }
        pc = next;
    }

    Err(format!("no halt within {} steps", STEP_LIMIT))
}

fn pop(stack: &mut Vec<i32>) -> Result<i32, String> {
    stack.pop().ok_or_else(|| "stack underflow".to_string())
}

fn arithmetic(stack: &mut Vec<i32>, op: impl Fn(i32, i32) -> Result<i32, String>) -> Result<(), String> {
    let right = pop(stack)?;
    let left = pop(stack)?;
    stack.push(op(left, right)?);
    Ok(())
}
