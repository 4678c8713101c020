use std::fmt;

/// Root of the tree: statements in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// { s1 s2 ... } - groups statements, no scope of its own
    Block(Vec<Statement>),
    /// Assign x (Binop + x 1)
    Assign {
        target: String,
        value: Expression,
    },
    /// If cond s1 [Else s2]
    If {
        condition: Expression,
        then_branch: Box<Statement>,
        else_branch: Option<Box<Statement>>,
    },
    /// While cond s
    While {
        condition: Expression,
        body: Box<Statement>,
    },
    /// Print e, or Print () with no argument
    Print { argument: Option<Expression> },
}

impl Statement {
    pub fn assign(target: impl Into<String>, value: Expression) -> Self {
        Self::Assign {
            target: target.into(),
            value,
        }
    }

    pub fn if_then(condition: Expression, then_branch: Statement) -> Self {
        Self::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: None,
        }
    }

    pub fn if_else(condition: Expression, then_branch: Statement, else_branch: Statement) -> Self {
        Self::If {
            condition,
            then_branch: Box::new(then_branch),
            else_branch: Some(Box::new(else_branch)),
        }
    }

    pub fn while_loop(condition: Expression, body: Statement) -> Self {
        Self::While {
            condition,
            body: Box::new(body),
        }
    }

    pub fn print(argument: Expression) -> Self {
        Self::Print {
            argument: Some(argument),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// (Binop + e1 e2); e1 is evaluated first
    Binop {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// (Unop ! e)
    Unop {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Id(String),
    IntLit(i32),
    BoolLit(bool),
    /// Parsed but not supported by any backend.
    StrLit(String),
}

impl Expression {
    pub fn binop(op: BinaryOperator, left: Expression, right: Expression) -> Self {
        Self::Binop {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unop(op: UnaryOperator, operand: Expression) -> Self {
        Self::Unop {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn id(name: impl Into<String>) -> Self {
        Self::Id(name.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    And, // &&
    Or,  // ||
    Eq,  // ==
    Ne,  // !=
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
}

impl BinaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::And => "&&",
            Self::Or => "||",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }

    /// Relational operators produce a 0/1 value through a conditional jump.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            Self::Eq | Self::Ne | Self::Lt | Self::Le | Self::Gt | Self::Ge
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg, // -
    Not, // !
}

impl UnaryOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Writes the expression back in its AST0 text form.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binop { op, left, right } => write!(f, "(Binop {} {} {})", op, left, right),
            Self::Unop { op, operand } => write!(f, "(Unop {} {})", op, operand),
            Self::Id(name) => f.write_str(name),
            Self::IntLit(value) => write!(f, "{}", value),
            Self::BoolLit(value) => write!(f, "{}", value),
            Self::StrLit(value) => write!(f, "\"{}\"", value),
        }
    }
}
