use crate::error::CompileError;
use crate::ir::ast::{self, BinaryOperator, UnaryOperator};
use super::lexer::{SpannedToken, Token};

pub fn parse_tokens(tokens: Vec<SpannedToken>) -> Result<ast::Program, CompileError> {
    let mut parser = Parser::new(tokens);
    parser.parse_program()
}

struct Parser {
    tokens: Vec<SpannedToken>,
    position: usize,
}

impl Parser {
    fn new(tokens: Vec<SpannedToken>) -> Self {
        Self { tokens, position: 0 }
    }

    fn parse_program(&mut self) -> Result<ast::Program, CompileError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(ast::Program { statements })
    }

    fn parse_statement(&mut self) -> Result<ast::Statement, CompileError> {
        match self.advance() {
            Some(Token::LBrace) => {
                let mut statements = Vec::new();
                while !matches!(self.peek(), Some(Token::RBrace)) {
                    if self.is_at_end() {
                        return Err(self.error("Expected '}' to close block, but reached end of file".to_string()));
                    }
                    statements.push(self.parse_statement()?);
                }
                self.advance(); // consume '}'
                Ok(ast::Statement::Block(statements))
            }
            Some(Token::Assign) => {
                let target = self.parse_identifier()?;
                let value = self.parse_expression()?;
                Ok(ast::Statement::Assign { target, value })
            }
            Some(Token::If) => {
                let condition = self.parse_expression()?;
                let then_branch = Box::new(self.parse_statement()?);
                let else_branch = if matches!(self.peek(), Some(Token::Else)) {
                    self.advance(); // consume 'Else'
                    Some(Box::new(self.parse_statement()?))
                } else {
                    None
                };
                Ok(ast::Statement::If { condition, then_branch, else_branch })
            }
            Some(Token::While) => {
                let condition = self.parse_expression()?;
                let body = Box::new(self.parse_statement()?);
                Ok(ast::Statement::While { condition, body })
            }
            Some(Token::Print) => {
                // `Print ()` carries no argument
                if matches!(self.peek(), Some(Token::LParen)) && matches!(self.lookahead(1), Some(Token::RParen)) {
                    self.advance();
                    self.advance();
                    return Ok(ast::Statement::Print { argument: None });
                }
                let argument = self.parse_expression()?;
                Ok(ast::Statement::Print { argument: Some(argument) })
            }
            token => {
                let message = format!("Expected a statement, found {}", describe(token));
                self.position -= 1;
                Err(self.error(message))
            }
        }
    }

    fn parse_expression(&mut self) -> Result<ast::Expression, CompileError> {
        match self.advance() {
            Some(Token::IntLiteral(n)) => Ok(ast::Expression::IntLit(*n)),
            Some(Token::True) => Ok(ast::Expression::BoolLit(true)),
            Some(Token::False) => Ok(ast::Expression::BoolLit(false)),
            Some(Token::StrLiteral(s)) => Ok(ast::Expression::StrLit(s.clone())),
            Some(Token::Identifier(name)) => Ok(ast::Expression::Id(name.clone())),
            Some(Token::LParen) => {
                let expr = match self.advance() {
                    Some(Token::Binop) => {
                        let op = self.parse_binary_operator()?;
                        let left = self.parse_expression()?;
                        let right = self.parse_expression()?;
                        ast::Expression::binop(op, left, right)
                    }
                    Some(Token::Unop) => {
                        let op = self.parse_unary_operator()?;
                        let operand = self.parse_expression()?;
                        ast::Expression::unop(op, operand)
                    }
                    token => {
                        let message = format!("Expected 'Binop' or 'Unop' after '(', found {}", describe(token));
                        self.position -= 1;
                        return Err(self.error(message));
                    }
                };
                self.expect(Token::RParen)?;
                Ok(expr)
            }
            token => {
                let message = format!("Expected an expression, found {}", describe(token));
                self.position -= 1;
                Err(self.error(message))
            }
        }
    }

    fn parse_binary_operator(&mut self) -> Result<BinaryOperator, CompileError> {
        let op = match self.peek() {
            Some(Token::Plus) => BinaryOperator::Add,
            Some(Token::Minus) => BinaryOperator::Sub,
            Some(Token::Star) => BinaryOperator::Mul,
            Some(Token::Slash) => BinaryOperator::Div,
            Some(Token::AndAnd) => BinaryOperator::And,
            Some(Token::OrOr) => BinaryOperator::Or,
            Some(Token::EqualEqual) => BinaryOperator::Eq,
            Some(Token::NotEqual) => BinaryOperator::Ne,
            Some(Token::Less) => BinaryOperator::Lt,
            Some(Token::LessEqual) => BinaryOperator::Le,
            Some(Token::Greater) => BinaryOperator::Gt,
            Some(Token::GreaterEqual) => BinaryOperator::Ge,
            token => {
                let message = format!("Expected a binary operator, found {}", describe(token));
                return Err(self.error(message));
            }
        };
        self.advance();
        Ok(op)
    }

    fn parse_unary_operator(&mut self) -> Result<UnaryOperator, CompileError> {
        let op = match self.peek() {
            Some(Token::Minus) => UnaryOperator::Neg,
            Some(Token::Bang) => UnaryOperator::Not,
            token => {
                let message = format!("Expected '-' or '!', found {}", describe(token));
                return Err(self.error(message));
            }
        };
        self.advance();
        Ok(op)
    }

    fn parse_identifier(&mut self) -> Result<String, CompileError> {
        match self.peek() {
            Some(Token::Identifier(name)) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            token => {
                let message = format!("Expected an identifier, found {}", describe(token));
                Err(self.error(message))
            }
        }
    }

    // Helpers
    fn peek(&self) -> Option<&Token> {
        self.lookahead(0)
    }

    fn lookahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n).map(|t| &t.token)
    }

    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position).map(|t| &t.token);
        self.position += 1;
        token
    }

    fn expect(&mut self, expected: Token) -> Result<(), CompileError> {
        if self.peek() == Some(&expected) {
            self.advance();
            Ok(())
        } else {
            let message = format!("Expected {:?}, found {}", expected, describe(self.peek()));
            Err(self.error(message))
        }
    }

    /// Syntax error positioned at the current token.
    fn error(&self, message: String) -> CompileError {
        let span = self
            .tokens
            .get(self.position)
            .or_else(|| self.tokens.last())
            .map(|t| t.span)
            .unwrap_or_default();
        CompileError::SyntaxError {
            line: span.line,
            column: span.column,
            message,
        }
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek(), Some(Token::Eof) | None)
    }
}

fn describe(token: Option<&Token>) -> String {
    match token {
        Some(Token::Eof) | None => "end of file".to_string(),
        Some(token) => format!("{:?}", token),
    }
}
