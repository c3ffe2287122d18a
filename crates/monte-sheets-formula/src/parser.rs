//! Formula parser
//!
//! A recursive descent parser for the formula grammar with proper operator
//! precedence:
//!
//! ```text
//! Exp    := Factor (('+'|'-') Factor)*
//! Factor := Term (('*'|'/') Term)*
//! Term   := Number
//!         | '[' Exp ',' Exp ']'                  // sugar for triangular(lo, hi)
//!         | Identifier '(' (Exp (',' Exp)*)? ')' // function call
//!         | Identifier                           // variable reference
//!         | ('+'|'-') Term                       // unary
//!         | '(' Exp ')'
//! ```

use crate::ast::{BinaryOperator, Expr, UnaryOperator};
use crate::error::{FormulaError, FormulaResult};

/// Parse an expression string (without any leading `=`) into an AST
///
/// # Example
/// ```rust
/// use monte_sheets_formula::parse_expression;
///
/// let ast = parse_expression("1+2*3").unwrap();
/// let ast = parse_expression("triangular(0, 1, 0.5) + A1").unwrap();
/// let ast = parse_expression("[4, 7] / 2").unwrap();
/// ```
pub fn parse_expression(input: &str) -> FormulaResult<Expr> {
    let mut parser = ExpressionParser::new(input)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::Syntax(format!(
            "unexpected input after expression: '{}'",
            &parser.input[parser.token_start..]
        )));
    }

    Ok(expr)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Identifier(String),

    Plus,
    Minus,
    Star,
    Slash,
    Comma,

    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,

    Eof,
}

/// Expression parser with single-token lookahead
struct ExpressionParser<'a> {
    input: &'a str,
    pos: usize,
    /// Byte offset where the current token started (for error messages)
    token_start: usize,
    current_token: Token,
}

impl<'a> ExpressionParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            token_start: 0,
            current_token: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.skip_whitespace();
        self.token_start = self.pos;
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        if self.is_at_end() {
            return Ok(Token::Eof);
        }

        let c = self.peek_char().unwrap();

        // Single-character tokens
        let single = match c {
            '+' => Some(Token::Plus),
            '-' => Some(Token::Minus),
            '*' => Some(Token::Star),
            '/' => Some(Token::Slash),
            ',' => Some(Token::Comma),
            '(' => Some(Token::LeftParen),
            ')' => Some(Token::RightParen),
            '[' => Some(Token::LeftBracket),
            ']' => Some(Token::RightBracket),
            _ => None,
        };
        if let Some(token) = single {
            self.advance();
            return Ok(token);
        }

        if c.is_ascii_digit() {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() || c == '_' {
            return Ok(self.scan_identifier());
        }

        Err(FormulaError::Syntax(format!(
            "unrecognized character '{}'",
            c
        )))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        // Integer part
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        // Decimal part: only consume the '.' when a digit follows, so that
        // trailing dots surface as a syntax error on the next token
        if self.peek_char() == Some('.')
            && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let num_str = &self.input[start..self.pos];
        let num: f64 = num_str
            .parse()
            .map_err(|_| FormulaError::Syntax(format!("invalid number '{}'", num_str)))?;
        Ok(Token::Number(num))
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            self.advance();
        }
        Token::Identifier(self.input[start..self.pos].to_string())
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::Syntax(format!(
                "expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    // === Expression parsing with precedence ===

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOperator::Add,
                Token::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_factor()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOperator::Multiply,
                Token::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> FormulaResult<Expr> {
        // Prefix unary minus
        if matches!(self.current_token(), Token::Minus) {
            self.consume()?;
            let operand = self.parse_term()?;
            return Ok(Expr::UnaryOp {
                op: UnaryOperator::Negate,
                operand: Box::new(operand),
            });
        }

        // Prefix plus (no-op)
        if matches!(self.current_token(), Token::Plus) {
            self.consume()?;
            return self.parse_term();
        }

        match self.consume()? {
            Token::Number(n) => Ok(Expr::Number(n)),

            Token::LeftParen => {
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::LeftBracket => self.parse_bracket(),

            Token::Identifier(name) => {
                // A following '(' makes it a function call
                if matches!(self.current_token(), Token::LeftParen) {
                    self.parse_function_call(name)
                } else {
                    Ok(Expr::Variable(name))
                }
            }

            token => Err(FormulaError::Syntax(format!(
                "unexpected token: {:?}",
                token
            ))),
        }
    }

    /// `[lo, hi]` — sugar for `triangular(lo, hi)`
    fn parse_bracket(&mut self) -> FormulaResult<Expr> {
        let lo = self.parse_expression()?;
        self.expect(&Token::Comma)?;
        let hi = self.parse_expression()?;
        self.expect(&Token::RightBracket)?;

        Ok(Expr::Function {
            name: "triangular".to_string(),
            args: vec![lo, hi],
        })
    }

    fn parse_function_call(&mut self, name: String) -> FormulaResult<Expr> {
        self.expect(&Token::LeftParen)?;

        let mut args = Vec::new();

        if !matches!(self.current_token(), Token::RightParen) {
            args.push(self.parse_expression()?);

            while matches!(self.current_token(), Token::Comma) {
                self.consume()?;
                args.push(self.parse_expression()?);
            }
        }

        self.expect(&Token::RightParen)?;

        Ok(Expr::Function { name, args })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_expression("42").unwrap(), Expr::Number(42.0));
        assert_eq!(parse_expression("3.25").unwrap(), Expr::Number(3.25));
        assert_eq!(parse_expression(" 7 ").unwrap(), Expr::Number(7.0));
    }

    #[test]
    fn test_parse_precedence() {
        // 1+2*3 parses as 1+(2*3)
        let ast = parse_expression("1+2*3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Add);
            assert_eq!(*left, Expr::Number(1.0));
            assert!(matches!(
                *right,
                Expr::BinaryOp {
                    op: BinaryOperator::Multiply,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_parentheses() {
        let ast = parse_expression("(1+2)*3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOperator::Multiply);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOperator::Add,
                    ..
                }
            ));
            assert_eq!(*right, Expr::Number(3.0));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_unary() {
        let ast = parse_expression("-5").unwrap();
        assert!(matches!(
            ast,
            Expr::UnaryOp {
                op: UnaryOperator::Negate,
                ..
            }
        ));

        // Unary plus is dropped
        assert_eq!(parse_expression("+5").unwrap(), Expr::Number(5.0));

        // Unary binds tighter than '*': -2*3 is (-2)*3
        let ast = parse_expression("-2*3").unwrap();
        if let Expr::BinaryOp { op, left, .. } = ast {
            assert_eq!(op, BinaryOperator::Multiply);
            assert!(matches!(*left, Expr::UnaryOp { .. }));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_variable() {
        assert_eq!(
            parse_expression("A1").unwrap(),
            Expr::Variable("A1".into())
        );
        assert_eq!(
            parse_expression("_tmp2").unwrap(),
            Expr::Variable("_tmp2".into())
        );
    }

    #[test]
    fn test_parse_function_call() {
        let ast = parse_expression("uniform(0, 1)").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "uniform");
            assert_eq!(args.len(), 2);
        } else {
            panic!("Expected Function");
        }

        let ast = parse_expression("f()").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "f");
            assert!(args.is_empty());
        } else {
            panic!("Expected Function");
        }
    }

    #[test]
    fn test_parse_nested_function() {
        let ast = parse_expression("normal(uniform(0, 1), 2)").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "normal");
            assert_eq!(args.len(), 2);
            assert!(matches!(&args[0], Expr::Function { .. }));
        } else {
            panic!("Expected Function");
        }
    }

    #[test]
    fn test_parse_bracket_sugar() {
        let ast = parse_expression("[4, 7]").unwrap();
        if let Expr::Function { name, args } = ast {
            assert_eq!(name, "triangular");
            assert_eq!(args, vec![Expr::Number(4.0), Expr::Number(7.0)]);
        } else {
            panic!("Expected Function");
        }

        // Bracket bounds are full expressions
        let ast = parse_expression("[1+1, 2*3]").unwrap();
        assert!(matches!(ast, Expr::Function { .. }));
    }

    #[test]
    fn test_parse_syntax_errors() {
        assert!(matches!(
            parse_expression("1 ! 2"),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression("1."),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression(".5"),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression("(1+2"),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression("1 2"),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression(""),
            Err(FormulaError::Syntax(_))
        ));
        assert!(matches!(
            parse_expression("[1, 2"),
            Err(FormulaError::Syntax(_))
        ));
    }
}
