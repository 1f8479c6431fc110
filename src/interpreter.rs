use std::cell::RefCell;
use std::io::Write;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{Error, RuntimeError};
use crate::expr::{self, Expr, ExprVisitor};
use crate::stmt::{self, Stmt, StmtVisitor};
use crate::token::Type;
use crate::value::Value;

type EvalResult = Result<Value, RuntimeError>;
type ExecResult = Result<(), RuntimeError>;

/// Walks the AST, evaluating expressions and executing statements.
/// Generic over the sink `print` writes to, so tests can capture output in
/// a buffer instead of going through stdout.
pub struct Interpreter<W: Write> {
    environment: Rc<RefCell<Environment>>,
    /// The value of the last bare expression evaluated, for REPL echo.
    last_result: Option<Value>,
    output: W,
}

impl<W: Write> Interpreter<W> {
    pub fn new(output: W) -> Self {
        Interpreter {
            environment: Rc::new(RefCell::new(Environment::default())),
            last_result: None,
            output,
        }
    }

    /// Executes a statement list, stopping at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) {
        for statement in statements {
            if let Err(error) = self.execute(statement) {
                error.throw();
                return;
            }
        }
    }

    /// Writes the value of the last bare expression evaluated to the
    /// output sink, formatted the way the REPL echoes it (quoted
    /// strings). A no-op if the last statement run wasn't a bare
    /// expression.
    pub fn echo_last_result(&mut self) {
        if let Some(value) = self.last_result.take() {
            writeln!(self.output, "{}", repl_echo(&value)).expect("write to print sink failed");
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn execute(&mut self, stmt: &Stmt) -> ExecResult {
        stmt.accept(self)
    }

    fn evaluate(&mut self, expr: &Expr) -> EvalResult {
        expr.accept(self)
    }

    fn execute_block(&mut self, statements: &[Stmt], environment: Environment) -> ExecResult {
        let previous = Rc::clone(&self.environment);
        self.environment = Rc::new(RefCell::new(environment));

        let result = (|| {
            for statement in statements {
                self.execute(statement)?;
            }
            Ok(())
        })();

        self.environment = previous;
        result
    }
}

/// Strips trailing zeros (and a bare trailing decimal point) from a
/// number's default formatting; every other value type formats as-is.
/// `quote_strings` controls whether `String` values are wrapped in `"..."`
/// — used by the REPL echo but not by `print`.
fn stringify(value: &Value, quote_strings: bool) -> String {
    match value {
        Value::Number(n) => {
            let mut s = n.to_string();
            if s.contains('.') {
                while s.ends_with('0') {
                    s.pop();
                }
                if s.ends_with('.') {
                    s.pop();
                }
            }
            s
        },
        Value::String(s) if quote_strings => format!("\"{s}\""),
        other => other.to_string(),
    }
}

/// Formats a value the way the REPL echoes a bare expression's result —
/// strings are quoted, everything else matches `print`'s formatting.
pub fn repl_echo(value: &Value) -> String {
    stringify(value, true)
}

impl<W: Write> ExprVisitor<EvalResult> for Interpreter<W> {
    fn visit_literal_expr(&mut self, value: &Value) -> EvalResult {
        Ok(value.clone())
    }

    fn visit_grouping_expr(&mut self, data: &expr::GroupingData) -> EvalResult {
        self.evaluate(&data.expr)
    }

    fn visit_unary_expr(&mut self, data: &expr::UnaryData) -> EvalResult {
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Bang => Ok(!right),
            Type::Minus => (-right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operand must be a number.".to_string(),
            }),
            _ => unreachable!("unary operator must be '!' or '-'"),
        }
    }

    fn visit_binary_expr(&mut self, data: &expr::BinaryData) -> EvalResult {
        let left = self.evaluate(&data.left)?;
        let right = self.evaluate(&data.right)?;

        match data.operator.r#type {
            Type::Comma => Ok(right),

            Type::EqualEqual => Ok(Value::Bool(left == right)),
            Type::BangEqual => Ok(Value::Bool(left != right)),

            Type::Greater | Type::GreaterEqual | Type::Less | Type::LessEqual => {
                let ordering = left.partial_cmp(&right).ok_or_else(|| RuntimeError {
                    token: data.operator.clone(),
                    message: "Operands must be two numbers or two strings.".to_string(),
                })?;

                Ok(Value::Bool(match data.operator.r#type {
                    Type::Greater => ordering == std::cmp::Ordering::Greater,
                    Type::GreaterEqual => ordering != std::cmp::Ordering::Less,
                    Type::Less => ordering == std::cmp::Ordering::Less,
                    Type::LessEqual => ordering != std::cmp::Ordering::Greater,
                    _ => unreachable!(),
                }))
            },

            Type::Minus => (left - right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
            Type::Star => (left * right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operands must be numbers.".to_string(),
            }),
            Type::Slash => {
                if let (Value::Number(_), Value::Number(r)) = (&left, &right) {
                    if *r == 0.0 {
                        return Err(RuntimeError {
                            token: data.operator.clone(),
                            message: "Division by zero.".to_string(),
                        });
                    }
                }

                (left / right).ok_or_else(|| RuntimeError {
                    token: data.operator.clone(),
                    message: "Operands must be numbers.".to_string(),
                })
            },
            Type::Plus => (left + right).ok_or_else(|| RuntimeError {
                token: data.operator.clone(),
                message: "Operands must be two numbers or two strings.".to_string(),
            }),

            _ => unreachable!("binary operator outside the supported set"),
        }
    }

    fn visit_ternary_expr(&mut self, data: &expr::TernaryData) -> EvalResult {
        if self.evaluate(&data.cond)?.is_truthy() {
            self.evaluate(&data.then_branch)
        } else {
            self.evaluate(&data.else_branch)
        }
    }

    fn visit_variable_expr(&mut self, data: &expr::VariableData) -> EvalResult {
        self.environment.borrow().get(&data.name)
    }

    fn visit_assign_expr(&mut self, data: &expr::AssignData) -> EvalResult {
        let value = self.evaluate(&data.value)?;
        self.environment.borrow_mut().assign(&data.name, value.clone())?;
        Ok(value)
    }
}

impl<W: Write> StmtVisitor<ExecResult> for Interpreter<W> {
    fn visit_expression_stmt(&mut self, data: &stmt::ExpressionData) -> ExecResult {
        self.evaluate(&data.expr)?;
        Ok(())
    }

    fn visit_expression_result_stmt(&mut self, data: &stmt::ExpressionData) -> ExecResult {
        let value = self.evaluate(&data.expr)?;
        self.last_result = Some(value);
        Ok(())
    }

    fn visit_print_stmt(&mut self, data: &stmt::PrintData) -> ExecResult {
        let value = self.evaluate(&data.expr)?;
        writeln!(self.output, "{}", stringify(&value, false))
            .expect("write to print sink failed");
        Ok(())
    }

    fn visit_var_stmt(&mut self, data: &stmt::VarData) -> ExecResult {
        let value = match &data.initializer {
            Some(expr) => Some(self.evaluate(expr)?),
            None => None,
        };

        self.environment.borrow_mut().define(&data.name.lexeme, value);
        Ok(())
    }

    fn visit_block_stmt(&mut self, data: &stmt::BlockData) -> ExecResult {
        let child = Environment::new(Some(Rc::clone(&self.environment)));
        self.execute_block(&data.statements, child)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::Scanner;

    fn run(source: &str) -> String {
        let tokens = Scanner::new(source).scan_tokens();
        let statements = Parser::new(tokens).parse();
        let mut interpreter = Interpreter::new(Vec::new());
        interpreter.interpret(&statements);
        String::from_utf8(interpreter.output().clone()).unwrap()
    }

    #[test]
    fn arithmetic_precedence() {
        assert_eq!(run("print 1 + 2 * 3;"), "7\n");
    }

    #[test]
    fn left_associative_subtraction() {
        assert_eq!(run("print 2 - 3 - 4;"), "-5\n");
    }

    #[test]
    fn grouping_overrides_precedence() {
        assert_eq!(run("print (1 + 2) * 3;"), "9\n");
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(run(r#"print "a" + "b";"#), "ab\n");
    }

    #[test]
    fn mixed_add_is_a_runtime_error() {
        crate::error::reset();
        assert_eq!(run(r#"print "a" + 1;"#), "");
        assert!(crate::error::had_runtime_error());
        crate::error::reset();
    }

    #[test]
    fn division_by_zero_is_a_runtime_error() {
        crate::error::reset();
        run("print 1 / 0;");
        assert!(crate::error::had_runtime_error());
        crate::error::reset();
    }

    #[test]
    fn truthiness_of_unary_bang() {
        assert_eq!(run("print !nil; print !false; print !0; print !\"\";"), "true\ntrue\nfalse\nfalse\n");
    }

    #[test]
    fn ternary_picks_a_branch() {
        assert_eq!(run("print true ? 1 : 2; print false ? 1 : 2;"), "1\n2\n");
    }

    #[test]
    fn comma_evaluates_left_discards_and_returns_right() {
        assert_eq!(run("var a = 0; print (a = 1, a = 2, a);"), "2\n");
    }

    #[test]
    fn stringify_trims_trailing_zeros() {
        assert_eq!(stringify(&Value::Number(1.0), false), "1");
        assert_eq!(stringify(&Value::Number(1.5), false), "1.5");
        assert_eq!(stringify(&Value::Number(1.50), false), "1.5");
    }

    #[test]
    fn repl_echo_quotes_strings_but_print_does_not() {
        assert_eq!(repl_echo(&Value::String("hi".into())), "\"hi\"");
        assert_eq!(stringify(&Value::String("hi".into()), false), "hi");
    }

    #[test]
    fn block_scoping_shadows_and_restores() {
        assert_eq!(run("var a = 1; { var a = 2; print a; } print a;"), "2\n1\n");
    }

    #[test]
    fn assignment_walks_up_to_enclosing_scope() {
        assert_eq!(run("var a = 1; { a = 2; } print a;"), "2\n");
    }

    #[test]
    fn uninitialized_variable_is_a_runtime_error() {
        crate::error::reset();
        run("var a; print a;");
        assert!(crate::error::had_runtime_error());
        crate::error::reset();
    }
}
