//! AST Printer - indented tree dump of a Program
//!
//! One labeled line per node, two spaces per nesting level. Used by
//! `ringc parse` and by tests; the format is for reading, not a contract.

use std::fmt::Write;

use crate::frontend::ast::*;

/// Pretty printer for the Ring AST
pub struct AstPrinter {
    output: String,
    indent: usize,
}

impl Default for AstPrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl AstPrinter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent: 0,
        }
    }

    /// Print a program to string
    pub fn print_program(&mut self, program: &Program) -> String {
        self.output.clear();
        self.indent = 0;

        self.line("Program");
        self.nested(|p| p.print_stmts(&program.top_level, "Declarations"));

        std::mem::take(&mut self.output)
    }

    fn line(&mut self, text: &str) {
        // Writing into a String cannot fail
        let _ = writeln!(self.output, "{:width$}{}", "", text, width = self.indent * 2);
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }

    fn print_stmts(&mut self, stmts: &[Stmt], label: &str) {
        if stmts.is_empty() {
            self.line(&format!("{}: (empty)", label));
            return;
        }
        self.line(label);
        self.nested(|p| {
            for (i, stmt) in stmts.iter().enumerate() {
                p.print_stmt(stmt, &format!("[{}] ", i));
            }
        });
    }

    fn print_exprs(&mut self, exprs: &[Expr], label: &str) {
        if exprs.is_empty() {
            self.line(&format!("{}: (none)", label));
            return;
        }
        self.line(label);
        self.nested(|p| {
            for (i, expr) in exprs.iter().enumerate() {
                p.print_expr(expr, &format!("[{}] ", i));
            }
        });
    }

    fn print_stmt(&mut self, stmt: &Stmt, prefix: &str) {
        match stmt {
            Stmt::VariableDecl(var) => {
                let kind = if var.is_const { "const" } else { "mut" };
                self.line(&format!("{}VariableDecl {} ({})", prefix, var.name, kind));
                self.nested(|p| {
                    match &var.declared_type {
                        Some(ty) => p.line(&format!("Type: {}", ty)),
                        None => p.line("Type: (inferred)"),
                    }
                    p.print_expr(&var.initializer, "Initializer: ");
                });
            }
            Stmt::FunctionDecl(func) => {
                self.line(&format!("{}FunctionDecl {}", prefix, func.name));
                self.nested(|p| {
                    if func.params.is_empty() {
                        p.line("Params: (none)");
                    } else {
                        p.line("Params");
                        p.nested(|p| {
                            for (i, param) in func.params.iter().enumerate() {
                                p.line(&format!("[{}] {}: {}", i, param.name, param.ty));
                            }
                        });
                    }
                    match &func.return_type {
                        Some(ty) => p.line(&format!("ReturnType: {}", ty)),
                        None => p.line("ReturnType: (none)"),
                    }
                    p.print_stmts(&func.body, "Body");
                });
            }
            Stmt::Block(stmts) => {
                self.line(&format!("{}Block", prefix));
                self.nested(|p| p.print_stmts(stmts, "Statements"));
            }
            Stmt::Expr(expr) => {
                self.line(&format!("{}ExprStmt", prefix));
                self.nested(|p| p.print_expr(expr, ""));
            }
            Stmt::If(if_stmt) => {
                self.line(&format!("{}If", prefix));
                self.nested(|p| {
                    p.print_expr(&if_stmt.condition, "Condition: ");
                    p.print_stmts(&if_stmt.then_branch, "Then");
                    p.print_stmts(&if_stmt.else_branch, "Else");
                });
            }
            Stmt::Return(expr) => {
                self.line(&format!("{}Return", prefix));
                self.nested(|p| p.print_expr(expr, ""));
            }
        }
    }

    fn print_expr(&mut self, expr: &Expr, prefix: &str) {
        match expr {
            Expr::Literal(Literal::Int(n)) => self.line(&format!("{}Int {}", prefix, n)),
            Expr::Literal(Literal::Float(n)) => self.line(&format!("{}Float {:?}", prefix, n)),
            Expr::Literal(Literal::String(s)) => self.line(&format!("{}String {:?}", prefix, s)),
            Expr::Boolean(b) => self.line(&format!("{}Boolean {}", prefix, b)),
            Expr::Nil => self.line(&format!("{}Nil", prefix)),
            Expr::Identifier(name) => self.line(&format!("{}Identifier {}", prefix, name)),
            Expr::Unary { op, operand } => {
                self.line(&format!("{}Unary {}", prefix, op.text));
                self.nested(|p| p.print_expr(operand, ""));
            }
            Expr::Binary { left, op, right } => {
                self.line(&format!("{}Binary {}", prefix, op.text));
                self.nested(|p| {
                    p.print_expr(left, "");
                    p.print_expr(right, "");
                });
            }
            Expr::Enclosed(inner) => {
                self.line(&format!("{}Enclosed", prefix));
                self.nested(|p| p.print_expr(inner, ""));
            }
            Expr::Call { callee, args } => {
                self.line(&format!("{}Call {}", prefix, callee));
                self.nested(|p| p.print_exprs(args, "Args"));
            }
            Expr::Array(elements) => {
                self.line(&format!("{}Array", prefix));
                self.nested(|p| p.print_exprs(elements, "Elements"));
            }
        }
    }
}

/// Convenience wrapper around [`AstPrinter`]
pub fn print_program(program: &Program) -> String {
    AstPrinter::new().print_program(program)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::parser::parse_source;
    use pretty_assertions::assert_eq;

    fn dump(source: &str) -> String {
        print_program(&parse_source(source, "print.ri").unwrap())
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(dump(""), "Program\n  Declarations: (empty)\n");
    }

    #[test]
    fn test_function_dump() {
        let expected = "\
Program
  Declarations
    [0] FunctionDecl add
      Params
        [0] a: int
        [1] b: int
      ReturnType: int
      Body
        [0] Return
          Binary +
            Identifier a
            Identifier b
";
        assert_eq!(dump("let add(a: int, b: int) ~ int :: begin return a + b; end"), expected);
    }

    #[test]
    fn test_empty_cases() {
        let expected = "\
Program
  Declarations
    [0] FunctionDecl main
      Params: (none)
      ReturnType: (none)
      Body
        [0] ExprStmt
          Call f
            Args: (none)
        [1] ExprStmt
          Array
            Elements: (none)
        [2] Block
          Statements: (empty)
";
        assert_eq!(dump("let main() :: begin f(); {}; begin end end"), expected);
    }

    #[test]
    fn test_variables_and_if() {
        let expected = "\
Program
  Declarations
    [0] VariableDecl pi (const)
      Type: float
      Initializer: Float 3.14
    [1] FunctionDecl sign
      Params
        [0] n: int
      ReturnType: (none)
      Body
        [0] If
          Condition: Enclosed
            Unary -
              Identifier n
          Then
            [0] ExprStmt
              String \"neg\"
          Else
            [0] VariableDecl s (mut)
              Type: (inferred)
              Initializer: Nil
";
        let source = "let pi ~ float :: 3.14;\n\
                      let sign(n: int) :: begin if ((-n)) then \"neg\"; else let s := nil; end end";
        assert_eq!(dump(source), expected);
    }
}
