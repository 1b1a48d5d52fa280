//! Declarative program model executed by the scripted backend.
//!
//! A program is a single source file made of functions. Each function is a
//! list of statements with a source position and one action. There are no
//! branches or loops: stepping walks statements in order, enters calls and
//! unwinds on return.

use crate::types::{BreakpointSpec, SourceLocation, Variable};

/// What a statement does when it executes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action
{
    /// Declares a local and initialises it to the given value.
    Declare(Variable),
    /// A statement with no effect visible to the debugger.
    Plain,
    /// Calls another function of the program. Unknown callees behave like
    /// [`Action::Plain`] (an external library call).
    Call(String),
    /// Returns from the current function; from `main` this is the exit code.
    Return(i32),
}

/// A single executable source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement
{
    /// 1-based line.
    pub line: u32,
    /// 1-based column of the first token.
    pub column: u32,
    /// Effect of executing the statement.
    pub action: Action,
}

/// A function and its body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function
{
    /// Symbol name.
    pub name: String,
    /// Line of the function signature.
    pub line: u32,
    /// Parameters, bound with their values on entry.
    pub params: Vec<Variable>,
    /// Body in execution order.
    pub statements: Vec<Statement>,
}

impl Function
{
    /// Start a function declared at `line`.
    pub fn new(name: impl Into<String>, line: u32) -> Self
    {
        Self {
            name: name.into(),
            line,
            params: Vec::new(),
            statements: Vec::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn param(mut self, type_name: &str, name: &str, value: &str) -> Self
    {
        self.params.push(Variable::new(name, type_name, value));
        self
    }

    /// Add a `type name = value;` statement.
    #[must_use]
    pub fn declare(mut self, line: u32, column: u32, type_name: &str, name: &str, value: &str) -> Self
    {
        self.statements.push(Statement {
            line,
            column,
            action: Action::Declare(Variable::new(name, type_name, value)),
        });
        self
    }

    /// Add a statement with no debugger-visible effect.
    #[must_use]
    pub fn plain(mut self, line: u32, column: u32) -> Self
    {
        self.statements.push(Statement {
            line,
            column,
            action: Action::Plain,
        });
        self
    }

    /// Add a call statement.
    #[must_use]
    pub fn call(mut self, line: u32, column: u32, callee: &str) -> Self
    {
        self.statements.push(Statement {
            line,
            column,
            action: Action::Call(callee.to_string()),
        });
        self
    }

    /// Add a return statement.
    #[must_use]
    pub fn ret(mut self, line: u32, column: u32, code: i32) -> Self
    {
        self.statements.push(Statement {
            line,
            column,
            action: Action::Return(code),
        });
        self
    }
}

/// A loaded executable: one source file and its functions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program
{
    /// Source file name used in every reported location.
    pub file: String,
    /// Functions in source order.
    pub functions: Vec<Function>,
    /// Source text, if known. Front-ends use it to populate the code view.
    pub source: Option<String>,
}

impl Program
{
    /// Empty program for `file`.
    pub fn new(file: impl Into<String>) -> Self
    {
        Self {
            file: file.into(),
            functions: Vec::new(),
            source: None,
        }
    }

    /// Add a function.
    #[must_use]
    pub fn function(mut self, function: Function) -> Self
    {
        self.functions.push(function);
        self
    }

    /// Attach the source text.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self
    {
        self.source = Some(source.into());
        self
    }

    /// Index of a function by name.
    #[must_use]
    pub fn function_index(&self, name: &str) -> Option<usize>
    {
        self.functions.iter().position(|f| f.name == name)
    }

    /// Location of a statement.
    pub(crate) fn location(&self, statement: &Statement) -> SourceLocation
    {
        SourceLocation::new(self.file.clone(), statement.line, statement.column)
    }

    /// Resolve a breakpoint spec to statement locations.
    ///
    /// Symbols resolve to the first statement of the function. A `file:line`
    /// resolves to the first statement at or after `line`, matching how a
    /// native engine slides a line breakpoint to the next line with code.
    #[must_use]
    pub fn resolve(&self, spec: &BreakpointSpec) -> Vec<SourceLocation>
    {
        match spec {
            BreakpointSpec::Symbol(name) => self
                .functions
                .iter()
                .filter(|f| &f.name == name)
                .filter_map(|f| f.statements.first())
                .map(|s| self.location(s))
                .collect(),
            BreakpointSpec::FileLine { file, line } => {
                if !self.matches_file(file) {
                    return Vec::new();
                }
                self.functions
                    .iter()
                    .flat_map(|f| f.statements.iter())
                    .filter(|s| s.line >= *line)
                    .min_by_key(|s| (s.line, s.column))
                    .map(|s| vec![self.location(s)])
                    .unwrap_or_default()
            }
        }
    }

    /// Whether a user-written file name refers to this program's source.
    fn matches_file(&self, file: &str) -> bool
    {
        self.file == file || self.file.ends_with(&format!("/{file}"))
    }

    /// The program used by the front-ends when no other program is loaded.
    ///
    /// Equivalent to compiling:
    ///
    /// ```c
    /// int square(int x)
    /// {
    ///   int result = x * x;
    ///   return result;
    /// }
    ///
    /// int main()
    /// {
    ///   int i = 42;
    ///   square(i);
    ///   return i;
    /// }
    /// ```
    #[must_use]
    pub fn sample() -> Self
    {
        Program::new("main.c")
            .function(
                Function::new("square", 1)
                    .param("int", "x", "42")
                    .declare(3, 3, "int", "result", "1764")
                    .ret(4, 3, 1764),
            )
            .function(
                Function::new("main", 7)
                    .declare(9, 3, "int", "i", "42")
                    .call(10, 3, "square")
                    .ret(11, 3, 42),
            )
            .with_source(SAMPLE_SOURCE)
    }
}

const SAMPLE_SOURCE: &str = "int square(int x)
{
  int result = x * x;
  return result;
}

int main()
{
  int i = 42;
  square(i);
  return i;
}
";

#[cfg(test)]
mod tests
{
    use super::*;

    #[test]
    fn test_symbol_resolves_to_first_statement()
    {
        let program = Program::sample();
        let locations = program.resolve(&BreakpointSpec::symbol("main"));
        assert_eq!(locations, vec![SourceLocation::new("main.c", 9, 3)]);
    }

    #[test]
    fn test_line_slides_to_next_statement()
    {
        let program = Program::sample();
        let locations = program.resolve(&BreakpointSpec::file_line("main.c", 6));
        assert_eq!(locations, vec![SourceLocation::new("main.c", 9, 3)]);
    }

    #[test]
    fn test_unknown_symbol_is_pending()
    {
        let program = Program::sample();
        assert!(program.resolve(&BreakpointSpec::symbol("nope")).is_empty());
        assert!(program.resolve(&BreakpointSpec::file_line("other.c", 1)).is_empty());
    }

    #[test]
    fn test_sample_source_lines_match_statements()
    {
        let program = Program::sample();
        let source = program.source.clone().unwrap();
        let lines: Vec<&str> = source.lines().collect();
        assert_eq!(lines[8].trim(), "int i = 42;");
        assert_eq!(lines[9].trim(), "square(i);");
        assert_eq!(lines[2].trim(), "int result = x * x;");
    }
}
