use std::fmt;

/// Built-in functions.
///
/// This is the whole vocabulary: the lexer uses it to tell function names from
/// column names, and the evaluator dispatches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// `add(a, b, ...)` - sum of all parameters, starting from 0
    Add,
    /// `subtract(a, b, ...)` - first parameter minus each of the rest
    Subtract,
    /// `is_num(a, ...)` - true when every parameter is numeric
    IsNum,
}

impl Function {
    /// Resolve a function by its source name
    pub fn lookup(name: &str) -> Option<Function> {
        match name {
            "add" => Some(Function::Add),
            "subtract" => Some(Function::Subtract),
            "is_num" => Some(Function::IsNum),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Function::Add => "add",
            Function::Subtract => "subtract",
            Function::IsNum => "is_num",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
