/// Abstract Syntax Tree node representing a parsed expression.
///
/// Nodes are built once by the parser and never mutated afterwards. Every
/// node owns its children.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Numeric literal, kept as the raw lexeme
    ///
    /// Coercion to a number happens during evaluation.
    ///
    /// # Example
    /// ```text
    /// 42
    /// ```
    NumberLiteral { value: String },

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    StringLiteral { value: String },

    /// Reference to one of the permitted columns
    ColumnName { name: String },

    /// Built-in function call
    ///
    /// Arity is not checked while parsing.
    ///
    /// # Examples
    /// ```text
    /// add(2, 3)
    /// add(2, subtract(4, 2))
    /// ```
    CallExpression { name: String, params: Vec<Node> },

    /// Two-branch conditional
    ///
    /// # Example
    /// ```text
    /// if (is_num(5)) { add(2, 3) } else { subtract(2, 3) }
    /// ```
    IfCondition {
        condition: Box<Node>,
        true_body: Box<Node>,
        false_body: Box<Node>,
    },
}

impl Node {
    pub fn number(value: impl Into<String>) -> Self {
        Node::NumberLiteral {
            value: value.into(),
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Node::StringLiteral {
            value: value.into(),
        }
    }

    pub fn column(name: impl Into<String>) -> Self {
        Node::ColumnName { name: name.into() }
    }

    pub fn call(name: impl Into<String>, params: Vec<Node>) -> Self {
        Node::CallExpression {
            name: name.into(),
            params,
        }
    }

    pub fn if_condition(condition: Node, true_body: Node, false_body: Node) -> Self {
        Node::IfCondition {
            condition: Box::new(condition),
            true_body: Box::new(true_body),
            false_body: Box::new(false_body),
        }
    }

    /// Node kind name, as used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            Node::NumberLiteral { .. } => "NumberLiteral",
            Node::StringLiteral { .. } => "StringLiteral",
            Node::ColumnName { .. } => "ColumnName",
            Node::CallExpression { .. } => "CallExpression",
            Node::IfCondition { .. } => "IfCondition",
        }
    }
}

/// Root of the AST: top-level statements in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub body: Vec<Node>,
}
