//! Formula to DOT (Graphviz) conversion.
//!
//! Renders the syntax tree of a parsed formula, which is handy to check how
//! precedence and postfix complements were resolved.
//!
//! - **Set nodes** are leaves, drawn with `leaf_shape`
//! - **Operator nodes** are labeled with the operator name
//! - **Edges** to the left operand are labeled `l`, to the right `r`;
//!   the edge below a complement uses `complement_edge_style`
//!
//! # Examples
//!
//! ```
//! use setviz::parser::parse;
//!
//! let e = parse("(A U B) & C.").unwrap();
//! let dot = e.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Render with: dot -Tpng formula.dot -o formula.png
//! ```

use std::fmt::Write as _;

use crate::ast::Expr;

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for set nodes (default: "circle")
    pub leaf_shape: &'static str,
    /// Shape for operator nodes (default: "box")
    pub op_shape: &'static str,
    /// Style for the edge below a complement (default: "dotted")
    pub complement_edge_style: &'static str,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            leaf_shape: "circle",
            op_shape: "box",
            complement_edge_style: "dotted",
        }
    }
}

impl Expr {
    /// Converts the syntax tree to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the syntax tree to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "label=\"{}\";", self)?;
        let mut next_id = 0;
        self.write_dot_node(&mut dot, config, &mut next_id)?;
        writeln!(dot, "}}")?;
        Ok(dot)
    }

    /// Writes this node and its subtree, returning this node's id.
    fn write_dot_node(
        &self,
        dot: &mut String,
        config: &DotConfig,
        next_id: &mut usize,
    ) -> Result<usize, std::fmt::Error> {
        let id = *next_id;
        *next_id += 1;

        match self {
            Expr::Set(name) => {
                writeln!(dot, "n{} [shape={}, label=\"{}\"];", id, config.leaf_shape, name)?;
            }
            Expr::Complement(inner) => {
                writeln!(dot, "n{} [shape={}, label=\"complement\"];", id, config.op_shape)?;
                let child = inner.write_dot_node(dot, config, next_id)?;
                writeln!(
                    dot,
                    "n{} -> n{} [style={}];",
                    id, child, config.complement_edge_style
                )?;
            }
            Expr::Binary(op, lhs, rhs) => {
                writeln!(dot, "n{} [shape={}, label=\"{}\"];", id, config.op_shape, op.name())?;
                let left = lhs.write_dot_node(dot, config, next_id)?;
                writeln!(dot, "n{} -> n{} [label=\"l\"];", id, left)?;
                let right = rhs.write_dot_node(dot, config, next_id)?;
                writeln!(dot, "n{} -> n{} [label=\"r\"];", id, right)?;
            }
        }

        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::parse;

    use super::*;

    #[test]
    fn test_to_dot_leaf() {
        let dot = parse("A").unwrap().to_dot().unwrap();
        assert_eq!(
            dot,
            "digraph {\nlabel=\"A\";\nn0 [shape=circle, label=\"A\"];\n}\n"
        );
    }

    #[test]
    fn test_to_dot_edges() {
        let e = parse("(A U B) & C.").unwrap();
        let dot = e.to_dot().unwrap();
        assert_eq!(dot.matches(" -> ").count(), e.size() - 1);
        assert!(dot.contains("n0 [shape=box, label=\"intersect\"];"));
        assert!(dot.contains("n0 -> n1 [label=\"l\"];"));
        assert!(dot.contains("n1 [shape=box, label=\"union\"];"));
        assert!(dot.contains("n4 [shape=box, label=\"complement\"];"));
        assert!(dot.contains("n4 -> n5 [style=dotted];"));
    }

    #[test]
    fn test_to_dot_with_config() {
        let config = DotConfig {
            leaf_shape: "doublecircle",
            ..DotConfig::default()
        };
        let dot = parse("B.").unwrap().to_dot_with_config(&config).unwrap();
        assert!(dot.contains("n1 [shape=doublecircle, label=\"B\"];"));
    }
}
