/*
    This module builds the trees shown next to a validation: the chain of
    sentential forms of a derivation, and the shape of the grammar itself
*/

use std::fmt::Display;

use crate::grammar::errors::Result;
use crate::grammar::verifier::verify_grammar;
use crate::grammar::*;

pub const MAX_DEPTH: usize = 3;

// Chains the steps so that each one is the only child of the one before
pub fn build_derivation_tree(steps: &[DerivationStep]) -> Option<TreeNode> {
    let (last, rest) = steps.split_last()?;

    let leaf = TreeNode::new(&last.symbol);
    let root = rest.iter().rev().fold(leaf, |child, step| TreeNode {
        children: vec![child],
        ..TreeNode::new(&step.symbol)
    });

    Some(root)
}

pub fn build_general_tree(grammar: &Grammar) -> Result<TreeNode> {
    verify_grammar(grammar)?;

    Ok(TreeNode {
        children: expand(grammar, &grammar.start_symbol, 0),
        ..TreeNode::new(&grammar.start_symbol)
    })
}

// One node per production of `symbol`. The nonterminals in a right side do
// not get nodes of their own: their productions are hung straight under the
// production that mentions them.
fn expand(grammar: &Grammar, symbol: &str, depth: usize) -> Vec<TreeNode> {
    if depth >= MAX_DEPTH {
        return Vec::new();
    }

    grammar.productions.iter()
        .filter(|p| p.left == symbol)
        .map(|p| {
            let mut node = TreeNode::new(&p.right);
            if depth < MAX_DEPTH - 1 {
                for c in p.right.chars() {
                    let c = c.to_string();
                    if grammar.is_non_terminal(&c) {
                        node.children.extend(expand(grammar, &c, depth + 1));
                    }
                }
            }
            node
        })
        .collect()
}

fn render(node: &TreeNode, prefix: &str, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        writeln!(f)?;
        write!(f, "{}{}{}", prefix, if last { "└── " } else { "├── " }, child.node)?;
        render(child, &format!("{}{}", prefix, if last { "    " } else { "│   " }), f)?;
    }
    Ok(())
}

impl Display for TreeNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.node)?;
        render(self, "", f)
    }
}
