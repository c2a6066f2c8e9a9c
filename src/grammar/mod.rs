/*
    This module is for storing and manipulating grammars
*/

pub mod editor;
pub mod errors;
pub mod verifier;

use std::fmt::Display;

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

// A terminal or nonterminal. Which one it is depends on the list it lives in
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Symbol {
    pub id: String,
    pub value: String,
}

impl Symbol {
    pub fn new(value: &str) -> Self {
        Symbol {
            id: fresh_id(),
            value: value.to_string()
        }
    }
}

// A rewrite rule `left -> right`
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Production {
    pub id: String,
    pub left: String,
    pub right: String,
}

impl Production {
    pub fn new(left: &str, right: &str) -> Self {
        Production {
            id: fresh_id(),
            left: left.to_string(),
            right: right.to_string()
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grammar {
    pub terminals: Vec<Symbol>,
    pub non_terminals: Vec<Symbol>,
    pub start_symbol: String,
    pub productions: Vec<Production>,
}

impl Grammar {
    pub fn is_non_terminal(&self, value: &str) -> bool {
        self.non_terminals.iter().any(|nt| nt.value == value)
    }
}

impl Default for Grammar {
    // The grammar used before anything has been saved
    fn default() -> Self {
        Grammar {
            terminals: vec![Symbol::new("a"), Symbol::new("b")],
            non_terminals: vec![Symbol::new("S"), Symbol::new("A"), Symbol::new("B")],
            start_symbol: "S".to_string(),
            productions: vec![
                Production::new("S", "aA"),
                Production::new("A", "bB"),
                Production::new("B", "ab")
            ]
        }
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "T = {{{}}}", self.terminals.iter().map(|t| &t.value).join(", "))?;
        writeln!(f, "N = {{{}}}", self.non_terminals.iter().map(|nt| &nt.value).join(", "))?;
        writeln!(f, "S = {}", self.start_symbol)?;
        writeln!(f, "P = {{")?;
        for (index, production) in self.productions.iter().enumerate() {
            writeln!(f, "  [{}] {} -> {}", index, production.left, production.right)?;
        }
        write!(f, "}}")
    }
}

// One sentential form and its position in a derivation
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct DerivationStep {
    pub symbol: String,
    pub step: usize,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub steps: Vec<DerivationStep>,
    pub final_derivation: String,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    pub id: String,
    pub node: String,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(node: &str) -> Self {
        TreeNode {
            id: fresh_id(),
            node: node.to_string(),
            children: Vec::new()
        }
    }
}

// Random version 4 uuid, formatted the usual way
pub fn fresh_id() -> String {
    let bits: u128 = rand::thread_rng().gen();
    // Bits 76..80 hold the version nibble (4), bits 62..64 the variant (0b10)
    let bits = (bits & !(0xf << 76) & !(0x3 << 62)) | (0x4 << 76) | (0x2 << 62);
    let hex = format!("{:032x}", bits);

    format!("{}-{}-{}-{}-{}", &hex[0..8], &hex[8..12], &hex[12..16], &hex[16..20], &hex[20..32])
}
