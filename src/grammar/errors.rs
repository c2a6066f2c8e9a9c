use std::fmt::Display;

use crate::error_handling::ErrorType;

// Which list of symbols an operation was working on
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SymbolClass {
    Terminal,
    NonTerminal,
}

// Why a production was rejected
#[derive(Debug, PartialEq, Clone)]
pub enum ProductionFault {
    // The left side is not a known nonterminal
    UnknownLeft(String),
    // The right side is blank
    EmptyRight,
}

#[derive(Debug, Clone)]
pub enum GrammarErrorType {
    // The grammar failed the structural checks
    InvalidGrammar,
    // A blank value was given for a terminal or nonterminal
    EmptyTerminal(SymbolClass),
    // The value already exists among symbols of the same class
    DuplicateSymbol(String),
    // The start symbol has to be a known nonterminal
    InvalidStartSymbol(String),
    InvalidProduction(ProductionFault),
    // The derivation loop ran out of steps
    MaxDerivationStepsExceeded,
    IndexOutOfRange { collection: &'static str, index: usize },
}

impl ErrorType for GrammarErrorType {}

// Only the kind of error matters when comparing
impl PartialEq for GrammarErrorType {
    fn eq(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl Display for GrammarErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GrammarErrorType::InvalidGrammar => write!(f, "The grammar is not well formed"),
            GrammarErrorType::EmptyTerminal(SymbolClass::Terminal) => write!(f, "Empty terminal symbols are not allowed"),
            GrammarErrorType::EmptyTerminal(SymbolClass::NonTerminal) => write!(f, "Empty nonterminal symbols are not allowed"),
            GrammarErrorType::DuplicateSymbol(symbol) => write!(f, "The symbol `{}` already exists in the grammar", symbol),
            GrammarErrorType::InvalidStartSymbol(symbol) => write!(f, "The start symbol `{}` is not a nonterminal", symbol),
            GrammarErrorType::InvalidProduction(ProductionFault::UnknownLeft(left)) => write!(f, "The left side `{}` of a production must be a nonterminal", left),
            GrammarErrorType::InvalidProduction(ProductionFault::EmptyRight) => write!(f, "The right side of a production can not be empty"),
            GrammarErrorType::MaxDerivationStepsExceeded => write!(f, "Exceeded the maximum number of derivation steps"),
            GrammarErrorType::IndexOutOfRange { collection, index } => write!(f, "No {} at index {}", collection, index),
        }
    }
}

pub type Result<T> = std::result::Result<T, GrammarErrorType>;
