use super::Grammar;
use super::errors::{GrammarErrorType, Result};

fn has_symbols(grammar: &Grammar) -> bool {
    !grammar.terminals.is_empty() && !grammar.non_terminals.is_empty()
}

fn has_valid_start(grammar: &Grammar) -> bool {
    grammar.is_non_terminal(&grammar.start_symbol)
}

fn has_valid_productions(grammar: &Grammar) -> bool {
    // Every left side has to be a known nonterminal and no right side may
    // be blank
    !grammar.productions.is_empty()
        && grammar.productions.iter()
            .all(|p| grammar.is_non_terminal(&p.left) && !p.right.trim().is_empty())
}

pub fn is_well_formed(grammar: &Grammar) -> bool {
    has_symbols(grammar) && has_valid_start(grammar) && has_valid_productions(grammar)
}

// Gate used before anything works on the grammar
pub fn verify_grammar(grammar: &Grammar) -> Result<()> {
    if is_well_formed(grammar) {
        Ok(())
    } else {
        Err(GrammarErrorType::InvalidGrammar)
    }
}
