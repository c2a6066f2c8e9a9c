/*
    Edits on a grammar. Every operation leaves its input alone and returns a
    new grammar.
*/

use super::errors::{GrammarErrorType, ProductionFault, Result, SymbolClass};
use super::{Grammar, Production, Symbol};

// The side of a production to edit
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ProductionField {
    Left,
    Right,
}

fn check_symbol(symbols: &[Symbol], class: SymbolClass, value: &str, skip: Option<usize>) -> Result<()> {
    if value.trim().is_empty() {
        return Err(GrammarErrorType::EmptyTerminal(class));
    }

    let duplicate = symbols.iter()
        .enumerate()
        .any(|(i, s)| s.value == value && Some(i) != skip);
    if duplicate {
        return Err(GrammarErrorType::DuplicateSymbol(value.to_string()));
    }

    Ok(())
}

fn check_index(len: usize, collection: &'static str, index: usize) -> Result<()> {
    if index < len {
        Ok(())
    } else {
        Err(GrammarErrorType::IndexOutOfRange { collection, index })
    }
}

fn check_left(grammar: &Grammar, left: &str) -> Result<()> {
    if grammar.is_non_terminal(left) {
        Ok(())
    } else {
        Err(GrammarErrorType::InvalidProduction(ProductionFault::UnknownLeft(left.to_string())))
    }
}

fn check_right(right: &str) -> Result<()> {
    if right.trim().is_empty() {
        Err(GrammarErrorType::InvalidProduction(ProductionFault::EmptyRight))
    } else {
        Ok(())
    }
}

pub fn add_terminal(grammar: &Grammar, value: &str) -> Result<Grammar> {
    check_symbol(&grammar.terminals, SymbolClass::Terminal, value, None)?;

    let mut terminals = grammar.terminals.clone();
    terminals.push(Symbol::new(value));

    Ok(Grammar { terminals, ..grammar.clone() })
}

pub fn add_non_terminal(grammar: &Grammar, value: &str) -> Result<Grammar> {
    check_symbol(&grammar.non_terminals, SymbolClass::NonTerminal, value, None)?;

    let mut non_terminals = grammar.non_terminals.clone();
    non_terminals.push(Symbol::new(value));

    Ok(Grammar { non_terminals, ..grammar.clone() })
}

pub fn add_production(grammar: &Grammar, left: &str, right: &str) -> Result<Grammar> {
    check_left(grammar, left)?;
    check_right(right)?;

    let mut productions = grammar.productions.clone();
    productions.push(Production::new(left, right));

    Ok(Grammar { productions, ..grammar.clone() })
}

pub fn update_terminal(grammar: &Grammar, index: usize, value: &str) -> Result<Grammar> {
    check_index(grammar.terminals.len(), "terminal", index)?;
    check_symbol(&grammar.terminals, SymbolClass::Terminal, value, Some(index))?;

    let mut terminals = grammar.terminals.clone();
    terminals[index].value = value.to_string();

    Ok(Grammar { terminals, ..grammar.clone() })
}

// Renaming a nonterminal also renames it wherever it is used as a left side
// or as the start symbol
pub fn update_non_terminal(grammar: &Grammar, index: usize, value: &str) -> Result<Grammar> {
    check_index(grammar.non_terminals.len(), "nonterminal", index)?;
    check_symbol(&grammar.non_terminals, SymbolClass::NonTerminal, value, Some(index))?;

    let old_value = &grammar.non_terminals[index].value;

    let mut non_terminals = grammar.non_terminals.clone();
    non_terminals[index].value = value.to_string();

    let productions = grammar.productions.iter()
        .map(|p| if &p.left == old_value {
            Production { left: value.to_string(), ..p.clone() }
        } else {
            p.clone()
        })
        .collect();

    let start_symbol = if &grammar.start_symbol == old_value {
        value.to_string()
    } else {
        grammar.start_symbol.clone()
    };

    Ok(Grammar {
        terminals: grammar.terminals.clone(),
        non_terminals,
        start_symbol,
        productions
    })
}

pub fn update_production(grammar: &Grammar, index: usize, field: ProductionField, value: &str) -> Result<Grammar> {
    check_index(grammar.productions.len(), "production", index)?;

    let mut productions = grammar.productions.clone();
    match field {
        ProductionField::Left => {
            check_left(grammar, value)?;
            productions[index].left = value.to_string();
        }
        ProductionField::Right => {
            check_right(value)?;
            productions[index].right = value.to_string();
        }
    }

    Ok(Grammar { productions, ..grammar.clone() })
}

pub fn update_start_symbol(grammar: &Grammar, value: &str) -> Result<Grammar> {
    if !grammar.is_non_terminal(value) {
        return Err(GrammarErrorType::InvalidStartSymbol(value.to_string()));
    }

    Ok(Grammar { start_symbol: value.to_string(), ..grammar.clone() })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn values(symbols: &[Symbol]) -> Vec<&str> {
        symbols.iter().map(|s| s.value.as_str()).collect_vec()
    }

    fn rules(grammar: &Grammar) -> Vec<(&str, &str)> {
        grammar.productions.iter().map(|p| (p.left.as_str(), p.right.as_str())).collect_vec()
    }

    #[test]
    fn add_symbols() {
        let grammar = Grammar::default();

        let added = add_terminal(&grammar, "c").unwrap();
        assert_eq!(values(&added.terminals), vec!["a", "b", "c"]);
        assert_ne!(added.terminals[2].id, added.terminals[1].id);

        let added = add_non_terminal(&grammar, "C").unwrap();
        assert_eq!(values(&added.non_terminals), vec!["S", "A", "B", "C"]);

        // The input is untouched
        assert_eq!(values(&grammar.terminals), vec!["a", "b"]);
        assert_eq!(values(&grammar.non_terminals), vec!["S", "A", "B"]);
    }

    #[test]
    fn add_bad_symbols() {
        let grammar = Grammar::default();

        assert_eq!(add_terminal(&grammar, ""), Err(GrammarErrorType::EmptyTerminal(SymbolClass::Terminal)));
        assert_eq!(add_terminal(&grammar, "a"), Err(GrammarErrorType::DuplicateSymbol("a".to_string())));
        assert_eq!(add_terminal(&grammar, "   "), Err(GrammarErrorType::EmptyTerminal(SymbolClass::Terminal)));
        assert_eq!(add_non_terminal(&grammar, "S"), Err(GrammarErrorType::DuplicateSymbol("S".to_string())));
        assert!(matches!(
            add_non_terminal(&grammar, " "),
            Err(GrammarErrorType::EmptyTerminal(SymbolClass::NonTerminal))
        ));

        // Uniqueness is only checked within the same class
        assert!(add_non_terminal(&grammar, "a").is_ok());
        assert!(add_terminal(&grammar, "S").is_ok());
    }

    #[test]
    fn add_productions() {
        let grammar = Grammar::default();

        let added = add_production(&grammar, "S", "bS").unwrap();
        assert_eq!(rules(&added).last(), Some(&("S", "bS")));
        assert_eq!(grammar.productions.len(), 3);

        assert!(matches!(
            add_production(&grammar, "Q", "a"),
            Err(GrammarErrorType::InvalidProduction(ProductionFault::UnknownLeft(_)))
        ));
        assert!(matches!(
            add_production(&grammar, "S", " "),
            Err(GrammarErrorType::InvalidProduction(ProductionFault::EmptyRight))
        ));
    }

    #[test]
    fn update_terminals() {
        let grammar = Grammar::default();

        let updated = update_terminal(&grammar, 1, "c").unwrap();
        assert_eq!(values(&updated.terminals), vec!["a", "c"]);
        assert_eq!(updated.terminals[1].id, grammar.terminals[1].id);

        // Setting a symbol to its own value is not a duplicate
        assert!(update_terminal(&grammar, 0, "a").is_ok());

        assert_eq!(update_terminal(&grammar, 0, "b"), Err(GrammarErrorType::DuplicateSymbol("b".to_string())));
        assert_eq!(update_terminal(&grammar, 0, ""), Err(GrammarErrorType::EmptyTerminal(SymbolClass::Terminal)));
        assert!(matches!(
            update_terminal(&grammar, 2, "c"),
            Err(GrammarErrorType::IndexOutOfRange { collection: "terminal", index: 2 })
        ));
    }

    #[test]
    fn rename_non_terminal_cascades() {
        let grammar = add_production(&Grammar::default(), "A", "aA").unwrap();

        let renamed = update_non_terminal(&grammar, 1, "X").unwrap();
        assert_eq!(values(&renamed.non_terminals), vec!["S", "X", "B"]);
        assert_eq!(rules(&renamed), vec![("S", "aA"), ("X", "bB"), ("B", "ab"), ("X", "aA")]);
        assert_eq!(renamed.start_symbol, "S");

        let renamed = update_non_terminal(&grammar, 0, "Z").unwrap();
        assert_eq!(renamed.start_symbol, "Z");
        assert_eq!(rules(&renamed)[0], ("Z", "aA"));

        // The input is untouched
        assert_eq!(grammar.start_symbol, "S");
        assert_eq!(rules(&grammar)[1], ("A", "bB"));
    }

    #[test]
    fn update_bad_non_terminals() {
        let grammar = Grammar::default();

        assert_eq!(update_non_terminal(&grammar, 1, "B"), Err(GrammarErrorType::DuplicateSymbol("B".to_string())));
        assert_eq!(update_non_terminal(&grammar, 1, "\n"), Err(GrammarErrorType::EmptyTerminal(SymbolClass::NonTerminal)));
        assert!(matches!(
            update_non_terminal(&grammar, 3, "C"),
            Err(GrammarErrorType::IndexOutOfRange { collection: "nonterminal", index: 3 })
        ));
    }

    #[test]
    fn update_productions() {
        let grammar = Grammar::default();

        let updated = update_production(&grammar, 2, ProductionField::Left, "S").unwrap();
        assert_eq!(rules(&updated)[2], ("S", "ab"));
        let updated = update_production(&grammar, 2, ProductionField::Right, "ba").unwrap();
        assert_eq!(rules(&updated)[2], ("B", "ba"));
        assert_eq!(rules(&grammar)[2], ("B", "ab"));

        assert!(matches!(
            update_production(&grammar, 0, ProductionField::Left, "a"),
            Err(GrammarErrorType::InvalidProduction(ProductionFault::UnknownLeft(_)))
        ));
        assert!(matches!(
            update_production(&grammar, 0, ProductionField::Right, ""),
            Err(GrammarErrorType::InvalidProduction(ProductionFault::EmptyRight))
        ));
        assert!(matches!(
            update_production(&grammar, 3, ProductionField::Right, "a"),
            Err(GrammarErrorType::IndexOutOfRange { collection: "production", index: 3 })
        ));
    }

    #[test]
    fn update_start() {
        let grammar = Grammar::default();

        assert_eq!(update_start_symbol(&grammar, "B").unwrap().start_symbol, "B");
        assert_eq!(update_start_symbol(&grammar, "a"), Err(GrammarErrorType::InvalidStartSymbol("a".to_string())));
        assert_eq!(update_start_symbol(&grammar, ""), Err(GrammarErrorType::InvalidStartSymbol(String::new())));
    }
}
