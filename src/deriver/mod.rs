/*
    This module checks words against a grammar by rewriting the start symbol
*/

use log::{debug, trace};

use crate::grammar::errors::{GrammarErrorType, Result};
use crate::grammar::verifier::verify_grammar;
use crate::grammar::*;

pub const MAX_STEPS: usize = 100;

// Rewrites the first occurrence of the left side of the first production
// that appears anywhere in the sentential form
fn rewrite_once(grammar: &Grammar, current: &str) -> Option<String> {
    grammar.productions.iter()
        .find(|p| current.contains(p.left.as_str()))
        .map(|p| current.replacen(p.left.as_str(), &p.right, 1))
}

// Tries to derive `word` from the start symbol, one substitution at a time.
// There is no backtracking, so grammars that need a different substitution
// order to reach the word are reported as not producing it.
pub fn validate(grammar: &Grammar, word: &str) -> Result<ValidationResult> {
    verify_grammar(grammar)?;

    let mut current = grammar.start_symbol.clone();
    let mut steps = vec![DerivationStep { symbol: current.clone(), step: 0 }];
    let mut is_valid = false;
    let mut step_count = 0;

    while step_count < MAX_STEPS {
        step_count += 1;

        current = match rewrite_once(grammar, &current) {
            Some(next) => next,
            None => break
        };
        trace!("step {}: {}", step_count, current);
        steps.push(DerivationStep { symbol: current.clone(), step: step_count });

        if current == word {
            is_valid = true;
            break;
        }

        // Stop runaway growth
        if current.chars().count() > word.chars().count() * 2 {
            break;
        }
    }

    // Hitting the limit is an error even when the last step found the word
    if step_count >= MAX_STEPS {
        return Err(GrammarErrorType::MaxDerivationStepsExceeded);
    }

    debug!("`{}` {} after {} steps", word, if is_valid { "derived" } else { "not derived" }, steps.len() - 1);

    Ok(ValidationResult {
        is_valid,
        steps,
        final_derivation: current
    })
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;

    fn trace_of(result: &ValidationResult) -> Vec<&str> {
        result.steps.iter().map(|s| s.symbol.as_str()).collect_vec()
    }

    fn grammar_with(rules: &[(&str, &str)], start: &str) -> Grammar {
        let mut non_terminals = rules.iter().map(|(left, _)| *left).unique().map(Symbol::new).collect_vec();
        if !non_terminals.iter().any(|nt| nt.value == start) {
            non_terminals.push(Symbol::new(start));
        }

        Grammar {
            terminals: vec![Symbol::new("a"), Symbol::new("b")],
            non_terminals,
            start_symbol: start.to_string(),
            productions: rules.iter().map(|(left, right)| Production::new(left, right)).collect_vec()
        }
    }

    #[test]
    fn derive_default_grammar() {
        let result = validate(&Grammar::default(), "abab").unwrap();

        assert!(result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "aA", "abB", "abab"]);
        assert_eq!(result.steps.iter().map(|s| s.step).collect_vec(), vec![0, 1, 2, 3]);
        assert_eq!(result.final_derivation, "abab");
    }

    #[test]
    fn stop_when_nothing_matches() {
        let result = validate(&Grammar::default(), "aabab").unwrap();

        assert!(!result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "aA", "abB", "abab"]);
        assert_eq!(result.final_derivation, "abab");
    }

    #[test]
    fn stop_on_growth() {
        let result = validate(&Grammar::default(), "zz").unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.final_derivation, "abab");

        // "aA" is already longer than twice the empty word
        let result = validate(&Grammar::default(), "").unwrap();
        assert!(!result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "aA"]);
    }

    #[test]
    fn stop_on_growth_with_recursion() {
        let grammar = grammar_with(&[("S", "aS")], "S");
        let result = validate(&grammar, "aa").unwrap();

        assert!(!result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "aS", "aaS", "aaaS", "aaaaS"]);
        assert_eq!(result.final_derivation, "aaaaS");
    }

    #[test]
    fn first_production_in_order_wins() {
        // `B` appears first in the sentential form, but `A -> b` is declared
        // before `B -> a`
        let grammar = grammar_with(&[("S", "BA"), ("A", "b"), ("B", "a")], "S");
        let result = validate(&grammar, "ab").unwrap();

        assert!(result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "BA", "Bb", "ab"]);
    }

    #[test]
    fn only_first_occurrence_is_replaced() {
        let grammar = grammar_with(&[("S", "AA"), ("A", "a")], "S");
        let result = validate(&grammar, "aa").unwrap();

        assert!(result.is_valid);
        assert_eq!(trace_of(&result), vec!["S", "AA", "aA", "aa"]);
    }

    #[test]
    fn start_symbol_is_not_checked_against_word() {
        let result = validate(&Grammar::default(), "S").unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.steps[0].symbol, "S");
    }

    #[test]
    fn too_many_steps() {
        // Shrinks back to `S` forever without ever growing
        let grammar = grammar_with(&[("S", "A"), ("A", "S")], "S");
        assert_eq!(validate(&grammar, "ab"), Err(GrammarErrorType::MaxDerivationStepsExceeded));
    }

    // N00 -> N01 -> ... -> N99 -> ab, every form short enough to pass the
    // growth check for the word "ab"
    fn chain_grammar(start: &str) -> Grammar {
        let names = (0..100).map(|i| format!("N{:02}", i)).collect_vec();
        let mut rules = names.iter().tuple_windows()
            .map(|(left, right)| (left.as_str(), right.as_str()))
            .collect_vec();
        rules.push(("N99", "ab"));

        grammar_with(&rules, start)
    }

    #[test]
    fn word_found_on_the_last_step_is_too_late() {
        assert_eq!(validate(&chain_grammar("N00"), "ab"), Err(GrammarErrorType::MaxDerivationStepsExceeded));
    }

    #[test]
    fn word_found_before_the_last_step() {
        let result = validate(&chain_grammar("N50"), "ab").unwrap();

        assert!(result.is_valid);
        assert_eq!(result.steps.len(), 51);
        assert_eq!(result.steps.last().map(|s| s.step), Some(50));
        assert_eq!(result.final_derivation, "ab");
    }

    #[test]
    fn invalid_grammar() {
        let mut grammar = Grammar::default();
        grammar.productions.clear();

        assert_eq!(validate(&grammar, "ab"), Err(GrammarErrorType::InvalidGrammar));
    }

    #[test]
    fn grammar_is_unchanged() {
        let grammar = Grammar::default();
        let before = grammar.clone();

        let result = validate(&grammar, "abab").unwrap();

        assert_eq!(grammar, before);
        assert_eq!(result.steps[0].symbol, grammar.start_symbol);
        assert_eq!(result.steps.last().map(|s| s.symbol.as_str()), Some(result.final_derivation.as_str()));
    }
}
