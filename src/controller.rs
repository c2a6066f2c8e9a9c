/*
    Ties the grammar operations to the state store. Grammar errors are passed
    on as they are; anything going wrong underneath is reported as a failure
    of the action that was attempted.
*/

use std::fmt::Display;

use log::{info, warn};

use crate::deriver;
use crate::error_handling::ErrorType;
use crate::grammar::editor::{self, ProductionField};
use crate::grammar::errors::GrammarErrorType;
use crate::grammar::*;
use crate::store::{StateStore, StoreError};
use crate::system_info::{SystemInfo, SystemInfoProvider};
use crate::tree;

#[derive(Debug, PartialEq)]
pub enum AppErrorType {
    Grammar(GrammarErrorType),
    // Something outside the grammar operations went wrong
    Failure { action: &'static str, cause: String },
}

impl ErrorType for AppErrorType {}

impl Display for AppErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppErrorType::Grammar(e) => write!(f, "{}", e),
            AppErrorType::Failure { action, cause } => write!(f, "Could not {}: {}", action, cause),
        }
    }
}

impl From<GrammarErrorType> for AppErrorType {
    fn from(error: GrammarErrorType) -> Self {
        AppErrorType::Grammar(error)
    }
}

pub type AppResult<T> = std::result::Result<T, AppErrorType>;

fn failure(action: &'static str) -> impl FnOnce(StoreError) -> AppErrorType {
    move |error| AppErrorType::Failure { action, cause: error.to_string() }
}

// Runs an action, logging it if it fails
fn attempt<T>(action: &'static str, run: impl FnOnce() -> AppResult<T>) -> AppResult<T> {
    let result = run();
    if let Err(e) = &result {
        warn!("Failed to {}: {}", action, e);
    }
    result
}

// Everything there is to show when starting up
#[derive(Debug)]
pub struct Session {
    pub grammar: Grammar,
    pub validation_result: Option<ValidationResult>,
    pub derivation_tree: Option<TreeNode>,
    pub general_tree: Option<TreeNode>,
    pub system_info: SystemInfo,
}

pub struct GrammarController<S: StateStore, I: SystemInfoProvider> {
    store: S,
    system_info: I,
}

impl<S: StateStore, I: SystemInfoProvider> GrammarController<S, I> {
    pub fn new(store: S, system_info: I) -> Self {
        GrammarController { store, system_info }
    }

    pub fn initialize(&self) -> AppResult<Session> {
        const ACTION: &str = "initialize";
        attempt(ACTION, || Ok(Session {
            grammar: self.store.load_grammar().map_err(failure(ACTION))?,
            validation_result: self.store.load_validation_result().map_err(failure(ACTION))?,
            derivation_tree: self.store.load_derivation_tree().map_err(failure(ACTION))?,
            general_tree: self.store.load_general_tree().map_err(failure(ACTION))?,
            system_info: self.system_info.system_info(),
        }))
    }

    // Validates the word against the stored grammar and stores the result
    // together with both trees
    pub fn validate_word(&self, word: &str) -> AppResult<ValidationResult> {
        const ACTION: &str = "validate word";
        attempt(ACTION, || {
            let grammar = self.store.load_grammar().map_err(failure(ACTION))?;
            let result = deriver::validate(&grammar, word)?;
            self.store.save_validation_result(&result).map_err(failure(ACTION))?;

            let derivation_tree = tree::build_derivation_tree(&result.steps);
            let general_tree = tree::build_general_tree(&grammar)?;
            self.store.save_derivation_tree(derivation_tree.as_ref()).map_err(failure(ACTION))?;
            self.store.save_general_tree(Some(&general_tree)).map_err(failure(ACTION))?;

            info!("Validated `{}`: {}", word, if result.is_valid { "accepted" } else { "rejected" });
            Ok(result)
        })
    }

    // Loads the grammar, applies `edit` and saves what comes out
    fn edit(&self, action: &'static str, edit: impl FnOnce(&Grammar) -> errors::Result<Grammar>) -> AppResult<Grammar> {
        attempt(action, || {
            let grammar = self.store.load_grammar().map_err(failure(action))?;
            let updated = edit(&grammar)?;
            self.store.save_grammar(&updated).map_err(failure(action))?;
            Ok(updated)
        })
    }

    pub fn add_terminal(&self, value: &str) -> AppResult<Grammar> {
        self.edit("add terminal", |g| editor::add_terminal(g, value))
    }

    pub fn add_non_terminal(&self, value: &str) -> AppResult<Grammar> {
        self.edit("add nonterminal", |g| editor::add_non_terminal(g, value))
    }

    pub fn add_production(&self, left: &str, right: &str) -> AppResult<Grammar> {
        self.edit("add production", |g| editor::add_production(g, left, right))
    }

    pub fn update_terminal(&self, index: usize, value: &str) -> AppResult<Grammar> {
        self.edit("update terminal", |g| editor::update_terminal(g, index, value))
    }

    pub fn update_non_terminal(&self, index: usize, value: &str) -> AppResult<Grammar> {
        self.edit("update nonterminal", |g| editor::update_non_terminal(g, index, value))
    }

    pub fn update_production(&self, index: usize, field: ProductionField, value: &str) -> AppResult<Grammar> {
        self.edit("update production", |g| editor::update_production(g, index, field, value))
    }

    pub fn update_start_symbol(&self, value: &str) -> AppResult<Grammar> {
        self.edit("update start symbol", |g| editor::update_start_symbol(g, value))
    }

    pub fn derivation_tree(&self) -> AppResult<Option<TreeNode>> {
        attempt("load derivation tree", || self.store.load_derivation_tree().map_err(failure("load derivation tree")))
    }

    pub fn general_tree(&self) -> AppResult<Option<TreeNode>> {
        attempt("load general tree", || self.store.load_general_tree().map_err(failure("load general tree")))
    }

    // Back to the default grammar with no results
    pub fn reset(&self) -> AppResult<Grammar> {
        const ACTION: &str = "reset";
        attempt(ACTION, || {
            self.store.clear().map_err(failure(ACTION))?;
            let grammar = Grammar::default();
            self.store.save_grammar(&grammar).map_err(failure(ACTION))?;
            Ok(grammar)
        })
    }
}
