/*
    This module persists the grammar and the results of the last validation
*/

use std::fmt::Display;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error_handling::*;
use crate::grammar::*;

#[derive(Debug)]
pub enum StoreErrorType {
    // The state file could not be read or written
    FileError(std::io::Error),
    // The state file is not a state document
    Malformed(serde_json::Error),
}

impl ErrorType for StoreErrorType {}

impl PartialEq for StoreErrorType {
    fn eq(&self, other: &Self) -> bool {
        if let StoreErrorType::FileError(a) = self {
            if let StoreErrorType::FileError(b) = other {
                return a.kind() == b.kind();
            }
        }
        return std::mem::discriminant(self) == std::mem::discriminant(other);
    }
}

impl Display for StoreErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreErrorType::FileError(e) => write!(f, "File error: {}", e),
            StoreErrorType::Malformed(e) => write!(f, "Malformed state: {}", e),
        }
    }
}

pub type StoreError = Error<StoreErrorType>;
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// Where the grammar and the last results live between runs
pub trait StateStore {
    // Returns the default grammar if none has been saved
    fn load_grammar(&self) -> StoreResult<Grammar>;
    fn save_grammar(&self, grammar: &Grammar) -> StoreResult<()>;

    fn load_validation_result(&self) -> StoreResult<Option<ValidationResult>>;
    fn save_validation_result(&self, result: &ValidationResult) -> StoreResult<()>;

    fn load_derivation_tree(&self) -> StoreResult<Option<TreeNode>>;
    fn save_derivation_tree(&self, tree: Option<&TreeNode>) -> StoreResult<()>;

    fn load_general_tree(&self) -> StoreResult<Option<TreeNode>>;
    fn save_general_tree(&self, tree: Option<&TreeNode>) -> StoreResult<()>;

    // Forgets everything, including the grammar
    fn clear(&self) -> StoreResult<()>;
}

// Everything that gets stored, one optional record per key. An unreadable
// result or tree is dropped; an unreadable grammar is an error.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grammar: Option<Grammar>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub validation_result: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub derivation_tree: Option<TreeNode>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub general_tree: Option<TreeNode>,
}

fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value)
        .map_err(|e| warn!("Dropping unreadable stored record: {}", e))
        .ok())
}

// Implements the store in terms of reading and replacing the whole state
pub trait StateDocument {
    fn read(&self) -> StoreResult<State>;
    fn write(&self, state: &State) -> StoreResult<()>;

    fn update(&self, change: impl FnOnce(&mut State)) -> StoreResult<()> {
        let mut state = self.read()?;
        change(&mut state);
        self.write(&state)
    }
}

impl<T: StateDocument> StateStore for T {
    fn load_grammar(&self) -> StoreResult<Grammar> {
        Ok(self.read()?.grammar.unwrap_or_else(|| {
            debug!("No saved grammar, using the default");
            Grammar::default()
        }))
    }

    fn save_grammar(&self, grammar: &Grammar) -> StoreResult<()> {
        self.update(|state| state.grammar = Some(grammar.clone()))
    }

    fn load_validation_result(&self) -> StoreResult<Option<ValidationResult>> {
        Ok(self.read()?.validation_result)
    }

    fn save_validation_result(&self, result: &ValidationResult) -> StoreResult<()> {
        self.update(|state| state.validation_result = Some(result.clone()))
    }

    fn load_derivation_tree(&self) -> StoreResult<Option<TreeNode>> {
        Ok(self.read()?.derivation_tree)
    }

    fn save_derivation_tree(&self, tree: Option<&TreeNode>) -> StoreResult<()> {
        self.update(|state| state.derivation_tree = tree.cloned())
    }

    fn load_general_tree(&self) -> StoreResult<Option<TreeNode>> {
        Ok(self.read()?.general_tree)
    }

    fn save_general_tree(&self, tree: Option<&TreeNode>) -> StoreResult<()> {
        self.update(|state| state.general_tree = tree.cloned())
    }

    fn clear(&self) -> StoreResult<()> {
        self.write(&State::default())
    }
}

// Keeps the state as a JSON document in a single file
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        JsonFileStore { path }
    }

    fn io_error(&self, error: std::io::Error) -> StoreError {
        StoreError {
            location: Location::file(self.path.clone()),
            error: StoreErrorType::FileError(error)
        }
    }

    fn json_error(&self, error: serde_json::Error) -> StoreError {
        StoreError {
            location: Location {
                file: self.path.clone(),
                line: error.line()
            },
            error: StoreErrorType::Malformed(error)
        }
    }
}

impl StateDocument for JsonFileStore {
    fn read(&self) -> StoreResult<State> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            // First run
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(State::default()),
            Err(e) => return Err(self.io_error(e))
        };

        serde_json::from_str(&text).map_err(|e| self.json_error(e))
    }

    fn write(&self, state: &State) -> StoreResult<()> {
        let text = serde_json::to_string_pretty(state).map_err(|e| self.json_error(e))?;
        fs::write(&self.path, text).map_err(|e| self.io_error(e))?;
        debug!("Saved state to {}", self.path.display());
        Ok(())
    }
}

// Keeps the state in memory, for when nothing should outlive the process
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    state: std::cell::RefCell<State>,
}

#[cfg(test)]
impl StateDocument for MemoryStore {
    fn read(&self) -> StoreResult<State> {
        Ok(self.state.borrow().clone())
    }

    fn write(&self, state: &State) -> StoreResult<()> {
        *self.state.borrow_mut() = state.clone();
        Ok(())
    }
}
