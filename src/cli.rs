use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::grammar::editor::ProductionField;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// File the grammar and the last results are kept in
    #[arg(long, value_name = "FILE", env = "SENTENTIAL_STATE", default_value = "grammar_state.json", global = true)]
    pub state: PathBuf,

    #[command(subcommand)]
    pub command: Command
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the grammar and the last validation
    Show,

    /// Check whether the grammar derives a word
    Validate {
        word: String
    },

    /// Print the trees of the last validation
    Trees,

    AddTerminal {
        value: String
    },

    AddNonTerminal {
        value: String
    },

    AddProduction {
        left: String,
        right: String
    },

    UpdateTerminal {
        index: usize,
        value: String
    },

    /// Rename a nonterminal, along with the productions and start symbol using it
    UpdateNonTerminal {
        index: usize,
        value: String
    },

    UpdateProduction {
        index: usize,
        #[arg(value_enum)]
        field: Field,
        value: String
    },

    /// Change the start symbol
    SetStart {
        value: String
    },

    /// Go back to the default grammar and forget the last validation
    Reset,

    /// Print what is known about this machine
    Info
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Field {
    Left,
    Right
}

impl From<Field> for ProductionField {
    fn from(field: Field) -> Self {
        match field {
            Field::Left => ProductionField::Left,
            Field::Right => ProductionField::Right,
        }
    }
}
