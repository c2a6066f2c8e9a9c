mod cli;
mod controller;
mod deriver;
mod error_handling;
mod grammar;
mod store;
mod system_info;
mod tree;

use clap::Parser;
use itertools::Itertools;

use cli::{Cli, Command};
use controller::{AppResult, GrammarController};
use error_handling::Highlighted;
use store::JsonFileStore;
use system_info::HostSystemInfo;

fn print_tree(title: &str, tree: Option<grammar::TreeNode>) {
    println!("{}:", title);
    match tree {
        Some(tree) => println!("{}", tree),
        None => println!("(none)")
    }
}

fn run(cli: Cli) -> AppResult<()> {
    let controller = GrammarController::new(JsonFileStore::new(cli.state), HostSystemInfo);

    match cli.command {
        Command::Show => {
            let session = controller.initialize()?;
            println!("{}", session.grammar);
            match session.validation_result {
                Some(result) => println!("Last validation: `{}` ({})", result.final_derivation,
                    if result.is_valid { "accepted" } else { "rejected" }),
                None => println!("Last validation: (none)")
            }
            print_tree("Derivation tree", session.derivation_tree);
            print_tree("General tree", session.general_tree);
        }
        Command::Validate { word } => {
            let result = controller.validate_word(&word)?;
            println!("{}", result.steps.iter().map(|s| &s.symbol).join(" => "));
            if result.is_valid {
                println!("`{}` is generated by the grammar", word);
            } else {
                println!("`{}` is not generated by the grammar (stopped at `{}`)", word, result.final_derivation);
            }
            print_tree("Derivation tree", controller.derivation_tree()?);
            print_tree("General tree", controller.general_tree()?);
        }
        Command::Trees => {
            print_tree("Derivation tree", controller.derivation_tree()?);
            print_tree("General tree", controller.general_tree()?);
        }
        Command::AddTerminal { value } => println!("{}", controller.add_terminal(&value)?),
        Command::AddNonTerminal { value } => println!("{}", controller.add_non_terminal(&value)?),
        Command::AddProduction { left, right } => println!("{}", controller.add_production(&left, &right)?),
        Command::UpdateTerminal { index, value } => println!("{}", controller.update_terminal(index, &value)?),
        Command::UpdateNonTerminal { index, value } => println!("{}", controller.update_non_terminal(index, &value)?),
        Command::UpdateProduction { index, field, value } => {
            println!("{}", controller.update_production(index, field.into(), &value)?)
        }
        Command::SetStart { value } => println!("{}", controller.update_start_symbol(&value)?),
        Command::Reset => println!("{}", controller.reset()?),
        Command::Info => println!("{}", controller.initialize()?.system_info),
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("{}", Highlighted(&e));
        std::process::exit(1);
    }
}
