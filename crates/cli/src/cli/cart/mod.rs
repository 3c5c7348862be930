use clap::{Args, Subcommand};

use crate::config::Config;

mod add;
mod clear;
mod remove;
mod set;
mod show;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Add units of a product
    Add(add::AddArgs),
    /// Remove a product's line
    Remove(remove::RemoveArgs),
    /// Overwrite a line's quantity; zero or less removes it
    Set(set::SetArgs),
    /// Empty the cart
    Clear,
    /// Print the cart and its totals
    Show,
}

pub(crate) fn run(command: CartCommand, config: &Config) -> Result<(), String> {
    let mut session = super::open_session(config);

    match command.command {
        CartSubcommand::Add(args) => add::run(args, &mut session),
        CartSubcommand::Remove(args) => remove::run(&args, &mut session),
        CartSubcommand::Set(args) => set::run(&args, &mut session),
        CartSubcommand::Clear => clear::run(&mut session),
        CartSubcommand::Show => show::run(&session),
    }
}
