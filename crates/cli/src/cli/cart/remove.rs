use clap::Args;
use kledje::{
    products::ProductId,
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};

#[derive(Debug, Args)]
pub(crate) struct RemoveArgs {
    /// Product id
    #[arg(long)]
    id: String,
}

pub(crate) fn run<S, O>(args: &RemoveArgs, session: &mut CartSession<S, O>) -> Result<(), String>
where
    S: KeyValueStorage,
    O: CartObserver,
{
    session
        .remove_item(&ProductId::new(args.id.as_str()))
        .map_err(|error| format!("failed to save cart: {error}"))
}
