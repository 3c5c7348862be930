use clap::Args;
use kledje::{
    products::ProductId,
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};

#[derive(Debug, Args)]
pub(crate) struct SetArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// New quantity
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) fn run<S, O>(args: &SetArgs, session: &mut CartSession<S, O>) -> Result<(), String>
where
    S: KeyValueStorage,
    O: CartObserver,
{
    session
        .set_quantity(&ProductId::new(args.id.as_str()), args.quantity)
        .map_err(|error| format!("failed to save cart: {error}"))
}
