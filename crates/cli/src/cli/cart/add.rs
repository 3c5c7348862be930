use clap::Args;
use kledje::{
    pricing,
    products::Product,
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};
use rust_decimal::Decimal;

#[derive(Debug, Args)]
pub(crate) struct AddArgs {
    /// Product id
    #[arg(long)]
    id: String,

    /// Product name
    #[arg(long)]
    name: String,

    /// Unit price in pounds, e.g. 149.99
    #[arg(long)]
    price: Decimal,

    /// Product image URL
    #[arg(long)]
    image: Option<String>,

    /// Units to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

pub(crate) fn run<S, O>(args: AddArgs, session: &mut CartSession<S, O>) -> Result<(), String>
where
    S: KeyValueStorage,
    O: CartObserver,
{
    let price = pricing::minor_units(args.price)
        .map_err(|error| format!("invalid price {}: {error}", args.price))?;

    let product = Product::new(args.id, args.name, price);
    let product = match args.image {
        Some(image) => product.with_image(image),
        None => product,
    };

    session
        .add_item(&product, args.quantity)
        .map_err(|error| format!("failed to save cart: {error}"))
}
