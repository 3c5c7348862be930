use kledje::{
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};

use crate::cli::console;

#[expect(clippy::print_stdout, reason = "cart listing is command output")]
pub(crate) fn run<S, O>(session: &CartSession<S, O>) -> Result<(), String>
where
    S: KeyValueStorage,
    O: CartObserver,
{
    let rendered = console::render_cart(session.cart())
        .map_err(|error| format!("failed to price cart: {error}"))?;

    println!("{rendered}");

    Ok(())
}
