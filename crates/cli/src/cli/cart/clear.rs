use kledje::{
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
};

pub(crate) fn run<S, O>(session: &mut CartSession<S, O>) -> Result<(), String>
where
    S: KeyValueStorage,
    O: CartObserver,
{
    session
        .clear()
        .map_err(|error| format!("failed to save cart: {error}"))
}
