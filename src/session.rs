//! Cart session
//!
//! A [`CartSession`] owns the shopper's cart for the lifetime of one storefront session. Every
//! mutation is written straight through to the [`CartStore`] and reported to a
//! [`CartObserver`], which is where confirmations are shown to the shopper.

use rusty_money::{Money, iso::Currency};
use tracing::{debug, info};

use crate::{
    cart::{Cart, CartLine},
    pricing::{self, CartSummary, PricingError},
    products::{Product, ProductId},
    storage::{CartStore, KeyValueStorage, StorageError},
};

/// Something that happened to the cart which the shopper should hear about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// Units of a product were added.
    ItemAdded {
        /// Product added
        product_id: ProductId,
        /// Product name
        name: String,
        /// Units added by this operation
        quantity: u32,
    },

    /// A product's line was removed.
    ItemRemoved {
        /// Product removed
        product_id: ProductId,
    },

    /// A line's quantity was overwritten.
    QuantityChanged {
        /// Product changed
        product_id: ProductId,
        /// New quantity
        quantity: u32,
    },

    /// The cart was emptied.
    Cleared,
}

impl CartEvent {
    /// Confirmation title shown to the shopper, if the event warrants one.
    pub fn title(&self) -> Option<&'static str> {
        match self {
            Self::ItemAdded { .. } => Some("تمت الإضافة إلى السلة بنجاح"),
            Self::ItemRemoved { .. } => Some("تم حذف المنتج"),
            Self::QuantityChanged { .. } | Self::Cleared => None,
        }
    }

    /// Confirmation body shown to the shopper, if the event warrants one.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::ItemAdded { name, .. } => Some(format!("تم إضافة {name} إلى سلة التسوق")),
            Self::ItemRemoved { .. } => Some("تم حذف المنتج من سلة التسوق".to_string()),
            Self::QuantityChanged { .. } | Self::Cleared => None,
        }
    }
}

/// Receives cart events, e.g. to show a toast.
pub trait CartObserver {
    /// Called after the cart has changed and been saved.
    fn notify(&mut self, event: &CartEvent);
}

/// Observer that writes events to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl CartObserver for TracingObserver {
    fn notify(&mut self, event: &CartEvent) {
        match event.title() {
            Some(title) => info!(?event, title, "cart updated"),
            None => debug!(?event, "cart updated"),
        }
    }
}

impl CartObserver for Vec<CartEvent> {
    fn notify(&mut self, event: &CartEvent) {
        self.push(event.clone());
    }
}

/// The shopper's cart, persisted on every change.
#[derive(Debug)]
pub struct CartSession<S, O = TracingObserver> {
    cart: Cart,
    store: CartStore<S>,
    observer: O,
}

impl<S: KeyValueStorage> CartSession<S> {
    /// Open a session, restoring whatever cart the store holds.
    pub fn open(store: CartStore<S>) -> Self {
        Self::with_observer(store, TracingObserver)
    }
}

impl<S: KeyValueStorage, O: CartObserver> CartSession<S, O> {
    /// Open a session reporting events to `observer`.
    pub fn with_observer(store: CartStore<S>, observer: O) -> Self {
        Self {
            cart: store.load(),
            store,
            observer,
        }
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Backing store.
    pub fn store(&self) -> &CartStore<S> {
        &self.store
    }

    /// Event observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be saved.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<(), StorageError> {
        if self.cart.add_item(product, quantity).is_none() {
            return Ok(());
        }

        debug!(product = %product.id, quantity, "added to cart");

        self.commit(CartEvent::ItemAdded {
            product_id: product.id.clone(),
            name: product.name.clone(),
            quantity,
        })
    }

    /// Remove a product's line; removing an absent product does nothing.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be saved.
    pub fn remove_item(&mut self, product_id: &ProductId) -> Result<(), StorageError> {
        if self.cart.remove_item(product_id).is_none() {
            return Ok(());
        }

        debug!(product = %product_id, "removed from cart");

        self.commit(CartEvent::ItemRemoved {
            product_id: product_id.clone(),
        })
    }

    /// Overwrite a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the cart cannot be saved.
    pub fn set_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: i64,
    ) -> Result<(), StorageError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }

        if !self.cart.set_quantity(product_id, quantity) {
            return Ok(());
        }

        let quantity = self
            .cart
            .line(product_id)
            .map_or(0, CartLine::quantity);

        debug!(product = %product_id, quantity, "cart quantity changed");

        self.commit(CartEvent::QuantityChanged {
            product_id: product_id.clone(),
            quantity,
        })
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a `StorageError` if the empty cart cannot be saved. The in-memory cart is
    /// empty either way.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.cart.clear();

        debug!("cart cleared");

        self.commit(CartEvent::Cleared)
    }

    /// Subtotal of the current cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the total overflows.
    pub fn subtotal(&self) -> Result<Money<'static, Currency>, PricingError> {
        pricing::subtotal(&self.cart)
    }

    /// Units in the current cart.
    pub fn item_count(&self) -> u64 {
        pricing::item_count(&self.cart)
    }

    /// Summary of the current cart.
    ///
    /// # Errors
    ///
    /// Returns a `PricingError` if the total overflows.
    pub fn summary(&self) -> Result<CartSummary, PricingError> {
        CartSummary::of(&self.cart)
    }

    fn commit(&mut self, event: CartEvent) -> Result<(), StorageError> {
        self.store.save(&self.cart)?;
        self.observer.notify(&event);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::storage::MemoryStorage;

    fn session() -> CartSession<MemoryStorage, Vec<CartEvent>> {
        CartSession::with_observer(CartStore::new(MemoryStorage::new()), Vec::new())
    }

    fn lipstick() -> Product {
        Product::new("lip-01", "أحمر شفاه", 12_000)
    }

    #[test]
    fn open_restores_saved_cart() -> TestResult {
        let mut first = session();
        first.add_item(&lipstick(), 2)?;

        let storage = first.store().storage().clone();
        let reopened = CartSession::open(CartStore::new(storage));

        assert_eq!(reopened.cart(), first.cart());

        Ok(())
    }

    #[test]
    fn every_mutation_is_saved() -> TestResult {
        let mut session = session();
        let id = ProductId::from("lip-01");

        session.add_item(&lipstick(), 1)?;
        assert_eq!(&session.store().load(), session.cart());

        session.set_quantity(&id, 4)?;
        assert_eq!(&session.store().load(), session.cart());

        session.remove_item(&id)?;
        assert!(session.store().load().is_empty());

        Ok(())
    }

    #[test]
    fn add_item_notifies_with_confirmation() -> TestResult {
        let mut session = session();

        session.add_item(&lipstick(), 1)?;

        let event = session.observer().first();

        assert_eq!(event.and_then(CartEvent::title), Some("تمت الإضافة إلى السلة بنجاح"));
        assert_eq!(
            event.and_then(CartEvent::description).as_deref(),
            Some("تم إضافة أحمر شفاه إلى سلة التسوق")
        );

        Ok(())
    }

    #[test]
    fn set_quantity_to_zero_reports_removal() -> TestResult {
        let mut session = session();
        let id = ProductId::from("lip-01");

        session.add_item(&lipstick(), 3)?;
        session.set_quantity(&id, 0)?;

        assert!(session.cart().is_empty());
        assert_eq!(
            session.observer().last(),
            Some(&CartEvent::ItemRemoved { product_id: id })
        );

        Ok(())
    }

    #[test]
    fn no_op_operations_do_not_notify() -> TestResult {
        let mut session = session();

        session.add_item(&lipstick(), 0)?;
        session.remove_item(&ProductId::from("missing"))?;
        session.set_quantity(&ProductId::from("missing"), 2)?;

        assert!(session.observer().is_empty());

        Ok(())
    }

    #[test]
    fn totals_follow_the_cart() -> TestResult {
        let mut session = session();

        session.add_item(&lipstick(), 2)?;

        assert_eq!(session.subtotal()?, pricing::money(24_000)?);
        assert_eq!(session.item_count(), 2);

        session.clear()?;

        assert_eq!(session.subtotal()?, pricing::money(0)?);
        assert_eq!(session.observer().last(), Some(&CartEvent::Cleared));

        Ok(())
    }
}
