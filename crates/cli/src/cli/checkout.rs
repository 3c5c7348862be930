use clap::Args;
use kledje::{
    checkout::CustomerInfo,
    orders::{MemoryOrderStore, OrderId, OrderStore, RestOrderStore},
    session::{CartObserver, CartSession},
    storage::KeyValueStorage,
    submission::Checkout,
};

use crate::{cli::console, config::Config};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// First name
    #[arg(long)]
    first_name: Option<String>,

    /// Family name
    #[arg(long)]
    last_name: Option<String>,

    /// Mobile number, e.g. 01012345678
    #[arg(long)]
    phone: Option<String>,

    /// Contact email
    #[arg(long)]
    email: Option<String>,

    /// Governorate, see `kledje cities`
    #[arg(long)]
    city: Option<String>,

    /// Street address
    #[arg(long)]
    address: Option<String>,

    /// Delivery notes
    #[arg(long)]
    notes: Option<String>,
}

impl CheckoutArgs {
    fn customer_info(self) -> CustomerInfo {
        CustomerInfo {
            first_name: self.first_name.unwrap_or_default(),
            last_name: self.last_name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            email: self.email,
            city: self.city.unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            notes: self.notes,
        }
    }
}

#[expect(clippy::print_stdout, reason = "order confirmation is command output")]
pub(crate) async fn run(args: CheckoutArgs, config: &Config) -> Result<(), String> {
    let mut session = super::open_session(config);
    let customer = args.customer_info();
    let timeout = config.orders.submit_timeout();

    let summary = console::render_cart(session.cart())
        .map_err(|error| format!("failed to price cart: {error}"))?;

    let id = if let Some(rest) = config.orders.rest()? {
        let store = RestOrderStore::new(rest)
            .map_err(|error| format!("failed to build order store client: {error}"))?;
        let mut checkout = Checkout::new(store).with_timeout(timeout);

        place(&mut checkout, &mut session, &customer).await?
    } else {
        let mut checkout = Checkout::new(MemoryOrderStore::new()).with_timeout(timeout);
        let id = place(&mut checkout, &mut session, &customer).await?;

        for order in checkout.store().orders() {
            let json = serde_json::to_string_pretty(&order)
                .map_err(|error| format!("failed to encode order: {error}"))?;

            println!("{json}");
        }

        id
    };

    println!("{summary}");
    println!("تم إرسال طلبك بنجاح!");
    println!("رقم الطلب: {id}");

    Ok(())
}

async fn place<St, S, O>(
    checkout: &mut Checkout<St>,
    session: &mut CartSession<S, O>,
    customer: &CustomerInfo,
) -> Result<OrderId, String>
where
    St: OrderStore,
    S: KeyValueStorage,
    O: CartObserver,
{
    checkout
        .submit(session, customer)
        .await
        .map_err(|error| format!("خطأ في الطلب: {}", error.user_message()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_arguments_become_blank_fields() {
        let args = CheckoutArgs {
            first_name: Some("نور".to_string()),
            last_name: None,
            phone: Some("01112345678".to_string()),
            email: None,
            city: None,
            address: None,
            notes: Some("الدور الثالث".to_string()),
        };

        let info = args.customer_info();

        assert_eq!(info.first_name, "نور");
        assert!(info.last_name.is_empty(), "last name should be blank");
        assert_eq!(info.email, None);
        assert_eq!(info.notes.as_deref(), Some("الدور الثالث"));
    }
}
