//! Terminal output

use kledje::{
    cart::Cart,
    pricing::{self, CartSummary, PricingError, format_price},
    session::{CartEvent, CartObserver},
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

/// Prints cart confirmations to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct ConsoleObserver;

impl CartObserver for ConsoleObserver {
    #[expect(clippy::print_stdout, reason = "confirmations are command output")]
    fn notify(&mut self, event: &CartEvent) {
        if let Some(title) = event.title() {
            println!("{title}");
        }

        if let Some(description) = event.description() {
            println!("{description}");
        }
    }
}

/// Cart as a table followed by its totals.
pub(crate) fn render_cart(cart: &Cart) -> Result<String, PricingError> {
    if cart.is_empty() {
        return Ok("السلة فارغة".to_string());
    }

    let mut builder = Builder::default();

    builder.push_record(["#", "المنتج", "الكمية", "سعر الوحدة", "الإجمالي"]);

    for (idx, line) in cart.lines().iter().enumerate() {
        builder.push_record([
            (idx + 1).to_string(),
            line.name().to_string(),
            line.quantity().to_string(),
            price(line.unit_price())?,
            price(pricing::line_total(line)?)?,
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..5), Alignment::right());

    let summary = CartSummary::of(cart)?;

    Ok([
        table.to_string(),
        format!("المجموع الفرعي: {}", format_price(&summary.subtotal)),
        format!("الشحن: {}", summary.shipping.label()),
        format!("الضريبة: {}", summary.tax.label()),
        format!("الإجمالي: {}", format_price(&summary.total)),
        format!("عدد القطع: {}", summary.item_count),
    ]
    .join("\n"))
}

fn price(minor: u64) -> Result<String, PricingError> {
    Ok(format_price(&pricing::money(minor)?))
}
