//! Message builders.

use std::fmt::Write as _;

use crate::{
    domain::orders::records::OrderDetail,
    mailer::Email,
};

/// Format minor units as a decimal amount, e.g. `1234` as `12.34`.
pub fn format_money(amount: u64) -> String {
    format!("{}.{:02}", amount / 100, amount % 100)
}

/// Notice carrying a password reset token.
pub fn password_reset(name: &str, to: &str, token: &str) -> Email {
    Email {
        to: to.to_string(),
        subject: "Reset your Mayfield password".to_string(),
        body: format!(
            "Hi {name},\n\n\
             Use the code below to choose a new password. It expires in one hour.\n\n\
             {token}\n\n\
             If you did not ask to reset your password you can ignore this email.\n"
        ),
    }
}

/// Confirmation sent to the shipping contact once an order is placed.
pub fn order_confirmation(order: &OrderDetail) -> Email {
    let mut body = format!(
        "Hi {},\n\nThanks for your order {}. We'll let you know when it ships.\n\n",
        order.order.shipping.full_name, order.order.order_number
    );

    for item in &order.items {
        // Writing to a String cannot fail.
        let _ignored = writeln!(
            body,
            "{} x {} @ {}",
            item.quantity,
            item.product_name,
            format_money(item.price)
        );
    }

    let totals = &order.order.totals;

    let _ignored = write!(
        body,
        "\nSubtotal: {}\nShipping: {}\nTax: {}\nTotal: {}\n",
        format_money(totals.subtotal),
        format_money(totals.shipping),
        format_money(totals.tax),
        format_money(totals.total)
    );

    Email {
        to: order.order.shipping.email.clone(),
        subject: format!("Your Mayfield order {}", order.order.order_number),
        body,
    }
}
