//! Built-in demonstration
//!
//! Exercises the ledger API directly: deposits, withdrawals, a transfer, a
//! rejected withdrawal and the spend chart over three categories.

use crate::error::LedgerResult;
use crate::models::{Category, Money};
use crate::reports::create_spend_chart;

/// Build the demo ledgers and render them with their spend chart
pub fn render_demo() -> LedgerResult<String> {
    let mut food = Category::new("Food");
    food.deposit(Money::from_cents(100000), "initial deposit");
    food.withdraw(Money::from_cents(1015), "groceries");
    food.withdraw(Money::from_cents(1589), "restaurant and more food for dessert");

    let mut clothing = Category::new("Clothing");
    food.transfer(Money::from_cents(5000), &mut clothing);
    clothing.withdraw(Money::from_cents(2555), "");
    clothing.withdraw(Money::from_cents(10000), "");

    let mut auto = Category::new("Auto");
    auto.deposit(Money::from_cents(100000), "initial deposit");
    auto.withdraw(Money::from_cents(1500), "");

    let chart = create_spend_chart([&food, &clothing, &auto])?;

    Ok(format!("{}\n\n{}\n\n{}\n\n{}", food, clothing, auto, chart))
}

/// Handle `ledger demo`
pub fn handle_demo_command() -> LedgerResult<()> {
    println!("{}", render_demo()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_ledgers() {
        let demo = render_demo().unwrap();

        assert!(demo.starts_with(
            "*************Food*************\n\
             initial deposit        1000.00\n\
             groceries               -10.15\n\
             restaurant and more foo -15.89\n\
             Transfer to Clothing    -50.00\n\
             Total: 923.96\n\n"
        ));
        assert!(demo.contains(
            "***********Clothing***********\n\
             Transfer from Food       50.00\n\
             \x20                       -25.55\n\
             Total: 24.45\n\n"
        ));
        assert!(demo.contains("Total: 985.00"));
    }

    #[test]
    fn test_demo_chart() {
        let demo = render_demo().unwrap();
        let chart = &demo[demo.find("Percentage spent by category").unwrap()..];
        let rows: Vec<&str> = chart.lines().collect();

        assert_eq!(rows[5], " 60| o        ");
        assert_eq!(rows[9], " 20| o  o     ");
        assert_eq!(rows[10], " 10| o  o  o  ");
        assert_eq!(rows[12], "    ----------");
        assert_eq!(rows[13], "     F  C  A  ");
        assert_eq!(rows.len(), 13 + "Clothing".len());
    }
}
