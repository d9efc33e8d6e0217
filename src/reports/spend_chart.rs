//! Spend chart
//!
//! Renders each category's share of total withdrawals as a vertical ASCII bar
//! chart, with the category names written downwards underneath.

use std::io::Write;

use crate::error::{LedgerError, LedgerResult};
use crate::models::{Category, Money};

/// Chart title, always the first line
pub const CHART_TITLE: &str = "Percentage spent by category";

/// Marker drawn for a filled bar cell (marker plus two spaces)
const FILLED_CELL: &str = "o  ";
/// An empty bar cell
const EMPTY_CELL: &str = "   ";

/// One category's column in the chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartColumn {
    /// Category name
    pub name: String,
    /// Total withdrawn from the category
    pub withdrawals: Money,
    /// Exact share of all withdrawals, 0-100
    pub percentage: f64,
    /// Share rounded down to a multiple of 10
    pub bucket: u8,
}

/// Spend chart over a snapshot of categories
#[derive(Debug, Clone, PartialEq)]
pub struct SpendChart {
    /// Columns in input order
    pub columns: Vec<ChartColumn>,
    /// Sum of withdrawals across every column
    pub total_spent: Money,
}

impl SpendChart {
    /// Build the chart data from categories in display order
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::EmptyCategorySet`] when no categories are given.
    pub fn generate<'a, I>(categories: I) -> LedgerResult<Self>
    where
        I: IntoIterator<Item = &'a Category>,
    {
        let spent: Vec<(String, Money)> = categories
            .into_iter()
            .map(|c| (c.name().to_string(), c.get_withdrawals()))
            .collect();

        if spent.is_empty() {
            return Err(LedgerError::EmptyCategorySet);
        }

        let total_spent: Money = spent.iter().map(|(_, amount)| *amount).sum();

        let columns = spent
            .into_iter()
            .map(|(name, withdrawals)| ChartColumn {
                percentage: percentage_of(withdrawals, total_spent),
                bucket: bucket_of(withdrawals, total_spent),
                name,
                withdrawals,
            })
            .collect();

        Ok(Self {
            columns,
            total_spent,
        })
    }

    /// Length of the longest category name, in characters
    pub fn legend_height(&self) -> usize {
        self.columns
            .iter()
            .map(|c| c.name.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Render the chart as text
    ///
    /// Title, eleven bar rows from 100 down to 0, a dashed separator and the
    /// vertical name legend. The last legend row has no trailing newline.
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(CHART_TITLE);
        output.push('\n');

        for level in (0..=100u8).rev().step_by(10) {
            output.push_str(&format!("{:>3}| ", level));
            for column in &self.columns {
                output.push_str(if column.bucket >= level {
                    FILLED_CELL
                } else {
                    EMPTY_CELL
                });
            }
            output.push('\n');
        }

        output.push_str("    ");
        output.push_str(&"-".repeat(self.columns.len() * 3 + 1));
        output.push('\n');

        let names: Vec<Vec<char>> = self
            .columns
            .iter()
            .map(|c| c.name.chars().collect())
            .collect();
        let legend: Vec<String> = (0..self.legend_height())
            .map(|row| {
                let mut line = String::from("     ");
                for name in &names {
                    match name.get(row) {
                        Some(ch) => {
                            line.push(*ch);
                            line.push_str("  ");
                        }
                        None => line.push_str(EMPTY_CELL),
                    }
                }
                line
            })
            .collect();
        output.push_str(&legend.join("\n"));

        output
    }

    /// Export the chart data to CSV format
    pub fn export_csv<W: Write>(&self, writer: W) -> LedgerResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(["category", "withdrawals", "percentage", "bucket"])?;

        for column in &self.columns {
            csv_writer.write_record([
                column.name.clone(),
                column.withdrawals.to_string(),
                format!("{:.2}", column.percentage),
                column.bucket.to_string(),
            ])?;
        }

        csv_writer
            .flush()
            .map_err(|e| LedgerError::Export(e.to_string()))?;
        Ok(())
    }
}

/// Render the spend chart for `categories`
///
/// # Examples
///
/// ```
/// use spend_ledger::models::{Category, Money};
/// use spend_ledger::reports::create_spend_chart;
///
/// let mut food = Category::new("Food");
/// food.deposit(Money::from_cents(10000), "deposit");
/// food.withdraw(Money::from_cents(2500), "groceries");
///
/// let chart = create_spend_chart([&food]).unwrap();
/// assert!(chart.starts_with("Percentage spent by category\n100| o  \n"));
/// ```
pub fn create_spend_chart<'a, I>(categories: I) -> LedgerResult<String>
where
    I: IntoIterator<Item = &'a Category>,
{
    Ok(SpendChart::generate(categories)?.format_terminal())
}

fn percentage_of(part: Money, total: Money) -> f64 {
    if total.is_positive() {
        part.cents() as f64 / total.cents() as f64 * 100.0
    } else {
        0.0
    }
}

/// Share of `total` rounded down to a multiple of 10, in exact cent arithmetic
fn bucket_of(part: Money, total: Money) -> u8 {
    if !total.is_positive() || !part.is_positive() {
        return 0;
    }
    let tenths = i128::from(part.cents()) * 10 / i128::from(total.cents());
    (tenths.min(10) * 10) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spender(name: &str, spent_cents: i64) -> Category {
        let mut category = Category::new(name);
        category.deposit(Money::from_cents(90000), "deposit");
        category.withdraw(Money::from_cents(spent_cents), "spent");
        category
    }

    fn row<'a>(chart: &'a str, label: &str) -> &'a str {
        let prefix = format!("{:>3}|", label);
        chart
            .lines()
            .find(|line| line.starts_with(&prefix))
            .unwrap()
    }

    #[test]
    fn test_empty_input_is_an_error() {
        let none: Vec<Category> = Vec::new();
        let result = create_spend_chart(&none);
        assert!(matches!(result, Err(LedgerError::EmptyCategorySet)));
    }

    #[test]
    fn test_buckets() {
        let food = spender("Food", 10555);
        let clothing = spender("Clothing", 3340);
        let auto = spender("Auto", 1000);

        let chart = SpendChart::generate([&food, &clothing, &auto]).unwrap();
        assert_eq!(chart.total_spent, Money::from_cents(14895));

        let buckets: Vec<u8> = chart.columns.iter().map(|c| c.bucket).collect();
        assert_eq!(buckets, vec![70, 20, 0]);
        assert!((chart.columns[0].percentage - 70.86).abs() < 0.01);
    }

    #[test]
    fn test_marker_rows() {
        let food = spender("Food", 10555);
        let clothing = spender("Clothing", 3340);
        let auto = spender("Auto", 1000);
        let chart = create_spend_chart([&food, &clothing, &auto]).unwrap();

        assert_eq!(row(&chart, "80"), " 80|          ");
        assert_eq!(row(&chart, "70"), " 70| o        ");
        assert_eq!(row(&chart, "20"), " 20| o  o     ");
        assert_eq!(row(&chart, "0"), "  0| o  o  o  ");
    }

    #[test]
    fn test_full_chart() {
        let business = spender("Business", 1099);
        let food = spender("Food", 10555);
        let entertainment = spender("Entertainment", 3340);

        let chart = create_spend_chart([&business, &food, &entertainment]).unwrap();
        let expected = "Percentage spent by category\n\
                        100|          \n \
                        90|          \n \
                        80|          \n \
                        70|    o     \n \
                        60|    o     \n \
                        50|    o     \n \
                        40|    o     \n \
                        30|    o     \n \
                        20|    o  o  \n \
                        10|    o  o  \n  \
                        0| o  o  o  \n    \
                        ----------\n     \
                        B  F  E  \n     \
                        u  o  n  \n     \
                        s  o  t  \n     \
                        i  d  e  \n     \
                        n     r  \n     \
                        e     t  \n     \
                        s     a  \n     \
                        s     i  \n        \
                        \x20  n  \n        \
                        \x20  m  \n        \
                        \x20  e  \n        \
                        \x20  n  \n        \
                        \x20  t  ";
        assert_eq!(chart, expected);
    }

    #[test]
    fn test_separator_length() {
        let a = spender("A", 100);
        let b = spender("B", 100);
        let chart = create_spend_chart([&a, &b]).unwrap();
        let separator = chart.lines().nth(12).unwrap();
        assert_eq!(separator.len(), 4 + 2 * 3 + 1);
        assert_eq!(separator.trim_start(), "-------");
    }

    #[test]
    fn test_legend_height_matches_longest_name() {
        let short = spender("Gas", 100);
        let long = spender("Groceries", 100);
        let chart = create_spend_chart([&short, &long]).unwrap();

        let legend: Vec<&str> = chart.lines().skip(13).collect();
        assert_eq!(legend.len(), 9);
        assert_eq!(legend[0], "     G  G  ");
        assert_eq!(legend[3], "        c  ");
        assert!(!chart.ends_with('\n'));
    }

    #[test]
    fn test_no_withdrawals_fills_only_zero_row() {
        let mut idle = Category::new("Idle");
        idle.deposit(Money::from_cents(500), "deposit");
        let chart = create_spend_chart([&idle]).unwrap();

        assert_eq!(row(&chart, "10"), " 10|    ");
        assert_eq!(row(&chart, "0"), "  0| o  ");
    }

    #[test]
    fn test_single_spender_reaches_100() {
        let only = spender("Only", 2500);
        let chart = SpendChart::generate([&only]).unwrap();
        assert_eq!(chart.columns[0].bucket, 100);
        let text = chart.format_terminal();
        assert_eq!(row(&text, "100"), "100| o  ");
    }

    #[test]
    fn test_exact_multiples_are_not_rounded_down() {
        // 30% and 70% exactly
        let a = spender("A", 3000);
        let b = spender("B", 7000);
        let chart = SpendChart::generate([&a, &b]).unwrap();
        let buckets: Vec<u8> = chart.columns.iter().map(|c| c.bucket).collect();
        assert_eq!(buckets, vec![30, 70]);
    }

    #[test]
    fn test_accepts_owned_slice() {
        let categories = vec![spender("Food", 100), spender("Auto", 300)];
        let chart = SpendChart::generate(&categories).unwrap();
        assert_eq!(chart.columns.len(), 2);
        assert_eq!(chart.columns[1].bucket, 70);
    }

    #[test]
    fn test_export_csv() {
        let food = spender("Food", 7500);
        let auto = spender("Auto", 2500);
        let chart = SpendChart::generate([&food, &auto]).unwrap();

        let mut output = Vec::new();
        chart.export_csv(&mut output).unwrap();
        let csv = String::from_utf8(output).unwrap();

        assert!(csv.starts_with("category,withdrawals,percentage,bucket\n"));
        assert!(csv.contains("Food,75.00,75.00,70\n"));
        assert!(csv.contains("Auto,25.00,25.00,20\n"));
    }
}
