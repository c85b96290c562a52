use crate::model::{format_amount, Kind, Totals};

/// Headroom above the tallest bar so its value label is not clipped.
pub const HEADROOM: f64 = 1.2;

/// Axis ceiling used when both totals are zero.
pub const MIN_CEILING: f64 = 10.0;

pub const TITLE: &str = "Total Income and Expense";

#[derive(Debug, Clone, PartialEq)]
pub struct ChartBar {
    pub kind: Kind,
    pub value: f64,
    pub label: String,
}

/// All-time income vs expense comparison, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub bars: [ChartBar; 2],
    pub ceiling: f64,
}

impl ChartData {
    pub fn from_totals(totals: &Totals, currency: &str) -> Self {
        let bars = Kind::ALL.map(|kind| {
            let value = totals.get(kind);
            ChartBar {
                kind,
                value,
                label: format_amount(value, currency),
            }
        });

        let peak = totals.income.max(totals.expense);
        let ceiling = if peak > 0.0 { peak * HEADROOM } else { MIN_CEILING };

        Self { bars, ceiling }
    }

    pub fn bar(&self, kind: Kind) -> &ChartBar {
        match kind {
            Kind::Income => &self.bars[0],
            Kind::Expense => &self.bars[1],
        }
    }

    /// Bar height as a fraction of the axis, in `0.0..=1.0`.
    pub fn fill_ratio(&self, kind: Kind) -> f64 {
        (self.bar(kind).value / self.ceiling).clamp(0.0, 1.0)
    }
}

impl Default for ChartData {
    fn default() -> Self {
        Self::from_totals(&Totals::default(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceiling_leaves_headroom() {
        let chart = ChartData::from_totals(
            &Totals {
                income: 5000.0,
                expense: 1500.0,
            },
            "TL",
        );

        assert_eq!(chart.ceiling, 6000.0);
        assert_eq!(chart.bar(Kind::Income).label, "5000.00 TL");
        assert_eq!(chart.bar(Kind::Expense).value, 1500.0);
        assert_eq!(chart.fill_ratio(Kind::Expense), 0.25);
        assert!(chart.fill_ratio(Kind::Income) < 1.0);
    }

    #[test]
    fn test_expense_peak() {
        let chart = ChartData::from_totals(
            &Totals {
                income: 0.0,
                expense: 50.0,
            },
            "",
        );
        assert_eq!(chart.ceiling, 60.0);
        assert_eq!(chart.bar(Kind::Income).label, "0.00");
    }

    #[test]
    fn test_empty_uses_minimum_ceiling() {
        let chart = ChartData::default();
        assert_eq!(chart.ceiling, MIN_CEILING);
        assert_eq!(chart.fill_ratio(Kind::Income), 0.0);
        assert_eq!(chart.bars[0].kind, Kind::Income);
        assert_eq!(chart.bars[1].kind, Kind::Expense);
    }
}
