// 📋 Split Summary - everything a front end needs to render one evaluation

use crate::angles::{compute_angles, conic_gradient, AngleSpan};
use crate::currency::Currency;
use crate::participants::ParticipantSet;
use crate::split::{compute_split, round_cents, BillState, SplitAmount};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryLine {
    pub name: String,
    pub share: f64,
    pub exempt: bool,
    pub amount: SplitAmount,

    /// Rounded amount with symbol, `--` when undefined
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSummary {
    pub currency: Currency,
    pub symbol: &'static str,
    pub total_bill: f64,
    pub tip_percentage: f64,
    pub tip_amount: f64,
    pub total_amount: f64,
    pub exempt_index: Option<usize>,
    pub lines: Vec<SummaryLine>,
    pub angles: Vec<AngleSpan>,
    pub chart_css: String,
}

impl SplitSummary {
    pub fn build(bill: &BillState, participants: &ParticipantSet, exempt_index: Option<usize>) -> Self {
        let amounts = compute_split(bill, participants, exempt_index);
        let angles = compute_angles(participants.len(), exempt_index);
        let symbol = bill.currency.symbol();

        let lines = participants
            .iter()
            .zip(amounts)
            .enumerate()
            .map(|(i, (participant, amount))| SummaryLine {
                name: participant.name.clone(),
                share: participant.share,
                exempt: Some(i) == exempt_index,
                display: match amount {
                    SplitAmount::Undefined => amount.display(),
                    _ => format!("{}{}", symbol, amount.display()),
                },
                amount,
            })
            .collect();

        SplitSummary {
            currency: bill.currency,
            symbol,
            total_bill: bill.total_bill,
            tip_percentage: bill.tip_percentage,
            tip_amount: bill.tip_amount(),
            total_amount: bill.total_amount(),
            exempt_index,
            lines,
            chart_css: conic_gradient(&angles),
            angles,
        }
    }

    /// `$115.00`
    pub fn money(&self, value: f64) -> String {
        if value.is_finite() {
            format!("{}{:.2}", self.symbol, round_cents(value))
        } else {
            "--".to_string()
        }
    }

    /// Label with the exempt marker, e.g. `Person 1 (Exempt)`
    pub fn line_label(&self, index: usize) -> String {
        match self.lines.get(index) {
            Some(line) if line.exempt => format!("{} (Exempt)", line.name),
            Some(line) => line.name.clone(),
            None => String::new(),
        }
    }

    /// Plain-text rendering, one fact per line
    pub fn render_text(&self) -> Vec<String> {
        let mut out = vec![
            format!("Total Bill: {}", self.money(self.total_bill)),
            format!("Tip Percentage: {}%", self.tip_percentage),
            format!("Tip Amount: {}", self.money(self.tip_amount)),
            format!("Total Amount: {}", self.money(self.total_amount)),
        ];

        for (i, line) in self.lines.iter().enumerate() {
            out.push(format!("{}: {}", self.line_label(i), line.display));
        }

        out
    }
}
