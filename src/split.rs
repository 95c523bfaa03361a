// 🧮 Split Engine - bill + tip → amount owed per participant
//
// Pure: takes a snapshot, returns amounts, keeps nothing.
// Full precision internally; rounding to cents only when displayed.

use crate::currency::Currency;
use crate::participants::ParticipantSet;
use serde::{Deserialize, Serialize};

// ============================================================================
// BILL STATE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BillState {
    /// Bill before tip. Callers coerce negatives and garbage to 0.
    pub total_bill: f64,

    /// Tip in percent. Any sign, any size.
    pub tip_percentage: f64,

    #[serde(default)]
    pub currency: Currency,
}

impl BillState {
    pub fn new(total_bill: f64, tip_percentage: f64, currency: Currency) -> Self {
        BillState {
            total_bill,
            tip_percentage,
            currency,
        }
    }

    pub fn tip_amount(&self) -> f64 {
        tip_amount(self)
    }

    pub fn total_amount(&self) -> f64 {
        total_amount(self)
    }
}

impl Default for BillState {
    fn default() -> Self {
        BillState::new(100.0, 15.0, Currency::Usd)
    }
}

pub fn tip_amount(bill: &BillState) -> f64 {
    bill.total_bill * bill.tip_percentage / 100.0
}

pub fn total_amount(bill: &BillState) -> f64 {
    bill.total_bill + tip_amount(bill)
}

/// Round to 2 decimals, halves away from zero
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// SPLIT AMOUNT
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum SplitAmount {
    /// Full-precision amount owed
    Owed(f64),

    /// Exempt participant, always exactly zero
    Exempt,

    /// Not computable: remaining shares sum to zero, or inputs were NaN
    Undefined,
}

impl SplitAmount {
    /// Numeric value, `None` when undefined
    pub fn value(&self) -> Option<f64> {
        match self {
            SplitAmount::Owed(amount) => Some(*amount),
            SplitAmount::Exempt => Some(0.0),
            SplitAmount::Undefined => None,
        }
    }

    /// Value rounded to cents
    pub fn rounded(&self) -> Option<f64> {
        self.value().map(round_cents)
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SplitAmount::Undefined)
    }

    /// `12.50`, or `--` when undefined
    pub fn display(&self) -> String {
        match self.rounded() {
            Some(amount) => format!("{:.2}", amount),
            None => "--".to_string(),
        }
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Sum of share weights, skipping the exempt participant
pub fn total_shares(participants: &ParticipantSet, exempt_index: Option<usize>) -> f64 {
    participants
        .iter()
        .enumerate()
        .filter(|(i, _)| Some(*i) != exempt_index)
        .map(|(_, p)| p.share)
        .sum()
}

/// Amount owed by each participant, in input order.
///
/// Non-exempt participant `i` owes `total_amount * share[i] / total_shares`.
/// When the remaining shares sum to zero every non-exempt amount is
/// [`SplitAmount::Undefined`] rather than falling back to an even split.
pub fn compute_split(
    bill: &BillState,
    participants: &ParticipantSet,
    exempt_index: Option<usize>,
) -> Vec<SplitAmount> {
    let total = total_amount(bill);
    let shares = total_shares(participants, exempt_index);

    participants
        .iter()
        .enumerate()
        .map(|(i, participant)| {
            if Some(i) == exempt_index {
                return SplitAmount::Exempt;
            }
            if shares == 0.0 {
                return SplitAmount::Undefined;
            }
            let owed = total * participant.share / shares;
            if owed.is_finite() {
                SplitAmount::Owed(owed)
            } else {
                SplitAmount::Undefined
            }
        })
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
