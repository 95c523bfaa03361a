// 🗂️ Session - the calculator's working state
//
// One explicit struct owned by the front end. Every edit goes through a
// method here; the engine only ever sees a borrowed snapshot.

use crate::config::Settings;
use crate::currency::Currency;
use crate::input::{coerce_bill, coerce_count, coerce_share};
use crate::participants::{ParticipantSet, SharePolicy};
use crate::split::BillState;
use crate::summary::SplitSummary;
use crate::tip::TipSelection;
use rand::Rng;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub total_bill: f64,
    pub currency: Currency,
    pub tip: TipSelection,
    participants: ParticipantSet,
    exempt_index: Option<usize>,
    share_policy: SharePolicy,
    min_people: usize,
    max_people: usize,
}

impl Session {
    pub fn new(settings: &Settings) -> Self {
        Session {
            total_bill: settings.default_bill,
            currency: settings.default_currency,
            tip: TipSelection::from_percentage(settings.default_tip),
            participants: ParticipantSet::with_defaults(settings.initial_people),
            exempt_index: None,
            share_policy: settings.share_policy,
            min_people: settings.min_people,
            max_people: settings.max_people,
        }
    }

    // ------------------------------------------------------------------------
    // Snapshot
    // ------------------------------------------------------------------------

    pub fn bill(&self) -> BillState {
        BillState::new(self.total_bill, self.tip.percentage(), self.currency)
    }

    pub fn participants(&self) -> &ParticipantSet {
        &self.participants
    }

    pub fn num_people(&self) -> usize {
        self.participants.len()
    }

    pub fn exempt_index(&self) -> Option<usize> {
        self.exempt_index
    }

    pub fn is_exempt(&self, index: usize) -> bool {
        self.exempt_index == Some(index)
    }

    /// Evaluate the engine against the current state
    pub fn summary(&self) -> SplitSummary {
        SplitSummary::build(&self.bill(), &self.participants, self.exempt_index)
    }

    // ------------------------------------------------------------------------
    // Bill
    // ------------------------------------------------------------------------

    pub fn set_total_bill(&mut self, raw: &str) {
        self.total_bill = coerce_bill(raw);
    }

    pub fn set_currency(&mut self, currency: Currency) {
        self.currency = currency;
    }

    pub fn set_tip(&mut self, tip: TipSelection) {
        self.tip = tip;
    }

    // ------------------------------------------------------------------------
    // Participants
    // ------------------------------------------------------------------------

    /// Resize to `count`, clamped to the configured bounds.
    /// An exemption that falls off the end is cleared.
    pub fn set_num_people(&mut self, count: usize) {
        let count = count.clamp(self.min_people, self.max_people.max(self.min_people));
        if count == self.participants.len() {
            return;
        }

        debug!(from = self.participants.len(), to = count, "resizing participants");
        self.participants = self.participants.resized(count, self.share_policy);

        if matches!(self.exempt_index, Some(i) if i >= count) {
            self.exempt_index = None;
        }
    }

    pub fn set_num_people_text(&mut self, raw: &str) {
        self.set_num_people(coerce_count(raw));
    }

    pub fn set_share(&mut self, index: usize, raw: &str) {
        self.participants = self.participants.with_share(index, coerce_share(raw));
    }

    pub fn set_name(&mut self, index: usize, name: &str) {
        self.participants = self.participants.with_name(index, name);
    }

    // ------------------------------------------------------------------------
    // Exemption
    // ------------------------------------------------------------------------

    /// Make `index` the only exempt participant. Out-of-range indices are ignored.
    pub fn set_exempt(&mut self, index: Option<usize>) -> bool {
        match index {
            Some(i) if i >= self.participants.len() => false,
            _ => {
                self.exempt_index = index;
                true
            }
        }
    }

    /// Pick a uniformly random exempt participant, replacing any previous one
    pub fn randomize_exempt<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.participants.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.participants.len());
        debug!(index, "randomized exempt participant");
        self.exempt_index = Some(index);
        self.exempt_index
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::SplitAmount;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_initial_state() {
        let session = Session::default();
        let bill = session.bill();

        assert_eq!(bill.total_bill, 100.0);
        assert_eq!(bill.tip_percentage, 15.0);
        assert_eq!(session.participants().shares(), vec![50.0, 50.0]);
        assert_eq!(session.exempt_index(), None);
    }

    #[test]
    fn test_bill_coercion() {
        let mut session = Session::default();
        session.set_total_bill("-5");
        assert_eq!(session.total_bill, 0.0);
        session.set_total_bill("60");
        assert_eq!(session.total_bill, 60.0);
    }

    #[test]
    fn test_num_people_is_clamped() {
        let mut session = Session::default();

        session.set_num_people(1);
        assert_eq!(session.num_people(), 2);

        session.set_num_people(80);
        assert_eq!(session.num_people(), 50);

        session.set_num_people_text("abc");
        assert_eq!(session.num_people(), 2);
    }

    #[test]
    fn test_resize_preserves_edits() {
        let mut session = Session::default();
        session.set_name(0, "Ana");
        session.set_share(0, "70");
        session.set_share(1, "30");

        session.set_num_people(3);

        let set = session.participants();
        assert_eq!(set.names(), vec!["Ana", "Person 2", "Person 3"]);
        assert_eq!(set.get(0).unwrap().share, 70.0);
        assert_eq!(set.get(1).unwrap().share, 30.0);
    }

    #[test]
    fn test_resize_with_even_split_policy() {
        let settings = Settings {
            share_policy: SharePolicy::EvenSplit,
            ..Settings::default()
        };
        let mut session = Session::new(&settings);
        session.set_share(0, "70");
        session.set_share(1, "30");

        session.set_num_people(3);

        let shares: Vec<String> = session.participants().shares().iter().map(|s| format!("{:.2}", s)).collect();
        assert_eq!(shares, vec!["33.33", "33.33", "33.33"]);
    }

    #[test]
    fn test_shrinking_clears_stale_exemption() {
        let mut session = Session::default();
        session.set_num_people(4);
        assert!(session.set_exempt(Some(3)));

        session.set_num_people(3);

        assert_eq!(session.exempt_index(), None);
    }

    #[test]
    fn test_exemption_replaces_previous() {
        let mut session = Session::default();
        session.set_num_people(3);

        session.set_exempt(Some(0));
        session.set_exempt(Some(2));

        assert!(!session.is_exempt(0));
        assert!(session.is_exempt(2));
        assert!(!session.set_exempt(Some(7)));
        assert_eq!(session.exempt_index(), Some(2));
    }

    #[test]
    fn test_randomize_exempt_in_range() {
        let mut session = Session::default();
        session.set_num_people(5);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..50 {
            let picked = session.randomize_exempt(&mut rng).unwrap();
            assert!(picked < 5);
            assert_eq!(session.exempt_index(), Some(picked));
        }
    }

    #[test]
    fn test_summary_uses_current_state() {
        let mut session = Session::default();
        session.set_exempt(Some(0));

        let summary = session.summary();

        assert_eq!(summary.lines[0].amount, SplitAmount::Exempt);
        assert_eq!(summary.lines[1].display, "$115.00");
    }

    #[test]
    fn test_custom_tip() {
        let mut session = Session::default();
        session.set_tip(TipSelection::Custom("0".into()));
        assert_eq!(session.bill().total_amount(), 100.0);
    }
}
