// 👥 Participants - who is splitting the bill
//
// The set is a value: edits return a new set instead of mutating in place.

use serde::{Deserialize, Serialize};

// ============================================================================
// PARTICIPANT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    /// Free-text label
    pub name: String,

    /// Share weight. Not required to sum to 100 across the set.
    #[serde(default)]
    pub share: f64,
}

impl Participant {
    pub fn new(name: impl Into<String>, share: f64) -> Self {
        Participant {
            name: name.into(),
            share,
        }
    }

    /// Default label for a 0-based position: `Person {position + 1}`
    pub fn default_name(position: usize) -> String {
        format!("Person {}", position + 1)
    }
}

// ============================================================================
// SHARE POLICY
// ============================================================================

/// What happens to existing share weights when the participant count changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharePolicy {
    /// Keep existing weights; only new participants get `100 / count`
    #[default]
    PreserveExisting,

    /// Reset every participant to `100 / count`
    EvenSplit,
}

// ============================================================================
// PARTICIPANT SET
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantSet {
    participants: Vec<Participant>,
}

impl ParticipantSet {
    pub fn new(participants: Vec<Participant>) -> Self {
        ParticipantSet { participants }
    }

    /// `count` default participants with an even split
    pub fn with_defaults(count: usize) -> Self {
        ParticipantSet::default().resized(count, SharePolicy::PreserveExisting)
    }

    /// Build from parallel name/share lists. Missing names get the default label.
    pub fn from_shares(shares: &[f64], names: &[String]) -> Self {
        let participants = shares
            .iter()
            .enumerate()
            .map(|(i, share)| {
                let name = names
                    .get(i)
                    .filter(|n| !n.trim().is_empty())
                    .cloned()
                    .unwrap_or_else(|| Participant::default_name(i));
                Participant::new(name, *share)
            })
            .collect();
        ParticipantSet { participants }
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Participant> {
        self.participants.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Participant> {
        self.participants.iter()
    }

    pub fn shares(&self) -> Vec<f64> {
        self.participants.iter().map(|p| p.share).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    /// Resize to `count`, keeping entries by position.
    ///
    /// Growing appends `Person N` participants with share `100 / count`;
    /// shrinking truncates from the end. Under [`SharePolicy::EvenSplit`]
    /// every share is reset to `100 / count` whenever the count changes.
    pub fn resized(&self, count: usize, policy: SharePolicy) -> Self {
        let even = 100.0 / count as f64;
        let mut participants = self.participants.clone();

        participants.truncate(count);
        while participants.len() < count {
            let position = participants.len();
            participants.push(Participant::new(Participant::default_name(position), even));
        }

        if policy == SharePolicy::EvenSplit && count != self.participants.len() {
            for participant in &mut participants {
                participant.share = even;
            }
        }

        ParticipantSet { participants }
    }

    /// Copy with one share replaced. Out-of-range index returns an unchanged copy.
    pub fn with_share(&self, index: usize, share: f64) -> Self {
        let mut next = self.clone();
        if let Some(participant) = next.participants.get_mut(index) {
            participant.share = share;
        }
        next
    }

    /// Copy with one name replaced. Out-of-range index returns an unchanged copy.
    pub fn with_name(&self, index: usize, name: impl Into<String>) -> Self {
        let mut next = self.clone();
        if let Some(participant) = next.participants.get_mut(index) {
            participant.name = name.into();
        }
        next
    }
}

impl<'a> IntoIterator for &'a ParticipantSet {
    type Item = &'a Participant;
    type IntoIter = std::slice::Iter<'a, Participant>;

    fn into_iter(self) -> Self::IntoIter {
        self.participants.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_defaults() {
        let set = ParticipantSet::with_defaults(2);
        assert_eq!(set.len(), 2);
        assert_eq!(set.names(), vec!["Person 1", "Person 2"]);
        assert_eq!(set.shares(), vec![50.0, 50.0]);
    }

    #[test]
    fn test_grow_preserves_existing() {
        let set = ParticipantSet::new(vec![
            Participant::new("Ana", 70.0),
            Participant::new("Ben", 30.0),
        ]);

        let grown = set.resized(3, SharePolicy::PreserveExisting);

        assert_eq!(grown.len(), 3);
        assert_eq!(grown.get(0), set.get(0));
        assert_eq!(grown.get(1), set.get(1));
        assert_eq!(grown.get(2).unwrap().name, "Person 3");
        assert!(approx(grown.get(2).unwrap().share, 100.0 / 3.0));
    }

    #[test]
    fn test_grow_even_split_resets_all_shares() {
        let set = ParticipantSet::new(vec![
            Participant::new("Ana", 70.0),
            Participant::new("Ben", 30.0),
        ]);

        let grown = set.resized(3, SharePolicy::EvenSplit);

        assert_eq!(grown.names(), vec!["Ana", "Ben", "Person 3"]);
        for share in grown.shares() {
            assert!(approx(share, 100.0 / 3.0));
        }
        assert_eq!(format!("{:.2}", grown.get(0).unwrap().share), "33.33");
    }

    #[test]
    fn test_shrink_truncates_from_end() {
        let set = ParticipantSet::with_defaults(4).with_name(3, "Dee");
        let shrunk = set.resized(2, SharePolicy::PreserveExisting);

        assert_eq!(shrunk.names(), vec!["Person 1", "Person 2"]);
        assert_eq!(shrunk.shares(), vec![25.0, 25.0]);
    }

    #[test]
    fn test_same_count_is_noop_under_even_split() {
        let set = ParticipantSet::with_defaults(2).with_share(0, 80.0);
        assert_eq!(set.resized(2, SharePolicy::EvenSplit), set);
    }

    #[test]
    fn test_immutable_updates() {
        let original = ParticipantSet::with_defaults(3);
        let updated = original.with_share(1, 10.0).with_name(2, "Cy");

        assert_eq!(original.get(1).unwrap().share, original.get(0).unwrap().share);
        assert_eq!(updated.get(1).unwrap().share, 10.0);
        assert_eq!(updated.get(2).unwrap().name, "Cy");
        assert_eq!(original.with_share(9, 1.0), original);
    }

    #[test]
    fn test_from_shares_fills_missing_names() {
        let set = ParticipantSet::from_shares(&[1.0, 2.0, 3.0], &["Ana".to_string(), " ".to_string()]);
        assert_eq!(set.names(), vec!["Ana", "Person 2", "Person 3"]);
        assert_eq!(set.shares(), vec![1.0, 2.0, 3.0]);
    }
}
