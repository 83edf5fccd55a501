//! Labels and label set configuration.

use serde::{Deserialize, Serialize};

/// A label assigned to a record.
///
/// The full set of values is closed; which of them a session actually offers
/// is decided by its [`LabelSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Label {
    Positive,
    Negative,
    Irrelevant,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "Positive",
            Self::Negative => "Negative",
            Self::Irrelevant => "Irrelevant",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Self::Positive),
            "negative" => Some(Self::Negative),
            "irrelevant" => Some(Self::Irrelevant),
            _ => None,
        }
    }
}

/// The fixed set of labels a session offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSet {
    /// Positive / Negative.
    #[default]
    Binary,
    /// Positive / Negative / Irrelevant.
    Ternary,
}

impl LabelSet {
    /// Members of the set, in display order.
    pub fn labels(&self) -> &'static [Label] {
        match self {
            Self::Binary => &[Label::Positive, Label::Negative],
            Self::Ternary => &[Label::Positive, Label::Negative, Label::Irrelevant],
        }
    }

    /// Whether a label belongs to this set.
    pub fn contains(&self, label: Label) -> bool {
        self.labels().contains(&label)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "binary",
            Self::Ternary => "ternary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" => Some(Self::Binary),
            "ternary" => Some(Self::Ternary),
            _ => None,
        }
    }
}

/// Per-session labeling configuration.
///
/// The reference workflows differ only in these two knobs: a 2-label walk
/// with a back button, and a 3-label forward-only walk. Both are the same
/// session with different options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelingOptions {
    /// Which labels the session offers.
    #[serde(default)]
    pub label_set: LabelSet,
    /// Whether the walk may step backward.
    #[serde(default = "default_allow_backward")]
    pub allow_backward: bool,
}

fn default_allow_backward() -> bool {
    true
}

impl Default for LabelingOptions {
    fn default() -> Self {
        Self {
            label_set: LabelSet::default(),
            allow_backward: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_round_trip() {
        for label in [Label::Positive, Label::Negative, Label::Irrelevant] {
            assert_eq!(Label::from_str(label.as_str()), Some(label));
        }
        assert_eq!(Label::from_str("positive"), Some(Label::Positive));
        assert_eq!(Label::from_str("  NEGATIVE "), Some(Label::Negative));
        assert_eq!(Label::from_str("maybe"), None);
    }

    #[test]
    fn test_label_set_membership() {
        assert!(LabelSet::Binary.contains(Label::Positive));
        assert!(!LabelSet::Binary.contains(Label::Irrelevant));
        assert!(LabelSet::Ternary.contains(Label::Irrelevant));
        assert_eq!(LabelSet::Binary.labels().len(), 2);
        assert_eq!(LabelSet::Ternary.labels().len(), 3);
    }

    #[test]
    fn test_default_options() {
        let options = LabelingOptions::default();
        assert_eq!(options.label_set, LabelSet::Binary);
        assert!(options.allow_backward);
    }
}
