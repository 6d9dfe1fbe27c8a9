//! Priority of the issue behind an error.

use std::fmt;

use errkit_core::Attribute;

/// How urgently the issue behind an error should be addressed.
///
/// Independent of [`Severity`](super::Severity): an error in a minor
/// service may be ranked lower than the same error in a critical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    Low,
    Medium,
    High,
    Urgent,
}

impl Rank {
    /// Returns the lowercase name of the rank.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rank::Low => "low",
            Rank::Medium => "medium",
            Rank::High => "high",
            Rank::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Attribute for Rank {
    fn type_label(&self) -> String {
        "Rank".to_string()
    }

    fn value_strings(&self) -> Vec<String> {
        vec![self.to_string()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_order() {
        let mut ranks = vec![Rank::Urgent, Rank::Low, Rank::High, Rank::Medium];
        ranks.sort();

        assert_eq!(ranks, vec![Rank::Low, Rank::Medium, Rank::High, Rank::Urgent]);
    }

    #[test]
    fn test_rank_description() {
        assert_eq!(Rank::High.type_label(), "Rank");
        assert_eq!(Rank::Urgent.value_strings(), vec!["urgent"]);
    }
}
