//! Coarse behavioral classification.

use serde::{Deserialize, Serialize};

/// Which limb-animation rule is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    #[default]
    Idle,
    Walking,
}

impl BehaviorState {
    /// Walking when strictly farther than `threshold` from the target.
    pub fn classify(distance: f64, threshold: f64) -> Self {
        if distance > threshold {
            BehaviorState::Walking
        } else {
            BehaviorState::Idle
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorState::Idle => "idle",
            BehaviorState::Walking => "walking",
        }
    }
}

impl std::fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_threshold_is_exclusive() {
        assert_eq!(BehaviorState::classify(5.0, 5.0), BehaviorState::Idle);
        assert_eq!(BehaviorState::classify(5.000001, 5.0), BehaviorState::Walking);
        assert_eq!(BehaviorState::classify(0.0, 5.0), BehaviorState::Idle);
    }

    #[test]
    fn test_serializes_as_tag() {
        assert_eq!(
            serde_json::to_string(&BehaviorState::Walking).unwrap(),
            "\"walking\""
        );
    }
}
