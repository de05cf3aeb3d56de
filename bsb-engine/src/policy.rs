//! Per-category action resolution
//!
//! Pure mapping from a segment's category to the configured playback action.
//! Categories with no configured action default to skip.

use bsb_common::config::Options;
use bsb_common::Category;
use std::collections::HashMap;

pub use bsb_common::config::Action;

/// Resolves a segment category to its configured action
#[derive(Debug, Clone)]
pub struct ActionPolicy {
    actions: HashMap<Category, Action>,
}

impl ActionPolicy {
    /// Build a policy from an explicit category→action map
    pub fn new(actions: HashMap<Category, Action>) -> Self {
        Self { actions }
    }

    /// Build a policy from loaded options
    pub fn from_options(options: &Options) -> Self {
        Self::new(options.category_actions.clone())
    }

    /// Resolve the action for a category; unset categories skip
    pub fn resolve(&self, category: Category) -> Action {
        self.actions.get(&category).copied().unwrap_or(Action::Skip)
    }
}

impl Default for ActionPolicy {
    fn default() -> Self {
        Self::new(Options::default_category_actions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_category_defaults_to_skip() {
        let policy = ActionPolicy::new(HashMap::new());
        for category in Category::ALL {
            assert_eq!(policy.resolve(category), Action::Skip);
        }
    }

    #[test]
    fn test_configured_action_wins() {
        let policy = ActionPolicy::new(HashMap::from([
            (Category::Sponsor, Action::Mute),
            (Category::Filler, Action::Disabled),
        ]));

        assert_eq!(policy.resolve(Category::Sponsor), Action::Mute);
        assert_eq!(policy.resolve(Category::Filler), Action::Disabled);
        assert_eq!(policy.resolve(Category::Intro), Action::Skip);
    }

    #[test]
    fn test_default_policy_matches_shipped_options() {
        let policy = ActionPolicy::default();
        assert_eq!(policy.resolve(Category::Sponsor), Action::Skip);
        assert_eq!(policy.resolve(Category::ExclusiveAccess), Action::ManualButton);
        assert_eq!(policy.resolve(Category::Preview), Action::Overlay);
    }
}
