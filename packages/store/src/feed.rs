//! Feed tabs shown by the community view.
//!
//! Exactly one tab is active. The active tab is its own store path, so
//! switching tabs never touches the entity lists fetched for other tabs.

use crate::state::{ActiveTab, Store};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FeedTab {
    #[default]
    Posts,
    LearningProgress,
    SkillShares,
    Friends,
}

impl FeedTab {
    pub const ALL: [Self; 4] = [
        Self::Posts,
        Self::LearningProgress,
        Self::SkillShares,
        Self::Friends,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Posts => "Comment & Feedback",
            Self::LearningProgress => "Learning Progress Updates",
            Self::SkillShares => "SkillShare",
            Self::Friends => "Friends",
        }
    }
}

/// Make `tab` the active one. Returns `false`, without waking any
/// `ActiveTab` subscriber, when it already was.
pub fn select_tab(store: &Store, tab: FeedTab) -> bool {
    store.write_if_changed::<ActiveTab>(tab)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MediaKind, Post};
    use crate::state::{ChangeSet, LearningProgressList, Posts, StorePath};

    #[test]
    fn test_switching_tabs_keeps_lists() {
        let store = Store::new();
        store.write::<Posts>(vec![Post {
            id: "p1".to_string(),
            user_id: "u1".to_string(),
            content_description: "hi".to_string(),
            media_link: "https://cdn/p1.png".to_string(),
            media_type: MediaKind::Image,
        }]);
        let mut list_sub = store.subscribe([StorePath::Posts, StorePath::LearningProgressList]);

        for tab in FeedTab::ALL {
            select_tab(&store, tab);
            assert_eq!(store.read::<ActiveTab>(), tab);
        }
        select_tab(&store, FeedTab::Posts);

        assert_eq!(store.read::<Posts>().len(), 1);
        assert!(store.read::<LearningProgressList>().is_empty());
        assert_eq!(list_sub.try_drain(), None);
    }

    #[test]
    fn test_selecting_active_tab_is_a_no_op() {
        let store = Store::new();
        let mut tab_sub = store.subscribe([StorePath::ActiveTab]);
        assert_eq!(store.read::<ActiveTab>(), FeedTab::Posts);

        assert!(!select_tab(&store, FeedTab::Posts));
        assert_eq!(tab_sub.try_drain(), None);

        assert!(select_tab(&store, FeedTab::Friends));
        assert_eq!(tab_sub.try_drain(), Some(ChangeSet::from([StorePath::ActiveTab])));
    }
}
