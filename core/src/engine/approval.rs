// Copyright (c) 2022-2023 The MobileCoin Foundation

//! User approval state machine
//!
//! A review of `n` fields is presented as pages `0..n` followed by an approval
//! page at index `n`. Reaching the approval page requires stepping through every
//! field, so [`ApprovalState::Approved`] implies the whole plan was displayed.

use strum::{Display, EnumIter};

/// Discrete user input events, delivered by the platform UI
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display, EnumIter)]
pub enum UserInput {
    /// Advance to the next page
    Next,
    /// Return to the previous page
    Previous,
    /// Confirm, only honoured on the approval page
    Confirm,
    /// Reject, accepted from any page
    Reject,
}

/// Approval progress for a single review
#[derive(Copy, Clone, PartialEq, Eq, Debug, Display)]
pub enum ApprovalState {
    /// No review active
    Idle,
    /// Reviewing, `page == pages` is the approval page
    Reviewing { page: usize, pages: usize },
    /// Approved by the user
    Approved,
    /// Rejected by the user
    Rejected,
}

impl Default for ApprovalState {
    fn default() -> Self {
        Self::Idle
    }
}

impl ApprovalState {
    /// Start a review over `pages` fields
    pub const fn review(pages: usize) -> Self {
        Self::Reviewing { page: 0, pages }
    }

    /// Compute the next state for a user input
    ///
    /// Terminal and idle states ignore further input.
    pub fn next(self, input: UserInput) -> Self {
        use ApprovalState::*;

        match (self, input) {
            (Reviewing { .. }, UserInput::Reject) => Rejected,
            (Reviewing { page, pages }, UserInput::Next) => Reviewing {
                page: (page + 1).min(pages),
                pages,
            },
            (Reviewing { page, pages }, UserInput::Previous) => Reviewing {
                page: page.saturating_sub(1),
                pages,
            },
            (Reviewing { page, pages }, UserInput::Confirm) if page == pages => Approved,
            (s, _) => s,
        }
    }

    /// Field index currently displayed, `None` on the approval page or outside a review
    pub fn field(&self) -> Option<usize> {
        match self {
            Self::Reviewing { page, pages } if page < pages => Some(*page),
            _ => None,
        }
    }

    pub fn is_approved(&self) -> bool {
        *self == Self::Approved
    }
}

#[cfg(test)]
mod test {
    use strum::IntoEnumIterator;

    use super::*;

    fn apply(s: ApprovalState, inputs: &[UserInput]) -> ApprovalState {
        inputs.iter().fold(s, |s, i| s.next(*i))
    }

    #[test]
    fn approve_after_all_fields() {
        use UserInput::*;

        let s = apply(ApprovalState::review(3), &[Next, Next, Next]);
        assert_eq!(s, ApprovalState::Reviewing { page: 3, pages: 3 });
        assert_eq!(s.field(), None);

        assert_eq!(s.next(Confirm), ApprovalState::Approved);
    }

    #[test]
    fn confirm_before_final_page_is_ignored() {
        use UserInput::*;

        let mut s = ApprovalState::review(3);

        for _ in 0..3 {
            assert_eq!(s.next(Confirm), s);
            s = s.next(Next);
        }

        assert_eq!(s.next(Confirm), ApprovalState::Approved);
    }

    #[test]
    fn previous_requires_revisiting() {
        use UserInput::*;

        let s = apply(ApprovalState::review(2), &[Next, Next, Previous, Confirm]);
        assert_eq!(s, ApprovalState::Reviewing { page: 1, pages: 2 });
        assert_eq!(s.field(), Some(1));

        // Saturates at the first page
        let s = apply(ApprovalState::review(2), &[Previous, Previous]);
        assert_eq!(s.field(), Some(0));

        // And at the approval page
        let s = apply(ApprovalState::review(1), &[Next, Next, Next]);
        assert_eq!(s, ApprovalState::Reviewing { page: 1, pages: 1 });
    }

    #[test]
    fn reject_from_any_page() {
        for n in 0..=4 {
            let mut s = ApprovalState::review(4);
            for _ in 0..n {
                s = s.next(UserInput::Next);
            }

            assert_eq!(s.next(UserInput::Reject), ApprovalState::Rejected);
        }
    }

    #[test]
    fn terminal_states_ignore_input() {
        for s in [
            ApprovalState::Idle,
            ApprovalState::Approved,
            ApprovalState::Rejected,
        ] {
            for i in UserInput::iter() {
                assert_eq!(s.next(i), s, "{s:?} {i:?}");
            }
        }
    }
}
