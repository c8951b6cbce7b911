/// Everything that can hold keyboard focus, in the order it appears on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FocusTarget {
    HomeCategory(usize),

    BackButton,
    ManageButton,
    GridItem(usize),

    PrevCard,
    ToggleTerm,
    NextCard,
    CloseLearning,

    CloseManage,
    TermInput,
    ImageInput,
    SubmitButton,
    DeleteCard(String),
}

impl FocusTarget {
    pub fn in_manage_modal(&self) -> bool {
        matches!(
            self,
            FocusTarget::CloseManage
                | FocusTarget::TermInput
                | FocusTarget::ImageInput
                | FocusTarget::SubmitButton
                | FocusTarget::DeleteCard(_)
        )
    }

    pub fn in_learning_overlay(&self) -> bool {
        matches!(
            self,
            FocusTarget::PrevCard
                | FocusTarget::ToggleTerm
                | FocusTarget::NextCard
                | FocusTarget::CloseLearning
        )
    }
}

/// Keep Tab inside a modal.
///
/// `focusable` is the modal's live focusable set. Returns the new focus when
/// the key press is consumed, `None` when default traversal should handle it.
pub fn contain_tab(
    focusable: &[FocusTarget],
    active: Option<&FocusTarget>,
    backward: bool,
) -> Option<FocusTarget> {
    let (first, last) = (focusable.first()?, focusable.last()?);

    // A control that left the live set (a disabled submit button) no longer
    // holds focus inside the modal.
    let Some(active) = active.filter(|a| focusable.contains(a)) else {
        return Some(first.clone());
    };

    if !backward && active == last {
        Some(first.clone())
    } else if backward && active == first {
        Some(last.clone())
    } else {
        None
    }
}

/// Default Tab traversal over `order`, wrapping at both ends. Focus that is not
/// in `order` (or no focus at all) lands on the first or last entry.
pub fn traverse(
    order: &[FocusTarget],
    active: Option<&FocusTarget>,
    backward: bool,
) -> Option<FocusTarget> {
    if order.is_empty() {
        return None;
    }
    let pos = active.and_then(|a| order.iter().position(|t| t == a));
    let next = match (pos, backward) {
        (None, false) => 0,
        (None, true) => order.len() - 1,
        (Some(i), false) => (i + 1) % order.len(),
        (Some(0), true) => order.len() - 1,
        (Some(i), true) => i - 1,
    };
    Some(order[next].clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn modal() -> Vec<FocusTarget> {
        vec![
            FocusTarget::CloseManage,
            FocusTarget::TermInput,
            FocusTarget::ImageInput,
            FocusTarget::SubmitButton,
            FocusTarget::DeleteCard("a".into()),
        ]
    }

    #[test]
    fn tab_from_last_wraps_to_first() {
        let items = modal();
        let next = contain_tab(&items, items.last(), false);
        assert_eq!(next, Some(FocusTarget::CloseManage));
    }

    #[test]
    fn shift_tab_from_first_wraps_to_last() {
        let items = modal();
        let next = contain_tab(&items, Some(&FocusTarget::CloseManage), true);
        assert_eq!(next, Some(FocusTarget::DeleteCard("a".into())));
    }

    #[test]
    fn tab_in_the_middle_is_not_consumed() {
        let items = modal();
        assert_eq!(contain_tab(&items, Some(&FocusTarget::TermInput), false), None);
        assert_eq!(contain_tab(&items, Some(&FocusTarget::TermInput), true), None);
        // Shift+Tab from the last element is ordinary traversal
        assert_eq!(contain_tab(&items, items.last(), true), None);
    }

    #[test]
    fn focus_outside_is_pulled_to_first() {
        let items = modal();
        assert_eq!(
            contain_tab(&items, Some(&FocusTarget::ManageButton), true),
            Some(FocusTarget::CloseManage)
        );
        assert_eq!(contain_tab(&items, None, false), Some(FocusTarget::CloseManage));
    }

    #[test]
    fn control_missing_from_live_set_counts_as_outside() {
        let items: Vec<_> = modal()
            .into_iter()
            .filter(|t| *t != FocusTarget::SubmitButton)
            .collect();
        assert_eq!(
            contain_tab(&items, Some(&FocusTarget::SubmitButton), false),
            Some(FocusTarget::CloseManage)
        );
    }

    #[test]
    fn empty_modal_is_noop() {
        assert_eq!(contain_tab(&[], Some(&FocusTarget::TermInput), false), None);
    }

    #[test]
    fn single_element_wraps_onto_itself() {
        let items = vec![FocusTarget::CloseManage];
        assert_eq!(
            contain_tab(&items, Some(&FocusTarget::CloseManage), false),
            Some(FocusTarget::CloseManage)
        );
    }

    #[test]
    fn traverse_wraps_both_ways() {
        let order = vec![
            FocusTarget::BackButton,
            FocusTarget::ManageButton,
            FocusTarget::GridItem(0),
        ];
        assert_eq!(
            traverse(&order, Some(&FocusTarget::GridItem(0)), false),
            Some(FocusTarget::BackButton)
        );
        assert_eq!(
            traverse(&order, Some(&FocusTarget::BackButton), true),
            Some(FocusTarget::GridItem(0))
        );
        assert_eq!(
            traverse(&order, Some(&FocusTarget::BackButton), false),
            Some(FocusTarget::ManageButton)
        );
        assert_eq!(traverse(&order, None, false), Some(FocusTarget::BackButton));
        assert_eq!(traverse(&[], None, false), None);
    }
}
