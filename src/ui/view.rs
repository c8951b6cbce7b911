//! Plain projections of the library and view state. Widgets draw these; they
//! hold no behaviour of their own.

use crate::focus::FocusTarget;
use crate::image::ImageSummary;
use crate::session::learning::LearningState;
use crate::store::schema::{Card, Category, Library};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HomeItem {
    pub name: String,
    pub count: usize,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermGridItem {
    /// Index the learning overlay opens at when this item is activated.
    pub index: usize,
    pub label: String,
    pub image: Option<String>,
    pub focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TermGridView {
    pub items: Vec<TermGridItem>,
    pub show_empty_state: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControlState {
    pub disabled: bool,
    pub focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LearningCardView {
    pub counter: String,
    pub image: Option<String>,
    /// Present only while the term is revealed.
    pub term: Option<String>,
    /// No card to show; the overlay prints a hint instead.
    pub empty: bool,
    pub term_shown: bool,
    pub prev: ControlState,
    pub toggle: ControlState,
    pub next: ControlState,
    pub close: ControlState,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManageRow {
    pub id: String,
    pub label: String,
    pub thumbnail: Option<String>,
    pub delete_focused: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManageListView {
    pub count: String,
    pub rows: Vec<ManageRow>,
    pub show_placeholder: bool,
}

fn image_label(card: &Card) -> Option<String> {
    let url = card.image.as_deref()?;
    Some(
        ImageSummary::parse(url)
            .map(|summary| summary.label())
            .unwrap_or_else(|| "IMAGE".to_string()),
    )
}

pub fn home_menu(categories: &[Category], library: &Library, selected: usize) -> Vec<HomeItem> {
    categories
        .iter()
        .enumerate()
        .map(|(i, category)| HomeItem {
            name: category.to_string(),
            count: library.len(category),
            selected: i == selected,
        })
        .collect()
}

pub fn term_grid(cards: &[Card], focus: Option<&FocusTarget>) -> TermGridView {
    let items = cards
        .iter()
        .enumerate()
        .map(|(index, card)| TermGridItem {
            index,
            label: card.term.clone(),
            image: image_label(card),
            focused: focus == Some(&FocusTarget::GridItem(index)),
        })
        .collect();
    TermGridView {
        items,
        show_empty_state: cards.is_empty(),
    }
}

pub fn learning_card(
    cards: &[Card],
    state: &LearningState,
    focus: Option<&FocusTarget>,
) -> LearningCardView {
    let total = cards.len();
    let index = state.index();
    let control = |target: FocusTarget, disabled: bool| ControlState {
        disabled,
        focused: focus == Some(&target),
    };

    let current = cards.get(index);
    LearningCardView {
        counter: match current {
            Some(_) => format!("{}/{}", index + 1, total),
            None => "0/0".to_string(),
        },
        image: current.and_then(image_label),
        term: current
            .filter(|_| state.show_term())
            .map(|card| card.term.clone()),
        empty: current.is_none(),
        term_shown: total > 0 && state.show_term(),
        prev: control(FocusTarget::PrevCard, total == 0 || index == 0),
        toggle: control(FocusTarget::ToggleTerm, total == 0),
        next: control(FocusTarget::NextCard, total == 0 || index + 1 >= total),
        close: control(FocusTarget::CloseLearning, false),
    }
}

pub fn manage_list(cards: &[Card], focus: Option<&FocusTarget>) -> ManageListView {
    let rows = cards
        .iter()
        .map(|card| ManageRow {
            id: card.id.clone(),
            label: card.term.clone(),
            thumbnail: image_label(card),
            delete_focused: focus == Some(&FocusTarget::DeleteCard(card.id.clone())),
        })
        .collect();
    ManageListView {
        count: cards.len().to_string(),
        rows,
        show_placeholder: cards.is_empty(),
    }
}
