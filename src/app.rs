use std::path::PathBuf;
use std::sync::mpsc::Sender;
use std::thread;

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rust_i18n::t;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::event::AppEvent;
use crate::focus::{self, FocusTarget};
use crate::image::{ImageError, ImagePayload, expand_path};
use crate::session::learning::LearningState;
use crate::store::json_store::JsonStore;
use crate::store::schema::{Card, Category, Library, generate_card_id};
use crate::store::storage::{FileStorage, KvStorage, MemoryStorage};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;
use crate::ui::view::{self, HomeItem, LearningCardView, ManageListView, TermGridView};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Category,
}

/// A blocking message shown over everything until dismissed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    MissingFields,
    DecodeFailed(String),
    SaveFailed(String),
}

impl Notice {
    pub fn title(&self) -> String {
        match self {
            Notice::MissingFields => t!("notice.missing_fields_title").to_string(),
            Notice::DecodeFailed(_) => t!("notice.decode_failed_title").to_string(),
            Notice::SaveFailed(_) => t!("notice.save_failed_title").to_string(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            Notice::MissingFields => t!("notice.missing_fields").to_string(),
            Notice::DecodeFailed(detail) => t!("notice.decode_failed", detail = detail).to_string(),
            Notice::SaveFailed(detail) => t!("notice.save_failed", detail = detail).to_string(),
        }
    }
}

/// An add-card submission waiting on its image decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingAdd {
    pub category: Category,
    pub term: String,
    pub source: PathBuf,
}

#[derive(Debug, Default)]
pub struct ManageModal {
    pub open: bool,
    pub term: LineInput,
    pub image_path: LineInput,
    /// Set while an image decode is in flight; the submit button is disabled.
    pub submitting: bool,
}

pub struct App {
    pub screen: AppScreen,
    pub current_category: Option<Category>,
    pub library: Library,
    pub learning: LearningState,
    pub manage: ManageModal,
    pub focus: Option<FocusTarget>,
    /// Focus to return to when the manage modal closes.
    pub restore_focus: Option<FocusTarget>,
    pub home_selected: usize,
    pub notice: Option<Notice>,
    pub theme: &'static Theme,
    pub config: Config,
    pub should_quit: bool,
    store: JsonStore,
    decode_tx: Option<Sender<AppEvent>>,
    rng: SmallRng,
}

impl App {
    pub fn new(config: Config) -> Self {
        let loaded_theme = Theme::load(&config.theme).unwrap_or_default();
        let theme: &'static Theme = Box::leak(Box::new(loaded_theme));

        let storage: Box<dyn KvStorage> = match FileStorage::with_base_dir(config.data_dir()) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                warn!(error = %e, dir = %config.data_dir, "data directory unavailable, cards will not be kept");
                Box::new(MemoryStorage::new())
            }
        };
        let store = JsonStore::new(storage, &config.storage_key, config.category_set());
        Self::with_store(config, store, theme)
    }

    pub fn with_store(config: Config, store: JsonStore, theme: &'static Theme) -> Self {
        let library = store.load();
        Self {
            screen: AppScreen::Home,
            current_category: None,
            library,
            learning: LearningState::default(),
            manage: ManageModal::default(),
            focus: Some(FocusTarget::HomeCategory(0)),
            restore_focus: None,
            home_selected: 0,
            notice: None,
            theme,
            config,
            should_quit: false,
            store,
            decode_tx: None,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Route image decodes through the event loop instead of blocking.
    pub fn attach_decoder(&mut self, tx: Sender<AppEvent>) {
        self.decode_tx = Some(tx);
    }

    pub fn categories(&self) -> &[Category] {
        self.store.categories()
    }

    pub fn active_cards(&self) -> &[Card] {
        match &self.current_category {
            Some(category) => self.library.cards(category),
            None => &[],
        }
    }

    // --- screens ---

    pub fn open_category(&mut self, category: &Category) {
        let Some(pos) = self.categories().iter().position(|c| c == category) else {
            warn!(category = %category, "ignoring unknown category");
            return;
        };
        self.current_category = Some(category.clone());
        self.home_selected = pos;
        self.screen = AppScreen::Category;
        self.focus = Some(if self.active_cards().is_empty() {
            FocusTarget::ManageButton
        } else {
            FocusTarget::GridItem(0)
        });
        info!(category = %category, cards = self.active_cards().len(), "opened category");
    }

    pub fn open_category_at(&mut self, index: usize) {
        if let Some(category) = self.categories().get(index).cloned() {
            self.open_category(&category);
        }
    }

    pub fn close_category(&mut self) {
        self.current_category = None;
        self.screen = AppScreen::Home;
        self.learning.close();
        self.manage.open = false;
        self.restore_focus = None;
        self.focus = Some(FocusTarget::HomeCategory(self.home_selected));
    }

    pub fn home_next(&mut self) {
        let len = self.categories().len();
        if len > 0 {
            self.home_selected = (self.home_selected + 1) % len;
            self.focus = Some(FocusTarget::HomeCategory(self.home_selected));
        }
    }

    pub fn home_prev(&mut self) {
        let len = self.categories().len();
        if len > 0 {
            self.home_selected = if self.home_selected == 0 {
                len - 1
            } else {
                self.home_selected - 1
            };
            self.focus = Some(FocusTarget::HomeCategory(self.home_selected));
        }
    }

    // --- learning overlay ---

    pub fn open_learning(&mut self, start: usize) {
        if self.current_category.is_none() {
            return;
        }
        let len = self.active_cards().len();
        self.learning.open(start, len);
        self.focus = Some(if len == 0 {
            FocusTarget::CloseLearning
        } else {
            FocusTarget::ToggleTerm
        });
        debug!(start, index = self.learning.index(), len, "opened learning overlay");
    }

    pub fn close_learning(&mut self) {
        if !self.learning.close() {
            return;
        }
        let len = self.active_cards().len();
        self.focus = Some(if len == 0 {
            FocusTarget::ManageButton
        } else {
            FocusTarget::GridItem(self.learning.index().min(len - 1))
        });
    }

    pub fn next_card(&mut self) {
        let len = self.active_cards().len();
        if self.learning.next(len) {
            self.refocus_overlay();
        }
    }

    pub fn prev_card(&mut self) {
        if self.learning.prev() {
            self.refocus_overlay();
        }
    }

    /// Paging can disable the prev/next button that holds focus.
    fn refocus_overlay(&mut self) {
        if let Some(target) = &self.focus
            && target.in_learning_overlay()
            && !self.focus_order().contains(target)
        {
            self.focus = Some(FocusTarget::ToggleTerm);
        }
    }

    pub fn toggle_term(&mut self) {
        let len = self.active_cards().len();
        self.learning.toggle_term(len);
    }

    // --- manage modal ---

    pub fn open_manage(&mut self) {
        if self.current_category.is_none() || self.manage.open {
            return;
        }
        self.manage.open = true;
        self.restore_focus = self.focus.clone();
        self.focus = Some(FocusTarget::TermInput);
    }

    pub fn close_manage(&mut self) {
        if !self.manage.open {
            return;
        }
        self.manage.open = false;
        if let Some(target) = self.restore_focus.take() {
            self.focus = Some(self.clamp_grid_focus(target));
        }
    }

    /// Validate the form and start decoding the image. Without an attached
    /// decoder the decode runs inline.
    pub fn submit_add_form(&mut self) {
        if self.manage.submitting {
            debug!("add already in flight, ignoring submit");
            return;
        }
        let Some(category) = self.current_category.clone() else {
            return;
        };
        let pending = match self.begin_add(category) {
            Ok(pending) => pending,
            Err(notice) => {
                self.notice = Some(notice);
                return;
            }
        };

        self.manage.submitting = true;
        if self.focus == Some(FocusTarget::SubmitButton) {
            self.focus = Some(FocusTarget::TermInput);
        }
        let max_bytes = self.config.max_image_bytes;
        if let Some(tx) = self.decode_tx.clone() {
            thread::spawn(move || {
                let result = ImagePayload::from_path(&pending.source, max_bytes);
                let _ = tx.send(AppEvent::ImageDecoded(Box::new(pending), result));
            });
        } else {
            let result = ImagePayload::from_path(&pending.source, max_bytes);
            self.finish_add(pending, result);
        }
    }

    pub fn begin_add(&self, category: Category) -> Result<PendingAdd, Notice> {
        if self.manage.term.is_blank() || self.manage.image_path.is_blank() {
            return Err(Notice::MissingFields);
        }
        Ok(PendingAdd {
            category,
            term: self.manage.term.value().trim().to_string(),
            source: expand_path(self.manage.image_path.value().trim()),
        })
    }

    pub fn finish_add(&mut self, pending: PendingAdd, result: Result<ImagePayload, ImageError>) {
        self.manage.submitting = false;
        let payload = match result {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "image decode failed");
                self.notice = Some(Notice::DecodeFailed(e.to_string()));
                return;
            }
        };

        let now = Utc::now();
        let bytes = payload.as_str().len();
        let card = Card::new(self.unique_card_id(now), &pending.term, payload.into_string(), now);
        info!(category = %pending.category, id = %card.id, term = %card.term, bytes, "added card");
        self.library.push(&pending.category, card);
        self.persist();

        self.manage.term.clear();
        self.manage.image_path.clear();
        if self.manage.open {
            self.focus = Some(FocusTarget::TermInput);
        }
    }

    pub fn delete_card(&mut self, id: &str) {
        let Some(category) = self.current_category.clone() else {
            return;
        };
        let Some(pos) = self.active_cards().iter().position(|c| c.id == id) else {
            debug!(id, "delete of unknown card ignored");
            return;
        };
        if let Some(card) = self.library.remove(&category, id) {
            info!(category = %category, id, term = %card.term, "deleted card");
        }
        self.persist();

        if self.focus.as_ref() == Some(&FocusTarget::DeleteCard(id.to_string())) {
            let cards = self.active_cards();
            self.focus = Some(match cards.get(pos).or(cards.last()) {
                Some(card) => FocusTarget::DeleteCard(card.id.clone()),
                None => FocusTarget::TermInput,
            });
        }
    }

    fn unique_card_id(&mut self, now: DateTime<Utc>) -> String {
        loop {
            let id = generate_card_id(now, &mut self.rng);
            if !self.library.contains_id(&id) {
                return id;
            }
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.library) {
            error!(error = %e, "failed to save flashcards");
            self.notice = Some(Notice::SaveFailed(e.to_string()));
        }
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- focus ---

    /// Focusable controls of the manage modal, in screen order.
    pub fn manage_focusables(&self) -> Vec<FocusTarget> {
        let mut items = vec![
            FocusTarget::CloseManage,
            FocusTarget::TermInput,
            FocusTarget::ImageInput,
        ];
        if !self.manage.submitting {
            items.push(FocusTarget::SubmitButton);
        }
        items.extend(
            self.active_cards()
                .iter()
                .map(|card| FocusTarget::DeleteCard(card.id.clone())),
        );
        items
    }

    /// Every enabled control in screen order. The learning overlay hides the
    /// screen behind it, so only its own controls (and the modal's) count.
    pub fn focus_order(&self) -> Vec<FocusTarget> {
        if self.screen == AppScreen::Home {
            return (0..self.categories().len())
                .map(FocusTarget::HomeCategory)
                .collect();
        }

        let len = self.active_cards().len();
        let mut order = Vec::new();
        if !self.learning.is_open() {
            order.extend([FocusTarget::BackButton, FocusTarget::ManageButton]);
            order.extend((0..len).map(FocusTarget::GridItem));
        } else {
            let index = self.learning.index();
            if len > 0 && index > 0 {
                order.push(FocusTarget::PrevCard);
            }
            if len > 0 {
                order.push(FocusTarget::ToggleTerm);
            }
            if index + 1 < len {
                order.push(FocusTarget::NextCard);
            }
            order.push(FocusTarget::CloseLearning);
        }
        if self.manage.open {
            order.extend(self.manage_focusables());
        }
        order
    }

    pub fn focus_step(&mut self, backward: bool) {
        let order = self.focus_order();
        self.focus_within(&order, backward);
    }

    /// Step focus through `order` only, wrapping at both ends.
    pub fn focus_within(&mut self, order: &[FocusTarget], backward: bool) {
        if let Some(next) = focus::traverse(order, self.focus.as_ref(), backward) {
            if let FocusTarget::HomeCategory(i) = next {
                self.home_selected = i;
            }
            self.focus = Some(next);
        }
    }

    /// Move focus across the term grid by `delta` items.
    pub fn move_grid_focus(&mut self, delta: isize) {
        let len = self.active_cards().len();
        if len == 0 {
            return;
        }
        let next = match self.focus {
            Some(FocusTarget::GridItem(i)) => i.saturating_add_signed(delta).min(len - 1),
            _ => 0,
        };
        self.focus = Some(FocusTarget::GridItem(next));
    }

    pub fn activate_focused(&mut self) {
        let Some(target) = self.focus.clone() else {
            return;
        };
        match target {
            FocusTarget::HomeCategory(i) => self.open_category_at(i),
            FocusTarget::BackButton => self.close_category(),
            FocusTarget::ManageButton => self.open_manage(),
            FocusTarget::GridItem(i) => self.open_learning(i),
            FocusTarget::PrevCard => self.prev_card(),
            FocusTarget::ToggleTerm => self.toggle_term(),
            FocusTarget::NextCard => self.next_card(),
            FocusTarget::CloseLearning => self.close_learning(),
            FocusTarget::CloseManage => self.close_manage(),
            FocusTarget::TermInput | FocusTarget::ImageInput | FocusTarget::SubmitButton => {
                self.submit_add_form()
            }
            FocusTarget::DeleteCard(id) => self.delete_card(&id),
        }
    }

    fn clamp_grid_focus(&self, target: FocusTarget) -> FocusTarget {
        let len = self.active_cards().len();
        match target {
            FocusTarget::GridItem(_) if len == 0 => FocusTarget::ManageButton,
            FocusTarget::GridItem(i) => FocusTarget::GridItem(i.min(len - 1)),
            other => other,
        }
    }

    // --- views ---

    pub fn home_view(&self) -> Vec<HomeItem> {
        view::home_menu(self.categories(), &self.library, self.home_selected)
    }

    pub fn term_grid_view(&self) -> TermGridView {
        view::term_grid(self.active_cards(), self.focus.as_ref())
    }

    pub fn learning_view(&self) -> LearningCardView {
        view::learning_card(self.active_cards(), &self.learning, self.focus.as_ref())
    }

    pub fn manage_view(&self) -> ManageListView {
        view::manage_list(self.active_cards(), self.focus.as_ref())
    }
}
