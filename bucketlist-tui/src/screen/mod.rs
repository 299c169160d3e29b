//! The list-detail screen.
//!
//! [`DetailScreen`] owns every piece of transient UI state and drives the
//! repository. After any mutation it reloads the whole item collection with
//! [`DetailScreen::refresh_items`]; nothing is patched locally.

mod form;

pub use form::{FormField, FormMode, ItemForm};

use std::sync::Arc;

use bucketlist_lib::ItemRepository;
use bucketlist_lib::model::{Item, List, ListId};
use log::{debug, error, info};

/// Navigation parameters the screen is opened with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub list_id: ListId,
    /// Display name passed by the caller, shown until the list loads.
    pub name: String,
}

/// Which surface currently receives input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// The parent list is not loaded; only quit, retry and dismiss apply.
    Loading,
    List,
    Form,
    Confirm,
}

/// The per-row actions hidden behind the reveal gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    Delete,
}

/// The single row whose actions are showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Revealed {
    pub index: usize,
    pub focus: RowAction,
}

/// Input the screen reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Refresh,
    SelectNext,
    SelectPrevious,
    /// Reveal the selected row's actions, or move focus to the next action.
    RevealMore,
    /// Move focus back one action, concealing past the first.
    RevealLess,
    /// Trigger the focused action of the revealed row.
    Activate,
    Add,
    EditSelected,
    DeleteSelected,
    DismissBanner,
    FormChar(char),
    FormBackspace,
    FormNextField,
    FormPreviousField,
    FormSubmit,
    FormClose,
    ConfirmYes,
    ConfirmNo,
}

/// Whether the event loop should keep running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// State and behaviour of the list-detail view.
pub struct DetailScreen {
    repo: Arc<dyn ItemRepository>,
    route: Route,
    list: Option<List>,
    items: Vec<Item>,
    selected: usize,
    revealed: Option<Revealed>,
    form: Option<ItemForm>,
    pending_delete: Option<Item>,
    banner: Option<String>,
}

impl DetailScreen {
    pub fn new(repo: Arc<dyn ItemRepository>, route: Route) -> Self {
        Self {
            repo,
            route,
            list: None,
            items: Vec::new(),
            selected: 0,
            revealed: None,
            form: None,
            pending_delete: None,
            banner: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// The parent list, once loaded.
    pub fn list(&self) -> Option<&List> {
        self.list.as_ref()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn revealed(&self) -> Option<Revealed> {
        self.revealed
    }

    pub fn form(&self) -> Option<&ItemForm> {
        self.form.as_ref()
    }

    pub fn pending_delete(&self) -> Option<&Item> {
        self.pending_delete.as_ref()
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn mode(&self) -> Mode {
        if self.list.is_none() {
            Mode::Loading
        } else if self.pending_delete.is_some() {
            Mode::Confirm
        } else if self.form.is_some() {
            Mode::Form
        } else {
            Mode::List
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Load the parent list, then its items.
    pub async fn load(&mut self) {
        let list_id = self.route.list_id.clone();
        match self.repo.fetch_list(&list_id).await {
            Ok(list) => {
                info!("loaded list {} ({})", list.id, list.name);
                self.list = Some(list);
                self.banner = None;
                self.refresh_items().await;
            }
            Err(e) => {
                error!("Error loading list {list_id}: {e}");
                self.banner = Some(format!("Could not load list: {e}"));
            }
        }
    }

    /// Replace the item collection with a fresh fetch.
    ///
    /// Returns `false` (keeping the previous items) if the fetch failed.
    pub async fn refresh_items(&mut self) -> bool {
        match self.repo.fetch_items(&self.route.list_id).await {
            Ok(items) => {
                debug!("fetched {} items", items.len());
                self.items = items;
                self.selected = self.selected.min(self.items.len().saturating_sub(1));
                self.conceal();
                true
            }
            Err(e) => {
                error!("Error fetching items: {e}");
                self.banner = Some(format!("Could not load items: {e}"));
                false
            }
        }
    }

    // =========================================================================
    // Add / edit form
    // =========================================================================

    /// Open a blank form. Does nothing until the list has loaded.
    pub fn open_create(&mut self) {
        if self.list.is_none() {
            return;
        }
        self.conceal();
        self.form = Some(ItemForm::create());
    }

    /// Open the form pre-populated from the item at `index`.
    pub fn open_edit(&mut self, index: usize) {
        self.conceal();
        if let Some(item) = self.items.get(index) {
            self.form = Some(ItemForm::edit(item.clone()));
        }
    }

    /// Close the form without touching the backend.
    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form, then close it whatever the outcome.
    ///
    /// On success the items are re-fetched; on failure the error is logged
    /// and shown on the banner.
    pub async fn submit_form(&mut self) {
        let Some(form) = self.form.take() else { return };
        let list_id = self.route.list_id.clone();
        let draft = form.draft();

        let result = match form.mode() {
            FormMode::Creating => self
                .repo
                .create_item(&list_id, draft)
                .await
                .map(|id| info!("created item {id}")),
            FormMode::Editing(item) => {
                let patch = item.diff(&draft);
                self.repo
                    .update_item(&list_id, &item.id, patch)
                    .await
                    .map(|()| info!("updated item {}", item.id))
            }
        };

        match result {
            Ok(()) => {
                self.refresh_items().await;
            }
            Err(e) => {
                let what = match form.mode() {
                    FormMode::Creating => "adding item to the list",
                    FormMode::Editing(_) => "updating item",
                };
                error!("Error {what}: {e}");
                self.banner = Some(format!("Error {what}: {e}"));
            }
        }
    }

    // =========================================================================
    // Delete confirmation
    // =========================================================================

    /// Ask for confirmation before deleting the item at `index`.
    pub fn request_delete(&mut self, index: usize) {
        self.conceal();
        self.pending_delete = self.items.get(index).cloned();
    }

    /// Delete the pending item. Does nothing if no delete is pending.
    pub async fn confirm_delete(&mut self) {
        let Some(item) = self.pending_delete.take() else { return };
        match self.repo.delete_item(&self.route.list_id, &item.id).await {
            Ok(()) => {
                info!("deleted item {}", item.id);
                self.refresh_items().await;
            }
            Err(e) => {
                error!("Error deleting item {}: {e}", item.id);
                self.banner = Some(format!("Error deleting item: {e}"));
            }
        }
    }

    /// Drop the pending delete without touching the backend.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    // =========================================================================
    // Selection and row actions
    // =========================================================================

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.conceal();
        }
    }

    pub fn select_previous(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.conceal();
        }
    }

    /// Reveal the actions of row `index`, concealing any other row.
    pub fn reveal(&mut self, index: usize) {
        if index < self.items.len() {
            self.revealed = Some(Revealed {
                index,
                focus: RowAction::Edit,
            });
        }
    }

    pub fn conceal(&mut self) {
        self.revealed = None;
    }

    fn reveal_more(&mut self) {
        match self.revealed {
            Some(Revealed { index, .. }) if index == self.selected => {
                self.revealed = Some(Revealed {
                    index,
                    focus: RowAction::Delete,
                });
            }
            _ => self.reveal(self.selected),
        }
    }

    fn reveal_less(&mut self) {
        self.revealed = match self.revealed {
            Some(Revealed {
                index,
                focus: RowAction::Delete,
            }) => Some(Revealed {
                index,
                focus: RowAction::Edit,
            }),
            _ => None,
        };
    }

    fn activate(&mut self) {
        match self.revealed {
            Some(Revealed {
                index,
                focus: RowAction::Edit,
            }) => self.open_edit(index),
            Some(Revealed {
                index,
                focus: RowAction::Delete,
            }) => self.request_delete(index),
            None => self.reveal(self.selected),
        }
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Apply one action. Actions that do not fit the current mode are ignored.
    pub async fn dispatch(&mut self, action: Action) -> Flow {
        match (self.mode(), action) {
            (Mode::Loading | Mode::List, Action::Quit) => return Flow::Quit,
            (Mode::Loading, Action::Refresh) => self.load().await,
            (Mode::List, Action::Refresh) => {
                self.refresh_items().await;
            }
            (Mode::List, Action::SelectNext) => self.select_next(),
            (Mode::List, Action::SelectPrevious) => self.select_previous(),
            (Mode::List, Action::RevealMore) => self.reveal_more(),
            (Mode::List, Action::RevealLess) => self.reveal_less(),
            (Mode::List, Action::Activate) => self.activate(),
            (Mode::List, Action::Add) => self.open_create(),
            (Mode::List, Action::EditSelected) => self.open_edit(self.selected),
            (Mode::List, Action::DeleteSelected) => self.request_delete(self.selected),
            (_, Action::DismissBanner) => self.dismiss_banner(),

            (Mode::Form, Action::FormSubmit) => self.submit_form().await,
            (Mode::Form, Action::FormClose) => self.close_form(),
            (Mode::Form, input) => {
                if let Some(form) = self.form.as_mut() {
                    match input {
                        Action::FormChar(c) => form.insert_char(c),
                        Action::FormBackspace => form.backspace(),
                        Action::FormNextField => form.focus_next(),
                        Action::FormPreviousField => form.focus_previous(),
                        _ => {}
                    }
                }
            }

            (Mode::Confirm, Action::ConfirmYes) => self.confirm_delete().await,
            (Mode::Confirm, Action::ConfirmNo) => self.cancel_delete(),

            _ => {}
        }
        Flow::Continue
    }
}
