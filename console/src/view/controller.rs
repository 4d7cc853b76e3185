//! View-binding controller for the roster page.
//!
//! [`RosterController`] owns the state an external view renders from: the
//! search query, the add-user form and its dialog flag, the delete
//! confirmation flow, and the filtered row sequence. It delegates every
//! mutation to [`RosterService`] and never touches the cache itself.

use crate::domain::ports::{BlobStore, UserDocuments};
use crate::domain::search::filter_roster;
use crate::domain::{AddUserRequest, Error, RosterService, RosterWatch, User, UserId};
use crate::view::columns::{ColumnSpec, ROSTER_COLUMNS};

/// Entry form for a new user.
///
/// The employee id is uppercase-normalised at input time, so the operator
/// sees the canonical value while typing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddUserForm {
    employee_id: String,
    name: String,
    trade: String,
}

impl AddUserForm {
    /// Replace the employee id field, normalising to uppercase.
    pub fn set_employee_id(&mut self, value: impl AsRef<str>) {
        self.employee_id = value.as_ref().to_uppercase();
    }

    /// Replace the name field.
    pub fn set_name(&mut self, value: impl Into<String>) {
        self.name = value.into();
    }

    /// Replace the trade field.
    pub fn set_trade(&mut self, value: impl Into<String>) {
        self.trade = value.into();
    }

    /// Current employee id field contents.
    #[must_use]
    pub fn employee_id(&self) -> &str {
        &self.employee_id
    }

    /// Current name field contents.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current trade field contents.
    #[must_use]
    pub fn trade(&self) -> &str {
        &self.trade
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self) -> AddUserRequest {
        AddUserRequest {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            trade: self.trade.clone(),
        }
    }
}

/// State and trigger handlers exposed to the external view.
#[derive(Debug)]
pub struct RosterController<D, B> {
    service: RosterService<D, B>,
    roster: RosterWatch,
    search: String,
    add_dialog_open: bool,
    form: AddUserForm,
    confirm_delete_open: bool,
    pending_delete: Option<UserId>,
}

impl<D, B> RosterController<D, B> {
    /// Build a controller over a mutation service and a roster watch.
    pub fn new(service: RosterService<D, B>, roster: RosterWatch) -> Self {
        Self {
            service,
            roster,
            search: String::new(),
            add_dialog_open: false,
            form: AddUserForm::default(),
            confirm_delete_open: false,
            pending_delete: None,
        }
    }

    /// Column definitions for the table widget.
    #[must_use]
    pub fn columns() -> &'static [ColumnSpec] {
        &ROSTER_COLUMNS
    }

    /// Replace the free-text search query.
    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    /// Current search query.
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Rows the table should render: the most recently delivered snapshot,
    /// narrowed by the current query.
    #[must_use]
    pub fn visible_rows(&self) -> Vec<User> {
        filter_roster(&self.roster.current().users, &self.search)
    }

    /// Wait until the next snapshot is delivered, signalling a re-render.
    ///
    /// Returns `false` once the session has stopped.
    pub async fn roster_changed(&mut self) -> bool {
        self.roster.changed().await
    }

    /// Whether the add-user dialog is open.
    #[must_use]
    pub fn add_dialog_open(&self) -> bool {
        self.add_dialog_open
    }

    /// Open the add-user dialog.
    pub fn open_add_dialog(&mut self) {
        self.add_dialog_open = true;
    }

    /// Close the add-user dialog without writing, discarding the form.
    pub fn cancel_add(&mut self) {
        self.form.clear();
        self.add_dialog_open = false;
    }

    /// Entry form contents.
    #[must_use]
    pub fn form(&self) -> &AddUserForm {
        &self.form
    }

    /// Mutable entry form, for the view's input bindings.
    pub fn form_mut(&mut self) -> &mut AddUserForm {
        &mut self.form
    }

    /// Whether the delete confirmation dialog is open.
    #[must_use]
    pub fn confirm_delete_open(&self) -> bool {
        self.confirm_delete_open
    }

    /// Record the delete target and open the confirmation dialog. No remote
    /// call happens until [`RosterController::confirm_delete`].
    pub fn request_delete(&mut self, id: UserId) {
        self.pending_delete = Some(id);
        self.confirm_delete_open = true;
    }

    /// Close the confirmation dialog without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.confirm_delete_open = false;
    }

    /// The record currently awaiting delete confirmation.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&UserId> {
        self.pending_delete.as_ref()
    }

    /// Whether the logout control should be enabled for `user`.
    ///
    /// UI-level guard only; the store-side operation is idempotent anyway.
    #[must_use]
    pub fn can_log_out(user: &User) -> bool {
        user.is_logged_in()
    }
}

impl<D, B> RosterController<D, B>
where
    D: UserDocuments,
    B: BlobStore,
{
    /// Submit the entry form.
    ///
    /// On success the form is cleared and the dialog closed; on failure both
    /// are left intact so the operator can correct and resubmit, and the
    /// typed error is returned for display.
    pub async fn submit_add(&mut self) -> Result<User, Error> {
        let user = self.service.add_user(self.form.to_request()).await?;
        self.form.clear();
        self.add_dialog_open = false;
        Ok(user)
    }

    /// Confirm the pending deletion.
    ///
    /// On success the pending target is cleared and the dialog closed. On
    /// failure both are kept so the operator can retry or cancel.
    pub async fn confirm_delete(&mut self) -> Result<(), Error> {
        let Some(id) = self.pending_delete.clone() else {
            return Err(Error::validation("no deletion is pending"));
        };
        self.service.delete_user(&id).await?;
        self.pending_delete = None;
        self.confirm_delete_open = false;
        Ok(())
    }

    /// Revoke the push token of `id`.
    pub async fn log_out(&self, id: &UserId) -> Result<(), Error> {
        self.service.log_out_user(id).await
    }
}
