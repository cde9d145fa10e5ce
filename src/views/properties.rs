//! Property list and create/edit form.
//!
//! The list is a local copy of the full collection and is refetched after
//! every mutation. Backend failures are logged and otherwise swallowed:
//! the list keeps its last contents and a failed submit keeps the form.

use crate::client::EstateApi;
use crate::model::{Property, PropertyId};
use crate::session::{SessionResult, SessionStore};
use crate::views::form::{FormError, PropertyForm};
use crate::views::Route;

/// Result of submitting the form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Created(Property),
    Updated(Property),
    /// The form did not parse; nothing was sent
    Invalid(FormError),
    /// The request failed; the form is left as it was
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct PropertiesView {
    properties: Vec<Property>,
    form: PropertyForm,
    editing: Option<PropertyId>,
    loaded: bool,
}

impl PropertiesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn form(&self) -> &PropertyForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PropertyForm {
        &mut self.form
    }

    /// Id of the property loaded into the form, if any
    pub fn editing(&self) -> Option<PropertyId> {
        self.editing
    }

    /// Whether the list has been fetched successfully at least once
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn heading(&self) -> &'static str {
        if self.is_editing() {
            "Edit Property"
        } else {
            "Add New Property"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Save Changes"
        } else {
            "Save Property"
        }
    }

    /// Entry guard. Without the session flag, returns the login route and
    /// fetches nothing; otherwise loads the collection.
    pub async fn mount<A, S>(&mut self, api: &A, session: &S) -> Option<Route>
    where
        A: EstateApi + ?Sized,
        S: SessionStore + ?Sized,
    {
        if !session.is_authenticated() {
            tracing::debug!("No session flag, redirecting to login");
            return Some(Route::Login);
        }

        self.refresh(api).await;
        None
    }

    /// Refetch the full collection. Returns whether the fetch succeeded.
    pub async fn refresh<A>(&mut self, api: &A) -> bool
    where
        A: EstateApi + ?Sized,
    {
        match api.list_properties().await {
            Ok(properties) => {
                tracing::debug!(count = properties.len(), "Fetched properties");
                self.properties = properties;
                self.loaded = true;
                true
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching properties");
                false
            }
        }
    }

    /// Load a row into the form and make it the edit target
    pub fn edit(&mut self, property: &Property) {
        self.form = PropertyForm::from_property(property);
        self.editing = Some(property.id);
    }

    /// Like [`edit`](Self::edit) but fetches the property first
    pub async fn edit_by_id<A>(&mut self, api: &A, id: PropertyId) -> bool
    where
        A: EstateApi + ?Sized,
    {
        match api.get_property(id).await {
            Ok(property) => {
                self.edit(&property);
                true
            }
            Err(e) => {
                tracing::error!(id, error = %e, "Error fetching property");
                false
            }
        }
    }

    /// Back to an empty create form
    pub fn cancel_edit(&mut self) {
        self.form.clear();
        self.editing = None;
    }

    /// Create or update depending on the edit target, then refetch and reset
    pub async fn submit<A>(&mut self, api: &A) -> SubmitOutcome
    where
        A: EstateApi + ?Sized,
    {
        let draft = match self.form.to_draft() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!(error = %e, "Property form rejected");
                return SubmitOutcome::Invalid(e);
            }
        };

        let outcome = match self.editing {
            Some(id) => api
                .update_property(id, &draft)
                .await
                .map(SubmitOutcome::Updated),
            None => api.create_property(&draft).await.map(SubmitOutcome::Created),
        };

        match outcome {
            Ok(outcome) => {
                self.refresh(api).await;
                self.cancel_edit();
                outcome
            }
            Err(e) => {
                tracing::error!(editing = ?self.editing, error = %e, "Error creating or updating property");
                SubmitOutcome::Failed
            }
        }
    }

    /// Delete by id and refetch. Returns whether the delete succeeded.
    pub async fn delete<A>(&mut self, api: &A, id: PropertyId) -> bool
    where
        A: EstateApi + ?Sized,
    {
        if let Err(e) = api.delete_property(id).await {
            tracing::error!(id, error = %e, "Error deleting property");
            return false;
        }

        if self.editing == Some(id) {
            self.cancel_edit();
        }
        self.refresh(api).await;
        true
    }

    /// Clear the session flag and go back to login. Local state is dropped
    /// even when the flag could not be removed.
    pub fn logout<S>(&mut self, session: &S) -> SessionResult<Route>
    where
        S: SessionStore + ?Sized,
    {
        self.properties.clear();
        self.loaded = false;
        self.cancel_edit();

        session.clear().map_err(|e| {
            tracing::error!(error = %e, "Failed to clear session flag");
            e
        })?;
        Ok(Route::Login)
    }
}
