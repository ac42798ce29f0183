use std::sync::Arc;

use async_trait::async_trait;
use contactbook_core::{
    Contact, ContactDetails, ContactId, ContactValues, ServiceTraitBounds, Validate,
};
use futures::future::try_join;
#[cfg(test)]
use mockall::automock;

use crate::{
    constants::{
        MSG_CONTACT_CREATED, MSG_CONTACT_DELETED, MSG_CONTACT_UPDATED, STATUS_CREATED,
        STATUS_NOT_FOUND, STATUS_OK,
    },
    external::{
        self,
        contact_store::{ContactStoreClientApi, StoreResponse},
    },
    state::ContactState,
    ui::{ConfirmationApi, NavigationApi, NotificationApi, Route},
};

use super::{Error, Result};
use log::{debug, error, info, warn};

/// Proof that the user confirmed deleting a contact. Only [ContactServiceApi::confirm_delete]
/// hands these out, so a deletion can't skip the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteConfirmation {
    contact_id: ContactId,
}

impl DeleteConfirmation {
    pub(crate) fn new(contact_id: ContactId) -> Self {
        Self { contact_id }
    }

    pub fn contact_id(&self) -> &ContactId {
        &self.contact_id
    }
}

#[cfg(test)]
impl ServiceTraitBounds for MockContactServiceApi {}

#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ContactServiceApi: ServiceTraitBounds {
    /// Loads all contacts and groups from the store into the local state
    async fn load(&self) -> Result<()>;

    /// Returns the contact with the given id from the store, together with its group
    async fn get_contact(&self, id: &ContactId) -> Result<ContactDetails>;

    /// Creates a contact in the store and appends it locally once the store accepted it
    async fn create_contact(&self, values: ContactValues) -> Result<Contact>;

    /// Updates a contact in the store and replaces it locally once the store accepted it
    async fn update_contact(&self, id: &ContactId, values: ContactValues) -> Result<Contact>;

    /// Asks the user to confirm the deletion of the given contact
    async fn confirm_delete(&self, id: &ContactId) -> Option<DeleteConfirmation>;

    /// Removes the confirmed contact locally right away and deletes it in the store, rolling
    /// the local state back if the store doesn't confirm the deletion
    async fn delete_contact(&self, confirmation: DeleteConfirmation) -> Result<()>;

    /// Confirms and deletes the given contact. Returns false, if the user cancelled.
    async fn remove_contact(&self, id: &ContactId) -> Result<bool>;
}

/// The contact service keeps the local contact state in sync with the remote store
#[derive(Clone)]
pub struct ContactService {
    store: Arc<dyn ContactStoreClientApi>,
    state: ContactState,
    notification: Arc<dyn NotificationApi>,
    navigation: Arc<dyn NavigationApi>,
    confirmation: Arc<dyn ConfirmationApi>,
}

impl ServiceTraitBounds for ContactService {}

impl ContactService {
    pub fn new(
        store: Arc<dyn ContactStoreClientApi>,
        state: ContactState,
        notification: Arc<dyn NotificationApi>,
        navigation: Arc<dyn NavigationApi>,
        confirmation: Arc<dyn ConfirmationApi>,
    ) -> Self {
        Self {
            store,
            state,
            notification,
            navigation,
            confirmation,
        }
    }

    /// Logs the error and shows it to the user
    fn report(&self, action: &str, e: Error) -> Error {
        error!("Could not {action}: {e}");
        self.notification.error(&format!("Could not {action}: {e}"));
        e
    }
}

/// Unwraps the data, if the store answered with the status the operation expects
fn expect_status<T>(response: StoreResponse<T>, expected: u16) -> Result<T> {
    if response.status != expected {
        return Err(Error::UnexpectedStatus {
            expected,
            actual: response.status,
        });
    }
    Ok(response.data)
}

fn not_found_or(e: external::Error) -> Error {
    match e.status() {
        Some(STATUS_NOT_FOUND) => Error::NotFound,
        _ => Error::ExternalApi(e),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ContactServiceApi for ContactService {
    async fn load(&self) -> Result<()> {
        debug!("loading contacts and groups");
        self.state.begin_loading();
        let result = try_join(self.store.get_all_contacts(), self.store.get_all_groups()).await;
        match result {
            Ok((contacts, groups)) => {
                info!(
                    "Loaded {} contacts and {} groups",
                    contacts.data.len(),
                    groups.data.len()
                );
                self.state.replace_all(contacts.data, groups.data);
                self.state.end_loading();
                Ok(())
            }
            Err(e) => {
                error!("Could not load contacts: {e}");
                self.state.end_loading();
                Err(e.into())
            }
        }
    }

    async fn get_contact(&self, id: &ContactId) -> Result<ContactDetails> {
        debug!("getting contact with id: {id}");
        let contact = self.store.get_contact(id).await.map_err(not_found_or)?.data;
        let group = match contact.group {
            Some(ref group_id) => match self.store.get_group(group_id).await {
                Ok(resp) => Some(resp.data),
                Err(e) if e.status() == Some(STATUS_NOT_FOUND) => {
                    warn!("Group {group_id} of contact {id} does not exist");
                    None
                }
                Err(e) => return Err(e.into()),
            },
            None => None,
        };
        Ok(ContactDetails { contact, group })
    }

    async fn create_contact(&self, values: ContactValues) -> Result<Contact> {
        if let Err(e) = values.validate() {
            return Err(self.report("create contact", e.into()));
        }

        self.state.begin_loading();
        let result = match self.store.create_contact(&values).await {
            Ok(resp) => expect_status(resp, STATUS_CREATED),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(contact) => {
                info!("Created contact {}", contact.id);
                self.state.append(contact.clone());
                self.state.end_loading();
                self.notification.success(MSG_CONTACT_CREATED);
                self.navigation.navigate(Route::Contacts);
                Ok(contact)
            }
            Err(e) => {
                self.state.end_loading();
                Err(self.report("create contact", e))
            }
        }
    }

    async fn update_contact(&self, id: &ContactId, values: ContactValues) -> Result<Contact> {
        if let Err(e) = values.validate() {
            return Err(self.report("update contact", e.into()));
        }

        self.state.begin_loading();
        let result = match self.store.update_contact(id, &values).await {
            Ok(resp) => expect_status(resp, STATUS_OK),
            Err(e) => Err(not_found_or(e)),
        };

        match result {
            Ok(contact) => {
                info!("Updated contact {}", contact.id);
                if !self.state.replace_contact(contact.clone()) {
                    warn!("Updated contact {} was not in the local state", contact.id);
                }
                self.state.end_loading();
                self.notification.success(MSG_CONTACT_UPDATED);
                self.navigation.navigate(Route::Contacts);
                Ok(contact)
            }
            Err(e) => {
                self.state.end_loading();
                Err(self.report("update contact", e))
            }
        }
    }

    async fn confirm_delete(&self, id: &ContactId) -> Option<DeleteConfirmation> {
        let fullname = self.state.find(id).map(|c| c.fullname);
        if self.confirmation.confirm_delete(id, fullname).await {
            Some(DeleteConfirmation::new(id.clone()))
        } else {
            debug!("Deletion of contact {id} was cancelled");
            None
        }
    }

    async fn delete_contact(&self, confirmation: DeleteConfirmation) -> Result<()> {
        let id = confirmation.contact_id;
        let snapshot = self.state.snapshot();
        self.state.remove(&id);

        let result = match self.store.delete_contact(&id).await {
            Ok(resp) => expect_status(resp, STATUS_OK),
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => {
                info!("Deleted contact {id}");
                self.notification.success(MSG_CONTACT_DELETED);
                Ok(())
            }
            Err(e) => {
                warn!("Rolling back deletion of contact {id}");
                self.state.restore(snapshot);
                Err(self.report("delete contact", e))
            }
        }
    }

    async fn remove_contact(&self, id: &ContactId) -> Result<bool> {
        match self.confirm_delete(id).await {
            Some(confirmation) => {
                self.delete_contact(confirmation).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
