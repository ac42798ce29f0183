#[cfg(test)]
#[allow(clippy::module_inception)]
pub mod tests {
    use std::sync::Arc;

    use async_broadcast::{Receiver, TryRecvError};
    use async_trait::async_trait;
    use contactbook_core::{
        Contact, ContactId, ContactValues, Group, GroupId, ServiceTraitBounds,
    };

    use crate::{
        external::{
            self,
            contact_store::{
                ContactStoreClientApi, MockContactStoreClientApi, Result as StoreResult,
                StoreResponse,
            },
        },
        state::StateEvent,
    };

    pub fn contact(id: u64, fullname: &str) -> Contact {
        Contact {
            id: ContactId::from(id),
            fullname: fullname.to_owned(),
            photo: None,
            mobile: None,
            email: None,
            job: None,
            group: None,
        }
    }

    pub fn group(id: u64, name: &str) -> Group {
        Group {
            id: GroupId::from(id),
            name: name.to_owned(),
        }
    }

    pub fn valid_values() -> ContactValues {
        ContactValues {
            fullname: "Sara Ahmadi".to_owned(),
            photo: Some("https://example.com/sara.png".to_owned()),
            mobile: "09123456789".to_owned(),
            email: "sara@example.com".to_owned(),
            job: "Engineer".to_owned(),
            group: GroupId::from(1),
        }
    }

    pub fn ids(contacts: &[Contact]) -> Vec<String> {
        contacts.iter().map(|c| c.id.to_string()).collect()
    }

    /// Collects all events that were published so far
    pub fn drain_events(rx: &mut Receiver<StateEvent>) -> Vec<StateEvent> {
        let mut events = vec![];
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Overflowed(_)) => continue,
                Err(_) => break,
            }
        }
        events
    }

    /// A real transport failure, nothing listens on port 1
    pub async fn transport_error() -> external::Error {
        let err = reqwest::Client::new()
            .get("http://127.0.0.1:1")
            .send()
            .await
            .expect_err("nothing listens on port 1");
        external::Error::Api(err)
    }

    /// The store request a [GatedStore] holds back
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Gated {
        GetAllContacts,
        DeleteContact,
    }

    /// Delegates to the mock, but lets the gated request wait until the gate is notified
    pub struct GatedStore {
        inner: MockContactStoreClientApi,
        gated: Gated,
        gate: Arc<tokio::sync::Notify>,
    }

    impl GatedStore {
        pub fn new(
            inner: MockContactStoreClientApi,
            gated: Gated,
            gate: Arc<tokio::sync::Notify>,
        ) -> Self {
            Self { inner, gated, gate }
        }

        async fn pass(&self, request: Gated) {
            if self.gated == request {
                self.gate.notified().await;
            }
        }
    }

    impl ServiceTraitBounds for GatedStore {}

    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    impl ContactStoreClientApi for GatedStore {
        async fn get_all_contacts(&self) -> StoreResult<StoreResponse<Vec<Contact>>> {
            self.pass(Gated::GetAllContacts).await;
            self.inner.get_all_contacts().await
        }

        async fn get_all_groups(&self) -> StoreResult<StoreResponse<Vec<Group>>> {
            self.inner.get_all_groups().await
        }

        async fn get_contact(&self, id: &ContactId) -> StoreResult<StoreResponse<Contact>> {
            self.inner.get_contact(id).await
        }

        async fn get_group(&self, id: &GroupId) -> StoreResult<StoreResponse<Group>> {
            self.inner.get_group(id).await
        }

        async fn create_contact(&self, values: &ContactValues) -> StoreResult<StoreResponse<Contact>> {
            self.inner.create_contact(values).await
        }

        async fn update_contact(
            &self,
            id: &ContactId,
            values: &ContactValues,
        ) -> StoreResult<StoreResponse<Contact>> {
            self.inner.update_contact(id, values).await
        }

        async fn delete_contact(&self, id: &ContactId) -> StoreResult<StoreResponse<()>> {
            self.pass(Gated::DeleteContact).await;
            self.inner.delete_contact(id).await
        }
    }
}
