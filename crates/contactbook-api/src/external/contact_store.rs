use async_trait::async_trait;
use contactbook_core::{Contact, ContactId, ContactValues, Group, GroupId, ServiceTraitBounds};
use log::debug;
use serde::de::DeserializeOwned;

use super::Error;
use crate::{
    Config,
    constants::{CONTACTS_PATH, GROUPS_PATH},
};

/// Generic result type
pub type Result<T> = std::result::Result<T, Error>;

/// A successful answer of the store, with the status code it was delivered with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreResponse<T> {
    pub status: u16,
    pub data: T,
}

impl<T> StoreResponse<T> {
    pub fn new(status: u16, data: T) -> Self {
        Self { status, data }
    }
}

#[cfg(test)]
use mockall::automock;

#[cfg_attr(test, automock)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ContactStoreClientApi: ServiceTraitBounds {
    /// Fetches all contacts, in the order of the store
    async fn get_all_contacts(&self) -> Result<StoreResponse<Vec<Contact>>>;
    /// Fetches all contact groups
    async fn get_all_groups(&self) -> Result<StoreResponse<Vec<Group>>>;
    /// Fetches a single contact
    async fn get_contact(&self, id: &ContactId) -> Result<StoreResponse<Contact>>;
    /// Fetches a single group
    async fn get_group(&self, id: &GroupId) -> Result<StoreResponse<Group>>;
    /// Creates a contact, returning the stored contact with its assigned id
    async fn create_contact(&self, values: &ContactValues) -> Result<StoreResponse<Contact>>;
    /// Replaces the values of an existing contact
    async fn update_contact(
        &self,
        id: &ContactId,
        values: &ContactValues,
    ) -> Result<StoreResponse<Contact>>;
    /// Deletes the contact with the given id
    async fn delete_contact(&self, id: &ContactId) -> Result<StoreResponse<()>>;
}

#[derive(Debug, Clone)]
pub struct ContactStoreClient {
    cl: reqwest::Client,
    base_url: url::Url,
}

impl ServiceTraitBounds for ContactStoreClient {}

#[cfg(test)]
impl ServiceTraitBounds for MockContactStoreClientApi {}

impl ContactStoreClient {
    pub fn from_config(config: &Config) -> Self {
        Self {
            cl: reqwest::Client::new(),
            base_url: config.store_url.clone(),
        }
    }

    fn url(&self, path: &str) -> Result<url::Url> {
        self.base_url.join(path).map_err(|_| Error::InvalidUrl)
    }

    fn contact_url(&self, id: &ContactId) -> Result<url::Url> {
        self.url(&format!("{CONTACTS_PATH}/{id}"))
    }

    fn group_url(&self, id: &GroupId) -> Result<url::Url> {
        self.url(&format!("{GROUPS_PATH}/{id}"))
    }

    /// Checks the status and decodes the body of a successful response
    async fn read_json<T: DeserializeOwned>(resp: reqwest::Response) -> Result<StoreResponse<T>> {
        let status = Self::check_status(&resp)?;
        let data: T = resp.json().await?;
        Ok(StoreResponse::new(status, data))
    }

    fn check_status(resp: &reqwest::Response) -> Result<u16> {
        let status = resp.status();
        debug!("Store responded to {} with {status}", resp.url());
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }
        Ok(status.as_u16())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ContactStoreClientApi for ContactStoreClient {
    async fn get_all_contacts(&self) -> Result<StoreResponse<Vec<Contact>>> {
        let resp = self.cl.get(self.url(CONTACTS_PATH)?).send().await?;
        Self::read_json(resp).await
    }

    async fn get_all_groups(&self) -> Result<StoreResponse<Vec<Group>>> {
        let resp = self.cl.get(self.url(GROUPS_PATH)?).send().await?;
        Self::read_json(resp).await
    }

    async fn get_contact(&self, id: &ContactId) -> Result<StoreResponse<Contact>> {
        let resp = self.cl.get(self.contact_url(id)?).send().await?;
        Self::read_json(resp).await
    }

    async fn get_group(&self, id: &GroupId) -> Result<StoreResponse<Group>> {
        let resp = self.cl.get(self.group_url(id)?).send().await?;
        Self::read_json(resp).await
    }

    async fn create_contact(&self, values: &ContactValues) -> Result<StoreResponse<Contact>> {
        let resp = self
            .cl
            .post(self.url(CONTACTS_PATH)?)
            .json(values)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn update_contact(
        &self,
        id: &ContactId,
        values: &ContactValues,
    ) -> Result<StoreResponse<Contact>> {
        let resp = self
            .cl
            .put(self.contact_url(id)?)
            .json(values)
            .send()
            .await?;
        Self::read_json(resp).await
    }

    async fn delete_contact(&self, id: &ContactId) -> Result<StoreResponse<()>> {
        let resp = self.cl.delete(self.contact_url(id)?).send().await?;
        // the body of a delete is irrelevant, only the status counts
        let status = Self::check_status(&resp)?;
        Ok(StoreResponse::new(status, ()))
    }
}
