use std::str::FromStr;

use crate::TSResult;
use crate::data::{
    StateEventWeb,
    contact::{ContactDetailWeb, ContactPayload, ContactWeb, ContactsResponse, GroupsResponse},
};
use crate::{Result, context::get_ctx};
use contactbook_api::data::{ContactId, ContactValues};
use async_broadcast::RecvError;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct Contacts;

fn parse_payload(payload: JsValue) -> Result<ContactValues> {
    let payload: ContactPayload = serde_wasm_bindgen::from_value(payload)?;
    Ok(ContactValues::try_from(payload)?)
}

#[wasm_bindgen]
impl Contacts {
    #[wasm_bindgen]
    pub fn new() -> Self {
        Contacts
    }

    /// Loads contacts and groups from the store
    #[wasm_bindgen(unchecked_return_type = "TSResult<void>")]
    pub async fn load(&self) -> JsValue {
        let res: Result<()> = async {
            get_ctx().contact_service.load().await?;
            Ok(())
        }
        .await;
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<ContactsResponse>")]
    pub fn list(&self) -> JsValue {
        TSResult::Success(ContactsResponse {
            contacts: get_ctx()
                .state
                .contacts()
                .into_iter()
                .map(|c| c.into())
                .collect(),
        })
        .to_js()
    }

    /// The contacts matching the last applied search
    #[wasm_bindgen(unchecked_return_type = "TSResult<ContactsResponse>")]
    pub fn filtered(&self) -> JsValue {
        TSResult::Success(ContactsResponse {
            contacts: get_ctx()
                .state
                .filtered_contacts()
                .into_iter()
                .map(|c| c.into())
                .collect(),
        })
        .to_js()
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<GroupsResponse>")]
    pub fn groups(&self) -> JsValue {
        TSResult::Success(GroupsResponse {
            groups: get_ctx()
                .state
                .groups()
                .into_iter()
                .map(|g| g.into())
                .collect(),
        })
        .to_js()
    }

    #[wasm_bindgen]
    pub fn loading(&self) -> bool {
        get_ctx().state.loading()
    }

    #[wasm_bindgen]
    pub fn search(&self, query: &str) {
        get_ctx().search_service.search(query);
    }

    #[wasm_bindgen]
    pub fn cancel_search(&self) {
        get_ctx().search_service.cancel();
    }

    #[wasm_bindgen]
    pub async fn subscribe(&self, callback: js_sys::Function) {
        wasm_bindgen_futures::spawn_local(async move {
            info!("Subscribed to contact state changes");
            let mut receiver = get_ctx().state.subscribe();
            loop {
                let event = match receiver.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Overflowed(skipped)) => {
                        warn!("State subscriber lagged behind, skipped {skipped} events");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                match serde_wasm_bindgen::to_value(&StateEventWeb::from(event)) {
                    Ok(event) => {
                        if let Err(e) = callback.call1(&JsValue::NULL, &event) {
                            error!("Error while sending state event: {e:?}");
                        }
                    }
                    Err(e) => {
                        error!("Error while serializing state event: {e}");
                    }
                }
            }
        });
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<ContactDetailWeb>")]
    pub async fn detail(&self, id: &str) -> JsValue {
        let res: Result<ContactDetailWeb> = async {
            let id = ContactId::from_str(id)?;
            let details = get_ctx().contact_service.get_contact(&id).await?;
            Ok(details.into())
        }
        .await;
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<ContactWeb>")]
    pub async fn create(
        &self,
        #[wasm_bindgen(unchecked_param_type = "ContactPayload")] payload: JsValue,
    ) -> JsValue {
        let res: Result<ContactWeb> = async {
            let values = parse_payload(payload)?;
            let contact = get_ctx().contact_service.create_contact(values).await?;
            Ok(contact.into())
        }
        .await;
        TSResult::res_to_js(res)
    }

    #[wasm_bindgen(unchecked_return_type = "TSResult<ContactWeb>")]
    pub async fn update(
        &self,
        id: &str,
        #[wasm_bindgen(unchecked_param_type = "ContactPayload")] payload: JsValue,
    ) -> JsValue {
        let res: Result<ContactWeb> = async {
            let id = ContactId::from_str(id)?;
            let values = parse_payload(payload)?;
            let contact = get_ctx()
                .contact_service
                .update_contact(&id, values)
                .await?;
            Ok(contact.into())
        }
        .await;
        TSResult::res_to_js(res)
    }

    /// Asks for confirmation and deletes the contact. Resolves to false if the user cancelled.
    #[wasm_bindgen(unchecked_return_type = "TSResult<boolean>")]
    pub async fn remove(&self, id: &str) -> JsValue {
        let res: Result<bool> = async {
            let id = ContactId::from_str(id)?;
            Ok(get_ctx().contact_service.remove_contact(&id).await?)
        }
        .await;
        TSResult::res_to_js(res)
    }
}

impl Default for Contacts {
    fn default() -> Self {
        Contacts
    }
}
