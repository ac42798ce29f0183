use async_trait::async_trait;
use contactbook_api::{
    data::{ContactId, ServiceTraitBounds},
    ui::{ConfirmationApi, NavigationApi, NotificationApi, Route},
};
use js_sys::{Function, Promise, Reflect};
use log::error;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::{Result, error::WasmError};

/// The toast, router and confirm dialog callbacks handed in by the view layer
pub struct JsUi {
    success: Function,
    error: Function,
    navigate: Function,
    confirm_delete: Function,
}

impl ServiceTraitBounds for JsUi {}

fn callback(callbacks: &JsValue, name: &str) -> Result<Function> {
    Reflect::get(callbacks, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| WasmError::UiCallback(name.to_owned()))
}

impl JsUi {
    pub fn from_js(callbacks: &JsValue) -> Result<Self> {
        Ok(Self {
            success: callback(callbacks, "success")?,
            error: callback(callbacks, "error")?,
            navigate: callback(callbacks, "navigate")?,
            confirm_delete: callback(callbacks, "confirmDelete")?,
        })
    }
}

impl NotificationApi for JsUi {
    fn success(&self, message: &str) {
        if let Err(e) = self
            .success
            .call1(&JsValue::NULL, &JsValue::from_str(message))
        {
            error!("Error while showing success notification: {e:?}");
        }
    }

    fn error(&self, message: &str) {
        if let Err(e) = self
            .error
            .call1(&JsValue::NULL, &JsValue::from_str(message))
        {
            error!("Error while showing error notification: {e:?}");
        }
    }
}

impl NavigationApi for JsUi {
    fn navigate(&self, route: Route) {
        if let Err(e) = self
            .navigate
            .call1(&JsValue::NULL, &JsValue::from_str(&route.path()))
        {
            error!("Error while navigating to {route}: {e:?}");
        }
    }
}

#[async_trait(?Send)]
impl ConfirmationApi for JsUi {
    async fn confirm_delete(&self, contact_id: &ContactId, fullname: Option<String>) -> bool {
        let name = fullname.map(JsValue::from).unwrap_or(JsValue::UNDEFINED);
        let answer = match self.confirm_delete.call2(
            &JsValue::NULL,
            &JsValue::from_str(contact_id.as_str()),
            &name,
        ) {
            Ok(answer) => answer,
            Err(e) => {
                error!("Error while asking to confirm deletion of {contact_id}: {e:?}");
                return false;
            }
        };
        // the dialog may answer right away or with a promise
        match JsFuture::from(Promise::resolve(&answer)).await {
            Ok(confirmed) => confirmed.as_bool().unwrap_or(false),
            Err(e) => {
                error!("Confirmation of deletion of {contact_id} failed: {e:?}");
                false
            }
        }
    }
}
