#![allow(clippy::arc_with_non_send_sync)]
use super::CONTEXT;
use crate::ui::JsUi;
use contactbook_api::{
    Config, ContactState,
    external::contact_store::ContactStoreClient,
    service::{
        contact_service::{ContactService, ContactServiceApi},
        search_service::{SearchService, SearchServiceApi},
    },
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Context {
    pub contact_service: Arc<dyn ContactServiceApi>,
    pub search_service: Arc<dyn SearchServiceApi>,
    pub state: ContactState,
    pub cfg: Config,
}

impl Context {
    pub fn new(cfg: Config, ui: JsUi) -> Self {
        let state = ContactState::new();
        let store_client = Arc::new(ContactStoreClient::from_config(&cfg));
        let ui = Arc::new(ui);

        let contact_service = Arc::new(ContactService::new(
            store_client,
            state.clone(),
            ui.clone(),
            ui.clone(),
            ui,
        ));
        let search_service = Arc::new(SearchService::new(state.clone(), cfg.search_debounce()));

        Self {
            contact_service,
            search_service,
            state,
            cfg,
        }
    }
}

pub fn get_ctx() -> &'static Context {
    CONTEXT.with(|c| c.borrow().expect("Context is not initialized"))
}
