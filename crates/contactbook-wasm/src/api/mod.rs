use wasm_bindgen::prelude::*;

pub mod contacts;

#[wasm_bindgen]
pub struct Api;

#[wasm_bindgen]
impl Api {
    #[wasm_bindgen]
    pub fn contacts() -> contacts::Contacts {
        contacts::Contacts::new()
    }

    /// Resolves a location path to the canonical path of its page, if it's one of ours
    #[wasm_bindgen]
    pub fn resolve_route(path: &str) -> Option<String> {
        contactbook_api::ui::Route::resolve(path).map(|r| r.path())
    }

    #[wasm_bindgen]
    pub fn version() -> String {
        crate::VERSION.to_owned()
    }
}
