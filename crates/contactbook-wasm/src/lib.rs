#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code, unused_imports))]
#![allow(clippy::arc_with_non_send_sync)]
use contactbook_api::Config as ApiConfig;
use log::{debug, info};
use serde::Deserialize;
use serde::Serialize;
use tsify::Tsify;
use wasm_bindgen::prelude::*;

use crate::error::{JsErrorData, WasmError};

#[cfg(target_arch = "wasm32")]
pub mod api;
#[cfg(target_arch = "wasm32")]
mod context;
mod data;
mod error;
#[cfg(target_arch = "wasm32")]
mod ui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Tsify, Debug, Clone, Deserialize)]
#[tsify(from_wasm_abi)]
pub struct Config {
    pub log_level: Option<String>,
    pub store_url: String,
    pub search_debounce_ms: Option<u64>,
}

#[wasm_bindgen(typescript_custom_section)]
const UI_CALLBACKS: &'static str = r#"
export interface UiCallbacks {
    success: (message: string) => void;
    error: (message: string) => void;
    navigate: (path: string) => void;
    confirmDelete: (contactId: string, fullname?: string) => boolean | Promise<boolean>;
}
"#;

pub type Result<T> = std::result::Result<T, error::WasmError>;

/// Result type for the TypeScript API
/// export type TSResult<T> = { Success: T } | { Error: JsErrorData };
/// To check if it's an error, just check `TSResult.Error` if it's not set, it's a `TSResult.Success`
/// even if `TSResult.Success` has `undefined` as a value.
#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub enum TSResult<T> {
    Success(T),
    Error(JsErrorData),
}

impl<T> TSResult<T>
where
    T: Serialize,
{
    pub fn err(e: WasmError) -> Self {
        TSResult::Error(JsErrorData::from(e))
    }

    pub fn to_js(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self).expect("can serialize TSResult")
    }

    pub fn res_to_js(res: Result<T>) -> JsValue {
        match res {
            Ok(v) => Self::Success(v).to_js(),
            Err(e) => Self::err(e).to_js(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
thread_local! {
    static CONTEXT: std::cell::RefCell<Option<&'static context::Context>> = const { std::cell::RefCell::new(None) } ;
}

fn parse_log_level(log_level: Option<&str>) -> log::LevelFilter {
    match log_level {
        Some("info") => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("warn") => log::LevelFilter::Warn,
        Some("error") => log::LevelFilter::Error,
        Some("trace") => log::LevelFilter::Trace,
        _ => log::LevelFilter::Info,
    }
}

/// Converts the JS config into the API config
fn api_config(config: &Config) -> Result<ApiConfig> {
    Ok(ApiConfig::new(&config.store_url, config.search_debounce_ms)?)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub async fn initialize_api(
    #[wasm_bindgen(unchecked_param_type = "Config")] cfg: JsValue,
    #[wasm_bindgen(unchecked_param_type = "UiCallbacks")] ui_callbacks: JsValue,
) -> Result<()> {
    // init config and API
    let config: Config = serde_wasm_bindgen::from_value(cfg)?;

    // init logging
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    let log_level = parse_log_level(config.log_level.as_deref());
    // only log from our own crates
    fern::Dispatch::new()
        .level(log::LevelFilter::Off)
        .level_for("contactbook_wasm", log_level)
        .level_for("contactbook_api", log_level)
        .level_for("contactbook_core", log_level)
        .chain(fern::Output::call(console_log::log))
        .apply()
        .expect("can initialize logging");

    let api_config = api_config(&config)?;
    let ui = ui::JsUi::from_js(&ui_callbacks)?;

    info!("Initialized WASM API {VERSION}");
    debug!("Config: {api_config:?}");

    // init context as static reference
    let ctx = context::Context::new(api_config, ui);
    CONTEXT.with(|context| {
        let mut context_ref = context.borrow_mut();
        if context_ref.is_none() {
            let leaked: &'static context::Context = Box::leak(Box::new(ctx)); // leak to get a static ref
            *context_ref = Some(leaked);
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_defaults_to_info() {
        assert_eq!(parse_log_level(None), log::LevelFilter::Info);
        assert_eq!(parse_log_level(Some("verbose")), log::LevelFilter::Info);
        assert_eq!(parse_log_level(Some("warn")), log::LevelFilter::Warn);
        assert_eq!(parse_log_level(Some("trace")), log::LevelFilter::Trace);
        assert_eq!(parse_log_level(Some("error")), log::LevelFilter::Error);
    }

    #[test]
    fn config_from_json() {
        let config: Config = serde_json::from_str(
            r#"{"log_level": "debug", "store_url": "http://localhost:9000"}"#,
        )
        .unwrap();
        let api_config = api_config(&config).unwrap();
        assert_eq!(api_config.store_url.as_str(), "http://localhost:9000/");
        assert_eq!(api_config.search_debounce_ms, 1000);
    }

    #[test]
    fn invalid_store_url_is_init_error() {
        let config = Config {
            log_level: None,
            store_url: "nope".to_owned(),
            search_debounce_ms: None,
        };
        assert!(matches!(api_config(&config), Err(WasmError::Init(_))));
    }
}
