use contactbook_api::data::ValidationError;
use contactbook_api::external::Error as ExternalError;
use contactbook_api::service::Error as ServiceError;
use log::error;
use serde::Serialize;
use thiserror::Error;
use tsify::Tsify;
use wasm_bindgen::prelude::*;

#[derive(Debug, Error)]
pub enum WasmError {
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    #[error("wasm serialization error: {0}")]
    WasmSerialization(#[from] serde_wasm_bindgen::Error),

    #[error("api init error: {0}")]
    Init(#[from] anyhow::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("invalid ui callback: {0}")]
    UiCallback(String),
}

#[derive(Tsify, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[tsify(into_wasm_abi)]
enum JsErrorType {
    FieldEmpty,
    FieldInvalid,
    InvalidId,
    NotFound,
    ExternalApi,
    StoreRejected,
    UnexpectedStatus,
    Serialization,
    Init,
    UiCallback,
}

#[derive(Tsify, Debug, Clone, Serialize)]
#[tsify(into_wasm_abi)]
pub struct JsErrorData {
    error: JsErrorType,
    message: String,
    code: u16,
}

impl From<WasmError> for JsValue {
    fn from(error: WasmError) -> JsValue {
        serde_wasm_bindgen::to_value(&JsErrorData::from(error)).expect("can serialize error")
    }
}

impl From<WasmError> for JsErrorData {
    fn from(error: WasmError) -> JsErrorData {
        error!("{error}");
        match error {
            WasmError::Service(e) => match e {
                ServiceError::NotFound => err_404(e, JsErrorType::NotFound),
                ServiceError::Validation(e) => validation_error_data(e),
                ServiceError::ExternalApi(e) => external_error_data(e),
                ServiceError::UnexpectedStatus { .. } => {
                    err_500(e, JsErrorType::UnexpectedStatus)
                }
            },
            WasmError::Validation(e) => validation_error_data(e),
            WasmError::WasmSerialization(e) => err_500(e, JsErrorType::Serialization),
            WasmError::Init(e) => err_500(e, JsErrorType::Init),
            WasmError::UiCallback(_) => err_500(error, JsErrorType::UiCallback),
        }
    }
}

fn validation_error_data(e: ValidationError) -> JsErrorData {
    match e {
        ValidationError::FieldEmpty(_) => err_400(e, JsErrorType::FieldEmpty),
        ValidationError::FieldInvalid(_) => err_400(e, JsErrorType::FieldInvalid),
        ValidationError::InvalidId => err_400(e, JsErrorType::InvalidId),
    }
}

/// Rejections of the store keep the status the store answered with
fn external_error_data(e: ExternalError) -> JsErrorData {
    match e {
        ExternalError::Status(code) => JsErrorData {
            error: JsErrorType::StoreRejected,
            message: e.to_string(),
            code,
        },
        ExternalError::Api(_) | ExternalError::InvalidUrl => err_500(e, JsErrorType::ExternalApi),
    }
}

fn err_400<E: ToString>(e: E, t: JsErrorType) -> JsErrorData {
    JsErrorData {
        error: t,
        message: e.to_string(),
        code: 400,
    }
}

fn err_404<E: ToString>(e: E, t: JsErrorType) -> JsErrorData {
    JsErrorData {
        error: t,
        message: e.to_string(),
        code: 404,
    }
}

fn err_500<E: ToString>(e: E, t: JsErrorType) -> JsErrorData {
    JsErrorData {
        error: t,
        message: e.to_string(),
        code: 500,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contactbook_api::data::Field;

    #[test]
    fn service_errors_map_to_codes() {
        let data = JsErrorData::from(WasmError::Service(ServiceError::NotFound));
        assert_eq!(data.error, JsErrorType::NotFound);
        assert_eq!(data.code, 404);

        let data = JsErrorData::from(WasmError::Service(ServiceError::Validation(
            ValidationError::FieldEmpty(Field::Email),
        )));
        assert_eq!(data.error, JsErrorType::FieldEmpty);
        assert_eq!(data.code, 400);

        let data = JsErrorData::from(WasmError::Service(ServiceError::UnexpectedStatus {
            expected: 201,
            actual: 200,
        }));
        assert_eq!(data.error, JsErrorType::UnexpectedStatus);
        assert_eq!(data.code, 500);
    }

    #[test]
    fn store_rejection_keeps_status() {
        let data = JsErrorData::from(WasmError::Service(ServiceError::ExternalApi(
            ExternalError::Status(422),
        )));
        assert_eq!(data.error, JsErrorType::StoreRejected);
        assert_eq!(data.code, 422);
        assert_eq!(data.message, "External Store responded with status 422");
    }

    #[test]
    fn ui_callback_error() {
        let data = JsErrorData::from(WasmError::UiCallback("navigate".to_owned()));
        assert_eq!(data.error, JsErrorType::UiCallback);
        assert_eq!(data.message, "invalid ui callback: navigate");
    }
}
