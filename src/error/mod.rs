mod app_error;
mod response_converter;

pub use app_error::{AppError, AppResult, LOGIN_FAILED_MESSAGE};
pub use response_converter::ResponseErrorConverter;
