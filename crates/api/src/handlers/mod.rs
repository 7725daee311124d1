//! Request handlers. Each submodule maps errors via [`AppError`](crate::error::AppError).

pub mod generate;
