mod error_response;
mod health;
mod providers;
mod summarize;

pub use error_response::{ErrorResponse, error_response};
pub use health::health_handler;
pub use providers::providers_handler;
pub use summarize::{SummaryResponse, summarize_pdf_handler};
