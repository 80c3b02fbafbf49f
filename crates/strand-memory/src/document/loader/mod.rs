mod text;

#[cfg(feature = "pdf")]
mod pdf;
#[cfg(feature = "web")]
mod web;

pub use text::TextLoader;

#[cfg(feature = "pdf")]
pub use pdf::PdfLoader;
#[cfg(feature = "web")]
pub use web::WebLoader;
