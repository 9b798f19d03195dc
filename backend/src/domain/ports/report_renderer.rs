//! Port for turning a report into a downloadable document.

use crate::domain::Report;

use super::define_port_error;

define_port_error! {
    /// Errors raised while rendering a report document.
    pub enum RenderError {
        /// Laying out the document content failed.
        Layout { message: String } => "report layout failed: {message}",
        /// Writing the document container failed.
        Package { message: String } => "report packaging failed: {message}",
    }
}

/// Renders a [`Report`] into one document format.
#[cfg_attr(test, mockall::automock)]
pub trait ReportRenderer: Send + Sync {
    /// MIME type of the produced document.
    fn media_type(&self) -> &'static str;

    /// File extension without the leading dot.
    fn extension(&self) -> &'static str;

    /// Produce the document bytes.
    fn render(&self, report: &Report) -> Result<Vec<u8>, RenderError>;
}
