pub mod assemble;
pub mod data;
pub mod footer;
pub mod theme;

use std::path::Path;

use flow_core::{render_to, RenderError, RenderOptions};

pub use assemble::{assemble, logo};
pub use data::{Field, InvoiceData, LineItem, SummaryLine};
pub use footer::footer;
pub use theme::{Theme, ThemeError};

/// Render `data` with `theme` to PDF bytes. A missing or unreadable logo
/// is replaced by a placeholder.
pub fn render_invoice(
    data: &InvoiceData,
    theme: &Theme,
    logo_path: Option<&Path>,
    compress: bool,
) -> Result<Vec<u8>, RenderError> {
    let blocks = assemble(data, theme, logo(logo_path, theme));
    let options = RenderOptions {
        compress,
        title: Some(format!("Tax Invoice {}", data.number)),
    };
    render_to(
        Vec::new(),
        &theme.geometry(),
        &theme.layout_config(),
        &blocks,
        &footer(theme),
        &options,
    )
}
