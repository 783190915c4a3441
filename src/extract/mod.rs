pub mod assets;
pub mod content;

#[cfg(test)]
mod tests;

pub use assets::{ExtractedAssets, ImageAsset, ImageKind, extract_assets};
pub use content::{ExtractedContent, extract_content, page_description, page_title};
