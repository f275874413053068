use crate::domain::model::CropRect;
use crate::domain::ports::{DocumentEngine, Storage};
use crate::utils::error::Result;

/// Reassembles block-level text regions into readable paragraphs: embedded
/// line breaks inside a block are stripped, each block is followed by a
/// blank-line separator.
pub fn reflow_blocks(blocks: &[String]) -> String {
    let mut out = String::new();
    for block in blocks {
        out.push_str(&block.replace('\n', ""));
        out.push_str("\n\n");
    }
    out
}

/// Persists the document, extracts the target page's text blocks and reflows
/// them. Best-effort commentary: failures propagate, there is no retry.
pub async fn summarize_document<E, T>(
    engine: &E,
    storage: &T,
    document: &[u8],
    artifact_name: &str,
    page_index: usize,
) -> Result<String>
where
    E: DocumentEngine,
    T: Storage,
{
    storage.write_file(artifact_name, document).await?;
    let blocks = engine.text_blocks(document, page_index)?;
    Ok(reflow_blocks(&blocks))
}

/// Persists the document, renders the cropped page region at the configured
/// zoom, and persists the resulting PNG.
pub async fn render_snapshot<E, T>(
    engine: &E,
    storage: &T,
    document: &[u8],
    document_artifact: &str,
    image_artifact: &str,
    page_index: usize,
    rect: CropRect,
    zoom: f32,
) -> Result<Vec<u8>>
where
    E: DocumentEngine,
    T: Storage,
{
    storage.write_file(document_artifact, document).await?;
    let png = engine.render_region(document, page_index, rect, zoom)?;
    storage.write_file(image_artifact, &png).await?;
    Ok(png)
}
