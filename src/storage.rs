//! File helpers for the host application
//!
//! The editor core never touches the filesystem; these helpers encode plan
//! documents as JSON and rendered surfaces as PNG.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::RgbaImage;

use crate::persistence::PlanDocument;
use crate::session::messages::EditorMsg;

/// Read a plan document from a JSON file
pub fn read_plan(path: &Path) -> anyhow::Result<PlanDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid plan file {}", path.display()))
}

/// Write a plan document as pretty JSON
///
/// The file is written next to its destination and renamed into place, so
/// an interrupted save never leaves a truncated plan behind.
pub fn write_plan(path: &Path, doc: &PlanDocument) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::Builder::new()
        .prefix(".plan-")
        .suffix(".json")
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    serde_json::to_writer_pretty(&mut file, doc)?;
    file.write_all(b"\n")?;
    file.persist(path)
        .with_context(|| format!("Failed to write plan {}", path.display()))?;
    log::info!("Wrote plan to {}", path.display());
    Ok(())
}

/// Read a JSON array of editor messages to replay
pub fn read_script(path: &Path) -> anyhow::Result<Vec<EditorMsg>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid script {}", path.display()))
}

pub fn save_rgba(img: &RgbaImage, path: &Path) -> anyhow::Result<()> {
    let mut file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    write_png(&mut file, img)?;
    log::info!("Wrote image to {}", path.display());
    Ok(())
}

/// Timestamped image path in the user's pictures folder
pub fn default_png_path() -> Option<PathBuf> {
    let mut path =
        dirs::picture_dir().or_else(|| dirs::home_dir().map(|h| h.join("Pictures")))?;
    let name = chrono::Local::now()
        .format("Plan_%Y-%m-%d_%H-%M-%S.png")
        .to_string();
    path.push(name);
    Some(path)
}

pub fn write_png<W: io::Write>(w: W, image: &RgbaImage) -> Result<(), png::EncodingError> {
    let mut encoder = png::Encoder::new(w, image.width(), image.height());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(image.as_raw())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ElementRecord;

    fn sample_doc() -> PlanDocument {
        PlanDocument {
            version: 1,
            elements: vec![ElementRecord {
                kind: "fire".to_string(),
                id: Some(1),
                fields: [("x".to_string(), 12.5), ("y".to_string(), 7.0)]
                    .into_iter()
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_plan_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let doc = sample_doc();

        write_plan(&path, &doc).unwrap();
        assert_eq!(read_plan(&path).unwrap(), doc);

        // Overwriting keeps a single valid file
        write_plan(&path, &PlanDocument::default()).unwrap();
        assert!(read_plan(&path).unwrap().elements.is_empty());
        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1);
    }

    #[test]
    fn test_read_plan_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.json");
        assert!(read_plan(&missing).is_err());

        let broken = dir.path().join("broken.json");
        std::fs::write(&broken, "[1, 2").unwrap();
        let err = read_plan(&broken).unwrap_err();
        assert!(err.to_string().contains("Invalid plan file"));
    }

    #[test]
    fn test_read_script() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(&path, r#"[{"select_tool": "fire-sensor"}, "undo"]"#).unwrap();
        assert_eq!(read_script(&path).unwrap().len(), 2);
    }

    #[test]
    fn test_png_encoding() {
        let img = RgbaImage::from_pixel(4, 3, image::Rgba([10, 20, 30, 255]));
        let mut buffer = Vec::new();
        write_png(&mut buffer, &img).unwrap();
        assert_eq!(&buffer[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&buffer).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }
}
