//! Read/write inverse LUT JSON files and apply them to gray images.
//!
//! The LUT file is the portable result of `gsdf invert`: the inverse table
//! plus how it was produced. The schema is `domain::LutFile`.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use ::image::GrayImage;

use crate::domain::{FitMethod, GrayMethod, LEVEL_COUNT, LutFile};
use crate::error::{AppError, AppResult};
use crate::fit::inverse::InverseTable;

impl LutFile {
    pub fn from_inverse(
        inverse: &InverseTable,
        fit_method: FitMethod,
        skip_clipped: bool,
        gray_method: Option<GrayMethod>,
    ) -> Self {
        Self {
            gray_method,
            fit_method,
            filtered_clipped_samples: skip_clipped,
            inverse_input_levels: inverse.input_levels.clone(),
            inverse_output_levels: inverse.output_levels.clone(),
        }
    }
}

pub fn write_lut_json(path: &Path, lut: &LutFile) -> AppResult<()> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create LUT JSON '{}'", path.display()), e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, lut)
        .map_err(|e| AppError::io(format!("Failed to write LUT JSON '{}'", path.display()), e.into()))?;
    writer
        .write_all(b"\n")
        .and_then(|_| writer.flush())
        .map_err(|e| AppError::io(format!("Failed to write LUT JSON '{}'", path.display()), e))?;
    Ok(())
}

pub fn read_lut_json(path: &Path) -> AppResult<LutFile> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open LUT JSON '{}'", path.display()), e))?;
    let lut: LutFile = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::unsupported(format!("Invalid LUT JSON '{}': {e}", path.display())))?;
    // Shape errors surface on load rather than at apply time.
    lut.lookup()?;
    Ok(lut)
}

/// Map every pixel through `table`.
pub fn apply_lut(image: &GrayImage, table: &[u8; LEVEL_COUNT]) -> GrayImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel[0] = table[pixel[0] as usize];
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::full_domain;
    use ::image::Luma;

    fn sample_lut() -> LutFile {
        let inverse = InverseTable {
            input_levels: full_domain(),
            output_levels: full_domain().iter().map(|&y| 255 - y).collect(),
            unresolved: vec![],
        };
        LutFile::from_inverse(&inverse, FitMethod::Cubic, true, Some(GrayMethod::Luminosity))
    }

    #[test]
    fn json_round_trip_through_a_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lut.json");
        let lut = sample_lut();

        write_lut_json(&path, &lut).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"fitMethod\": \"cubic\""));
        assert!(text.contains("\"filteredClippedSamples\": true"));
        assert!(text.contains("\"grayMethod\": \"luminosity\""));

        assert_eq!(read_lut_json(&path).unwrap(), lut);
    }

    #[test]
    fn gray_method_is_optional() {
        let json = format!(
            "{{\"fitMethod\":\"linear\",\"filteredClippedSamples\":false,\
             \"inverseInputLevels\":{:?},\"inverseOutputLevels\":{:?}}}",
            full_domain(),
            full_domain()
        );
        let lut: LutFile = serde_json::from_str(&json).unwrap();
        assert_eq!(lut.gray_method, None);
        assert_eq!(lut.fit_method, FitMethod::Linear);
    }

    #[test]
    fn malformed_files_are_unsupported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");

        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_lut_json(&path), Err(AppError::UnsupportedFormat(_))));

        std::fs::write(
            &path,
            r#"{"fitMethod":"cubic","filteredClippedSamples":false,"inverseInputLevels":[0,1],"inverseOutputLevels":[0,1]}"#,
        )
        .unwrap();
        assert!(matches!(read_lut_json(&path), Err(AppError::UnsupportedFormat(_))));

        assert!(matches!(
            read_lut_json(&dir.path().join("missing.json")),
            Err(AppError::Io { .. })
        ));
    }

    #[test]
    fn apply_maps_every_pixel() {
        let table = sample_lut().lookup().unwrap();
        let img = GrayImage::from_fn(3, 2, |x, y| Luma([(x * 100 + y) as u8]));
        let out = apply_lut(&img, &table);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
        assert_eq!(out.get_pixel(2, 1)[0], 255 - 201);
        assert_eq!(out.dimensions(), img.dimensions());
    }
}
