//! Launcher icon emission.
//!
//! Icons arrive pre-encoded as PNG bytes; this module only places them
//! into the density-specific drawable folders the resource system
//! expects.

use droidgen_core::Result;

use crate::emit::Emitter;

/// One launcher icon, already rendered and PNG-encoded for a given
/// screen density bucket.
pub struct DensityIcon {
    /// Drawable qualifier, e.g. `"xhdpi"`.
    pub density: &'static str,
    pub png_data: Vec<u8>,
}

impl DensityIcon {
    pub fn new(density: &'static str, png_data: Vec<u8>) -> Self {
        Self { density, png_data }
    }
}

/// The density buckets a generated project ships icons for, largest
/// first. Callers render one icon per bucket at the matching edge size.
pub const DENSITIES: [(&str, u32); 4] =
    [("xhdpi", 96), ("hdpi", 72), ("mdpi", 48), ("ldpi", 36)];

/// Write each icon as `app/src/main/res/drawable-<density>/icon.png`.
pub fn write_icons(emitter: &Emitter, icons: &[DensityIcon]) -> Result<()> {
    for icon in icons {
        let rel = format!("app/src/main/res/drawable-{}/icon.png", icon.density);
        emitter.write_binary(rel, &icon.png_data)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_land_in_density_folders() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());

        let icons =
            vec![DensityIcon::new("xhdpi", vec![1, 2, 3]), DensityIcon::new("ldpi", vec![4])];
        write_icons(&emitter, &icons).unwrap();

        assert!(dir.path().join("app/src/main/res/drawable-xhdpi/icon.png").exists());
        assert_eq!(
            std::fs::read(dir.path().join("app/src/main/res/drawable-ldpi/icon.png")).unwrap(),
            vec![4]
        );
    }

    #[test]
    fn no_icons_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let emitter = Emitter::new(dir.path());
        write_icons(&emitter, &[]).unwrap();
        assert!(!dir.path().join("app/src/main/res").exists());
    }
}
