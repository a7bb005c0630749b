//! PNG (or anything else `image` decodes) → [`Texture`].
//!
//! The engine never sees image formats; this is the only place that does.

use std::{
    collections::{BTreeMap, HashMap},
    path::{Path, PathBuf},
};

use log::{info, warn};
use thiserror::Error;

use crate::world::texture::{Texture, TextureBank, TextureError, TextureId};

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("cannot decode `{path}`: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// Pack straight RGBA bytes into 0xAARRGGBB.
#[inline]
pub fn pack_argb([r, g, b, a]: [u8; 4]) -> u32 {
    (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
}

/// Convert a decoded RGBA image.
pub fn texture_from_rgba(name: &str, img: &image::RgbaImage) -> Result<Texture, AssetError> {
    let (w, h) = img.dimensions();
    let pixels = img.pixels().map(|p| pack_argb(p.0)).collect();
    Ok(Texture::new(name, w as usize, h as usize, pixels)?)
}

/// Decode one image file; the texture is named after the file stem.
pub fn load_texture<P: AsRef<Path>>(path: P) -> Result<Texture, AssetError> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| AssetError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    texture_from_rgba(&name, &img.to_rgba8())
}

/// Fill a bank from a slot → relative-path table.
///
/// A slot that fails to load is logged once and left empty; walls using it
/// are drawn in their flat colour. Slots naming the same file share one
/// decode.
pub fn load_bank(textures: &BTreeMap<TextureId, String>, dir: &Path) -> TextureBank {
    let mut bank = TextureBank::new();
    let mut decoded: HashMap<PathBuf, Texture> = HashMap::new();
    for (&slot, rel) in textures {
        let path = dir.join(rel);
        let loaded = match decoded.get(&path) {
            Some(tex) => Ok(tex.clone()),
            None => load_texture(&path).inspect(|tex| {
                decoded.insert(path.clone(), tex.clone());
            }),
        };
        match loaded {
            Ok(tex) => {
                info!("texture slot {slot}: {} ({}x{})", path.display(), tex.w, tex.h);
                bank.insert_at(slot, tex);
            }
            Err(e) => warn!("texture slot {slot}: {e}; using flat colour"),
        }
    }
    bank
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn argb_packing() {
        assert_eq!(pack_argb([0x12, 0x34, 0x56, 0x78]), 0x78_123456);
        assert_eq!(pack_argb([0xFF, 0, 0, 0xFF]), 0xFF_FF0000);
    }

    #[test]
    fn png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("brick.png");
        let mut img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 1, Rgba([255, 0, 0, 255]));
        img.save(&path).unwrap();

        let tex = load_texture(&path).unwrap();
        assert_eq!(tex.name, "brick");
        assert_eq!((tex.w, tex.h), (3, 2));
        assert_eq!(tex.texel(0, 0), 0xFF_0A141E);
        assert_eq!(tex.texel(2, 1), 0xFF_FF0000);
    }

    #[test]
    fn missing_files_leave_slots_empty() {
        let dir = tempfile::tempdir().unwrap();
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]))
            .save(dir.path().join("blue.png"))
            .unwrap();
        std::fs::write(dir.path().join("junk.png"), b"not a png").unwrap();

        let table: BTreeMap<TextureId, String> = [
            (1, "blue.png".to_string()),
            (2, "nowhere.png".to_string()),
            (3, "junk.png".to_string()),
        ]
        .into_iter()
        .collect();

        let bank = load_bank(&table, dir.path());
        assert!(bank.get(1).is_some());
        assert!(bank.get(2).is_none());
        assert!(bank.get(3).is_none());
        assert!(matches!(
            load_texture(dir.path().join("junk.png")),
            Err(AssetError::Decode { .. })
        ));
    }

    #[test]
    fn slots_may_share_a_file_or_a_stem() {
        let dir = tempfile::tempdir().unwrap();
        for (sub, color) in [("walls", Rgba([90, 90, 90, 255])), ("doors", Rgba([120, 60, 0, 255]))] {
            std::fs::create_dir(dir.path().join(sub)).unwrap();
            RgbaImage::from_pixel(2, 2, color)
                .save(dir.path().join(sub).join("stone.png"))
                .unwrap();
        }

        let table: BTreeMap<TextureId, String> = [
            (1, "walls/stone.png".to_string()),
            (5, "doors/stone.png".to_string()),
            (8, "walls/stone.png".to_string()),
        ]
        .into_iter()
        .collect();

        let bank = load_bank(&table, dir.path());
        let (one, five, eight) = (bank.get(1).unwrap(), bank.get(5).unwrap(), bank.get(8).unwrap());
        assert_eq!(one, eight);
        assert_eq!(one.texel(0, 0), 0xFF_5A5A5A);
        assert_eq!(five.texel(0, 0), 0xFF_783C00);
        assert_eq!(five.name, one.name);
    }
}
