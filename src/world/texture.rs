// Format-agnostic repository of textures handed over by the asset loader.
// The engine and renderer interact through `TextureId` slots only.

/// Runtime handle for a texture slot in this bank.
///
/// Slots are addressed by small integers so level files can refer to them
/// directly (`1 = bluestone`, `5 = door`, …).
pub type TextureId = u16;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub name: String,
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<u32>,
}

impl Texture {
    /// Wrap a decoded pixel buffer, checking that it matches `w × h`.
    pub fn new<S: Into<String>>(
        name: S,
        w: usize,
        h: usize,
        pixels: Vec<u32>,
    ) -> Result<Self, TextureError> {
        let name = name.into();
        if w == 0 || h == 0 {
            return Err(TextureError::Empty(name));
        }
        if pixels.len() != w * h {
            return Err(TextureError::SizeMismatch {
                name,
                expected: w * h,
                got: pixels.len(),
            });
        }
        Ok(Self { name, w, h, pixels })
    }

    /// Texel at (`u`, `v`); callers keep both inside the texture.
    #[inline(always)]
    pub fn texel(&self, u: usize, v: usize) -> u32 {
        self.pixels[v * self.w + u]
    }
}

/// Things that can go wrong when building or using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Slot is outside the bank or was never filled.
    #[error("texture id {0} out of range")]
    BadId(TextureId),

    #[error("texture `{0}` has zero width or height")]
    Empty(String),

    #[error("texture `{name}` has {got} pixels, expected {expected}")]
    SizeMismatch {
        name: String,
        expected: usize,
        got: usize,
    },
}

/// Slot-addressed cache of textures.
///
/// * Does **not** know about PNG or any file format; that's the loader's job.
/// * Slots may stay empty: the renderer falls back to a flat colour.
/// * Slots are independent; several may hold copies of one image.
#[derive(Default)]
pub struct TextureBank {
    slots: Vec<Option<Texture>>,
}

impl TextureBank {
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of slots (filled or not).
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Borrow a texture by slot, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.get(id).ok_or(TextureError::BadId(id))
    }

    /// Fallback-friendly lookup used on the per-column path.
    #[inline]
    pub fn get(&self, id: TextureId) -> Option<&Texture> {
        self.slots.get(id as usize).and_then(Option::as_ref)
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Put `tex` into `slot`, growing the bank as needed.
    ///
    /// Returns whatever occupied the slot before.
    pub fn insert_at(&mut self, slot: TextureId, tex: Texture) -> Option<Texture> {
        let idx = slot as usize;
        if idx >= self.slots.len() {
            self.slots.resize(idx + 1, None);
        }
        self.slots[idx].replace(tex)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
