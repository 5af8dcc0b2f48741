use crate::error::CoreError;

/// Grille de luminance mono-canal, row-major, stride = `width`.
///
/// Produite par le [`Rasterizer`](crate::traits::Rasterizer), consommée par le
/// renderer de rampe. Lecture seule une fois construite.
///
/// # Example
/// ```
/// use ag_core::frame::LuminanceBuffer;
/// let buf = LuminanceBuffer::from_raw(2, 1, vec![0, 255]).unwrap();
/// assert_eq!(buf.get(1, 0), 255);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LuminanceBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl LuminanceBuffer {
    /// Crée un buffer noir aux dimensions données.
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::LuminanceBuffer;
    /// let buf = LuminanceBuffer::new(80, 20);
    /// assert_eq!(buf.data().len(), 1600);
    /// ```
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Wrap raw row-major samples.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() != width as usize * height as usize {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in samples.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw samples, row-major.
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Sample at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Row `y` as a slice of `width` samples.
    #[must_use]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Inverse la luminance en place (`v → 255 - v`), pour fond clair.
    pub fn invert(&mut self) {
        for v in &mut self.data {
            *v = 255 - *v;
        }
    }
}

/// Buffer de pixels RGBA row-major, 4 bytes par pixel.
///
/// Étape intermédiaire de l'adaptateur entre décodage et conversion en luminance.
///
/// # Example
/// ```
/// use ag_core::frame::FrameBuffer;
/// let fb = FrameBuffer::new(10, 10);
/// assert_eq!(fb.data.len(), 400);
/// ```
pub struct FrameBuffer {
    /// Pixels RGBA, row-major, 4 bytes par pixel.
    pub data: Vec<u8>,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameBuffer {
    /// Crée un buffer pré-alloué aux dimensions données.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0u8; width as usize * height as usize * 4],
            width,
            height,
        }
    }

    /// Luminance perceptuelle BT.709 du pixel (x, y).
    ///
    /// # Example
    /// ```
    /// use ag_core::frame::FrameBuffer;
    /// let mut fb = FrameBuffer::new(1, 1);
    /// fb.data.copy_from_slice(&[255, 255, 255, 255]);
    /// assert_eq!(fb.luminance(0, 0), 255);
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn luminance(&self, x: u32, y: u32) -> u8 {
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        bt709(&self.data[idx..idx + 3])
    }

    /// Convertit la frame entière en [`LuminanceBuffer`].
    #[must_use]
    pub fn to_luminance(&self) -> LuminanceBuffer {
        LuminanceBuffer {
            data: self.data.chunks_exact(4).map(bt709).collect(),
            width: self.width,
            height: self.height,
        }
    }
}

#[inline(always)]
fn bt709(rgb: &[u8]) -> u8 {
    ((u32::from(rgb[0]) * 2126 + u32::from(rgb[1]) * 7152 + u32::from(rgb[2]) * 722) / 10000)
        as u8
}
