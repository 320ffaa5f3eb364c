use crate::color_8888::Color8888;

/// A 16-bit colour with 5 bits of red, 6 bits of green and 5 bits of blue,
/// as used for the endpoints of BC1-BC3 colour blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color565 {
    value: u16,
}

impl Color565 {
    #[inline]
    pub const fn from_raw(value: u16) -> Self {
        Self { value }
    }

    /// Reads a little endian endpoint from the first two bytes of `bytes`.
    #[inline]
    pub const fn from_le_bytes(bytes: [u8; 2]) -> Self {
        Self::from_raw(u16::from_le_bytes(bytes))
    }

    #[inline]
    pub const fn raw_value(&self) -> u16 {
        self.value
    }

    // Endpoints are expanded to 8 bits by replicating the top bits, matching what GPUs do.
    // https://fgiesen.wordpress.com/2021/10/04/gpu-bcn-decoding/

    #[inline]
    pub const fn red(&self) -> u8 {
        let r = (self.value & 0b11111000_00000000) >> 11;
        ((r << 3) | (r >> 2)) as u8
    }

    #[inline]
    pub const fn green(&self) -> u8 {
        let g = (self.value & 0b00000111_11100000) >> 5;
        ((g << 2) | (g >> 4)) as u8
    }

    #[inline]
    pub const fn blue(&self) -> u8 {
        let b = self.value & 0b00000000_00011111;
        ((b << 3) | (b >> 2)) as u8
    }

    /// Whether this endpoint is numerically greater than `other`.
    /// Selects between the 4 colour and 3 colour + transparent BC1 modes.
    #[inline]
    pub const fn greater_than(&self, other: &Self) -> bool {
        self.value > other.value
    }

    #[inline]
    pub const fn to_color_8888(&self) -> Color8888 {
        Color8888::new(self.red(), self.green(), self.blue(), 255)
    }
}
