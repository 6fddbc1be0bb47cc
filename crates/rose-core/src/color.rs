use glam::Vec3;

#[inline]
fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Decode a `0xRRGGBB` sRGB color into linear RGB in \[0, 1\].
pub fn hex_to_linear(hex: u32) -> Vec3 {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Vec3::new(
        srgb_channel_to_linear(r),
        srgb_channel_to_linear(g),
        srgb_channel_to_linear(b),
    )
}

/// CSS `#rrggbb` form, used when handing colors to the 2D canvas.
pub fn hex_to_css(hex: u32) -> String {
    format!("#{:06x}", hex & 0xff_ffff)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primaries_decode_exactly() {
        assert_eq!(hex_to_linear(0xff0000), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(hex_to_linear(0x000000), Vec3::ZERO);
        assert_eq!(hex_to_css(0xFFD700), "#ffd700");
    }
}
