//! HSV to RGB conversion for the Colorize and Fill tints.

/// Convert HSV to 8-bit RGB.
///
/// * `hue` - degrees, values outside `0..360` are treated as 0
/// * `saturation` - 0.0 to 1.0 (clamped)
/// * `value` - 0.0 to 1.0 (clamped)
///
/// Each channel is rounded to the nearest byte. Zero saturation produces a
/// gray of the rounded value.
pub fn hsv_to_rgb(hue: f32, saturation: f32, value: f32) -> [u8; 3] {
    let s = saturation.clamp(0.0, 1.0);
    let v = value.clamp(0.0, 1.0);
    let v_byte = round_byte(v * 255.0);

    if s.abs() <= f32::EPSILON {
        return [v_byte, v_byte, v_byte];
    }

    let hx = if !(0.0..360.0).contains(&hue) {
        0.0
    } else {
        hue / 60.0
    };
    let sector = hx.floor();
    let f = hx - sector;

    let p = round_byte((1.0 - s) * v * 255.0);
    let q = round_byte((1.0 - s * f) * v * 255.0);
    let t = round_byte((1.0 - s * (1.0 - f)) * v * 255.0);

    match sector as u32 {
        0 => [v_byte, t, p],
        1 => [q, v_byte, p],
        2 => [p, v_byte, t],
        3 => [p, q, v_byte],
        4 => [t, p, v_byte],
        _ => [v_byte, p, q],
    }
}

#[inline]
fn round_byte(x: f32) -> u8 {
    // Round half up, matching a floor(x + 0.5) conversion.
    (x + 0.5).floor().clamp(0.0, 255.0) as u8
}
