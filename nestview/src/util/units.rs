//! Conversions between the units used by the backend (mm, mm², kg) and the ones shown to users.

pub const MM2_PER_M2: f32 = 1_000_000.0;

pub fn mm_to_px(mm: f32, px_per_mm: f32) -> f32 {
    mm * px_per_mm
}

pub fn px_to_mm(px: f32, px_per_mm: f32) -> f32 {
    px / px_per_mm
}

pub fn mm2_to_m2(mm2: f32) -> f32 {
    mm2 / MM2_PER_M2
}

/// Ratio `used / capacity` as a percentage. A capacity of zero yields infinity for any positive use.
pub fn percentage(used: f32, capacity: f32) -> f32 {
    match (used, capacity) {
        (u, _) if u <= 0.0 => 0.0,
        (_, c) if c <= 0.0 => f32::INFINITY,
        (u, c) => u / c * 100.0,
    }
}
