use eframe::egui::{Color32, Pos2};

const CATEGORY_PALETTE: [Color32; 8] = [
    Color32::from_rgb(102, 194, 165),
    Color32::from_rgb(252, 141, 98),
    Color32::from_rgb(141, 160, 203),
    Color32::from_rgb(231, 138, 195),
    Color32::from_rgb(166, 216, 84),
    Color32::from_rgb(255, 217, 47),
    Color32::from_rgb(229, 196, 148),
    Color32::from_rgb(179, 179, 179),
];

pub(super) fn category_color(index: usize) -> Color32 {
    CATEGORY_PALETTE[index % CATEGORY_PALETTE.len()]
}

pub(super) fn blend_color(base: Color32, overlay: Color32, amount: f32) -> Color32 {
    let amount = amount.clamp(0.0, 1.0);
    let inverse = 1.0 - amount;

    Color32::from_rgba_unmultiplied(
        ((base.r() as f32 * inverse) + (overlay.r() as f32 * amount)) as u8,
        ((base.g() as f32 * inverse) + (overlay.g() as f32 * amount)) as u8,
        ((base.b() as f32 * inverse) + (overlay.b() as f32 * amount)) as u8,
        ((base.a() as f32 * inverse) + (overlay.a() as f32 * amount)) as u8,
    )
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        color.a(),
    )
}

pub(super) fn point_segment_distance(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let segment = end - start;
    let length_sq = segment.length_sq();
    if length_sq <= f32::EPSILON {
        return (point - start).length();
    }

    let t = ((point - start).dot(segment) / length_sq).clamp(0.0, 1.0);
    let closest = start + (segment * t);
    (point - closest).length()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::pos2;

    #[test]
    fn segment_distance_handles_endpoints_and_interior() {
        let start = pos2(0.0, 0.0);
        let end = pos2(10.0, 0.0);

        assert_eq!(point_segment_distance(pos2(5.0, 3.0), start, end), 3.0);
        assert_eq!(point_segment_distance(pos2(-4.0, 0.0), start, end), 4.0);
        assert_eq!(point_segment_distance(pos2(13.0, 4.0), start, end), 5.0);
    }

    #[test]
    fn palette_cycles_past_its_length() {
        assert_eq!(category_color(0), category_color(8));
        assert_ne!(category_color(0), category_color(1));
    }
}
