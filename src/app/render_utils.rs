use eframe::egui::{Color32, Pos2, Rect, Vec2, pos2, vec2};

use super::surface::ViewBox;

pub(super) fn unpack_color(color: u32) -> Color32 {
    let [r, g, b, a] = color.to_be_bytes();
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

pub(super) fn world_to_screen(rect: Rect, view_box: ViewBox, world: Vec2) -> Pos2 {
    pos2(
        rect.left() + (world.x - view_box.left) / view_box.width() * rect.width(),
        rect.top() + (world.y - view_box.top) / view_box.height() * rect.height(),
    )
}

pub(super) fn screen_to_world(rect: Rect, view_box: ViewBox, screen: Pos2) -> Vec2 {
    vec2(
        view_box.left + (screen.x - rect.left()) / rect.width() * view_box.width(),
        view_box.top + (screen.y - rect.top()) / rect.height() * view_box.height(),
    )
}

#[cfg(test)]
mod tests {
    use eframe::egui::Rect;

    use super::*;

    #[test]
    fn unpack_color_splits_rgba_bytes() {
        let color = unpack_color(0xBF2172FF);
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (0xBF, 0x21, 0x72, 0xFF));

        let translucent = unpack_color(0xFFFFFF20);
        assert_eq!(translucent.a(), 0x20);
    }

    #[test]
    fn screen_world_round_trip() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(800.0, 600.0));
        let view_box = ViewBox {
            left: -200.0,
            top: -200.0,
            right: 200.0,
            bottom: 200.0,
        };

        assert_eq!(
            world_to_screen(rect, view_box, vec2(0.0, 0.0)),
            pos2(400.0, 300.0)
        );

        let world = vec2(37.5, -120.25);
        let back = screen_to_world(rect, view_box, world_to_screen(rect, view_box, world));
        assert!((back - world).length() < 1e-3);
    }
}
