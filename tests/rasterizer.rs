//! End-to-end rasterization scenarios through the public API.

use std::sync::Arc;

use glam::{Mat3, Vec2};
use rastrum::{
    Aabb, AddressMode, BlendMode, Color, FillMode, Font, Image, Rect, ResourceManager, Sprite,
    SpriteAnim, SpriteSheet, Transform2D, Vertex,
};

fn count_color(img: &Image, color: Color) -> usize {
    img.pixels().iter().filter(|&&c| c == color).count()
}

#[test]
fn white_rect_on_black_frame() {
    let mut frame = Image::new(4, 4);
    frame.clear(Color::BLACK);
    frame.draw_rect(
        Rect::new(1, 1, 2, 2),
        Color::WHITE,
        FillMode::Solid,
        BlendMode::DISABLE,
    );

    assert_eq!(count_color(&frame, Color::WHITE), 4);
    for (x, y) in [(1, 1), (2, 1), (1, 2), (2, 2)] {
        assert_eq!(frame.get_pixel(x, y), Some(Color::WHITE));
    }
    assert_eq!(count_color(&frame, Color::BLACK), 12);
}

#[test]
fn exact_diagonal_line() {
    let mut frame = Image::new(10, 10);
    frame.clear(Color::BLACK);
    frame.draw_line(
        Vec2::new(0.0, 0.0),
        Vec2::new(9.0, 9.0),
        Color::WHITE,
        BlendMode::DISABLE,
    );

    // |dx| == |dy|, so Bresenham lands exactly on the main diagonal
    assert_eq!(count_color(&frame, Color::WHITE), 10);
    for i in 0..10 {
        assert_eq!(frame.get_pixel(i, i), Some(Color::WHITE));
    }
}

#[test]
fn alpha_blend_layers_accumulate() {
    let mut frame = Image::new(8, 8);
    frame.clear(Color::BLACK);

    // A 50%-alpha white pass lightens; an opaque pass overwrites
    let bounds = *frame.bounds();
    let translucent = Color::WHITE.with_alpha(128);
    frame.draw_aabb(&bounds, translucent, FillMode::Solid, BlendMode::ALPHA_BLEND);
    let mid = frame.get_pixel(4, 4).unwrap();
    assert_eq!(mid.r, 128);

    frame.draw_aabb(&bounds, Color::WHITE, FillMode::Solid, BlendMode::ALPHA_BLEND);
    assert_eq!(frame.get_pixel(4, 4), Some(Color::WHITE));
}

#[test]
fn transformed_sprite_lands_where_the_matrix_says() {
    let mut atlas = Image::new(4, 4);
    atlas.clear(Color::RED);
    let sprite = Sprite::new(Arc::new(atlas)).with_blend_mode(BlendMode::DISABLE);

    let mut transform = Transform2D::new().with_position(Vec2::new(8.0, 8.0));
    let mut frame = Image::new(16, 16);
    frame.clear(Color::BLACK);
    frame.draw_sprite(&sprite, &transform.matrix());

    assert_eq!(frame.get_pixel(9, 9), Some(Color::RED));
    assert_eq!(frame.get_pixel(4, 4), Some(Color::BLACK));

    // Identity matrix draws at the origin instead
    let mut frame2 = Image::new(16, 16);
    frame2.clear(Color::BLACK);
    frame2.draw_sprite(&sprite, &Mat3::IDENTITY);
    assert_eq!(frame2.get_pixel(1, 1), Some(Color::RED));
}

#[test]
fn sheet_animation_renders_the_selected_frame() {
    // 2-frame sheet: left half red, right half green
    let mut atlas = Image::new(8, 4);
    atlas.clear(Color::RED);
    atlas.draw_rect(
        Rect::new(4, 0, 4, 4),
        Color::GREEN,
        FillMode::Solid,
        BlendMode::DISABLE,
    );
    let sheet = Arc::new(SpriteSheet::from_grid(Arc::new(atlas), 4, 4, 0, 0));

    let mut anim = SpriteAnim::new(sheet, 2.0);
    anim.update(0.6); // floor(0.6 * 2) = frame 1

    let sprite = anim
        .current_sprite()
        .unwrap()
        .with_blend_mode(BlendMode::DISABLE);
    let mut frame = Image::new(4, 4);
    frame.clear(Color::BLACK);
    frame.draw_sprite_at(&sprite, 0, 0);
    assert_eq!(count_color(&frame, Color::GREEN), 16);
}

#[test]
fn textured_quad_tints_by_vertex_color() {
    let mut tex = Image::new(2, 2);
    tex.clear(Color::WHITE);

    let mut frame = Image::new(8, 8);
    frame.clear(Color::BLACK);
    let red = Color::RED;
    let verts = [
        Vertex::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0), red),
        Vertex::new(Vec2::new(7.0, 0.0), Vec2::new(1.0, 0.0), red),
        Vertex::new(Vec2::new(7.0, 7.0), Vec2::new(1.0, 1.0), red),
        Vertex::new(Vec2::new(0.0, 7.0), Vec2::new(0.0, 1.0), red),
    ];
    frame.draw_textured_quad(&verts, &tex, AddressMode::Clamp, Color::WHITE, BlendMode::DISABLE);
    assert_eq!(frame.get_pixel(3, 3), Some(Color::RED));
}

#[test]
fn builtin_text_renders_and_clips() {
    let font = Font::builtin();
    let mut frame = Image::new(32, 16);
    frame.clear(Color::BLACK);
    font.draw_text(
        &mut frame,
        "Hi",
        Vec2::new(0.0, 0.0),
        8.0,
        Color::WHITE,
        BlendMode::DISABLE,
    );
    assert!(count_color(&frame, Color::WHITE) > 0);

    // Entirely below the frame: nothing drawn
    let mut off = Image::new(32, 16);
    off.clear(Color::BLACK);
    font.draw_text(
        &mut off,
        "Hi",
        Vec2::new(0.0, 100.0),
        8.0,
        Color::WHITE,
        BlendMode::DISABLE,
    );
    assert_eq!(count_color(&off, Color::WHITE), 0);
}

#[test]
fn resource_manager_shares_and_clears() {
    let mut resources = ResourceManager::new();
    let a = resources.load_image("/definitely/not/here.png");
    let b = resources.load_image("/definitely/not/here.png");
    assert!(Arc::ptr_eq(&a, &b));
    assert!(a.is_empty());
    resources.clear();
    assert_eq!(resources.image_count(), 0);
}

#[test]
fn save_and_reload_round_trip() {
    let dir = std::env::temp_dir().join(format!(
        "rastrum_roundtrip_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.png");

    let mut frame = Image::new(3, 3);
    frame.clear(Color::BLUE);
    frame.plot(1, 1, Color::YELLOW, BlendMode::DISABLE);
    frame.save(&path).unwrap();

    let loaded = Image::load(&path).unwrap();
    assert_eq!(loaded.width(), 3);
    assert_eq!(loaded.get_pixel(1, 1), Some(Color::YELLOW));
    assert_eq!(loaded.get_pixel(0, 0), Some(Color::BLUE));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn offscreen_geometry_is_a_noop() {
    let mut frame = Image::new(8, 8);
    frame.clear(Color::BLACK);

    frame.draw_line(
        Vec2::new(-100.0, -50.0),
        Vec2::new(-10.0, -80.0),
        Color::WHITE,
        BlendMode::DISABLE,
    );
    frame.draw_triangle(
        Vec2::new(50.0, 50.0),
        Vec2::new(60.0, 50.0),
        Vec2::new(55.0, 60.0),
        Color::WHITE,
        FillMode::Solid,
        BlendMode::DISABLE,
    );
    let far = Aabb::from(Rect::new(100, 100, 4, 4));
    frame.draw_aabb(&far, Color::WHITE, FillMode::Solid, BlendMode::DISABLE);

    assert_eq!(count_color(&frame, Color::BLACK), 64);
}
