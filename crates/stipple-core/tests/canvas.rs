//! Recording canvas behavior seen from outside the crate.

use stipple_core::{
    Canvas, Color, DrawCommand, Event, Paint, Point, RecordingCanvas, StrokeStyle, TextStyle,
};

fn draw_frame(canvas: &mut impl Canvas, color: Color) {
    canvas.clear();
    canvas.stroke_line(
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        &StrokeStyle::new(Color::GREY, 1.0),
    );
    canvas.draw_circle(Point::new(5.0, 5.0), 2.0, &Paint::fill(color));
    canvas.fill_text("\u{f111}", Point::new(5.0, 5.0), &TextStyle::glyph("FontAwesome", 8.0, color));
}

#[test]
fn test_identical_passes_record_identical_frames() {
    let mut canvas = RecordingCanvas::new(20.0, 20.0);
    draw_frame(&mut canvas, Color::BLACK);
    let first = canvas.frame().to_vec();
    draw_frame(&mut canvas, Color::BLACK);
    assert_eq!(canvas.frame(), first.as_slice());
    assert_eq!(canvas.clear_count(), 2);
}

#[test]
fn test_frame_starts_after_last_clear() {
    let mut canvas = RecordingCanvas::new(20.0, 20.0);
    canvas.translate(0.5, 0.5);
    draw_frame(&mut canvas, Color::WHITE);
    assert_eq!(canvas.command_count(), 5);
    assert_eq!(canvas.frame().len(), 3);
    let colors: Vec<_> = canvas.frame().iter().filter_map(DrawCommand::color).collect();
    assert_eq!(colors, vec![Color::GREY, Color::WHITE, Color::WHITE]);
}

#[test]
fn test_take_commands_empties_canvas() {
    let mut canvas = RecordingCanvas::new(20.0, 20.0);
    draw_frame(&mut canvas, Color::BLACK);
    assert_eq!(canvas.take_commands().len(), 4);
    assert_eq!(canvas.command_count(), 0);
}

#[test]
fn test_event_json_shape() {
    let event: Event = serde_json::from_str(r#"{"MouseMove":{"position":{"x":3.0,"y":4.0}}}"#).unwrap();
    assert_eq!(event.position(), Some(Point::new(3.0, 4.0)));
    assert!(event.is_mouse());
}
