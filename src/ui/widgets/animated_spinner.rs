// SPDX-License-Identifier: MPL-2.0
//! Busy indicator drawn as a rotating arc on a Canvas.

use crate::loader::IndicatorSize;
use crate::ui::design_tokens::opacity;
use iced::widget::canvas::{self, Cache, Canvas, Frame, Geometry, Path, Stroke};
use iced::{mouse, Color, Length, Point, Rectangle, Renderer, Theme};
use std::f32::consts::{PI, TAU};

/// Rotation added per animation tick, in radians.
pub const ROTATION_STEP: f32 = 0.1;

/// Advance a rotation angle by one tick, wrapping at a full turn.
#[must_use]
pub fn advance(rotation: f32) -> f32 {
    let next = rotation + ROTATION_STEP;
    if next > TAU {
        next - TAU
    } else {
        next
    }
}

pub struct AnimatedSpinner {
    cache: Cache,
    rotation: f32, // Rotation angle in radians
    color: Color,
    size: IndicatorSize,
}

impl AnimatedSpinner {
    /// Creates a spinner of the given size class at `rotation` radians.
    #[must_use]
    pub fn new(color: Color, rotation: f32, size: IndicatorSize) -> Self {
        Self {
            cache: Cache::default(),
            rotation,
            color,
            size,
        }
    }

    fn stroke_width(&self) -> f32 {
        match self.size {
            IndicatorSize::Small => 2.0,
            IndicatorSize::Large => 3.0,
        }
    }

    /// Creates a Canvas widget from this spinner.
    pub fn into_element<Message: 'static>(self) -> iced::Element<'static, Message> {
        let side = self.size.side();
        Canvas::new(self)
            .width(Length::Fixed(side))
            .height(Length::Fixed(side))
            .into()
    }
}

impl<Message> canvas::Program<Message> for AnimatedSpinner {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let width = self.stroke_width();
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                let center = frame.center();
                let radius = frame.width().min(frame.height()) / 2.0 - width;

                let track = Path::circle(center, radius);
                frame.stroke(
                    &track,
                    Stroke::default().with_width(width).with_color(Color {
                        a: opacity::OVERLAY_SUBTLE,
                        ..self.color
                    }),
                );

                // Half-turn arc starting at the top, offset by the rotation
                let start_angle = self.rotation - PI / 2.0;
                let end_angle = start_angle + PI;

                let mut arc_path = canvas::path::Builder::new();
                arc_path.move_to(Point::new(
                    center.x + radius * start_angle.cos(),
                    center.y + radius * start_angle.sin(),
                ));

                let segments = match self.size {
                    IndicatorSize::Small => 12,
                    IndicatorSize::Large => 30,
                };
                #[allow(clippy::cast_precision_loss)]
                for i in 1..=segments {
                    let t = i as f32 / segments as f32;
                    let angle = start_angle + (end_angle - start_angle) * t;
                    arc_path.line_to(Point::new(
                        center.x + radius * angle.cos(),
                        center.y + radius * angle.sin(),
                    ));
                }

                frame.stroke(
                    &arc_path.build(),
                    Stroke::default()
                        .with_width(width)
                        .with_color(self.color)
                        .with_line_cap(canvas::LineCap::Round),
                );
            });

        vec![geometry]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_moves_forward() {
        assert!(advance(0.0) > 0.0);
    }

    #[test]
    fn advance_wraps_after_full_turn() {
        let wrapped = advance(TAU - ROTATION_STEP / 2.0);
        assert!(wrapped >= 0.0 && wrapped < ROTATION_STEP);
    }

    #[test]
    fn large_spinner_strokes_thicker() {
        let small = AnimatedSpinner::new(Color::WHITE, 0.0, IndicatorSize::Small);
        let large = AnimatedSpinner::new(Color::WHITE, 0.0, IndicatorSize::Large);
        assert!(large.stroke_width() > small.stroke_width());
    }
}
