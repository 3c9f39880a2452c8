// SPDX-License-Identifier: MPL-2.0
//! Iced component that shows a remotely loaded image.
//!
//! The component owns an [`ImageLoadController`] and renders whatever it
//! exposes: the displayed image, the busy indicator and the hover tooltip.
//! Download results are applied on [`Message::Tick`], which the component's
//! subscription emits while a load is in flight.

use crate::loader::{ImageLoadController, LoadRequest, ViewState};
use crate::ui::design_tokens::{opacity, palette, radius, spacing};
use crate::ui::styles;
use crate::ui::widgets::{animated_spinner, AnimatedSpinner};
use iced::widget::{mouse_area, tooltip, Container, Image, Space, Stack};
use iced::{alignment, time, Background, Element, Length, Size, Subscription, Theme};
use std::time::Duration;

/// Interval between animation/poll ticks while loading.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub enum Message {
    /// Poll finished downloads and advance the spinner.
    Tick,
    /// The host laid the view out at a new size.
    Resized(Size),
    HoverEntered,
    HoverExited,
    CancelRequested,
}

/// What the host may want to react to after a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// The in-flight load reached a terminal state.
    Finished(ViewState),
}

#[derive(Debug)]
pub struct AsyncImage {
    controller: ImageLoadController,
    size: Size,
    spinner_rotation: f32,
    hovered: bool,
}

impl AsyncImage {
    /// Wrap `controller` in a view of fixed `size`.
    #[must_use]
    pub fn new(mut controller: ImageLoadController, size: Size) -> Self {
        controller.set_view_size(size.width, size.height);
        Self {
            controller,
            size,
            spinner_rotation: 0.0,
            hovered: false,
        }
    }

    pub fn start_load(&mut self, request: LoadRequest) {
        self.spinner_rotation = 0.0;
        self.controller.start_load(request);
        self.refresh_tooltip();
    }

    pub fn controller(&self) -> &ImageLoadController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut ImageLoadController {
        &mut self.controller
    }

    #[must_use]
    pub fn spinner_rotation(&self) -> f32 {
        self.spinner_rotation
    }

    pub fn handle(&mut self, message: Message) -> Effect {
        match message {
            Message::Tick => {
                let was_loading = self.controller.is_loading();
                self.controller.poll_completions();
                if self.controller.indicator().is_some() {
                    self.spinner_rotation = animated_spinner::advance(self.spinner_rotation);
                }
                self.refresh_tooltip();

                let state = self.controller.state();
                if was_loading && state.is_terminal() {
                    Effect::Finished(state)
                } else {
                    Effect::None
                }
            }
            Message::Resized(size) => {
                self.size = size;
                self.controller.set_view_size(size.width, size.height);
                Effect::None
            }
            Message::HoverEntered => {
                self.hovered = true;
                self.controller.on_hover();
                Effect::None
            }
            Message::HoverExited => {
                self.hovered = false;
                Effect::None
            }
            Message::CancelRequested => {
                let was_loading = self.controller.is_loading();
                self.controller.cancel();
                if was_loading {
                    Effect::Finished(ViewState::Cancelled)
                } else {
                    Effect::None
                }
            }
        }
    }

    /// Ticks only while a download is in flight.
    pub fn subscription(&self) -> Subscription<Message> {
        if self.controller.is_loading() {
            time::every(TICK_INTERVAL).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let base: Element<'_, Message> = match self.controller.displayed_image() {
            Some(image) => Image::new(image.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            None => Space::new().width(Length::Fill).height(Length::Fill).into(),
        };

        let mut stack = Stack::new()
            .width(Length::Fixed(self.size.width))
            .height(Length::Fixed(self.size.height))
            .push(base);

        if let Some(indicator) = self.controller.indicator() {
            let spinner = AnimatedSpinner::new(palette::WHITE, self.spinner_rotation, indicator)
                .into_element();
            let backdrop = Container::new(spinner)
                .padding(spacing::XXS)
                .style(|_theme: &Theme| iced::widget::container::Style {
                    background: Some(Background::Color(iced::Color {
                        a: opacity::OVERLAY_MEDIUM,
                        ..palette::BLACK
                    })),
                    border: iced::Border {
                        radius: radius::MD.into(),
                        ..Default::default()
                    },
                    ..Default::default()
                });
            stack = stack.push(
                Container::new(backdrop)
                    .width(Length::Fill)
                    .height(Length::Fill)
                    .align_x(alignment::Horizontal::Center)
                    .align_y(alignment::Vertical::Center),
            );
        }

        let hoverable = mouse_area(stack)
            .on_enter(Message::HoverEntered)
            .on_exit(Message::HoverExited);

        match self.controller.tooltip() {
            Some(tip) => styles::tooltip::styled(hoverable, tip, tooltip::Position::Bottom).into(),
            None => hoverable.into(),
        }
    }

    /// Keep the shown tooltip in step with the state while the cursor stays over the view.
    fn refresh_tooltip(&mut self) {
        if self.hovered {
            self.controller.on_hover();
        }
    }
}
