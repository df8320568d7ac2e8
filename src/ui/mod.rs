/// Rendering of the showcase state
///
/// Everything here is a pure function of the state; all changes go
/// through `Message`s handled in `main.rs`.
use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

use crate::Message;

pub mod cards;
pub mod gallery;

/// Draw `content` over `base` behind a dimmed backdrop.
/// The backdrop swallows input to `base`; clicking it sends `on_blur`.
pub fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| {
                container::Style {
                    background: Some(
                        Color {
                            a: 0.8,
                            ..Color::BLACK
                        }
                        .into(),
                    ),
                    ..container::Style::default()
                }
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}
