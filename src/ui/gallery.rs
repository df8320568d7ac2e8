use std::path::Path;

use iced::widget::{
    button, column, container, horizontal_space, image, row, scrollable, text, text_editor, Row,
};
use iced::{border, Alignment, ContentFit, Element, Length, Theme};

use super::cards::{link_button, placeholder};
use crate::state::data::{image_source, Item};
use crate::state::gallery::OpenGallery;
use crate::Message;

const MAIN_IMAGE_HEIGHT: f32 = 420.0;
const THUMBNAIL_SIZE: f32 = 64.0;

/// Modal contents for an open gallery: images on the left, details and the
/// description editor on the right
pub fn gallery_view<'a>(
    open: &'a OpenGallery,
    item: &'a Item,
    editor: &'a text_editor::Content,
    saved: bool,
    image_root: &Path,
) -> Element<'a, Message> {
    let images = column![main_image(open, image_root), thumbnails(open, image_root)].spacing(12);

    container(
        row![
            container(images).width(Length::FillPortion(3)),
            container(details(item, editor, saved)).width(Length::FillPortion(2)),
        ]
        .spacing(24),
    )
    .width(Length::Fixed(960.0))
    .padding(24)
    .style(|theme: &Theme| container::Style {
        background: Some(theme.palette().background.into()),
        border: border::rounded(8.0),
        ..container::Style::default()
    })
    .into()
}

fn main_image<'a>(open: &'a OpenGallery, image_root: &Path) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match open.current_image() {
        Some(reference) => image(image::Handle::from_path(image_source(image_root, reference)))
            .width(Length::Fill)
            .height(Length::Fixed(MAIN_IMAGE_HEIGHT))
            .content_fit(ContentFit::Contain)
            .into(),
        None => placeholder(Length::Fixed(MAIN_IMAGE_HEIGHT)),
    };

    if !open.nav_visible() {
        return picture;
    }

    row![
        button(text("‹").size(28))
            .style(button::secondary)
            .on_press(Message::PreviousImage),
        picture,
        button(text("›").size(28))
            .style(button::secondary)
            .on_press(Message::NextImage),
    ]
    .spacing(8)
    .align_y(Alignment::Center)
    .into()
}

fn thumbnails<'a>(open: &'a OpenGallery, image_root: &Path) -> Element<'a, Message> {
    let strip = open.images().iter().enumerate().map(|(index, reference)| {
        let style = if index == open.index() {
            button::primary
        } else {
            button::text
        };

        button(
            image(image::Handle::from_path(image_source(image_root, reference)))
                .width(Length::Fixed(THUMBNAIL_SIZE))
                .height(Length::Fixed(THUMBNAIL_SIZE))
                .content_fit(ContentFit::Cover),
        )
        .padding(2)
        .style(style)
        .on_press(Message::ShowImage(index))
        .into()
    });

    scrollable(Row::with_children(strip).spacing(6))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::default(),
        ))
        .into()
}

fn details<'a>(item: &'a Item, editor: &'a text_editor::Content, saved: bool) -> Element<'a, Message> {
    let header = row![
        text(item.original_name.as_str()).size(24),
        horizontal_space(),
        button(text("✕"))
            .style(button::text)
            .on_press(Message::CloseGallery),
    ]
    .align_y(Alignment::Center);

    let (save_label, save_style) = if saved {
        ("✔ Saved!", button::success as fn(&Theme, button::Status) -> button::Style)
    } else {
        ("Save description", button::primary as fn(&Theme, button::Status) -> button::Style)
    };

    let mut content = column![
        header,
        text(item.price_label()).size(20),
        text("Description").size(14),
        text_editor(editor)
            .placeholder("Click to add a description...")
            .on_action(Message::DescriptionEdited)
            .height(Length::Fixed(160.0)),
        button(text(save_label))
            .style(save_style)
            .on_press(Message::SaveDescription),
    ]
    .spacing(12);

    if let Some(link) = item.external_link() {
        content = content.push(link_button(link));
    }

    content.into()
}
