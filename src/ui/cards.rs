use std::path::Path;

use iced::widget::{button, column, container, image, mouse_area, row, scrollable, text, Row};
use iced::{Alignment, ContentFit, Element, Length};
use iced_aw::Wrap;

use crate::state::data::{image_source, Item};
use crate::state::filter::CategoryFilter;
use crate::state::showcase::Showcase;
use crate::Message;

const CARD_WIDTH: f32 = 280.0;
const COVER_HEIGHT: f32 = 220.0;

/// One button per filter option; the active one is highlighted
pub fn filter_bar(showcase: &Showcase) -> Element<'_, Message> {
    let buttons = showcase.filter_options().into_iter().map(|filter| {
        let label = match &filter {
            CategoryFilter::All => "All".to_string(),
            CategoryFilter::Category(category) => category.clone(),
        };
        let style = if &filter == showcase.filter() {
            button::primary
        } else {
            button::secondary
        };

        button(text(label))
            .padding([6, 14])
            .style(style)
            .on_press(Message::SelectFilter(filter))
            .into()
    });

    Row::with_children(buttons).spacing(8).into()
}

/// Cards for the items passing the active filter
pub fn card_grid<'a>(showcase: &'a Showcase, image_root: &Path) -> Element<'a, Message> {
    let Some(catalog) = showcase.catalog() else {
        return column![].into();
    };

    let cards: Vec<Element<'a, Message>> = showcase
        .visible_keys()
        .into_iter()
        .filter_map(|key| catalog.get(key).map(|item| card(key, item, image_root)))
        .collect();

    scrollable(
        Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0),
    )
    .height(Length::Fill)
    .into()
}

fn card<'a>(key: &str, item: &'a Item, image_root: &Path) -> Element<'a, Message> {
    let cover: Element<'a, Message> = match item.cover_image() {
        Some(reference) => image(image::Handle::from_path(image_source(image_root, reference)))
            .width(Length::Fill)
            .height(Length::Fixed(COVER_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => placeholder(Length::Fixed(COVER_HEIGHT)),
    };

    let mut badges = row![badge(item.category.clone())].spacing(6);
    if item.images.len() > 1 {
        badges = badges.push(badge(format!("🖼 {}", item.images.len())));
    }

    let description = if item.description.is_empty() {
        text("Click to add a description...").size(14)
    } else {
        text(item.description.as_str()).size(14)
    };

    let mut details = column![
        badges,
        text(item.original_name.as_str()).size(18),
        text(item.price_label()).size(16),
        description,
    ]
    .spacing(6)
    .padding(12);

    if let Some(link) = item.external_link() {
        details = details.push(link_button(link));
    }

    mouse_area(
        container(column![cover, details])
            .width(Length::Fixed(CARD_WIDTH))
            .style(container::bordered_box),
    )
    .on_press(Message::OpenItem(key.to_string()))
    .into()
}

/// Stands in for a missing cover or gallery image
pub fn placeholder<'a>(height: Length) -> Element<'a, Message> {
    container(text("No image").size(16))
        .center_x(Length::Fill)
        .center_y(height)
        .style(container::rounded_box)
        .into()
}

pub fn link_button<'a>(link: &str) -> Element<'a, Message> {
    button(text("↗ View original product").size(13))
        .padding(0)
        .style(button::text)
        .on_press(Message::OpenLink(link.to_string()))
        .into()
}

fn badge<'a>(label: String) -> Element<'a, Message> {
    container(text(label).size(12))
        .padding([2, 8])
        .style(container::rounded_box)
        .into()
}

/// Shown instead of the grid when there is nothing to list
pub fn empty_state<'a>(message: &'a str, detail: Option<String>) -> Element<'a, Message> {
    let mut content = column![
        text("📦").size(48),
        text("No items found").size(24),
        text(message).size(16),
    ]
    .spacing(10)
    .align_x(Alignment::Center);

    if let Some(detail) = detail {
        content = content.push(text(detail).size(12));
    }

    container(content)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
