use crate::models::media::{MediaFile, MediaType};
use crate::services::media_service::Enrichment;
use crate::utils::capitalize_first;
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{Button, Column, Container, Row, Text};
use iced::{Element, Length};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;

/// Tile for one media entry: type glyph, name, first tags, and an
/// open-in-browser action. Thumbnail-only hits get a small badge.
pub fn media_card<'a, M: Clone + 'a>(
    file: &'a MediaFile,
    enrichment: Option<&'a Enrichment>,
    on_open: M,
) -> Element<'a, M> {
    let glyph = match file.file_type {
        MediaType::Image => "image",
        MediaType::Video => "film",
        MediaType::Audio => "music",
    };

    let icon = Container::new(fa_icon_solid(glyph).size(36.0))
        .width(Length::Fill)
        .height(Length::Fixed(80.0))
        .align_x(Horizontal::Center)
        .align_y(Vertical::Center);

    let mut tags_row = Row::new().spacing(5);
    for tag in file.tags.iter().take(3) {
        tags_row = tags_row.push(
            Container::new(Text::new(capitalize_first(&tag.name)).size(12))
                .padding(4)
                .style(Modern::sheet_container()),
        );
    }
    if file.tags.len() > 3 {
        tags_row = tags_row.push(
            Text::new(format!("+{}", file.tags.len() - 3))
                .size(12)
                .style(Modern::secondary_text()),
        );
    }

    let mut column = Column::new()
        .spacing(8)
        .push(icon)
        .push(Text::new(&file.file_name).size(14))
        .push(tags_row.wrap());

    if let Some(Enrichment::ThumbnailOnly { .. }) = enrichment {
        column = column.push(
            Text::new(t!("search.badge.thumbnail_only"))
                .size(12)
                .style(Modern::secondary_text()),
        );
    }

    if !file.upload_date.is_empty() {
        let date = file.upload_date.split('T').next().unwrap_or("");
        column = column.push(
            Text::new(date.to_string())
                .size(12)
                .style(Modern::secondary_text()),
        );
    }

    let open_button = Button::new(
        Container::new(fa_icon_solid("up-right-from-square").size(18.0))
            .width(Length::Fill)
            .align_x(Horizontal::Center)
            .align_y(Vertical::Center),
    )
    .style(Modern::primary_button())
    .width(Length::Fill)
    .on_press(on_open);

    Container::new(column.push(open_button))
        .padding(10)
        .width(Length::Fixed(220.0))
        .style(Modern::accent_container())
        .into()
}
