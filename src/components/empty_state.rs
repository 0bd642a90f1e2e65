use iced::widget::{Column, Container, Text};
use iced::{Alignment, Length};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;

pub fn empty_state<'a, M: 'a>(
    icon: &str,
    title: impl Into<String>,
    subtitle: impl Into<String>,
) -> iced::Element<'a, M> {
    let column = Column::new()
        .spacing(20)
        .align_x(Alignment::Center)
        .push(Container::new(fa_icon_solid(icon).size(64.0)))
        .push(
            Text::new(title.into())
                .size(18)
                .style(Modern::secondary_text()),
        )
        .push(
            Text::new(subtitle.into())
                .size(14)
                .style(Modern::secondary_text()),
        );

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fixed(300.0))
        .align_x(Alignment::Center)
        .align_y(Alignment::Center)
        .into()
}
