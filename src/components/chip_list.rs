use iced::widget::{Button, Column, Row, Text, TextInput};
use iced::{Alignment, Element, Length};
use iced_font_awesome::fa_icon;
use iced_modern_theme::Modern;

#[derive(Debug, Clone)]
pub enum Message {
    InputChanged(String),
    Add,
    Remove(usize),
}

/// A growable list of short strings (URLs, tag names, species) entered one
/// at a time, rendered as dismissable chips.
#[derive(Debug, Clone)]
pub struct ChipList {
    pub items: Vec<String>,
    input: String,
    placeholder: String,
}

impl ChipList {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            input: String::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn update(&mut self, message: Message) {
        match message {
            Message::InputChanged(value) => self.input = value,
            Message::Add => {
                let value = self.input.trim().to_string();
                if !value.is_empty() {
                    self.items.push(value);
                    self.input.clear();
                }
            }
            Message::Remove(index) => {
                if index < self.items.len() {
                    self.items.remove(index);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.input.clear();
    }

    pub fn view(&self) -> Element<'_, Message> {
        let input_row = Row::new()
            .spacing(5)
            .push(
                TextInput::new(self.placeholder.as_str(), &self.input)
                    .on_input(Message::InputChanged)
                    .on_submit(Message::Add)
                    .style(Modern::text_input())
                    .width(Length::FillPortion(9)),
            )
            .push(
                Button::new(Text::new(t!("chip_list.button.add")))
                    .style(Modern::primary_button())
                    .on_press(Message::Add)
                    .width(Length::FillPortion(1)),
            );

        let mut chips = Row::new().spacing(8);
        for (index, item) in self.items.iter().enumerate() {
            chips = chips.push(
                Button::new(
                    Row::new()
                        .spacing(6)
                        .align_y(Alignment::Center)
                        .push(Text::new(item.as_str()).size(14))
                        .push(fa_icon("circle-xmark").size(14.0)),
                )
                .style(Modern::blue_tinted_button())
                .padding(5)
                .on_press(Message::Remove(index)),
            );
        }

        Column::new()
            .spacing(10)
            .push(input_row)
            .push(chips.wrap())
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_skips_empty() {
        let mut chips = ChipList::new("url");
        chips.update(Message::InputChanged("  https://x/y.jpg  ".to_string()));
        chips.update(Message::Add);
        assert_eq!(chips.items, vec!["https://x/y.jpg".to_string()]);

        chips.update(Message::InputChanged("   ".to_string()));
        chips.update(Message::Add);
        assert_eq!(chips.items.len(), 1);
    }

    #[test]
    fn test_remove_out_of_range_is_ignored() {
        let mut chips = ChipList::new("tag");
        chips.update(Message::InputChanged("robin".to_string()));
        chips.update(Message::Add);
        chips.update(Message::Remove(5));
        assert_eq!(chips.items.len(), 1);
        chips.update(Message::Remove(0));
        assert!(chips.items.is_empty());
    }
}
