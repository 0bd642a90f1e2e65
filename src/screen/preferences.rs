use crate::config::{get_settings, get_settings_mut};
use iced::widget::{Column, Container, PickList, Scrollable, Text, TextInput};
use iced::{Element, Length, Padding, Task};
use iced_modern_theme::Modern;
use log::error;
use rust_i18n::t;

pub enum Action {
    None,
    UpdateUI(),
}

#[derive(Debug, Clone)]
pub enum Message {
    LanguageChanged(String),
    ThemeChanged(String),
    ItemsPerPageChanged(u64),
    ApiBaseChanged(String),
    ProxyBaseChanged(String),
    TimeoutChanged(u64),
    NoOps,
}

pub struct Preferences {
    available_languages: Vec<String>,
    pub theme: String,
    pub items_per_page: u64,
    pub api_base_url: String,
    pub proxy_base_url: String,
    pub request_timeout_secs: u64,
    selected_language: String,
}

const THEMES: [&str; 2] = ["Light", "Dark"];

impl Preferences {
    pub fn new() -> (Self, Task<Message>) {
        let settings = get_settings();
        let selected_language = settings.config.language.clone();
        let theme = settings.config.theme.clone();
        let items_per_page = settings.config.items_per_page;
        let api_base_url = settings.config.api_base_url.clone();
        let proxy_base_url = settings.config.proxy_base_url.clone();
        let request_timeout_secs = settings.config.request_timeout_secs;
        let available_languages = rust_i18n::available_locales!()
            .iter()
            .map(|l| l.to_string())
            .collect();
        (
            Self {
                available_languages,
                selected_language,
                theme,
                items_per_page,
                api_base_url,
                proxy_base_url,
                request_timeout_secs,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::LanguageChanged(language) => {
                let mut settings = get_settings_mut();
                settings.config.language = language;
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                rust_i18n::set_locale(&settings.config.language);
                self.selected_language = settings.config.language.clone();
                Action::UpdateUI()
            }
            Message::ThemeChanged(theme) => {
                let mut settings = get_settings_mut();
                settings.config.theme = theme;
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                self.theme = settings.config.theme.clone();
                Action::UpdateUI()
            }
            Message::ItemsPerPageChanged(items_per_page) => {
                self.items_per_page = items_per_page.clamp(1, 100);
                let mut settings = get_settings_mut();
                settings.config.items_per_page = self.items_per_page;
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                Action::None
            }
            Message::ApiBaseChanged(url) => {
                self.api_base_url = url;
                let mut settings = get_settings_mut();
                settings.config.api_base_url = self.api_base_url.clone();
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                Action::UpdateUI()
            }
            Message::ProxyBaseChanged(url) => {
                self.proxy_base_url = url;
                let mut settings = get_settings_mut();
                settings.config.proxy_base_url = self.proxy_base_url.clone();
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                Action::UpdateUI()
            }
            Message::TimeoutChanged(secs) => {
                self.request_timeout_secs = secs.clamp(1, 120);
                let mut settings = get_settings_mut();
                settings.config.request_timeout_secs = self.request_timeout_secs;
                if let Err(err) = settings.save() {
                    error!("Failed to save settings: {}", err);
                }
                Action::UpdateUI()
            }
            Message::NoOps => Action::None,
        }
    }

    pub fn view(&self) -> Element<Message> {
        let language_options = self.available_languages.clone();

        let language_section = self.create_section(
            t!("preferences.label.language").to_string(),
            PickList::new(
                language_options,
                Some(self.selected_language.clone()),
                Message::LanguageChanged,
            )
            .placeholder(t!("preferences.select.language"))
            .style(Modern::pick_list())
            .width(Length::Fill),
        );

        let theme_section = self.create_section(
            t!("preferences.label.theme").to_string(),
            PickList::new(THEMES, Some(self.theme.as_str()), |theme| {
                Message::ThemeChanged(theme.to_string())
            })
            .placeholder(t!("preferences.select.theme"))
            .style(Modern::pick_list())
            .width(Length::Fill),
        );

        let items_section = self.create_section(
            t!("preferences.label.items_per_page").to_string(),
            number_input(self.items_per_page, 100, Message::ItemsPerPageChanged)
                .style(Modern::text_input())
                .width(Length::Fill),
        );

        let api_section = self.create_section(
            t!("preferences.label.api_base_url").to_string(),
            TextInput::new("https://", &self.api_base_url)
                .on_input(Message::ApiBaseChanged)
                .style(Modern::text_input())
                .padding(Padding::new(12.0))
                .width(Length::Fill),
        );

        let proxy_section = self.create_section(
            t!("preferences.label.proxy_base_url").to_string(),
            TextInput::new("http://", &self.proxy_base_url)
                .on_input(Message::ProxyBaseChanged)
                .style(Modern::text_input())
                .padding(Padding::new(12.0))
                .width(Length::Fill),
        );

        let timeout_section = self.create_section(
            t!("preferences.label.request_timeout").to_string(),
            number_input(self.request_timeout_secs, 120, Message::TimeoutChanged)
                .style(Modern::text_input())
                .width(Length::Fill),
        );

        let scrollable = Scrollable::new(
            Column::new()
                .padding(20)
                .spacing(30)
                .push(
                    Text::new(t!("preferences.title"))
                        .size(32)
                        .style(Modern::primary_text()),
                )
                .push(
                    Text::new(t!("preferences.subtitle"))
                        .size(16)
                        .style(Modern::secondary_text()),
                )
                .push(
                    Column::new()
                        .spacing(25)
                        .push(language_section)
                        .push(theme_section)
                        .push(items_section)
                        .push(api_section)
                        .push(proxy_section)
                        .push(timeout_section),
                ),
        );

        Container::new(scrollable)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn create_section<'a>(
        &self,
        title: String,
        widget: impl Into<Element<'a, Message>>,
    ) -> Element<'a, Message> {
        Container::new(
            Column::new()
                .spacing(12)
                .push(Text::new(title).size(18).style(Modern::primary_text()))
                .push(widget),
        )
        .padding(20)
        .style(Modern::card_container())
        .width(Length::Fill)
        .into()
    }
}

fn number_input<'a>(
    value: u64,
    max: u64,
    on_change: impl Fn(u64) -> Message + 'a,
) -> TextInput<'a, Message> {
    TextInput::new("", &value.to_string())
        .on_input(move |s| {
            if let Ok(num) = s.parse::<u64>() {
                if num <= max {
                    on_change(num)
                } else {
                    on_change(max)
                }
            } else if s.is_empty() {
                on_change(1)
            } else {
                on_change(value)
            }
        })
        .padding(Padding::new(12.0))
        .size(16)
}
