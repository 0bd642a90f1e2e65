use crate::components::chip_list::{self, ChipList};
use crate::components::{empty_state, media_card};
use crate::models::query::SearchQuery;
use crate::models::session::Session;
use crate::services::api_client::ApiClient;
use crate::services::media_service::{self, SearchResult};
use crate::services::toast_service::push_error;
use crate::services::file_service;
use iced::widget::{Button, Column, Container, Row, Scrollable, Text, TextInput};
use iced::{Alignment, Element, Length, Task};
use iced_font_awesome::fa_icon;
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;
use log::error;
use rust_i18n::t;
use std::sync::Arc;

pub enum Action {
    Run(Task<Message>),
    ShowToast(String),
    None,
}

#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    pub name: String,
    pub count: String,
}

#[derive(Debug, Clone)]
pub enum Message {
    TagNameChanged(usize, String),
    TagCountChanged(usize, String),
    AddTagFilter,
    RemoveTagFilter(usize),
    Species(chip_list::Message),
    ThumbnailChanged(String),
    SearchPressed,
    Results(Result<SearchResult, String>),
    ClearResults,
    OpenFile(String),
    NoOps,
}

pub struct Search {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    tag_filters: Vec<TagFilter>,
    species: ChipList,
    thumbnail_input: String,
    result: Option<SearchResult>,
    searching: bool,
}

impl Search {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> (Self, Task<Message>) {
        (
            Self {
                api,
                session,
                tag_filters: vec![TagFilter::default()],
                species: ChipList::new(t!("search.input.species")),
                thumbnail_input: String::new(),
                result: None,
                searching: false,
            },
            Task::none(),
        )
    }

    /// Collects the filled-in filters. An unparsable or missing count
    /// falls back to 1, the weakest requirement for a tag.
    fn build_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new();
        for filter in &self.tag_filters {
            let name = filter.name.trim();
            if name.is_empty() {
                continue;
            }
            let count = filter.count.trim().parse::<u32>().unwrap_or(1).max(1);
            query.tags.insert(name.to_string(), count);
        }
        query.species = self.species.items.clone();
        let thumbnail = self.thumbnail_input.trim();
        if !thumbnail.is_empty() {
            query.thumbnail_url = Some(thumbnail.to_string());
        }
        query
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::TagNameChanged(index, value) => {
                if let Some(filter) = self.tag_filters.get_mut(index) {
                    filter.name = value;
                }
                Action::None
            }
            Message::TagCountChanged(index, value) => {
                if let Some(filter) = self.tag_filters.get_mut(index) {
                    if value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) {
                        filter.count = value;
                    }
                }
                Action::None
            }
            Message::AddTagFilter => {
                self.tag_filters.push(TagFilter::default());
                Action::None
            }
            Message::RemoveTagFilter(index) => {
                if index < self.tag_filters.len() {
                    self.tag_filters.remove(index);
                }
                if self.tag_filters.is_empty() {
                    self.tag_filters.push(TagFilter::default());
                }
                Action::None
            }
            Message::Species(message) => {
                self.species.update(message);
                Action::None
            }
            Message::ThumbnailChanged(value) => {
                self.thumbnail_input = value;
                Action::None
            }
            Message::SearchPressed => {
                let query = self.build_query();
                if query.is_empty() {
                    return Action::ShowToast(t!("message.search.empty_query").to_string());
                }
                self.searching = true;
                let api = self.api.clone();
                let session = self.session.clone();
                Action::Run(Task::perform(
                    async move {
                        media_service::search(&api, &session, &query)
                            .await
                            .map_err(|err| err.to_string())
                    },
                    Message::Results,
                ))
            }
            Message::Results(Ok(result)) => {
                self.searching = false;
                self.result = Some(result);
                Action::None
            }
            Message::Results(Err(err)) => {
                error!("search failed: {}", err);
                self.searching = false;
                push_error(t!("message.search.error"));
                Action::None
            }
            Message::ClearResults => {
                self.result = None;
                Action::None
            }
            Message::OpenFile(url) => {
                if let Err(err) = file_service::open_url(&url) {
                    error!("failed to open {}: {}", url, err);
                }
                Action::None
            }
            Message::NoOps => Action::None,
        }
    }

    pub fn view(&self) -> Element<Message> {
        let header = Column::new()
            .spacing(5)
            .push(Text::new(t!("search.title")).size(24))
            .push(
                Text::new(t!("search.subtitle"))
                    .size(14)
                    .style(Modern::secondary_text()),
            );

        let mut tag_rows = Column::new().spacing(8);
        for (index, filter) in self.tag_filters.iter().enumerate() {
            tag_rows = tag_rows.push(
                Row::new()
                    .spacing(8)
                    .align_y(Alignment::Center)
                    .push(
                        TextInput::new(t!("search.input.tag_name").as_ref(), &filter.name)
                            .on_input(move |value| Message::TagNameChanged(index, value))
                            .style(Modern::text_input())
                            .width(Length::FillPortion(6)),
                    )
                    .push(
                        TextInput::new(t!("search.input.tag_count").as_ref(), &filter.count)
                            .on_input(move |value| Message::TagCountChanged(index, value))
                            .style(Modern::text_input())
                            .width(Length::FillPortion(2)),
                    )
                    .push(
                        Button::new(fa_icon("circle-xmark").size(14.0))
                            .style(Modern::danger_button())
                            .padding(6)
                            .on_press(Message::RemoveTagFilter(index)),
                    ),
            );
        }
        tag_rows = tag_rows.push(
            Button::new(Text::new(t!("search.button.add_tag")))
                .style(Modern::blue_tinted_button())
                .on_press(Message::AddTagFilter),
        );

        let thumbnail_input = TextInput::new(
            t!("search.input.thumbnail").as_ref(),
            &self.thumbnail_input,
        )
        .on_input(Message::ThumbnailChanged)
        .style(Modern::text_input());

        let mut search_button = Button::new(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("magnifying-glass").size(16.0))
                .push(Text::new(if self.searching {
                    t!("search.button.searching")
                } else {
                    t!("search.button.search")
                })),
        )
        .style(Modern::primary_button())
        .padding(10);
        if !self.searching {
            search_button = search_button.on_press(Message::SearchPressed);
        }

        let filters = Container::new(
            Column::new()
                .spacing(12)
                .push(Text::new(t!("search.label.tags")).size(16))
                .push(tag_rows)
                .push(Text::new(t!("search.label.species")).size(16))
                .push(self.species.view().map(Message::Species))
                .push(Text::new(t!("search.label.thumbnail")).size(16))
                .push(thumbnail_input)
                .push(search_button),
        )
        .padding(15)
        .width(Length::Fill)
        .style(Modern::card_container());

        let mut content = Column::new().spacing(15).push(header).push(filters);

        if let Some(result) = &self.result {
            let summary = Row::new()
                .spacing(10)
                .align_y(Alignment::Center)
                .push(
                    Text::new(t!("search.results.count", count = result.total_count))
                        .size(16)
                        .width(Length::Fill),
                )
                .push(
                    Button::new(Text::new(t!("search.button.clear")))
                        .style(Modern::secondary_button())
                        .on_press(Message::ClearResults),
                );
            content = content.push(summary);

            if result.hits.is_empty() {
                content = content.push(empty_state(
                    "binoculars",
                    t!("search.empty.title"),
                    t!("search.empty.subtitle"),
                ));
            } else {
                let mut grid = Row::new().spacing(10);
                for hit in &result.hits {
                    grid = grid.push(media_card(
                        &hit.file,
                        Some(&hit.enrichment),
                        Message::OpenFile(hit.file.file_url.clone()),
                    ));
                }
                content = content.push(Scrollable::new(grid.wrap()).height(Length::Fill));
            }
        }

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(15)
            .into()
    }
}
