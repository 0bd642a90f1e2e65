use crate::components::{empty_state, media_card};
use crate::config::get_settings;
use crate::models::media::MediaFile;
use crate::models::query::SearchQuery;
use crate::models::session::Session;
use crate::services::api_client::ApiClient;
use crate::services::toast_service::push_error;
use crate::services::{file_service, media_service};
use iced::widget::{Button, Column, Container, Row, Scrollable, Text, TextInput};
use iced::{Element, Length, Task};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;
use log::{error, info};
use rust_i18n::t;
use std::sync::Arc;

pub enum Action {
    Run(Task<Message>),
    None,
}

#[derive(Debug, Clone)]
pub enum Message {
    UploadsLoaded(Result<Vec<MediaFile>, String>),
    FilterChanged(String),
    Refresh,
    OpenFile(String),
    NoOps,
}

pub struct Dashboard {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    uploads: Vec<MediaFile>,
    filter_text: String,
    loading: bool,
}

impl Dashboard {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> (Self, Task<Message>) {
        let task = Self::load_task(api.clone(), session.clone());
        (
            Self {
                api,
                session,
                uploads: Vec::new(),
                filter_text: String::new(),
                loading: true,
            },
            task,
        )
    }

    fn load_task(api: Arc<ApiClient>, session: Arc<Session>) -> Task<Message> {
        Task::perform(
            async move {
                media_service::recent_uploads(&api, &session)
                    .await
                    .map_err(|err| err.to_string())
            },
            Message::UploadsLoaded,
        )
    }

    /// Quick filter applied locally; the filter text is matched as a
    /// species term against the already-loaded uploads.
    fn quick_query(&self) -> SearchQuery {
        let mut query = SearchQuery::new();
        let term = self.filter_text.trim();
        if !term.is_empty() {
            query.species.push(term.to_string());
        }
        query
    }

    /// The first page of matching uploads, plus the full match count so the
    /// header reports totals rather than the page size.
    fn filtered(&self, limit: usize) -> (Vec<&MediaFile>, usize) {
        let query = self.quick_query();
        let matching: Vec<&MediaFile> = self
            .uploads
            .iter()
            .filter(|file| query.matches(file))
            .collect();
        let total = matching.len();
        (matching.into_iter().take(limit).collect(), total)
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::UploadsLoaded(Ok(files)) => {
                info!("loaded {} recent upload(s)", files.len());
                self.uploads = files;
                self.loading = false;
                Action::None
            }
            Message::UploadsLoaded(Err(err)) => {
                error!("failed to load recent uploads: {}", err);
                push_error(t!("message.dashboard.load_error"));
                self.loading = false;
                Action::None
            }
            Message::FilterChanged(text) => {
                self.filter_text = text;
                Action::None
            }
            Message::Refresh => {
                self.loading = true;
                Action::Run(Self::load_task(self.api.clone(), self.session.clone()))
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
        let mut header = Column::new()
            .spacing(5)
            .push(Text::new(t!("dashboard.welcome", name = self.session.name.as_str())).size(24));

        if !self.session.email.is_empty() {
            header = header.push(
                Text::new(self.session.email.as_str())
                    .size(14)
                    .style(Modern::secondary_text()),
            );
        }
        if self.session.has_role("admins") {
            header = header.push(
                Text::new(t!("dashboard.role.admin"))
                    .size(12)
                    .style(Modern::secondary_text()),
            );
        }

        let header_row = Row::new()
            .spacing(10)
            .push(header.width(Length::Fill))
            .push(
                Button::new(fa_icon_solid("arrows-rotate").size(16.0))
                    .style(Modern::blue_tinted_button())
                    .padding(10)
                    .on_press(Message::Refresh),
            );

        let filter_input = TextInput::new(
            t!("dashboard.input.filter").as_ref(),
            &self.filter_text,
        )
        .on_input(Message::FilterChanged)
        .style(Modern::search_input())
        .padding(10);

        let page_size = get_settings().config.items_per_page as usize;
        let (page, total) = self.filtered(page_size);

        let mut grid = Row::new().spacing(10);
        for file in page {
            grid = grid.push(media_card(
                file,
                None,
                Message::OpenFile(file.file_url.clone()),
            ));
        }

        let body: Element<Message> = if self.loading {
            Container::new(
                Text::new(t!("dashboard.loading"))
                    .size(16)
                    .style(Modern::secondary_text()),
            )
            .width(Length::Fill)
            .center_x(Length::Fill)
            .padding(40)
            .into()
        } else if total == 0 {
            empty_state(
                "dove",
                t!("dashboard.empty.title"),
                t!("dashboard.empty.subtitle"),
            )
        } else {
            Scrollable::new(grid.wrap()).height(Length::Fill).into()
        };

        let content = Column::new()
            .spacing(15)
            .push(
                Container::new(header_row)
                    .padding(15)
                    .width(Length::Fill)
                    .style(Modern::card_container()),
            )
            .push(filter_input)
            .push(
                Text::new(t!("dashboard.recent.title", count = total))
                    .size(14)
                    .style(Modern::secondary_text()),
            )
            .push(body);

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(15)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::{MediaType, Tag};
    use std::time::Duration;

    fn tagged_file(id: usize, tag: &str) -> MediaFile {
        MediaFile {
            id: id.to_string(),
            file_name: format!("{id}.jpg"),
            file_type: MediaType::Image,
            file_url: format!("https://x/{id}.jpg"),
            thumbnail_url: None,
            tags: vec![Tag::new(tag, 1)],
            upload_date: String::new(),
            user_id: String::new(),
        }
    }

    fn dashboard_with(uploads: Vec<MediaFile>, filter_text: &str) -> Dashboard {
        Dashboard {
            api: Arc::new(ApiClient::new(
                "http://proxy",
                "http://direct",
                Duration::from_secs(1),
            )),
            session: Arc::new(Session {
                token: String::new(),
                name: "Tester".to_string(),
                email: String::new(),
                groups: Vec::new(),
            }),
            uploads,
            filter_text: filter_text.to_string(),
            loading: false,
        }
    }

    #[test]
    fn test_match_count_is_not_capped_by_page_size() {
        let uploads = (0..5).map(|i| tagged_file(i, "robin")).collect();
        let dashboard = dashboard_with(uploads, "robin");

        let (page, total) = dashboard.filtered(3);
        assert_eq!(page.len(), 3);
        assert_eq!(total, 5);
    }

    #[test]
    fn test_filter_narrows_both_page_and_count() {
        let mut uploads: Vec<MediaFile> = (0..3).map(|i| tagged_file(i, "robin")).collect();
        uploads.push(tagged_file(3, "owl"));
        let dashboard = dashboard_with(uploads, "owl");

        let (page, total) = dashboard.filtered(10);
        assert_eq!(page.len(), 1);
        assert_eq!(total, 1);
        assert_eq!(page[0].id, "3");
    }
}
