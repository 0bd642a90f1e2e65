#[macro_use]
extern crate rust_i18n;
mod components;
mod config;
mod models;
mod screen;
mod services;
mod utils;

use crate::components::navbar::{NavButton, Navbar};
use crate::components::toast::{Toast, ToastKind};
use crate::components::{navbar, toast};
use crate::config::get_settings;
use crate::models::session::Session;
use crate::screen::{Dashboard, ManageTags, Preferences, Screen, Search, Upload};
use crate::screen::{dashboard, manage_tags, preferences, search, upload};
use crate::services::api_client::ApiClient;
use crate::services::{logger_service, toast_service};
use iced::widget::{Column, Row, container, stack};
use iced::{Alignment, Element, Length, Subscription, Task, Theme, time};
use iced_modern_theme::Modern;
use log::info;
use std::sync::Arc;
use std::time::{Duration, Instant};

i18n!("locales", fallback = "en");

#[derive(Debug, Clone)]
pub enum Message {
    Navbar(navbar::Message),
    Dashboard(dashboard::Message),
    Upload(upload::Message),
    Search(search::Message),
    ManageTags(manage_tags::Message),
    Preferences(preferences::Message),
    SettingsUpdated,
    Toast(toast::Message),
    Tick(Instant),
    HandleToast {
        kind: ToastKind,
        message: String,
        duration: Option<Duration>,
    },
}

pub struct BirdTag {
    theme: Theme,
    screen: Screen,
    navbar: Navbar,
    toasts: Vec<Toast>,
    next_toast_id: u32,
    api: Arc<ApiClient>,
    session: Arc<Session>,
}

impl BirdTag {
    pub fn new() -> (Self, Task<Message>) {
        let session = Arc::new(Session::from_env());
        let api = Arc::new(ApiClient::from_settings());

        let (dashboard, dashboard_task) = Dashboard::new(api.clone(), session.clone());
        let task = dashboard_task.map(Message::Dashboard);
        let settings = get_settings();
        let theme = if settings.config.theme == "Dark" {
            Modern::dark_theme()
        } else {
            Modern::light_theme()
        };
        (
            Self {
                theme,
                screen: Screen::Dashboard(dashboard),
                navbar: Navbar::new(),
                toasts: vec![],
                next_toast_id: 0,
                api,
                session,
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        t!("app.title").to_string()
    }

    fn theme(&self) -> Theme {
        self.theme.clone()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::HandleToast {
                kind,
                message,
                duration,
            } => {
                self.toasts.push(Toast {
                    id: self.next_toast_id,
                    message,
                    kind,
                    created: Instant::now(),
                    duration: duration.unwrap_or(Duration::from_secs(4)),
                });
                self.next_toast_id += 1;
                Task::none()
            }
            Message::Dashboard(message) => {
                if let Screen::Dashboard(dashboard) = &mut self.screen {
                    match dashboard.update(message) {
                        dashboard::Action::None => Task::none(),
                        dashboard::Action::Run(task) => task.map(Message::Dashboard),
                    }
                } else {
                    Task::none()
                }
            }
            Message::Upload(message) => {
                if let Screen::Upload(upload) = &mut self.screen {
                    match upload.update(message) {
                        upload::Action::None => Task::none(),
                        upload::Action::Run(task) => task.map(Message::Upload),
                    }
                } else {
                    Task::none()
                }
            }
            Message::Search(message) => {
                if let Screen::Search(search) = &mut self.screen {
                    match search.update(message) {
                        search::Action::None => Task::none(),
                        search::Action::Run(task) => task.map(Message::Search),
                        search::Action::ShowToast(message) => self.update(Message::HandleToast {
                            kind: ToastKind::Error,
                            message,
                            duration: None,
                        }),
                    }
                } else {
                    Task::none()
                }
            }
            Message::ManageTags(message) => {
                if let Screen::ManageTags(manage_tags) = &mut self.screen {
                    match manage_tags.update(message) {
                        manage_tags::Action::None => Task::none(),
                        manage_tags::Action::Run(task) => task.map(Message::ManageTags),
                        manage_tags::Action::ShowToast(message) => {
                            self.update(Message::HandleToast {
                                kind: ToastKind::Error,
                                message,
                                duration: None,
                            })
                        }
                    }
                } else {
                    Task::none()
                }
            }
            Message::Preferences(message) => {
                if let Screen::Preferences(preferences) = &mut self.screen {
                    match preferences.update(message) {
                        preferences::Action::None => Task::none(),
                        preferences::Action::UpdateUI() => {
                            let _ = self.update(Message::SettingsUpdated);
                            Task::none()
                        }
                    }
                } else {
                    Task::none()
                }
            }
            Message::SettingsUpdated => {
                let settings = get_settings();
                self.theme = if settings.config.theme == "Dark" {
                    Modern::dark_theme()
                } else {
                    Modern::light_theme()
                };
                drop(settings);
                self.api = Arc::new(ApiClient::from_settings());
                self.navbar.update(navbar::Message::NoOps);
                let (preferences, _task) = Preferences::new();
                self.screen = Screen::Preferences(preferences);

                Task::none()
            }
            Message::Navbar(navbar_msg) => {
                let action = self.navbar.update(navbar_msg);

                match action {
                    navbar::Action::Run(task) => task.map(Message::Navbar),
                    navbar::Action::Navigate(id) => match id {
                        NavButton::Dashboard => {
                            let (dashboard, task) =
                                Dashboard::new(self.api.clone(), self.session.clone());
                            self.screen = Screen::Dashboard(dashboard);
                            task.map(Message::Dashboard)
                        }
                        NavButton::Upload => {
                            let (upload, task) =
                                Upload::new(self.api.clone(), self.session.clone());
                            self.screen = Screen::Upload(upload);
                            task.map(Message::Upload)
                        }
                        NavButton::Search => {
                            let (search, task) =
                                Search::new(self.api.clone(), self.session.clone());
                            self.screen = Screen::Search(search);
                            task.map(Message::Search)
                        }
                        NavButton::ManageTags => {
                            let (manage_tags, task) = ManageTags::new(self.api.clone());
                            self.screen = Screen::ManageTags(manage_tags);
                            task.map(Message::ManageTags)
                        }
                        NavButton::Preferences => {
                            let (preferences, task) = Preferences::new();
                            self.screen = Screen::Preferences(preferences);
                            task.map(Message::Preferences)
                        }
                    },
                    navbar::Action::None => Task::none(),
                }
            }
            Message::Tick(now) => {
                // Async tasks park their toasts in the service queue; the
                // tick moves them into the overlay and drops expired ones.
                while let Some(mut toast) = toast_service::pop_toast() {
                    toast.id = self.next_toast_id;
                    self.next_toast_id += 1;
                    self.toasts.push(toast);
                }
                self.toasts
                    .retain(|toast| now.duration_since(toast.created) < toast.duration);
                Task::none()
            }
            Message::Toast(toast::Message::Dismiss(id)) => {
                self.toasts.retain(|toast| toast.id != id);
                Task::none()
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        time::every(Duration::from_millis(500)).map(Message::Tick)
    }

    pub fn view(&self) -> Element<Message> {
        let navbar = self.navbar.view().map(Message::Navbar);

        let content = match &self.screen {
            Screen::Dashboard(dashboard) => dashboard.view().map(Message::Dashboard),
            Screen::Upload(upload) => upload.view().map(Message::Upload),
            Screen::Search(search) => search.view().map(Message::Search),
            Screen::ManageTags(manage_tags) => manage_tags.view().map(Message::ManageTags),
            Screen::Preferences(preferences) => preferences.view().map(Message::Preferences),
        };

        let layout = Row::new().push(navbar).push(content);

        let toast_widgets: Vec<_> = self
            .toasts
            .iter()
            .map(|toast| toast.view().map(Message::Toast))
            .collect();

        let toast_overlay = container(Column::with_children(toast_widgets).spacing(10))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .align_x(Alignment::Start)
            .align_y(Alignment::End);

        stack![layout, toast_overlay].into()
    }
}

fn main() -> iced::Result {
    logger_service::init().expect("Failed to initialize logger");

    info!("{:?}", _rust_i18n_available_locales());

    {
        let settings = get_settings();
        rust_i18n::set_locale(settings.config.language.as_str());
    }

    dotenv::dotenv().ok();

    iced::application(BirdTag::title, BirdTag::update, BirdTag::view)
        .theme(BirdTag::theme)
        .subscription(BirdTag::subscription)
        .run_with(BirdTag::new)
}
