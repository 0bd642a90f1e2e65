use crate::components::{empty_state, media_card};
use crate::models::media::{self, MediaFile};
use crate::models::session::Session;
use crate::services::api_client::ApiClient;
use crate::services::toast_service::{push_error, push_success};
use crate::services::{file_service, media_service};
use iced::widget::{Button, Column, Container, Row, Scrollable, Text};
use iced::{Alignment, Element, Length, Task};
use iced_font_awesome::fa_icon_solid;
use iced_modern_theme::Modern;
use log::error;
use rfd::AsyncFileDialog;
use rust_i18n::t;
use std::path::PathBuf;
use std::sync::Arc;

pub enum Action {
    Run(Task<Message>),
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Uploading,
    Done,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct PendingFile {
    pub id: usize,
    pub path: PathBuf,
    pub file_name: String,
    pub mime: &'static str,
    pub status: UploadStatus,
}

#[derive(Debug, Clone)]
pub enum Message {
    OpenFilePicker,
    FilesChosen(Vec<PathBuf>),
    RemoveFile(usize),
    UploadAll,
    Uploaded(usize, Result<MediaFile, String>),
    OpenFile(String),
    NoOps,
}

pub struct Upload {
    api: Arc<ApiClient>,
    session: Arc<Session>,
    files: Vec<PendingFile>,
    completed: Vec<MediaFile>,
    next_id: usize,
}

impl Upload {
    pub fn new(api: Arc<ApiClient>, session: Arc<Session>) -> (Self, Task<Message>) {
        (
            Self {
                api,
                session,
                files: Vec::new(),
                completed: Vec::new(),
                next_id: 0,
            },
            Task::none(),
        )
    }

    fn is_uploading(&self) -> bool {
        self.files
            .iter()
            .any(|file| file.status == UploadStatus::Uploading)
    }

    /// Uploads run one at a time; each completion schedules the next
    /// pending entry until none remain.
    fn start_next(&mut self) -> Action {
        let Some(entry) = self
            .files
            .iter_mut()
            .find(|file| file.status == UploadStatus::Idle)
        else {
            return Action::None;
        };

        entry.status = UploadStatus::Uploading;
        let id = entry.id;
        let path = entry.path.clone();
        let file_name = entry.file_name.clone();
        let mime = entry.mime;
        let api = self.api.clone();
        let session = self.session.clone();

        Action::Run(Task::perform(
            async move {
                let bytes = tokio::fs::read(&path)
                    .await
                    .map_err(|err| err.to_string())?;
                media_service::upload(&api, &session, &file_name, mime, bytes)
                    .await
                    .map_err(|err| err.to_string())
            },
            move |result| Message::Uploaded(id, result),
        ))
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::OpenFilePicker => Action::Run(Task::perform(
                async {
                    AsyncFileDialog::new()
                        .add_filter(
                            "Media",
                            &[
                                "png", "jpg", "jpeg", "gif", "webp", "mp4", "mov", "webm",
                                "mp3", "wav", "ogg", "flac",
                            ],
                        )
                        .pick_files()
                        .await
                        .map(|handles| {
                            handles
                                .iter()
                                .map(|handle| handle.path().to_path_buf())
                                .collect()
                        })
                        .unwrap_or_default()
                },
                Message::FilesChosen,
            )),
            Message::FilesChosen(paths) => {
                for path in paths {
                    let file_name = path
                        .file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_default();
                    if file_name.is_empty() {
                        continue;
                    }
                    let mime = media::mime_for_path(&path);
                    self.files.push(PendingFile {
                        id: self.next_id,
                        path,
                        file_name,
                        mime,
                        status: UploadStatus::Idle,
                    });
                    self.next_id += 1;
                }
                Action::None
            }
            Message::RemoveFile(id) => {
                self.files
                    .retain(|file| file.id != id || file.status == UploadStatus::Uploading);
                Action::None
            }
            Message::UploadAll => {
                if self.is_uploading() {
                    Action::None
                } else {
                    self.start_next()
                }
            }
            Message::Uploaded(id, result) => {
                if let Some(entry) = self.files.iter_mut().find(|file| file.id == id) {
                    match result {
                        Ok(file) => {
                            entry.status = UploadStatus::Done;
                            push_success(t!(
                                "message.upload.success",
                                name = file.file_name.as_str()
                            ));
                            self.completed.push(file);
                        }
                        Err(err) => {
                            error!("upload of {} failed: {}", entry.file_name, err);
                            entry.status = UploadStatus::Failed(err.clone());
                            push_error(t!(
                                "message.upload.error",
                                name = entry.file_name.as_str()
                            ));
                        }
                    }
                }
                self.start_next()
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
        let header = Container::new(
            Column::new()
                .spacing(5)
                .push(Text::new(t!("upload.title")).size(24))
                .push(
                    Text::new(t!("upload.subtitle"))
                        .size(14)
                        .style(Modern::secondary_text()),
                ),
        )
        .padding(15)
        .width(Length::Fill)
        .style(Modern::card_container());

        let pending = self
            .files
            .iter()
            .filter(|file| file.status == UploadStatus::Idle)
            .count();

        let mut pick_button = Button::new(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("folder-open").size(16.0))
                .push(Text::new(t!("upload.button.pick"))),
        )
        .style(Modern::blue_tinted_button())
        .padding(10);
        if !self.is_uploading() {
            pick_button = pick_button.on_press(Message::OpenFilePicker);
        }

        let mut upload_button = Button::new(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("cloud-arrow-up").size(16.0))
                .push(Text::new(t!("upload.button.upload_all"))),
        )
        .style(Modern::success_button())
        .padding(10);
        if pending > 0 && !self.is_uploading() {
            upload_button = upload_button.on_press(Message::UploadAll);
        }

        let actions = Row::new().spacing(10).push(pick_button).push(upload_button);

        let body: Element<Message> = if self.files.is_empty() {
            empty_state(
                "file-image",
                t!("upload.empty.title"),
                t!("upload.empty.subtitle"),
            )
        } else {
            let mut list = Column::new().spacing(8);
            for file in &self.files {
                list = list.push(self.entry_row(file));
            }
            Scrollable::new(list).height(Length::Fill).into()
        };

        let mut content = Column::new()
            .spacing(15)
            .push(header)
            .push(actions)
            .push(body);

        if !self.completed.is_empty() {
            let mut grid = Row::new().spacing(10);
            for file in &self.completed {
                grid = grid.push(media_card(
                    file,
                    None,
                    Message::OpenFile(file.file_url.clone()),
                ));
            }
            content = content
                .push(Text::new(t!("upload.completed.title")).size(18))
                .push(Scrollable::new(grid.wrap()).height(Length::Shrink));
        }

        Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(15)
            .into()
    }

    fn entry_row<'a>(&self, file: &'a PendingFile) -> Element<'a, Message> {
        let status: Element<Message> = match &file.status {
            UploadStatus::Idle => Text::new(t!("upload.status.idle"))
                .size(13)
                .style(Modern::secondary_text())
                .into(),
            UploadStatus::Uploading => Text::new(t!("upload.status.uploading"))
                .size(13)
                .style(Modern::primary_text())
                .into(),
            UploadStatus::Done => Row::new()
                .spacing(6)
                .align_y(Alignment::Center)
                .push(fa_icon_solid("circle-check").size(14.0))
                .push(Text::new(t!("upload.status.done")).size(13))
                .into(),
            UploadStatus::Failed(reason) => Text::new(format!(
                "{}: {}",
                t!("upload.status.failed"),
                reason
            ))
            .size(13)
            .style(Modern::secondary_text())
            .into(),
        };

        let mut row = Row::new()
            .spacing(10)
            .align_y(Alignment::Center)
            .push(
                Text::new(file.file_name.as_str())
                    .size(14)
                    .width(Length::FillPortion(5)),
            )
            .push(
                Text::new(file.mime)
                    .size(13)
                    .style(Modern::secondary_text())
                    .width(Length::FillPortion(2)),
            )
            .push(Container::new(status).width(Length::FillPortion(3)));

        if file.status == UploadStatus::Idle {
            row = row.push(
                Button::new(fa_icon_solid("trash").size(14.0))
                    .style(Modern::danger_button())
                    .padding(6)
                    .on_press(Message::RemoveFile(file.id)),
            );
        }

        Container::new(row)
            .padding(10)
            .width(Length::Fill)
            .style(Modern::sheet_container())
            .into()
    }
}
