use crate::components::chip_list::{self, ChipList};
use crate::models::query::{OperationKind, TagOperation};
use crate::services::api_client::ApiClient;
use crate::services::tag_service;
use crate::services::toast_service::{push_error, push_success};
use iced::widget::{Button, Column, Container, Row, Scrollable, Text};
use iced::{Alignment, Element, Length, Task};
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

/// The batch operations this screen can dispatch. Add and Remove are tag
/// mutations; Delete removes the files themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationChoice {
    AddTags,
    RemoveTags,
    DeleteFiles,
}

#[derive(Debug, Clone)]
pub enum Message {
    OperationSelected(OperationChoice),
    Urls(chip_list::Message),
    Tags(chip_list::Message),
    Submit,
    Completed(OperationChoice, Result<(), String>),
    NoOps,
}

pub struct ManageTags {
    api: Arc<ApiClient>,
    operation: OperationChoice,
    urls: ChipList,
    tags: ChipList,
    processing: bool,
}

impl ManageTags {
    pub fn new(api: Arc<ApiClient>) -> (Self, Task<Message>) {
        (
            Self {
                api,
                operation: OperationChoice::AddTags,
                urls: ChipList::new(t!("manage_tags.input.url")),
                tags: ChipList::new(t!("manage_tags.input.tag")),
                processing: false,
            },
            Task::none(),
        )
    }

    pub fn update(&mut self, message: Message) -> Action {
        match message {
            Message::OperationSelected(choice) => {
                self.operation = choice;
                Action::None
            }
            Message::Urls(message) => {
                self.urls.update(message);
                Action::None
            }
            Message::Tags(message) => {
                self.tags.update(message);
                Action::None
            }
            Message::Submit => {
                if self.processing {
                    return Action::None;
                }
                if self.urls.items.is_empty() {
                    return Action::ShowToast(t!("message.manage_tags.need_urls").to_string());
                }
                if self.operation != OperationChoice::DeleteFiles && self.tags.items.is_empty() {
                    return Action::ShowToast(t!("message.manage_tags.need_tags").to_string());
                }

                self.processing = true;
                let api = self.api.clone();
                let operation = self.operation;
                let urls = self.urls.items.clone();
                let tags = self.tags.items.clone();

                Action::Run(Task::perform(
                    async move {
                        let result = match operation {
                            OperationChoice::AddTags | OperationChoice::RemoveTags => {
                                let kind = if operation == OperationChoice::AddTags {
                                    OperationKind::Add
                                } else {
                                    OperationKind::Remove
                                };
                                tag_service::modify_tags(&api, &TagOperation { urls, tags, kind })
                                    .await
                            }
                            OperationChoice::DeleteFiles => {
                                tag_service::delete_files(&api, &urls).await
                            }
                        };
                        result.map(|_| ()).map_err(|err| err.to_string())
                    },
                    move |result| Message::Completed(operation, result),
                ))
            }
            Message::Completed(operation, result) => {
                self.processing = false;
                match result {
                    Ok(()) => {
                        let key = match operation {
                            OperationChoice::AddTags => "message.manage_tags.add.success",
                            OperationChoice::RemoveTags => "message.manage_tags.remove.success",
                            OperationChoice::DeleteFiles => "message.manage_tags.delete.success",
                        };
                        push_success(t!(key));
                        self.urls.clear();
                        self.tags.clear();
                    }
                    Err(err) => {
                        error!("batch operation failed: {}", err);
                        push_error(failure_message(&err));
                    }
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
                .push(Text::new(t!("manage_tags.title")).size(24))
                .push(
                    Text::new(t!("manage_tags.subtitle"))
                        .size(14)
                        .style(Modern::secondary_text()),
                ),
        )
        .padding(15)
        .width(Length::Fill)
        .style(Modern::card_container());

        let operations = Row::new()
            .spacing(10)
            .push(self.operation_button(
                OperationChoice::AddTags,
                "plus",
                t!("manage_tags.operation.add"),
            ))
            .push(self.operation_button(
                OperationChoice::RemoveTags,
                "minus",
                t!("manage_tags.operation.remove"),
            ))
            .push(self.operation_button(
                OperationChoice::DeleteFiles,
                "trash",
                t!("manage_tags.operation.delete"),
            ));

        let mut form = Column::new()
            .spacing(12)
            .push(operations)
            .push(Text::new(t!("manage_tags.step.urls")).size(16))
            .push(
                Text::new(t!("manage_tags.hint.urls"))
                    .size(13)
                    .style(Modern::secondary_text()),
            )
            .push(self.urls.view().map(Message::Urls));

        if self.operation != OperationChoice::DeleteFiles {
            form = form
                .push(Text::new(t!("manage_tags.step.tags")).size(16))
                .push(
                    Text::new(t!("manage_tags.hint.tags"))
                        .size(13)
                        .style(Modern::secondary_text()),
                )
                .push(self.tags.view().map(Message::Tags));
        }

        let submit_label = if self.processing {
            t!("manage_tags.processing")
        } else {
            match self.operation {
                OperationChoice::AddTags => t!("manage_tags.button.submit_add"),
                OperationChoice::RemoveTags => t!("manage_tags.button.submit_remove"),
                OperationChoice::DeleteFiles => t!("manage_tags.button.submit_delete"),
            }
        };

        let base = Button::new(Text::new(submit_label)).padding(10);
        let mut submit = if self.operation == OperationChoice::DeleteFiles {
            base.style(Modern::danger_button())
        } else {
            base.style(Modern::success_button())
        };
        if !self.processing {
            submit = submit.on_press(Message::Submit);
        }
        form = form.push(submit);

        let content = Column::new().spacing(15).push(header).push(
            Container::new(form)
                .padding(15)
                .width(Length::Fill)
                .style(Modern::card_container()),
        );

        Container::new(Scrollable::new(content).height(Length::Fill))
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(15)
            .into()
    }

    fn operation_button<'a>(
        &self,
        choice: OperationChoice,
        glyph: &str,
        label: impl Into<String>,
    ) -> Element<'a, Message> {
        let base = Button::new(
            Row::new()
                .spacing(8)
                .align_y(Alignment::Center)
                .push(fa_icon_solid(glyph).size(14.0))
                .push(Text::new(label.into())),
        )
        .padding(10)
        .on_press(Message::OperationSelected(choice));

        let styled = if self.operation != choice {
            base.style(Modern::secondary_button())
        } else if choice == OperationChoice::DeleteFiles {
            base.style(Modern::danger_button())
        } else {
            base.style(Modern::primary_button())
        };

        styled.into()
    }
}

/// Failure banner text: the localized headline with the error detail
/// appended so the user can tell a timeout from a rejection.
fn failure_message(detail: &str) -> String {
    format!("{}: {}", t!("message.manage_tags.error"), detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_keeps_the_detail() {
        let message = failure_message("http://proxy/modify-tags returned 504: gateway timeout");
        assert!(message.ends_with("gateway timeout"));
        // the headline comes from the locale bundle, not the raw error
        assert_ne!(message, "http://proxy/modify-tags returned 504: gateway timeout");
    }
}
