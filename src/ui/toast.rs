use iced::widget::{button, column, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length};

use crate::state::data::{Toast, ToastKind};
use crate::Message;

pub fn view(toast: &Toast) -> Element<'_, Message> {
    let title = match toast.kind {
        ToastKind::Success => text(&toast.title).size(16).style(text::success),
        ToastKind::Destructive => text(&toast.title).size(16).style(text::danger),
    };

    let content = row![
        column![title, text(&toast.body).size(14)].spacing(4),
        horizontal_space(),
        button("Dismiss")
            .on_press(Message::DismissToast)
            .style(button::text),
    ]
    .spacing(12)
    .align_y(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(12)
        .style(container::rounded_box)
        .into()
}
