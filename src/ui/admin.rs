use iced::widget::{column, container, text};
use iced::{Element, Length};

use crate::Message;

/// Placeholder until the admin tools exist
pub fn view() -> Element<'static, Message> {
    let card = |title: &'static str, body: &'static str| {
        container(column![text(title).size(20), text(body)].spacing(8))
            .width(Length::Fill)
            .padding(16)
            .style(container::rounded_box)
    };

    column![
        text("Admin Panel").size(32),
        card(
            "User Management",
            "View, add, or remove users. (Feature coming soon)"
        ),
        card(
            "Order Management",
            "View and manage orders. (Feature coming soon)"
        ),
        card("Menu Management", "Edit menu items. (Feature coming soon)"),
    ]
    .spacing(16)
    .padding(32)
    .into()
}
