use iced::widget::{button, container, horizontal_space, row, text};
use iced::{Alignment, Element, Length, Theme};

use crate::{Message, Page};

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Top navigation bar with the cart badge
pub fn view(current: Page, cart_count: u32) -> Element<'static, Message> {
    let link = |label: String, page: Page| {
        let style: ButtonStyle = if current == page {
            button::primary
        } else {
            button::text
        };

        button(text(label))
            .on_press(Message::Navigate(page))
            .style(style)
            .padding([6, 12])
    };

    let order_label = if cart_count > 0 {
        format!("Order ({})", cart_count)
    } else {
        "Order".to_string()
    };

    let nav = row![
        text("FoodieExpress").size(24),
        horizontal_space(),
        link("Home".to_string(), Page::Home),
        link("Menu".to_string(), Page::Menu),
        link(order_label, Page::Order),
        link("Admin Panel".to_string(), Page::Admin),
        link("Sign In".to_string(), Page::Login),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(nav)
        .width(Length::Fill)
        .padding([12, 24])
        .style(container::rounded_box)
        .into()
}
