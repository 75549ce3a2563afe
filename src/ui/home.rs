use iced::widget::{button, column, container, row, scrollable, text};
use iced::{Alignment, Element, Length};

use crate::{Message, Page};

pub fn view() -> Element<'static, Message> {
    let badge = |label: &'static str| {
        container(text(label).size(14))
            .padding([4, 12])
            .style(container::rounded_box)
    };

    let content = column![
        text("Delicious Food").size(48),
        text("Delivered Fast").size(36),
        text(
            "Order fresh, tasty meals directly to your dorm room or any campus location. \
             Quick, easy, and perfect for busy students."
        )
        .size(18),
        row![
            badge("Free Delivery"),
            badge("Student Discount"),
            badge("Fresh Ingredients"),
        ]
        .spacing(12),
        row![
            button("Start Ordering")
                .on_press(Message::Navigate(Page::Menu))
                .padding(12),
            button("View Cart")
                .on_press(Message::Navigate(Page::Order))
                .style(button::secondary)
                .padding(12),
        ]
        .spacing(16),
    ]
    .spacing(20)
    .max_width(720)
    .align_x(Alignment::Center);

    let feature = |title: &'static str, body: &'static str| {
        container(column![text(title).size(20), text(body).size(14)].spacing(8))
            .width(Length::Fill)
            .padding(16)
            .style(container::rounded_box)
    };

    let features = column![
        text("Why Choose FoodieExpress?").size(32),
        text(
            "We make ordering food simple, fast, and convenient for students. Whether you're \
             in your dorm, at the library, or between classes, we bring delicious meals to you."
        ),
        row![
            feature(
                "Fast Delivery",
                "Quick delivery straight to your dorm room within 30 minutes."
            ),
            feature(
                "Fresh & Tasty",
                "All meals are prepared fresh daily using high-quality ingredients."
            ),
            feature(
                "Dorm Delivery",
                "Delivery to your dorm, the library, or any campus location."
            ),
            feature(
                "Affordable Prices",
                "Student discounts and meal combos keep eating on campus affordable."
            ),
        ]
        .spacing(16),
    ]
    .spacing(16)
    .max_width(1080)
    .align_x(Alignment::Center);

    scrollable(
        container(column![content, features].spacing(48).align_x(Alignment::Center))
            .width(Length::Fill)
            .padding(40)
            .center_x(Length::Fill),
    )
    .into()
}
