use iced::widget::{button, checkbox, column, container, horizontal_space, row, scrollable, text, Row};
use iced::{Alignment, Element, Length, Theme};
use iced_aw::Wrap;

use crate::state::cart::{Cart, MAX_QUANTITY};
use crate::state::catalog::{MenuFilter, MENU};
use crate::state::data::{rupees, Category, MenuItem};
use crate::Message;

const CARD_WIDTH: f32 = 280.0;

type ButtonStyle = fn(&Theme, button::Status) -> button::Style;

/// Menu page: category bar, dietary toggle and the item grid
pub fn view<'a>(filter: &MenuFilter, cart: &'a Cart) -> Element<'a, Message> {
    let categories = Category::ALL.iter().fold(Row::new().spacing(8), |bar, &category| {
        let style: ButtonStyle = if filter.category == category {
            button::primary
        } else {
            button::secondary
        };
        bar.push(
            button(text(category.to_string()))
                .on_press(Message::SelectCategory(category))
                .style(style)
                .padding([6, 16]),
        )
    });

    // Cakes get an eggless toggle, everything else a vegetarian one
    let toggle = if filter.category.is_cake() {
        checkbox("Eggless only", filter.eggless_only).on_toggle(Message::ToggleEggless)
    } else {
        checkbox("Vegetarian only", filter.vegetarian_only).on_toggle(Message::ToggleVegetarian)
    };

    let items = filter.apply(MENU);

    let grid: Element<'a, Message> = if items.is_empty() {
        text("No items found in this category.").into()
    } else {
        let cards = items
            .into_iter()
            .map(|item| card(item, cart.quantity_of(item.id)))
            .collect();

        Wrap::with_elements(cards)
            .spacing(16.0)
            .line_spacing(16.0)
            .into()
    };

    let content = column![
        text("Our Menu").size(40),
        text("Fresh, delicious meals prepared daily for students").size(16),
        categories,
        toggle,
        grid,
    ]
    .spacing(20)
    .padding(32)
    .align_x(Alignment::Center);

    scrollable(container(content).width(Length::Fill).center_x(Length::Fill)).into()
}

/// Dietary label shown under the price
fn dietary_label(item: &MenuItem) -> Option<&'static str> {
    match (item.vegetarian, item.eggless) {
        (_, Some(true)) => Some("Eggless"),
        (_, Some(false)) => Some("Contains egg"),
        (Some(true), None) => Some("Veg"),
        (Some(false), None) => Some("Non-veg"),
        (None, None) => None,
    }
}

fn card<'a>(item: &'static MenuItem, quantity: u32) -> Element<'a, Message> {
    let controls: Element<'a, Message> = if quantity > 0 {
        row![
            button("-")
                .on_press(Message::SetQuantity(item.id.to_string(), i64::from(quantity) - 1))
                .style(button::secondary),
            text(quantity).size(18),
            button("+")
                .on_press_maybe((quantity < MAX_QUANTITY).then(|| {
                    Message::SetQuantity(item.id.to_string(), i64::from(quantity) + 1)
                }))
                .style(button::secondary),
        ]
        .spacing(12)
        .align_y(Alignment::Center)
        .into()
    } else {
        button("Add to Cart")
            .on_press(Message::AddToCart(item.id))
            .padding([6, 16])
            .into()
    };

    let details = row![
        text(rupees(item.price)).size(22),
        horizontal_space(),
        text(dietary_label(item).unwrap_or_default()).size(12).style(text::secondary),
        text(item.category.to_string()).size(12),
    ]
    .spacing(8)
    .align_y(Alignment::Center);

    container(
        column![
            text(item.name).size(18),
            text(item.description).size(13).style(text::secondary),
            details,
            controls,
        ]
        .spacing(12),
    )
    .width(CARD_WIDTH)
    .padding(16)
    .style(container::rounded_box)
    .into()
}
