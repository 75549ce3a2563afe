use iced::widget::{
    button, column, container, horizontal_rule, horizontal_space, radio, row, scrollable, text,
    text_input, Column,
};
use iced::{Alignment, Element, Length};

use crate::state::cart::{Cart, MAX_QUANTITY};
use crate::state::data::{rupees, CartItem, PaymentMethod};
use crate::state::order::OrderForm;
use crate::{Message, Page};

pub fn view<'a>(cart: &'a Cart, form: &'a OrderForm) -> Element<'a, Message> {
    if cart.is_empty() {
        return empty_view();
    }

    let lines = cart
        .items()
        .iter()
        .fold(Column::new().spacing(12), |list, item| list.push(line(item)));

    let cart_column = column![
        row![
            text("Cart Items").size(24),
            horizontal_space(),
            button("Clear All")
                .on_press(Message::ClearCart)
                .style(button::danger),
        ]
        .align_y(Alignment::Center),
        lines,
        container(
            row![
                text("Total:").size(18),
                horizontal_space(),
                text(rupees(cart.total())).size(24),
            ]
            .align_y(Alignment::Center)
        )
        .padding(16)
        .style(container::rounded_box),
    ]
    .spacing(16)
    .width(Length::FillPortion(1));

    let content = column![
        text("Your Order").size(40),
        text("Review your items and enter your details to complete your order"),
        row![cart_column, form_column(cart, form)].spacing(32),
    ]
    .spacing(20)
    .padding(32)
    .align_x(Alignment::Center);

    scrollable(content).into()
}

fn empty_view() -> Element<'static, Message> {
    let content = column![
        text("Your Cart is Empty").size(32),
        text("Add some delicious items from our menu to get started!"),
        row![
            button("Browse Menu")
                .on_press(Message::Navigate(Page::Menu))
                .padding(12),
            button("Repeat Last Order")
                .on_press(Message::RepeatLastOrder)
                .style(button::secondary)
                .padding(12),
        ]
        .spacing(16),
    ]
    .spacing(20)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(40)
        .center_x(Length::Fill)
        .into()
}

fn line(item: &CartItem) -> Element<'_, Message> {
    let quantity = i64::from(item.quantity);

    container(
        row![
            column![
                text(&item.name).size(16),
                text(format!("{} each", rupees(item.price)))
                    .size(13)
                    .style(text::secondary),
            ]
            .width(Length::Fill),
            button("-")
                .on_press(Message::SetQuantity(item.id.clone(), quantity - 1))
                .style(button::secondary),
            text(item.quantity).size(16),
            button("+")
                .on_press_maybe(
                    (item.quantity < MAX_QUANTITY)
                        .then(|| Message::SetQuantity(item.id.clone(), quantity + 1))
                )
                .style(button::secondary),
            text(rupees(item.line_total())).size(16).width(80),
            button("Remove")
                .on_press(Message::RemoveFromCart(item.id.clone()))
                .style(button::text),
        ]
        .spacing(10)
        .align_y(Alignment::Center),
    )
    .padding(12)
    .style(container::rounded_box)
    .into()
}

fn form_column<'a>(cart: &'a Cart, form: &'a OrderForm) -> Element<'a, Message> {
    let payment = |label: &'static str, method: PaymentMethod| {
        radio(label, method, Some(form.payment), Message::PaymentSelected)
    };

    let tip = form.tip_amount().unwrap_or(0);

    let details = container(
        column![
            text("Full Name"),
            text_input("Enter your full name", &form.name).on_input(Message::NameChanged),
            text("Room Number"),
            text_input("e.g., Block A, Room 204", &form.room_number)
                .on_input(Message::RoomChanged),
            text("Tip (optional)"),
            text_input("0", &form.tip).on_input(Message::TipChanged),
            text("Payment"),
            payment("Pay now", PaymentMethod::PayNow),
            payment("Pay on delivery", PaymentMethod::PayOnDelivery),
        ]
        .spacing(8),
    )
    .padding(16)
    .style(container::rounded_box);

    let summary_row = |label: String, value: String| {
        row![text(label), horizontal_space(), text(value)]
    };

    let summary = container(
        column![
            text("Order Summary").size(18),
            summary_row(
                format!("Items ({}):", cart.item_count()),
                rupees(cart.total())
            ),
            summary_row("Tip:".to_string(), rupees(tip)),
            summary_row("Delivery Fee:".to_string(), "Free".to_string()),
            horizontal_rule(1),
            summary_row("Total:".to_string(), rupees(form.grand_total(cart))),
            button(text("Place Order").width(Length::Fill).center())
                .on_press(Message::PlaceOrder)
                .width(Length::Fill)
                .padding(12),
            button(text("Repeat Last Order").width(Length::Fill).center())
                .on_press(Message::RepeatLastOrder)
                .style(button::secondary)
                .width(Length::Fill)
                .padding(8),
            text("Expected delivery time: 25-30 minutes")
                .size(12)
                .style(text::secondary),
        ]
        .spacing(10),
    )
    .padding(16)
    .style(container::rounded_box);

    column![text("Delivery Details").size(24), details, summary]
        .spacing(16)
        .width(Length::FillPortion(1))
        .into()
}
