use iced::widget::{button, column, container, row, text, text_input, Row};
use iced::{Alignment, Element, Length};

use crate::otp::client::CODE_DIGITS;
use crate::state::login::{LoginFlow, Step};
use crate::Message;

/// Widget id of code field `index`, used to move keyboard focus
pub fn code_field_id(index: usize) -> text_input::Id {
    text_input::Id::new(format!("otp-digit-{index}"))
}

pub fn phone_field_id() -> text_input::Id {
    text_input::Id::new("otp-phone")
}

pub fn view(flow: &LoginFlow) -> Element<'_, Message> {
    let body = match flow.step() {
        Step::PhoneEntry => phone_step(flow),
        Step::CodeEntry => code_step(flow),
    };

    let content = column![
        text("Welcome Back").size(36),
        text("Sign in to continue your food journey").style(text::secondary),
        container(body)
            .width(Length::Fill)
            .padding(24)
            .style(container::rounded_box),
    ]
    .spacing(16)
    .max_width(440)
    .align_x(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .padding(40)
        .center_x(Length::Fill)
        .into()
}

fn phone_step(flow: &LoginFlow) -> Element<'_, Message> {
    let label = if flow.is_loading() {
        "Sending code..."
    } else {
        "Continue with Phone"
    };

    let mut step = column![
        text("Sign In").size(24),
        text("Enter your phone number to get started").style(text::secondary),
        text_input("Enter your phone number", flow.phone())
            .id(phone_field_id())
            .on_input(Message::PhoneChanged)
            .on_submit(Message::SendCode)
            .padding(10),
    ]
    .spacing(12);

    if !flow.phone().is_empty() {
        step = step.push(
            text("We'll send you a verification code")
                .size(12)
                .style(text::secondary),
        );
    }

    step.push(
        button(text(label).width(Length::Fill).center())
            .on_press_maybe(flow.can_send().then_some(Message::SendCode))
            .width(Length::Fill)
            .padding(12),
    )
    .push(
        button("Check server connection")
            .on_press(Message::CheckServer)
            .style(button::text),
    )
    .into()
}

fn code_step(flow: &LoginFlow) -> Element<'_, Message> {
    let fields = (0..CODE_DIGITS).fold(Row::new().spacing(8), |fields, index| {
        fields.push(
            text_input("", &flow.digit(index))
                .id(code_field_id(index))
                .on_input(move |value| Message::DigitChanged(index, value))
                .on_submit(Message::VerifyCode)
                .width(44)
                .size(24)
                .padding(8),
        )
    });

    let verify_label = if flow.is_loading() {
        "Verifying..."
    } else {
        "Verify"
    };

    let resend: Element<'_, Message> = if flow.countdown() > 0 {
        text(format!("Resend code in {}s", flow.countdown()))
            .size(13)
            .style(text::secondary)
            .into()
    } else {
        button("Resend code")
            .on_press_maybe(flow.can_resend().then_some(Message::ResendCode))
            .style(button::text)
            .into()
    };

    column![
        text("Enter Verification Code").size(24),
        text(format!("We sent a 6-digit code to {}", flow.phone())).style(text::secondary),
        fields,
        button(text(verify_label).width(Length::Fill).center())
            .on_press_maybe(flow.can_verify().then_some(Message::VerifyCode))
            .width(Length::Fill)
            .padding(12),
        row![
            button("Back")
                .on_press(Message::BackToPhone)
                .style(button::secondary),
            resend,
        ]
        .spacing(16)
        .align_y(Alignment::Center),
    ]
    .spacing(12)
    .into()
}
