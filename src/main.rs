use iced::widget::{column, container, scrollable, text_input, Column};
use iced::{time, Element, Length, Subscription, Task, Theme};
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

mod config;
mod otp;
mod state;
mod ui;

use config::Config;
use otp::{OtpClient, OtpError};
use state::cart::Cart;
use state::catalog::{self, MenuFilter};
use state::data::{rupees, Category, PaymentMethod, Toast};
use state::library::OrderStore;
use state::login::{LoginFlow, Step};
use state::order::{self as checkout, OrderForm};

/// Pages reachable from the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Menu,
    Order,
    Login,
    Admin,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Page),

    // Menu
    SelectCategory(Category),
    ToggleVegetarian(bool),
    ToggleEggless(bool),

    // Cart
    AddToCart(&'static str),
    SetQuantity(String, i64),
    RemoveFromCart(String),
    ClearCart,

    // Checkout
    NameChanged(String),
    RoomChanged(String),
    TipChanged(String),
    PaymentSelected(PaymentMethod),
    PlaceOrder,
    RepeatLastOrder,

    // Sign in
    PhoneChanged(String),
    SendCode,
    ResendCode,
    CodeSent(Result<(), OtpError>),
    DigitChanged(usize, String),
    VerifyCode,
    CodeVerified(Result<(), OtpError>),
    BackToPhone,
    CheckServer,
    ServerChecked(Result<serde_json::Value, OtpError>),

    /// One second passed
    Tick,
    DismissToast,
}

/// Main application state
struct Storefront {
    page: Page,
    cart: Cart,
    filter: MenuFilter,
    form: OrderForm,
    login: LoginFlow,
    /// Local storage for the last order
    store: OrderStore,
    otp: OtpClient,
    toast: Option<Toast>,
}

impl Storefront {
    /// Create a new instance of the application
    fn new(store: OrderStore, otp: OtpClient) -> (Self, Task<Message>) {
        info!("FoodieExpress ready, OTP service at {}", otp.base_url());
        match store.path() {
            Some(path) => info!("Last order kept in {}", path.display()),
            None => warn!("Last order kept in memory only"),
        }

        (
            Storefront {
                page: Page::Home,
                cart: Cart::new(),
                filter: MenuFilter::default(),
                form: OrderForm::default(),
                login: LoginFlow::new(),
                store,
                otp,
                toast: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(page) => {
                self.page = page;
                if page == Page::Login {
                    let field = match self.login.step() {
                        Step::PhoneEntry => ui::login::phone_field_id(),
                        Step::CodeEntry => ui::login::code_field_id(self.login.focus()),
                    };
                    return text_input::focus(field);
                }
            }

            Message::SelectCategory(category) => self.filter.category = category,
            Message::ToggleVegetarian(on) => self.filter.vegetarian_only = on,
            Message::ToggleEggless(on) => self.filter.eggless_only = on,

            Message::AddToCart(id) => match catalog::find(id) {
                Some(item) => {
                    self.cart.add(item);
                    self.toast = Some(Toast::success(
                        "Added to cart",
                        format!("{} has been added to your order", item.name),
                    ));
                }
                None => warn!("Unknown menu item {id}"),
            },
            Message::SetQuantity(id, quantity) => self.cart.update_quantity(&id, quantity),
            Message::RemoveFromCart(id) => self.cart.remove(&id),
            Message::ClearCart => self.cart.clear(),

            Message::NameChanged(name) => self.form.name = name,
            Message::RoomChanged(room) => self.form.room_number = room,
            Message::TipChanged(tip) => self.form.tip = tip,
            Message::PaymentSelected(method) => self.form.payment = method,
            Message::PlaceOrder => {
                self.toast = Some(
                    match checkout::checkout(&mut self.form, &mut self.cart, &self.store) {
                        Ok(receipt) => {
                            info!(
                                "Saved order for {} ({})",
                                receipt.snapshot.name,
                                rupees(receipt.total)
                            );
                            Toast::success("Order Placed!", receipt.message)
                        }
                        Err(e) => {
                            warn!("Checkout failed: {e}");
                            Toast::error(e.title(), e.to_string())
                        }
                    },
                );
            }
            Message::RepeatLastOrder => {
                self.toast = Some(
                    match checkout::repeat_last_order(&mut self.form, &mut self.cart, &self.store) {
                        Ok(snapshot) => {
                            self.page = Page::Order;
                            let total = snapshot
                                .items
                                .iter()
                                .map(|i| i.line_total())
                                .fold(0, u32::saturating_add);
                            Toast::success(
                                "Last order added",
                                format!(
                                    "{} items worth {} are back in your cart",
                                    snapshot.items.len(),
                                    rupees(total)
                                ),
                            )
                        }
                        Err(e) => Toast::error(e.title(), e.to_string()),
                    },
                );
            }

            Message::PhoneChanged(phone) => self.login.set_phone(&phone),
            Message::SendCode => {
                if let Some(phone) = self.login.start_send() {
                    return self.send_code(phone);
                }
            }
            Message::ResendCode => {
                if let Some(phone) = self.login.start_resend() {
                    return self.send_code(phone);
                }
            }
            Message::CodeSent(result) => match self.login.finish_send(result) {
                Ok(()) => {
                    self.toast = Some(Toast::success(
                        "OTP Sent",
                        format!("A 6-digit code is on its way to {}", self.login.phone()),
                    ));
                    return text_input::focus(ui::login::code_field_id(0));
                }
                Err(e) => self.toast = Some(Toast::error(e.title(), e.to_string())),
            },
            Message::DigitChanged(index, value) => {
                let next = self.login.input_digit(index, &value);
                return text_input::focus(ui::login::code_field_id(next));
            }
            Message::VerifyCode => {
                if let Some((phone, code)) = self.login.start_verify() {
                    let otp = self.otp.clone();
                    return Task::perform(
                        async move { otp.verify_code(&phone, &code).await },
                        Message::CodeVerified,
                    );
                }
            }
            Message::CodeVerified(result) => match self.login.finish_verify(result) {
                Ok(()) => {
                    info!("Phone verified");
                    self.toast = Some(Toast::success(
                        "Login Successful!",
                        "Welcome back to FoodieExpress",
                    ));
                }
                Err(e) => {
                    self.toast = Some(Toast::error("Verification Failed", e.to_string()));
                    return text_input::focus(ui::login::code_field_id(0));
                }
            },
            Message::BackToPhone => {
                self.login.back();
                return text_input::focus(ui::login::phone_field_id());
            }
            Message::CheckServer => {
                let otp = self.otp.clone();
                return Task::perform(async move { otp.health().await }, Message::ServerChecked);
            }
            Message::ServerChecked(result) => {
                self.toast = Some(match result {
                    Ok(_) => Toast::success("Server Online", "The sign-in service is reachable"),
                    Err(e) => {
                        error!("Server connection test failed: {e}");
                        Toast::error(e.title(), e.to_string())
                    }
                });
            }

            Message::Tick => {
                self.login.tick();
                if let Some(toast) = &mut self.toast {
                    toast.ttl = toast.ttl.saturating_sub(1);
                }
                if self.toast.as_ref().is_some_and(|toast| toast.ttl == 0) {
                    self.toast = None;
                }
            }
            Message::DismissToast => self.toast = None,
        }

        Task::none()
    }

    fn send_code(&self, phone: String) -> Task<Message> {
        let otp = self.otp.clone();
        Task::perform(
            async move { otp.send_code(&phone).await },
            Message::CodeSent,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let page: Element<Message> = match self.page {
            Page::Home => ui::home::view(),
            Page::Menu => ui::menu::view(&self.filter, &self.cart),
            Page::Order => ui::order::view(&self.cart, &self.form),
            Page::Login => ui::login::view(&self.login),
            Page::Admin => scrollable(ui::admin::view()).into(),
        };

        let content: Column<Message> = column![ui::header::view(self.page, self.cart.item_count())]
            .push_maybe(self.toast.as_ref().map(ui::toast::view))
            .push(container(page).width(Length::Fill).height(Length::Fill))
            .spacing(12)
            .padding(12);

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// A resend countdown or a toast is waiting on the clock
    fn needs_clock(&self) -> bool {
        self.login.is_counting_down() || self.toast.is_some()
    }

    /// The clock only runs while something is counting down
    fn subscription(&self) -> Subscription<Message> {
        if self.needs_clock() {
            time::every(Duration::from_secs(1)).map(|_| Message::Tick)
        } else {
            Subscription::none()
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Light
    }
}

/// Open the order storage, falling back to memory so the shop still runs
fn open_store(config: &Config) -> OrderStore {
    let opened = match &config.db_path {
        Some(path) => OrderStore::open(path),
        None => OrderStore::new(),
    };

    match opened.or_else(|e| {
        warn!("Order storage unavailable ({e}), last order will not survive a restart");
        OrderStore::in_memory()
    }) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to initialize order storage: {e}");
            std::process::exit(1);
        }
    }
}

fn main() -> iced::Result {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();
    let store = open_store(&config);

    let otp = match OtpClient::new(&config.api_url, config.http_timeout) {
        Ok(otp) => otp,
        Err(e) => {
            error!("Failed to build HTTP client: {e}");
            std::process::exit(1);
        }
    };

    iced::application("FoodieExpress", Storefront::update, Storefront::view)
        .theme(Storefront::theme)
        .subscription(Storefront::subscription)
        .centered()
        .run_with(move || Storefront::new(store, otp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ToastKind;

    fn storefront() -> Storefront {
        let store = OrderStore::in_memory().unwrap();
        // Nothing listens here; tasks are never driven in these tests
        let otp = OtpClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        Storefront::new(store, otp).0
    }

    fn at_code_entry() -> Storefront {
        let mut app = storefront();
        let _ = app.update(Message::PhoneChanged("98765 43210".to_string()));
        let _ = app.update(Message::SendCode);
        assert!(app.login.is_loading());
        let _ = app.update(Message::CodeSent(Ok(())));
        app
    }

    #[test]
    fn test_toast_expires_after_its_lifetime() {
        let mut app = storefront();
        assert!(!app.needs_clock());

        let _ = app.update(Message::AddToCart("1"));
        assert_eq!(app.cart.quantity_of("1"), 1);
        assert_eq!(app.toast.as_ref().map(|t| t.ttl), Some(Toast::LIFETIME));
        assert!(app.needs_clock());

        for remaining in (1..Toast::LIFETIME).rev() {
            let _ = app.update(Message::Tick);
            assert_eq!(app.toast.as_ref().map(|t| t.ttl), Some(remaining));
        }
        let _ = app.update(Message::Tick);
        assert!(app.toast.is_none());
        assert!(!app.needs_clock());
    }

    #[test]
    fn test_dismiss_toast() {
        let mut app = storefront();
        let _ = app.update(Message::AddToCart("9"));
        let _ = app.update(Message::DismissToast);
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_clock_runs_during_resend_countdown() {
        let mut app = at_code_entry();
        assert_eq!(app.login.step(), Step::CodeEntry);
        let _ = app.update(Message::DismissToast);
        assert!(app.needs_clock());

        for _ in 0..state::login::RESEND_COUNTDOWN {
            let _ = app.update(Message::Tick);
        }
        assert_eq!(app.login.countdown(), 0);
        assert!(!app.needs_clock());
    }

    #[test]
    fn test_failed_verification_stays_on_code_entry() {
        let mut app = at_code_entry();
        let _ = app.update(Message::DigitChanged(0, "123456".to_string()));
        let _ = app.update(Message::VerifyCode);
        assert!(app.login.is_loading());

        let _ = app.update(Message::CodeVerified(Err(OtpError::Rejected {
            status: Some(400),
            message: "Invalid or expired OTP".to_string(),
        })));

        assert_eq!(app.login.step(), Step::CodeEntry);
        assert_eq!(app.login.code(), "");
        assert!(!app.login.is_loading());
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Destructive);
        assert_eq!(toast.title, "Verification Failed");
        assert_eq!(toast.body, "Invalid or expired OTP");
    }

    #[test]
    fn test_successful_verification_resets_login() {
        let mut app = at_code_entry();
        let _ = app.update(Message::DigitChanged(0, "123456".to_string()));
        let _ = app.update(Message::VerifyCode);
        let _ = app.update(Message::CodeVerified(Ok(())));

        assert_eq!(app.login, LoginFlow::new());
        assert_eq!(app.toast.as_ref().unwrap().title, "Login Successful!");
    }

    #[test]
    fn test_repeat_last_order_opens_order_page() {
        let mut app = storefront();
        let _ = app.update(Message::AddToCart("2"));
        let _ = app.update(Message::NameChanged("Asha".to_string()));
        let _ = app.update(Message::RoomChanged("B-204".to_string()));
        let _ = app.update(Message::PlaceOrder);
        assert_eq!(app.toast.as_ref().unwrap().title, "Order Placed!");
        assert!(app.cart.is_empty());

        let _ = app.update(Message::Navigate(Page::Menu));
        let _ = app.update(Message::RepeatLastOrder);

        assert_eq!(app.page, Page::Order);
        assert_eq!(app.cart.quantity_of("2"), 1);
        assert_eq!(app.form.name, "Asha");
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Success);
    }

    #[test]
    fn test_repeat_without_history_stays_put() {
        let mut app = storefront();
        let _ = app.update(Message::Navigate(Page::Menu));
        let _ = app.update(Message::RepeatLastOrder);

        assert_eq!(app.page, Page::Menu);
        let toast = app.toast.as_ref().unwrap();
        assert_eq!(toast.kind, ToastKind::Destructive);
        assert_eq!(toast.title, "Nothing to Repeat");
    }

    #[test]
    fn test_unknown_item_is_ignored() {
        let mut app = storefront();
        let _ = app.update(Message::AddToCart("999"));
        assert!(app.cart.is_empty());
        assert!(app.toast.is_none());
    }

    #[test]
    fn test_failed_checkout_keeps_cart() {
        let mut app = storefront();
        let _ = app.update(Message::AddToCart("5"));
        let _ = app.update(Message::TipChanged("4294967295".to_string()));
        let _ = app.update(Message::NameChanged("Asha".to_string()));
        let _ = app.update(Message::RoomChanged("B-204".to_string()));
        let _ = app.update(Message::PlaceOrder);

        assert_eq!(app.cart.quantity_of("5"), 1);
        assert_eq!(app.toast.as_ref().unwrap().kind, ToastKind::Destructive);
        assert!(app.store.load_last_order().unwrap().is_none());
    }
}
