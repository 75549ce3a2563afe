/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The static menu and its filters (catalog.rs)
/// - The shopping cart (cart.rs)
/// - Local storage for the last order (library.rs)
/// - Checkout and repeat-last-order (order.rs)
/// - The phone / OTP sign-in flow (login.rs)

pub mod cart;
pub mod catalog;
pub mod data;
pub mod library;
pub mod login;
pub mod order;
