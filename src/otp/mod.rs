/// OTP service client
///
/// This module handles:
/// - Cleaning and validating phone numbers and codes
/// - Sending and verifying one-time codes over HTTP
/// - Turning transport and server failures into typed errors

pub mod client;
pub mod error;

pub use client::OtpClient;
pub use error::OtpError;
