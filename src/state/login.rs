/// Phone / OTP sign-in flow
///
/// Two steps: the user types a phone number, we ask the service to send
/// a code, then the user types the six digits and we ask the service to
/// verify them. This struct only holds the state; the network calls are
/// made by the application with the values it hands out.

use crate::otp::client::{clean_digits, CODE_DIGITS, PHONE_DIGITS};
use crate::otp::OtpError;

/// Ticks to wait before a code can be resent
pub const RESEND_COUNTDOWN: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    PhoneEntry,
    CodeEntry,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginFlow {
    step: Step,
    phone: String,
    digits: [Option<char>; CODE_DIGITS],
    /// Index of the code field that should hold keyboard focus
    focus: usize,
    countdown: u32,
    /// A send or verify request is in flight
    loading: bool,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self {
            step: Step::PhoneEntry,
            phone: String::new(),
            digits: [None; CODE_DIGITS],
            focus: 0,
            countdown: 0,
            loading: false,
        }
    }
}

impl LoginFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Text of one code field
    pub fn digit(&self, index: usize) -> String {
        self.digits
            .get(index)
            .copied()
            .flatten()
            .map(String::from)
            .unwrap_or_default()
    }

    /// The code typed so far, digits only
    pub fn code(&self) -> String {
        self.digits.iter().flatten().collect()
    }

    pub fn is_code_complete(&self) -> bool {
        self.digits.iter().all(Option::is_some)
    }

    /// Update the phone field, keeping at most ten digits
    pub fn set_phone(&mut self, input: &str) {
        self.phone = clean_digits(input).chars().take(PHONE_DIGITS).collect();
    }

    pub fn can_send(&self) -> bool {
        self.step == Step::PhoneEntry && self.phone.len() == PHONE_DIGITS && !self.loading
    }

    pub fn can_resend(&self) -> bool {
        self.step == Step::CodeEntry && self.countdown == 0 && !self.loading
    }

    pub fn can_verify(&self) -> bool {
        self.step == Step::CodeEntry && self.is_code_complete() && !self.loading
    }

    /// Start a send request, returns the phone number to send to
    pub fn start_send(&mut self) -> Option<String> {
        if !self.can_send() {
            return None;
        }
        self.loading = true;
        Some(self.phone.clone())
    }

    /// Start a resend request once the countdown has run out
    pub fn start_resend(&mut self) -> Option<String> {
        if !self.can_resend() {
            return None;
        }
        self.loading = true;
        Some(self.phone.clone())
    }

    /// Apply the outcome of a send or resend
    pub fn finish_send(&mut self, result: Result<(), OtpError>) -> Result<(), OtpError> {
        self.loading = false;
        result?;

        self.step = Step::CodeEntry;
        self.countdown = RESEND_COUNTDOWN;
        self.clear_code();
        Ok(())
    }

    /// Start a verify request, returns the phone number and code
    pub fn start_verify(&mut self) -> Option<(String, String)> {
        if !self.can_verify() {
            return None;
        }
        self.loading = true;
        Some((self.phone.clone(), self.code()))
    }

    /// Apply the outcome of a verify
    /// Success resets the flow; failure clears the code and stays put.
    pub fn finish_verify(&mut self, result: Result<(), OtpError>) -> Result<(), OtpError> {
        self.loading = false;

        match result {
            Ok(()) => {
                *self = Self::default();
                Ok(())
            }
            Err(e) => {
                self.clear_code();
                Err(e)
            }
        }
    }

    /// Go back to phone entry
    pub fn back(&mut self) {
        self.step = Step::PhoneEntry;
        self.countdown = 0;
        self.clear_code();
    }

    /// One second passed
    pub fn tick(&mut self) {
        self.countdown = self.countdown.saturating_sub(1);
    }

    /// The countdown needs a timer running
    pub fn is_counting_down(&self) -> bool {
        self.step == Step::CodeEntry && self.countdown > 0
    }

    /// New text for code field `index`, returns the field to focus next
    ///
    /// A single digit fills the field and moves on. Several digits (a
    /// paste) fill forward from `index`. An empty value clears the field,
    /// or moves back one field when it was already empty (backspace on an
    /// empty field). Anything without digits is ignored.
    pub fn input_digit(&mut self, index: usize, value: &str) -> usize {
        if index >= CODE_DIGITS {
            return self.focus;
        }
        self.focus = index;

        if value.is_empty() {
            if self.digits[index].take().is_none() && index > 0 {
                self.focus = index - 1;
            }
            return self.focus;
        }

        let mut typed: Vec<char> = clean_digits(value).chars().collect();
        if typed.is_empty() {
            return self.focus;
        }

        // Typing into a filled field appends after the old digit
        if let Some(old) = self.digits[index] {
            if typed.len() > 1 && typed[0] == old {
                typed.remove(0);
            }
        }

        let mut last = index;
        for (slot, digit) in (index..CODE_DIGITS).zip(typed) {
            self.digits[slot] = Some(digit);
            last = slot;
        }

        self.focus = (last + 1).min(CODE_DIGITS - 1);
        self.focus
    }

    fn clear_code(&mut self) {
        self.digits = [None; CODE_DIGITS];
        self.focus = 0;
    }
}
