/// Page views
///
/// Each page is a plain function from borrowed state to an `Element`.
/// All interaction goes back through `crate::Message`.

pub mod admin;
pub mod header;
pub mod home;
pub mod login;
pub mod menu;
pub mod order;
pub mod toast;
