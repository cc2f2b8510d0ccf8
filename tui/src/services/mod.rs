pub mod constant_form_popup;
pub mod detect_term;
pub mod handlers;
pub mod toast;
