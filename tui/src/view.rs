use crate::app::AppState;
use crate::services::constant_form_popup::render_constant_form;
use crate::services::toast::render_toast;
use ratatui::Frame;

pub fn view(f: &mut Frame, state: &AppState) {
    render_constant_form(f, state);

    if let Some(toast) = &state.toast {
        render_toast(f, toast, &state.palette);
    }
}
