//! State holder of the create/update constant form.
//!
//! The form owns the draft fields, the per-field error slots and the value
//! masking state. Every user change goes through [`ConstantForm::on_field_change`],
//! which validates first and then stores the raw input, so invalid input stays
//! visible next to its error instead of being rejected.

use tracing::debug;

use crate::masking::{ValueBox, Visibility, displayed_value};
use crate::models::{Constant, Environment, EnvironmentOption, FormMode};
use crate::validation::{ErrorState, NameLookup, validate_name, validate_value};

pub const LOCKED_NAME_HINT: &str = "Cannot edit constant name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Value,
}

#[derive(Debug, Clone)]
pub struct ConstantForm {
    mode: FormMode,
    environment: Environment,
    selected: Option<Constant>,
    name: String,
    value: String,
    environments: Vec<EnvironmentOption>,
    errors: ErrorState,
    visibility: Visibility,
    value_box: ValueBox,
}

impl ConstantForm {
    /// Seed the draft from `selected` (edit) or empty fields (create). The
    /// draft is pinned to `environment`; nothing is validated yet.
    pub fn new(selected: Option<Constant>, environment: Environment, mode: FormMode) -> Self {
        let (name, value) = selected
            .as_ref()
            .map(|constant| (constant.name.clone(), constant.expose_value().to_string()))
            .unwrap_or_default();
        let value_box = ValueBox::initial(selected.as_ref().map(Constant::expose_value));
        let environments = vec![environment.as_option()];

        Self {
            mode,
            environment,
            selected,
            name,
            value,
            environments,
            errors: ErrorState::default(),
            visibility: Visibility::Hidden,
            value_box,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn errors(&self) -> &ErrorState {
        &self.errors
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn value_box(&self) -> ValueBox {
        self.value_box
    }

    /// The name cannot change once an existing constant is being edited.
    pub fn is_name_locked(&self) -> bool {
        self.selected.is_some()
    }

    pub fn is_value_read_only(&self) -> bool {
        !self.visibility.is_revealed()
    }

    /// Stored value the "unchanged" check compares against.
    fn original_value(&self) -> Option<&str> {
        if self.mode.is_edit() {
            self.selected.as_ref().map(Constant::expose_value)
        } else {
            None
        }
    }

    /// Validate `raw` for `field`, then store it. Returns `false` when the
    /// change was ignored because the field is not editable.
    pub fn on_field_change(
        &mut self,
        field: FormField,
        raw: impl Into<String>,
        lookup: &dyn NameLookup,
    ) -> bool {
        let raw = raw.into();
        match field {
            FormField::Name => {
                if self.is_name_locked() {
                    debug!("Ignoring change to locked constant name");
                    return false;
                }
                self.errors.name = validate_name(&raw, &self.environment, lookup);
                self.name = raw;
            }
            FormField::Value => {
                if self.is_value_read_only() {
                    debug!("Ignoring change to masked constant value");
                    return false;
                }
                self.errors.value = validate_value(&raw, self.original_value());
                self.value = raw;
            }
        }
        true
    }

    pub fn is_submittable(&self) -> bool {
        if self.errors.is_active() || self.name.is_empty() || self.value.is_empty() {
            return false;
        }
        self.original_value()
            .is_none_or(|original| original != self.value)
    }

    /// The payload handed to the persistence callback.
    pub fn draft(&self) -> Constant {
        Constant::new(
            self.name.clone(),
            self.value.clone(),
            self.environments.clone(),
        )
    }

    /// Invoke `persist` with the draft unless an error is active. Returns
    /// whether the callback fired; a withheld submit has no other feedback.
    pub fn submit<F>(&self, persist: F) -> bool
    where
        F: FnOnce(Constant, bool),
    {
        if self.errors.is_active() {
            debug!(
                name_error = ?self.errors.name,
                value_error = ?self.errors.value,
                "Constant form submit withheld"
            );
            return false;
        }
        persist(self.draft(), self.mode.is_edit());
        true
    }

    pub fn cancel<F: FnOnce()>(&self, on_cancel: F) {
        on_cancel()
    }

    /// Focusing the value field reveals it. Returns `true` when a resize
    /// pass should follow, which is the case when editing an existing
    /// constant.
    pub fn focus_value(&mut self) -> bool {
        self.visibility = Visibility::Revealed;
        self.selected.is_some()
    }

    pub fn blur_value(&mut self) {
        self.visibility = Visibility::Hidden;
    }

    pub fn toggle_visibility(&mut self) {
        self.visibility = self.visibility.toggled();
    }

    pub fn displayed_value(&self) -> String {
        displayed_value(&self.value, self.visibility)
    }

    /// Resize the value box to the rows the current value renders in.
    pub fn auto_resize(&mut self, rendered_rows: usize) {
        self.value_box.auto_resize(&self.value, rendered_rows);
    }

    pub fn title(&self) -> String {
        let action = if self.selected.is_none() {
            "Add new constant"
        } else {
            "Update constant"
        };
        format!("{} in {}", action, self.environment.name)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.selected.is_none() {
            "Add constant"
        } else {
            "Update"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{NameError, ValueError};
    use std::cell::RefCell;

    fn production() -> Environment {
        Environment::new("env-prod", "production")
    }

    fn nothing_exists(_: &str, _: &str) -> bool {
        false
    }

    fn create_form() -> ConstantForm {
        ConstantForm::new(None, production(), FormMode::Create)
    }

    fn edit_form(value: &str) -> ConstantForm {
        let selected = Constant::new("API_KEY", value, vec![production().as_option()]);
        ConstantForm::new(Some(selected), production(), FormMode::Edit)
    }

    fn type_value(form: &mut ConstantForm, value: &str) {
        form.focus_value();
        assert!(form.on_field_change(FormField::Value, value, &nothing_exists));
    }

    #[test]
    fn test_new_create_form_is_empty_and_pinned() {
        let form = create_form();
        assert_eq!(form.name(), "");
        assert_eq!(form.value(), "");
        assert_eq!(form.errors(), &ErrorState::default());
        let draft = form.draft();
        assert_eq!(draft.environments, vec![production().as_option()]);
        assert!(!form.is_name_locked());
        assert!(!form.is_submittable());
    }

    #[test]
    fn test_new_edit_form_is_seeded_without_validation() {
        let form = edit_form("old");
        assert_eq!(form.name(), "API_KEY");
        assert_eq!(form.value(), "old");
        assert_eq!(form.errors(), &ErrorState::default());
        assert!(form.is_name_locked());
        assert_eq!(form.title(), "Update constant in production");
        assert_eq!(form.submit_label(), "Update");
    }

    #[test]
    fn test_create_example_submits_draft() {
        let mut form = create_form();
        assert!(form.on_field_change(FormField::Name, "API_KEY", &nothing_exists));
        type_value(&mut form, "secret123");

        assert_eq!(form.errors(), &ErrorState::default());
        assert!(form.is_submittable());

        let submitted = RefCell::new(None);
        let fired = form.submit(|draft, is_edit| {
            *submitted.borrow_mut() = Some((draft, is_edit));
        });
        assert!(fired);

        let (draft, is_edit) = submitted.into_inner().unwrap_or_else(|| panic!("no submit"));
        assert!(!is_edit);
        assert_eq!(draft.name, "API_KEY");
        assert_eq!(draft.expose_value(), "secret123");
        assert_eq!(draft.environments, vec![production().as_option()]);
        assert_eq!(form.title(), "Add new constant in production");
        assert_eq!(form.submit_label(), "Add constant");
    }

    #[test]
    fn test_invalid_input_is_kept() {
        let mut form = create_form();
        form.on_field_change(FormField::Name, "9lives", &nothing_exists);
        assert_eq!(form.name(), "9lives");
        assert_eq!(form.errors().name, Some(NameError::InvalidName));
        assert!(!form.is_submittable());
    }

    #[test]
    fn test_name_error_cleared_by_valid_change() {
        let mut form = create_form();
        form.on_field_change(FormField::Name, "9lives", &nothing_exists);
        form.on_field_change(FormField::Name, "lives", &nothing_exists);
        assert_eq!(form.errors().name, None);
    }

    #[test]
    fn test_max_length_name_is_still_submittable() {
        let mut form = create_form();
        form.on_field_change(FormField::Name, "A".repeat(32), &nothing_exists);
        type_value(&mut form, "value");
        assert_eq!(form.errors().name, Some(NameError::MaxLengthReached));
        assert!(form.is_submittable());
        assert!(form.submit(|_, _| {}));
    }

    #[test]
    fn test_too_long_name_blocks_submission() {
        let mut form = create_form();
        form.on_field_change(FormField::Name, "A".repeat(33), &nothing_exists);
        type_value(&mut form, "value");
        assert_eq!(form.errors().name, Some(NameError::InvalidLength));
        assert!(!form.is_submittable());
        assert!(!form.submit(|_, _| panic!("must not persist")));
    }

    #[test]
    fn test_duplicate_name_uses_lookup_with_environment_id() {
        let mut form = create_form();
        let lookup = |name: &str, env_id: &str| name == "API_KEY" && env_id == "env-prod";
        form.on_field_change(FormField::Name, "API_KEY", &lookup);
        assert_eq!(
            form.errors().name_message().as_deref(),
            Some("Constant with this name already exists in Production environment")
        );
    }

    #[test]
    fn test_setting_one_error_keeps_the_other() {
        let mut form = create_form();
        type_value(&mut form, "   ");
        form.on_field_change(FormField::Name, "9lives", &nothing_exists);
        assert_eq!(form.errors().value, Some(ValueError::InvalidLength));
        assert_eq!(form.errors().name, Some(NameError::InvalidName));

        form.on_field_change(FormField::Name, "lives", &nothing_exists);
        assert_eq!(form.errors().value, Some(ValueError::InvalidLength));
    }

    #[test]
    fn test_blank_value_blocks_submission() {
        let mut form = create_form();
        form.on_field_change(FormField::Name, "API_KEY", &nothing_exists);
        type_value(&mut form, "  \n ");
        assert_eq!(form.errors().value, Some(ValueError::InvalidLength));
        assert!(!form.is_submittable());
        assert!(!form.submit(|_, _| panic!("must not persist")));
    }

    #[test]
    fn test_value_error_clears_after_fix() {
        let mut form = create_form();
        type_value(&mut form, "");
        assert_eq!(form.errors().value, Some(ValueError::InvalidLength));
        type_value(&mut form, "fixed");
        assert_eq!(form.errors().value, None);
    }

    #[test]
    fn test_edit_unchanged_value_blocks_submission() {
        let mut form = edit_form("old");
        assert!(!form.is_submittable());

        type_value(&mut form, "older");
        assert!(form.is_submittable());

        type_value(&mut form, "old");
        assert_eq!(
            form.errors().value_message().as_deref(),
            Some("This value is already in use. Please enter a different value")
        );
        assert!(!form.is_submittable());
    }

    #[test]
    fn test_edit_submit_reports_edit_mode() {
        let mut form = edit_form("old");
        type_value(&mut form, "new");
        let mut seen = None;
        form.submit(|draft, is_edit| seen = Some((draft.name, is_edit)));
        assert_eq!(seen, Some(("API_KEY".to_string(), true)));
    }

    #[test]
    fn test_locked_name_ignores_changes() {
        let mut form = edit_form("old");
        assert!(!form.on_field_change(FormField::Name, "OTHER", &nothing_exists));
        assert_eq!(form.name(), "API_KEY");
    }

    #[test]
    fn test_masked_value_is_read_only() {
        let mut form = create_form();
        assert!(form.is_value_read_only());
        assert!(!form.on_field_change(FormField::Value, "typed", &nothing_exists));
        assert_eq!(form.value(), "");
    }

    #[test]
    fn test_masking_follows_focus_and_blur() {
        let mut form = create_form();
        type_value(&mut form, "hunter2");
        form.blur_value();
        assert_eq!(form.displayed_value(), "*******");

        form.focus_value();
        assert_eq!(form.displayed_value(), "hunter2");

        form.blur_value();
        assert_eq!(form.displayed_value(), "*******");

        form.toggle_visibility();
        assert_eq!(form.displayed_value(), "hunter2");
        form.toggle_visibility();
        assert!(form.is_value_read_only());
    }

    #[test]
    fn test_focus_requests_resize_only_when_editing() {
        let mut create = create_form();
        assert!(!create.focus_value());

        let mut edit = edit_form(&"x".repeat(60));
        assert_eq!(edit.value_box().rows, crate::masking::VALUE_BOX_TALL_ROWS);
        assert!(edit.focus_value());
        edit.auto_resize(2);
        assert_eq!(edit.value_box().rows, 2);
    }

    #[test]
    fn test_cancel_invokes_callback() {
        let form = create_form();
        let mut cancelled = false;
        form.cancel(|| cancelled = true);
        assert!(cancelled);
    }
}
