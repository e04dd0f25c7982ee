//! Form Validation
//!
//! Lightweight required-field and email-format validation bound to forms in
//! the content region. Invalid fields get `aria-invalid` and an adjacent
//! error message span; re-running validation replaces earlier markers.

use glide_dom::{Document, NodeId};

/// Idempotence marker set on bound forms.
pub const BOUND_ATTR: &str = "data-validation-bound";
/// Class of the inserted error message spans.
pub const ERROR_CLASS: &str = "field-error";

/// Field kind derived from the `type` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
}

impl FieldKind {
    fn of(doc: &Document, field: NodeId) -> FieldKind {
        match doc.element(field).and_then(|el| el.attr("type")) {
            Some(t) if t.eq_ignore_ascii_case("email") => FieldKind::Email,
            _ => FieldKind::Text,
        }
    }
}

/// Validate a single value. Returns the failure message, if any.
pub fn validate_value(value: &str, kind: FieldKind, required: bool) -> Option<&'static str> {
    if required && value.trim().is_empty() {
        return Some("Please fill out this field.");
    }
    if value.is_empty() {
        return None;
    }
    if kind == FieldKind::Email && !is_valid_email(value) {
        return Some("Please enter a valid email address.");
    }
    None
}

/// Minimal email shape check: local part, `@`, and a dotted domain.
pub fn is_valid_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Mark unbound forms under `region` as bound. Returns the newly bound ids.
pub fn bind_forms(doc: &mut Document, region: NodeId) -> Vec<NodeId> {
    let mut bound = Vec::new();
    for form in doc.elements_by_tag(region, "form") {
        let Some(el) = doc.element_mut(form) else {
            continue;
        };
        if el.has_attr(BOUND_ATTR) {
            continue;
        }
        el.set_attr(BOUND_ATTR, "true");
        bound.push(form);
    }
    bound
}

/// Validate every field in `form`, marking failures and inserting adjacent
/// error text. Markers from earlier runs are removed first. Returns whether
/// the form is valid.
pub fn validate_form(doc: &mut Document, form: NodeId) -> bool {
    clear_errors(doc, form);

    let mut valid = true;
    let fields: Vec<NodeId> = doc
        .elements_by_tag(form, "input")
        .into_iter()
        .chain(doc.elements_by_tag(form, "textarea"))
        .collect();
    for field in fields {
        let Some(el) = doc.element(field) else {
            continue;
        };
        let required = el.has_attr("required");
        let kind = FieldKind::of(doc, field);
        let value = el.attr("value").unwrap_or_default().to_string();

        let Some(message) = validate_value(&value, kind, required) else {
            continue;
        };
        valid = false;
        if let Some(el) = doc.element_mut(field) {
            el.set_attr("aria-invalid", "true");
        }
        let span = doc.create_element("span");
        if let Some(span_el) = doc.element_mut(span) {
            span_el.set_attr("class", ERROR_CLASS);
        }
        let text = doc.create_text(message);
        doc.append_child(span, text);
        doc.insert_after(field, span);
    }
    valid
}

/// Remove error spans and invalid markers from an earlier validation run.
fn clear_errors(doc: &mut Document, form: NodeId) {
    let spans: Vec<NodeId> = doc
        .elements_by_tag(form, "span")
        .into_iter()
        .filter(|&n| doc.element(n).is_some_and(|el| el.has_class(ERROR_CLASS)))
        .collect();
    for span in spans {
        doc.detach(span);
    }

    let fields: Vec<NodeId> = doc
        .elements_by_tag(form, "input")
        .into_iter()
        .chain(doc.elements_by_tag(form, "textarea"))
        .collect();
    for field in fields {
        if let Some(el) = doc.element_mut(field) {
            el.remove_attr("aria-invalid");
        }
    }
}
