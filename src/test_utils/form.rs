use scraper::{ElementRef, Selector};

#[track_caller]
pub(crate) fn must_get_form<'a>(html: &'a scraper::Html) -> ElementRef<'a> {
    html.select(&Selector::parse("form").unwrap())
        .next()
        .expect("No form found")
}

#[track_caller]
pub(crate) fn assert_hx_endpoint(form: &ElementRef<'_>, endpoint: &str, attribute: &str) {
    let got = form
        .value()
        .attr(attribute)
        .unwrap_or_else(|| panic!("{attribute} attribute missing"));

    assert_eq!(
        got, endpoint,
        "want form with attribute {attribute}=\"{endpoint}\", got {got:?}"
    );
}

#[track_caller]
fn must_get_input<'a>(form: &ElementRef<'a>, name: &str) -> ElementRef<'a> {
    let selector = Selector::parse(&format!("input[name='{name}']")).unwrap();

    form.select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No input found with name \"{name}\""))
}

/// Assert a required input named `name` with the given `type_` exists.
#[track_caller]
pub(crate) fn assert_form_input(form: &ElementRef<'_>, name: &str, type_: &str) {
    let input = must_get_input(form, name);
    let got_type = input.value().attr("type").unwrap_or_default();

    assert_eq!(
        got_type, type_,
        "want input {name} with type \"{type_}\", got {got_type:?}"
    );
    assert!(
        input.value().attr("required").is_some(),
        "want input with name {name} to have the required attribute but got none"
    );
}

#[track_caller]
pub(crate) fn assert_form_input_with_value(
    form: &ElementRef<'_>,
    name: &str,
    type_: &str,
    value: &str,
) {
    assert_form_input(form, name, type_);

    let got_value = must_get_input(form, name)
        .value()
        .attr("value")
        .unwrap_or_default();
    assert_eq!(
        got_value, value,
        "want input {name} with value \"{value}\", got {got_value:?}"
    );
}

/// Assert the `select` named `name` has `value` selected.
#[track_caller]
pub(crate) fn assert_selected_option(form: &ElementRef<'_>, name: &str, value: &str) {
    let selector = Selector::parse(&format!("select[name='{name}'] option[selected]")).unwrap();
    let got = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No selected option for \"{name}\""))
        .value()
        .attr("value")
        .unwrap_or_default();

    assert_eq!(got, value, "want {name} option \"{value}\" selected, got {got:?}");
}

#[track_caller]
pub(crate) fn assert_form_submit_button_with_text(form: &ElementRef<'_>, text: &str) {
    let submit_button = form
        .select(&Selector::parse("button[type='submit']").unwrap())
        .next()
        .expect("No submit button found");

    let got_text = submit_button.text().collect::<String>();
    assert_eq!(text, got_text.trim());
}

/// Assert the message shown under the field `field`.
#[track_caller]
pub(crate) fn assert_field_error(form: &ElementRef<'_>, field: &str, message: &str) {
    let selector = Selector::parse(&format!("p[data-field-error='{field}']")).unwrap();
    let got = form
        .select(&selector)
        .next()
        .unwrap_or_else(|| panic!("No error shown for field \"{field}\""))
        .text()
        .collect::<String>();

    assert_eq!(message, got.trim());
}

/// Assert no field of the form shows a validation message.
#[track_caller]
pub(crate) fn assert_no_field_errors(form: &ElementRef<'_>) {
    let errors = form
        .select(&Selector::parse("p[data-field-error]").unwrap())
        .map(|p| p.text().collect::<String>())
        .collect::<Vec<_>>();

    assert!(errors.is_empty(), "want no field errors, got {errors:?}");
}
