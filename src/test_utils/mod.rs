#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use form::{
    assert_field_error, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button_with_text, assert_hx_endpoint, assert_no_field_errors,
    assert_selected_option, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, must_get_alert_message, parse_html_document, parse_html_fragment,
    select_texts,
};
pub(crate) use http::{assert_content_type, assert_hx_redirect, assert_status_ok, get_header};
