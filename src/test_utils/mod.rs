#![allow(missing_docs)]

pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod stub_api;

pub(crate) use form::{assert_form_submit_button, assert_hx_endpoint, must_get_form};
pub(crate) use html::{
    assert_valid_html, parse_html_document, parse_html_fragment, select_texts,
};
pub(crate) use http::{assert_content_type, assert_status_ok, get_header};
pub(crate) use stub_api::{
    scenario_listing, scenario_response, spawn_stub_api, stub_api_client, stub_listing,
    test_transaction,
};
