#![allow(missing_docs)]

pub(crate) mod html;
pub(crate) mod http;
pub(crate) mod store;

pub(crate) use html::{assert_valid_html, parse_html_document, parse_html_fragment};
pub(crate) use http::{
    assert_hx_redirect, assert_html_content_type, assert_status, parse_json_body,
};
pub(crate) use store::{must_add, test_store};
