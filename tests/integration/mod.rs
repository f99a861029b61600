//! Integration tests for the V7 Go client, SDK and CLI

mod cli_parse;
mod config_loading;
mod http_stack;
mod pagination_properties;
mod support;
mod template_import;
