mod client;
mod console;
mod parameters;

pub use client::Client;
pub use console::{Console, VENDOR_DOMAIN};
pub use parameters::{site_scope_value, Parameters, SITE_IDS_PARAMETER};
