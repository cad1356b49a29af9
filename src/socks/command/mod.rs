//! SOCKS5 command parsing module
//!
//! Handles parsing SOCKS5 requests and building replies.

mod parser;
mod reply;

pub use parser::{parse_command, read_request};
pub use reply::{
    encode_failure, encode_reply, send_command_not_supported, send_failure, send_success,
};
