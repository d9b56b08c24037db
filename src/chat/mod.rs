// Chat transport — Twitch IRC connection and credential handling.
//
// The transport hands fully-formed (sender, text) pairs to the
// aggregation core; everything protocol-shaped stays in here.

pub mod auth;
pub mod client;
