// Yapmeter: yap-leaderboard chat statistics for Twitch chat.
//
// This is the library root. `analysis` is the aggregation and scoring
// core; every other module is glue around it (chat transport, settings,
// menu, report output).

pub mod analysis;
pub mod chat;
pub mod config;
pub mod menu;
pub mod output;
