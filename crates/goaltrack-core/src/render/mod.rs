//! Plain-text rendering of chat replies

pub mod reply_render;

pub use reply_render::{
    render_daily, render_error, render_help, render_marked, render_registered,
    render_restart, render_tally,
};
