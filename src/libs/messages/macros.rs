//! Output macros shared by every part of the tracker.
//!
//! Each macro routes a [`Message`](super::Message) (or anything `Display`)
//! either to the console or, when debug mode is on, to `tracing` so that
//! console notices and structured logs never interleave. Passing `true` as a
//! second argument pads the output with blank lines.
//!
//! Debug mode is on when `SHIFTWATCH_DEBUG` or `RUST_LOG` is set. The check
//! runs once and is cached for the life of the process.
//!
//! ```rust,no_run
//! use shiftwatch::libs::messages::Message;
//! use shiftwatch::{msg_info, msg_warning};
//!
//! msg_info!(Message::TrackerStarted("E1001".to_string(), 30));
//! msg_warning!(Message::ActivityLogWriteFailed("disk full".to_string()));
//! ```

use std::sync::OnceLock;

static DEBUG_MODE: OnceLock<bool> = OnceLock::new();

/// Returns `true` when output should go through `tracing` instead of stdout.
#[doc(hidden)]
pub fn is_debug_mode() -> bool {
    *DEBUG_MODE.get_or_init(|| std::env::var("SHIFTWATCH_DEBUG").is_ok() || std::env::var("RUST_LOG").is_ok())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __msg_emit {
    ($level:ident, $console:ident, $prefix:expr, $msg:expr, $pad:expr) => {{
        let pad = if $pad { "\n" } else { "" };
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::$level!("{}{}{}{}", pad, $prefix, $msg, pad);
        } else {
            $console!("{}{}{}{}", pad, $prefix, $msg, pad);
        }
    }};
}

/// Plain message, no prefix.
#[macro_export]
macro_rules! msg_print {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_success {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "✅ ", $msg, true)
    };
}

/// Errors go to stderr outside of debug mode.
#[macro_export]
macro_rules! msg_error {
    ($msg:expr) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(error, eprintln, "❌ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_warning {
    ($msg:expr) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(warn, println, "⚠️ ", $msg, true)
    };
}

#[macro_export]
macro_rules! msg_info {
    ($msg:expr) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, false)
    };
    ($msg:expr, true) => {
        $crate::__msg_emit!(info, println, "ℹ️ ", $msg, true)
    };
}

/// Suppressed entirely unless debug mode is on.
#[macro_export]
macro_rules! msg_debug {
    ($msg:expr) => {
        if $crate::libs::messages::macros::is_debug_mode() {
            tracing::debug!("🔍 {}", $msg);
        }
    };
}

/// Builds an `anyhow::Error` from a message.
#[macro_export]
macro_rules! msg_error_anyhow {
    ($msg:expr) => {
        anyhow::anyhow!("❌ {}", $msg)
    };
}

/// Returns early with an `anyhow::Error` built from a message.
#[macro_export]
macro_rules! msg_bail_anyhow {
    ($msg:expr) => {
        anyhow::bail!("❌ {}", $msg)
    };
}
