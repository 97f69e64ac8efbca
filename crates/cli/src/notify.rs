//! Terminal notifier: writes shopper notices as plain lines.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use rocket_shoes_cart::{Notice, Notifier};
use rocket_shoes_core::Locale;

/// Writes each notice's localized message on its own line.
///
/// The CLI writes to stderr so notices never mix with the cart listing on stdout.
#[derive(Debug)]
pub struct TerminalNotifier<W> {
    locale: Locale,
    out: Mutex<W>,
}

impl TerminalNotifier<io::Stderr> {
    /// Notifier writing to stderr.
    #[must_use]
    pub fn stderr(locale: Locale) -> Self {
        Self::new(locale, io::stderr())
    }
}

impl<W: Write + Send> TerminalNotifier<W> {
    /// Notifier writing to `out`.
    #[must_use]
    pub const fn new(locale: Locale, out: W) -> Self {
        Self {
            locale,
            out: Mutex::new(out),
        }
    }

    /// Consume the notifier and return its writer.
    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Notifier for TerminalNotifier<W> {
    fn error(&self, notice: Notice) {
        let message = notice.message(self.locale);
        tracing::debug!(notice = ?notice, "Showing notice");

        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(out, "{message}").and_then(|()| out.flush()) {
            tracing::warn!(error = %e, message, "Failed to write notice");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_pt_br_message_line() {
        let notifier = TerminalNotifier::new(Locale::PtBr, Vec::new());
        notifier.error(Notice::OutOfStock);

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(written, "Quantidade solicitada fora de estoque\n");
    }

    #[test]
    fn test_writes_one_line_per_notice() {
        let notifier = TerminalNotifier::new(Locale::En, Vec::new());
        notifier.error(Notice::AddFailed);
        notifier.error(Notice::RemoveFailed);

        let written = String::from_utf8(notifier.into_inner()).unwrap();
        assert_eq!(written, "Failed to add product\nFailed to remove product\n");
    }
}
