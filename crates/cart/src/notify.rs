//! User-facing notices for rejected and failed cart operations.
//!
//! A storefront shows these as toasts. The cart only decides *which* notice
//! to show; a [`Notifier`] decides how it reaches the shopper.

use std::sync::{Arc, Mutex, PoisonError};

use rocket_shoes_core::Locale;

/// A notice shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested quantity exceeds available inventory.
    OutOfStock,
    /// Adding a product failed.
    AddFailed,
    /// Removing a product failed.
    RemoveFailed,
    /// Changing a product's quantity failed.
    UpdateAmountFailed,
}

impl Notice {
    /// Localized message text.
    #[must_use]
    pub const fn message(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (Self::OutOfStock, Locale::PtBr) => "Quantidade solicitada fora de estoque",
            (Self::OutOfStock, Locale::En) => "Requested quantity is out of stock",
            (Self::AddFailed, Locale::PtBr) => "Erro na adição do produto",
            (Self::AddFailed, Locale::En) => "Failed to add product",
            (Self::RemoveFailed, Locale::PtBr) => "Erro na remoção do produto",
            (Self::RemoveFailed, Locale::En) => "Failed to remove product",
            (Self::UpdateAmountFailed, Locale::PtBr) => {
                "Erro na alteração de quantidade do produto"
            }
            (Self::UpdateAmountFailed, Locale::En) => "Failed to update product amount",
        }
    }
}

/// Delivers notices to the shopper.
pub trait Notifier: Send + Sync {
    /// Show an error notice.
    fn error(&self, notice: Notice);
}

impl<N: Notifier + ?Sized> Notifier for Arc<N> {
    fn error(&self, notice: Notice) {
        (**self).error(notice);
    }
}

/// Emits notices as `tracing` warnings in the configured locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier {
    locale: Locale,
}

impl TracingNotifier {
    /// Create a notifier that renders messages in `locale`.
    #[must_use]
    pub const fn new(locale: Locale) -> Self {
        Self { locale }
    }
}

impl Notifier for TracingNotifier {
    fn error(&self, notice: Notice) {
        tracing::warn!(
            notice = ?notice,
            locale = %self.locale,
            "{}",
            notice.message(self.locale)
        );
    }
}

/// Collects notices in memory.
///
/// Useful in tests, and for front ends that drain notices after each operation.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices recorded so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return all recorded notices.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for RecordingNotifier {
    fn error(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pt_br() {
        assert_eq!(
            Notice::OutOfStock.message(Locale::PtBr),
            "Quantidade solicitada fora de estoque"
        );
        assert_eq!(
            Notice::AddFailed.message(Locale::PtBr),
            "Erro na adição do produto"
        );
        assert_eq!(
            Notice::RemoveFailed.message(Locale::PtBr),
            "Erro na remoção do produto"
        );
        assert_eq!(
            Notice::UpdateAmountFailed.message(Locale::PtBr),
            "Erro na alteração de quantidade do produto"
        );
    }

    #[test]
    fn test_every_notice_has_english_text() {
        for notice in [
            Notice::OutOfStock,
            Notice::AddFailed,
            Notice::RemoveFailed,
            Notice::UpdateAmountFailed,
        ] {
            assert!(!notice.message(Locale::En).is_empty());
            assert_ne!(notice.message(Locale::En), notice.message(Locale::PtBr));
        }
    }

    #[test]
    fn test_recording_notifier_drain() {
        let notifier = RecordingNotifier::new();
        notifier.error(Notice::AddFailed);
        notifier.error(Notice::OutOfStock);

        assert_eq!(notifier.notices(), vec![Notice::AddFailed, Notice::OutOfStock]);
        assert_eq!(notifier.drain().len(), 2);
        assert!(notifier.notices().is_empty());
    }

    #[test]
    fn test_arc_notifier_forwards() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handle: Arc<RecordingNotifier> = Arc::clone(&notifier);
        handle.error(Notice::RemoveFailed);
        assert_eq!(notifier.notices(), vec![Notice::RemoveFailed]);
    }
}
