// src/services/export_queue.rs
//! Asynchronous "export and e-mail" path.
//!
//! The request handler only enqueues an [`ExportProductsMessage`]; a worker
//! task drains the channel, runs a raw export and mails it. Nothing is
//! retried and nothing is deduplicated: a message handled twice sends two
//! e-mails.

use std::sync::Arc;

use thiserror::Error;
use tokio::{
    sync::mpsc::{self, error::TrySendError},
    task::JoinHandle,
};
use tracing::{error, info, instrument};

use super::exporter::{ExportMode, ProductExporter};
use super::mailer::{Attachment, Email, Mailer, MailerError};
use crate::error::AppError;
use crate::store::StoreError;

pub const EXPORT_EMAIL_SUBJECT: &str = "Export de vos produits";
pub const EXPORT_EMAIL_BODY: &str = "Voici le fichier contenant vos produits";
pub const EXPORT_ATTACHMENT_NAME: &str = "export.csv";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportProductsMessage {
    pub recipient_email: String,
}

#[derive(Debug, Error)]
pub enum ExportJobError {
    #[error("export failed: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Mail(#[from] MailerError),
}

#[derive(Clone)]
pub struct ExportQueue {
    tx: mpsc::Sender<ExportProductsMessage>,
}

impl ExportQueue {
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<ExportProductsMessage>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        (Self { tx }, rx)
    }

    /// Never waits: a full queue is reported back to the caller.
    pub fn dispatch(&self, message: ExportProductsMessage) -> Result<(), AppError> {
        self.tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => AppError::unavailable("Export queue is full, try again later"),
            TrySendError::Closed(_) => AppError::internal("Export queue is closed"),
        })
    }
}

pub struct ExportWorker {
    exporter: ProductExporter,
    mailer: Arc<dyn Mailer>,
    sender_address: String,
}

impl ExportWorker {
    pub fn new(exporter: ProductExporter, mailer: Arc<dyn Mailer>, sender_address: impl Into<String>) -> Self {
        Self { exporter, mailer, sender_address: sender_address.into() }
    }

    #[instrument(skip(self, message), fields(recipient = %message.recipient_email))]
    pub async fn handle(&self, message: ExportProductsMessage) -> Result<(), ExportJobError> {
        let result = self.exporter.export(ExportMode::Raw).await?;

        let email = Email {
            from: self.sender_address.clone(),
            to: message.recipient_email,
            subject: EXPORT_EMAIL_SUBJECT.to_string(),
            text: EXPORT_EMAIL_BODY.to_string(),
            attachments: vec![Attachment {
                filename: EXPORT_ATTACHMENT_NAME.to_string(),
                content_type: "text/csv".to_string(),
                content: result.csv.into_bytes(),
            }],
        };
        self.mailer.send(email).await?;
        Ok(())
    }

    /// Drain `rx` until every [`ExportQueue`] handle is dropped.
    pub fn spawn(self, mut rx: mpsc::Receiver<ExportProductsMessage>) -> JoinHandle<()> {
        tokio::spawn(async move {
            info!("Export worker started");
            while let Some(message) = rx.recv().await {
                if let Err(e) = self.handle(message).await {
                    error!(error = %e, "Export e-mail failed");
                }
            }
            info!("Export worker stopped");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::product::Product;
    use crate::store::InMemoryCatalogStore;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<Email>>,
    }

    #[async_trait]
    impl Mailer for RecordingMailer {
        async fn send(&self, email: Email) -> Result<(), MailerError> {
            self.sent.lock().unwrap().push(email);
            Ok(())
        }
    }

    fn store() -> Arc<InMemoryCatalogStore> {
        Arc::new(InMemoryCatalogStore::with_products(vec![Product {
            id: 1,
            name: "Lampe".into(),
            description: Some("Bureau".into()),
            price: 12.0,
            stock: 7,
        }]))
    }

    #[tokio::test]
    async fn worker_mails_raw_export() {
        let mailer = Arc::new(RecordingMailer::default());
        let worker = ExportWorker::new(ProductExporter::new(store()), mailer.clone(), "noreply@example.com");

        worker
            .handle(ExportProductsMessage { recipient_email: "alice@example.com".into() })
            .await
            .unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, "alice@example.com");
        assert_eq!(email.from, "noreply@example.com");
        assert_eq!(email.subject, "Export de vos produits");
        assert_eq!(email.attachments[0].filename, "export.csv");
        assert_eq!(email.attachments[0].content_type, "text/csv");
        assert_eq!(
            String::from_utf8(email.attachments[0].content.clone()).unwrap(),
            "id,name,description,price,stock\n1,Lampe,Bureau,12.00,7\n"
        );
    }

    #[tokio::test]
    async fn store_failure_sends_nothing() {
        let store = store();
        store.fail_with("offline");
        let mailer = Arc::new(RecordingMailer::default());
        let worker = ExportWorker::new(ProductExporter::new(store), mailer.clone(), "noreply@example.com");

        let err = worker
            .handle(ExportProductsMessage { recipient_email: "bob@example.com".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, ExportJobError::Store(_)));
        assert!(mailer.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn spawned_worker_drains_queue() {
        let mailer = Arc::new(RecordingMailer::default());
        let worker = ExportWorker::new(ProductExporter::new(store()), mailer.clone(), "noreply@example.com");
        let (queue, rx) = ExportQueue::channel(4);
        let handle = worker.spawn(rx);

        for to in ["a@example.com", "b@example.com"] {
            queue
                .dispatch(ExportProductsMessage { recipient_email: to.into() })
                .unwrap();
        }
        drop(queue);
        handle.await.unwrap();

        let recipients: Vec<String> = mailer.sent.lock().unwrap().iter().map(|e| e.to.clone()).collect();
        assert_eq!(recipients, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn full_queue_is_rejected_without_waiting() {
        let (queue, _rx) = ExportQueue::channel(1);
        queue
            .dispatch(ExportProductsMessage { recipient_email: "a@example.com".into() })
            .unwrap();

        let err = queue
            .dispatch(ExportProductsMessage { recipient_email: "b@example.com".into() })
            .unwrap_err();
        assert!(matches!(err, AppError::Unavailable(_)));
    }

    #[test]
    fn closed_queue_is_an_internal_error() {
        let (queue, rx) = ExportQueue::channel(1);
        drop(rx);
        let err = queue
            .dispatch(ExportProductsMessage { recipient_email: "a@example.com".into() })
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }
}
