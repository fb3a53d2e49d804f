use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::error::SchemaLoadError;
use super::source::SchemaSource;
use crate::model::{FormType, Schema};

/// Identifies one schema request.
///
/// Generations increase with every request a session issues; only the
/// completion carrying the latest generation may be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    form_type: FormType,
    generation: u64,
}

impl LoadTicket {
    pub(crate) fn new(form_type: FormType, generation: u64) -> Self {
        Self {
            form_type,
            generation,
        }
    }

    pub fn form_type(&self) -> &FormType {
        &self.form_type
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The answer to a [`LoadTicket`].
#[derive(Debug)]
pub struct LoadCompletion {
    pub ticket: LoadTicket,
    pub result: Result<Schema, SchemaLoadError>,
}

/// Runs schema fetches in the background and reports them over a channel.
///
/// Fetches are never cancelled; stale completions are filtered out by the
/// session when they arrive.
#[derive(Clone)]
pub struct SchemaLoader {
    source: Arc<dyn SchemaSource>,
    completions: mpsc::UnboundedSender<LoadCompletion>,
}

impl SchemaLoader {
    /// Creates a loader and the receiving end of its completion channel.
    pub fn new(source: Arc<dyn SchemaSource>) -> (Self, mpsc::UnboundedReceiver<LoadCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let loader = Self {
            source,
            completions: tx,
        };
        (loader, rx)
    }

    /// Returns the form types offered by the underlying source.
    pub fn form_types(&self) -> Vec<FormType> {
        self.source.form_types()
    }

    /// Spawns the fetch for `ticket` on the current tokio runtime.
    pub fn request(&self, ticket: LoadTicket) -> JoinHandle<()> {
        let source = Arc::clone(&self.source);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let result = source.fetch_schema(ticket.form_type()).await;
            // The receiver is gone once the app has shut down.
            let _ = completions.send(LoadCompletion { ticket, result });
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::schema::MockSchemaSource;

    fn loader() -> (SchemaLoader, mpsc::UnboundedReceiver<LoadCompletion>) {
        let source = MockSchemaSource::builtin(Duration::ZERO).unwrap();
        SchemaLoader::new(Arc::new(source))
    }

    #[test]
    fn ticket_accessors() {
        let ticket = LoadTicket::new("User Information".into(), 4);
        assert_eq!(ticket.form_type().as_str(), "User Information");
        assert_eq!(ticket.generation(), 4);
    }

    #[test]
    fn form_types_come_from_source() {
        let (loader, _rx) = loader();
        assert_eq!(loader.form_types().len(), 3);
    }

    #[tokio::test]
    async fn request_delivers_completion_with_ticket() {
        let (loader, mut rx) = loader();
        let ticket = LoadTicket::new("Payment Information".into(), 1);
        loader.request(ticket.clone()).await.unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.ticket, ticket);
        assert_eq!(completion.result.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn failed_fetch_is_delivered_too() {
        let (loader, mut rx) = loader();
        loader
            .request(LoadTicket::new("Nope".into(), 2))
            .await
            .unwrap();

        let completion = rx.recv().await.unwrap();
        assert_eq!(completion.ticket.generation(), 2);
        assert!(matches!(
            completion.result,
            Err(SchemaLoadError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn request_after_receiver_dropped_does_not_panic() {
        let (loader, rx) = loader();
        drop(rx);
        loader
            .request(LoadTicket::new("User Information".into(), 1))
            .await
            .unwrap();
    }
}
