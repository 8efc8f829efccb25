//! In-process notification hub
//!
//! One broadcast channel per empresa. Dashboard WebSocket sessions
//! subscribe on connect; order handlers publish after persisting the
//! notification. Slow or closed subscribers never block a publish.

use dashmap::DashMap;
use shared::models::Notificacion;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Buffered notifications per subscriber before lagging kicks in
const CHANNEL_CAPACITY: usize = 64;

#[derive(Clone, Default)]
pub struct NotifyHub {
    channels: Arc<DashMap<String, broadcast::Sender<Notificacion>>>,
}

impl NotifyHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one empresa's notification stream
    pub fn subscribe(&self, empresa_id: &str) -> broadcast::Receiver<Notificacion> {
        self.channels
            .entry(empresa_id.to_string())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    /// Push a notification to every connected dashboard of one empresa.
    ///
    /// Returns the number of live subscribers. Zero is not an error;
    /// the notification is already persisted and shows up on next login.
    pub fn publish(&self, empresa_id: &str, notificacion: Notificacion) -> usize {
        let Some(tx) = self.channels.get(empresa_id) else {
            return 0;
        };

        match tx.send(notificacion) {
            Ok(n) => n,
            Err(_) => {
                // All receivers dropped; channel stays for the next subscriber
                0
            }
        }
    }

    /// Drop the channel once the last dashboard disconnects
    pub fn release(&self, empresa_id: &str) {
        self.channels
            .remove_if(empresa_id, |_, tx| tx.receiver_count() == 0);
    }

    /// Number of live subscribers for one empresa
    pub fn subscriber_count(&self, empresa_id: &str) -> usize {
        self.channels
            .get(empresa_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::NotificacionTipo;
    use shared::util::now_millis;

    fn sample(empresa: &str) -> Notificacion {
        Notificacion {
            id: None,
            empresa: Some(empresa.to_string()),
            titulo: "Nuevo pedido".to_string(),
            mensaje: "Pedido de prueba".to_string(),
            tipo: NotificacionTipo::NuevoPedido,
            leida: false,
            created_at: now_millis(),
            metadata: None,
        }
    }

    #[tokio::test]
    async fn test_publish_reaches_subscriber() {
        let hub = NotifyHub::new();
        let mut rx = hub.subscribe("empresa:a");

        assert_eq!(hub.publish("empresa:a", sample("empresa:a")), 1);

        let received = rx.recv().await.expect("notification");
        assert_eq!(received.titulo, "Nuevo pedido");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers() {
        let hub = NotifyHub::new();
        assert_eq!(hub.publish("empresa:a", sample("empresa:a")), 0);
    }

    #[tokio::test]
    async fn test_channels_are_isolated_per_empresa() {
        let hub = NotifyHub::new();
        let mut rx_a = hub.subscribe("empresa:a");
        let _rx_b = hub.subscribe("empresa:b");

        hub.publish("empresa:a", sample("empresa:a"));

        assert!(rx_a.try_recv().is_ok());
        assert_eq!(hub.subscriber_count("empresa:b"), 1);
    }

    #[tokio::test]
    async fn test_release_prunes_dead_channels() {
        let hub = NotifyHub::new();
        {
            let _rx = hub.subscribe("empresa:a");
            hub.release("empresa:a"); // still subscribed, stays
            assert_eq!(hub.subscriber_count("empresa:a"), 1);
        }
        hub.release("empresa:a");
        assert_eq!(hub.subscriber_count("empresa:a"), 0);
    }
}
