use crate::device_camera::interface::{AuthorizationState, DeviceCamera};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Turns the camera's authorization status into a final decision.
///
/// The first `resolve` decides and every later call returns the cached state,
/// so the platform prompt is shown at most once for the life of the gate.
pub struct PermissionGate {
    device_camera: Arc<dyn DeviceCamera + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    resolved: OnceCell<AuthorizationState>,
}

impl PermissionGate {
    pub fn new(
        device_camera: Arc<dyn DeviceCamera + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            device_camera,
            logger: logger.with_namespace("permission"),
            resolved: OnceCell::new(),
        }
    }

    pub async fn resolve(&self) -> AuthorizationState {
        *self.resolved.get_or_init(|| self.decide()).await
    }

    async fn decide(&self) -> AuthorizationState {
        let status = self.device_camera.authorization_status();
        match status {
            AuthorizationState::Authorized => {
                let _ = self.logger.info("Camera access already granted");
                status
            }
            AuthorizationState::NotDetermined => self.prompt().await,
            AuthorizationState::Denied => {
                let _ = self.logger.info("Camera access was denied previously");
                status
            }
            AuthorizationState::Restricted => {
                let _ = self
                    .logger
                    .info("Camera access is blocked by a device restriction");
                status
            }
            AuthorizationState::Unknown => {
                let _ = self.logger.warn("Camera access status is unknown");
                status
            }
        }
    }

    async fn prompt(&self) -> AuthorizationState {
        let device_camera = self.device_camera.clone();
        match tokio::task::spawn_blocking(move || device_camera.request_authorization()).await {
            Ok(true) => {
                let _ = self.logger.info("User granted camera access");
                AuthorizationState::Authorized
            }
            Ok(false) => {
                let _ = self.logger.info("User did not grant camera access");
                AuthorizationState::Denied
            }
            Err(e) => {
                let _ = self
                    .logger
                    .warn(&format!("Permission prompt did not complete: {}", e));
                AuthorizationState::Unknown
            }
        }
    }
}
