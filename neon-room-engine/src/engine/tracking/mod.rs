//! Consumers of the host page's tracking collaborators.
//!
//! Face landmarks and microphone spectra are detected by the host page and
//! arrive over RPC. This module only turns them into an eye estimate and clap
//! events, and records which collaborators have failed so their features stay
//! off for the rest of the session.

use bevy::prelude::*;

use crate::engine::errors::CollaboratorError;

/// Clap detection from microphone frequency bins.
pub mod clap_detection;

/// Smoothed eye position from face landmark frames.
pub mod eye_tracking;

/// Which host features are unavailable, with the errors that disabled them.
#[derive(Resource, Debug, Default)]
pub struct CollaboratorStatus {
    pub head_tracking_disabled: bool,
    pub audio_disabled: bool,
    pub errors: Vec<CollaboratorError>,
}

impl CollaboratorStatus {
    /// Log a collaborator failure and switch off the feature it affects.
    pub fn record(&mut self, error: CollaboratorError) {
        warn!("Collaborator failure: {}", error);

        match error.feature() {
            Some("camera" | "head_tracking" | "face_landmarks") => {
                self.head_tracking_disabled = true;
            }
            Some("microphone" | "audio" | "audio_spectrum") => {
                self.audio_disabled = true;
            }
            _ => {}
        }
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_only_disable_their_feature() {
        let mut status = CollaboratorStatus::default();

        status.record(CollaboratorError::PermissionDenied {
            feature: "microphone".to_string(),
        });
        assert!(status.audio_disabled);
        assert!(!status.head_tracking_disabled);

        status.record(CollaboratorError::MissingDomTarget {
            id: "scene-buttons".to_string(),
        });
        assert!(!status.head_tracking_disabled);
        assert_eq!(status.errors.len(), 2);
    }
}
