use crate::peer::{MediaKind, PeerConnection, RemoteMedia};
use beacon_core::IceCandidate;
use std::sync::Arc;

/// One attempt at receiving the stream: the local peer connection plus the
/// candidates it gathered before they were allowed out.
pub struct NegotiationSession {
    pub(crate) id: u64,
    pub(crate) peer: Arc<dyn PeerConnection>,
    pub(crate) pending_candidates: Vec<IceCandidate>,
    pub(crate) remote_media: Option<RemoteMedia>,
}

impl NegotiationSession {
    pub(crate) fn new(id: u64, peer: Arc<dyn PeerConnection>) -> Self {
        Self {
            id,
            peer,
            pending_candidates: Vec::new(),
            remote_media: None,
        }
    }

    /// Attaches a remote track; a track from a different stream replaces
    /// the attached stream, as a video element's `srcObject` would.
    pub(crate) fn attach_track(&mut self, stream_id: String, track_id: String, kind: MediaKind) {
        match &mut self.remote_media {
            Some(media) if media.stream_id == stream_id => {
                if !media.tracks.iter().any(|(id, _)| *id == track_id) {
                    media.tracks.push((track_id, kind));
                }
            }
            _ => {
                self.remote_media = Some(RemoteMedia {
                    stream_id,
                    tracks: vec![(track_id, kind)],
                });
            }
        }
    }
}
