use listing_core::Msg;
use listing_logging::{listing_debug, listing_info, listing_warn};

use crate::ListingEvent;

/// Translates a finished effect into the message the update loop consumes.
///
/// Removal and upload outcomes produce nothing. A failed delete leaves the
/// row hidden until the next page-1 fetch brings it back; an uploaded file
/// shows up whenever the host next fetches the page it lands on.
pub fn event_to_msg(event: ListingEvent) -> Option<Msg> {
    match event {
        ListingEvent::PageFetched { result: Ok(page), .. } => Some(Msg::PageLoaded(page)),
        ListingEvent::PageFetched {
            page,
            result: Err(err),
        } => Some(Msg::PageFailed {
            page,
            message: err.to_string(),
        }),
        ListingEvent::RemovalFinished { id, result: Ok(()) } => {
            listing_debug!("removed {}", id);
            None
        }
        ListingEvent::RemovalFinished {
            id,
            result: Err(err),
        } => {
            listing_warn!("removal of {} failed: {}", id, err);
            None
        }
        ListingEvent::UploadFinished {
            local_id,
            result: Ok(()),
        } => {
            listing_info!("upload {} accepted", local_id);
            None
        }
        ListingEvent::UploadFinished {
            local_id,
            result: Err(err),
        } => {
            listing_warn!("upload {} failed: {}", local_id, err);
            None
        }
    }
}
