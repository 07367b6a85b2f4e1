use listing_logging::{listing_debug, listing_info, listing_warn};

use crate::{Effect, ListingState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ListingState, msg: Msg) -> (ListingState, Vec<Effect>) {
    if state.is_torn_down() {
        listing_debug!("listing torn down; dropping {:?}", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            state.begin_page_request();
            vec![Effect::FetchPage {
                file_type: state.file_type().clone(),
                page: 1,
            }]
        }
        Msg::PageLoaded(result) => {
            let page = result.page;
            if let Err(err) = state.apply_page(result) {
                listing_warn!("rejected page {}: {}", page, err);
            }
            Vec::new()
        }
        Msg::PageFailed { page, message } => {
            listing_warn!("page {} failed to load: {}", page, message);
            state.apply_failure(page, message);
            Vec::new()
        }
        Msg::LoadMore => {
            let next_page = state
                .list()
                .filter(|list| list.has_next_page())
                .map(|list| list.current_page() + 1);
            match next_page {
                Some(page) if !state.is_next_page_loading() => {
                    state.begin_page_request();
                    vec![Effect::FetchPage {
                        file_type: state.file_type().clone(),
                        page,
                    }]
                }
                _ => Vec::new(),
            }
        }
        Msg::RequestPage(0) => {
            listing_warn!("ignoring request for page 0");
            Vec::new()
        }
        Msg::RequestPage(page) => {
            state.begin_page_request();
            vec![Effect::FetchPage {
                file_type: state.file_type().clone(),
                page,
            }]
        }
        Msg::RemoveClicked(id) => {
            if state.mark_removed(&id) {
                vec![Effect::RemoveFile { id }]
            } else {
                listing_debug!("remove for unknown or hidden id {}; ignoring", id);
                Vec::new()
            }
        }
        Msg::FilesDropped(files) => {
            if !state.can_upload() {
                listing_info!("dropped {} file(s) without upload permission", files.len());
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(files.len());
            for file_name in files {
                effects.push(Effect::Upload {
                    local_id: state.allocate_upload_id(),
                    file_name,
                    file_type: state.file_type().clone(),
                });
            }
            effects
        }
        Msg::PermissionsChanged { can_upload } => {
            state.set_can_upload(can_upload);
            Vec::new()
        }
        Msg::Unmounted => {
            state.tear_down();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
