//! Share-URL modeling: video ids, API URLs, output filenames.

mod filename;
mod video_id;

pub use filename::{derive_video_filename, sanitize_stem};
pub use video_id::{api_detail_url, is_direct_media_url, video_id_from_input, video_id_from_url};
