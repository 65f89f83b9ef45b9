mod candidate_builder;
mod history_stream;
mod image_extractor;

pub use candidate_builder::CandidateBuilder;
pub use history_stream::HistoryStream;
pub use image_extractor::{images_urls, is_image_attachment, IMAGE_CONTENT_TYPES, IMAGE_EXTENSIONS};
